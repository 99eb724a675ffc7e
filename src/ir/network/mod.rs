/*
 * @Date         : 2026-03-02
 * @Description  : Network：IR 图的所有者
 *
 * 各 impl 块分散在子模块中：
 * - core.rs: 增加层/数据、建立链接、基础访问器
 * - io.rs: 网络输入/输出的声明与推导
 * - order.rs: 层的规范（拓扑）迭代顺序
 *
 * 层与数据分别存放在各自的 arena 中，互相之间只用 `LayerId`/`DataId` 引用。
 * 名称映射决定“网络成员”：注入产生的层副本只进入 arena，不进入名称映射（称为游离层）。
 */

mod core;
mod io;
mod order;

use super::data::{Data, DataId, Precision};
use super::layer::{Layer, LayerId};
use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap};

/// 网络输入描述：包装一个没有生产者（或由输入占位层生产）的数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputInfo {
    data: DataId,
    pub precision: Precision,
}

impl InputInfo {
    pub fn new(data: DataId) -> Self {
        Self {
            data,
            precision: Precision::default(),
        }
    }

    pub const fn input_data(&self) -> DataId {
        self.data
    }
}

#[derive(Debug)]
pub struct Network {
    name: String,
    pub precision: Precision,
    layers: Vec<Layer>,
    /// 名称 -> 层；决定哪些层属于本网络
    layer_names: BTreeMap<String, LayerId>,
    data: Vec<Data>,
    data_names: BTreeMap<String, DataId>,
    /// 数据名 -> 输入描述
    inputs: BTreeMap<String, InputInfo>,
    /// 数据名 -> 输出数据
    outputs: BTreeMap<String, DataId>,
    /// (层, 载荷类型) -> 注入的载荷
    pub(in crate::ir) injected: HashMap<(LayerId, TypeId), Box<dyn Any>>,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}
