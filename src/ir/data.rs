/*
 * @Date         : 2026-03-02
 * @Description  : IR 的边：数据（张量描述符）
 *
 * 数据只描述张量（名称、维度、精度），不持有缓冲区。
 * - `creator`: 生产该数据的层（弱引用，网络输入则为 None）
 * - `input_to`: 消费端口名 -> 消费层（非拥有，可扇出到多个层）
 *
 * 两个方向的链接都由 `Network` 维护，所以这里只暴露只读访问器。
 */

use super::layer::LayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 数据在所属网络中的句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataId(pub usize);

/// 数值精度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Precision {
    #[default]
    Unspecified,
    Mixed,
    FP32,
    FP16,
    Q78,
    I16,
    U8,
    I8,
    U16,
    I32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Data {
    name: String,
    pub dims: Vec<usize>,
    pub precision: Precision,
    pub(in crate::ir) creator: Option<LayerId>,
    pub(in crate::ir) input_to: BTreeMap<String, LayerId>,
}

impl Data {
    pub fn new(name: &str, dims: &[usize], precision: Precision) -> Self {
        Self {
            name: name.to_string(),
            dims: dims.to_vec(),
            precision,
            creator: None,
            input_to: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// 生产该数据的层
    pub const fn creator(&self) -> Option<LayerId> {
        self.creator
    }

    /// 消费端口名 -> 消费层
    pub const fn input_to(&self) -> &BTreeMap<String, LayerId> {
        &self.input_to
    }

    /// 查找 `layer` 在本数据上登记的消费端口名（端口名最小者）
    pub fn port_of(&self, layer: LayerId) -> Option<&str> {
        self.ports_of(layer).next()
    }

    /// `layer` 在本数据上登记的全部消费端口名，按端口名排序
    pub fn ports_of(&self, layer: LayerId) -> impl Iterator<Item = &str> + '_ {
        self.input_to
            .iter()
            .filter(move |(_, consumer)| **consumer == layer)
            .map(|(port, _)| port.as_str())
    }

    /// 同一层第 `occurrence` 次读取本数据时对应的端口；
    /// 端口少于读取次数（同一端口重复连接）时取最后一个
    pub fn port_at(&self, layer: LayerId, occurrence: usize) -> Option<&str> {
        self.ports_of(layer)
            .nth(occurrence)
            .or_else(|| self.ports_of(layer).last())
    }
}
