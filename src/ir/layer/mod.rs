/*
 * @Date         : 2026-03-02
 * @Description  : IR 的节点：层（layer）
 *
 * 层之间互不拥有；网络通过名称映射拥有全部层。
 * 输入/输出数据列表与 fused_with 只能经由 `Network` 修改，
 * 因此仅持有 `&mut Layer` 的代码无法改动图结构。
 */

mod params;

pub use params::*;

use super::data::{DataId, Precision};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 层在所属网络中的句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub usize);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 输入占位层的类型名（比较时忽略大小写）
pub const INPUT_LAYER_TYPE: &str = "input";

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    name: String,
    /// 声明的类型名，如 "Convolution"、"Input"
    pub layer_type: String,
    pub precision: Precision,
    pub params: LayerParams,
    /// 未结构化的字符串属性
    pub attributes: BTreeMap<String, String>,
    pub(in crate::ir) ins_data: Vec<DataId>,
    pub(in crate::ir) out_data: Vec<DataId>,
    pub(in crate::ir) fused_with: Option<LayerId>,
}

impl Layer {
    pub fn new<P: Into<LayerParams>>(name: &str, layer_type: &str, params: P) -> Self {
        Self {
            name: name.to_string(),
            layer_type: layer_type.to_string(),
            precision: Precision::default(),
            params: params.into(),
            attributes: BTreeMap::new(),
            ins_data: Vec::new(),
            out_data: Vec::new(),
            fused_with: None,
        }
    }

    /// 以参数类别的默认类型名创建层
    pub fn from_params<P: Into<LayerParams>>(name: &str, params: P) -> Self {
        let params = params.into();
        let layer_type = params.default_type();
        Self::new(name, layer_type, params)
    }

    /// 输入占位层
    pub fn input(name: &str) -> Self {
        Self::new(name, "Input", Generic)
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> LayerClass {
        self.params.class()
    }

    /// 该层结构上是否“是一个” `class`
    pub fn is_a(&self, class: LayerClass) -> bool {
        class.is_base_of(self.class())
    }

    /// 按顺序排列的输入数据
    pub fn ins_data(&self) -> &[DataId] {
        &self.ins_data
    }

    /// 按顺序排列的输出数据（由本层拥有）
    pub fn out_data(&self) -> &[DataId] {
        &self.out_data
    }

    pub const fn fused_with(&self) -> Option<LayerId> {
        self.fused_with
    }

    /// 类型名是否为输入占位层
    pub fn is_input_placeholder(&self) -> bool {
        crate::utils::caseless::caseless_eq(&self.layer_type, INPUT_LAYER_TYPE)
    }

    /// 清空所有链接（克隆后重建链接前调用）
    pub(in crate::ir) fn clear_links(&mut self) {
        self.fused_with = None;
        self.ins_data.clear();
        self.out_data.clear();
    }
}
