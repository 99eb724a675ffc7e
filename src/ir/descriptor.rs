/*
 * @Date         : 2026-03-02
 * @Description  : 网络描述符：与句柄无关、可序列化的只读描述
 *
 * 所有引用都以名称表示，因而两个结构相同的网络（如源网络与其克隆）
 * 得到相等的描述符，可直接比较。
 */

use super::data::{DataId, Precision};
use super::error::IrError;
use super::layer::{LayerClass, LayerParams};
use super::network::Network;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// 网络的可序列化描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    /// 格式版本
    pub version: String,
    pub name: String,
    pub precision: Precision,
    /// 按规范（拓扑）顺序
    pub layers: Vec<LayerDescriptor>,
    /// 按名称排序
    pub data: Vec<DataDescriptor>,
    /// 声明的输入数据名
    pub inputs: Vec<String>,
    /// 声明的输出数据名
    pub outputs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub name: String,
    pub layer_type: String,
    pub class: LayerClass,
    pub precision: Precision,
    pub params: LayerParams,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub attributes: BTreeMap<String, String>,
    /// (端口名, 数据名)，按输入顺序
    pub inputs: Vec<(String, String)>,
    pub outputs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fused_with: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataDescriptor {
    pub name: String,
    pub dims: Vec<usize>,
    pub precision: Precision,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub creator: Option<String>,
    /// 端口名 -> 消费层名
    pub consumers: BTreeMap<String, String>,
}

impl NetworkDescriptor {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn layer(&self, name: &str) -> Option<&LayerDescriptor> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    pub fn data(&self, name: &str) -> Option<&DataDescriptor> {
        self.data.iter().find(|data| data.name == name)
    }
}

impl Network {
    /// 生成本网络的描述符；网络有环时返回 `CycleDetected`
    pub fn describe(&self) -> Result<NetworkDescriptor, IrError> {
        let mut layers = Vec::with_capacity(self.layer_count());
        for id in self.layers()? {
            let layer = self.get_layer(id)?;
            let mut inputs = Vec::with_capacity(layer.ins_data().len());
            let mut occurrences: HashMap<DataId, usize> = HashMap::new();
            for &data_id in layer.ins_data() {
                let data = self.get_data(data_id)?;
                let occurrence = occurrences.entry(data_id).or_default();
                let port = data.port_at(id, *occurrence).unwrap_or_default();
                *occurrence += 1;
                inputs.push((port.to_string(), data.name().to_string()));
            }
            let outputs = layer
                .out_data()
                .iter()
                .map(|&data| self.get_data(data).map(|d| d.name().to_string()))
                .collect::<Result<Vec<_>, _>>()?;
            let fused_with = match layer.fused_with() {
                Some(other) => Some(self.get_layer(other)?.name().to_string()),
                None => None,
            };
            layers.push(LayerDescriptor {
                name: layer.name().to_string(),
                layer_type: layer.layer_type.clone(),
                class: layer.class(),
                precision: layer.precision,
                params: layer.params.clone(),
                attributes: layer.attributes.clone(),
                inputs,
                outputs,
                fused_with,
            });
        }

        let mut data = Vec::with_capacity(self.data_count());
        for id in self.data_ids() {
            let item = self.get_data(id)?;
            let creator = match item.creator() {
                Some(layer) => Some(self.get_layer(layer)?.name().to_string()),
                None => None,
            };
            let mut consumers = BTreeMap::new();
            for (port, &layer) in item.input_to() {
                consumers.insert(port.clone(), self.get_layer(layer)?.name().to_string());
            }
            data.push(DataDescriptor {
                name: item.name().to_string(),
                dims: item.dims().to_vec(),
                precision: item.precision,
                creator,
                consumers,
            });
        }

        Ok(NetworkDescriptor {
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: self.name().to_string(),
            precision: self.precision,
            layers,
            data,
            inputs: self.inputs().keys().cloned().collect(),
            outputs: self.outputs().keys().cloned().collect(),
        })
    }
}
