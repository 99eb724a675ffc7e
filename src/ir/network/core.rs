/*
 * @Date         : 2026-03-02
 * @Description  : Network 核心操作：增加层/数据、建立链接、访问器
 */

use super::super::data::{Data, DataId};
use super::super::error::IrError;
use super::super::layer::{Layer, LayerId};
use super::Network;
use std::collections::{BTreeMap, HashMap};

impl Network {
    // ========== 创建 ==========

    pub fn new() -> Self {
        Self::with_name("default_network")
    }

    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            precision: Default::default(),
            layers: Vec::new(),
            layer_names: BTreeMap::new(),
            data: Vec::new(),
            data_names: BTreeMap::new(),
            inputs: BTreeMap::new(),
            outputs: BTreeMap::new(),
            injected: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 加入一个尚未链接的层
    pub fn add_layer(&mut self, layer: Layer) -> Result<LayerId, IrError> {
        if self.layer_names.contains_key(layer.name()) {
            return Err(IrError::DuplicateLayerName(layer.name().to_string()));
        }
        if !layer.ins_data.is_empty() || !layer.out_data.is_empty() {
            return Err(IrError::InvalidOperation(format!(
                "层{}已带有链接，链接只能经由网络建立",
                layer.name()
            )));
        }
        let id = self.push_layer(layer);
        self.layer_names
            .insert(self.layers[id.0].name().to_string(), id);
        Ok(id)
    }

    /// 加入一个尚未链接的数据
    pub fn add_data(&mut self, data: Data) -> Result<DataId, IrError> {
        if self.data_names.contains_key(data.name()) {
            return Err(IrError::DuplicateDataName(data.name().to_string()));
        }
        if data.creator.is_some() || !data.input_to.is_empty() {
            return Err(IrError::InvalidOperation(format!(
                "数据{}已带有链接，链接只能经由网络建立",
                data.name()
            )));
        }
        let id = self.push_data(data);
        self.data_names
            .insert(self.data[id.0].name().to_string(), id);
        Ok(id)
    }

    /// 只放入 arena，不登记名称（游离对象）
    pub(in crate::ir) fn push_layer(&mut self, layer: Layer) -> LayerId {
        self.layers.push(layer);
        LayerId(self.layers.len() - 1)
    }

    pub(in crate::ir) fn push_data(&mut self, data: Data) -> DataId {
        self.data.push(data);
        DataId(self.data.len() - 1)
    }

    // ========== 链接 ==========

    /// 令 `layer` 成为 `data` 的生产者
    pub fn connect_output(&mut self, layer: LayerId, data: DataId) -> Result<(), IrError> {
        self.get_layer(layer)?;
        let target = self.get_data_mut(data)?;
        if target.creator.is_some() {
            return Err(IrError::AlreadyHasCreator(target.name().to_string()));
        }
        target.creator = Some(layer);
        self.layers[layer.0].out_data.push(data);
        Ok(())
    }

    /// 令 `layer` 消费 `data`，端口名取消费层的名称
    pub fn connect_input(&mut self, layer: LayerId, data: DataId) -> Result<(), IrError> {
        let port = self.get_layer(layer)?.name().to_string();
        self.connect_input_port(layer, data, &port)
    }

    /// 令 `layer` 以端口 `port` 消费 `data`
    pub fn connect_input_port(
        &mut self,
        layer: LayerId,
        data: DataId,
        port: &str,
    ) -> Result<(), IrError> {
        self.get_layer(layer)?;
        let target = self.get_data_mut(data)?;
        if let Some(existing) = target.input_to.get(port) {
            if *existing != layer {
                return Err(IrError::InvalidOperation(format!(
                    "数据{}的端口{port}已被其它层占用",
                    target.name()
                )));
            }
        }
        target.input_to.insert(port.to_string(), layer);
        self.layers[layer.0].ins_data.push(data);
        Ok(())
    }

    pub fn set_fused_with(
        &mut self,
        layer: LayerId,
        fused_with: Option<LayerId>,
    ) -> Result<(), IrError> {
        if let Some(other) = fused_with {
            self.get_layer(other)?;
        }
        self.get_layer_mut(layer)?.fused_with = fused_with;
        Ok(())
    }

    // ========== 基础访问器 ==========

    pub fn get_layer(&self, id: LayerId) -> Result<&Layer, IrError> {
        self.layers
            .get(id.0)
            .ok_or_else(|| IrError::LayerNotFound(id.to_string()))
    }

    /// 可变访问只开放层的描述字段，链接仍受网络保护
    pub fn get_layer_mut(&mut self, id: LayerId) -> Result<&mut Layer, IrError> {
        self.layers
            .get_mut(id.0)
            .ok_or_else(|| IrError::LayerNotFound(id.to_string()))
    }

    pub fn get_data(&self, id: DataId) -> Result<&Data, IrError> {
        self.data
            .get(id.0)
            .ok_or_else(|| IrError::DataNotFound(format!("#{}", id.0)))
    }

    pub fn get_data_mut(&mut self, id: DataId) -> Result<&mut Data, IrError> {
        self.data
            .get_mut(id.0)
            .ok_or_else(|| IrError::DataNotFound(format!("#{}", id.0)))
    }

    pub fn layer_by_name(&self, name: &str) -> Result<LayerId, IrError> {
        self.layer_names
            .get(name)
            .copied()
            .ok_or_else(|| IrError::LayerNotFound(name.to_string()))
    }

    pub fn data_by_name(&self, name: &str) -> Result<DataId, IrError> {
        self.data_names
            .get(name)
            .copied()
            .ok_or_else(|| IrError::DataNotFound(name.to_string()))
    }

    /// 网络成员层的数量（不含游离层）
    pub fn layer_count(&self) -> usize {
        self.layer_names.len()
    }

    pub fn data_count(&self) -> usize {
        self.data_names.len()
    }

    /// 按名称排序的成员层
    pub fn layer_ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.layer_names.values().copied()
    }

    /// 按名称排序的成员数据
    pub fn data_ids(&self) -> impl Iterator<Item = DataId> + '_ {
        self.data_names.values().copied()
    }

    /// 层是否只在 arena 中而不属于网络成员（如注入产生的副本）
    pub fn is_detached(&self, id: LayerId) -> bool {
        match self.layers.get(id.0) {
            Some(layer) => self.layer_names.get(layer.name()) != Some(&id),
            None => false,
        }
    }

    /// 层名（找不到时退回到句柄文本，用于报错）
    pub(in crate::ir) fn layer_label(&self, id: LayerId) -> String {
        self.get_layer(id)
            .map_or_else(|_| id.to_string(), |layer| layer.name().to_string())
    }
}
