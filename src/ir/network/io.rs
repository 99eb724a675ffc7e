/*
 * @Date         : 2026-03-02
 * @Description  : Network 输入/输出的声明与推导
 */

use super::super::data::DataId;
use super::super::error::IrError;
use super::{InputInfo, Network};
use std::collections::BTreeMap;
use tracing::trace;

impl Network {
    /// 登记一个网络输入，键为其数据名
    pub fn set_input_info(&mut self, info: InputInfo) -> Result<(), IrError> {
        let name = self.get_data(info.input_data())?.name().to_string();
        self.inputs.insert(name, info);
        Ok(())
    }

    /// 数据名 -> 输入描述
    pub const fn inputs(&self) -> &BTreeMap<String, InputInfo> {
        &self.inputs
    }

    /// 数据名 -> 输出数据
    pub const fn outputs(&self) -> &BTreeMap<String, DataId> {
        &self.outputs
    }

    /// 将名为 `data_name` 的数据标记为网络输出
    pub fn add_output(&mut self, data_name: &str) -> Result<(), IrError> {
        let id = self.data_by_name(data_name)?;
        self.outputs.insert(data_name.to_string(), id);
        Ok(())
    }

    /// 按当前图形状推导输出：没有任何消费者的数据即为网络输出。
    /// 只增不减，已声明的输出保持不变
    pub fn resolve_output(&mut self) {
        for (name, &id) in &self.data_names {
            if self.data[id.0].input_to.is_empty() && !self.outputs.contains_key(name) {
                trace!(data = %name, "推导出网络输出");
                self.outputs.insert(name.clone(), id);
            }
        }
    }
}
