/*
 * @Date         : 2026-03-02
 * @Description  : 克隆相关的可配置项
 */

use serde::{Deserialize, Serialize};

/// 克隆选项（类型名比较均忽略大小写）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloneOptions {
    /// 视为输入占位层的类型：由它们生产的数据在克隆后登记为网络输入
    pub input_layer_types: Vec<String>,
    /// 消费者属于这些类型时，不因“消费者在克隆集合之外”而把数据标记为输出
    pub output_excluded_types: Vec<String>,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            input_layer_types: vec!["input".to_string()],
            output_excluded_types: vec!["priorbox".to_string(), "PriorBoxClustered".to_string()],
        }
    }
}

impl CloneOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
