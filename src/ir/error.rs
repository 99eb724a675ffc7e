/*
 * @Date         : 2026-03-02
 * @Description  : IR 图的错误类型
 *
 * 分类：
 * - 不变式被破坏（如克隆时找不到输入数据上的消费端口）：立即中止当前遍/克隆
 * - 缺少必需输入（如网络没有任何输入）：可恢复，交给调用方处理
 * - 注入/变换未匹配任何类型：不是错误，以 None 表示
 */

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IrError {
    #[error("层{0}不存在")]
    LayerNotFound(String),
    #[error("数据{0}不存在")]
    DataNotFound(String),
    #[error("层{0}在网络中重复")]
    DuplicateLayerName(String),
    #[error("数据{0}在网络中重复")]
    DuplicateDataName(String),
    /// 每个数据最多只能有一个生产者
    #[error("数据{0}已有生产者层")]
    AlreadyHasCreator(String),
    /// 输入数据的消费映射中找不到该层
    #[error("层{layer}未登记在其输入数据{data}的消费端口中")]
    MissingConsumerPort { layer: String, data: String },
    #[error("网络没有任何输入")]
    NoInputs,
    #[error("检测到环：{0}")]
    CycleDetected(String),
    #[error("无效操作：{0}")]
    InvalidOperation(String),
}
