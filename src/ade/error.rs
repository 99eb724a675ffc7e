/*
 * @Date         : 2026-03-02
 * @Description  : 底层图原语的错误类型
 */

use super::handle::{EdgeHandle, NodeHandle};
use thiserror::Error;

/// 底层图操作错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    #[error("{0}不存在（可能已被删除）")]
    NodeNotFound(NodeHandle),
    #[error("{0}不存在（可能已被删除）")]
    EdgeNotFound(EdgeHandle),
    /// 句柄属于另一张图
    #[error("句柄不属于当前图：{0}")]
    ForeignHandle(String),
    /// 查询了未链接的端点
    #[error("边未链接：{0}")]
    EdgeNotLinked(String),
}
