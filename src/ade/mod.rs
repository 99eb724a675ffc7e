/*
 * @Date         : 2026-03-02
 * @Description  : 底层通用图原语（ade）：节点、边、句柄及拥有/弱链接管理
 *
 * 公开 API：
 * - `Graph`: 独占拥有全部节点与边的图
 * - `NodeHandle` / `EdgeHandle`: 图作用域内稳定的节点/边句柄
 * - `GraphError`: 错误类型
 *
 * 本模块不了解层（layer）与数据（data），只负责拓扑。
 */

mod error;
mod graph;
mod handle;

pub use error::GraphError;
pub use graph::Graph;
pub use handle::{EdgeHandle, GraphId, NodeHandle};

#[cfg(test)]
mod tests;
