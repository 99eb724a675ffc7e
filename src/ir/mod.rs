/*
 * @Date         : 2026-03-02
 * @Description  : 推理引擎的中间表示（IR）：层/数据二部图
 *
 * 公开 API：
 * - `Network` / `Layer` / `Data`: 网络及其节点（层）与边（数据）
 * - `traverse` / `forward` / `backward` / `forest_dfs`: 遍历
 * - `group_subgraphs`: 按边界谓词划分子图
 * - `clone_data` / `clone_layer` / `clone_net`: 深拷贝
 * - `transform_layer` / `LayerVisitor`: 按层类别分派；`Network::inject_data`: 注入载荷
 * - `save_graph_to_dot`: 输出 Graphviz 文本
 */

mod clone;
mod config;
mod data;
mod descriptor;
mod dot;
mod error;
mod layer;
mod network;
mod subgraph;
mod transform;
mod traverse;

pub use clone::{clone_data, clone_layer, clone_net, clone_net_layers, clone_net_with_options};
pub use config::CloneOptions;
pub use data::{Data, DataId, Precision};
pub use descriptor::{DataDescriptor, LayerDescriptor, NetworkDescriptor};
pub use dot::{LayerCallback, OrderedProperties, save_graph_to_dot};
pub use error::IrError;
pub use layer::*;
pub use network::{InputInfo, Network};
pub use subgraph::group_subgraphs;
pub use transform::{LayerVisitor, transform_layer};
pub use traverse::{backward, forest_dfs, forward, input_consumers, traverse, traverse_from, traverse_mut};

#[cfg(test)]
mod tests;
