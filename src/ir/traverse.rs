/*
 * @Date         : 2026-03-02
 * @Description  : IR 图遍历：正向/反向扩展、基于队列的遍历以及森林 DFS
 *
 * `traverse` 本身不做去重：同一层可能被多次访问，
 * 需要“每层只访问一次”的调用方（子图划分、DOT 输出）自行记录已访问集合。
 * 图中若因调用方错误存在环，`traverse` 不会终止。
 */

use super::error::IrError;
use super::layer::{Layer, LayerId};
use super::network::Network;
use std::collections::{HashMap, VecDeque};

/// 正向扩展：把直接消费 `layer` 任一输出数据的层加入队尾
pub fn forward(
    network: &Network,
    layer: LayerId,
    queue: &mut VecDeque<LayerId>,
) -> Result<(), IrError> {
    for &out in network.get_layer(layer)?.out_data() {
        queue.extend(network.get_data(out)?.input_to().values().copied());
    }
    Ok(())
}

/// 反向扩展：把 `layer` 各输入数据的生产者加入队尾，跳过输入占位层与没有生产者的数据
pub fn backward(
    network: &Network,
    layer: LayerId,
    queue: &mut VecDeque<LayerId>,
) -> Result<(), IrError> {
    for &data in network.get_layer(layer)?.ins_data() {
        if let Some(creator) = network.get_data(data)?.creator() {
            if !network.get_layer(creator)?.is_input_placeholder() {
                queue.push_back(creator);
            }
        }
    }
    Ok(())
}

/// 直接消费网络输入数据的层（按输入名、端口名的顺序，不去重）
pub fn input_consumers(network: &Network) -> Result<Vec<LayerId>, IrError> {
    let mut layers = Vec::new();
    for info in network.inputs().values() {
        let data = network.get_data(info.input_data())?;
        layers.extend(data.input_to().values().copied());
    }
    Ok(layers)
}

/// 从网络输入的消费层出发遍历：逐个出队、`apply`、再用 `expand` 扩展邻居
pub fn traverse<A, E>(network: &Network, apply: A, expand: E) -> Result<(), IrError>
where
    A: FnMut(LayerId),
    E: FnMut(&Network, LayerId, &mut VecDeque<LayerId>) -> Result<(), IrError>,
{
    let seeds = input_consumers(network)?;
    traverse_from(network, seeds, apply, expand)
}

/// 从指定的种子层出发遍历
pub fn traverse_from<A, E>(
    network: &Network,
    seeds: impl IntoIterator<Item = LayerId>,
    mut apply: A,
    mut expand: E,
) -> Result<(), IrError>
where
    A: FnMut(LayerId),
    E: FnMut(&Network, LayerId, &mut VecDeque<LayerId>) -> Result<(), IrError>,
{
    let mut queue: VecDeque<LayerId> = seeds.into_iter().collect();
    while let Some(layer) = queue.pop_front() {
        apply(layer);
        expand(network, layer, &mut queue)?;
    }
    Ok(())
}

/// 可修改层描述字段的遍历。`apply` 只拿到 `&mut Layer`，无法改动链接，
/// 所以遍历途中图结构保持不变
pub fn traverse_mut<A, E>(network: &mut Network, mut apply: A, mut expand: E) -> Result<(), IrError>
where
    A: FnMut(&mut Layer),
    E: FnMut(&Network, LayerId, &mut VecDeque<LayerId>) -> Result<(), IrError>,
{
    let mut queue: VecDeque<LayerId> = input_consumers(network)?.into();
    while let Some(layer) = queue.pop_front() {
        apply(network.get_layer_mut(layer)?);
        expand(&*network, layer, &mut queue)?;
    }
    Ok(())
}

/// 森林 DFS：从各个头出发沿正向边深度优先，每层只访问一次。
/// `visit_before` 为 true 时先访问再下探（前序），否则后序
pub fn forest_dfs<V>(
    network: &Network,
    heads: &[LayerId],
    mut visit: V,
    visit_before: bool,
) -> Result<(), IrError>
where
    V: FnMut(LayerId),
{
    // false: 正在访问（灰）；true: 已完成（黑）
    let mut visited: HashMap<LayerId, bool> = HashMap::new();
    for &head in heads {
        if visited.contains_key(&head) {
            continue;
        }
        dfs(network, head, &mut visited, &mut visit, visit_before)?;
    }
    Ok(())
}

fn dfs<V>(
    network: &Network,
    layer: LayerId,
    visited: &mut HashMap<LayerId, bool>,
    visit: &mut V,
    visit_before: bool,
) -> Result<(), IrError>
where
    V: FnMut(LayerId),
{
    if visit_before {
        visit(layer);
    }
    visited.insert(layer, false);
    for &out in network.get_layer(layer)?.out_data() {
        for &next in network.get_data(out)?.input_to().values() {
            match visited.get(&next) {
                Some(false) => {
                    return Err(IrError::CycleDetected(format!(
                        "{} -> {}",
                        network.layer_label(layer),
                        network.layer_label(next)
                    )));
                }
                Some(true) => {}
                None => dfs(network, next, visited, visit, visit_before)?,
            }
        }
    }
    if !visit_before {
        visit(layer);
    }
    visited.insert(layer, true);
    Ok(())
}
