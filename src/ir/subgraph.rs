/*
 * @Date         : 2026-03-02
 * @Description  : 子图划分：按调用方给出的边界谓词把层分组
 *
 * 队列纪律（结果顺序依赖于此，必须保持）：
 * - 网络输入的消费层逐个插入队首，之后从队尾取出
 * - 谓词判定为“不同子图”的邻居插入队首，留待以后作为新组的种子，此时不标记为已访问
 * - 判定为“同一子图”的邻居立即加入当前组、标记已访问并继续向前递归
 * 同一层被多个组够到时，只归入最先够到它的那个组。
 */

use super::error::IrError;
use super::layer::LayerId;
use super::network::Network;
use super::traverse::input_consumers;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// 把从网络输入可达的全部层划分为若干组，每层恰好属于一组。
///
/// `splitter(a, b)` 针对有向边 a→b：返回 true 表示 b 属于另一个子图
pub fn group_subgraphs<S>(network: &Network, mut splitter: S) -> Result<Vec<Vec<LayerId>>, IrError>
where
    S: FnMut(LayerId, LayerId) -> bool,
{
    let mut visited: HashSet<LayerId> = HashSet::new();
    let mut to_check: VecDeque<LayerId> = VecDeque::new();
    for layer in input_consumers(network)? {
        to_check.push_front(layer);
    }

    let mut groups = Vec::new();
    while let Some(layer) = to_check.pop_back() {
        if !visited.insert(layer) {
            continue;
        }
        let mut subgraph = vec![layer];
        walk_forward(network, layer, &mut |current, next| {
            if visited.contains(&next) {
                return false;
            }
            if splitter(current, next) {
                // 属于另一个子图：先不标记已访问，留到外层循环再取
                to_check.push_front(next);
                false
            } else {
                subgraph.push(next);
                visited.insert(next);
                true
            }
        })?;
        groups.push(subgraph);
    }

    debug!(groups = groups.len(), "子图划分完成");
    Ok(groups)
}

/// 沿正向边递归：`visitor` 返回 true 时才继续深入该邻居
fn walk_forward<F>(network: &Network, layer: LayerId, visitor: &mut F) -> Result<(), IrError>
where
    F: FnMut(LayerId, LayerId) -> bool,
{
    for &out in network.get_layer(layer)?.out_data() {
        for &next in network.get_data(out)?.input_to().values() {
            if visitor(layer, next) {
                walk_forward(network, next, visitor)?;
            }
        }
    }
    Ok(())
}
