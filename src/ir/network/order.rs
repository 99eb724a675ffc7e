/*
 * @Date         : 2026-03-02
 * @Description  : 层的规范迭代顺序（拓扑序）
 */

use super::super::error::IrError;
use super::super::layer::LayerId;
use super::Network;
use std::collections::{BTreeMap, BTreeSet};

impl Network {
    /// 按拓扑序列出全部成员层：生产者总在其消费者之前；
    /// 多个层同时就绪时，先加入网络的排在前面，因此结果是确定的
    pub fn layers(&self) -> Result<Vec<LayerId>, IrError> {
        let members: BTreeSet<LayerId> = self.layer_ids().collect();

        // 每个层依赖的（成员）生产者层
        let mut pending: BTreeMap<LayerId, BTreeSet<LayerId>> = BTreeMap::new();
        let mut successors: BTreeMap<LayerId, BTreeSet<LayerId>> = BTreeMap::new();
        for &id in &members {
            let layer = &self.layers[id.0];
            let mut deps = BTreeSet::new();
            for &data in layer.ins_data() {
                if let Some(creator) = self.get_data(data)?.creator() {
                    if members.contains(&creator) && creator != id {
                        deps.insert(creator);
                        successors.entry(creator).or_default().insert(id);
                    }
                }
            }
            pending.insert(id, deps);
        }

        let mut ready: BTreeSet<LayerId> = pending
            .iter()
            .filter(|(_, deps)| deps.is_empty())
            .map(|(&id, _)| id)
            .collect();
        let mut ordered = Vec::with_capacity(members.len());
        while let Some(id) = ready.pop_first() {
            ordered.push(id);
            for next in successors.get(&id).into_iter().flatten() {
                if let Some(deps) = pending.get_mut(next) {
                    if deps.remove(&id) && deps.is_empty() {
                        ready.insert(*next);
                    }
                }
            }
        }

        if ordered.len() != members.len() {
            let stuck: Vec<String> = pending
                .iter()
                .filter(|(_, deps)| !deps.is_empty())
                .map(|(&id, _)| self.layer_label(id))
                .collect();
            return Err(IrError::CycleDetected(stuck.join(", ")));
        }
        Ok(ordered)
    }
}
