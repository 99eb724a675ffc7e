/*
 * @Date         : 2026-03-02
 * @Description  : 图作用域句柄：与存储位置无关的节点/边标识
 */

use std::fmt;

/// 图的标识，由创建图的一方分配。
/// 跨图句柄的检测依赖于同时存活的图持有互不相同的标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(pub u64);

/// 节点句柄
///
/// 携带所属图的 id，因此可以直接由句柄得知节点属于哪张图；
/// 同一张图内索引不复用，删除后的句柄只会失效，不会指向别的节点。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle {
    pub(in crate::ade) graph: GraphId,
    pub(in crate::ade) index: usize,
}

impl NodeHandle {
    pub const fn graph_id(&self) -> GraphId {
        self.graph
    }

    pub const fn index(&self) -> usize {
        self.index
    }
}

/// 边句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeHandle {
    pub(in crate::ade) graph: GraphId,
    pub(in crate::ade) index: usize,
}

impl EdgeHandle {
    pub const fn graph_id(&self) -> GraphId {
        self.graph
    }

    pub const fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "节点[{}#{}]", self.graph.0, self.index)
    }
}

impl fmt::Display for EdgeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "边[{}#{}]", self.graph.0, self.index)
    }
}
