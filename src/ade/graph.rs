/*
 * @Date         : 2026-03-02
 * @Description  : 底层图：节点/边的创建、删除与端点重链接
 *
 * 所有权约定：
 * - 图独占拥有全部节点与边，图被销毁时一并销毁
 * - 边对两端节点只是“弱”引用：删除节点只会断开其边，不会删除边
 * - 删除边前先断开两端
 *
 * 每个节点的入边/出边各是一条侵入式双向链表：链表头尾存放在节点槽中，
 * 前后指针存放在边槽中。因此重链接（摘下 + 挂到新节点尾部）是 O(1)，且保持插入顺序。
 */

use super::error::GraphError;
use super::handle::{EdgeHandle, GraphId, NodeHandle};

/// 边链表的方向：`Out` 为起点的出边表，`In` 为终点的入边表
#[derive(Debug, Clone, Copy)]
enum Side {
    Out,
    In,
}

/// 节点上一条边链表的头尾（边索引）
#[derive(Debug, Default, Clone, Copy)]
struct ListEnds {
    first: Option<usize>,
    last: Option<usize>,
}

/// 边在某条链表中的前后邻居（边索引）
#[derive(Debug, Default, Clone, Copy)]
struct ListLink {
    before: Option<usize>,
    after: Option<usize>,
}

#[derive(Debug, Default)]
struct NodeSlot {
    in_list: ListEnds,
    out_list: ListEnds,
}

impl NodeSlot {
    const fn ends(&self, side: Side) -> ListEnds {
        match side {
            Side::Out => self.out_list,
            Side::In => self.in_list,
        }
    }

    fn ends_mut(&mut self, side: Side) -> &mut ListEnds {
        match side {
            Side::Out => &mut self.out_list,
            Side::In => &mut self.in_list,
        }
    }
}

#[derive(Debug, Default)]
struct EdgeSlot {
    prev: Option<NodeHandle>,
    next: Option<NodeHandle>,
    /// 在起点出边表中的位置
    out_link: ListLink,
    /// 在终点入边表中的位置
    in_link: ListLink,
}

impl EdgeSlot {
    const fn link(&self, side: Side) -> ListLink {
        match side {
            Side::Out => self.out_link,
            Side::In => self.in_link,
        }
    }

    fn link_mut(&mut self, side: Side) -> &mut ListLink {
        match side {
            Side::Out => &mut self.out_link,
            Side::In => &mut self.in_link,
        }
    }
}

/// 底层通用有向图
#[derive(Debug)]
pub struct Graph {
    id: GraphId,
    nodes: Vec<Option<NodeSlot>>,
    edges: Vec<Option<EdgeSlot>>,
}

impl Graph {
    // ========== 创建 ==========

    /// `id` 由调用方分配，同时存活的图应各不相同
    pub const fn new(id: GraphId) -> Self {
        Self {
            id,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub const fn id(&self) -> GraphId {
        self.id
    }

    pub fn create_node(&mut self) -> NodeHandle {
        self.nodes.push(Some(NodeSlot::default()));
        NodeHandle {
            graph: self.id,
            index: self.nodes.len() - 1,
        }
    }

    /// 创建一条边，两端均可为空（表示未链接）
    pub fn create_edge(
        &mut self,
        prev: Option<NodeHandle>,
        next: Option<NodeHandle>,
    ) -> Result<EdgeHandle, GraphError> {
        // 先校验两端，避免创建出一半链接的边
        if let Some(node) = prev {
            self.node_slot(node)?;
        }
        if let Some(node) = next {
            self.node_slot(node)?;
        }

        self.edges.push(Some(EdgeSlot::default()));
        let edge = self.edge_at(self.edges.len() - 1);
        self.reset_prev_node(edge, prev)?;
        self.reset_next_node(edge, next)?;
        Ok(edge)
    }

    /// 创建一条 `src -> dst` 的边
    pub fn link(&mut self, src: NodeHandle, dst: NodeHandle) -> Result<EdgeHandle, GraphError> {
        self.create_edge(Some(src), Some(dst))
    }

    // ========== 删除 ==========

    /// 删除节点：断开（但不删除）所有相连的边
    pub fn erase_node(&mut self, node: NodeHandle) -> Result<(), GraphError> {
        for edge in self.in_edges(node)? {
            self.reset_next_node(edge, None)?;
        }
        for edge in self.out_edges(node)? {
            self.reset_prev_node(edge, None)?;
        }
        self.nodes[node.index] = None;
        Ok(())
    }

    /// 删除边：先断开两端
    pub fn erase_edge(&mut self, edge: EdgeHandle) -> Result<(), GraphError> {
        self.unlink(edge)?;
        self.edges[edge.index] = None;
        Ok(())
    }

    /// 断开边的两端
    pub fn unlink(&mut self, edge: EdgeHandle) -> Result<(), GraphError> {
        self.reset_prev_node(edge, None)?;
        self.reset_next_node(edge, None)
    }

    // ========== 重链接 ==========

    /// 将边的起点改为 `new_node`：从旧起点的出边表摘下，再挂到新起点出边表的尾部。
    /// 新旧相同时不做任何事
    pub fn reset_prev_node(
        &mut self,
        edge: EdgeHandle,
        new_node: Option<NodeHandle>,
    ) -> Result<(), GraphError> {
        let old_node = self.edge_slot(edge)?.prev;
        if old_node == new_node {
            return Ok(());
        }
        if let Some(node) = new_node {
            self.node_slot(node)?;
        }

        if let Some(old) = old_node {
            self.detach(old, edge, Side::Out)?;
        }
        if let Some(node) = new_node {
            self.append(node, edge, Side::Out)?;
        }
        self.edge_slot_mut(edge)?.prev = new_node;
        Ok(())
    }

    /// 将边的终点改为 `new_node`，语义同 [`Graph::reset_prev_node`]
    pub fn reset_next_node(
        &mut self,
        edge: EdgeHandle,
        new_node: Option<NodeHandle>,
    ) -> Result<(), GraphError> {
        let old_node = self.edge_slot(edge)?.next;
        if old_node == new_node {
            return Ok(());
        }
        if let Some(node) = new_node {
            self.node_slot(node)?;
        }

        if let Some(old) = old_node {
            self.detach(old, edge, Side::In)?;
        }
        if let Some(node) = new_node {
            self.append(node, edge, Side::In)?;
        }
        self.edge_slot_mut(edge)?.next = new_node;
        Ok(())
    }

    // ========== 查询 ==========

    /// 入边（按挂入顺序）
    pub fn in_edges(&self, node: NodeHandle) -> Result<Vec<EdgeHandle>, GraphError> {
        self.collect_list(node, Side::In)
    }

    /// 出边（按挂入顺序）
    pub fn out_edges(&self, node: NodeHandle) -> Result<Vec<EdgeHandle>, GraphError> {
        self.collect_list(node, Side::Out)
    }

    /// 通过入边到达的上游节点（与入边顺序一致）
    pub fn in_nodes(&self, node: NodeHandle) -> Result<Vec<NodeHandle>, GraphError> {
        Ok(self
            .in_edges(node)?
            .into_iter()
            .filter_map(|e| self.edges[e.index].as_ref().and_then(|s| s.prev))
            .collect())
    }

    /// 通过出边到达的下游节点（与出边顺序一致）
    pub fn out_nodes(&self, node: NodeHandle) -> Result<Vec<NodeHandle>, GraphError> {
        Ok(self
            .out_edges(node)?
            .into_iter()
            .filter_map(|e| self.edges[e.index].as_ref().and_then(|s| s.next))
            .collect())
    }

    pub fn prev_node(&self, edge: EdgeHandle) -> Result<Option<NodeHandle>, GraphError> {
        Ok(self.edge_slot(edge)?.prev)
    }

    pub fn next_node(&self, edge: EdgeHandle) -> Result<Option<NodeHandle>, GraphError> {
        Ok(self.edge_slot(edge)?.next)
    }

    /// 边的起点，要求已链接
    pub fn src_node(&self, edge: EdgeHandle) -> Result<NodeHandle, GraphError> {
        self.prev_node(edge)?
            .ok_or_else(|| GraphError::EdgeNotLinked(format!("{edge}没有起点")))
    }

    /// 边的终点，要求已链接
    pub fn dst_node(&self, edge: EdgeHandle) -> Result<NodeHandle, GraphError> {
        self.next_node(edge)?
            .ok_or_else(|| GraphError::EdgeNotLinked(format!("{edge}没有终点")))
    }

    /// 节点所属的图；节点已被删除时返回 None
    pub fn node_parent(&self, node: NodeHandle) -> Option<GraphId> {
        self.node_slot(node).ok().map(|_| node.graph)
    }

    /// 边所属的图：经由任一端点推得，两端都未链接时无从得知
    pub fn edge_parent(&self, edge: EdgeHandle) -> Result<Option<GraphId>, GraphError> {
        let slot = self.edge_slot(edge)?;
        Ok(slot
            .prev
            .or(slot.next)
            .and_then(|node| self.node_parent(node)))
    }

    pub fn contains_node(&self, node: NodeHandle) -> bool {
        self.node_slot(node).is_ok()
    }

    pub fn contains_edge(&self, edge: EdgeHandle) -> bool {
        self.edge_slot(edge).is_ok()
    }

    /// 所有存活节点（按创建顺序）
    pub fn nodes(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| NodeHandle {
                graph: self.id,
                index,
            })
    }

    /// 所有存活边（按创建顺序）
    pub fn edges(&self) -> impl Iterator<Item = EdgeHandle> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| EdgeHandle {
                graph: self.id,
                index,
            })
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn edges_count(&self) -> usize {
        self.edges.iter().filter(|slot| slot.is_some()).count()
    }

    // ========== 内部 ==========

    const fn edge_at(&self, index: usize) -> EdgeHandle {
        EdgeHandle {
            graph: self.id,
            index,
        }
    }

    fn collect_list(&self, node: NodeHandle, side: Side) -> Result<Vec<EdgeHandle>, GraphError> {
        let mut edges = Vec::new();
        let mut cursor = self.node_slot(node)?.ends(side).first;
        while let Some(index) = cursor {
            let edge = self.edge_at(index);
            cursor = self.edge_slot(edge)?.link(side).after;
            edges.push(edge);
        }
        Ok(edges)
    }

    /// 把 `edge` 挂到 `node` 对应链表的尾部
    fn append(&mut self, node: NodeHandle, edge: EdgeHandle, side: Side) -> Result<(), GraphError> {
        let last = self.node_slot(node)?.ends(side).last;
        *self.edge_slot_mut(edge)?.link_mut(side) = ListLink {
            before: last,
            after: None,
        };
        match last {
            Some(index) => {
                let tail = self.edge_at(index);
                self.edge_slot_mut(tail)?.link_mut(side).after = Some(edge.index);
            }
            None => self.node_slot_mut(node)?.ends_mut(side).first = Some(edge.index),
        }
        self.node_slot_mut(node)?.ends_mut(side).last = Some(edge.index);
        Ok(())
    }

    /// 把 `edge` 从 `node` 对应链表中摘下，前后邻居直接相连
    fn detach(&mut self, node: NodeHandle, edge: EdgeHandle, side: Side) -> Result<(), GraphError> {
        let ListLink { before, after } = std::mem::take(self.edge_slot_mut(edge)?.link_mut(side));
        match before {
            Some(index) => {
                let neighbour = self.edge_at(index);
                self.edge_slot_mut(neighbour)?.link_mut(side).after = after;
            }
            None => self.node_slot_mut(node)?.ends_mut(side).first = after,
        }
        match after {
            Some(index) => {
                let neighbour = self.edge_at(index);
                self.edge_slot_mut(neighbour)?.link_mut(side).before = before;
            }
            None => self.node_slot_mut(node)?.ends_mut(side).last = before,
        }
        Ok(())
    }

    fn check_graph(&self, graph: GraphId, what: &dyn std::fmt::Display) -> Result<(), GraphError> {
        if graph != self.id {
            return Err(GraphError::ForeignHandle(format!(
                "{what}属于图{}，而当前图为{}",
                graph.0, self.id.0
            )));
        }
        Ok(())
    }

    fn node_slot(&self, node: NodeHandle) -> Result<&NodeSlot, GraphError> {
        self.check_graph(node.graph, &node)?;
        self.nodes
            .get(node.index)
            .and_then(Option::as_ref)
            .ok_or(GraphError::NodeNotFound(node))
    }

    fn node_slot_mut(&mut self, node: NodeHandle) -> Result<&mut NodeSlot, GraphError> {
        self.check_graph(node.graph, &node)?;
        self.nodes
            .get_mut(node.index)
            .and_then(Option::as_mut)
            .ok_or(GraphError::NodeNotFound(node))
    }

    fn edge_slot(&self, edge: EdgeHandle) -> Result<&EdgeSlot, GraphError> {
        self.check_graph(edge.graph, &edge)?;
        self.edges
            .get(edge.index)
            .and_then(Option::as_ref)
            .ok_or(GraphError::EdgeNotFound(edge))
    }

    fn edge_slot_mut(&mut self, edge: EdgeHandle) -> Result<&mut EdgeSlot, GraphError> {
        self.check_graph(edge.graph, &edge)?;
        self.edges
            .get_mut(edge.index)
            .and_then(Option::as_mut)
            .ok_or(GraphError::EdgeNotFound(edge))
    }
}
