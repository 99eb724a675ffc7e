use crate::ade::{Graph, GraphId};

#[test]
fn test_reset_prev_node_moves_edge() {
    let mut graph = Graph::new(GraphId(1));
    let a = graph.create_node();
    let b = graph.create_node();
    let c = graph.create_node();
    let edge = graph.link(a, c).unwrap();

    graph.reset_prev_node(edge, Some(b)).unwrap();

    assert!(!graph.out_edges(a).unwrap().contains(&edge));
    assert_eq!(graph.out_edges(b).unwrap(), &[edge]);
    assert_eq!(graph.src_node(edge).unwrap(), b);
    // 终点不受影响
    assert_eq!(graph.in_edges(c).unwrap(), &[edge]);
}

#[test]
fn test_reset_next_node_moves_edge() {
    let mut graph = Graph::new(GraphId(1));
    let a = graph.create_node();
    let b = graph.create_node();
    let c = graph.create_node();
    let edge = graph.link(a, b).unwrap();

    graph.reset_next_node(edge, Some(c)).unwrap();

    assert!(graph.in_edges(b).unwrap().is_empty());
    assert_eq!(graph.in_edges(c).unwrap(), &[edge]);
    assert_eq!(graph.dst_node(edge).unwrap(), c);
}

#[test]
fn test_relink_to_same_node_is_noop() {
    let mut graph = Graph::new(GraphId(1));
    let a = graph.create_node();
    let b = graph.create_node();
    let first = graph.link(a, b).unwrap();
    let second = graph.link(a, b).unwrap();

    graph.reset_prev_node(first, Some(a)).unwrap();
    graph.reset_next_node(first, Some(b)).unwrap();

    // 集合成员与顺序都不变（若先删后加，first 会排到 second 之后）
    assert_eq!(graph.out_edges(a).unwrap(), &[first, second]);
    assert_eq!(graph.in_edges(b).unwrap(), &[first, second]);
    assert_eq!(graph.edges_count(), 2);
}

#[test]
fn test_unlink_then_relink() {
    let mut graph = Graph::new(GraphId(1));
    let a = graph.create_node();
    let b = graph.create_node();
    let edge = graph.link(a, b).unwrap();

    graph.unlink(edge).unwrap();
    assert_eq!(graph.edge_parent(edge).unwrap(), None);
    assert!(graph.out_edges(a).unwrap().is_empty());
    assert!(graph.in_edges(b).unwrap().is_empty());

    graph.reset_next_node(edge, Some(a)).unwrap();
    graph.reset_prev_node(edge, Some(b)).unwrap();
    assert_eq!(graph.out_nodes(b).unwrap(), vec![a]);
    assert_eq!(graph.edge_parent(edge).unwrap(), Some(graph.id()));
}

#[test]
fn test_relink_middle_edge_keeps_order() {
    let mut graph = Graph::new(GraphId(1));
    let a = graph.create_node();
    let b = graph.create_node();
    let sink = graph.create_node();
    let first = graph.link(a, sink).unwrap();
    let middle = graph.link(a, sink).unwrap();
    let last = graph.link(a, sink).unwrap();

    // 摘下中间的边，其余边保持原有相对顺序
    graph.reset_prev_node(middle, Some(b)).unwrap();
    assert_eq!(graph.out_edges(a).unwrap(), &[first, last]);
    assert_eq!(graph.out_edges(b).unwrap(), &[middle]);

    // 挂回原起点时排在末尾
    graph.reset_prev_node(middle, Some(a)).unwrap();
    assert_eq!(graph.out_edges(a).unwrap(), &[first, last, middle]);
    assert!(graph.out_edges(b).unwrap().is_empty());

    // 摘下表头与表尾
    graph.reset_next_node(first, Some(b)).unwrap();
    graph.reset_next_node(last, None).unwrap();
    assert_eq!(graph.in_edges(sink).unwrap(), &[middle]);
    assert_eq!(graph.in_edges(b).unwrap(), &[first]);
    assert_eq!(graph.out_nodes(a).unwrap(), vec![b, sink]);
}
