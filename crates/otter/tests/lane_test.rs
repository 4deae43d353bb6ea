use otter::{ProcessGraph, acyclic, lane, rank};

fn feedback_mask(g: &ProcessGraph) -> Vec<bool> {
    let mut mask = vec![false; g.edge_count()];
    for e in acyclic::feedback_edges(g) {
        mask[e] = true;
    }
    mask
}

fn lanes(g: &ProcessGraph) -> lane::LaneAssignment {
    let mask = feedback_mask(g);
    let layering = rank::assign(g, &mask);
    lane::assign(g, &layering, &mask)
}

#[test]
fn activities_use_their_role_lane() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Sales");
    b.role("r2", "Warehouse");
    b.activity("a", "Quote", "r1");
    b.activity("b", "Pick", "r2");
    let g = b.build().unwrap();
    let assignment = lanes(&g);
    assert_eq!(assignment.lane[g.node_index("a").unwrap()], 0);
    assert_eq!(assignment.lane[g.node_index("b").unwrap()], 1);
    assert_eq!(assignment.lane_count, 2);
    assert!(assignment.defaulted.is_empty());
}

#[test]
fn gateway_takes_first_topological_predecessor_lane() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Sales");
    b.role("r2", "Warehouse");
    b.activity("a", "Quote", "r1");
    b.activity("b", "Pick", "r2");
    b.gateway("gw", "Merge");
    b.transition("f1", "b", "gw", None);
    b.transition("f2", "a", "gw", None);
    let g = b.build().unwrap();
    // `a` precedes `b` in topological order regardless of edge order.
    assert_eq!(lanes(&g).lane[g.node_index("gw").unwrap()], 0);
}

#[test]
fn predecessor_order_follows_node_insertion() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Sales");
    b.role("r2", "Warehouse");
    b.activity("b", "Pick", "r2");
    b.activity("a", "Quote", "r1");
    b.gateway("gw", "Merge");
    b.transition("f1", "a", "gw", None);
    b.transition("f2", "b", "gw", None);
    let g = b.build().unwrap();
    // Now `b` is first in topological order, so its lane wins.
    assert_eq!(lanes(&g).lane[g.node_index("gw").unwrap()], 1);
}

#[test]
fn start_gateway_takes_first_successor_lane() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Sales");
    b.role("r2", "Warehouse");
    b.gateway("gw", "Split");
    b.activity("a", "Pick", "r2");
    b.activity("b", "Quote", "r1");
    b.transition("f1", "gw", "a", None);
    b.transition("f2", "gw", "b", None);
    let g = b.build().unwrap();
    let assignment = lanes(&g);
    assert_eq!(assignment.lane[g.node_index("gw").unwrap()], 1);
    assert!(assignment.defaulted.is_empty());
}

#[test]
fn chained_gateways_inherit_through_each_other() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Sales");
    b.role("r2", "Warehouse");
    b.activity("a", "Pick", "r2");
    b.gateway("gw1", "Check");
    b.gateway("gw2", "Recheck");
    b.transition("f1", "a", "gw1", None);
    b.transition("f2", "gw1", "gw2", None);
    let g = b.build().unwrap();
    let assignment = lanes(&g);
    assert_eq!(assignment.lane[g.node_index("gw1").unwrap()], 1);
    assert_eq!(assignment.lane[g.node_index("gw2").unwrap()], 1);
}

#[test]
fn isolated_gateway_defaults_to_lane_zero() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Sales");
    b.gateway("gw", "Orphan");
    let g = b.build().unwrap();
    let assignment = lanes(&g);
    let gw = g.node_index("gw").unwrap();
    assert_eq!(assignment.lane[gw], 0);
    assert_eq!(assignment.defaulted, vec![gw]);
}

#[test]
fn graph_without_roles_gets_one_synthetic_lane() {
    let mut b = ProcessGraph::builder();
    b.gateway("gw", "Alone");
    let g = b.build().unwrap();
    let assignment = lanes(&g);
    assert_eq!(assignment.lane_count, 1);
    assert_eq!(assignment.lane[0], 0);
}
