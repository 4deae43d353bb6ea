use otter::{LayoutConfig, ProcessGraph, acyclic, geometry, lane, order, rank};

fn unit_config() -> LayoutConfig {
    LayoutConfig {
        scale: Some(1.0),
        ..LayoutConfig::default()
    }
}

fn place(g: &ProcessGraph, config: &LayoutConfig) -> geometry::Geometry {
    let mut mask = vec![false; g.edge_count()];
    for e in acyclic::feedback_edges(g) {
        mask[e] = true;
    }
    let layering = rank::assign(g, &mask);
    let lanes = lane::assign(g, &layering, &mask);
    let ordering = order::assign(g, &layering, &mask, config.sweeps);
    geometry::place(g, &layering, &lanes, &ordering, config)
}

#[test]
fn short_labels_keep_the_minimum_width() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Role");
    b.activity("a", "Ship", "r1");
    let g = b.build().unwrap();
    let geom = place(&g, &unit_config());
    assert_eq!(geom.nodes[0].width, 140.0);
    assert_eq!(geom.nodes[0].height, 80.0);
}

#[test]
fn long_labels_grow_the_activity() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Role");
    b.activity("a", "Check inventory and reserve stock", "r1");
    let g = b.build().unwrap();
    let geom = place(&g, &unit_config());
    // 33 columns * 8.0 + 2 * 12.0 padding.
    assert_eq!(geom.nodes[0].width, 288.0);
}

#[test]
fn wide_scripts_count_two_columns_per_glyph() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Role");
    b.activity("cjk", "受注内容を確認して承認する処理を行う作業", "r1");
    b.activity("ascii", "abcdefghijklmnopqrstuvwxyz0123456789abcd", "r1");
    let g = b.build().unwrap();
    let geom = place(&g, &unit_config());
    // 20 wide glyphs and 40 ASCII characters both span 40 columns.
    assert_eq!(geom.nodes[0].width, geom.nodes[1].width);
    assert_eq!(geom.nodes[0].width, 40.0 * 8.0 + 24.0);
}

#[test]
fn gateways_are_fixed_squares() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Role");
    b.gateway("gw", "A very long gateway label that must not matter");
    let g = b.build().unwrap();
    let geom = place(&g, &unit_config());
    assert_eq!(geom.nodes[0].width, 60.0);
    assert_eq!(geom.nodes[0].height, 60.0);
}

#[test]
fn ranks_accumulate_left_to_right_with_gaps() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Role");
    b.activity("a", "Ship", "r1");
    b.activity("b", "Bill", "r1");
    b.transition("f1", "a", "b", None);
    let g = b.build().unwrap();
    let geom = place(&g, &unit_config());
    assert_eq!(geom.ranks[0].x, 0.0);
    assert_eq!(geom.ranks[0].width, 140.0);
    assert_eq!(geom.ranks[1].x, 220.0);
    assert_eq!(geom.width, 360.0);
}

#[test]
fn narrow_nodes_are_centered_in_their_rank() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Sales");
    b.role("r2", "Warehouse");
    b.activity("a", "Ship", "r1");
    b.gateway("gw", "Check");
    b.transition("f1", "a", "gw", None);
    b.activity("b", "Pick", "r2");
    b.transition("f2", "gw", "b", None);
    let g = b.build().unwrap();
    let geom = place(&g, &unit_config());
    let gw = g.node_index("gw").unwrap();
    // Gateway rank is as wide as the gateway itself here.
    assert_eq!(geom.nodes[gw].x, geom.ranks[1].x);
    // The wider rank 0 centers nothing; the activity spans it fully.
    assert_eq!(geom.nodes[0].x, 0.0);
}

#[test]
fn stacked_nodes_share_a_lane_without_overlap() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Role");
    b.activity("a", "First", "r1");
    b.activity("b", "Second", "r1");
    let g = b.build().unwrap();
    let geom = place(&g, &unit_config());
    // Both are sources: same lane, same rank, stacked with the node gap and
    // the block centered in the lane.
    let (a, b_) = (geom.nodes[0], geom.nodes[1]);
    assert_eq!(geom.lanes[0].height, 230.0);
    assert_eq!(a.y, 25.0);
    assert_eq!(b_.y, a.y + a.height + 20.0);
    assert!(b_.y >= a.y + a.height);
}

#[test]
fn single_node_is_centered_in_its_lane() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Role");
    b.activity("a", "Ship", "r1");
    let g = b.build().unwrap();
    let geom = place(&g, &unit_config());
    assert_eq!(geom.lanes[0].height, 200.0);
    assert_eq!(geom.nodes[0].y, 60.0);
}

#[test]
fn lanes_stack_top_to_bottom_without_gaps() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Sales");
    b.role("r2", "Warehouse");
    b.activity("a", "Quote", "r1");
    b.activity("b", "Pick", "r2");
    let g = b.build().unwrap();
    let geom = place(&g, &unit_config());
    assert_eq!(geom.lanes[0].y, 0.0);
    assert_eq!(geom.lanes[1].y, geom.lanes[0].height);
    assert_eq!(geom.height, geom.lanes[0].height + geom.lanes[1].height);
}

#[test]
fn empty_role_still_gets_a_lane_with_the_floor_height() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Sales");
    b.role("r2", "Never used");
    b.activity("a", "Quote", "r1");
    let g = b.build().unwrap();
    let geom = place(&g, &unit_config());
    assert_eq!(geom.lanes.len(), 2);
    assert_eq!(geom.lanes[1].height, 200.0);
}

#[test]
fn scale_override_rescales_everything_uniformly() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Role");
    b.activity("a", "Ship", "r1");
    b.gateway("gw", "Check");
    b.transition("f1", "a", "gw", None);
    let g = b.build().unwrap();
    let unit = place(&g, &unit_config());
    let config = LayoutConfig {
        scale: Some(2.0),
        ..LayoutConfig::default()
    };
    let doubled = place(&g, &config);
    assert_eq!(doubled.nodes[0].width, unit.nodes[0].width * 2.0);
    assert_eq!(doubled.nodes[1].width, unit.nodes[1].width * 2.0);
    assert_eq!(doubled.width, unit.width * 2.0);
    assert_eq!(doubled.height, unit.height * 2.0);
}

#[test]
fn auto_scale_grows_with_the_square_root_of_node_count() {
    assert_eq!(geometry::auto_scale(0), 1.0);
    assert_eq!(geometry::auto_scale(10), 1.0);
    assert_eq!(geometry::auto_scale(40), 2.0);
    assert!(geometry::auto_scale(1000) <= 2.0);
}

#[test]
fn default_scale_is_derived_from_the_node_count() {
    let mut b = ProcessGraph::builder();
    b.role("r1", "Role");
    b.activity("a", "Ship", "r1");
    let g = b.build().unwrap();
    let geom = place(&g, &LayoutConfig::default());
    assert_eq!(geom.scale, 1.0);
}
