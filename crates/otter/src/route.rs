//! Orthogonal edge routing.
//!
//! Every edge becomes a polyline from the source boundary to the target
//! boundary. Same-lane edges between adjacent ranks run straight; everything
//! else takes a two-turn Manhattan route whose vertical leg sits in the
//! inter-rank gap, offset per edge so parallel routes never coincide.
//! Feedback edges leave the flow band entirely and run through the spare
//! strip at the diagram's top or bottom, on the loop's side.

use crate::ProcessGraph;
use crate::geometry::{Geometry, Metrics};
use crate::lane::LaneAssignment;
use crate::rank::Layering;
use crate::{LayoutConfig, Point, point};

#[derive(Debug, Clone, Copy)]
enum Plan {
    /// Same lane, adjacent rank: one segment, anchor to anchor.
    Straight,
    /// Two-turn route with a vertical leg in the gap after `gap`.
    Channel { gap: usize, slot: usize },
    /// Same lane, same height, distant rank: detour through the lane's
    /// clear bottom strip so the route cannot cut through the nodes
    /// sitting between source and target.
    LaneStrip { lane: usize, slot: usize },
    /// Routed through the band outside the content, above or below.
    Feedback { above: bool, slot: usize },
}

pub fn route(
    g: &ProcessGraph,
    layering: &Layering,
    lanes: &LaneAssignment,
    geom: &Geometry,
    is_feedback: &[bool],
    config: &LayoutConfig,
) -> Vec<Vec<Point>> {
    let m = Metrics::new(config, geom.scale);

    let center_y = |v: usize| geom.nodes[v].y + geom.nodes[v].height / 2.0;
    let center_x = |v: usize| geom.nodes[v].x + geom.nodes[v].width / 2.0;
    let lane_center = |l: usize| geom.lanes[l].y + geom.lanes[l].height / 2.0;

    let content_top = geom
        .nodes
        .iter()
        .map(|b| b.y)
        .fold(f64::INFINITY, f64::min)
        .min(geom.height);
    let content_bottom = geom
        .nodes
        .iter()
        .map(|b| b.y + b.height)
        .fold(0.0, f64::max);

    // First pass: pick a shape per edge and hand out slots, counting how
    // many routes share each gap, strip, and feedback band so the second
    // pass can spread them evenly.
    let mut gap_users = vec![0usize; layering.rank_count];
    let mut strip_users = vec![0usize; lanes.lane_count];
    let mut above_users = 0usize;
    let mut below_users = 0usize;

    let plans: Vec<Plan> = (0..g.edge_count())
        .map(|e| {
            let (u, v) = g.edge_endpoints(e);
            if is_feedback[e] {
                let above = lane_center(lanes.lane[u]) < geom.height / 2.0
                    && lane_center(lanes.lane[v]) < geom.height / 2.0;
                let users = if above {
                    &mut above_users
                } else {
                    &mut below_users
                };
                let slot = *users;
                *users += 1;
                return Plan::Feedback { above, slot };
            }

            let same_lane = lanes.lane[u] == lanes.lane[v];
            if same_lane && layering.rank[v] == layering.rank[u] + 1 {
                return Plan::Straight;
            }
            if same_lane && center_y(u) == center_y(v) {
                let lane = lanes.lane[u];
                let slot = strip_users[lane];
                strip_users[lane] += 1;
                return Plan::LaneStrip { lane, slot };
            }
            let gap = layering.rank[u];
            let slot = gap_users[gap];
            gap_users[gap] += 1;
            Plan::Channel { gap, slot }
        })
        .collect();

    // Second pass: emit waypoints.
    (0..g.edge_count())
        .map(|e| {
            let (u, v) = g.edge_endpoints(e);
            let (ub, vb) = (geom.nodes[u], geom.nodes[v]);
            match plans[e] {
                Plan::Straight => {
                    vec![
                        point(ub.x + ub.width, center_y(u)),
                        point(vb.x, center_y(v)),
                    ]
                }
                Plan::Channel { gap, slot } => {
                    let gap_start = geom.ranks[gap].x + geom.ranks[gap].width;
                    let fraction = (slot + 1) as f64 / (gap_users[gap] + 1) as f64;
                    let cx = gap_start + m.rank_gap * fraction;
                    vec![
                        point(ub.x + ub.width, center_y(u)),
                        point(cx, center_y(u)),
                        point(cx, center_y(v)),
                        point(vb.x, center_y(v)),
                    ]
                }
                Plan::LaneStrip { lane, slot } => {
                    let band = geom.lanes[lane];
                    let fraction = (slot + 1) as f64 / (strip_users[lane] + 1) as f64;
                    let strip_y = band.y + band.height - m.lane_padding * fraction;
                    vec![
                        point(center_x(u), ub.y + ub.height),
                        point(center_x(u), strip_y),
                        point(center_x(v), strip_y),
                        point(center_x(v), vb.y + vb.height),
                    ]
                }
                Plan::Feedback { above, slot } => {
                    // Self loops exit and re-enter the same boundary side,
                    // shifted off-center so the verticals stay apart.
                    let (sx, tx) = if u == v {
                        (
                            center_x(u) + ub.width / 4.0,
                            center_x(v) - vb.width / 4.0,
                        )
                    } else {
                        (center_x(u), center_x(v))
                    };
                    if above {
                        let fraction = (slot + 1) as f64 / (above_users + 1) as f64;
                        let channel_y = content_top * fraction;
                        vec![
                            point(sx, ub.y),
                            point(sx, channel_y),
                            point(tx, channel_y),
                            point(tx, vb.y),
                        ]
                    } else {
                        let fraction = (slot + 1) as f64 / (below_users + 1) as f64;
                        let channel_y =
                            content_bottom + (geom.height - content_bottom) * fraction;
                        vec![
                            point(sx, ub.y + ub.height),
                            point(sx, channel_y),
                            point(tx, channel_y),
                            point(tx, vb.y + vb.height),
                        ]
                    }
                }
            }
        })
        .collect()
}
