//! Node sizing and coordinate assignment.
//!
//! Sizes and gaps all come from [`LayoutConfig`] multiplied by one uniform
//! scale factor, so the factor changes the diagram's magnitude but never
//! its relative placement. Lanes stack top-to-bottom in role order with no
//! gaps; ranks run left-to-right. Within a lane/rank cell, nodes stack
//! top-to-bottom in intra-rank order and the occupied block is centered in
//! the lane's spare height.

use crate::lane::LaneAssignment;
use crate::order::Ordering;
use crate::rank::Layering;
use crate::{LayoutConfig, NodeKind, ProcessGraph, text};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneBand {
    pub y: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankBand {
    pub x: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub nodes: Vec<NodeBox>,
    pub lanes: Vec<LaneBand>,
    pub ranks: Vec<RankBand>,
    /// Content width: right edge of the last rank.
    pub width: f64,
    /// Total lane height.
    pub height: f64,
    /// Effective scale factor actually applied.
    pub scale: f64,
}

/// Scale factor derived from diagram size: grows with the square root of
/// the node count so dense flows get more room, floored at 1 so small
/// flows keep their base metrics.
pub fn auto_scale(node_count: usize) -> f64 {
    if node_count == 0 {
        return 1.0;
    }
    (node_count as f64 / 10.0).sqrt().clamp(1.0, 2.0)
}

/// Config metrics with the scale factor applied once, up front.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Metrics {
    pub(crate) activity_min_width: f64,
    pub(crate) activity_height: f64,
    pub(crate) gateway_size: f64,
    pub(crate) rank_gap: f64,
    pub(crate) node_gap: f64,
    pub(crate) lane_min_height: f64,
    pub(crate) lane_padding: f64,
    pub(crate) char_width: f64,
    pub(crate) label_padding: f64,
}

impl Metrics {
    pub(crate) fn new(config: &LayoutConfig, scale: f64) -> Self {
        Self {
            activity_min_width: config.activity_min_width * scale,
            activity_height: config.activity_height * scale,
            gateway_size: config.gateway_size * scale,
            rank_gap: config.rank_gap * scale,
            node_gap: config.node_gap * scale,
            lane_min_height: config.lane_min_height * scale,
            lane_padding: config.lane_padding * scale,
            char_width: config.char_width * scale,
            label_padding: config.label_padding * scale,
        }
    }
}

pub fn place(
    g: &ProcessGraph,
    layering: &Layering,
    lanes: &LaneAssignment,
    ordering: &Ordering,
    config: &LayoutConfig,
) -> Geometry {
    let n = g.node_count();
    let scale = config.scale.unwrap_or_else(|| auto_scale(n));
    let m = Metrics::new(config, scale);

    let mut boxes: Vec<NodeBox> = (0..n)
        .map(|v| {
            let (width, height) = match g.node_kind(v) {
                NodeKind::Activity => {
                    let label = text::label_units(g.node_label(v)) as f64 * m.char_width
                        + 2.0 * m.label_padding;
                    (m.activity_min_width.max(label), m.activity_height)
                }
                NodeKind::Gateway => (m.gateway_size, m.gateway_size),
            };
            NodeBox {
                x: 0.0,
                y: 0.0,
                width,
                height,
            }
        })
        .collect();

    // Rank widths from the widest member, x by accumulation.
    let mut ranks = vec![
        RankBand {
            x: 0.0,
            width: 0.0
        };
        layering.rank_count
    ];
    for v in 0..n {
        let r = layering.rank[v];
        ranks[r].width = ranks[r].width.max(boxes[v].width);
    }
    let mut x = 0.0;
    for band in ranks.iter_mut() {
        band.x = x;
        x += band.width + m.rank_gap;
    }
    let width = if ranks.is_empty() { 0.0 } else { x - m.rank_gap };

    // Lane/rank cell membership, in intra-rank order.
    let mut cells: Vec<Vec<Vec<usize>>> =
        vec![vec![Vec::new(); layering.rank_count]; lanes.lane_count];
    for layer in &ordering.layers {
        for &v in layer {
            cells[lanes.lane[v]][layering.rank[v]].push(v);
        }
    }

    let cell_block_height = |cell: &[usize], boxes: &[NodeBox]| -> f64 {
        if cell.is_empty() {
            return 0.0;
        }
        let heights: f64 = cell.iter().map(|&v| boxes[v].height).sum();
        heights + (cell.len() - 1) as f64 * m.node_gap
    };

    // Lane heights from the busiest cell, stacked with no gaps.
    let mut lane_bands = vec![
        LaneBand {
            y: 0.0,
            height: 0.0
        };
        lanes.lane_count
    ];
    let mut y = 0.0;
    for (l, band) in lane_bands.iter_mut().enumerate() {
        let busiest = cells[l]
            .iter()
            .map(|cell| cell_block_height(cell, &boxes))
            .fold(0.0, f64::max);
        band.height = m.lane_min_height.max(busiest + 2.0 * m.lane_padding);
        band.y = y;
        y += band.height;
    }
    let height = y;

    // Node placement: centered in the rank horizontally, the cell block
    // centered in the lane vertically.
    for (l, lane_cells) in cells.iter().enumerate() {
        for (r, cell) in lane_cells.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            let block = cell_block_height(cell, &boxes);
            let mut slot_y = lane_bands[l].y + (lane_bands[l].height - block) / 2.0;
            for &v in cell {
                boxes[v].x = ranks[r].x + (ranks[r].width - boxes[v].width) / 2.0;
                boxes[v].y = slot_y;
                slot_y += boxes[v].height + m.node_gap;
            }
        }
    }

    Geometry {
        nodes: boxes,
        lanes: lane_bands,
        ranks,
        width,
        height,
        scale,
    }
}
