#![forbid(unsafe_code)]

//! `otter` is a headless swimlane layout engine for flat process graphs.
//!
//! Input is a [`ProcessGraph`] — ordered roles, activities, gateways, and
//! the transitions between them. Output is a [`Layout`] that assigns every
//! node a lane, a rank, and pixel bounds, and every edge an orthogonal
//! waypoint polyline. The pipeline is a fixed sequence of passes, each a
//! pure function of the previous pass's output:
//!
//! 1. feedback detection ([`acyclic`]) — back edges are excluded from
//!    layering and tagged, never dropped;
//! 2. longest-path layering ([`rank`]);
//! 3. lane resolution ([`lane`]);
//! 4. barycenter crossing reduction ([`order`]);
//! 5. sizing and placement ([`geometry`]);
//! 6. orthogonal edge routing ([`route`]).
//!
//! Identical inputs produce bit-identical layouts: iteration follows
//! insertion order everywhere, and every re-sort is stable.

pub mod acyclic;
pub mod geometry;
mod graph;
pub mod lane;
pub mod order;
pub mod rank;
pub mod route;
pub mod text;

pub use graph::{NodeKind, ProcessGraph, ProcessGraphBuilder};

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Fatal layout errors.
///
/// Everything else the engine can run into (cycles, lane fallbacks, empty
/// input) is recoverable and surfaces as a [`Note`] on the returned
/// [`Layout`] instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("transition `{edge}` references unknown node `{node}`")]
    UnknownEndpoint { edge: String, node: String },
}

/// Advisory conditions recorded while computing a layout.
///
/// Notes never interrupt the pipeline; callers decide whether to surface
/// them (log lines, UI warnings, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Note {
    /// The transition closed a cycle and was excluded from layering.
    /// It is still routed, tagged as feedback.
    CycleBroken { edge: String },
    /// The node had no lane evidence at all and defaulted to lane 0.
    LaneDefaulted { node: String },
    /// The input graph had no nodes; the layout is valid and empty.
    EmptyGraph,
}

/// A waypoint in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub fn point(x: f64, y: f64) -> Point {
    Point { x, y }
}

/// A placed node. Immutable once the layout is returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub lane: usize,
    pub rank: usize,
    pub order_in_rank: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A routed edge. `waypoints` always has at least two points; the first and
/// last lie exactly on the source/target node boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    pub waypoints: Vec<Point>,
    pub is_feedback: bool,
}

/// A horizontal role band. `owner` is `None` only for the synthetic lane
/// created when the graph has nodes but no roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutLane {
    pub index: usize,
    pub owner: Option<String>,
    pub name: String,
    pub y: f64,
    pub height: f64,
}

/// A vertical execution-order column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRank {
    pub index: usize,
    pub x: f64,
    pub width: f64,
}

/// The complete computed layout: a pure function of the input graph and
/// config. Consumers apply no further layout logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub lanes: Vec<LayoutLane>,
    pub ranks: Vec<LayoutRank>,
    pub width: f64,
    pub height: f64,
    pub notes: Vec<Note>,
}

/// Layout metrics, in abstract layout units.
///
/// All size and gap fields are multiplied by the effective scale factor
/// before use, so overriding `scale` rescales the whole diagram uniformly
/// without changing relative placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum activity width; labels only ever grow it.
    pub activity_min_width: f64,
    pub activity_height: f64,
    /// Gateways are fixed squares, drawn as diamonds.
    pub gateway_size: f64,
    /// Horizontal gap between adjacent ranks.
    pub rank_gap: f64,
    /// Vertical gap between nodes stacked in the same lane/rank cell.
    pub node_gap: f64,
    pub lane_min_height: f64,
    /// Vertical clearance kept above and below a lane's busiest cell.
    pub lane_padding: f64,
    /// Estimated width of one text column; East Asian wide glyphs count two.
    pub char_width: f64,
    /// Horizontal padding inside an activity box around its label.
    pub label_padding: f64,
    /// Uniform scale factor. `None` derives one from the node count
    /// (proportional to its square root, floored at 1).
    pub scale: Option<f64>,
    /// Barycenter sweep cap.
    pub sweeps: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            activity_min_width: 140.0,
            activity_height: 80.0,
            gateway_size: 60.0,
            rank_gap: 80.0,
            node_gap: 20.0,
            lane_min_height: 200.0,
            lane_padding: 25.0,
            char_width: 8.0,
            label_padding: 12.0,
            scale: None,
            sweeps: 4,
        }
    }
}

/// Computes the layout for `graph`.
///
/// Infallible by construction: the only fatal condition (a transition
/// naming an unknown node) is rejected earlier, by
/// [`ProcessGraphBuilder::build`]. Running this twice on the same graph and
/// config yields identical output.
pub fn layout(graph: &ProcessGraph, config: &LayoutConfig) -> Layout {
    let mut notes: Vec<Note> = Vec::new();

    if graph.node_count() == 0 {
        notes.push(Note::EmptyGraph);
        tracing::debug!("layout of empty graph");
        return Layout {
            nodes: Vec::new(),
            edges: Vec::new(),
            lanes: Vec::new(),
            ranks: Vec::new(),
            width: 0.0,
            height: 0.0,
            notes,
        };
    }

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        roles = graph.role_count(),
        "layout start"
    );

    let feedback = acyclic::feedback_edges(graph);
    let mut is_feedback = vec![false; graph.edge_count()];
    for &e in &feedback {
        is_feedback[e] = true;
        notes.push(Note::CycleBroken {
            edge: graph.edge_id(e).to_string(),
        });
    }

    let layering = rank::assign(graph, &is_feedback);
    tracing::debug!(
        feedback = feedback.len(),
        ranks = layering.rank_count,
        "layering done"
    );

    let lanes = lane::assign(graph, &layering, &is_feedback);
    for &v in &lanes.defaulted {
        notes.push(Note::LaneDefaulted {
            node: graph.node_id(v).to_string(),
        });
    }

    let ordering = order::assign(graph, &layering, &is_feedback, config.sweeps);
    let geom = geometry::place(graph, &layering, &lanes, &ordering, config);
    let paths = route::route(graph, &layering, &lanes, &geom, &is_feedback, config);

    for note in &notes {
        tracing::warn!(note = ?note, "layout note");
    }

    let nodes = (0..graph.node_count())
        .map(|v| {
            let b = geom.nodes[v];
            LayoutNode {
                id: graph.node_id(v).to_string(),
                label: graph.node_label(v).to_string(),
                kind: graph.node_kind(v),
                lane: lanes.lane[v],
                rank: layering.rank[v],
                order_in_rank: ordering.position[v],
                x: b.x,
                y: b.y,
                width: b.width,
                height: b.height,
            }
        })
        .collect();

    let edges = (0..graph.edge_count())
        .map(|e| {
            let (u, v) = graph.edge_endpoints(e);
            LayoutEdge {
                id: graph.edge_id(e).to_string(),
                source: graph.node_id(u).to_string(),
                target: graph.node_id(v).to_string(),
                label: graph.edge_label(e).map(str::to_string),
                waypoints: paths[e].clone(),
                is_feedback: is_feedback[e],
            }
        })
        .collect();

    let lanes_out = geom
        .lanes
        .iter()
        .enumerate()
        .map(|(i, band)| LayoutLane {
            index: i,
            owner: graph.role_id(i).map(str::to_string),
            name: graph.role_name(i).unwrap_or_default().to_string(),
            y: band.y,
            height: band.height,
        })
        .collect();

    let ranks_out = geom
        .ranks
        .iter()
        .enumerate()
        .map(|(i, band)| LayoutRank {
            index: i,
            x: band.x,
            width: band.width,
        })
        .collect();

    Layout {
        nodes,
        edges,
        lanes: lanes_out,
        ranks: ranks_out,
        width: geom.width,
        height: geom.height,
        notes,
    }
}
