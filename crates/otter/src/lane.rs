//! Lane resolution.
//!
//! Activities sit in their role's lane. Gateways carry no role: processing
//! nodes in topological order, a gateway adopts the lane of its earliest
//! topological non-feedback predecessor, falling back to the earliest
//! successor whose lane is already determined, then to lane 0 (recorded as
//! a defaulted node).

use crate::ProcessGraph;
use crate::rank::Layering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneAssignment {
    /// Lane index per node.
    pub lane: Vec<usize>,
    /// Total lanes: one per role, or a single synthetic lane when the graph
    /// has nodes but no roles.
    pub lane_count: usize,
    /// Nodes that fell back to lane 0 with no lane evidence at all.
    pub defaulted: Vec<usize>,
}

pub fn assign(g: &ProcessGraph, layering: &Layering, is_feedback: &[bool]) -> LaneAssignment {
    let n = g.node_count();
    let mut topo_pos = vec![0usize; n];
    for (i, &v) in layering.topo.iter().enumerate() {
        topo_pos[v] = i;
    }

    let mut lane: Vec<Option<usize>> = (0..n).map(|v| g.lane_hint(v)).collect();
    let mut defaulted: Vec<usize> = Vec::new();

    for &v in &layering.topo {
        if lane[v].is_some() {
            continue;
        }

        // Earliest-visited predecessor first. Non-feedback predecessors
        // precede `v` in topo order, so their lanes are already resolved.
        let mut best: Option<(usize, usize)> = None;
        for &e in g.in_edges(v) {
            if is_feedback[e] {
                continue;
            }
            let u = g.edge_source(e);
            if let Some(l) = lane[u] {
                let pos = topo_pos[u];
                if best.is_none_or(|(bp, _)| pos < bp) {
                    best = Some((pos, l));
                }
            }
        }

        // Start gateways: earliest successor whose lane is already known
        // (activities always are; gateway successors resolve later and are
        // skipped).
        if best.is_none() {
            for &e in g.out_edges(v) {
                if is_feedback[e] {
                    continue;
                }
                let w = g.edge_target(e);
                if let Some(l) = lane[w] {
                    let pos = topo_pos[w];
                    if best.is_none_or(|(bp, _)| pos < bp) {
                        best = Some((pos, l));
                    }
                }
            }
        }

        match best {
            Some((_, l)) => lane[v] = Some(l),
            None => {
                lane[v] = Some(0);
                defaulted.push(v);
            }
        }
    }

    let lane_count = if n == 0 { 0 } else { g.role_count().max(1) };

    LaneAssignment {
        lane: lane.into_iter().map(|l| l.unwrap_or(0)).collect(),
        lane_count,
        defaulted,
    }
}
