//! Intra-rank ordering / crossing minimization.
//!
//! Initial order within a rank is topological first-encounter order. A
//! bounded number of barycenter sweeps then reorders each rank by the mean
//! position of its neighbors in the adjacent rank, alternating direction
//! per sweep and stopping early at a fixpoint. The loop is an explicit
//! iteration over index arrays; nothing here recurses.

use crate::ProcessGraph;
use crate::rank::Layering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    /// Position within the rank, per node.
    pub position: Vec<usize>,
    /// Nodes per rank, sorted by position.
    pub layers: Vec<Vec<usize>>,
}

pub fn assign(
    g: &ProcessGraph,
    layering: &Layering,
    is_feedback: &[bool],
    sweeps: usize,
) -> Ordering {
    let n = g.node_count();
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); layering.rank_count];
    for &v in &layering.topo {
        layers[layering.rank[v]].push(v);
    }

    let mut position = vec![0usize; n];
    for layer in &layers {
        for (i, &v) in layer.iter().enumerate() {
            position[v] = i;
        }
    }

    for sweep in 0..sweeps {
        let toward_successors = sweep % 2 == 0;
        let mut changed = false;
        if toward_successors {
            for r in 0..layers.len() {
                changed |= reorder(g, layering, is_feedback, &mut layers, &mut position, r, true);
            }
        } else {
            for r in (0..layers.len()).rev() {
                changed |= reorder(g, layering, is_feedback, &mut layers, &mut position, r, false);
            }
        }
        if !changed {
            break;
        }
    }

    Ordering { position, layers }
}

/// Re-sorts rank `r` by barycenter. Returns true if any node moved.
fn reorder(
    g: &ProcessGraph,
    layering: &Layering,
    is_feedback: &[bool],
    layers: &mut [Vec<usize>],
    position: &mut [usize],
    r: usize,
    toward_successors: bool,
) -> bool {
    let adjacent = if toward_successors {
        r + 1
    } else if r == 0 {
        return false;
    } else {
        r - 1
    };

    let mut entries: Vec<(f64, usize)> = layers[r]
        .iter()
        .map(|&v| {
            let mut sum = 0.0;
            let mut count = 0usize;
            let edges = if toward_successors {
                g.out_edges(v)
            } else {
                g.in_edges(v)
            };
            for &e in edges {
                if is_feedback[e] {
                    continue;
                }
                let u = if toward_successors {
                    g.edge_target(e)
                } else {
                    g.edge_source(e)
                };
                if layering.rank[u] == adjacent {
                    sum += position[u] as f64;
                    count += 1;
                }
            }
            // No neighbors in that direction: keep the prior position as
            // the sort key so the node holds its place.
            let key = if count == 0 {
                position[v] as f64
            } else {
                sum / count as f64
            };
            (key, v)
        })
        .collect();

    // Stable sort: equal barycenters preserve their previous relative
    // order, which is what keeps repeated runs bit-identical.
    entries.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut changed = false;
    for (i, &(_, v)) in entries.iter().enumerate() {
        if layers[r][i] != v {
            changed = true;
            break;
        }
    }
    for (i, &(_, v)) in entries.iter().enumerate() {
        layers[r][i] = v;
        position[v] = i;
    }
    changed
}
