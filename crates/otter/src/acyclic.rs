//! Feedback edge detection.
//!
//! A read-only DFS pass collects the back edges (and self loops) that would
//! violate rank order. Layering runs on the remaining acyclic subgraph; the
//! excluded edges survive to routing, tagged as feedback.

use crate::ProcessGraph;

const UNVISITED: u8 = 0;
const ON_STACK: u8 = 1;
const DONE: u8 = 2;

/// Returns feedback edge indices in DFS discovery order.
///
/// Roots are taken in node insertion order and out-edges in edge insertion
/// order, so the result is stable across runs. The walk is iterative — an
/// explicit stack of (node, next out-edge slot) frames keeps stack depth
/// flat on large graphs.
pub fn feedback_edges(g: &ProcessGraph) -> Vec<usize> {
    let mut state = vec![UNVISITED; g.node_count()];
    let mut feedback: Vec<usize> = Vec::new();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..g.node_count() {
        if state[root] != UNVISITED {
            continue;
        }
        state[root] = ON_STACK;
        stack.push((root, 0));

        while !stack.is_empty() {
            let top = stack.len() - 1;
            let (v, slot) = stack[top];
            if let Some(&e) = g.out_edges(v).get(slot) {
                stack[top].1 += 1;
                let w = g.edge_target(e);
                if w == v {
                    feedback.push(e);
                } else {
                    match state[w] {
                        ON_STACK => feedback.push(e),
                        UNVISITED => {
                            state[w] = ON_STACK;
                            stack.push((w, 0));
                        }
                        _ => {}
                    }
                }
            } else {
                state[v] = DONE;
                stack.pop();
            }
        }
    }

    feedback
}
