//! Process graph arena and builder.
//!
//! Nodes, edges, and roles live in flat arenas addressed by `usize` index;
//! string ids are interned exactly once, at build time. Insertion order is
//! part of the layout contract: every downstream pass iterates nodes and
//! edges in the order they were added.

use crate::{LayoutError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Node species in the process graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Activity,
    Gateway,
}

#[derive(Debug, Clone)]
struct RoleData {
    id: String,
    name: String,
}

#[derive(Debug, Clone)]
struct NodeData {
    id: String,
    label: String,
    kind: NodeKind,
    /// Lane pinned by the node's role. Gateways (and activities whose role
    /// did not resolve) start unpinned and are resolved by the lane pass.
    lane_hint: Option<usize>,
}

#[derive(Debug, Clone)]
struct EdgeData {
    id: String,
    source: usize,
    target: usize,
    label: Option<String>,
}

/// An immutable directed graph over activities and gateways, ready for
/// layout. Built with [`ProcessGraph::builder`].
#[derive(Debug, Clone)]
pub struct ProcessGraph {
    roles: Vec<RoleData>,
    nodes: Vec<NodeData>,
    edges: Vec<EdgeData>,
    node_by_id: FxHashMap<String, usize>,
    /// Outgoing/incoming edge indices per node, in edge insertion order.
    out: Vec<Vec<usize>>,
    inn: Vec<Vec<usize>>,
}

impl ProcessGraph {
    pub fn builder() -> ProcessGraphBuilder {
        ProcessGraphBuilder::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.node_by_id.get(id).copied()
    }

    pub fn node_id(&self, v: usize) -> &str {
        &self.nodes[v].id
    }

    pub fn node_label(&self, v: usize) -> &str {
        &self.nodes[v].label
    }

    pub fn node_kind(&self, v: usize) -> NodeKind {
        self.nodes[v].kind
    }

    /// Lane pinned at build time via the node's role, if any.
    pub fn lane_hint(&self, v: usize) -> Option<usize> {
        self.nodes[v].lane_hint
    }

    pub fn edge_index(&self, id: &str) -> Option<usize> {
        self.edges.iter().position(|e| e.id == id)
    }

    pub fn edge_id(&self, e: usize) -> &str {
        &self.edges[e].id
    }

    pub fn edge_label(&self, e: usize) -> Option<&str> {
        self.edges[e].label.as_deref()
    }

    pub fn edge_endpoints(&self, e: usize) -> (usize, usize) {
        (self.edges[e].source, self.edges[e].target)
    }

    pub fn edge_source(&self, e: usize) -> usize {
        self.edges[e].source
    }

    pub fn edge_target(&self, e: usize) -> usize {
        self.edges[e].target
    }

    /// Outgoing edge indices of `v`, in insertion order.
    pub fn out_edges(&self, v: usize) -> &[usize] {
        &self.out[v]
    }

    /// Incoming edge indices of `v`, in insertion order.
    pub fn in_edges(&self, v: usize) -> &[usize] {
        &self.inn[v]
    }

    pub fn role_id(&self, lane: usize) -> Option<&str> {
        self.roles.get(lane).map(|r| r.id.as_str())
    }

    pub fn role_name(&self, lane: usize) -> Option<&str> {
        self.roles.get(lane).map(|r| r.name.as_str())
    }
}

#[derive(Debug, Clone)]
struct PendingNode {
    id: String,
    label: String,
    kind: NodeKind,
    role: Option<String>,
}

#[derive(Debug, Clone)]
struct PendingEdge {
    id: String,
    source: String,
    target: String,
    label: Option<String>,
}

/// Collects roles, nodes, and transitions, then resolves all references in
/// [`build`](Self::build).
///
/// Reference resolution is the single fatal checkpoint: a transition whose
/// endpoint does not name a known node fails the build with
/// [`LayoutError::UnknownEndpoint`] and no partial graph is returned. A
/// repeated node id keeps the first definition; an activity whose role id is
/// unknown is left unpinned and lane-resolved like a gateway.
#[derive(Debug, Default)]
pub struct ProcessGraphBuilder {
    roles: Vec<RoleData>,
    nodes: Vec<PendingNode>,
    edges: Vec<PendingEdge>,
}

impl ProcessGraphBuilder {
    /// Declares a role. Lane order is role declaration order.
    pub fn role(&mut self, id: impl Into<String>, name: impl Into<String>) -> &mut Self {
        self.roles.push(RoleData {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    pub fn activity(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        role: impl Into<String>,
    ) -> &mut Self {
        self.nodes.push(PendingNode {
            id: id.into(),
            label: label.into(),
            kind: NodeKind::Activity,
            role: Some(role.into()),
        });
        self
    }

    pub fn gateway(&mut self, id: impl Into<String>, label: impl Into<String>) -> &mut Self {
        self.nodes.push(PendingNode {
            id: id.into(),
            label: label.into(),
            kind: NodeKind::Gateway,
            role: None,
        });
        self
    }

    pub fn transition(
        &mut self,
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        label: Option<String>,
    ) -> &mut Self {
        self.edges.push(PendingEdge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label,
        });
        self
    }

    pub fn build(self) -> Result<ProcessGraph> {
        let mut lane_by_role: FxHashMap<&str, usize> = FxHashMap::default();
        for (i, role) in self.roles.iter().enumerate() {
            lane_by_role.entry(role.id.as_str()).or_insert(i);
        }

        let mut node_by_id: FxHashMap<String, usize> = FxHashMap::default();
        let mut nodes: Vec<NodeData> = Vec::with_capacity(self.nodes.len());
        for pending in &self.nodes {
            if node_by_id.contains_key(&pending.id) {
                continue;
            }
            node_by_id.insert(pending.id.clone(), nodes.len());
            let lane_hint = pending
                .role
                .as_deref()
                .and_then(|r| lane_by_role.get(r).copied());
            nodes.push(NodeData {
                id: pending.id.clone(),
                label: pending.label.clone(),
                kind: pending.kind,
                lane_hint,
            });
        }

        let mut edges: Vec<EdgeData> = Vec::with_capacity(self.edges.len());
        let mut out: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut inn: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        for pending in &self.edges {
            let resolve = |endpoint: &str| -> Result<usize> {
                node_by_id
                    .get(endpoint)
                    .copied()
                    .ok_or_else(|| LayoutError::UnknownEndpoint {
                        edge: pending.id.clone(),
                        node: endpoint.to_string(),
                    })
            };
            let source = resolve(&pending.source)?;
            let target = resolve(&pending.target)?;
            let e = edges.len();
            out[source].push(e);
            inn[target].push(e);
            edges.push(EdgeData {
                id: pending.id.clone(),
                source,
                target,
                label: pending.label.clone(),
            });
        }

        Ok(ProcessGraph {
            roles: self.roles,
            nodes,
            edges,
            node_by_id,
            out,
            inn,
        })
    }
}
