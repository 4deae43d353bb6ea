//! Flow document types and the mapping onto a process graph.

use crate::Result;
use serde::{Deserialize, Serialize};

/// A validated business-flow document.
///
/// Field names mirror the JSON interchange: `actors` own swimlanes in
/// declaration order, `tasks` reference an actor, `gateways` are roleless
/// branch/merge points, and `flows` are the directed transitions. `phases`
/// and `issues` are carried through for serializers and reports; layout
/// derives columns purely from the flow topology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowDocument {
    pub metadata: Option<Metadata>,
    pub actors: Vec<Actor>,
    pub phases: Vec<Phase>,
    pub tasks: Vec<Task>,
    pub gateways: Vec<Gateway>,
    pub flows: Vec<Flow>,
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub id: Option<String>,
    pub title: Option<String>,
    pub source: Option<String>,
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
    /// Drives the BPMN task type: human actors get user tasks, system
    /// actors get service tasks.
    #[serde(default, rename = "type")]
    pub kind: ActorKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    #[default]
    Human,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub actor_id: String,
    #[serde(default)]
    pub phase_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gateway {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: GatewayKind,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    #[default]
    Exclusive,
    Parallel,
    Inclusive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    pub note: String,
}

impl FlowDocument {
    pub fn parse_json(text: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(text)?;
        tracing::debug!(
            actors = doc.actors.len(),
            tasks = doc.tasks.len(),
            gateways = doc.gateways.len(),
            flows = doc.flows.len(),
            "parsed flow document"
        );
        Ok(doc)
    }

    /// Stable identifier for generated artifacts (XML element ids, file
    /// names).
    pub fn diagram_id(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.id.as_deref())
            .unwrap_or("flow")
    }

    pub fn diagram_title(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.title.as_deref())
            .unwrap_or("Business Process")
    }

    /// Builds the layout engine's process graph: actors become lanes in
    /// declaration order, tasks become activities pinned to their actor's
    /// lane, gateways stay unpinned. A flow referencing an unknown node id
    /// fails here, before any layout work happens.
    pub fn to_process_graph(&self) -> Result<otter::ProcessGraph> {
        let mut builder = otter::ProcessGraph::builder();
        for actor in &self.actors {
            builder.role(actor.id.as_str(), actor.name.as_str());
        }
        for task in &self.tasks {
            builder.activity(task.id.as_str(), task.name.as_str(), task.actor_id.as_str());
        }
        for gateway in &self.gateways {
            builder.gateway(gateway.id.as_str(), gateway.name.as_str());
        }
        for flow in &self.flows {
            let label = flow.condition.as_deref().or(flow.name.as_deref());
            builder.transition(
                flow.id.as_str(),
                flow.from.as_str(),
                flow.to.as_str(),
                label.map(str::to_string),
            );
        }
        Ok(builder.build()?)
    }
}
