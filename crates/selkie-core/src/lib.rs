#![forbid(unsafe_code)]

//! `selkie-core` is the flow document model behind `selkie`.
//!
//! A [`FlowDocument`] is the validated JSON interchange produced upstream:
//! ordered actors, phases, tasks, gateways, and the flows connecting them.
//! This crate parses it and maps it onto the layout engine's process graph;
//! structural/schema validation is the producer's job, and the only checks
//! performed here are the engine's own referential-integrity checks.

mod document;
mod error;

pub use document::{
    Actor, ActorKind, Flow, FlowDocument, Gateway, GatewayKind, Issue, Metadata, Phase, Task,
};
pub use error::{DocumentError, Result};
