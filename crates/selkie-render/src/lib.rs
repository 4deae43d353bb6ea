#![forbid(unsafe_code)]

//! Serializers over a computed layout.
//!
//! Three independent consumers of the same model: a BPMN 2.0 XML writer
//! (model + DI interchange), a debug-grade SVG renderer, and a Mermaid
//! `flowchart TD` text writer. None of them performs layout logic; they
//! only transcribe what the engine computed.

mod bpmn;
mod mermaid;
mod svg;
mod util;

pub use bpmn::write_bpmn;
pub use mermaid::write_mermaid;
pub use svg::{SvgOptions, write_svg};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("render formatting failed: {0}")]
    Fmt(#[from] std::fmt::Error),
}
