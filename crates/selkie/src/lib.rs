#![forbid(unsafe_code)]

//! `selkie` turns validated business-flow documents into swimlane process
//! diagrams.
//!
//! The document model and layout engine are always available; the
//! serializers live behind the `render` feature:
//!
//! - `render`: enable BPMN XML / SVG / Mermaid output (`selkie::render`)

pub use otter;
pub use selkie_core::*;

/// Parses a flow document and computes its layout in one call.
///
/// Advisory notes (broken cycles, lane fallbacks, empty input) ride along
/// on the returned layout; the only hard failures are malformed JSON and a
/// flow referencing an unknown node.
pub fn layout_flow(
    json: &str,
    config: &otter::LayoutConfig,
) -> Result<(FlowDocument, otter::Layout)> {
    let doc = FlowDocument::parse_json(json)?;
    let graph = doc.to_process_graph()?;
    let layout = otter::layout(&graph, config);
    Ok((doc, layout))
}

#[cfg(feature = "render")]
pub mod render {
    pub use selkie_render::{Error, SvgOptions, write_bpmn, write_mermaid, write_svg};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Document(#[from] selkie_core::DocumentError),
        #[error(transparent)]
        Render(#[from] selkie_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// End to end: JSON document in, BPMN 2.0 XML out.
    pub fn bpmn_from_json(json: &str, config: &otter::LayoutConfig) -> Result<String> {
        let (doc, layout) = crate::layout_flow(json, config)?;
        Ok(write_bpmn(&doc, &layout)?)
    }
}

#[cfg(test)]
mod tests {
    use super::layout_flow;

    #[test]
    fn layout_flow_runs_the_whole_pipeline() {
        let (doc, layout) = layout_flow(
            r#"{
                "actors": [{"id": "a", "name": "A"}],
                "tasks": [
                    {"id": "t1", "name": "First", "actor_id": "a"},
                    {"id": "t2", "name": "Second", "actor_id": "a"}
                ],
                "flows": [{"id": "f1", "from": "t1", "to": "t2"}]
            }"#,
            &otter::LayoutConfig::default(),
        )
        .unwrap();
        assert_eq!(doc.tasks.len(), 2);
        assert_eq!(layout.nodes.len(), 2);
        assert_eq!(layout.edges.len(), 1);
        assert!(layout.notes.is_empty());
    }

    #[test]
    fn bad_json_fails_before_layout() {
        let err = layout_flow("nope", &otter::LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, crate::DocumentError::Json(_)));
    }
}
