//! Mermaid `flowchart TD` writer.
//!
//! A layout-free projection of the flow document: tasks as rounded boxes,
//! gateways as diamonds, flows as arrows with optional condition labels,
//! wrapped in a fenced markdown code block.

use selkie_core::FlowDocument;

/// Replaces characters Mermaid labels cannot carry: double quotes become
/// single quotes, newlines collapse to spaces.
fn sanitize_label(text: &str) -> String {
    text.replace('"', "'")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

pub fn write_mermaid(doc: &FlowDocument) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("```mermaid".to_string());
    lines.push("flowchart TD".to_string());
    lines.push(String::new());

    for task in &doc.tasks {
        lines.push(format!("    {}[\"{}\"]", task.id, sanitize_label(&task.name)));
    }
    for gateway in &doc.gateways {
        lines.push(format!(
            "    {}{{\"{}\"}}",
            gateway.id,
            sanitize_label(&gateway.name)
        ));
    }
    if !doc.tasks.is_empty() || !doc.gateways.is_empty() {
        lines.push(String::new());
    }

    for flow in &doc.flows {
        match &flow.condition {
            Some(condition) => lines.push(format!(
                "    {} -->|\"{}\"| {}",
                flow.from,
                sanitize_label(condition),
                flow.to
            )),
            None => lines.push(format!("    {} --> {}", flow.from, flow.to)),
        }
    }

    lines.push("```".to_string());
    lines.join("\n")
}
