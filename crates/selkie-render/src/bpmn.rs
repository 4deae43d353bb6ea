//! BPMN 2.0 XML writer.
//!
//! Emits `definitions` carrying the OMG model namespaces, a collaboration
//! with a single participant, one process with the lane set, tasks,
//! gateways, and sequence flows, and a BPMNDiagram whose shape bounds and
//! edge waypoints are exactly the computed layout, offset into the
//! participant band. Human actors map to `userTask`, system actors to
//! `serviceTask`; phases have no BPMN equivalent and are reflected only in
//! the computed ordering.

use crate::Result;
use crate::util::{escape_xml, fmt};
use indexmap::IndexMap;
use otter::{Layout, LayoutEdge, LayoutNode};
use selkie_core::{ActorKind, FlowDocument, GatewayKind};
use std::fmt::Write as _;

const BPMN_NS: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";
const BPMNDI_NS: &str = "http://www.omg.org/spec/BPMN/20100524/DI";
const DC_NS: &str = "http://www.omg.org/spec/DD/20100524/DC";
const DI_NS: &str = "http://www.omg.org/spec/DD/20100524/DI";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Outer margin around the participant band.
const MARGIN: f64 = 50.0;
/// Width of the rotated lane-name header bpmn.io draws on the left.
const LANE_HEADER: f64 = 30.0;
/// Horizontal breathing room around the content inside the lanes.
const CONTENT_PAD: f64 = 40.0;

pub fn write_bpmn(doc: &FlowDocument, layout: &Layout) -> Result<String> {
    let id = escape_xml(doc.diagram_id());
    let title = escape_xml(doc.diagram_title());

    let edges_by_id: IndexMap<&str, &LayoutEdge> = layout
        .edges
        .iter()
        .map(|e| (e.id.as_str(), e))
        .collect();
    let nodes_by_id: IndexMap<&str, &LayoutNode> = layout
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n))
        .collect();

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    writeln!(
        out,
        "<bpmn2:definitions xmlns:bpmn2=\"{BPMN_NS}\" xmlns:bpmndi=\"{BPMNDI_NS}\" \
         xmlns:dc=\"{DC_NS}\" xmlns:di=\"{DI_NS}\" xmlns:xsi=\"{XSI_NS}\" \
         id=\"Definitions_{id}\" targetNamespace=\"http://bpmn.io/schema/bpmn\">"
    )?;

    writeln!(out, "  <bpmn2:collaboration id=\"Collaboration_{id}\">")?;
    writeln!(
        out,
        "    <bpmn2:participant id=\"Participant_{id}\" name=\"{title}\" processRef=\"Process_{id}\"/>"
    )?;
    writeln!(out, "  </bpmn2:collaboration>")?;

    writeln!(
        out,
        "  <bpmn2:process id=\"Process_{id}\" name=\"{title}\" isExecutable=\"false\">"
    )?;
    write_lane_set(&mut out, layout, &id)?;
    write_flow_elements(&mut out, doc)?;
    writeln!(out, "  </bpmn2:process>")?;

    write_diagram(&mut out, doc, layout, &id, &edges_by_id, &nodes_by_id)?;

    writeln!(out, "</bpmn2:definitions>")?;
    Ok(out)
}

fn write_lane_set(out: &mut String, layout: &Layout, id: &str) -> Result<()> {
    if layout.lanes.iter().all(|l| l.owner.is_none()) {
        return Ok(());
    }
    writeln!(out, "    <bpmn2:laneSet id=\"LaneSet_Process_{id}\">")?;
    for lane in &layout.lanes {
        let Some(owner) = lane.owner.as_deref() else {
            continue;
        };
        writeln!(
            out,
            "      <bpmn2:lane id=\"Lane_{}\" name=\"{}\">",
            escape_xml(owner),
            escape_xml(&lane.name)
        )?;
        for node in layout.nodes.iter().filter(|n| n.lane == lane.index) {
            writeln!(
                out,
                "        <bpmn2:flowNodeRef>{}</bpmn2:flowNodeRef>",
                escape_xml(&node.id)
            )?;
        }
        writeln!(out, "      </bpmn2:lane>")?;
    }
    writeln!(out, "    </bpmn2:laneSet>")?;
    Ok(())
}

fn write_flow_elements(out: &mut String, doc: &FlowDocument) -> Result<()> {
    for task in &doc.tasks {
        let actor_kind = doc
            .actors
            .iter()
            .find(|a| a.id == task.actor_id)
            .map(|a| a.kind)
            .unwrap_or_default();
        let element = match actor_kind {
            ActorKind::System => "serviceTask",
            ActorKind::Human => "userTask",
        };
        write!(
            out,
            "    <bpmn2:{element} id=\"{}\" name=\"{}\"",
            escape_xml(&task.id),
            escape_xml(&task.name)
        )?;
        match &task.notes {
            Some(notes) => {
                writeln!(out, ">")?;
                writeln!(
                    out,
                    "      <bpmn2:documentation>{}</bpmn2:documentation>",
                    escape_xml(notes)
                )?;
                writeln!(out, "    </bpmn2:{element}>")?;
            }
            None => writeln!(out, "/>")?,
        }
    }

    for gateway in &doc.gateways {
        let element = match gateway.kind {
            GatewayKind::Exclusive => "exclusiveGateway",
            GatewayKind::Parallel => "parallelGateway",
            GatewayKind::Inclusive => "inclusiveGateway",
        };
        write!(
            out,
            "    <bpmn2:{element} id=\"{}\" name=\"{}\"",
            escape_xml(&gateway.id),
            escape_xml(&gateway.name)
        )?;
        match &gateway.notes {
            Some(notes) => {
                writeln!(out, ">")?;
                writeln!(
                    out,
                    "      <bpmn2:documentation>{}</bpmn2:documentation>",
                    escape_xml(notes)
                )?;
                writeln!(out, "    </bpmn2:{element}>")?;
            }
            None => writeln!(out, "/>")?,
        }
    }

    for flow in &doc.flows {
        write!(
            out,
            "    <bpmn2:sequenceFlow id=\"{}\" sourceRef=\"{}\" targetRef=\"{}\"",
            escape_xml(&flow.id),
            escape_xml(&flow.from),
            escape_xml(&flow.to)
        )?;
        if let Some(name) = &flow.name {
            write!(out, " name=\"{}\"", escape_xml(name))?;
        }
        match &flow.condition {
            Some(condition) => {
                writeln!(out, ">")?;
                writeln!(
                    out,
                    "      <bpmn2:conditionExpression xsi:type=\"bpmn2:tFormalExpression\">{}</bpmn2:conditionExpression>",
                    escape_xml(condition)
                )?;
                writeln!(out, "    </bpmn2:sequenceFlow>")?;
            }
            None => writeln!(out, "/>")?,
        }
    }
    Ok(())
}

fn write_diagram(
    out: &mut String,
    doc: &FlowDocument,
    layout: &Layout,
    id: &str,
    edges_by_id: &IndexMap<&str, &LayoutEdge>,
    nodes_by_id: &IndexMap<&str, &LayoutNode>,
) -> Result<()> {
    let lane_width = LANE_HEADER + layout.width + CONTENT_PAD;
    let content_x = MARGIN + LANE_HEADER + CONTENT_PAD / 2.0;
    let content_y = MARGIN;

    writeln!(out, "  <bpmndi:BPMNDiagram id=\"BPMNDiagram_{id}\">")?;
    writeln!(
        out,
        "    <bpmndi:BPMNPlane id=\"BPMNPlane_{id}\" bpmnElement=\"Collaboration_{id}\">"
    )?;

    writeln!(
        out,
        "      <bpmndi:BPMNShape id=\"BPMNShape_Participant_{id}\" bpmnElement=\"Participant_{id}\" isHorizontal=\"true\">"
    )?;
    write_bounds(out, MARGIN, MARGIN, lane_width, layout.height)?;
    writeln!(out, "      </bpmndi:BPMNShape>")?;

    for lane in &layout.lanes {
        let Some(owner) = lane.owner.as_deref() else {
            continue;
        };
        writeln!(
            out,
            "      <bpmndi:BPMNShape id=\"BPMNShape_Lane_{owner}\" bpmnElement=\"Lane_{owner}\" isHorizontal=\"true\">",
            owner = escape_xml(owner)
        )?;
        write_bounds(
            out,
            MARGIN + LANE_HEADER,
            content_y + lane.y,
            lane_width - LANE_HEADER,
            lane.height,
        )?;
        writeln!(out, "      </bpmndi:BPMNShape>")?;
    }

    // Keep diagram order aligned with the model: tasks, then gateways.
    for node_id in doc
        .tasks
        .iter()
        .map(|t| t.id.as_str())
        .chain(doc.gateways.iter().map(|g| g.id.as_str()))
    {
        let Some(node) = nodes_by_id.get(node_id) else {
            continue;
        };
        writeln!(
            out,
            "      <bpmndi:BPMNShape id=\"BPMNShape_{nid}\" bpmnElement=\"{nid}\">",
            nid = escape_xml(&node.id)
        )?;
        write_bounds(
            out,
            content_x + node.x,
            content_y + node.y,
            node.width,
            node.height,
        )?;
        writeln!(out, "      </bpmndi:BPMNShape>")?;
    }

    for flow in &doc.flows {
        let Some(edge) = edges_by_id.get(flow.id.as_str()) else {
            continue;
        };
        writeln!(
            out,
            "      <bpmndi:BPMNEdge id=\"BPMNEdge_{eid}\" bpmnElement=\"{eid}\">",
            eid = escape_xml(&edge.id)
        )?;
        for p in &edge.waypoints {
            writeln!(
                out,
                "        <di:waypoint x=\"{}\" y=\"{}\"/>",
                fmt(content_x + p.x),
                fmt(content_y + p.y)
            )?;
        }
        writeln!(out, "      </bpmndi:BPMNEdge>")?;
    }

    writeln!(out, "    </bpmndi:BPMNPlane>")?;
    writeln!(out, "  </bpmndi:BPMNDiagram>")?;
    Ok(())
}

fn write_bounds(out: &mut String, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
    writeln!(
        out,
        "        <dc:Bounds x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>",
        fmt(x),
        fmt(y),
        fmt(width),
        fmt(height)
    )?;
    Ok(())
}
