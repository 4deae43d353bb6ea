//! Debug-grade SVG renderer.
//!
//! Draws the layout as-is: lane bands with their role names, rounded
//! rectangles for activities, diamonds for gateways, and the edge waypoint
//! polylines (dashed for feedback edges). Meant for eyeballing layouts and
//! golden tests, not for production styling.

use crate::Result;
use crate::util::{escape_xml, fmt};
use otter::{Layout, NodeKind};
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgOptions {
    /// Adds extra space around the computed viewBox.
    pub viewbox_padding: f64,
    /// When true, include edge polylines.
    pub include_edges: bool,
    /// When true, include node shapes and labels.
    pub include_nodes: bool,
    /// When true, include lane bands and role names.
    pub include_lanes: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            viewbox_padding: 8.0,
            include_edges: true,
            include_nodes: true,
            include_lanes: true,
        }
    }
}

pub fn write_svg(layout: &Layout, options: &SvgOptions) -> Result<String> {
    let pad = options.viewbox_padding.max(0.0);
    let vb_w = layout.width + pad * 2.0;
    let vb_h = layout.height + pad * 2.0;

    let mut out = String::new();
    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\" font-family=\"sans-serif\" font-size=\"12\">",
        fmt(-pad),
        fmt(-pad),
        fmt(vb_w),
        fmt(vb_h)
    )?;
    writeln!(
        out,
        "  <defs><marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"9\" refY=\"5\" markerWidth=\"7\" markerHeight=\"7\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"#333333\"/></marker></defs>"
    )?;

    if options.include_lanes {
        for lane in &layout.lanes {
            writeln!(
                out,
                "  <rect x=\"0\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"#999999\"/>",
                fmt(lane.y),
                fmt(layout.width),
                fmt(lane.height)
            )?;
            if !lane.name.is_empty() {
                writeln!(
                    out,
                    "  <text x=\"4\" y=\"{}\" fill=\"#666666\">{}</text>",
                    fmt(lane.y + 14.0),
                    escape_xml(&lane.name)
                )?;
            }
        }
    }

    if options.include_edges {
        for edge in &layout.edges {
            let points: Vec<String> = edge
                .waypoints
                .iter()
                .map(|p| format!("{},{}", fmt(p.x), fmt(p.y)))
                .collect();
            let dash = if edge.is_feedback {
                " stroke-dasharray=\"6 4\""
            } else {
                ""
            };
            writeln!(
                out,
                "  <polyline points=\"{}\" fill=\"none\" stroke=\"#333333\" marker-end=\"url(#arrow)\"{dash}/>",
                points.join(" ")
            )?;
        }
    }

    if options.include_nodes {
        for node in &layout.nodes {
            match node.kind {
                NodeKind::Activity => {
                    writeln!(
                        out,
                        "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"4\" fill=\"#ffffff\" stroke=\"#333333\"/>",
                        fmt(node.x),
                        fmt(node.y),
                        fmt(node.width),
                        fmt(node.height)
                    )?;
                }
                NodeKind::Gateway => {
                    let cx = node.x + node.width / 2.0;
                    let cy = node.y + node.height / 2.0;
                    writeln!(
                        out,
                        "  <polygon points=\"{},{} {},{} {},{} {},{}\" fill=\"#ffffff\" stroke=\"#333333\"/>",
                        fmt(cx),
                        fmt(node.y),
                        fmt(node.x + node.width),
                        fmt(cy),
                        fmt(cx),
                        fmt(node.y + node.height),
                        fmt(node.x),
                        fmt(cy)
                    )?;
                }
            }
            if !node.label.is_empty() {
                writeln!(
                    out,
                    "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\">{}</text>",
                    fmt(node.x + node.width / 2.0),
                    fmt(node.y + node.height / 2.0 + 4.0),
                    escape_xml(&node.label)
                )?;
            }
        }
    }

    writeln!(out, "</svg>")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{SvgOptions, write_svg};
    use otter::{LayoutConfig, ProcessGraph, layout};

    fn sample() -> otter::Layout {
        let mut b = ProcessGraph::builder();
        b.role("sales", "Sales");
        b.role("wh", "Warehouse");
        b.activity("a", "Take order", "sales");
        b.gateway("gw", "In stock?");
        b.activity("b", "Pick items", "wh");
        b.transition("f1", "a", "gw", None);
        b.transition("f2", "gw", "b", None);
        b.transition("back", "b", "a", None);
        let g = b.build().unwrap();
        layout(
            &g,
            &LayoutConfig {
                scale: Some(1.0),
                ..LayoutConfig::default()
            },
        )
    }

    #[test]
    fn draws_every_layer() {
        let svg = write_svg(&sample(), &SvgOptions::default()).unwrap();
        assert!(svg.starts_with("<svg "));
        assert_eq!(svg.matches("<rect ").count(), 4); // 2 lanes + 2 activities
        assert_eq!(svg.matches("<polygon ").count(), 1);
        assert_eq!(svg.matches("<polyline ").count(), 3);
        assert!(svg.contains(">Sales</text>"));
        assert!(svg.contains(">In stock?</text>"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn feedback_edges_are_dashed() {
        let svg = write_svg(&sample(), &SvgOptions::default()).unwrap();
        assert_eq!(svg.matches("stroke-dasharray").count(), 1);
    }

    #[test]
    fn layers_can_be_switched_off() {
        let options = SvgOptions {
            include_edges: false,
            include_lanes: false,
            ..SvgOptions::default()
        };
        let svg = write_svg(&sample(), &options).unwrap();
        assert_eq!(svg.matches("<polyline ").count(), 0);
        assert_eq!(svg.matches("<rect ").count(), 2);
    }

    #[test]
    fn empty_layout_renders_an_empty_svg() {
        let g = ProcessGraph::builder().build().unwrap();
        let l = layout(&g, &LayoutConfig::default());
        let svg = write_svg(&l, &SvgOptions::default()).unwrap();
        assert!(svg.contains("viewBox=\"-8 -8 16 16\""));
    }
}
