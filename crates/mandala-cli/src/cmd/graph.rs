//! `mandala graph`: build the layout graph and summarize it.
//!
//! - `mandala graph`: node/edge counts, components, fingerprint
//! - `mandala graph --nodes`: also list every node with its position
//! - `mandala graph --edges`: also list every edge with its kind

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use mandala_graph::MandalaGraph;
use mandala_graph::export::{ExportEdge, graph_export};
use mandala_graph::graph::GraphStats;
use serde::Serialize;

use crate::input::Layout;
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};

/// Arguments for `mandala graph`.
#[derive(Args, Debug, Default)]
pub struct GraphArgs {
    /// List every node.
    #[arg(long)]
    pub nodes: bool,

    /// List every edge.
    #[arg(long)]
    pub edges: bool,
}

#[derive(Debug, Serialize)]
pub struct GraphReport {
    pub grid_order: u32,
    pub radial: bool,
    pub ring: bool,
    pub center_motif: Option<String>,
    pub dropped_centers: Vec<String>,
    pub stats: GraphStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<NodeRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<ExportEdge>>,
}

#[derive(Debug, Serialize)]
pub struct NodeRow {
    pub index: usize,
    pub id: String,
    pub layer: usize,
    pub x: f64,
    pub y: f64,
    pub motif: Option<String>,
}

pub fn build_report(g: &MandalaGraph, args: &GraphArgs) -> GraphReport {
    let nodes = args.nodes.then(|| {
        g.nodes()
            .enumerate()
            .map(|(index, n)| NodeRow {
                index,
                id: n.id.clone(),
                layer: n.layer,
                x: n.position.x,
                y: n.position.y,
                motif: n.motif_id.clone(),
            })
            .collect()
    });
    let edges = args.edges.then(|| graph_export(g).edges);

    GraphReport {
        grid_order: g.grid_order.get(),
        radial: g.topology.radial,
        ring: g.topology.ring,
        center_motif: g.center().and_then(|c| c.motif_id.clone()),
        dropped_centers: g.dropped_centers.clone(),
        stats: GraphStats::from_graph(g),
        nodes,
        edges,
    }
}

/// Run `mandala graph`.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_graph(args: &GraphArgs, layout: &Layout, output: OutputMode) -> Result<()> {
    let report = build_report(&layout.graph(), args);
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(r: &GraphReport, w: &mut dyn Write) -> io::Result<()> {
    let s = &r.stats;
    writeln!(
        w,
        "nodes {}  edges {}  radial {}  ring {}  layers {}  components {}  {}",
        s.node_count,
        s.edge_count,
        s.radial_edge_count,
        s.ring_edge_count,
        s.layer_count,
        s.connected_component_count,
        s.fingerprint
    )?;
    if let Some(ref nodes) = r.nodes {
        for n in nodes {
            writeln!(w, "{}  {}  {}  {:.6}  {:.6}", n.index, n.id, n.layer, n.x, n.y)?;
        }
    }
    if let Some(ref edges) = r.edges {
        for e in edges {
            writeln!(w, "{}  {}  {}", e.source, e.target, e.kind)?;
        }
    }
    Ok(())
}

fn render_pretty(r: &GraphReport, w: &mut dyn Write) -> io::Result<()> {
    let s = &r.stats;
    pretty_section(w, "Mandala Graph")?;
    pretty_kv(w, "Grid order", r.grid_order.to_string())?;
    pretty_kv(
        w,
        "Topology",
        format!(
            "radial {}, ring {}",
            on_off(r.radial),
            on_off(r.ring)
        ),
    )?;
    pretty_kv(w, "Center", r.center_motif.as_deref().unwrap_or("(synthetic)"))?;
    pretty_kv(w, "Nodes", s.node_count.to_string())?;
    pretty_kv(
        w,
        "Edges",
        format!(
            "{} ({} radial, {} ring)",
            s.edge_count, s.radial_edge_count, s.ring_edge_count
        ),
    )?;
    pretty_kv(w, "Layers", s.layer_count.to_string())?;
    pretty_kv(w, "Density", format!("{:.4}", s.density))?;
    pretty_kv(w, "Components", s.connected_component_count.to_string())?;
    pretty_kv(w, "Isolated", s.isolated_node_count.to_string())?;
    pretty_kv(w, "Max degree", s.max_degree.to_string())?;
    pretty_kv(w, "Fingerprint", &s.fingerprint)?;

    if let Some(ref nodes) = r.nodes {
        writeln!(w)?;
        writeln!(w, "{:>5}  {:<24} {:>5}  {:>10}  {:>10}", "#", "ID", "LAYER", "X", "Y")?;
        pretty_rule(w)?;
        for n in nodes {
            writeln!(
                w,
                "{:>5}  {:<24} {:>5}  {:>10.4}  {:>10.4}",
                n.index, n.id, n.layer, n.x, n.y
            )?;
        }
    }

    if let Some(ref edges) = r.edges {
        writeln!(w)?;
        writeln!(w, "{:<24} {:<24} KIND", "SOURCE", "TARGET")?;
        pretty_rule(w)?;
        for e in edges {
            writeln!(w, "{:<24} {:<24} {}", e.source, e.target, e.kind)?;
        }
    }
    Ok(())
}

const fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
