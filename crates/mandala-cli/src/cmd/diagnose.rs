//! `mandala diagnose`: health checks for a layout.
//!
//! Reports graph statistics, ignored center motifs, isolated nodes, and
//! spokes where the nearest-node rule and the proportional-index rule pick
//! different targets.

use std::io::{self, Write};

use anyhow::Result;
use mandala_graph::graph::GraphStats;
use mandala_graph::graph::diagnostics::{SpokeReport, spoke_divergence};
use serde::Serialize;

use crate::input::Layout;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

#[derive(Debug, Serialize)]
pub struct DiagnoseReport {
    pub state_path: String,
    pub stats: GraphStats,
    pub dropped_centers: Vec<String>,
    pub isolated_nodes: Vec<String>,
    pub spokes: SpokeReport,
    pub warnings: Vec<String>,
}

pub fn build_report(layout: &Layout) -> DiagnoseReport {
    let g = layout.graph();
    let stats = GraphStats::from_graph(&g);
    let spokes = spoke_divergence(&g);

    let adj = &g.adjacency;
    let isolated_nodes: Vec<String> = (0..adj.len())
        .filter(|&i| adj.degree(i) == 0)
        .filter_map(|i| adj.id(i).map(str::to_string))
        .collect();

    let mut warnings = Vec::new();
    if !g.dropped_centers.is_empty() {
        warnings.push(format!(
            "{} extra center motif(s) ignored: {}",
            g.dropped_centers.len(),
            g.dropped_centers.join(", ")
        ));
    }
    if stats.connected_component_count > 1 {
        warnings.push(format!(
            "graph has {} connected components; closeness is per component",
            stats.connected_component_count
        ));
    }
    if !spokes.is_consistent() {
        warnings.push(format!(
            "{} of {} spokes attach differently under the proportional-index rule",
            spokes.divergences.len(),
            spokes.radial_edges
        ));
    }

    DiagnoseReport {
        state_path: layout.state_path.display().to_string(),
        stats,
        dropped_centers: g.dropped_centers.clone(),
        isolated_nodes,
        spokes,
        warnings,
    }
}

/// Run `mandala diagnose`.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_diagnose(layout: &Layout, output: OutputMode) -> Result<()> {
    let report = build_report(layout);
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(r: &DiagnoseReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(
        w,
        "nodes {}  edges {}  components {}  isolated {}  spokes {}  divergent {}",
        r.stats.node_count,
        r.stats.edge_count,
        r.stats.connected_component_count,
        r.isolated_nodes.len(),
        r.spokes.radial_edges,
        r.spokes.divergences.len()
    )?;
    for d in &r.spokes.divergences {
        writeln!(w, "spoke  {}  {}  {}", d.node, d.geometric, d.proportional)?;
    }
    for warning in &r.warnings {
        writeln!(w, "warning  {warning}")?;
    }
    Ok(())
}

fn render_pretty(r: &DiagnoseReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Diagnostics")?;
    pretty_kv(w, "State", &r.state_path)?;
    pretty_kv(w, "Fingerprint", &r.stats.fingerprint)?;
    pretty_kv(
        w,
        "Graph",
        format!(
            "{} nodes, {} edges, {} component(s)",
            r.stats.node_count, r.stats.edge_count, r.stats.connected_component_count
        ),
    )?;
    if r.isolated_nodes.is_empty() {
        pretty_kv(w, "Isolated", "none")?;
    } else {
        pretty_kv(w, "Isolated", r.isolated_nodes.join(", "))?;
    }
    pretty_kv(
        w,
        "Spokes",
        format!(
            "{} radial, {} divergent",
            r.spokes.radial_edges,
            r.spokes.divergences.len()
        ),
    )?;

    if !r.spokes.divergences.is_empty() {
        writeln!(w)?;
        writeln!(w, "{:<24} {:<24} PROPORTIONAL", "NODE", "NEAREST")?;
        for d in &r.spokes.divergences {
            writeln!(w, "{:<24} {:<24} {}", d.node, d.geometric, d.proportional)?;
        }
    }

    writeln!(w)?;
    if r.warnings.is_empty() {
        writeln!(w, "✓ no issues found")?;
    } else {
        for warning in &r.warnings {
            writeln!(w, "⚠ {warning}")?;
        }
    }
    Ok(())
}
