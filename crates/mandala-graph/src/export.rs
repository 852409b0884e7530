//! Export formats for a built graph and its analysis.
//!
//! - [`ConnectivityExport`]: 0-indexed adjacency list for numeric tooling.
//! - [`write_csv`]: the per-node metric table.
//! - [`GraphExport`]: nodes and typed edges by id.
//!
//! Node indices are construction order (center = 0). Floats are rounded
//! here and nowhere earlier.

use std::io::{self, Write};

use mandala_core::EdgeTopology;
use serde::{Deserialize, Serialize};

use crate::analysis::CentralityReport;
use crate::graph::{EdgeKind, MandalaGraph};

/// Header row of the metric CSV.
pub const CSV_HEADER: &str = "Node ID,Layer,Degree,Closeness,Betweenness,Eigenvector";

const CONNECTIVITY_DESCRIPTION: &str =
    "Adjacency list. Nodes are 0-indexed in construction order; node 0 is the center.";

// ---------------------------------------------------------------------------
// Connectivity JSON
// ---------------------------------------------------------------------------

/// Edge toggles as written in the connectivity export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologySettings {
    pub radial: bool,
    pub ring: bool,
}

impl From<EdgeTopology> for TopologySettings {
    fn from(t: EdgeTopology) -> Self {
        Self {
            radial: t.radial,
            ring: t.ring,
        }
    }
}

/// `{ description, topology_settings, node_count, edges: [[a, b], ...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityExport {
    pub description: String,
    pub topology_settings: TopologySettings,
    pub node_count: usize,
    pub edges: Vec<[usize; 2]>,
}

/// Connectivity export of `g`. Radial edges list the outer node first.
#[must_use]
pub fn connectivity_export(g: &MandalaGraph) -> ConnectivityExport {
    ConnectivityExport {
        description: CONNECTIVITY_DESCRIPTION.to_string(),
        topology_settings: g.topology.into(),
        node_count: g.node_count(),
        edges: g.indexed_edges().map(|(a, b, _)| [a, b]).collect(),
    }
}

// ---------------------------------------------------------------------------
// Graph JSON
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: String,
    pub layer: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
}

/// `{ nodes: [{id, layer}], edges: [{source, target, kind}] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<ExportEdge>,
}

#[must_use]
pub fn graph_export(g: &MandalaGraph) -> GraphExport {
    GraphExport {
        nodes: g
            .nodes()
            .map(|n| ExportNode {
                id: n.id.clone(),
                layer: n.layer,
            })
            .collect(),
        edges: g
            .edges()
            .map(|(a, b, kind)| ExportEdge {
                source: a.id.clone(),
                target: b.id.clone(),
                kind,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Write the metric table as CSV, floats fixed to `precision` places.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_csv<W: Write>(report: &CentralityReport, precision: usize, w: &mut W) -> io::Result<()> {
    writeln!(w, "{CSV_HEADER}")?;
    for row in &report.rows {
        writeln!(
            w,
            "{},{},{},{:.p$},{:.p$},{:.p$}",
            csv_field(&row.id),
            row.layer,
            row.degree,
            row.closeness,
            row.betweenness,
            row.eigenvector,
            p = precision,
        )?;
    }
    Ok(())
}

/// Quote a field when it contains a separator, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
