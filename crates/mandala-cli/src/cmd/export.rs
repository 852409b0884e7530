//! `mandala export`: write the graph or its analysis for other tools.
//!
//! Formats:
//! - `connectivity`: 0-indexed adjacency list JSON
//! - `csv`:          per-node centrality table
//! - `graph`:        nodes and typed edges by id, JSON
//!
//! Output goes to stdout unless `--output` names a file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use mandala_core::ErrorCode;
use mandala_graph::analysis::analyze;
use mandala_graph::export::{connectivity_export, graph_export, write_csv};
use serde::Serialize;
use tracing::info;

use crate::input::Layout;
use crate::output::{CliError, OutputMode, render, render_error};

/// Export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Connectivity,
    Csv,
    Graph,
}

/// Arguments for `mandala export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// What to export.
    #[arg(value_enum, value_name = "FORMAT")]
    pub kind: ExportFormat,

    /// Write to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Decimal places for CSV scores [default: from config, 4].
    #[arg(long, value_name = "P")]
    pub precision: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ExportResult {
    ok: bool,
    format: ExportFormat,
    path: String,
    bytes: usize,
}

/// Render the export payload into memory.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_bytes(format: ExportFormat, layout: &Layout, precision: usize) -> Result<Vec<u8>> {
    let graph = layout.graph();
    let mut buf = Vec::new();
    match format {
        ExportFormat::Connectivity => {
            serde_json::to_writer_pretty(&mut buf, &connectivity_export(&graph))?;
            buf.push(b'\n');
        }
        ExportFormat::Graph => {
            serde_json::to_writer_pretty(&mut buf, &graph_export(&graph))?;
            buf.push(b'\n');
        }
        ExportFormat::Csv => write_csv(&analyze(&graph), precision, &mut buf)?,
    }
    Ok(buf)
}

/// Run `mandala export`.
///
/// # Errors
///
/// Returns an error if the payload cannot be produced or written.
pub fn run_export(args: &ExportArgs, layout: &Layout, output: OutputMode) -> Result<()> {
    let precision = args.precision.unwrap_or(layout.config.export_precision);
    let bytes = export_bytes(args.kind, layout, precision)?;

    let Some(ref path) = args.output else {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        out.write_all(&bytes)?;
        return Ok(());
    };

    if let Err(e) = write_file(path, &bytes) {
        render_error(
            output,
            &CliError::from_code(ErrorCode::ExportWriteFailed, format!("{e:#}")),
        )?;
        return Err(e);
    }
    info!(path = %path.display(), bytes = bytes.len(), "export written");

    let result = ExportResult {
        ok: true,
        format: args.kind,
        path: path.display().to_string(),
        bytes: bytes.len(),
    };
    render(output, &result, |r, w| {
        writeln!(w, "✓ wrote {} bytes to {}", r.bytes, r.path)
    })
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use mandala_core::config::EffectiveConfig;
    use mandala_core::{EdgeTopology, GlobalParams, Motif};
    use mandala_graph::graph::LayerGrouping;

    use super::*;

    fn layout() -> Layout {
        Layout {
            state_path: "mandala_state.json".into(),
            motifs: vec![Motif::ring("m", 0.5, 0.0, 1)],
            params: GlobalParams::clamped(
                2,
                EdgeTopology {
                    radial: true,
                    ring: false,
                },
            ),
            grouping: LayerGrouping::default(),
            config: EffectiveConfig::default(),
        }
    }

    #[test]
    fn connectivity_bytes_are_json() {
        let bytes = export_bytes(ExportFormat::Connectivity, &layout(), 4).expect("export");
        let v: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(v["node_count"], 3);
        assert_eq!(v["topology_settings"]["ring"], false);
        assert_eq!(v["edges"], serde_json::json!([[1, 0], [2, 0]]));
    }

    #[test]
    fn csv_bytes_start_with_header() {
        let bytes = export_bytes(ExportFormat::Csv, &layout(), 4).expect("export");
        let text = String::from_utf8(bytes).expect("utf8");
        assert!(text.starts_with("Node ID,Layer,Degree,Closeness,Betweenness,Eigenvector\n"));
        assert!(text.contains("\ncenter,0,2,1.0000,2.0000,"));
    }

    #[test]
    fn write_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out/nested/graph.json");
        write_file(&path, b"{}").expect("write");
        assert_eq!(fs::read_to_string(path).expect("read"), "{}");
    }
}
