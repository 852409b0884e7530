//! `mandala analyze`: per-node centrality table.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use mandala_graph::analysis::{CentralityRow, Metric, analyze};
use mandala_graph::export::{CSV_HEADER, write_csv};
use serde::Serialize;

use crate::input::Layout;
use crate::output::{OutputMode, pretty_rule, pretty_section, render_mode};

/// Arguments for `mandala analyze`.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Order rows by this metric, highest first.
    #[arg(long, value_name = "METRIC")]
    pub sort_by: Option<Metric>,

    /// Keep only the first N rows (after sorting).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Write the table as CSV regardless of output mode.
    #[arg(long)]
    pub csv: bool,

    /// Decimal places for scores [default: from config, 4].
    #[arg(long, value_name = "P")]
    pub precision: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeReport {
    pub node_count: usize,
    pub edge_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorted_by: Option<Metric>,
    pub eigenvector_iterations: usize,
    pub rows: Vec<CentralityRow>,
}

/// Run `mandala analyze`.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_analyze(args: &AnalyzeArgs, layout: &Layout, output: OutputMode) -> Result<()> {
    let graph = layout.graph();
    let mut report = analyze(&graph);
    let precision = args.precision.unwrap_or(layout.config.export_precision);

    if let Some(metric) = args.sort_by {
        report.rows = report.sorted_by(metric);
    }
    if let Some(n) = args.top {
        report.rows.truncate(n);
    }

    if args.csv {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_csv(&report, precision, &mut out)?;
        return Ok(());
    }

    let view = AnalyzeReport {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        sorted_by: args.sort_by,
        eigenvector_iterations: report.eigenvector_iterations,
        rows: report.rows.iter().map(|r| r.rounded(precision)).collect(),
    };

    render_mode(
        output,
        &view,
        |v, w| render_text(v, precision, w),
        |v, w| render_pretty(v, precision, w),
    )
}

fn render_text(r: &AnalyzeReport, precision: usize, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{}", CSV_HEADER.replace(',', "  "))?;
    for row in &r.rows {
        writeln!(
            w,
            "{}  {}  {}  {:.p$}  {:.p$}  {:.p$}",
            row.id,
            row.layer,
            row.degree,
            row.closeness,
            row.betweenness,
            row.eigenvector,
            p = precision
        )?;
    }
    Ok(())
}

fn render_pretty(r: &AnalyzeReport, precision: usize, w: &mut dyn Write) -> io::Result<()> {
    let heading = r.sorted_by.map_or_else(
        || "Centrality".to_string(),
        |m| format!("Centrality (by {m})"),
    );
    pretty_section(w, &heading)?;
    writeln!(
        w,
        "{:<24} {:>5} {:>6} {:>11} {:>12} {:>11}",
        "NODE", "LAYER", "DEGREE", "CLOSENESS", "BETWEENNESS", "EIGENVECTOR"
    )?;
    pretty_rule(w)?;
    for row in &r.rows {
        writeln!(
            w,
            "{:<24} {:>5} {:>6} {:>11.p$} {:>12.p$} {:>11.p$}",
            row.id,
            row.layer,
            row.degree,
            row.closeness,
            row.betweenness,
            row.eigenvector,
            p = precision
        )?;
    }
    writeln!(w)?;
    writeln!(
        w,
        "{} nodes, {} edges, {} eigenvector iterations",
        r.node_count, r.edge_count, r.eigenvector_iterations
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> AnalyzeReport {
        AnalyzeReport {
            node_count: 2,
            edge_count: 1,
            sorted_by: Some(Metric::Degree),
            eigenvector_iterations: 20,
            rows: vec![
                CentralityRow {
                    id: "center".into(),
                    layer: 0,
                    degree: 1,
                    closeness: 1.0,
                    betweenness: 0.0,
                    eigenvector: 0.707_1,
                },
                CentralityRow {
                    id: "m-0".into(),
                    layer: 1,
                    degree: 1,
                    closeness: 1.0,
                    betweenness: 0.0,
                    eigenvector: 0.707_1,
                },
            ],
        }
    }

    #[test]
    fn text_rows_are_fixed_precision() {
        let mut buf = Vec::new();
        render_text(&report(), 2, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Node ID  Layer  Degree  Closeness  Betweenness  Eigenvector");
        assert_eq!(lines[1], "center  0  1  1.00  0.00  0.71");
    }

    #[test]
    fn json_names_sort_metric() {
        let json = serde_json::to_value(report()).expect("serialize");
        assert_eq!(json["sorted_by"], "degree");
        assert_eq!(json["rows"][1]["id"], "m-0");
    }
}
