//! `mandala layers`: show how motifs were grouped into rings.

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

use crate::input::Layout;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

#[derive(Debug, Serialize)]
pub struct LayersReport {
    pub strategy: &'static str,
    pub tolerance: f64,
    pub grid_order: u32,
    pub center: Option<String>,
    pub dropped_centers: Vec<String>,
    pub layers: Vec<LayerSummary>,
}

#[derive(Debug, Serialize)]
pub struct LayerSummary {
    pub index: usize,
    pub radius: f64,
    pub node_count: usize,
    pub motifs: Vec<MotifSummary>,
}

#[derive(Debug, Serialize)]
pub struct MotifSummary {
    pub id: String,
    pub radius: f64,
    pub angle: f64,
    pub multiplicity: u32,
    pub instances: usize,
}

pub fn build_report(layout: &Layout) -> LayersReport {
    let partition = layout.partition();
    let order = layout.params.grid_order;

    let layers = partition
        .layers
        .iter()
        .map(|layer| {
            let motifs: Vec<MotifSummary> = layer
                .members
                .iter()
                .map(|m| MotifSummary {
                    id: m.id.clone(),
                    radius: m.radius,
                    angle: m.angle,
                    multiplicity: m.multiplicity,
                    instances: m.instance_count(order),
                })
                .collect();
            LayerSummary {
                index: layer.index,
                radius: layer.radius,
                node_count: motifs.iter().map(|m| m.instances).sum(),
                motifs,
            }
        })
        .collect();

    LayersReport {
        strategy: layout.grouping.strategy.as_str(),
        tolerance: layout.grouping.tolerance,
        grid_order: order.get(),
        center: partition.center.map(|c| c.id),
        dropped_centers: partition.dropped_centers,
        layers,
    }
}

/// Run `mandala layers`.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_layers(layout: &Layout, output: OutputMode) -> Result<()> {
    let report = build_report(layout);
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(r: &LayersReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "layer  radius  motif  angle  multiplicity  instances")?;
    for layer in &r.layers {
        for m in &layer.motifs {
            writeln!(
                w,
                "{}  {}  {}  {}  {}  {}",
                layer.index, layer.radius, m.id, m.angle, m.multiplicity, m.instances
            )?;
        }
    }
    Ok(())
}

fn render_pretty(r: &LayersReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Layers")?;
    pretty_kv(w, "Strategy", format!("{} (tolerance {})", r.strategy, r.tolerance))?;
    pretty_kv(w, "Grid order", r.grid_order.to_string())?;
    pretty_kv(w, "Center", r.center.as_deref().unwrap_or("(synthetic)"))?;
    if !r.dropped_centers.is_empty() {
        pretty_kv(w, "Dropped", r.dropped_centers.join(", "))?;
    }

    for layer in &r.layers {
        writeln!(w)?;
        writeln!(
            w,
            "Layer {}  r={:.4}  ({} nodes)",
            layer.index, layer.radius, layer.node_count
        )?;
        for m in &layer.motifs {
            writeln!(
                w,
                "  {:<20} r={:.4}  angle={:>7.2}  x{:<3} → {} instances",
                m.id, m.radius, m.angle, m.multiplicity, m.instances
            )?;
        }
    }
    if r.layers.is_empty() {
        writeln!(w)?;
        writeln!(w, "No ring motifs.")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use mandala_core::config::EffectiveConfig;
    use mandala_core::{EdgeTopology, GlobalParams, Motif};
    use mandala_graph::graph::LayerGrouping;

    use super::*;

    fn layout(motifs: Vec<Motif>) -> Layout {
        Layout {
            state_path: "mandala_state.json".into(),
            motifs,
            params: GlobalParams::clamped(4, EdgeTopology::default()),
            grouping: LayerGrouping::default(),
            config: EffectiveConfig::default(),
        }
    }

    #[test]
    fn report_groups_and_counts_instances() {
        let report = build_report(&layout(vec![
            Motif::center("hub"),
            Motif::center("extra"),
            Motif::ring("b", 0.505, 45.0, 2),
            Motif::ring("a", 0.5, 0.0, 1),
            Motif::ring("c", 0.8, 0.0, 1),
        ]));
        assert_eq!(report.center.as_deref(), Some("hub"));
        assert_eq!(report.dropped_centers, ["extra"]);
        assert_eq!(report.layers.len(), 2);
        assert_eq!(report.layers[0].node_count, 12);
        assert_eq!(report.layers[0].motifs[0].id, "a");
        assert_eq!(report.layers[1].motifs[0].instances, 4);
    }

    #[test]
    fn text_output_has_one_row_per_motif() {
        let report = build_report(&layout(vec![Motif::ring("a", 0.5, 0.0, 1)]));
        let mut buf = Vec::new();
        render_text(&report, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().nth(1).is_some_and(|l| l.starts_with("1  0.5  a")));
    }
}
