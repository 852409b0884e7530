//! Spoke-rule diagnostics.
//!
//! Radial edges attach to the geometrically nearest node of the previous
//! layer. Some exporters instead pick the spoke target by a proportional
//! index, `floor(i * prev_size / total) mod prev_size`, where `i` is the
//! instance index within its motif and `total` the motif's instance count.
//! The two rules disagree whenever a motif is rotated relative to the layer
//! beneath it or the layers have different sizes.
//!
//! [`spoke_divergence`] reports every radial edge where the proportional rule
//! would have chosen a different node. It never changes the graph.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;
use serde::Serialize;
use tracing::debug;

use crate::graph::build::{EdgeKind, MandalaGraph};

/// One radial edge whose target differs between the two spoke rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpokeDivergence {
    pub node: String,
    pub layer: usize,
    /// Target chosen by nearest-neighbor geometry (the edge in the graph).
    pub geometric: String,
    /// Target the proportional-index rule would choose.
    pub proportional: String,
}

/// Result of comparing both spoke rules over a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpokeReport {
    /// Radial edges inspected.
    pub radial_edges: usize,
    pub divergences: Vec<SpokeDivergence>,
}

impl SpokeReport {
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.divergences.is_empty()
    }
}

/// Index into the previous layer chosen by the proportional rule.
#[must_use]
pub fn proportional_index(instance: usize, total: usize, previous_size: usize) -> usize {
    if previous_size == 0 || total == 0 {
        return 0;
    }
    (instance * previous_size / total) % previous_size
}

/// Compare the geometric spoke targets in `g` against the proportional rule.
#[must_use]
pub fn spoke_divergence(g: &MandalaGraph) -> SpokeReport {
    let mut layers: HashMap<usize, Vec<NodeIndex>> = HashMap::new();
    for idx in g.graph.node_indices() {
        layers.entry(g.graph[idx].layer).or_default().push(idx);
    }

    let mut radial_edges = 0;
    let mut divergences = Vec::new();

    for (source, target, kind) in g.edges() {
        if kind != EdgeKind::Radial || source.layer == 0 {
            continue;
        }
        radial_edges += 1;

        let previous = layers
            .get(&(source.layer - 1))
            .map_or(&[][..], Vec::as_slice);
        let pick = proportional_index(source.instance, source.instance_count, previous.len());
        let Some(&proportional) = previous.get(pick) else {
            continue;
        };
        let proportional = &g.graph[proportional];

        if proportional.id != target.id {
            debug!(
                node = %source.id,
                geometric = %target.id,
                proportional = %proportional.id,
                "spoke rules disagree"
            );
            divergences.push(SpokeDivergence {
                node: source.id.clone(),
                layer: source.layer,
                geometric: target.id.clone(),
                proportional: proportional.id.clone(),
            });
        }
    }

    SpokeReport {
        radial_edges,
        divergences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{LayerGrouping, rebuild_graph};
    use mandala_core::{EdgeTopology, GlobalParams, Motif};

    fn graph(motifs: &[Motif], order: i64) -> MandalaGraph {
        rebuild_graph(
            motifs,
            &GlobalParams::clamped(
                order,
                EdgeTopology {
                    radial: true,
                    ring: false,
                },
            ),
            LayerGrouping::default(),
        )
    }

    #[test]
    fn proportional_index_formula() {
        assert_eq!(proportional_index(0, 8, 4), 0);
        assert_eq!(proportional_index(3, 8, 4), 1);
        assert_eq!(proportional_index(7, 8, 4), 3);
        assert_eq!(proportional_index(2, 4, 8), 4);
        assert_eq!(proportional_index(5, 0, 3), 0);
        assert_eq!(proportional_index(5, 6, 0), 0);
    }

    #[test]
    fn aligned_layers_agree() {
        let motifs = [
            Motif::ring("inner", 0.3, 0.0, 1),
            Motif::ring("outer", 0.6, 0.0, 1),
        ];
        let report = spoke_divergence(&graph(&motifs, 4));
        assert_eq!(report.radial_edges, 8);
        assert!(report.is_consistent(), "{:?}", report.divergences);
    }

    #[test]
    fn rotated_layer_diverges() {
        let motifs = [
            Motif::ring("inner", 0.3, 0.0, 1),
            Motif::ring("outer", 0.6, 90.0, 1),
        ];
        let report = spoke_divergence(&graph(&motifs, 4));
        assert_eq!(report.radial_edges, 8);
        assert_eq!(report.divergences.len(), 4);
        assert_eq!(
            report.divergences[0],
            SpokeDivergence {
                node: "outer-0".into(),
                layer: 2,
                geometric: "inner-1".into(),
                proportional: "inner-0".into(),
            }
        );
    }

    #[test]
    fn first_layer_always_agrees() {
        let report = spoke_divergence(&graph(&[Motif::ring("p", 0.5, 33.0, 2)], 5));
        assert_eq!(report.radial_edges, 10);
        assert!(report.is_consistent());
    }
}
