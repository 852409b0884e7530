//! Partition ring motifs into concentric layers.
//!
//! Center motifs are split off first: the first one supplies the synthetic
//! center node, any further ones are dropped from the graph. Ring motifs are
//! stable-sorted by ascending radius and folded into layers.
//!
//! ## Strategies
//!
//! - [`LayerStrategy::Pairwise`]: a motif joins the most recently created
//!   layer when its radius is within `tolerance` of the previous motif's
//!   radius. This is not transitive: radii drifting by slightly less than the
//!   tolerance (0.50, 0.509, 0.518, ...) chain into a single layer.
//! - [`LayerStrategy::Quantized`]: a motif joins the current layer when
//!   `floor(radius / tolerance)` matches the layer's bucket. No chaining, but
//!   two radii straddling a bucket boundary split even when they are close.
//!
//! Either way a layer's placement radius is the radius of its first member.

use mandala_core::config::DEFAULT_LAYER_TOLERANCE;
use mandala_core::{CenterMotif, LayerStrategy, Motif, RingMotif};
use tracing::{debug, warn};

/// Grouping parameters for [`group_layers`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerGrouping {
    pub tolerance: f64,
    pub strategy: LayerStrategy,
}

impl Default for LayerGrouping {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_LAYER_TOLERANCE,
            strategy: LayerStrategy::Pairwise,
        }
    }
}

/// A group of ring motifs sharing (approximately) one radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// 1-based; index 0 is the synthetic center.
    pub index: usize,
    /// Placement radius (the first member's radius).
    pub radius: f64,
    /// Members in encounter order.
    pub members: Vec<RingMotif>,
}

impl Layer {
    fn last_radius(&self) -> f64 {
        self.members.last().map_or(self.radius, |m| m.radius)
    }
}

/// Result of [`group_layers`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerPartition {
    /// The motif supplying the center node, if any motif was marked center.
    pub center: Option<CenterMotif>,
    /// Ids of additional center motifs that do not contribute to the graph.
    pub dropped_centers: Vec<String>,
    /// Ring layers in ascending radius order.
    pub layers: Vec<Layer>,
}

impl LayerPartition {
    /// Total number of ring motifs across all layers.
    #[must_use]
    pub fn ring_motif_count(&self) -> usize {
        self.layers.iter().map(|l| l.members.len()).sum()
    }
}

/// Split center motifs from ring motifs and group the rings into layers.
#[must_use]
pub fn group_layers(motifs: &[Motif], grouping: LayerGrouping) -> LayerPartition {
    let mut center: Option<CenterMotif> = None;
    let mut dropped_centers = Vec::new();
    let mut rings: Vec<RingMotif> = Vec::with_capacity(motifs.len());

    for motif in motifs {
        match motif {
            Motif::Center(c) if center.is_none() => center = Some(c.clone()),
            Motif::Center(c) => dropped_centers.push(c.id.clone()),
            Motif::Ring(r) => rings.push(r.clone()),
        }
    }

    if !dropped_centers.is_empty() {
        warn!(
            kept = center.as_ref().map(|c| c.id.as_str()),
            dropped = ?dropped_centers,
            "multiple center motifs; only the first contributes to the center node"
        );
    }

    // Stable: equal radii keep their input order.
    rings.sort_by(|a, b| a.radius.total_cmp(&b.radius));

    let mut layers: Vec<Layer> = Vec::new();
    for motif in rings {
        let joins = layers
            .last()
            .is_some_and(|layer| same_layer(layer, motif.radius, grouping));

        match layers.last_mut() {
            Some(layer) if joins => layer.members.push(motif),
            _ => {
                debug!(
                    index = layers.len() + 1,
                    radius = motif.radius,
                    "opening layer"
                );
                layers.push(Layer {
                    index: layers.len() + 1,
                    radius: motif.radius,
                    members: vec![motif],
                });
            }
        }
    }

    LayerPartition {
        center,
        dropped_centers,
        layers,
    }
}

fn same_layer(layer: &Layer, radius: f64, grouping: LayerGrouping) -> bool {
    match grouping.strategy {
        LayerStrategy::Pairwise => (radius - layer.last_radius()).abs() < grouping.tolerance,
        LayerStrategy::Quantized => {
            bucket(radius, grouping.tolerance) == bucket(layer.radius, grouping.tolerance)
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn bucket(radius: f64, tolerance: f64) -> i64 {
    (radius / tolerance).floor() as i64
}
