//! Core input model: motifs, symmetry order, and edge topology.
//!
//! A [`Motif`] is either a ring motif (repeated `grid_order * multiplicity`
//! times around a circle of the given radius) or a center motif (collapsed
//! into the single synthetic center node). The split is a closed enum so
//! every consumer has to handle both cases.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Rotational symmetry order used when a saved state omits `gridOrder`.
pub const DEFAULT_GRID_ORDER: u32 = 8;

/// Largest accepted grid order.
pub const MAX_GRID_ORDER: u32 = 1024;

/// Largest accepted multiplicity (the editor's "Count" slider tops out here).
pub const MAX_MULTIPLICITY: u32 = 64;

// ---------------------------------------------------------------------------
// Motif
// ---------------------------------------------------------------------------

/// A motif contributing to the collapsed center node.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterMotif {
    pub id: String,
    pub scale: f64,
}

/// A motif repeated around one ring.
#[derive(Debug, Clone, PartialEq)]
pub struct RingMotif {
    pub id: String,
    /// Distance from the center on the unit disc.
    pub radius: f64,
    /// Angular offset of instance 0, in degrees.
    pub angle: f64,
    pub multiplicity: u32,
    pub scale: f64,
}

impl RingMotif {
    /// Number of instances this motif expands to: `max(grid_order * multiplicity, 1)`.
    ///
    /// Callers building motifs directly keep `multiplicity` within
    /// [`MAX_MULTIPLICITY`]; documents loaded through the state module are
    /// checked on normalization.
    #[must_use]
    pub fn instance_count(&self, grid_order: NonZeroU32) -> usize {
        let count = u64::from(grid_order.get()) * u64::from(self.multiplicity);
        usize::try_from(count).unwrap_or(usize::MAX).max(1)
    }
}

/// One placed motif.
#[derive(Debug, Clone, PartialEq)]
pub enum Motif {
    Center(CenterMotif),
    Ring(RingMotif),
}

impl Motif {
    /// Build a ring motif.
    #[must_use]
    pub fn ring(id: impl Into<String>, radius: f64, angle: f64, multiplicity: u32) -> Self {
        Self::Ring(RingMotif {
            id: id.into(),
            radius,
            angle,
            multiplicity,
            scale: 1.0,
        })
    }

    /// Build a center motif.
    #[must_use]
    pub fn center(id: impl Into<String>) -> Self {
        Self::Center(CenterMotif {
            id: id.into(),
            scale: 1.0,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Center(m) => &m.id,
            Self::Ring(m) => &m.id,
        }
    }

    #[must_use]
    pub const fn is_center(&self) -> bool {
        matches!(self, Self::Center(_))
    }

    #[must_use]
    pub const fn as_ring(&self) -> Option<&RingMotif> {
        match self {
            Self::Ring(m) => Some(m),
            Self::Center(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Global parameters
// ---------------------------------------------------------------------------

/// Which edge families the graph builder emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeTopology {
    /// Link each node to its nearest node in the next-inward layer.
    #[serde(default = "default_true")]
    pub radial: bool,
    /// Link sibling instances of one motif into a cycle.
    #[serde(default = "default_true")]
    pub ring: bool,
}

impl Default for EdgeTopology {
    fn default() -> Self {
        Self {
            radial: true,
            ring: true,
        }
    }
}

const fn default_true() -> bool {
    true
}

/// How ring motifs are partitioned into concentric layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerStrategy {
    /// Sorted motifs join the current layer while consecutive radii differ
    /// by less than the tolerance. Drifting radii can chain.
    #[default]
    Pairwise,
    /// Motifs share a layer when `floor(radius / tolerance)` matches.
    Quantized,
}

impl LayerStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pairwise => "pairwise",
            Self::Quantized => "quantized",
        }
    }
}

/// Parameters shared by every motif in one rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalParams {
    pub grid_order: NonZeroU32,
    pub topology: EdgeTopology,
}

impl GlobalParams {
    #[must_use]
    pub const fn new(grid_order: NonZeroU32, topology: EdgeTopology) -> Self {
        Self {
            grid_order,
            topology,
        }
    }

    /// Build parameters from an unvalidated grid order, clamping values
    /// below 1 up to 1.
    #[must_use]
    pub fn clamped(grid_order: i64, topology: EdgeTopology) -> Self {
        Self::new(clamp_grid_order(grid_order), topology)
    }
}

/// Clamp a raw grid order to the valid range `1..=MAX_GRID_ORDER`.
#[must_use]
pub fn clamp_grid_order(raw: i64) -> NonZeroU32 {
    let clamped =
        u32::try_from(raw.clamp(1, i64::from(MAX_GRID_ORDER))).unwrap_or(MAX_GRID_ORDER);
    if i64::from(clamped) != raw {
        warn!(raw, clamped, "grid order out of range; clamped");
    }
    NonZeroU32::new(clamped).unwrap_or(NonZeroU32::MIN)
}
