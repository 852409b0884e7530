//! Saved-state document and its normalization into core input.
//!
//! The editor persists a mandala as JSON:
//!
//! ```json
//! {
//!   "gridOrder": 8,
//!   "globalInvert": false,
//!   "edgeTopology": { "radial": true, "ring": true },
//!   "motifs": [
//!     { "id": "1718000000000", "url": "primitives/001.png",
//!       "config": { "radius": 0.5, "angle": 0, "scale": 0.5, "multiplicity": 1,
//!                   "rotation": 0, "flip": false, "invert": false, "color": "#000000" } }
//!   ]
//! }
//! ```
//!
//! Rendering-only fields (`url`, `color`, `rotation`, `flip`, `invert`,
//! `globalInvert`) are accepted and ignored. Motif parameters may also sit
//! directly on the motif object instead of under `config`.
//!
//! [`MandalaState::normalize`] applies the input contract: grid order clamped
//! to at least 1, missing multiplicity defaulting to 1, and `multiplicity == 0`
//! or `isCenter` marking a center motif. Grid orders above
//! [`MAX_GRID_ORDER`] and multiplicities above [`MAX_MULTIPLICITY`] are
//! rejected.

use std::collections::HashSet;
use std::num::NonZeroU32;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument};

use crate::config::TopologyConfig;
use crate::error::StateError;
use crate::model::{
    CenterMotif, DEFAULT_GRID_ORDER, MAX_GRID_ORDER, MAX_MULTIPLICITY, Motif, RingMotif,
    clamp_grid_order,
};

/// Default file name written by the editor's "download JSON" action.
pub const STATE_FILE_NAME: &str = "mandala_state.json";

const DEFAULT_RADIUS: f64 = 0.5;
const DEFAULT_SCALE: f64 = 0.5;

/// The persisted editor state, as found on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MandalaState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_topology: Option<TopologyConfig>,
    #[serde(default)]
    pub motifs: Vec<MotifRecord>,
}

/// One motif entry in the saved state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotifRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<MotifParams>,
    #[serde(flatten)]
    pub inline: MotifParams,
}

/// Geometric parameters of a motif. Every field is optional in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotifParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplicity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_center: Option<bool>,
}

impl MotifParams {
    /// Fields from `self`, falling back to `other` where unset.
    fn or(&self, other: &Self) -> Self {
        Self {
            radius: self.radius.or(other.radius),
            angle: self.angle.or(other.angle),
            multiplicity: self.multiplicity.or(other.multiplicity),
            scale: self.scale.or(other.scale),
            is_center: self.is_center.or(other.is_center),
        }
    }
}

/// Normalized core input extracted from a [`MandalaState`].
#[derive(Debug, Clone, PartialEq)]
pub struct StateInput {
    pub motifs: Vec<Motif>,
    pub grid_order: NonZeroU32,
    /// Topology keys stored in the document. Callers merge these key by key
    /// over the configured topology.
    pub topology: TopologyConfig,
}

impl MandalaState {
    /// Parse a state document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid state document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parse mandala state JSON")
    }

    /// Read and parse a state document from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let state: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!(motifs = state.motifs.len(), "loaded mandala state");
        Ok(state)
    }

    /// Apply the input contract and produce typed core input.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] for duplicate motif ids, non-finite numeric
    /// fields, a multiplicity outside `0..=MAX_MULTIPLICITY`, or a grid order
    /// above [`MAX_GRID_ORDER`].
    pub fn normalize(&self) -> Result<StateInput, StateError> {
        if let Some(value) = self.grid_order.filter(|&g| g > i64::from(MAX_GRID_ORDER)) {
            return Err(StateError::GridOrderTooLarge {
                value,
                max: MAX_GRID_ORDER,
            });
        }
        let grid_order = self
            .grid_order
            .map_or_else(|| clamp_grid_order(i64::from(DEFAULT_GRID_ORDER)), clamp_grid_order);

        let mut seen: HashSet<&str> = HashSet::with_capacity(self.motifs.len());
        let mut motifs = Vec::with_capacity(self.motifs.len());

        for record in &self.motifs {
            if !seen.insert(record.id.as_str()) {
                return Err(StateError::DuplicateMotifId(record.id.clone()));
            }
            motifs.push(record.to_motif()?);
        }

        Ok(StateInput {
            motifs,
            grid_order,
            topology: self.edge_topology.unwrap_or_default(),
        })
    }
}

impl MotifRecord {
    fn params(&self) -> MotifParams {
        self.config
            .as_ref()
            .map_or_else(|| self.inline.clone(), |config| config.or(&self.inline))
    }

    fn to_motif(&self) -> Result<Motif, StateError> {
        let params = self.params();

        let radius = finite(&self.id, "radius", params.radius.unwrap_or(DEFAULT_RADIUS))?;
        let angle = finite(&self.id, "angle", params.angle.unwrap_or(0.0))?;
        let scale = finite(&self.id, "scale", params.scale.unwrap_or(DEFAULT_SCALE))?;

        let raw_multiplicity = params.multiplicity.unwrap_or(1);
        let Some(multiplicity) = u32::try_from(raw_multiplicity)
            .ok()
            .filter(|&m| m <= MAX_MULTIPLICITY)
        else {
            return Err(StateError::MultiplicityOutOfRange {
                id: self.id.clone(),
                value: raw_multiplicity,
                max: MAX_MULTIPLICITY,
            });
        };

        if params.is_center.unwrap_or(false) || multiplicity == 0 {
            return Ok(Motif::Center(CenterMotif {
                id: self.id.clone(),
                scale,
            }));
        }

        Ok(Motif::Ring(RingMotif {
            id: self.id.clone(),
            radius,
            angle,
            multiplicity,
            scale,
        }))
    }
}

fn finite(id: &str, field: &'static str, value: f64) -> Result<f64, StateError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StateError::NonFinite {
            id: id.to_string(),
            field,
            value,
        })
    }
}

/// Motif ids are strings in the editor but older exports wrote numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}
