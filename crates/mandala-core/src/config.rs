use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::model::{EdgeTopology, LayerStrategy};

/// Radius tolerance for grouping ring motifs into one layer.
pub const DEFAULT_LAYER_TOLERANCE: f64 = 0.01;

/// Decimal places for floats in exported tables.
pub const DEFAULT_EXPORT_PRECISION: usize = 4;

/// One configuration file. Every key is optional so project and user files
/// can be layered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub topology: TopologyConfig,
    #[serde(default)]
    pub layers: LayerConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub output: Option<String>,
}

/// Edge topology with every key optional, so each source can set one key
/// and leave the other to a lower-precedence layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radial: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring: Option<bool>,
}

impl TopologyConfig {
    /// Keys set here, falling back to `base` key by key.
    #[must_use]
    pub fn over(self, base: EdgeTopology) -> EdgeTopology {
        EdgeTopology {
            radial: self.radial.unwrap_or(base.radial),
            ring: self.ring.unwrap_or(base.ring),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    #[serde(default)]
    pub tolerance: Option<f64>,
    #[serde(default)]
    pub strategy: Option<LayerStrategy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub precision: Option<usize>,
}

/// Configuration after merging project and user files over the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub topology: EdgeTopology,
    pub layer_tolerance: f64,
    pub layer_strategy: LayerStrategy,
    pub export_precision: usize,
    pub output: Option<String>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            topology: EdgeTopology::default(),
            layer_tolerance: DEFAULT_LAYER_TOLERANCE,
            layer_strategy: LayerStrategy::default(),
            export_precision: DEFAULT_EXPORT_PRECISION,
            output: None,
        }
    }
}

impl EffectiveConfig {
    /// Merge `project` over `user` over the built-in defaults.
    #[must_use]
    pub fn merge(project: &ConfigFile, user: &ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            topology: project.topology.over(user.topology.over(defaults.topology)),
            layer_tolerance: project
                .layers
                .tolerance
                .or(user.layers.tolerance)
                .filter(|t| t.is_finite() && *t > 0.0)
                .unwrap_or(defaults.layer_tolerance),
            layer_strategy: project
                .layers
                .strategy
                .or(user.layers.strategy)
                .unwrap_or(defaults.layer_strategy),
            export_precision: project
                .export
                .precision
                .or(user.export.precision)
                .unwrap_or(defaults.export_precision),
            output: project.output.clone().or_else(|| user.output.clone()),
        }
    }
}

fn load_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ConfigFile>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load `.mandala/config.toml` under `project_root`, or defaults if absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ConfigFile> {
    load_config_file(&project_root.join(".mandala/config.toml"))
}

/// Load `<config_dir>/mandala/config.toml`, or defaults if absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<ConfigFile> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ConfigFile::default());
    };
    load_config_file(&config_dir.join("mandala/config.toml"))
}

/// Resolve the effective configuration for `project_root`.
///
/// # Errors
///
/// Returns an error if either config file is malformed.
pub fn resolve_config(project_root: &Path) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;
    Ok(EffectiveConfig::merge(&project, &user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_project_config_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_project_config(dir.path()).expect("load");
        assert_eq!(cfg, ConfigFile::default());
    }

    #[test]
    fn project_config_parses_sections() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join(".mandala")).expect("mkdir");
        std::fs::write(
            dir.path().join(".mandala/config.toml"),
            "[topology]\nring = false\n\n[layers]\ntolerance = 0.02\nstrategy = \"quantized\"\n\n[export]\nprecision = 6\n",
        )
        .expect("write");

        let cfg = load_project_config(dir.path()).expect("load");
        assert_eq!(cfg.topology.ring, Some(false));
        assert_eq!(cfg.topology.radial, None);
        assert_eq!(cfg.layers.strategy, Some(LayerStrategy::Quantized));
        assert_eq!(cfg.export.precision, Some(6));
    }

    #[test]
    fn malformed_project_config_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join(".mandala")).expect("mkdir");
        std::fs::write(dir.path().join(".mandala/config.toml"), "[topology\n").expect("write");
        assert!(load_project_config(dir.path()).is_err());
    }

    #[test]
    fn project_overrides_user() {
        let project = ConfigFile {
            topology: TopologyConfig {
                radial: Some(false),
                ring: None,
            },
            ..ConfigFile::default()
        };
        let user = ConfigFile {
            topology: TopologyConfig {
                radial: Some(true),
                ring: Some(false),
            },
            export: ExportConfig { precision: Some(2) },
            ..ConfigFile::default()
        };

        let eff = EffectiveConfig::merge(&project, &user);
        assert!(!eff.topology.radial);
        assert!(!eff.topology.ring);
        assert_eq!(eff.export_precision, 2);
        assert!((eff.layer_tolerance - DEFAULT_LAYER_TOLERANCE).abs() < f64::EPSILON);
    }

    #[test]
    fn topology_keys_fall_back_independently() {
        let partial = TopologyConfig {
            radial: None,
            ring: Some(false),
        };
        let base = EdgeTopology {
            radial: false,
            ring: true,
        };
        assert_eq!(
            partial.over(base),
            EdgeTopology {
                radial: false,
                ring: false
            }
        );
        assert_eq!(TopologyConfig::default().over(base), base);
    }

    #[test]
    fn non_positive_tolerance_falls_back_to_default() {
        let project = ConfigFile {
            layers: LayerConfig {
                tolerance: Some(0.0),
                strategy: None,
            },
            ..ConfigFile::default()
        };
        let eff = EffectiveConfig::merge(&project, &ConfigFile::default());
        assert!((eff.layer_tolerance - DEFAULT_LAYER_TOLERANCE).abs() < f64::EPSILON);
    }
}
