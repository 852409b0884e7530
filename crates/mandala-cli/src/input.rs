//! Loading the layout every command works on.
//!
//! Parameters are merged with this precedence (highest wins):
//! CLI flag > state file > project config > user config > defaults.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, ValueEnum};
use mandala_core::config::{EffectiveConfig, TopologyConfig};
use mandala_core::model::MAX_GRID_ORDER;
use mandala_core::state::STATE_FILE_NAME;
use mandala_core::{ErrorCode, GlobalParams, LayerStrategy, MandalaState, Motif, StateInput};
use mandala_graph::graph::{LayerGrouping, LayerPartition, group_layers};
use mandala_graph::{MandalaGraph, rebuild_graph};
use tracing::{debug, info};

use crate::output::{CliError, OutputMode, render_error};

/// Layer grouping strategy as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Pairwise,
    Quantized,
}

impl From<StrategyArg> for LayerStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Pairwise => Self::Pairwise,
            StrategyArg::Quantized => Self::Quantized,
        }
    }
}

/// Flags shared by every layout command.
#[derive(Args, Debug, Clone, Default)]
pub struct LayoutArgs {
    /// Saved state file [default: ./mandala_state.json].
    #[arg(long, global = true, value_name = "PATH")]
    pub state: Option<PathBuf>,

    /// Override the grid order (values below 1 are clamped to 1; at most 1024).
    #[arg(
        long,
        global = true,
        value_name = "N",
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(..=i64::from(MAX_GRID_ORDER))
    )]
    pub grid_order: Option<i64>,

    /// Emit radial edges (true/false).
    #[arg(long, global = true, value_name = "BOOL")]
    pub radial: Option<bool>,

    /// Emit ring edges (true/false).
    #[arg(long, global = true, value_name = "BOOL")]
    pub ring: Option<bool>,

    /// Layer grouping strategy.
    #[arg(long, global = true, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Radius tolerance for layer grouping.
    #[arg(long, global = true, value_name = "R", value_parser = parse_tolerance)]
    pub tolerance: Option<f64>,
}

fn parse_tolerance(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|e| format!("invalid tolerance '{raw}': {e}"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("tolerance must be a positive number, got {raw}"))
    }
}

/// A fully resolved layout ready to group and build.
#[derive(Debug, Clone)]
pub struct Layout {
    pub state_path: PathBuf,
    pub motifs: Vec<Motif>,
    pub params: GlobalParams,
    pub grouping: LayerGrouping,
    pub config: EffectiveConfig,
}

impl Layout {
    pub fn partition(&self) -> LayerPartition {
        group_layers(&self.motifs, self.grouping)
    }

    pub fn graph(&self) -> MandalaGraph {
        rebuild_graph(&self.motifs, &self.params, self.grouping)
    }
}

/// Path of the state file: `--state`, else `mandala_state.json` in `project_root`.
pub fn state_path(args: &LayoutArgs, project_root: &Path) -> PathBuf {
    args.state
        .clone()
        .unwrap_or_else(|| project_root.join(STATE_FILE_NAME))
}

/// Merge the normalized state, the effective config, and CLI overrides.
pub fn resolve_params(
    args: &LayoutArgs,
    input: &StateInput,
    config: &EffectiveConfig,
) -> (GlobalParams, LayerGrouping) {
    let flags = TopologyConfig {
        radial: args.radial,
        ring: args.ring,
    };
    let topology = flags.over(input.topology.over(config.topology));

    let params = args.grid_order.map_or(
        GlobalParams::new(input.grid_order, topology),
        |order| GlobalParams::clamped(order, topology),
    );

    let grouping = LayerGrouping {
        tolerance: args.tolerance.unwrap_or(config.layer_tolerance),
        strategy: args
            .strategy
            .map_or(config.layer_strategy, LayerStrategy::from),
    };

    (params, grouping)
}

/// Load and normalize the state file, rendering a structured error on
/// failure.
///
/// # Errors
///
/// Returns an error if the state file is missing, malformed, or holds
/// motifs that cannot be normalized.
pub fn load_layout(
    args: &LayoutArgs,
    config: &EffectiveConfig,
    project_root: &Path,
    output: OutputMode,
) -> Result<Layout> {
    let path = state_path(args, project_root);

    if !path.exists() {
        render_error(
            output,
            &CliError::from_code(
                ErrorCode::StateNotFound,
                format!("state file not found: {}", path.display()),
            ),
        )?;
        anyhow::bail!("state file not found: {}", path.display());
    }

    let state = match MandalaState::load(&path) {
        Ok(state) => state,
        Err(e) => {
            render_error(
                output,
                &CliError::from_code(ErrorCode::StateParseError, format!("{e:#}")),
            )?;
            return Err(e);
        }
    };

    let input = match state.normalize() {
        Ok(input) => input,
        Err(e) => {
            render_error(output, &CliError::from(&e))?;
            return Err(e.into());
        }
    };

    let (params, grouping) = resolve_params(args, &input, config);
    debug!(
        strategy = grouping.strategy.as_str(),
        tolerance = grouping.tolerance,
        "layer grouping"
    );
    info!(
        path = %path.display(),
        motifs = input.motifs.len(),
        grid_order = params.grid_order.get(),
        radial = params.topology.radial,
        ring = params.topology.ring,
        "loaded layout"
    );

    Ok(Layout {
        state_path: path,
        motifs: input.motifs,
        params,
        grouping,
        config: config.clone(),
    })
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use mandala_core::EdgeTopology;

    use super::*;

    const BOTH: TopologyConfig = TopologyConfig {
        radial: Some(true),
        ring: Some(true),
    };

    fn input(topology: TopologyConfig) -> StateInput {
        StateInput {
            motifs: vec![Motif::ring("a", 0.5, 0.0, 1)],
            grid_order: NonZeroU32::new(6).expect("non-zero"),
            topology,
        }
    }

    #[test]
    fn defaults_come_from_state_and_config() {
        let (params, grouping) = resolve_params(
            &LayoutArgs::default(),
            &input(TopologyConfig::default()),
            &EffectiveConfig::default(),
        );
        assert_eq!(params.grid_order.get(), 6);
        assert_eq!(params.topology, EdgeTopology::default());
        assert_eq!(grouping, LayerGrouping::default());
    }

    #[test]
    fn state_topology_beats_config() {
        let config = EffectiveConfig {
            topology: EdgeTopology {
                radial: false,
                ring: false,
            },
            ..EffectiveConfig::default()
        };
        let (params, _) = resolve_params(
            &LayoutArgs::default(),
            &input(BOTH),
            &config,
        );
        assert!(params.topology.radial && params.topology.ring);
    }

    #[test]
    fn partial_state_topology_keeps_config_for_other_key() {
        let config = EffectiveConfig {
            topology: EdgeTopology {
                radial: false,
                ring: true,
            },
            ..EffectiveConfig::default()
        };
        let state = TopologyConfig {
            radial: None,
            ring: Some(false),
        };
        let (params, _) = resolve_params(&LayoutArgs::default(), &input(state), &config);
        assert_eq!(
            params.topology,
            EdgeTopology {
                radial: false,
                ring: false
            }
        );
    }

    #[test]
    fn flags_beat_state() {
        let args = LayoutArgs {
            grid_order: Some(-4),
            ring: Some(false),
            strategy: Some(StrategyArg::Quantized),
            tolerance: Some(0.05),
            ..LayoutArgs::default()
        };
        let (params, grouping) = resolve_params(
            &args,
            &input(BOTH),
            &EffectiveConfig::default(),
        );
        assert_eq!(params.grid_order.get(), 1);
        assert!(params.topology.radial);
        assert!(!params.topology.ring);
        assert_eq!(grouping.strategy, LayerStrategy::Quantized);
        assert!((grouping.tolerance - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn tolerance_must_be_positive() {
        assert!(parse_tolerance("0.02").is_ok());
        assert!(parse_tolerance("0").is_err());
        assert!(parse_tolerance("-1").is_err());
        assert!(parse_tolerance("abc").is_err());
    }

    #[test]
    fn state_path_defaults_to_project_root() {
        let root = Path::new("/tmp/project");
        assert_eq!(
            state_path(&LayoutArgs::default(), root),
            root.join("mandala_state.json")
        );
    }
}
