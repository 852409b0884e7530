#![forbid(unsafe_code)]

mod cmd;
mod input;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use mandala_core::ErrorCode;
use mandala_core::config::resolve_config;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "mandala: radial motif layouts as graphs, with centrality analysis",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for `--format json`).
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(flatten)]
    layout: input::LayoutArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Inspect",
        about = "Show how motifs group into layers",
        long_about = "Sort ring motifs by radius and group them into concentric layers.",
        after_help = "EXAMPLES:\n    # Layers of ./mandala_state.json\n    mandala layers\n\n    # Use bucketed grouping with a wider tolerance\n    mandala layers --strategy quantized --tolerance 0.05"
    )]
    Layers,

    #[command(
        next_help_heading = "Inspect",
        about = "Build the layout graph and summarize it",
        long_about = "Build the layout graph and print node/edge counts, components, and a fingerprint.",
        after_help = "EXAMPLES:\n    # Summary\n    mandala graph\n\n    # Every node and edge, ring edges only\n    mandala graph --nodes --edges --radial false"
    )]
    Graph(cmd::graph::GraphArgs),

    #[command(
        next_help_heading = "Analyze",
        about = "Compute centrality for every node",
        long_about = "Compute degree, closeness, betweenness, and eigenvector centrality for every node.",
        after_help = "EXAMPLES:\n    # Full table\n    mandala analyze\n\n    # Five most central nodes by betweenness\n    mandala analyze --sort-by betweenness --top 5\n\n    # CSV\n    mandala analyze --csv > analysis.csv"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        next_help_heading = "Analyze",
        about = "Export connectivity, CSV, or graph JSON",
        long_about = "Write the connectivity list, the centrality CSV, or the graph JSON to stdout or a file.",
        after_help = "EXAMPLES:\n    # Adjacency list for numeric tools\n    mandala export connectivity -o mandala_connectivity.json\n\n    # Centrality table\n    mandala export csv > mandala_centrality_analysis.csv"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Analyze",
        about = "Check a layout for structural surprises",
        long_about = "Report isolated nodes, ignored center motifs, disconnected components, and spoke-rule divergence.",
        after_help = "EXAMPLES:\n    # Diagnose ./mandala_state.json\n    mandala diagnose\n\n    # Machine-readable\n    mandala diagnose --json"
    )]
    Diagnose,

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    mandala completions bash\n\n    # Generate zsh completions\n    mandala completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("MANDALA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "mandala=debug,info"
        } else {
            "mandala=info,warn"
        })
    });

    let format = env::var("MANDALA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Completions(ref args) = cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let project_root = env::current_dir()?;

    let config = match resolve_config(&project_root) {
        Ok(config) => config,
        Err(e) => {
            let mode = resolve_output_mode(cli.format, cli.json, None);
            render_error(
                mode,
                &CliError::from_code(ErrorCode::ConfigParseError, format!("{e:#}")),
            )?;
            return Err(e);
        }
    };
    let output = resolve_output_mode(cli.format, cli.json, config.output.as_deref());
    debug!(?output, "output mode");

    let layout = input::load_layout(&cli.layout, &config, &project_root, output)?;

    match cli.command {
        Commands::Layers => cmd::layers::run_layers(&layout, output),
        Commands::Graph(ref args) => cmd::graph::run_graph(args, &layout, output),
        Commands::Analyze(ref args) => cmd::analyze::run_analyze(args, &layout, output),
        Commands::Export(ref args) => cmd::export::run_export(args, &layout, output),
        Commands::Diagnose => cmd::diagnose::run_diagnose(&layout, output),
        Commands::Completions(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandala_graph::Metric;

    #[test]
    fn verify_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::parse_from(["mandala", "analyze", "--json"]);
        assert!(cli.json);
        assert_eq!(
            resolve_output_mode(cli.format, cli.json, None),
            OutputMode::Json
        );
    }

    #[test]
    fn layout_flags_are_global() {
        let cli = Cli::parse_from([
            "mandala",
            "graph",
            "--state",
            "layout.json",
            "--grid-order",
            "12",
            "--ring",
            "false",
            "--strategy",
            "quantized",
        ]);
        assert_eq!(cli.layout.grid_order, Some(12));
        assert_eq!(cli.layout.ring, Some(false));
        assert_eq!(cli.layout.radial, None);
        assert_eq!(cli.layout.strategy, Some(input::StrategyArg::Quantized));
        assert_eq!(
            cli.layout.state.as_deref(),
            Some(std::path::Path::new("layout.json"))
        );
    }

    #[test]
    fn negative_grid_order_parses() {
        let cli = Cli::parse_from(["mandala", "--grid-order", "-3", "layers"]);
        assert_eq!(cli.layout.grid_order, Some(-3));
    }

    #[test]
    fn analyze_parses_sort_and_top() {
        let cli = Cli::parse_from(["mandala", "analyze", "--sort-by", "eigenvector", "--top", "3"]);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.sort_by, Some(Metric::Eigenvector));
        assert_eq!(args.top, Some(3));
    }

    #[test]
    fn non_positive_tolerance_rejected() {
        assert!(Cli::try_parse_from(["mandala", "layers", "--tolerance", "0"]).is_err());
    }

    #[test]
    fn oversized_grid_order_rejected() {
        assert!(Cli::try_parse_from(["mandala", "layers", "--grid-order", "1025"]).is_err());
        assert!(Cli::try_parse_from(["mandala", "layers", "--grid-order", "4294967295"]).is_err());
        let cli = Cli::parse_from(["mandala", "layers", "--grid-order", "1024"]);
        assert_eq!(cli.layout.grid_order, Some(1024));
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["mandala", "layers"],
            vec!["mandala", "graph", "--nodes"],
            vec!["mandala", "analyze", "--csv"],
            vec!["mandala", "export", "connectivity"],
            vec!["mandala", "export", "csv", "-o", "out.csv"],
            vec!["mandala", "diagnose"],
            vec!["mandala", "completions", "bash"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(result.is_ok(), "Failed to parse: {args:?}: {:?}", result.err());
        }
    }
}
