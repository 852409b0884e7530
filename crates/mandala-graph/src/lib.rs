#![forbid(unsafe_code)]
//! mandala-graph library.
//!
//! Turns a declarative, radially-symmetric motif layout into an undirected
//! graph and scores every node with four centrality metrics.
//!
//! ```text
//! [Motif] + GlobalParams
//!        ↓  graph::layers::group_layers()
//! LayerPartition (center + rings in radius order)
//!        ↓  graph::build::build_graph()
//! MandalaGraph (nodes, radial/ring edges, AdjacencyIndex)
//!        ↓  analysis::analyze()
//! CentralityReport (one row per node)
//!        ↓  export::*
//! CSV / connectivity JSON / graph JSON
//! ```
//!
//! # Conventions
//!
//! - **Errors**: Graph construction and metrics are infallible; only the
//!   export writers return `std::io::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod analysis;
pub mod export;
pub mod graph;
pub mod metrics;

pub use analysis::{CentralityReport, CentralityRow, Metric, analyze};
pub use graph::{AdjacencyIndex, EdgeKind, MandalaGraph, rebuild_graph};
