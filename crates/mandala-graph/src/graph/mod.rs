//! Layout graph module.
//!
//! # Overview
//!
//! Translates a motif layout into an undirected petgraph graph plus the
//! [`AdjacencyIndex`] used by the centrality metrics. Every rebuild is a pure
//! function of the motifs and global parameters; nothing is cached between
//! calls.
//!
//! ## Pipeline
//!
//! ```text
//! [Motif]
//!        ↓  layers::group_layers()
//! LayerPartition
//!        ↓  build::build_graph()
//! MandalaGraph
//!   ├─ graph:     UnGraph<Node, EdgeKind> (construction order)
//!   └─ adjacency: AdjacencyIndex (one entry per edge endpoint)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (edge counts by kind, components, fingerprint, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use mandala_core::{EdgeTopology, GlobalParams, Motif};
//! use mandala_graph::graph::{layers::LayerGrouping, rebuild_graph, stats::GraphStats};
//!
//! let motifs = vec![Motif::center("hub"), Motif::ring("petal", 0.5, 0.0, 1)];
//! let params = GlobalParams::clamped(6, EdgeTopology::default());
//! let graph = rebuild_graph(&motifs, &params, LayerGrouping::default());
//! let stats = GraphStats::from_graph(&graph);
//!
//! assert_eq!(stats.node_count, 7);
//! ```

pub mod adjacency;
pub mod build;
pub mod diagnostics;
pub mod layers;
pub mod stats;

// Re-export primary types at module level for convenience.
pub use adjacency::AdjacencyIndex;
pub use build::{CENTER_NODE_ID, EdgeKind, MandalaGraph, Node, Position, build_graph, rebuild_graph};
pub use layers::{Layer, LayerGrouping, LayerPartition, group_layers};
pub use stats::GraphStats;
