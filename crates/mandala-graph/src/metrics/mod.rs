//! Centrality metrics over an [`AdjacencyIndex`].
//!
//! # Overview
//!
//! Each metric answers a different question about a node's place in the
//! layout:
//!
//! - **Degree** (`degree`): how many direct links does it have?
//! - **Closeness** (`closeness`): how near is it to everything it can reach?
//! - **Betweenness** (`betweenness`): how many shortest paths run through it?
//! - **Eigenvector** (`eigenvector`): is it linked to other central nodes?
//!
//! # Usage
//!
//! All metrics are pure functions of an [`AdjacencyIndex`]. The `*_centrality`
//! functions return scores keyed by node id; the `*_scores` variants return a
//! vector in index order for callers that join several metrics row by row.
//! Degenerate inputs (isolated nodes, empty graphs) score 0 rather than
//! producing NaN or infinity.
//!
//! ```rust
//! use mandala_graph::graph::AdjacencyIndex;
//! use mandala_graph::metrics::betweenness::betweenness_centrality;
//! use mandala_graph::metrics::closeness::closeness_centrality;
//!
//! let adj = AdjacencyIndex::from_edge_list(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
//! let bc = betweenness_centrality(&adj);
//! let cc = closeness_centrality(&adj);
//! assert!(bc["b"] > bc["a"]);
//! assert!(cc["b"] > cc["a"]);
//! ```
//!
//! [`AdjacencyIndex`]: crate::graph::AdjacencyIndex

pub mod betweenness;
pub mod closeness;
pub mod degree;
pub mod eigenvector;
