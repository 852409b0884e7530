//! Basic statistics for a layout graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: totals, parallel edges included.
//! - **radial_edge_count** / **ring_edge_count**: edge totals per kind.
//! - **layer_count**: ring layers, excluding the center.
//! - **density**: `2E / (V * (V - 1))` for an undirected graph. Parallel edges
//!   can push this above 1.0 on tiny graphs. Zero for fewer than 2 nodes.
//! - **connected_component_count**: number of disjoint subgraphs.
//! - **isolated_node_count**: nodes with no edges.
//! - **max_degree**: largest neighbor-list length.
//! - **fingerprint**: BLAKE3 hash over node ids, layers, positions and the
//!   ordered edge list. Two rebuilds of an unchanged layout produce the same
//!   fingerprint.

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::graph::build::{EdgeKind, MandalaGraph};

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for a layout graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub radial_edge_count: usize,
    pub ring_edge_count: usize,
    pub layer_count: usize,
    pub density: f64,
    pub connected_component_count: usize,
    pub isolated_node_count: usize,
    pub max_degree: usize,
    pub fingerprint: String,
}

impl GraphStats {
    /// Compute statistics for `g`.
    #[must_use]
    pub fn from_graph(g: &MandalaGraph) -> Self {
        let node_count = g.node_count();
        let edge_count = g.edge_count();

        let radial_edge_count = g
            .indexed_edges()
            .filter(|&(_, _, kind)| kind == EdgeKind::Radial)
            .count();
        let ring_edge_count = edge_count - radial_edge_count;

        let adj = &g.adjacency;
        let isolated_node_count = (0..adj.len()).filter(|&i| adj.degree(i) == 0).count();
        let max_degree = (0..adj.len()).map(|i| adj.degree(i)).max().unwrap_or(0);

        Self {
            node_count,
            edge_count,
            radial_edge_count,
            ring_edge_count,
            layer_count: g.layer_count,
            density: compute_density(node_count, edge_count),
            connected_component_count: connected_components(&g.graph),
            isolated_node_count,
            max_degree,
            fingerprint: fingerprint(g),
        }
    }
}

/// Undirected density: `2E / (V * (V - 1))`.
#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    (2 * edge_count) as f64 / max_edges
}

/// BLAKE3 hash of the node list and the ordered edge list.
#[must_use]
pub fn fingerprint(g: &MandalaGraph) -> String {
    let mut hasher = blake3::Hasher::new();
    for node in g.nodes() {
        hasher.update(node.id.as_bytes());
        hasher.update(b"\x00");
        hasher.update(&node.layer.to_le_bytes());
        hasher.update(&node.position.x.to_bits().to_le_bytes());
        hasher.update(&node.position.y.to_bits().to_le_bytes());
    }
    hasher.update(b"\x01");
    for (source, target, kind) in g.indexed_edges() {
        hasher.update(&source.to_le_bytes());
        hasher.update(&target.to_le_bytes());
        hasher.update(kind.as_str().as_bytes());
        hasher.update(b"\n");
    }
    format!("blake3:{}", hasher.finalize().to_hex())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
