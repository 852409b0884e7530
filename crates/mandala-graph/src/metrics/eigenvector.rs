//! Eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! Eigenvector centrality scores nodes on the idea that links to high-scoring
//! nodes count for more. It approximates the dominant eigenvector of the
//! adjacency matrix.
//!
//! # Algorithm
//!
//! 1. Initialize every score to 1.0.
//! 2. For each node `v`: `new(v) = Σ old(u)` over the entries of `v`'s
//!    neighbor list (parallel edges count once per entry).
//! 3. Normalize the vector to unit L2 norm.
//! 4. Repeat for a fixed number of iterations ([`DEFAULT_ITERATIONS`]).
//!
//! If a step produces an all-zero vector (no edges at all), iteration stops
//! and the scores keep their previous values.
//!
//! There is no convergence test: the iteration count is a fixed bound. On
//! bipartite layouts (even rings, stars) plain power iteration oscillates
//! and the scores after the last step may not have settled.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::graph::AdjacencyIndex;

/// Number of power-iteration steps.
pub const DEFAULT_ITERATIONS: usize = 20;

/// Result of eigenvector centrality computation.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenvectorResult {
    /// Scores in index order.
    pub scores: Vec<f64>,
    /// Number of iterations that updated the scores.
    pub iterations: usize,
    /// Whether iteration stopped early on a zero norm.
    pub degenerate: bool,
}

/// Run `max_iter` steps of power iteration over `adj`.
#[must_use]
pub fn power_iteration(adj: &AdjacencyIndex, max_iter: usize) -> EigenvectorResult {
    let n = adj.len();
    let mut scores: Vec<f64> = vec![1.0; n];
    let mut iterations = 0;
    let mut degenerate = false;

    for _ in 0..max_iter {
        let new_scores: Vec<f64> = (0..n)
            .map(|v| adj.neighbors(v).iter().map(|&u| scores[u]).sum())
            .collect();

        let norm: f64 = new_scores.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm <= 0.0 {
            debug!(iterations, "zero norm; stopping power iteration");
            degenerate = true;
            break;
        }

        scores = new_scores.into_iter().map(|x| x / norm).collect();
        iterations += 1;
    }

    EigenvectorResult {
        scores,
        iterations,
        degenerate,
    }
}

/// Eigenvector score per node, in index order, after [`DEFAULT_ITERATIONS`] steps.
#[must_use]
pub fn eigenvector_scores(adj: &AdjacencyIndex) -> Vec<f64> {
    power_iteration(adj, DEFAULT_ITERATIONS).scores
}

/// Eigenvector score per node id, after [`DEFAULT_ITERATIONS`] steps.
#[must_use]
#[instrument(skip(adj), fields(nodes = adj.len()))]
pub fn eigenvector_centrality(adj: &AdjacencyIndex) -> HashMap<String, f64> {
    adj.label(&eigenvector_scores(adj))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
