//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node lies on shortest paths
//! between other pairs of nodes. High-betweenness nodes are the spokes and
//! hubs holding the layout together: removing them splits it apart.
//!
//! # Algorithm
//!
//! Brandes' algorithm (2001) for unweighted graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    `σ` and predecessor lists.
//! 2. Accumulate dependencies in reverse BFS order (farthest nodes first):
//!    `δ[v] += (σ[v] / σ[w]) * (1 + δ[w])` for each predecessor `v` of `w`.
//! 3. Add `δ[w]` into the score of every `w ≠ s`.
//!
//! Complexity: O(V * E).
//!
//! # Output
//!
//! Scores are **not** halved. The graph is undirected, so every unordered
//! pair `{a, b}` is accumulated once from source `a` and once from source
//! `b`: the center of a 5-node star scores 12 (6 leaf pairs, each counted
//! from both ends). Parallel edges are walked once per entry, so they
//! multiply the shortest-path counts through them.

use std::collections::{HashMap, VecDeque};

use tracing::instrument;

use crate::graph::AdjacencyIndex;

/// Betweenness per node, in index order.
#[must_use]
pub fn betweenness_scores(adj: &AdjacencyIndex) -> Vec<f64> {
    let n = adj.len();
    let mut cb: Vec<f64> = vec![0.0; n];

    for s in 0..n {
        // Stack: nodes in order of discovery (farthest popped first).
        let mut stack: Vec<usize> = Vec::with_capacity(n);

        // predecessors[w] = nodes immediately preceding w on shortest paths from s.
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];

        // sigma[t]: number of shortest paths from s to t.
        let mut sigma: Vec<f64> = vec![0.0; n];
        sigma[s] = 1.0;

        // dist[t]: distance from s to t (-1 = unvisited).
        let mut dist: Vec<i64> = vec![-1; n];
        dist[s] = 0;

        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);

            for &w in adj.neighbors(v) {
                // First visit to w?
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        let mut delta: Vec<f64> = vec![0.0; n];

        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                if sigma[w] > 0.0 {
                    delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                }
            }

            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    cb
}

/// Betweenness per node id.
///
/// Disconnected nodes and nodes with no shortest paths through them score 0.
#[must_use]
#[instrument(skip(adj), fields(nodes = adj.len()))]
pub fn betweenness_centrality(adj: &AdjacencyIndex) -> HashMap<String, f64> {
    adj.label(&betweenness_scores(adj))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make(nodes: &[&str], edges: &[(&str, &str)]) -> AdjacencyIndex {
        AdjacencyIndex::from_edge_list(nodes, edges)
    }

    #[test]
    fn empty_graph_returns_empty() {
        let bc = betweenness_centrality(&AdjacencyIndex::default());
        assert!(bc.is_empty());
    }

    #[test]
    fn single_node_zero_betweenness() {
        let bc = betweenness_centrality(&make(&["A"], &[]));
        assert_eq!(bc.get("A"), Some(&0.0));
    }

    #[test]
    fn path_of_three_middle_node() {
        // A - B - C
        // B lies on the A..C path, counted from A and from C.
        let bc = betweenness_centrality(&make(&["A", "B", "C"], &[("A", "B"), ("B", "C")]));

        assert!((bc["A"] - 0.0).abs() < 1e-10, "A is an endpoint");
        assert!((bc["B"] - 2.0).abs() < 1e-10, "B: got {}", bc["B"]);
        assert!((bc["C"] - 0.0).abs() < 1e-10, "C is an endpoint");
    }

    #[test]
    fn star_center_counts_each_pair_from_both_ends() {
        // C at the center of four leaves: 6 leaf pairs, each seen twice.
        let bc = betweenness_centrality(&make(
            &["C", "L1", "L2", "L3", "L4"],
            &[("L1", "C"), ("L2", "C"), ("L3", "C"), ("L4", "C")],
        ));

        assert!((bc["C"] - 12.0).abs() < 1e-10, "center: got {}", bc["C"]);
        for leaf in ["L1", "L2", "L3", "L4"] {
            assert!(bc[leaf].abs() < 1e-10, "{leaf} should be 0");
        }
    }

    #[test]
    fn square_cycle_splits_paths() {
        // A - B - C - D - A
        // Each opposite pair has two shortest paths; each side node carries
        // half of one pair, from both ends → 1.0.
        let bc = betweenness_centrality(&make(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")],
        ));
        for id in ["A", "B", "C", "D"] {
            assert!((bc[id] - 1.0).abs() < 1e-10, "{id}: got {}", bc[id]);
        }
    }

    #[test]
    fn chain_of_four() {
        // A - B - C - D
        // B lies on A..C and A..D; C lies on A..D and B..D. Doubled.
        let bc = betweenness_centrality(&make(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("C", "D")],
        ));
        assert!((bc["B"] - 4.0).abs() < 1e-10, "B: got {}", bc["B"]);
        assert!((bc["C"] - 4.0).abs() < 1e-10, "C: got {}", bc["C"]);
        assert!(bc["A"].abs() < 1e-10);
        assert!(bc["D"].abs() < 1e-10);
    }

    #[test]
    fn disconnected_components_no_cross_betweenness() {
        let bc = betweenness_centrality(&make(&["A", "B", "C", "D"], &[("A", "B"), ("C", "D")]));
        for id in ["A", "B", "C", "D"] {
            assert!(bc[id].abs() < 1e-10, "{id} betweenness = 0 in disconnected pairs");
        }
    }

    #[test]
    fn isolated_node_zero() {
        let bc = betweenness_centrality(&make(
            &["A", "B", "C", "X"],
            &[("A", "B"), ("B", "C")],
        ));
        assert_eq!(bc["X"], 0.0);
    }
}
