//! Closeness centrality, reach-normalized.
//!
//! # Algorithm
//!
//! For each source `s`, an unweighted BFS yields the distance to every node
//! reachable from `s`. The score is
//!
//! ```text
//! closeness(s) = reached / Σ dist(s, t)
//! ```
//!
//! where `reached` counts reachable nodes other than `s`. On a connected
//! graph this is the classic `(n - 1) / Σ dist`; on a disconnected graph it
//! only considers the source's own component instead of diverging to zero or
//! infinity. An isolated node (nothing reached) scores 0.
//!
//! Complexity: O(V * (V + E)).

use std::collections::{HashMap, VecDeque};

use tracing::instrument;

use crate::graph::AdjacencyIndex;

/// Closeness per node, in index order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_scores(adj: &AdjacencyIndex) -> Vec<f64> {
    let n = adj.len();
    let mut scores = vec![0.0; n];

    // Reused across sources; `usize::MAX` marks unvisited.
    let mut dist: Vec<usize> = vec![usize::MAX; n];
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);

    for (s, score) in scores.iter_mut().enumerate() {
        dist.fill(usize::MAX);
        dist[s] = 0;
        queue.clear();
        queue.push_back(s);

        let mut reached = 0usize;
        let mut total = 0usize;

        while let Some(u) = queue.pop_front() {
            for &v in adj.neighbors(u) {
                if dist[v] == usize::MAX {
                    dist[v] = dist[u] + 1;
                    total += dist[v];
                    reached += 1;
                    queue.push_back(v);
                }
            }
        }

        *score = if total == 0 {
            0.0
        } else {
            reached as f64 / total as f64
        };
    }

    scores
}

/// Closeness per node id.
#[must_use]
#[instrument(skip(adj), fields(nodes = adj.len()))]
pub fn closeness_centrality(adj: &AdjacencyIndex) -> HashMap<String, f64> {
    adj.label(&closeness_scores(adj))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_returns_empty() {
        assert!(closeness_centrality(&AdjacencyIndex::default()).is_empty());
    }

    #[test]
    fn single_node_zero_closeness() {
        let adj = AdjacencyIndex::with_nodes(["A"]);
        assert_eq!(closeness_centrality(&adj).get("A"), Some(&0.0));
    }

    #[test]
    fn path_of_three() {
        // A - B - C
        // B: 2 reached, distance sum 2 → 1.0
        // A: 2 reached, distance sum 1 + 2 = 3 → 2/3
        let adj = AdjacencyIndex::from_edge_list(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let cc = closeness_centrality(&adj);
        assert!((cc["B"] - 1.0).abs() < 1e-12);
        assert!((cc["A"] - 2.0 / 3.0).abs() < 1e-12);
        assert!((cc["C"] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn disconnected_components_use_own_reach() {
        // A - B and C - D - E, plus isolated F.
        let adj = AdjacencyIndex::from_edge_list(
            &["A", "B", "C", "D", "E", "F"],
            &[("A", "B"), ("C", "D"), ("D", "E")],
        );
        let cc = closeness_centrality(&adj);
        assert!((cc["A"] - 1.0).abs() < 1e-12, "1 reached at distance 1");
        assert!((cc["D"] - 1.0).abs() < 1e-12);
        assert!((cc["C"] - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(cc["F"], 0.0);
        assert!(cc.values().all(|v| v.is_finite()));
    }

    #[test]
    fn parallel_edges_do_not_change_distances() {
        let single = AdjacencyIndex::from_edge_list(&["A", "B"], &[("A", "B")]);
        let double = AdjacencyIndex::from_edge_list(&["A", "B"], &[("A", "B"), ("B", "A")]);
        assert_eq!(closeness_scores(&single), closeness_scores(&double));
    }
}
