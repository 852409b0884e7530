//! Degree centrality: the length of each node's neighbor list.
//!
//! Parallel edges count once per edge, so a two-instance ring contributes
//! degree 2 to each of its nodes.

use std::collections::HashMap;

use crate::graph::AdjacencyIndex;

/// Degree per node, in index order.
#[must_use]
pub fn degree_scores(adj: &AdjacencyIndex) -> Vec<usize> {
    (0..adj.len()).map(|i| adj.degree(i)).collect()
}

/// Degree per node id.
#[must_use]
pub fn degree_centrality(adj: &AdjacencyIndex) -> HashMap<String, usize> {
    adj.label(&degree_scores(adj))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_returns_empty() {
        assert!(degree_centrality(&AdjacencyIndex::default()).is_empty());
    }

    #[test]
    fn path_degrees() {
        let adj = AdjacencyIndex::from_edge_list(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let d = degree_centrality(&adj);
        assert_eq!(d["a"], 1);
        assert_eq!(d["b"], 2);
        assert_eq!(d["c"], 1);
    }

    #[test]
    fn isolated_node_has_zero_degree() {
        let adj = AdjacencyIndex::from_edge_list(&["a", "b", "lonely"], &[("a", "b")]);
        assert_eq!(degree_centrality(&adj)["lonely"], 0);
    }

    #[test]
    fn parallel_edges_count_twice() {
        let adj = AdjacencyIndex::from_edge_list(&["a", "b"], &[("a", "b"), ("b", "a")]);
        assert_eq!(degree_scores(&adj), [2, 2]);
    }
}
