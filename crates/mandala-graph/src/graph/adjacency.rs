//! Node-id-keyed neighbor lists consumed by every centrality metric.
//!
//! Nodes are held in a fixed order (construction order for a built graph)
//! and neighbors are stored as positions into that order. Every undirected
//! edge appends each endpoint to the other's list, so parallel edges show up
//! as repeated neighbor entries.

use std::collections::HashMap;

use tracing::debug;

/// Ordered node ids plus one neighbor list per node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyIndex {
    ids: Vec<String>,
    positions: HashMap<String, usize>,
    neighbors: Vec<Vec<usize>>,
}

impl AdjacencyIndex {
    /// Create an index over `ids` with no edges.
    ///
    /// A repeated id keeps its first position; later occurrences still get
    /// their own (initially empty) neighbor list.
    pub fn with_nodes<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        let mut positions = HashMap::with_capacity(ids.len());
        for (i, id) in ids.iter().enumerate() {
            positions.entry(id.clone()).or_insert(i);
        }
        let neighbors = vec![Vec::new(); ids.len()];
        Self {
            ids,
            positions,
            neighbors,
        }
    }

    /// Build an index from node ids and an undirected edge list given by id.
    ///
    /// Edges naming an unknown node are skipped.
    #[must_use]
    pub fn from_edge_list(nodes: &[&str], edges: &[(&str, &str)]) -> Self {
        let mut index = Self::with_nodes(nodes.iter().copied());
        for (a, b) in edges {
            match (index.position(a), index.position(b)) {
                (Some(ia), Some(ib)) => index.add_edge(ia, ib),
                _ => debug!(source = a, target = b, "skipping edge to unknown node"),
            }
        }
        index
    }

    /// Build an index from explicit per-node neighbor lists.
    ///
    /// A node missing from `lists` gets an empty neighbor list; neighbor ids
    /// that are not in `nodes` are dropped. Lists are taken as-is, so a
    /// symmetric input is the caller's responsibility.
    #[must_use]
    pub fn from_neighbor_lists<S: AsRef<str>>(
        nodes: &[S],
        lists: &HashMap<String, Vec<String>>,
    ) -> Self {
        let mut index = Self::with_nodes(nodes.iter().map(|s| s.as_ref().to_string()));
        for i in 0..index.ids.len() {
            let Some(list) = lists.get(&index.ids[i]) else {
                continue;
            };
            let resolved: Vec<usize> = list
                .iter()
                .filter_map(|id| index.positions.get(id).copied())
                .collect();
            index.neighbors[i] = resolved;
        }
        index
    }

    /// Append an undirected edge between positions `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of bounds.
    pub fn add_edge(&mut self, a: usize, b: usize) {
        self.neighbors[a].push(b);
        self.neighbors[b].push(a);
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Node ids in index order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn id(&self, position: usize) -> Option<&str> {
        self.ids.get(position).map(String::as_str)
    }

    /// Position of `id`, if present.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Neighbor positions of the node at `position` (empty when out of range).
    #[must_use]
    pub fn neighbors(&self, position: usize) -> &[usize] {
        self.neighbors.get(position).map_or(&[], Vec::as_slice)
    }

    /// Neighbor ids of `id`, in insertion order. Unknown ids have none.
    pub fn neighbor_ids<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a str> + 'a {
        let list = self.position(id).map_or(&[][..], |p| self.neighbors(p));
        list.iter().map(move |&n| self.ids[n].as_str())
    }

    /// Number of neighbor entries for the node at `position`.
    #[must_use]
    pub fn degree(&self, position: usize) -> usize {
        self.neighbors(position).len()
    }

    /// Sum of all neighbor-list lengths (twice the undirected edge count).
    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum()
    }

    /// Attach ids to a position-indexed score vector.
    #[must_use]
    pub fn label<T: Copy>(&self, scores: &[T]) -> HashMap<String, T> {
        self.ids
            .iter()
            .zip(scores.iter().copied())
            .map(|(id, score)| (id.clone(), score))
            .collect()
    }
}
