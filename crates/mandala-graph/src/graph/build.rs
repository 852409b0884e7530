//! Graph construction from grouped layers.
//!
//! # Overview
//!
//! Expands every ring motif into `max(grid_order * multiplicity, 1)` nodes,
//! places them on the unit disc and links them per the edge topology.
//!
//! ## Placement
//!
//! Instance `i` of `count` sits at angle `motif.angle + i * 360 / count`
//! degrees, rotated by -90° so angle 0 points up, at the layer's radius.
//!
//! ## Edges
//!
//! - **Radial**: each new node links to the geometrically nearest node of the
//!   previous (inward) layer. Ties go to the first candidate in construction
//!   order. The previous layer is every node of that layer across all of its
//!   motifs; the first ring layer links to the center.
//! - **Ring**: instances of one motif link `i → (i + 1) mod count`, closing a
//!   cycle, when the motif produced at least two instances. A two-instance
//!   motif therefore gets two parallel ring edges.
//!
//! ## Node Ids
//!
//! The center node is always [`CENTER_NODE_ID`]. Ring instances are
//! `"{motif_id}-{i}"`.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU32;

use mandala_core::{EdgeTopology, GlobalParams, Motif};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, trace, warn};

use crate::graph::adjacency::AdjacencyIndex;
use crate::graph::layers::{LayerGrouping, LayerPartition, group_layers};

/// Id of the synthetic center node.
pub const CENTER_NODE_ID: &str = "center";

// ---------------------------------------------------------------------------
// Node / edge types
// ---------------------------------------------------------------------------

/// A point on the normalized disc.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Position of instance `i` of `count` for a motif at `angle_deg` on a
    /// ring of `radius`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn on_ring(radius: f64, angle_deg: f64, i: usize, count: usize) -> Self {
        let theta = (angle_deg + (i as f64) * 360.0 / (count as f64) - 90.0).to_radians();
        Self {
            x: radius * theta.cos(),
            y: radius * theta.sin(),
        }
    }

    /// Squared Euclidean distance to `other`.
    #[must_use]
    pub fn distance_sq(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }
}

/// One node of the layout graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// 0 for the center, 1..=N for ring layers in radius order.
    pub layer: usize,
    pub position: Position,
    /// Motif this node was expanded from. For the center, the center motif
    /// if one was supplied.
    pub motif_id: Option<String>,
    /// Instance index within the motif.
    pub instance: usize,
    /// Total instances of the motif.
    pub instance_count: usize,
}

/// Edge family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Radial,
    Ring,
}

impl EdgeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Radial => "radial",
            Self::Ring => "ring",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MandalaGraph
// ---------------------------------------------------------------------------

/// The undirected graph for one layout, plus its adjacency index.
///
/// Node indices follow construction order: center first, then every layer
/// in radius order, motifs in encounter order, instances in order. The
/// adjacency index uses the same positions.
#[derive(Debug, Clone)]
pub struct MandalaGraph {
    pub graph: UnGraph<Node, EdgeKind>,
    pub node_map: HashMap<String, NodeIndex>,
    pub adjacency: AdjacencyIndex,
    pub grid_order: NonZeroU32,
    pub topology: EdgeTopology,
    /// Number of ring layers (excluding the center).
    pub layer_count: usize,
    /// Center motifs that were ignored because another one came first.
    pub dropped_centers: Vec<String>,
}

impl MandalaGraph {
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in construction order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Edges in construction order as `(source, target, kind)`.
    pub fn edges(&self) -> impl Iterator<Item = (&Node, &Node, EdgeKind)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()], *e.weight()))
    }

    /// Edges as `(source_index, target_index, kind)`, 0-based in construction order.
    pub fn indexed_edges(&self) -> impl Iterator<Item = (usize, usize, EdgeKind)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_map.get(id).map(|&idx| &self.graph[idx])
    }

    /// The center node.
    #[must_use]
    pub fn center(&self) -> Option<&Node> {
        self.node(CENTER_NODE_ID)
    }

    /// Indices of the nodes in `layer`, in construction order.
    #[must_use]
    pub fn layer_nodes(&self, layer: usize) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph[idx].layer == layer)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Derived id of instance `i` of a motif.
#[must_use]
pub fn instance_id(motif_id: &str, i: usize) -> String {
    format!("{motif_id}-{i}")
}

/// Group `motifs` into layers and build the graph. A pure function of its
/// inputs: calling it twice yields identical graphs.
#[must_use]
pub fn rebuild_graph(
    motifs: &[Motif],
    params: &GlobalParams,
    grouping: LayerGrouping,
) -> MandalaGraph {
    let partition = group_layers(motifs, grouping);
    build_graph(&partition, params)
}

/// Build the layout graph from an already-grouped partition.
#[must_use]
#[instrument(skip(partition), fields(layers = partition.layers.len()))]
pub fn build_graph(partition: &LayerPartition, params: &GlobalParams) -> MandalaGraph {
    let mut graph = UnGraph::<Node, EdgeKind>::default();
    let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

    let center = graph.add_node(Node {
        id: CENTER_NODE_ID.to_string(),
        layer: 0,
        position: Position::ORIGIN,
        motif_id: partition.center.as_ref().map(|c| c.id.clone()),
        instance: 0,
        instance_count: 1,
    });
    node_map.insert(CENTER_NODE_ID.to_string(), center);

    let mut previous_layer: Vec<NodeIndex> = vec![center];

    for layer in &partition.layers {
        let mut current_layer: Vec<NodeIndex> = Vec::new();

        for motif in &layer.members {
            let count = motif.instance_count(params.grid_order);
            let mut motif_nodes: Vec<NodeIndex> = Vec::with_capacity(count);

            for i in 0..count {
                let position = Position::on_ring(layer.radius, motif.angle, i, count);
                let id = instance_id(&motif.id, i);
                let idx = graph.add_node(Node {
                    id: id.clone(),
                    layer: layer.index,
                    position,
                    motif_id: Some(motif.id.clone()),
                    instance: i,
                    instance_count: count,
                });
                if node_map.insert(id.clone(), idx).is_some() {
                    warn!(node = %id, "duplicate node id; lookups resolve to the latest node");
                }

                if params.topology.radial {
                    if let Some(target) = nearest(&graph, &previous_layer, position) {
                        trace!(node = %id, target = %graph[target].id, "radial edge");
                        graph.add_edge(idx, target, EdgeKind::Radial);
                    }
                }

                motif_nodes.push(idx);
            }

            if params.topology.ring && motif_nodes.len() > 1 {
                for (i, &a) in motif_nodes.iter().enumerate() {
                    let b = motif_nodes[(i + 1) % motif_nodes.len()];
                    graph.add_edge(a, b, EdgeKind::Ring);
                }
            }

            current_layer.extend(motif_nodes);
        }

        previous_layer = current_layer;
    }

    let mut adjacency =
        AdjacencyIndex::with_nodes(graph.node_indices().map(|idx| graph[idx].id.clone()));
    for edge in graph.edge_references() {
        adjacency.add_edge(edge.source().index(), edge.target().index());
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        grid_order = params.grid_order.get(),
        "built mandala graph"
    );

    MandalaGraph {
        graph,
        node_map,
        adjacency,
        grid_order: params.grid_order,
        topology: params.topology,
        layer_count: partition.layers.len(),
        dropped_centers: partition.dropped_centers.clone(),
    }
}

/// First node of `candidates` with minimum distance to `point`.
fn nearest(
    graph: &UnGraph<Node, EdgeKind>,
    candidates: &[NodeIndex],
    point: Position,
) -> Option<NodeIndex> {
    let mut best: Option<(NodeIndex, f64)> = None;
    for &idx in candidates {
        let d = graph[idx].position.distance_sq(point);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            // NaN distances never displace a candidate.
            Some(_) if d.is_nan() => {}
            _ => best = Some((idx, d)),
        }
    }
    best.map(|(idx, _)| idx)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
