//! Structural properties of arbitrary layouts.

use mandala_core::{EdgeTopology, GlobalParams, LayerStrategy, Motif};
use mandala_graph::analysis::analyze;
use mandala_graph::graph::stats::{GraphStats, fingerprint};
use mandala_graph::graph::{EdgeKind, LayerGrouping, rebuild_graph};
use proptest::prelude::*;

fn arb_motif(i: usize) -> impl Strategy<Value = Motif> {
    prop_oneof![
        1 => Just(Motif::center(format!("c{i}"))),
        6 => (0.05f64..1.0, 0.0f64..360.0, 0u32..=3)
            .prop_map(move |(r, a, m)| Motif::ring(format!("m{i}"), r, a, m)),
    ]
}

fn arb_motifs() -> impl Strategy<Value = Vec<Motif>> {
    (0usize..7).prop_flat_map(|n| (0..n).map(arb_motif).collect::<Vec<_>>())
}

fn arb_topology() -> impl Strategy<Value = EdgeTopology> {
    (any::<bool>(), any::<bool>()).prop_map(|(radial, ring)| EdgeTopology { radial, ring })
}

fn arb_grouping() -> impl Strategy<Value = LayerGrouping> {
    prop_oneof![Just(LayerStrategy::Pairwise), Just(LayerStrategy::Quantized)].prop_map(
        |strategy| LayerGrouping {
            strategy,
            ..LayerGrouping::default()
        },
    )
}

/// Instances a ring motif expands to.
fn expected_instances(motif: &Motif, order: u32) -> usize {
    motif
        .as_ring()
        .map_or(0, |r| (order * r.multiplicity).max(1) as usize)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn node_count_matches_instance_sum(
        motifs in arb_motifs(),
        order in 1i64..10,
        topo in arb_topology(),
        grouping in arb_grouping(),
    ) {
        let params = GlobalParams::clamped(order, topo);
        let g = rebuild_graph(&motifs, &params, grouping);
        let expected: usize = 1 + motifs
            .iter()
            .map(|m| expected_instances(m, params.grid_order.get()))
            .sum::<usize>();
        prop_assert_eq!(g.node_count(), expected);
        prop_assert_eq!(g.adjacency.len(), expected);
    }

    #[test]
    fn handshake_lemma(
        motifs in arb_motifs(),
        order in 1i64..10,
        topo in arb_topology(),
    ) {
        let g = rebuild_graph(&motifs, &GlobalParams::clamped(order, topo), LayerGrouping::default());
        let report = analyze(&g);
        let degree_sum: usize = report.rows.iter().map(|r| r.degree).sum();
        prop_assert_eq!(degree_sum, 2 * g.edge_count());
        prop_assert_eq!(g.adjacency.endpoint_count(), 2 * g.edge_count());
    }

    #[test]
    fn edge_counts_follow_topology(
        motifs in arb_motifs(),
        order in 1i64..10,
        topo in arb_topology(),
    ) {
        let params = GlobalParams::clamped(order, topo);
        let g = rebuild_graph(&motifs, &params, LayerGrouping::default());
        let counts: Vec<usize> = motifs
            .iter()
            .filter(|m| !m.is_center())
            .map(|m| expected_instances(m, params.grid_order.get()))
            .collect();

        let radial = g.edges().filter(|(_, _, k)| *k == EdgeKind::Radial).count();
        let ring = g.edges().filter(|(_, _, k)| *k == EdgeKind::Ring).count();
        let ring_nodes: usize = counts.iter().sum();
        let ring_expected: usize = counts.iter().filter(|&&c| c > 1).sum();

        prop_assert_eq!(radial, if topo.radial { ring_nodes } else { 0 });
        prop_assert_eq!(ring, if topo.ring { ring_expected } else { 0 });
    }

    #[test]
    fn radial_edges_point_one_layer_inward(
        motifs in arb_motifs(),
        order in 1i64..10,
        grouping in arb_grouping(),
    ) {
        let g = rebuild_graph(&motifs, &GlobalParams::clamped(order, EdgeTopology::default()), grouping);
        for (outer, inner, kind) in g.edges() {
            if kind == EdgeKind::Radial {
                prop_assert_eq!(outer.layer, inner.layer + 1);
            } else {
                prop_assert_eq!(&outer.motif_id, &inner.motif_id);
            }
        }
    }

    #[test]
    fn rebuild_is_deterministic(
        motifs in arb_motifs(),
        order in 1i64..10,
        topo in arb_topology(),
        grouping in arb_grouping(),
    ) {
        let params = GlobalParams::clamped(order, topo);
        let a = rebuild_graph(&motifs, &params, grouping);
        let b = rebuild_graph(&motifs, &params, grouping);

        prop_assert_eq!(fingerprint(&a), fingerprint(&b));
        prop_assert_eq!(GraphStats::from_graph(&a), GraphStats::from_graph(&b));
        prop_assert_eq!(analyze(&a), analyze(&b));
    }

    #[test]
    fn scores_are_finite_and_non_negative(
        motifs in arb_motifs(),
        order in 1i64..10,
        topo in arb_topology(),
    ) {
        let g = rebuild_graph(&motifs, &GlobalParams::clamped(order, topo), LayerGrouping::default());
        for r in analyze(&g).rows {
            for v in [r.closeness, r.betweenness, r.eigenvector] {
                prop_assert!(v.is_finite() && v >= 0.0, "{}: {}", r.id, v);
            }
            if r.degree == 0 {
                prop_assert_eq!(r.closeness, 0.0);
                prop_assert_eq!(r.betweenness, 0.0);
            }
        }
    }
}
