use petgraph::algo::is_cyclic_undirected;
use proptest::prelude::*;

use ped_core::{ConvexPolygon, ConvexShape, SplitMix64};
use ped_nav::{build_cognitive_map, landmark_budget, NavigationGraph, RegionGraph, ScaledLandmarks};

/// Random environment: `sizes[i]` is the side of room `i`, `links` are candidate connections.
fn environment(sizes: &[f32], links: &[(usize, usize)]) -> NavigationGraph<ConvexPolygon> {
    let mut g = NavigationGraph::new();
    let ids: Vec<_> = sizes
        .iter()
        .enumerate()
        .map(|(i, side)| g.add_region(ConvexPolygon::rectangle(i as f32 * 50.0, 0.0, *side, *side)))
        .collect();
    for &(a, b) in links {
        if a < ids.len() && b < ids.len() && a != b {
            g.connect(ids[a], ids[b]).expect("known regions");
        }
    }
    g
}

fn arb_environment() -> impl Strategy<Value = NavigationGraph<ConvexPolygon>> {
    (
        prop::collection::vec(1.0f32..30.0, 0..24),
        prop::collection::vec((0usize..24, 0usize..24), 0..40),
    )
        .prop_map(|(sizes, links)| environment(&sizes, &links))
}

proptest! {
    #[test]
    fn map_is_a_forest_of_contained_landmarks(
        graph in arb_environment(),
        degree in 0.0f32..=1.0,
        seed in any::<u64>(),
    ) {
        let body = 1.0;
        let map = build_cognitive_map(
            &graph,
            degree,
            &mut SplitMix64::new(seed),
            10.0,
            body,
            &ScaledLandmarks::new(0.5),
        ).expect("valid configuration");

        let eligible = graph
            .region_ids()
            .into_iter()
            .filter(|id| graph.region(*id).is_some_and(|r| r.diameter() > body * 10.0))
            .count();
        prop_assert_eq!(map.landmark_count(), landmark_budget(degree, eligible));
        prop_assert!(map.landmark_count() as f64 <= (f64::from(degree) * eligible as f64).ceil());

        prop_assert!(!is_cyclic_undirected(map.graph()));
        prop_assert_eq!(map.edge_count(), map.landmark_count() - map.component_count());

        for (id, landmark) in map.landmarks() {
            let region = map.region_of(id).and_then(|r| graph.region(r));
            prop_assert!(region.is_some_and(|r| r.contains_shape(landmark)));
        }

        // Landmarks share a component exactly when their regions are mutually reachable.
        for (a, _) in map.landmarks() {
            for (b, _) in map.landmarks() {
                let (Some(ra), Some(rb)) = (map.region_of(a), map.region_of(b)) else {
                    continue;
                };
                let linked = petgraph::algo::has_path_connecting(
                    map.graph(),
                    petgraph::graph::NodeIndex::new(a.0 as usize),
                    petgraph::graph::NodeIndex::new(b.0 as usize),
                    None,
                );
                prop_assert_eq!(linked, graph.path_exists(ra, rb));
            }
        }
    }

    #[test]
    fn identical_inputs_build_identical_maps(
        graph in arb_environment(),
        degree in 0.0f32..=1.0,
        seed in any::<u64>(),
    ) {
        let build = || build_cognitive_map(
            &graph,
            degree,
            &mut SplitMix64::new(seed),
            10.0,
            1.0,
            &ScaledLandmarks::default(),
        ).expect("valid configuration");
        let (a, b) = (build(), build());
        let regions = |m: &ped_nav::CognitiveMap<ConvexPolygon>| {
            m.landmarks().map(|(id, _)| m.region_of(id)).collect::<Vec<_>>()
        };
        prop_assert_eq!(regions(&a), regions(&b));
        prop_assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn degrees_outside_the_unit_interval_always_fail(
        graph in arb_environment(),
        degree in prop_oneof![1.0001f32..100.0, -100.0f32..-0.0001],
    ) {
        let result = build_cognitive_map(
            &graph,
            degree,
            &mut SplitMix64::new(0),
            10.0,
            1.0,
            &ScaledLandmarks::default(),
        );
        prop_assert!(result.is_err());
    }
}
