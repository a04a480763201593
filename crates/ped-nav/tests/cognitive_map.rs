use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};

use ped_core::{
    Circle, ConvexPolygon, ConvexShape, DeterministicRng, OrientingConfig, PedError, SplitMix64,
    Vec2,
};
use ped_nav::{
    build_cognitive_map, landmark_budget, CognitiveMap, DestinationLandmarks, NavigationGraph,
    OrientingPedestrian, RegionGraph, RegionId, ScaledLandmarks,
};

const BODY: Circle = Circle::new(Vec2::ZERO, 0.5);

/// `width * height` rooms of 10x10, connected to their 4-neighbors.
fn room_grid(width: usize, height: usize) -> NavigationGraph<ConvexPolygon> {
    let mut g = NavigationGraph::new();
    let mut ids = Vec::new();
    for y in 0..height {
        for x in 0..width {
            ids.push(g.add_region(ConvexPolygon::rectangle(
                x as f32 * 10.0,
                y as f32 * 10.0,
                10.0,
                10.0,
            )));
        }
    }
    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            if x + 1 < width {
                g.connect(ids[i], ids[i + 1]).expect("known regions");
            }
            if y + 1 < height {
                g.connect(ids[i], ids[i + width]).expect("known regions");
            }
        }
    }
    g
}

fn build(
    graph: &NavigationGraph<ConvexPolygon>,
    degree: f32,
    seed: u64,
) -> CognitiveMap<ConvexPolygon> {
    build_cognitive_map(
        graph,
        degree,
        &mut SplitMix64::new(seed),
        10.0,
        BODY.diameter(),
        &ScaledLandmarks::default(),
    )
    .expect("valid configuration")
}

fn assert_forest<L>(map: &CognitiveMap<L>) {
    assert_eq!(
        map.edge_count(),
        map.landmark_count() - map.component_count(),
        "a spanning forest has |V| - |components| edges"
    );
}

#[test]
fn landmark_count_follows_knowledge_degree() {
    let graph = room_grid(5, 4);
    for (degree, expected) in [(0.0, 0), (0.01, 1), (0.25, 5), (0.5, 10), (1.0, 20)] {
        let map = build(&graph, degree, 3);
        assert_eq!(map.landmark_count(), expected, "degree {degree}");
        assert_eq!(expected, landmark_budget(degree, 20));
    }
}

#[test]
fn invalid_knowledge_degree_is_rejected() {
    let graph = room_grid(2, 2);
    for degree in [1.5f32, -0.1] {
        let err = build_cognitive_map(
            &graph,
            degree,
            &mut SplitMix64::new(1),
            10.0,
            1.0,
            &ScaledLandmarks::default(),
        )
        .expect_err("must reject");
        assert_eq!(err, PedError::InvalidKnowledgeDegree(degree));

        let err = OrientingPedestrian::<u32, Circle, ConvexPolygon>::new(
            1,
            BODY,
            OrientingConfig::new(degree, 1),
        )
        .expect_err("must reject");
        assert!(matches!(err, PedError::InvalidKnowledgeDegree(_)));
    }
}

#[test]
fn same_seed_same_map() {
    let graph = room_grid(6, 6);
    let a = build(&graph, 0.4, 77);
    let b = build(&graph, 0.4, 77);

    let regions = |m: &CognitiveMap<ConvexPolygon>| {
        m.landmarks()
            .map(|(id, _)| m.region_of(id))
            .collect::<Vec<_>>()
    };
    assert_eq!(regions(&a), regions(&b));
    assert_eq!(a.edges(), b.edges());

    let c = build(&graph, 0.4, 78);
    assert_ne!(regions(&a), regions(&c), "different seeds should sample differently");
}

#[test]
fn landmarks_lie_inside_their_regions() {
    let graph = room_grid(4, 4);
    let map = build(&graph, 1.0, 5);
    for (id, landmark) in map.landmarks() {
        let region = map
            .region_of(id)
            .and_then(|r| graph.region(r))
            .expect("source region");
        assert!(region.contains_shape(landmark));
    }
}

#[test]
fn connected_environment_yields_a_spanning_tree() {
    let graph = room_grid(5, 5);
    let map = build(&graph, 0.6, 11);
    assert_eq!(map.component_count(), 1);
    assert_eq!(map.edge_count(), map.landmark_count() - 1);
    assert_forest(&map);
}

#[test]
fn disconnected_environment_yields_one_tree_per_component() {
    let mut graph = room_grid(3, 1);
    let a = graph.add_region(ConvexPolygon::rectangle(100.0, 0.0, 10.0, 10.0));
    let b = graph.add_region(ConvexPolygon::rectangle(110.0, 0.0, 10.0, 10.0));
    graph.connect(a, b).expect("known regions");

    let map = build(&graph, 1.0, 2);
    assert_eq!(map.landmark_count(), 5);
    assert_eq!(map.component_count(), 2);
    assert_eq!(map.edge_count(), 3);
    assert_forest(&map);

    let la = map.landmark_in(a).expect("landmark in a");
    let lb = map.landmark_in(b).expect("landmark in b");
    assert!(map.are_connected(la, lb));
    assert_eq!(map.neighbors(la), vec![lb]);
}

#[test]
fn spanning_edges_prefer_short_detours() {
    // A corridor of 4 rooms: the minimum spanning tree over all pairs is the corridor itself.
    let graph = room_grid(4, 1);
    let map = build(&graph, 1.0, 9);
    let mut pairs: BTreeSet<(RegionId, RegionId)> = BTreeSet::new();
    for (a, b) in map.edges() {
        let ra = map.region_of(a).expect("region");
        let rb = map.region_of(b).expect("region");
        pairs.insert((ra.min(rb), ra.max(rb)));
        assert_eq!(graph.shortest_path_weight(ra, rb), Some(1.0));
    }
    assert_eq!(pairs.len(), 3);
}

/// Forwards to a [`NavigationGraph`] and counts the searches it is asked for.
struct CountingGraph<'a> {
    inner: &'a NavigationGraph<ConvexPolygon>,
    pairwise: Cell<usize>,
    single_source: Cell<usize>,
}

impl<'a> CountingGraph<'a> {
    fn new(inner: &'a NavigationGraph<ConvexPolygon>) -> Self {
        Self {
            inner,
            pairwise: Cell::new(0),
            single_source: Cell::new(0),
        }
    }
}

impl RegionGraph for CountingGraph<'_> {
    type Position = Vec2;
    type Region = ConvexPolygon;

    fn region_ids(&self) -> Vec<RegionId> {
        self.inner.region_ids()
    }

    fn region(&self, id: RegionId) -> Option<&ConvexPolygon> {
        self.inner.region(id)
    }

    fn shortest_path_weight(&self, from: RegionId, to: RegionId) -> Option<f32> {
        self.pairwise.set(self.pairwise.get() + 1);
        self.inner.shortest_path_weight(from, to)
    }

    fn path_exists(&self, from: RegionId, to: RegionId) -> bool {
        self.pairwise.set(self.pairwise.get() + 1);
        self.inner.path_exists(from, to)
    }

    fn shortest_path_weights_from(&self, from: RegionId) -> BTreeMap<RegionId, f32> {
        self.single_source.set(self.single_source.get() + 1);
        self.inner.shortest_path_weights_from(from)
    }
}

/// Only answers pairwise queries; single-source weights come from the trait default.
struct PairwiseGraph<'a>(&'a NavigationGraph<ConvexPolygon>);

impl RegionGraph for PairwiseGraph<'_> {
    type Position = Vec2;
    type Region = ConvexPolygon;

    fn region_ids(&self) -> Vec<RegionId> {
        self.0.region_ids()
    }

    fn region(&self, id: RegionId) -> Option<&ConvexPolygon> {
        self.0.region(id)
    }

    fn shortest_path_weight(&self, from: RegionId, to: RegionId) -> Option<f32> {
        self.0.shortest_path_weight(from, to)
    }
}

#[test]
fn builder_runs_one_search_per_landmark() {
    let grid = room_grid(10, 10);
    let graph = CountingGraph::new(&grid);
    let map = build_cognitive_map(
        &graph,
        1.0,
        &mut SplitMix64::new(3),
        10.0,
        BODY.diameter(),
        &ScaledLandmarks::default(),
    )
    .expect("valid configuration");

    assert_eq!(map.landmark_count(), 100);
    assert_eq!(map.edge_count(), 99);
    assert_eq!(graph.pairwise.get(), 0);
    assert_eq!(graph.single_source.get(), map.landmark_count() - 1);
}

#[test]
fn default_single_source_weights_build_the_same_map() {
    let mut grid = room_grid(5, 5);
    let island = grid.add_region(ConvexPolygon::rectangle(100.0, 100.0, 10.0, 10.0));
    let factory = ScaledLandmarks::default();

    let fast = build_cognitive_map(
        &grid,
        0.6,
        &mut SplitMix64::new(12),
        10.0,
        BODY.diameter(),
        &factory,
    )
    .expect("valid configuration");
    let slow = build_cognitive_map(
        &PairwiseGraph(&grid),
        0.6,
        &mut SplitMix64::new(12),
        10.0,
        BODY.diameter(),
        &factory,
    )
    .expect("valid configuration");

    assert_eq!(fast.edges(), slow.edges());
    let regions = |m: &CognitiveMap<ConvexPolygon>| {
        m.landmarks()
            .map(|(id, _)| m.region_of(id))
            .collect::<Vec<_>>()
    };
    assert_eq!(regions(&fast), regions(&slow));
    assert_eq!(
        PairwiseGraph(&grid).shortest_path_weights_from(island),
        grid.shortest_path_weights_from(island)
    );
}

#[test]
fn small_regions_are_not_mapped() {
    let mut graph = room_grid(2, 1);
    let closet = graph.add_region(ConvexPolygon::rectangle(20.0, 0.0, 2.0, 2.0));
    graph.connect(RegionId(1), closet).expect("known regions");

    let map = build(&graph, 1.0, 4);
    assert_eq!(map.landmark_count(), 2);
    assert_eq!(map.landmark_in(closet), None);
}

#[test]
fn no_eligible_regions_is_an_empty_map() {
    let mut graph = NavigationGraph::new();
    graph.add_region(ConvexPolygon::rectangle(0.0, 0.0, 1.0, 1.0));
    let map = build(&graph, 1.0, 1);
    assert!(map.is_empty());
    assert_eq!(map.edge_count(), 0);
    assert_eq!(map.component_count(), 0);

    let empty = build(&NavigationGraph::new(), 0.7, 1);
    assert!(empty.is_empty());
}

#[test]
fn destination_landmarks_contain_the_destination() {
    let graph = room_grid(3, 1);
    let exit = Vec2::new(25.0, 5.0);
    let factory = DestinationLandmarks::new(vec![exit], 0.1);
    let map = build_cognitive_map(
        &graph,
        1.0,
        &mut SplitMix64::new(8),
        10.0,
        BODY.diameter(),
        &factory,
    )
    .expect("valid");
    let id = map.landmark_in(RegionId(2)).expect("landmark in exit room");
    assert!(map.landmark(id).expect("landmark").contains(exit));
}

#[test]
fn closures_work_as_landmark_factories() {
    let graph = room_grid(2, 2);
    let factory = |room: &ConvexPolygon| Circle::new(room.centroid(), 1.0);
    let map = build_cognitive_map(
        &graph,
        1.0,
        &mut SplitMix64::new(8),
        10.0,
        BODY.diameter(),
        &factory,
    )
    .expect("valid");
    assert_eq!(map.landmark_count(), 4);
    assert!(map.landmarks().all(|(_, c)| c.radius == 1.0));
}

#[test]
fn pedestrian_builds_its_map_once() {
    let graph = room_grid(4, 4);
    let pedestrian = OrientingPedestrian::new(1u32, BODY, OrientingConfig::new(0.5, 21))
        .expect("valid pedestrian");
    assert!(pedestrian.cached_cognitive_map().is_none());

    let first = pedestrian.cognitive_map(&graph, &ScaledLandmarks::default());
    let other_graph = room_grid(1, 1);
    let second = pedestrian.cognitive_map(&other_graph, &ScaledLandmarks::new(0.1));
    assert!(std::ptr::eq(first, second));
    assert_eq!(second.landmark_count(), 8);

    let direct = build(&graph, 0.5, 21);
    assert_eq!(first.edges(), direct.edges());
}

#[test]
fn map_can_be_built_while_the_behavior_rng_is_held() {
    let graph = room_grid(4, 4);
    let factory = ScaledLandmarks::default();
    let pedestrian = OrientingPedestrian::new(2u32, BODY, OrientingConfig::new(0.5, 21))
        .expect("valid pedestrian");

    let (draw, edges) = pedestrian.with_rng(|rng| {
        let draw = rng.next_u64();
        (draw, pedestrian.cognitive_map(&graph, &factory).edges())
    });
    assert_eq!(edges, build(&graph, 0.5, 21).edges());

    // Behavior draws and the map do not disturb each other.
    let fresh = OrientingPedestrian::new(2u32, BODY, OrientingConfig::new(0.5, 21))
        .expect("valid pedestrian");
    assert_eq!(fresh.cognitive_map(&graph, &factory).edges(), edges);
    assert_eq!(fresh.with_rng(|rng| rng.next_u64()), draw);
}

#[test]
fn concurrent_first_reads_observe_the_same_map() {
    let graph = room_grid(6, 6);
    let pedestrian = OrientingPedestrian::new(1u32, BODY, OrientingConfig::new(0.8, 5))
        .expect("valid pedestrian");
    let factory = ScaledLandmarks::default();

    let addresses: Vec<usize> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    pedestrian.cognitive_map(&graph, &factory) as *const CognitiveMap<_> as usize
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("reader thread"))
            .collect()
    });
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn volatile_memory_counts_visits() {
    let mut pedestrian =
        OrientingPedestrian::<u32, Circle, ConvexPolygon>::new(3, BODY, OrientingConfig::default())
            .expect("valid pedestrian");
    assert_eq!(pedestrian.visits(RegionId(4)), 0);
    assert_eq!(pedestrian.register_visit(RegionId(4)), 1);
    assert_eq!(pedestrian.register_visit(RegionId(4)), 2);
    pedestrian.register_visit(RegionId(1));
    assert_eq!(
        pedestrian.visited_regions().collect::<Vec<_>>(),
        vec![(RegionId(1), 1), (RegionId(4), 2)]
    );
    pedestrian.forget_visits();
    assert_eq!(pedestrian.visits(RegionId(4)), 0);
}
