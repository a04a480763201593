use petgraph::algo::{connected_components, min_spanning_tree};
use petgraph::data::Element;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::{debug, trace};

use ped_core::{
    check_knowledge_degree, require_positive, shuffle, ConvexShape, DeterministicRng, Result,
};

use crate::{LandmarkFactory, RegionGraph, RegionId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index of a landmark inside one cognitive map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LandmarkId(pub u32);

impl LandmarkId {
    fn node(self) -> NodeIndex {
        NodeIndex::new(self.0 as usize)
    }

    fn from_node(node: NodeIndex) -> Self {
        Self(node.index() as u32)
    }
}

/// A pedestrian's private, approximate knowledge of navigable connectivity.
///
/// Vertices are landmarks, each placed inside one region of the ground-truth graph. An edge only
/// says "a path exists between these two landmarks"; its shape is unknown to the pedestrian, and
/// two unconnected landmarks may still be mutually reachable. The edge set is a spanning forest.
#[derive(Debug, Clone)]
pub struct CognitiveMap<L> {
    graph: UnGraph<L, ()>,
    /// `regions[i]` is the region landmark `i` was generated in.
    regions: Vec<RegionId>,
}

impl<L> Default for CognitiveMap<L> {
    fn default() -> Self {
        Self {
            graph: UnGraph::default(),
            regions: Vec::new(),
        }
    }
}

impl<L> CognitiveMap<L> {
    pub fn landmark_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn landmarks(&self) -> impl Iterator<Item = (LandmarkId, &L)> + '_ {
        self.graph
            .node_indices()
            .map(move |n| (LandmarkId::from_node(n), &self.graph[n]))
    }

    pub fn landmark(&self, id: LandmarkId) -> Option<&L> {
        self.graph.node_weight(id.node())
    }

    pub fn region_of(&self, id: LandmarkId) -> Option<RegionId> {
        self.regions.get(id.0 as usize).copied()
    }

    /// The landmark generated in `region`, if the pedestrian knows that region.
    pub fn landmark_in(&self, region: RegionId) -> Option<LandmarkId> {
        self.regions
            .iter()
            .position(|r| *r == region)
            .map(|i| LandmarkId(i as u32))
    }

    /// Edges as `(a, b)` with `a < b`, sorted.
    pub fn edges(&self) -> Vec<(LandmarkId, LandmarkId)> {
        let mut out: Vec<_> = self
            .graph
            .edge_references()
            .map(|e| {
                let a = LandmarkId::from_node(e.source());
                let b = LandmarkId::from_node(e.target());
                (a.min(b), a.max(b))
            })
            .collect();
        out.sort_unstable();
        out
    }

    pub fn neighbors(&self, id: LandmarkId) -> Vec<LandmarkId> {
        if self.landmark(id).is_none() {
            return Vec::new();
        }
        let mut out: Vec<_> = self
            .graph
            .neighbors(id.node())
            .map(LandmarkId::from_node)
            .collect();
        out.sort_unstable();
        out
    }

    pub fn are_connected(&self, a: LandmarkId, b: LandmarkId) -> bool {
        self.landmark(a).is_some()
            && self.landmark(b).is_some()
            && self.graph.find_edge(a.node(), b.node()).is_some()
    }

    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    /// Read-only graph view for inspection and visualization tooling.
    pub fn graph(&self) -> &UnGraph<L, ()> {
        &self.graph
    }
}

/// How many of `eligible` regions a pedestrian with `knowledge_degree` knows about.
///
/// Rounds half up, but never drops to zero for a nonzero degree over a nonempty list.
pub fn landmark_budget(knowledge_degree: f32, eligible: usize) -> usize {
    if eligible == 0 || knowledge_degree <= 0.0 {
        return 0;
    }
    let count = (f64::from(knowledge_degree) * eligible as f64).round() as usize;
    count.clamp(1, eligible)
}

/// Builds a cognitive map from the environment's region graph:
///
/// 1. regions whose diameter is not larger than `body_diameter * min_area_factor` are discarded;
/// 2. the rest is shuffled with `rng` and the `knowledge_degree` fraction of it is kept
///    (see [`landmark_budget`]);
/// 3. one landmark is created in each kept region;
/// 4. every pair of landmarks whose regions are mutually reachable is a candidate edge, weighted
///    by the shortest-path weight between the two regions in `graph`;
/// 5. only the edges of a minimum spanning forest of the candidates are kept.
///
/// The result only depends on `graph` and the state of `rng`.
pub fn build_cognitive_map<G, F, R>(
    graph: &G,
    knowledge_degree: f32,
    rng: &mut R,
    min_area_factor: f32,
    body_diameter: f32,
    factory: &F,
) -> Result<CognitiveMap<F::Landmark>>
where
    G: RegionGraph,
    F: LandmarkFactory<G::Region>,
    R: DeterministicRng + ?Sized,
{
    check_knowledge_degree(knowledge_degree)?;
    require_positive("min_area_factor", min_area_factor)?;
    Ok(build_validated(
        graph,
        knowledge_degree,
        rng,
        min_area_factor,
        body_diameter,
        factory,
    ))
}

pub(crate) fn build_validated<G, F, R>(
    graph: &G,
    knowledge_degree: f32,
    rng: &mut R,
    min_area_factor: f32,
    body_diameter: f32,
    factory: &F,
) -> CognitiveMap<F::Landmark>
where
    G: RegionGraph,
    F: LandmarkFactory<G::Region>,
    R: DeterministicRng + ?Sized,
{
    let too_small = body_diameter.max(0.0) * min_area_factor;
    let mut rooms: Vec<(RegionId, &G::Region)> = graph
        .region_ids()
        .into_iter()
        .filter_map(|id| graph.region(id).map(|r| (id, r)))
        .filter(|(_, r)| r.diameter() > too_small)
        .collect();
    let eligible = rooms.len();
    shuffle(&mut rooms, rng);
    rooms.truncate(landmark_budget(knowledge_degree, eligible));

    let mut map = CognitiveMap {
        graph: UnGraph::with_capacity(rooms.len(), rooms.len().saturating_sub(1)),
        regions: Vec::with_capacity(rooms.len()),
    };
    for (id, region) in &rooms {
        let landmark = factory.create_landmark(region);
        debug_assert!(
            region.contains(landmark.centroid()),
            "landmark factory produced a landmark outside {id:?}"
        );
        trace!(region = id.0, "placed landmark");
        map.graph.add_node(landmark);
        map.regions.push(*id);
    }

    // Candidate graph over landmark indices; weights come from the ground-truth graph.
    let mut candidates: UnGraph<(), f32> = UnGraph::with_capacity(rooms.len(), 0);
    for _ in &rooms {
        candidates.add_node(());
    }
    // One single-source search per landmark; the last one has no later partner.
    for i in 0..rooms.len().saturating_sub(1) {
        let reachable = graph.shortest_path_weights_from(rooms[i].0);
        for (j, (b, _)) in rooms.iter().enumerate().skip(i + 1) {
            if let Some(weight) = reachable.get(b) {
                candidates.add_edge(NodeIndex::new(i), NodeIndex::new(j), *weight);
            }
        }
    }

    let mut kept: Vec<(usize, usize)> = min_spanning_tree(&candidates)
        .filter_map(|element| match element {
            Element::Edge { source, target, .. } => Some((source.min(target), source.max(target))),
            Element::Node { .. } => None,
        })
        .collect();
    kept.sort_unstable();
    for (a, b) in kept {
        map.graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
    }

    debug!(
        eligible,
        landmarks = map.landmark_count(),
        candidate_edges = candidates.edge_count(),
        edges = map.edge_count(),
        "built cognitive map"
    );
    map
}
