use std::collections::BTreeMap;

use petgraph::algo::{dijkstra, has_path_connecting};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use ped_core::{ConvexShape, PedError, Result, Vector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier of a region inside a region graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionId(pub u32);

impl RegionId {
    fn node(self) -> NodeIndex {
        NodeIndex::new(self.0 as usize)
    }

    fn from_node(node: NodeIndex) -> Self {
        Self(node.index() as u32)
    }
}

/// Ground-truth traversability between convex regions, as exposed by the environment.
///
/// The graph is undirected and read-only for the pedestrian crates.
pub trait RegionGraph {
    type Position: Vector;
    type Region: ConvexShape<Position = Self::Position>;

    /// All regions, in a stable order.
    fn region_ids(&self) -> Vec<RegionId>;

    fn region(&self, id: RegionId) -> Option<&Self::Region>;

    /// Weight of the shortest path between two regions, `None` when unreachable.
    fn shortest_path_weight(&self, from: RegionId, to: RegionId) -> Option<f32>;

    fn path_exists(&self, from: RegionId, to: RegionId) -> bool {
        self.shortest_path_weight(from, to).is_some()
    }

    /// Shortest-path weights from `from` to every region reachable from it, `from` included.
    ///
    /// The default asks [`Self::shortest_path_weight`] once per region; graphs that can answer
    /// with a single search should override it.
    fn shortest_path_weights_from(&self, from: RegionId) -> BTreeMap<RegionId, f32> {
        self.region_ids()
            .into_iter()
            .filter_map(|to| self.shortest_path_weight(from, to).map(|w| (to, w)))
            .collect()
    }
}

/// [`RegionGraph`] backed by a petgraph undirected graph.
///
/// Edges default to weight `1.0`, so shortest-path weights count traversed regions.
#[derive(Debug, Clone)]
pub struct NavigationGraph<N> {
    graph: UnGraph<N, f32>,
}

impl<N> Default for NavigationGraph<N> {
    fn default() -> Self {
        Self {
            graph: UnGraph::default(),
        }
    }
}

impl<N> NavigationGraph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_region(&mut self, region: N) -> RegionId {
        RegionId::from_node(self.graph.add_node(region))
    }

    /// Marks two regions as directly traversable (weight `1.0`).
    pub fn connect(&mut self, a: RegionId, b: RegionId) -> Result<()> {
        self.connect_weighted(a, b, 1.0)
    }

    /// Connecting an already connected pair replaces the weight.
    ///
    /// Fails on an unknown region, or a weight that is negative or not finite.
    pub fn connect_weighted(&mut self, a: RegionId, b: RegionId, weight: f32) -> Result<()> {
        for id in [a, b] {
            if !self.contains(id) {
                return Err(PedError::UnknownRegion(id.0));
            }
        }
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(PedError::InvalidConfig {
                field: "weight",
                value: weight,
                reason: "must be a non-negative finite number",
            });
        }
        self.graph.update_edge(a.node(), b.node(), weight);
        Ok(())
    }

    pub fn contains(&self, id: RegionId) -> bool {
        self.graph.node_weight(id.node()).is_some()
    }

    pub fn region_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Directly adjacent regions, sorted by id.
    pub fn neighbors(&self, id: RegionId) -> Vec<RegionId> {
        if !self.contains(id) {
            return Vec::new();
        }
        let mut out: Vec<RegionId> = self
            .graph
            .neighbors(id.node())
            .map(RegionId::from_node)
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    pub fn graph(&self) -> &UnGraph<N, f32> {
        &self.graph
    }
}

impl<N: ConvexShape> RegionGraph for NavigationGraph<N> {
    type Position = N::Position;
    type Region = N;

    fn region_ids(&self) -> Vec<RegionId> {
        self.graph.node_indices().map(RegionId::from_node).collect()
    }

    fn region(&self, id: RegionId) -> Option<&N> {
        self.graph.node_weight(id.node())
    }

    fn shortest_path_weight(&self, from: RegionId, to: RegionId) -> Option<f32> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        let costs = dijkstra(&self.graph, from.node(), Some(to.node()), |e| *e.weight());
        costs.get(&to.node()).copied()
    }

    fn path_exists(&self, from: RegionId, to: RegionId) -> bool {
        self.contains(from)
            && self.contains(to)
            && has_path_connecting(&self.graph, from.node(), to.node(), None)
    }

    fn shortest_path_weights_from(&self, from: RegionId) -> BTreeMap<RegionId, f32> {
        if !self.contains(from) {
            return BTreeMap::new();
        }
        dijkstra(&self.graph, from.node(), None, |e| *e.weight())
            .into_iter()
            .map(|(node, cost)| (RegionId::from_node(node), cost))
            .collect()
    }
}
