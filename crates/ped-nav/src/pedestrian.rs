use std::collections::BTreeMap;
use std::sync::OnceLock;

use parking_lot::Mutex;

use ped_core::rng::derive_seed;
use ped_core::{AgentId, ConvexShape, GroupResolver, OrientingConfig, Result, SplitMix64};

use crate::cognitive_map::build_validated;
use crate::{CognitiveMap, LandmarkFactory, RegionGraph, RegionId};

/// Stream of the random source behind [`OrientingPedestrian::with_rng`].
const BEHAVIOR_STREAM: u64 = 1;

/// A pedestrian that orients itself with a private cognitive map.
///
/// The map is generated lazily on first read and never rebuilt: concurrent first reads block on a
/// single build and all observe its result. The build draws from its own random stream seeded
/// with the config seed, so it never waits on the behavior random source, which is only ever used
/// by one evaluator at a time.
#[derive(Debug)]
pub struct OrientingPedestrian<A, S, L> {
    id: A,
    body: S,
    config: OrientingConfig,
    rng: Mutex<SplitMix64>,
    cognitive_map: OnceLock<CognitiveMap<L>>,
    /// Visited regions and how many times each was visited.
    volatile_memory: BTreeMap<RegionId, u32>,
}

impl<A, S, L> OrientingPedestrian<A, S, L>
where
    A: AgentId,
    S: ConvexShape,
{
    /// Fails if the knowledge degree is outside `[0, 1]` or the min-area factor is not positive.
    pub fn new(id: A, body: S, config: OrientingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            id,
            body,
            rng: Mutex::new(SplitMix64::new(derive_seed(
                config.seed,
                id.stable_id(),
                BEHAVIOR_STREAM,
            ))),
            config,
            cognitive_map: OnceLock::new(),
            volatile_memory: BTreeMap::new(),
        })
    }

    pub fn id(&self) -> A {
        self.id
    }

    pub fn body(&self) -> &S {
        &self.body
    }

    pub fn knowledge_degree(&self) -> f32 {
        self.config.knowledge_degree
    }

    pub fn config(&self) -> &OrientingConfig {
        &self.config
    }

    /// The pedestrian's cognitive map, generated from `graph` on the first call.
    ///
    /// Later calls return the cached map and ignore their arguments. The result is the map
    /// [`build_cognitive_map`](crate::build_cognitive_map) produces with
    /// `SplitMix64::new(config.seed)`.
    pub fn cognitive_map<G, F>(&self, graph: &G, factory: &F) -> &CognitiveMap<L>
    where
        G: RegionGraph<Position = S::Position>,
        F: LandmarkFactory<G::Region, Landmark = L>,
    {
        self.cognitive_map.get_or_init(|| {
            let mut rng = SplitMix64::new(self.config.seed);
            build_validated(
                graph,
                self.config.knowledge_degree,
                &mut rng,
                self.config.min_area_factor,
                self.body.diameter(),
                factory,
            )
        })
    }

    pub fn cached_cognitive_map(&self) -> Option<&CognitiveMap<L>> {
        self.cognitive_map.get()
    }

    /// Exclusive access to the pedestrian's behavior random source (e.g. field-of-view
    /// headings). Independent of the stream the cognitive map is built from.
    ///
    /// Not reentrant: `f` must not call `with_rng` on the same pedestrian.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut SplitMix64) -> T) -> T {
        let mut rng = self.rng.lock();
        f(&mut rng)
    }

    /// Records a visit to `region`, returning the updated visit count.
    pub fn register_visit(&mut self, region: RegionId) -> u32 {
        let count = self.volatile_memory.entry(region).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn visits(&self, region: RegionId) -> u32 {
        self.volatile_memory.get(&region).copied().unwrap_or(0)
    }

    pub fn visited_regions(&self) -> impl Iterator<Item = (RegionId, u32)> + '_ {
        self.volatile_memory.iter().map(|(r, c)| (*r, *c))
    }

    pub fn forget_visits(&mut self) {
        self.volatile_memory.clear();
    }

    /// Co-members of this pedestrian's membership group.
    pub fn group_members(&self, groups: &dyn GroupResolver<A>) -> Vec<A> {
        groups.members(self.id)
    }
}
