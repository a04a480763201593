use crate::{rng, AgentId, SplitMix64};

/// Time slice handed to an action by the external scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
    pub seed: u64,
}

impl TickContext {
    /// Independent random stream for `agent`, stable across runs with the same seed.
    pub fn rng_for_agent<A: AgentId>(&self, agent: A, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed, agent.stable_id(), stream);
        SplitMix64::new(seed)
    }

    /// Seed for a pedestrian's own random source at scenario load.
    pub fn pedestrian_seed<A: AgentId>(&self, agent: A) -> u64 {
        rng::derive_seed(self.seed, agent.stable_id(), 0)
    }
}
