use ped_core::{AgentId, PedestrianWorld, ReactionId, SteeringConfig, Vector};

use crate::SteeringAction;

/// Heads straight for a fixed target; reacts to nobody.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seek<A, P> {
    pedestrian: A,
    reaction: ReactionId,
    config: SteeringConfig,
    target: P,
}

impl<A: AgentId, P: Vector> Seek<A, P> {
    pub fn new(pedestrian: A, reaction: ReactionId, config: SteeringConfig, target: P) -> Self {
        Self {
            pedestrian,
            reaction,
            config,
            target,
        }
    }

    pub fn target(&self) -> P {
        self.target
    }

    pub fn set_target(&mut self, target: P) {
        self.target = target;
    }
}

impl<W> SteeringAction<W> for Seek<W::Agent, W::Position>
where
    W: PedestrianWorld + 'static,
{
    fn pedestrian(&self) -> W::Agent {
        self.pedestrian
    }

    fn reaction(&self) -> ReactionId {
        self.reaction
    }

    fn max_step(&self) -> f32 {
        self.config.max_step
    }

    fn group(&self, _world: &W) -> Vec<W::Agent> {
        Vec::new()
    }

    fn next_position(&self, world: &W) -> W::Position {
        self.current_position(world)
            .map(|current| (self.target - current).clamp_length(self.config.max_step))
            .unwrap_or(<W::Position as Vector>::ZERO)
    }

    fn clone_action(&self, pedestrian: W::Agent, reaction: ReactionId) -> Box<dyn SteeringAction<W>> {
        Box::new(Seek::new(pedestrian, reaction, self.config, self.target))
    }
}
