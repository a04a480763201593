use ped_core::{AgentId, PedestrianWorld, ReactionId, SteeringConfig, Vector};
use ped_sense::{influenced_agents, HearingField};

use crate::SteeringAction;

/// Moves the pedestrian away from everybody within `radius`, group mates or not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separation<A> {
    pedestrian: A,
    reaction: ReactionId,
    config: SteeringConfig,
    radius: f32,
}

impl<A: AgentId> Separation<A> {
    pub fn new(pedestrian: A, reaction: ReactionId, config: SteeringConfig, radius: f32) -> Self {
        Self {
            pedestrian,
            reaction,
            config,
            radius,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl<W> SteeringAction<W> for Separation<W::Agent>
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

    fn group(&self, world: &W) -> Vec<W::Agent> {
        match world.position(self.pedestrian) {
            Some(origin) => influenced_agents(
                world,
                &HearingField::new(origin, self.radius),
                Some(self.pedestrian),
            ),
            None => Vec::new(),
        }
    }

    fn next_position(&self, world: &W) -> W::Position {
        match (self.centroid(world), self.current_position(world)) {
            (Some(crowd), Some(current)) => (current - crowd).clamp_length(self.config.max_step),
            _ => <W::Position as Vector>::ZERO,
        }
    }

    fn clone_action(&self, pedestrian: W::Agent, reaction: ReactionId) -> Box<dyn SteeringAction<W>> {
        Box::new(Separation::new(pedestrian, reaction, self.config, self.radius))
    }
}
