use tracing::trace;

use ped_core::{AgentId, PedestrianWorld, ReactionId, SteeringConfig, Vector};

use crate::SteeringAction;

/// Moves the pedestrian towards the other members of its group.
///
/// The displacement is `centroid(group) - current position`, clamped to the maximum step. The
/// owner is not part of its own group, so a pedestrian alone does not move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cohesion<A> {
    pedestrian: A,
    reaction: ReactionId,
    config: SteeringConfig,
}

impl<A: AgentId> Cohesion<A> {
    pub fn new(pedestrian: A, reaction: ReactionId, config: SteeringConfig) -> Self {
        Self {
            pedestrian,
            reaction,
            config,
        }
    }
}

impl<W> SteeringAction<W> for Cohesion<W::Agent>
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
        world.groups().members(self.pedestrian)
    }

    fn next_position(&self, world: &W) -> W::Position {
        match (self.centroid(world), self.current_position(world)) {
            (Some(centroid), Some(current)) => {
                (centroid - current).clamp_length(self.config.max_step)
            }
            _ => {
                trace!(agent = ?self.pedestrian, "cohesion: nobody to join");
                <W::Position as Vector>::ZERO
            }
        }
    }

    fn clone_action(&self, pedestrian: W::Agent, reaction: ReactionId) -> Box<dyn SteeringAction<W>> {
        Box::new(Cohesion::new(pedestrian, reaction, self.config))
    }
}
