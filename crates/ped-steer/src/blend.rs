use core::fmt;

use ped_core::{PedestrianWorld, ReactionId, SteeringConfig, Vector};

use crate::SteeringAction;

/// Weighted sum of other actions' displacements, clamped to this action's own maximum step.
///
/// Each part is evaluated with its own bound first, so a heavily weighted part can still not
/// dominate beyond `weight * part.max_step()`.
pub struct Blended<W: PedestrianWorld + 'static> {
    pedestrian: W::Agent,
    reaction: ReactionId,
    config: SteeringConfig,
    parts: Vec<(f32, Box<dyn SteeringAction<W>>)>,
}

impl<W: PedestrianWorld + 'static> Blended<W> {
    pub fn new(pedestrian: W::Agent, reaction: ReactionId, config: SteeringConfig) -> Self {
        Self {
            pedestrian,
            reaction,
            config,
            parts: Vec::new(),
        }
    }

    /// Adds a part. Parts are rebound to this action's owner and reaction.
    pub fn with(mut self, weight: f32, action: &dyn SteeringAction<W>) -> Self {
        self.push(weight, action);
        self
    }

    pub fn push(&mut self, weight: f32, action: &dyn SteeringAction<W>) {
        self.parts
            .push((weight, action.clone_action(self.pedestrian, self.reaction)));
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl<W: PedestrianWorld + 'static> fmt::Debug for Blended<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blended")
            .field("pedestrian", &self.pedestrian)
            .field("reaction", &self.reaction)
            .field("config", &self.config)
            .field("parts", &self.parts)
            .finish()
    }
}

impl<W: PedestrianWorld + 'static> SteeringAction<W> for Blended<W> {
    fn pedestrian(&self) -> W::Agent {
        self.pedestrian
    }

    fn reaction(&self) -> ReactionId {
        self.reaction
    }

    fn max_step(&self) -> f32 {
        self.config.max_step
    }

    /// Union of the parts' groups, ordered by id.
    fn group(&self, world: &W) -> Vec<W::Agent> {
        let mut out: Vec<W::Agent> = self
            .parts
            .iter()
            .flat_map(|(_, part)| part.group(world))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    fn next_position(&self, world: &W) -> W::Position {
        self.parts
            .iter()
            .fold(<W::Position as Vector>::ZERO, |sum, (weight, part)| {
                sum + part.next_position(world) * *weight
            })
            .clamp_length(self.config.max_step)
    }

    fn clone_action(&self, pedestrian: W::Agent, reaction: ReactionId) -> Box<dyn SteeringAction<W>> {
        Box::new(Blended {
            pedestrian,
            reaction,
            config: self.config,
            parts: self
                .parts
                .iter()
                .map(|(weight, part)| (*weight, part.clone_action(pedestrian, reaction)))
                .collect(),
        })
    }
}
