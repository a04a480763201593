use core::f32::consts::TAU;
use std::collections::BTreeSet;

use tracing::trace;

use ped_core::{DeterministicRng, PedestrianWorld, PerceptionConfig, Result, Vec2};

use crate::{FieldOfView2D, HearingField, InfluenceSphere};

/// Agents whose position satisfies `sphere`, ordered by id, `exclude` left out.
pub fn influenced_agents<W, S>(world: &W, sphere: &S, exclude: Option<W::Agent>) -> Vec<W::Agent>
where
    W: PedestrianWorld,
    S: InfluenceSphere<W::Position> + ?Sized,
{
    let mut out: Vec<W::Agent> = world
        .agents()
        .into_iter()
        .filter(|a| Some(*a) != exclude)
        .filter(|a| world.position(*a).is_some_and(|p| sphere.is_influenced(p)))
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Senses of a cognitive pedestrian: a field of view with a random heading, plus hearing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    config: PerceptionConfig,
}

impl Perception {
    pub fn new(config: PerceptionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PerceptionConfig {
        &self.config
    }

    /// Field of view at `origin`; the heading is drawn from `rng`, which should be the
    /// pedestrian's own random source so that runs stay reproducible.
    pub fn field_of_view<R>(&self, origin: Vec2, rng: &mut R) -> FieldOfView2D
    where
        R: DeterministicRng + ?Sized,
    {
        FieldOfView2D::new(
            origin,
            rng.next_f32_unit() * TAU,
            self.config.view_aperture,
            self.config.view_distance,
        )
    }

    pub fn hearing_field<P>(&self, origin: P) -> HearingField<P> {
        HearingField::new(origin, self.config.hearing_radius)
    }

    /// Agents that influence `agent`'s decisions: those it sees united with those it hears,
    /// without duplicates and without `agent` itself, ordered by id.
    pub fn influential_agents<W, R>(&self, world: &W, agent: W::Agent, rng: &mut R) -> Vec<W::Agent>
    where
        W: PedestrianWorld<Position = Vec2>,
        R: DeterministicRng + ?Sized,
    {
        let Some(origin) = world.position(agent) else {
            trace!(agent = ?agent, "no position, perceives nobody");
            return Vec::new();
        };
        let seen = influenced_agents(world, &self.field_of_view(origin, rng), Some(agent));
        let heard = influenced_agents(world, &self.hearing_field(origin), Some(agent));
        seen.into_iter()
            .chain(heard)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
