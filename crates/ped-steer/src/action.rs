use core::fmt::Debug;

use tracing::trace;

use ped_core::{PedestrianWorld, PedestrianWorldMut, ReactionId, TickContext, Vector};

/// A per-step rule computing a bounded displacement for its owner.
///
/// Actions hold no simulation data beyond the owning pedestrian, the reaction that schedules
/// them and their own parameters; the world is handed in on every call.
pub trait SteeringAction<W>: Debug + Send + Sync + 'static
where
    W: PedestrianWorld + 'static,
{
    fn pedestrian(&self) -> W::Agent;

    fn reaction(&self) -> ReactionId;

    /// Upper bound on the length of [`Self::next_position`].
    fn max_step(&self) -> f32;

    /// Peers this behavior reacts to.
    fn group(&self, world: &W) -> Vec<W::Agent>;

    /// Desired displacement for this step, already clamped to [`Self::max_step`].
    fn next_position(&self, world: &W) -> W::Position;

    /// Same behavior bound to another owner and timer, e.g. when a pedestrian is replicated or a
    /// group splits.
    fn clone_action(&self, pedestrian: W::Agent, reaction: ReactionId)
        -> Box<dyn SteeringAction<W>>;

    fn current_position(&self, world: &W) -> Option<W::Position> {
        world.position(self.pedestrian())
    }

    /// Mean position of [`Self::group`], `None` when no member has a position.
    fn centroid(&self, world: &W) -> Option<W::Position> {
        <W::Position as Vector>::mean(
            self.group(world)
                .into_iter()
                .filter_map(|agent| world.position(agent)),
        )
    }
}

/// Computes `action`'s displacement and has the world apply it.
pub fn step<W, S>(action: &S, ctx: &TickContext, world: &mut W) -> W::Position
where
    W: PedestrianWorldMut + 'static,
    S: SteeringAction<W> + ?Sized,
{
    let displacement = action.next_position(world);
    trace!(
        tick = ctx.tick,
        agent = ?action.pedestrian(),
        length = displacement.length(),
        "steering step"
    );
    world.move_by(action.pedestrian(), displacement);
    displacement
}
