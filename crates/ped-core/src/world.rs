use crate::{AgentId, GroupResolver, Vector};

/// Read-only world access.
///
/// Subsystems define extension traits with the queries they need.
pub trait WorldView {
    type Agent: AgentId;
}

/// The environment as seen by perception and steering: where pedestrians are and who belongs
/// with whom. Reads must not mutate anything.
pub trait PedestrianWorld: WorldView {
    type Position: Vector;

    fn position(&self, agent: Self::Agent) -> Option<Self::Position>;

    /// Every pedestrian in the environment, ordered by id.
    fn agents(&self) -> Vec<Self::Agent>;

    fn groups(&self) -> &dyn GroupResolver<Self::Agent>;
}

/// Effect sink: applying a displacement is the environment's job, serialized by the scheduler.
pub trait PedestrianWorldMut: PedestrianWorld {
    fn move_by(&mut self, agent: Self::Agent, displacement: Self::Position);
}
