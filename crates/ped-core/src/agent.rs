use core::fmt::Debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier for a pedestrian.
///
/// Reproducible runs need:
/// - a total order (`Ord`) so influence sets and groups iterate the same way every run
/// - a stable numeric ID (`stable_id`) for seeding per-pedestrian random sources
pub trait AgentId: Copy + Ord + Eq + Debug + Send + Sync + 'static {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

impl AgentId for usize {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

/// Handle of the scheduler reaction that drives a steering action's timing.
///
/// The scheduler itself lives outside this workspace; actions only carry the handle around so a
/// cloned action can be rebound to a different timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReactionId(pub u64);
