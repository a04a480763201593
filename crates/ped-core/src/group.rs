use std::collections::BTreeMap;

use crate::AgentId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupId(pub u32);

/// Social group: an ordered, duplicate-free list of pedestrian ids.
///
/// Groups reference pedestrians, they never own them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Group<A> {
    members: Vec<A>,
}

impl<A> Default for Group<A> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<A: AgentId> Group<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[A] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, agent: A) -> bool {
        self.members.contains(&agent)
    }

    /// Returns `false` if `agent` already belonged to the group.
    pub fn add(&mut self, agent: A) -> bool {
        if self.contains(agent) {
            return false;
        }
        self.members.push(agent);
        true
    }

    pub fn remove(&mut self, agent: A) -> bool {
        let before = self.members.len();
        self.members.retain(|m| *m != agent);
        self.members.len() != before
    }
}

impl<A: AgentId> FromIterator<A> for Group<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        let mut group = Group::new();
        for agent in iter {
            group.add(agent);
        }
        group
    }
}

/// Resolves the co-members of a pedestrian's membership group.
///
/// The returned list never contains `pedestrian` itself, and its order must not change between
/// two reads within the same tick.
pub trait GroupResolver<A: AgentId> {
    fn members(&self, pedestrian: A) -> Vec<A>;
}

/// Registry of groups keyed by [`GroupId`], with at most one group per pedestrian.
#[derive(Debug, Clone)]
pub struct Groups<A> {
    groups: BTreeMap<GroupId, Group<A>>,
    membership: BTreeMap<A, GroupId>,
}

impl<A> Default for Groups<A> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
            membership: BTreeMap::new(),
        }
    }
}

impl<A: AgentId> Groups<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `agent` into `group`, leaving its previous group if any.
    pub fn join(&mut self, agent: A, group: GroupId) {
        if let Some(previous) = self.membership.insert(agent, group) {
            if previous != group {
                self.detach(agent, previous);
            }
        }
        self.groups.entry(group).or_default().add(agent);
    }

    pub fn leave(&mut self, agent: A) -> Option<GroupId> {
        let previous = self.membership.remove(&agent)?;
        self.detach(agent, previous);
        Some(previous)
    }

    pub fn group_of(&self, agent: A) -> Option<GroupId> {
        self.membership.get(&agent).copied()
    }

    pub fn group(&self, id: GroupId) -> Option<&Group<A>> {
        self.groups.get(&id)
    }

    fn detach(&mut self, agent: A, group: GroupId) {
        if let Some(g) = self.groups.get_mut(&group) {
            g.remove(agent);
            if g.is_empty() {
                self.groups.remove(&group);
            }
        }
    }
}

impl<A: AgentId> GroupResolver<A> for Groups<A> {
    fn members(&self, pedestrian: A) -> Vec<A> {
        let Some(group) = self.group_of(pedestrian).and_then(|id| self.group(id)) else {
            return Vec::new();
        };
        group
            .members()
            .iter()
            .copied()
            .filter(|m| *m != pedestrian)
            .collect()
    }
}
