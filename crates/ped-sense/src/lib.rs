//! Influence spheres: sensory predicates deciding which pedestrians affect a decision.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod perception;
pub mod sphere;

pub use perception::{influenced_agents, Perception};
pub use sphere::{FieldOfView2D, HearingField, InfluenceSphere};
