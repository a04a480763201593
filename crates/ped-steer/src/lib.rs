//! Steering actions: bounded per-step displacements computed from the positions of group mates
//! and perceived pedestrians.
//!
//! Every behavior implements [`SteeringAction`]; they only differ in which peers
//! [`SteeringAction::group`] returns and how [`SteeringAction::next_position`] turns their
//! positions into a displacement.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod blend;
pub mod cohesion;
pub mod seek;
pub mod separation;

pub use action::{step, SteeringAction};
pub use blend::Blended;
pub use cohesion::Cohesion;
pub use seek::Seek;
pub use separation::Separation;
