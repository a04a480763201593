//! Deterministic, engine-agnostic pedestrian simulation primitives.
//!
//! Everything here is written against small capability traits ([`Vector`], [`ConvexShape`],
//! [`PedestrianWorld`]) so the navigation, perception and steering crates work the same way in
//! 2D and 3D.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod error;
pub mod group;
pub mod math;
pub mod rng;
pub mod shape;
pub mod tick;
pub mod world;

pub use agent::{AgentId, ReactionId};
pub use config::{OrientingConfig, PerceptionConfig, SteeringConfig};
pub use error::{check_knowledge_degree, require_positive, PedError, Result};
pub use group::{Group, GroupId, GroupResolver, Groups};
pub use math::{Vec2, Vec3, Vector};
pub use rng::{shuffle, DeterministicRng, SplitMix64};
pub use shape::{Circle, ConvexPolygon, ConvexShape, Sphere, Transformation};
pub use tick::TickContext;
pub use world::{PedestrianWorld, PedestrianWorldMut, WorldView};
