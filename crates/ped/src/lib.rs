//! Umbrella crate that re-exports the `ped-*` building blocks.
//!
//! - [`core`]: vectors, convex shapes, groups, configuration and the world traits
//! - [`nav`]: cognitive maps built from a region graph, and the orienting pedestrian
//! - [`sense`]: fields of view, hearing and influence sets
//! - [`steer`]: cohesion and the other steering actions

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use ped_core as core;

#[cfg(feature = "nav")]
#[cfg_attr(docsrs, doc(cfg(feature = "nav")))]
pub use ped_nav as nav;

#[cfg(feature = "sense")]
#[cfg_attr(docsrs, doc(cfg(feature = "sense")))]
pub use ped_sense as sense;

#[cfg(feature = "steer")]
#[cfg_attr(docsrs, doc(cfg(feature = "steer")))]
pub use ped_steer as steer;
