//! Region graphs, landmarks and per-pedestrian cognitive maps.
//!
//! The environment owns a ground-truth [`NavigationGraph`] of convex regions. Each orienting
//! pedestrian derives from it, once, a sparse and imperfect [`CognitiveMap`]: a spanning forest
//! over landmarks placed in a random subset of the regions.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod cognitive_map;
pub mod landmark;
pub mod pedestrian;
pub mod region_graph;

pub use cognitive_map::{build_cognitive_map, landmark_budget, CognitiveMap, LandmarkId};
pub use landmark::{DestinationLandmarks, LandmarkFactory, ScaledLandmarks};
pub use pedestrian::OrientingPedestrian;
pub use region_graph::{NavigationGraph, RegionGraph, RegionId};
