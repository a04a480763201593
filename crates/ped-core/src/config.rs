//! Configuration consumed (not owned) by the pedestrian crates.
//!
//! Scenario loading happens elsewhere; these structs are what it hands over. With the `serde`
//! feature every field is optional on input and falls back to its default.

use core::f32::consts::PI;

use crate::error::{check_knowledge_degree, require_positive};
use crate::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-pedestrian settings for cognitive map generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrientingConfig {
    /// Fraction of the environment's regions the pedestrian knows, in `[0, 1]`.
    pub knowledge_degree: f32,
    /// Regions whose diameter is not larger than `min_area_factor` times the pedestrian's own
    /// diameter are too small to hold a landmark.
    pub min_area_factor: f32,
    /// Seed of the pedestrian's own random source.
    pub seed: u64,
}

impl Default for OrientingConfig {
    fn default() -> Self {
        Self {
            knowledge_degree: 1.0,
            min_area_factor: 10.0,
            seed: 0,
        }
    }
}

impl OrientingConfig {
    pub fn new(knowledge_degree: f32, seed: u64) -> Self {
        Self {
            knowledge_degree,
            seed,
            ..Self::default()
        }
    }

    pub fn with_min_area_factor(mut self, factor: f32) -> Self {
        self.min_area_factor = factor;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_knowledge_degree(self.knowledge_degree)?;
        require_positive("min_area_factor", self.min_area_factor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SteeringConfig {
    /// Upper bound on the length of a single displacement.
    pub max_step: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self { max_step: 1.0 }
    }
}

impl SteeringConfig {
    pub fn new(max_step: f32) -> Result<Self> {
        let config = Self { max_step };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("max_step", self.max_step)
    }
}

/// Sensory ranges of a cognitive pedestrian.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PerceptionConfig {
    pub view_distance: f32,
    /// Full opening angle of the field of view, radians.
    pub view_aperture: f32,
    pub hearing_radius: f32,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            view_distance: 10.0,
            view_aperture: 2.0 * PI / 3.0,
            hearing_radius: 5.0,
        }
    }
}

impl PerceptionConfig {
    pub fn validate(&self) -> Result<()> {
        require_positive("view_distance", self.view_distance)?;
        require_positive("view_aperture", self.view_aperture)?;
        require_positive("hearing_radius", self.hearing_radius)
    }
}
