use core::f32::consts::{PI, TAU};

use ped_core::{Vec2, Vector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const ANGLE_EPSILON: f32 = 1e-5;

/// Geometric predicate over positions: does something at `position` influence the owner?
pub trait InfluenceSphere<P> {
    fn is_influenced(&self, position: P) -> bool;
}

/// Circular sector in front of a pedestrian.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldOfView2D {
    pub origin: Vec2,
    /// Direction the pedestrian is looking at, radians counter-clockwise from +x.
    pub heading: f32,
    /// Full opening angle, radians.
    pub aperture: f32,
    pub radius: f32,
}

impl FieldOfView2D {
    pub fn new(origin: Vec2, heading: f32, aperture: f32, radius: f32) -> Self {
        Self {
            origin,
            heading,
            aperture,
            radius,
        }
    }
}

impl InfluenceSphere<Vec2> for FieldOfView2D {
    fn is_influenced(&self, position: Vec2) -> bool {
        if self.radius <= 0.0 {
            return false;
        }
        let offset = position - self.origin;
        let distance = offset.length();
        if distance > self.radius {
            return false;
        }
        if distance <= f32::EPSILON {
            return true;
        }
        let deviation = wrap_angle(offset.angle() - self.heading).abs();
        deviation <= self.aperture * 0.5 + ANGLE_EPSILON
    }
}

/// Omnidirectional range, in any dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HearingField<P> {
    pub origin: P,
    pub radius: f32,
}

impl<P> HearingField<P> {
    pub fn new(origin: P, radius: f32) -> Self {
        Self { origin, radius }
    }
}

impl<P: Vector> InfluenceSphere<P> for HearingField<P> {
    fn is_influenced(&self, position: P) -> bool {
        self.radius > 0.0 && self.origin.distance(position) <= self.radius
    }
}

/// Maps an angle into `[-pi, pi)`.
fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}
