//! Convex shape and transformation capabilities.
//!
//! Regions of the environment and landmarks of a cognitive map are both convex shapes. The
//! navigation code only needs a diameter, a containment test and a way to shrink a shape inside
//! itself, so that is all the trait asks for.

use core::fmt::Debug;

use crate::{PedError, Result, Vec2, Vec3, Vector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used by containment tests; shapes touching a boundary count as inside.
pub const CONTAINS_EPSILON: f32 = 1e-4;

/// Uniform scale about `pivot`, followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transformation<P> {
    pub pivot: P,
    pub scale: f32,
    pub translation: P,
}

impl<P: Vector> Transformation<P> {
    pub fn identity() -> Self {
        Self {
            pivot: P::ZERO,
            scale: 1.0,
            translation: P::ZERO,
        }
    }

    pub fn scale_about(pivot: P, scale: f32) -> Self {
        Self {
            pivot,
            scale,
            translation: P::ZERO,
        }
    }

    pub fn translate(translation: P) -> Self {
        Self {
            pivot: P::ZERO,
            scale: 1.0,
            translation,
        }
    }

    pub fn apply(&self, point: P) -> P {
        self.pivot + (point - self.pivot) * self.scale + self.translation
    }
}

pub trait ConvexShape: Clone + Debug {
    type Position: Vector;

    fn centroid(&self) -> Self::Position;

    /// Largest distance between two points of the shape.
    fn diameter(&self) -> f32;

    fn contains(&self, point: Self::Position) -> bool;

    /// Whether `other` lies entirely within `self`.
    fn contains_shape(&self, other: &Self) -> bool;

    fn transformed(&self, transformation: &Transformation<Self::Position>) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl ConvexShape for Circle {
    type Position = Vec2;

    fn centroid(&self) -> Vec2 {
        self.center
    }

    fn diameter(&self) -> f32 {
        2.0 * self.radius.max(0.0)
    }

    fn contains(&self, point: Vec2) -> bool {
        self.center.distance(point) <= self.radius + CONTAINS_EPSILON
    }

    fn contains_shape(&self, other: &Self) -> bool {
        self.center.distance(other.center) + other.radius <= self.radius + CONTAINS_EPSILON
    }

    fn transformed(&self, transformation: &Transformation<Vec2>) -> Self {
        Self {
            center: transformation.apply(self.center),
            radius: self.radius * transformation.scale.abs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl ConvexShape for Sphere {
    type Position = Vec3;

    fn centroid(&self) -> Vec3 {
        self.center
    }

    fn diameter(&self) -> f32 {
        2.0 * self.radius.max(0.0)
    }

    fn contains(&self, point: Vec3) -> bool {
        self.center.distance(point) <= self.radius + CONTAINS_EPSILON
    }

    fn contains_shape(&self, other: &Self) -> bool {
        self.center.distance(other.center) + other.radius <= self.radius + CONTAINS_EPSILON
    }

    fn transformed(&self, transformation: &Transformation<Vec3>) -> Self {
        Self {
            center: transformation.apply(self.center),
            radius: self.radius * transformation.scale.abs(),
        }
    }
}

/// Convex polygon with counter-clockwise vertices.
///
/// Deserialization goes through [`ConvexPolygon::new`], so decoded polygons are validated too.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PolygonVertices"))]
pub struct ConvexPolygon {
    vertices: Vec<Vec2>,
}

/// Unvalidated wire form of [`ConvexPolygon`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct PolygonVertices {
    vertices: Vec<Vec2>,
}

#[cfg(feature = "serde")]
impl TryFrom<PolygonVertices> for ConvexPolygon {
    type Error = PedError;

    fn try_from(raw: PolygonVertices) -> Result<Self> {
        Self::new(raw.vertices)
    }
}

impl ConvexPolygon {
    /// Vertices may be given in either winding; they are stored counter-clockwise.
    pub fn new(mut vertices: Vec<Vec2>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(PedError::InvalidShape(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if signed_area(&vertices) < 0.0 {
            vertices.reverse();
        }
        let n = vertices.len();
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            let c = vertices[(i + 2) % n];
            if (b - a).perp_dot(c - b) < -CONTAINS_EPSILON {
                return Err(PedError::InvalidShape(format!(
                    "polygon is not convex at vertex {}",
                    (i + 1) % n
                )));
            }
        }
        Ok(Self { vertices })
    }

    /// Axis-aligned rectangle with its lower-left corner at `(x, y)`.
    pub fn rectangle(x: f32, y: f32, width: f32, height: f32) -> Self {
        let (w, h) = (width.abs(), height.abs());
        Self {
            vertices: vec![
                Vec2::new(x, y),
                Vec2::new(x + w, y),
                Vec2::new(x + w, y + h),
                Vec2::new(x, y + h),
            ],
        }
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn area(&self) -> f32 {
        signed_area(&self.vertices).abs()
    }
}

impl ConvexShape for ConvexPolygon {
    type Position = Vec2;

    fn centroid(&self) -> Vec2 {
        let area = signed_area(&self.vertices);
        if area.abs() <= f32::EPSILON {
            return Vec2::mean(self.vertices.iter().copied()).unwrap_or(Vec2::ZERO);
        }
        let n = self.vertices.len();
        let mut c = Vec2::ZERO;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            c = c + (a + b) * a.perp_dot(b);
        }
        c / (6.0 * area)
    }

    fn diameter(&self) -> f32 {
        let mut best = 0.0f32;
        for (i, a) in self.vertices.iter().enumerate() {
            for b in &self.vertices[i + 1..] {
                best = best.max(a.distance(*b));
            }
        }
        best
    }

    fn contains(&self, point: Vec2) -> bool {
        let n = self.vertices.len();
        (0..n).all(|i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let edge = b - a;
            let len = edge.length().max(f32::EPSILON);
            edge.perp_dot(point - a) / len >= -CONTAINS_EPSILON
        })
    }

    fn contains_shape(&self, other: &Self) -> bool {
        other.vertices.iter().all(|v| self.contains(*v))
    }

    fn transformed(&self, transformation: &Transformation<Vec2>) -> Self {
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|v| transformation.apply(*v))
                .collect(),
        }
    }
}

fn signed_area(vertices: &[Vec2]) -> f32 {
    let n = vertices.len();
    let mut twice = 0.0;
    for i in 0..n {
        twice += vertices[i].perp_dot(vertices[(i + 1) % n]);
    }
    twice * 0.5
}
