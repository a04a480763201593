//! Landmark creation hook used by the cognitive map builder.

use ped_core::{ConvexShape, Transformation};

/// Creates the landmark standing in for a region in a pedestrian's cognitive map.
///
/// Contract, not checked by callers in release builds:
/// - the returned landmark lies entirely within `region`;
/// - if `region` contains one or more points of interest, the landmark contains at least one.
///
/// Implementations must not have side effects beyond building the landmark.
pub trait LandmarkFactory<N: ConvexShape> {
    type Landmark: ConvexShape<Position = N::Position>;

    fn create_landmark(&self, region: &N) -> Self::Landmark;
}

impl<N, L, F> LandmarkFactory<N> for F
where
    N: ConvexShape,
    L: ConvexShape<Position = N::Position>,
    F: Fn(&N) -> L,
{
    type Landmark = L;

    fn create_landmark(&self, region: &N) -> L {
        self(region)
    }
}

/// Landmarks are copies of their region shrunk about its centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledLandmarks {
    factor: f32,
}

impl ScaledLandmarks {
    /// `factor` is clamped to `(0, 1]`; anything larger would leave the region.
    pub fn new(factor: f32) -> Self {
        let factor = if factor.is_finite() && factor > 0.0 {
            factor.min(1.0)
        } else {
            1.0
        };
        Self { factor }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }
}

impl Default for ScaledLandmarks {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl<N: ConvexShape> LandmarkFactory<N> for ScaledLandmarks {
    type Landmark = N;

    fn create_landmark(&self, region: &N) -> N {
        region.transformed(&Transformation::scale_about(region.centroid(), self.factor))
    }
}

/// Like [`ScaledLandmarks`], but shrinks towards a point of interest when the region holds one.
///
/// Scaling a convex shape about one of its own points by a factor in `(0, 1]` keeps the result
/// inside the shape and keeps the pivot inside the result, which is exactly the factory contract.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationLandmarks<P> {
    destinations: Vec<P>,
    scaled: ScaledLandmarks,
}

impl<P> DestinationLandmarks<P> {
    pub fn new(destinations: Vec<P>, factor: f32) -> Self {
        Self {
            destinations,
            scaled: ScaledLandmarks::new(factor),
        }
    }

    pub fn destinations(&self) -> &[P] {
        &self.destinations
    }
}

impl<N: ConvexShape> LandmarkFactory<N> for DestinationLandmarks<N::Position> {
    type Landmark = N;

    fn create_landmark(&self, region: &N) -> N {
        let pivot = self
            .destinations
            .iter()
            .copied()
            .find(|d| region.contains(*d))
            .unwrap_or_else(|| region.centroid());
        region.transformed(&Transformation::scale_about(pivot, self.scaled.factor()))
    }
}
