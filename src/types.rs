//! Core data types for field evaluation.

use nalgebra::Vector2;

/// A field point (x, y) in the rupture-tip-centered frame.
///
/// `x` is the distance along the fault from the current tip position,
/// `y` the distance off the rupture plane.
pub type FieldPoint = Vector2<f64>;

/// Build evaluation points from an ordered array of x coordinates at a fixed
/// off-fault distance y.
///
/// This is the usual calling shape for fault-parallel stress profiles: a dense
/// x sweep at one sensor height.
pub fn field_points(xs: &[f64], y: f64) -> Vec<FieldPoint> {
    xs.iter().map(|&x| FieldPoint::new(x, y)).collect()
}
