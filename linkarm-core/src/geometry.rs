use std::f32::consts::PI;

use nalgebra::Point2;

/// Rotation applied to the base of every chain.
///
/// Turns the reference frame so that a zero commanded angle points the first
/// link straight up, which is towards negative y.
pub const ROOT_OFFSET: f32 = -PI / 2.0;

/// Convert degrees to radians.
#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

/// Convert radians to degrees.
#[inline]
pub fn to_degrees(radians: f32) -> f32 {
    radians * 180.0 / PI
}

/// Round both coordinates to the nearest integer.
#[inline]
pub fn round_point(point: Point2<f32>) -> Point2<f32> {
    Point2::new(point.x.round(), point.y.round())
}

/// Project a point along an angle.
///
/// Returns the point at `length` distance from `origin` in the direction of
/// `angle`. The angle is not required to be normalized.
pub fn project(origin: &Point2<f32>, length: f32, angle: f32) -> Point2<f32> {
    Point2::new(
        origin.x + length * angle.cos(),
        origin.y + length * angle.sin(),
    )
}
