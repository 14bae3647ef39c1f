//! Collision predicates
//!
//! Everything in the game is a circle or a point, so these stay small.

use glam::Vec2;

/// Two circles overlap (strictly closer than the sum of their radii)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// A point is strictly closer than `threshold` to a center
#[inline]
pub fn point_within(point: Vec2, center: Vec2, threshold: f32) -> bool {
    point.distance(center) < threshold
}

/// A point lies inside the closed canvas rectangle `[0, width] x [0, height]`
#[inline]
pub fn inside_canvas(point: Vec2, width: f32, height: f32) -> bool {
    (0.0..=width).contains(&point.x) && (0.0..=height).contains(&point.y)
}

/// Clamp a circle center so the circle stays inside the canvas
#[inline]
pub fn clamp_to_canvas(center: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        center.x.max(radius).min(width - radius),
        center.y.max(radius).min(height - radius),
    )
}
