//! Radial "zoom" displacement applied to mesh vertices.

use std::f64::consts::FRAC_PI_2;

use kurbo::Point;

use crate::config::MAX_DISPLACEMENT;

/// Push `point` away from `center` by a sine falloff of its normalized radius.
///
/// The push is `strength * MAX_DISPLACEMENT` pixels at the centre and fades to
/// zero at `max_radius` (the centre-to-corner distance of the canvas).
pub fn displace(point: Point, center: Point, strength: f64, max_radius: f64) -> Point {
    displace_with(point, center, strength, max_radius, MAX_DISPLACEMENT)
}

/// [`displace`] with an explicit peak displacement in pixels.
pub fn displace_with(
    point: Point,
    center: Point,
    strength: f64,
    max_radius: f64,
    max_displacement: f64,
) -> Point {
    if strength == 0.0 {
        return point;
    }

    let delta = point - center;
    let r = delta.hypot();
    if r == 0.0 {
        return center;
    }

    let norm_r = r / max_radius;
    let offset = ((1.0 - norm_r) * FRAC_PI_2).sin() * strength * max_displacement;
    let new_r = r + offset;

    center + delta * (new_r / r)
}

/// Distance from the centre of a `width` x `height` canvas to any corner.
pub fn corner_radius(width: f64, height: f64) -> f64 {
    (width * 0.5).hypot(height * 0.5)
}
