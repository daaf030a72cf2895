//! Per-frame force models applied before integration.

use crate::{
    body::Body,
    vector::{Vec2, VecExt},
};

/// Weight of `body` under the uniform field `g` (`F = m g`).
#[inline]
pub fn gravity_force(body: &Body, g: Vec2) -> Vec2 {
    g * body.mass()
}

/// Quadratic drag opposing motion: `-normalize(v) * |v|^2 * coefficient`.
///
/// With `scale_by_radius` the force is additionally multiplied by the body radius, so larger
/// bodies feel more drag. Returns `None` when `|v| <= eps`.
pub fn damping_force(body: &Body, coefficient: f32, scale_by_radius: bool, eps: f32) -> Option<Vec2> {
    let dir = body.vel.try_normalized(eps)?;
    let mut magnitude = body.vel.mag_sq() * coefficient;
    if scale_by_radius {
        magnitude *= body.radius();
    }
    Some(-dir * magnitude)
}
