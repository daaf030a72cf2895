//! Pointer grabbing.
//!
//! A grabbed body is pinned to the pointer (plus the offset at which it was picked up) and
//! skipped by force application and integration. When released it is thrown with the velocity
//! of the pointer over the last frame.

use crate::{body::Body, vector::Vec2};

/// Smallest frame time used to estimate a throw velocity.
pub const MIN_RELEASE_DT: f32 = 1e-6;

/// State of a pointer holding one body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grab {
    /// Index of the held body.
    pub body: usize,
    offset: Vec2,
    pointer: Vec2,
    anchor: Vec2,
}

impl Grab {
    /// Starts holding the body at index `body`, centered at `body_pos`, from `point`.
    pub fn new(body: usize, body_pos: Vec2, point: Vec2) -> Self {
        Self {
            body,
            offset: body_pos - point,
            pointer: point,
            anchor: point,
        }
    }

    /// Where the held body's center belongs for the current pointer position.
    #[inline]
    pub fn target(&self) -> Vec2 {
        self.pointer + self.offset
    }

    #[inline]
    pub fn move_to(&mut self, point: Vec2) {
        self.pointer = point;
    }

    /// Marks the end of a frame: later throw estimates are measured from here.
    #[inline]
    pub fn end_frame(&mut self) {
        self.anchor = self.pointer;
    }

    /// Pointer velocity since the last frame boundary, given that frame's duration.
    pub fn release_velocity(&self, dt: f32) -> Vec2 {
        (self.pointer - self.anchor) / dt.max(MIN_RELEASE_DT)
    }
}

/// Index of the first body whose circle contains `point`.
pub fn pick(bodies: &[Body], point: Vec2) -> Option<usize> {
    bodies.iter().position(|b| b.contains_point(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_grab_offset() {
        let mut g = Grab::new(0, Vec2::new(10.0, 10.0), Vec2::new(12.0, 9.0));
        assert_eq!(g.target(), Vec2::new(10.0, 10.0));
        g.move_to(Vec2::new(22.0, 19.0));
        assert_eq!(g.target(), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn release_velocity_uses_last_frame_motion() {
        let mut g = Grab::new(3, Vec2::zero(), Vec2::zero());
        g.move_to(Vec2::new(5.0, 0.0));
        g.end_frame();
        g.move_to(Vec2::new(6.0, 2.0));
        let v = g.release_velocity(0.5);
        assert_eq!(v, Vec2::new(2.0, 4.0));
    }

    #[test]
    fn release_without_motion_is_at_rest() {
        let g = Grab::new(0, Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0));
        assert_eq!(g.release_velocity(0.0), Vec2::zero());
    }

    #[test]
    fn picks_first_containing_body() {
        let bodies = vec![
            Body::new(Vec2::new(0.0, 0.0), Vec2::zero(), 1.0, 5.0).unwrap(),
            Body::new(Vec2::new(4.0, 0.0), Vec2::zero(), 1.0, 5.0).unwrap(),
        ];
        assert_eq!(pick(&bodies, Vec2::new(3.0, 0.0)), Some(0));
        assert_eq!(pick(&bodies, Vec2::new(8.0, 0.0)), Some(1));
        assert_eq!(pick(&bodies, Vec2::new(50.0, 0.0)), None);
    }
}
