//! 2D vector math.
//!
//! Arithmetic, dot products and lengths come from [`ultraviolet::Vec2`]; this module only adds
//! the guarded operations the engine needs around near-zero vectors.

pub use ultraviolet::Vec2;

/// Extra operations on [`Vec2`].
pub trait VecExt: Sized {
    /// Unit vector in the same direction, or `None` if the length is not above `eps`.
    fn try_normalized(self, eps: f32) -> Option<Self>;

    /// True when every component is finite.
    fn all_finite(self) -> bool;
}

impl VecExt for Vec2 {
    #[inline]
    fn try_normalized(self, eps: f32) -> Option<Vec2> {
        let mag = self.mag();
        if mag > eps { Some(self / mag) } else { None }
    }

    #[inline]
    fn all_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
