use crate::{
    body::Body,
    error::{Error, Result},
    vector::{Vec2, VecExt},
};

/// Axis-aligned world rectangle that contains every body.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Vec2::zero(),
            max: Vec2::new(800.0, 600.0),
        }
    }
}

impl Bounds {
    /// Creates bounds spanning `min..max`. Both corners must be finite and `min < max` on each axis.
    pub fn new(min: Vec2, max: Vec2) -> Result<Self> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Bounds of a `width` x `height` screen with the origin at the top-left corner.
    pub fn from_size(width: f32, height: f32) -> Result<Self> {
        Self::new(Vec2::zero(), Vec2::new(width, height))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min.all_finite() || !self.max.all_finite() {
            return Err(Error::InvalidConfig("bounds must be finite".into()));
        }
        if self.min.x >= self.max.x || self.min.y >= self.max.y {
            return Err(Error::InvalidConfig(format!(
                "bounds are empty or inverted: min {:?}, max {:?}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// True if the whole circle lies inside, allowing `eps` of penetration.
    pub fn contains_circle(&self, center: Vec2, radius: f32, eps: f32) -> bool {
        center.x - radius >= self.min.x - eps
            && center.x + radius <= self.max.x + eps
            && center.y - radius >= self.min.y - eps
            && center.y + radius <= self.max.y + eps
    }
}

/// Clamps one coordinate into `[lo + r, hi - r]`, reflecting the matching velocity component
/// only while it still points out of bounds. Returns true if the coordinate was clamped.
#[inline]
fn resolve_axis(pos: &mut f32, vel: &mut f32, radius: f32, lo: f32, hi: f32, restitution: f32) -> bool {
    if *pos - radius < lo {
        *pos = lo + radius;
        if *vel < 0.0 {
            *vel *= -restitution;
        }
        true
    } else if *pos + radius > hi {
        *pos = hi - radius;
        if *vel > 0.0 {
            *vel *= -restitution;
        }
        true
    } else {
        false
    }
}

/// Keeps `body` inside `bounds`, handling each axis independently.
///
/// Immovable bodies are left where they are. Returns true if any axis was clamped.
pub fn resolve_bounds(body: &mut Body, bounds: &Bounds, restitution: f32) -> bool {
    if !body.is_movable() {
        return false;
    }
    let r = body.radius();
    let hit_x = resolve_axis(&mut body.pos.x, &mut body.vel.x, r, bounds.min.x, bounds.max.x, restitution);
    let hit_y = resolve_axis(&mut body.pos.y, &mut body.vel.y, r, bounds.min.y, bounds.max.y, restitution);
    hit_x || hit_y
}
