use crate::{
    error::{Error, Result},
    vector::{Vec2, VecExt},
};

/// Opaque presentation attribute carried for the renderer. Ignored by the physics.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A rigid circle with point-mass dynamics.
///
/// `mass == 0` marks an immovable body; its inverse mass is zero and forces, integration,
/// boundary resolution and collision impulses leave it untouched.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct Body {
    /// Position of the center, world units.
    pub pos: Vec2,
    /// Velocity, units per second.
    pub vel: Vec2,
    /// Acceleration accumulated from forces this frame.
    pub acc: Vec2,
    radius: f32,
    mass: f32,
    inv_mass: f32,
    /// Render color.
    pub color: Color,
    /// Set while a pointer holds the body; forces and integration are skipped.
    pub controlled: bool,
}

impl Body {
    /// Creates a body with an empty force accumulator.
    ///
    /// Fails if `radius` is not finite and positive, if `mass` is negative or not finite, or if
    /// `pos`/`vel` contain non-finite components.
    pub fn new(pos: Vec2, vel: Vec2, mass: f32, radius: f32) -> Result<Self> {
        if !pos.all_finite() {
            return Err(Error::InvalidBody("position must be finite".into()));
        }
        if !vel.all_finite() {
            return Err(Error::InvalidBody("velocity must be finite".into()));
        }
        let mut body = Self {
            pos,
            vel,
            acc: Vec2::zero(),
            radius: 1.0,
            mass: 0.0,
            inv_mass: 0.0,
            color: Color::default(),
            controlled: false,
        };
        body.set_radius(radius)?;
        body.set_mass(mass)?;
        Ok(body)
    }

    /// Creates an immovable (infinite mass) body at rest.
    pub fn immovable(pos: Vec2, radius: f32) -> Result<Self> {
        Self::new(pos, Vec2::zero(), 0.0, radius)
    }

    /// Builder-style color assignment.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Radius of the circle, always finite and > 0.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidBody(format!(
                "radius must be finite and > 0, got {radius}"
            )));
        }
        self.radius = radius;
        Ok(())
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// `1 / mass`, or `0` for an immovable body.
    #[inline]
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Changes the mass and recomputes the cached inverse mass.
    pub fn set_mass(&mut self, mass: f32) -> Result<()> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(Error::InvalidBody(format!(
                "mass must be finite and >= 0, got {mass}"
            )));
        }
        self.mass = mass;
        self.inv_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
        Ok(())
    }

    #[inline]
    pub fn is_movable(&self) -> bool {
        self.inv_mass > 0.0
    }

    /// Resets the force accumulator. Called at the start of every frame.
    #[inline]
    pub fn clear_forces(&mut self) {
        self.acc = Vec2::zero();
    }

    /// Accumulates `force` as acceleration (`a += F / m`). No-op for immovable bodies.
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        if self.inv_mass > 0.0 {
            self.acc += force * self.inv_mass;
        }
    }

    /// Advances the body by `dt` with semi-implicit Euler integration
    /// (velocity first, then position with the new velocity).
    ///
    /// Acceleration is left as is; it is rebuilt by force application each frame.
    pub fn integrate(&mut self, dt: f32) -> Result<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(Error::InvalidTimestep(dt));
        }
        if !self.is_movable() {
            return Ok(());
        }
        self.vel += self.acc * dt;
        self.pos += self.vel * dt;
        Ok(())
    }

    /// Linear momentum `m * v`.
    #[inline]
    pub fn momentum(&self) -> Vec2 {
        self.vel * self.mass
    }

    /// Kinetic energy `1/2 m |v|^2`.
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.mag_sq()
    }

    /// True if `point` lies within the circle (boundary included).
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        (point - self.pos).mag_sq() <= self.radius * self.radius
    }
}
