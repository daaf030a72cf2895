use crate::{
    body::{Body, Color},
    bounds::Bounds,
    config::SimConfig,
    error::{Error, Result},
    simulation::Simulation,
    vector::{Vec2, VecExt},
};

/// Colors handed out to randomly generated bodies.
pub const PALETTE: [Color; 6] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::ORANGE,
    Color::PURPLE,
];

/// Parameters for a box of randomly placed bouncing balls.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RandomSetup {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Each velocity component is drawn from `[-max_speed, max_speed]`.
    pub max_speed: f32,
    pub bounds: Bounds,
}

impl Default for RandomSetup {
    fn default() -> Self {
        Self {
            count: 15,
            min_radius: 10.0,
            max_radius: 25.0,
            max_speed: 150.0,
            bounds: Bounds::default(),
        }
    }
}

impl RandomSetup {
    pub fn validate(&self) -> Result<()> {
        self.bounds.validate()?;
        if !self.min_radius.is_finite() || self.min_radius <= 0.0 {
            return Err(Error::InvalidConfig("min_radius must be finite and > 0".into()));
        }
        if !self.max_radius.is_finite() || self.max_radius < self.min_radius {
            return Err(Error::InvalidConfig("max_radius must be >= min_radius".into()));
        }
        if 2.0 * self.max_radius > self.bounds.width().min(self.bounds.height()) {
            return Err(Error::InvalidConfig("bodies do not fit inside the bounds".into()));
        }
        if !self.max_speed.is_finite() || self.max_speed < 0.0 {
            return Err(Error::InvalidConfig("max_speed must be finite and >= 0".into()));
        }
        Ok(())
    }

    /// World settings the random box runs with: gravity, lively walls and light drag.
    pub fn world(&self) -> SimConfig {
        SimConfig {
            gravity: Vec2::new(0.0, 250.0),
            restitution: 0.85,
            damping: 0.005,
            damping_scales_with_radius: false,
            bounds: self.bounds,
            ..SimConfig::default()
        }
    }
}

/// Generates `setup.count` bodies inside the bounds.
///
/// Radii are uniform in `[min_radius, max_radius]`, mass is proportional to area (`π r²`),
/// and the same `seed` always produces the same bodies. Bodies may start overlapping; the
/// collision resolver pushes them apart over the first frames.
pub fn random_bodies(setup: &RandomSetup, seed: u64) -> Result<Vec<Body>> {
    setup.validate()?;
    let mut rng = fastrand::Rng::with_seed(seed);

    let mut bodies = Vec::with_capacity(setup.count);
    for _ in 0..setup.count {
        let radius = uniform(&mut rng, setup.min_radius, setup.max_radius);
        let b = setup.bounds;
        let pos = Vec2::new(
            uniform(&mut rng, b.min.x + radius, b.max.x - radius),
            uniform(&mut rng, b.min.y + radius, b.max.y - radius),
        );
        let vel = Vec2::new(
            uniform(&mut rng, -setup.max_speed, setup.max_speed),
            uniform(&mut rng, -setup.max_speed, setup.max_speed),
        );
        let mass = std::f32::consts::PI * radius * radius;
        let color = PALETTE[rng.usize(..PALETTE.len())];
        bodies.push(Body::new(pos, vel, mass, radius)?.with_color(color));
    }
    Ok(bodies)
}

#[inline]
fn uniform(rng: &mut fastrand::Rng, lo: f32, hi: f32) -> f32 {
    lo + (hi - lo) * rng.f32()
}

/// A ready-to-run simulation of [`random_bodies`] in [`RandomSetup::world`].
pub fn random_scene(setup: &RandomSetup, seed: u64) -> Result<Simulation> {
    Simulation::with_bodies(setup.world(), random_bodies(setup, seed)?)
}

/// Two balls resting just above the floor, launched with user-chosen masses and velocities.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TwoBodySetup {
    pub mass1: f32,
    pub velocity1: Vec2,
    pub mass2: f32,
    pub velocity2: Vec2,
    pub radius: f32,
    pub bounds: Bounds,
}

impl Default for TwoBodySetup {
    fn default() -> Self {
        Self {
            mass1: 10.0,
            velocity1: Vec2::new(80.0, -150.0),
            mass2: 20.0,
            velocity2: Vec2::new(-60.0, -100.0),
            radius: 25.0,
            bounds: Bounds::default(),
        }
    }
}

impl TwoBodySetup {
    pub fn validate(&self) -> Result<()> {
        self.bounds.validate()?;
        for (name, mass) in [("mass1", self.mass1), ("mass2", self.mass2)] {
            if !mass.is_finite() || mass <= 0.0 {
                return Err(Error::InvalidConfig(format!("{name} must be positive, got {mass}")));
            }
        }
        if !self.velocity1.all_finite() || !self.velocity2.all_finite() {
            return Err(Error::InvalidConfig("velocities must be finite".into()));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidConfig("radius must be finite and > 0".into()));
        }
        if 2.0 * self.radius + 1.0 > self.bounds.height() || 4.0 * self.radius > self.bounds.width() {
            return Err(Error::InvalidConfig("bodies do not fit inside the bounds".into()));
        }
        Ok(())
    }

    /// Elastic collisions under gravity with radius-scaled drag.
    pub fn world(&self) -> SimConfig {
        SimConfig {
            gravity: Vec2::new(0.0, 250.0),
            restitution: 1.0,
            damping: 0.001,
            damping_scales_with_radius: true,
            bounds: self.bounds,
            ..SimConfig::default()
        }
    }

    /// The red and blue balls, a quarter of the width in from each side, one unit above the floor.
    pub fn bodies(&self) -> Result<[Body; 2]> {
        self.validate()?;
        let b = self.bounds;
        let y = b.max.y - self.radius - 1.0;
        let first = Body::new(
            Vec2::new(b.min.x + b.width() * 0.25, y),
            self.velocity1,
            self.mass1,
            self.radius,
        )?
        .with_color(Color::RED);
        let second = Body::new(
            Vec2::new(b.min.x + b.width() * 0.75, y),
            self.velocity2,
            self.mass2,
            self.radius,
        )?
        .with_color(Color::BLUE);
        Ok([first, second])
    }
}

/// A ready-to-run simulation of the two-ball setup.
pub fn two_body_scene(setup: &TwoBodySetup) -> Result<Simulation> {
    Simulation::with_bodies(setup.world(), setup.bodies()?.to_vec())
}
