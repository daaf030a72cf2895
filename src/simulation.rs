use crate::{
    body::Body,
    bounds,
    collision,
    config::SimConfig,
    error::{Error, Result},
    forces,
    interaction::{self, Grab},
    vector::Vec2,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Owns the body set and advances it one frame at a time.
///
/// Each [`step`](Simulation::step) runs, in order: force application and integration for every
/// body not held by the pointer, boundary resolution, then all-pairs collision resolution.
/// Pointer events ([`press`](Simulation::press), [`drag`](Simulation::drag),
/// [`release`](Simulation::release), [`cancel`](Simulation::cancel)) are meant to be applied
/// between steps.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    bodies: Vec<Body>,
    /// Number of completed steps.
    frame: usize,
    /// Impulse events resolved so far.
    collisions: u64,
    grab: Option<Grab>,
    /// Duration of the last completed step, after clamping.
    last_dt: f32,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            config: SimConfig::default(),
            bodies: Vec::new(),
            frame: 0,
            collisions: 0,
            grab: None,
            last_dt: SimConfig::DEFAULT_MAX_DT,
        }
    }
}

impl Simulation {
    /// Creates an empty simulation after validating `config`.
    pub fn new(config: SimConfig) -> Result<Self> {
        Self::with_bodies(config, Vec::new())
    }

    /// Creates a simulation that owns `bodies`.
    pub fn with_bodies(config: SimConfig, bodies: Vec<Body>) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "simulation created: {} bodies, bounds {:?}..{:?}, gravity {:?}",
            bodies.len(),
            config.bounds.min,
            config.bounds.max,
            config.gravity
        );
        Ok(Self {
            config,
            bodies,
            last_dt: config.max_dt,
            ..Self::default()
        })
    }

    /// Adds a body and returns its index. The body set is frozen once the first step has run.
    pub fn add_body(&mut self, body: Body) -> Result<usize> {
        if self.frame > 0 {
            return Err(Error::InvalidConfig(
                "bodies can only be added before the first step".into(),
            ));
        }
        self.bodies.push(body);
        Ok(self.bodies.len() - 1)
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Result<&Body> {
        self.bodies.get(index).ok_or(Error::BodyOutOfRange(index))
    }

    pub fn body_mut(&mut self, index: usize) -> Result<&mut Body> {
        self.bodies.get_mut(index).ok_or(Error::BodyOutOfRange(index))
    }

    #[inline]
    pub fn frame(&self) -> usize {
        self.frame
    }

    #[inline]
    pub fn collision_count(&self) -> u64 {
        self.collisions
    }

    /// Index of the body currently held by the pointer.
    #[inline]
    pub fn grabbed(&self) -> Option<usize> {
        self.grab.map(|g| g.body)
    }

    /// Sum of `m * v` over all bodies.
    pub fn total_momentum(&self) -> Vec2 {
        self.bodies
            .iter()
            .fold(Vec2::zero(), |acc, b| acc + b.momentum())
    }

    pub fn total_kinetic_energy(&self) -> f32 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// `dt` must be finite and non-negative; values above `max_dt` are clamped to it.
    pub fn step(&mut self, dt: f32) -> Result<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(Error::InvalidTimestep(dt));
        }
        let dt = if dt > self.config.max_dt {
            log::debug!("dt {dt} clamped to {}", self.config.max_dt);
            self.config.max_dt
        } else {
            dt
        };

        self.integrate(dt)?;
        self.confine();
        self.collide();

        if let Some(grab) = self.grab.as_mut() {
            grab.end_frame();
        }
        self.last_dt = dt;
        self.frame += 1;
        Ok(())
    }

    /// Rebuilds forces (gravity, drag) and integrates every free body.
    pub fn integrate(&mut self, dt: f32) -> Result<()> {
        let config = &self.config;

        #[cfg(feature = "parallel")]
        let result = self
            .bodies
            .par_iter_mut()
            .try_for_each(|body| advance(body, config, dt));

        #[cfg(not(feature = "parallel"))]
        let result = self
            .bodies
            .iter_mut()
            .try_for_each(|body| advance(body, config, dt));

        result
    }

    /// Clamps every body into the world bounds.
    pub fn confine(&mut self) {
        let walls = self.config.bounds;
        let restitution = self.config.restitution;
        for body in &mut self.bodies {
            bounds::resolve_bounds(body, &walls, restitution);
        }
    }

    /// Resolves all overlapping pairs and counts the impulses applied.
    pub fn collide(&mut self) {
        self.collisions += collision::resolve_all(
            &mut self.bodies,
            self.config.restitution,
            self.config.contact_epsilon,
        );
    }

    /// Grabs the first body under `point`, stopping it. Any body already held is dropped first.
    pub fn press(&mut self, point: Vec2) -> Option<usize> {
        self.cancel();
        let index = interaction::pick(&self.bodies, point)?;
        let body = &mut self.bodies[index];
        body.controlled = true;
        body.vel = Vec2::zero();
        self.grab = Some(Grab::new(index, body.pos, point));
        log::debug!("grabbed body {index} at {point:?}");
        Some(index)
    }

    /// Moves the held body with the pointer. Returns false if nothing is held.
    pub fn drag(&mut self, point: Vec2) -> bool {
        let Some(grab) = self.grab.as_mut() else {
            return false;
        };
        grab.move_to(point);
        if let Some(body) = self.bodies.get_mut(grab.body) {
            body.pos = grab.target();
        }
        true
    }

    /// Lets go of the held body, throwing it with the pointer's velocity over the last frame.
    /// An immovable body is dropped at rest instead.
    pub fn release(&mut self) -> Option<usize> {
        let grab = self.grab.take()?;
        let body = self.bodies.get_mut(grab.body)?;
        let vel = if body.is_movable() {
            grab.release_velocity(self.last_dt)
        } else {
            Vec2::zero()
        };
        body.controlled = false;
        body.vel = vel;
        log::debug!("released body {} with velocity {vel:?}", grab.body);
        Some(grab.body)
    }

    /// Drops the held body at rest.
    pub fn cancel(&mut self) -> Option<usize> {
        let grab = self.grab.take()?;
        let body = self.bodies.get_mut(grab.body)?;
        body.controlled = false;
        body.vel = Vec2::zero();
        log::debug!("grab of body {} cancelled", grab.body);
        Some(grab.body)
    }
}

/// Force application and integration for one body.
fn advance(body: &mut Body, config: &SimConfig, dt: f32) -> Result<()> {
    if body.controlled {
        return Ok(());
    }
    body.clear_forces();
    let weight = forces::gravity_force(body, config.gravity);
    body.apply_force(weight);
    if let Some(drag) = forces::damping_force(
        body,
        config.damping,
        config.damping_scales_with_radius,
        config.velocity_epsilon,
    ) {
        body.apply_force(drag);
    }
    body.integrate(dt)
}
