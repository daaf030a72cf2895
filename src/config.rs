use crate::{
    bounds::Bounds,
    error::{Error, Result},
    vector::{Vec2, VecExt},
};

/// World parameters shared by every body in a [`Simulation`](crate::Simulation).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Uniform gravitational acceleration, units/s^2 (screen space: +y points down).
    pub gravity: Vec2,
    /// Coefficient of restitution in `[0, 1]` for walls and body contacts.
    pub restitution: f32,
    /// Quadratic drag coefficient (>= 0).
    pub damping: f32,
    /// Multiply the drag force by the body radius.
    pub damping_scales_with_radius: bool,
    /// World rectangle.
    pub bounds: Bounds,
    /// Upper limit on a single step's `dt`, seconds.
    pub max_dt: f32,
    /// Speeds at or below this get no drag.
    pub velocity_epsilon: f32,
    /// Squared center distances at or below this count as coincident.
    pub contact_epsilon: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 250.0),
            restitution: 0.85,
            damping: 0.005,
            damping_scales_with_radius: false,
            bounds: Bounds::default(),
            max_dt: Self::DEFAULT_MAX_DT,
            velocity_epsilon: 1e-3,
            contact_epsilon: 1e-6,
        }
    }
}

impl SimConfig {
    /// 50 ms, i.e. the simulation slows down below 20 frames per second.
    pub const DEFAULT_MAX_DT: f32 = 0.05;

    /// A world with no gravity and no drag, useful for isolated collision setups.
    pub fn frictionless(bounds: Bounds, restitution: f32) -> Self {
        Self {
            gravity: Vec2::zero(),
            restitution,
            damping: 0.0,
            bounds,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.gravity.all_finite() {
            return Err(Error::InvalidConfig("gravity must be finite".into()));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(Error::InvalidConfig(format!(
                "restitution must be in [0, 1], got {}",
                self.restitution
            )));
        }
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "damping must be finite and >= 0, got {}",
                self.damping
            )));
        }
        if !self.max_dt.is_finite() || self.max_dt <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "max_dt must be finite and > 0, got {}",
                self.max_dt
            )));
        }
        let eps_ok = |e: f32| e.is_finite() && e >= 0.0;
        if !eps_ok(self.velocity_epsilon) || !eps_ok(self.contact_epsilon) {
            return Err(Error::InvalidConfig("epsilons must be >= 0".into()));
        }
        self.bounds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_restitution() {
        let cfg = SimConfig {
            restitution: 1.5,
            ..SimConfig::default()
        };
        let msg = cfg.validate().unwrap_err().to_string();
        assert!(msg.contains("restitution"));

        let cfg = SimConfig {
            restitution: f32::NAN,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_negative_damping_and_max_dt() {
        let cfg = SimConfig {
            damping: -0.1,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = SimConfig {
            max_dt: 0.0,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_bad_bounds() {
        let cfg = SimConfig {
            bounds: Bounds {
                min: Vec2::new(10.0, 0.0),
                max: Vec2::new(0.0, 10.0),
            },
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn frictionless_has_no_forces() {
        let cfg = SimConfig::frictionless(Bounds::default(), 1.0);
        assert_eq!(cfg.gravity, Vec2::zero());
        assert_eq!(cfg.damping, 0.0);
        assert!(cfg.validate().is_ok());
    }
}
