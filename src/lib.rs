//! Rigid-circle physics for small 2D scenes.
//!
//! Bodies are point-mass circles under uniform gravity and quadratic drag, integrated with
//! semi-implicit Euler, kept inside an axis-aligned box and resolved against each other with
//! positional correction plus restitution impulses.

pub mod body;
pub mod bounds;
pub mod c_api;
pub mod collision;
pub mod config;
pub mod error;
pub mod forces;
pub mod interaction;
pub mod scene;
pub mod simulation;
pub mod vector;

pub use body::{Body, Color};
pub use bounds::Bounds;
pub use config::SimConfig;
pub use error::{Error, Result};
pub use simulation::Simulation;
pub use vector::Vec2;
