use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported synchronously by the engine.
///
/// Coincident body centers are not an error: the pair is skipped for the frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Rejected body parameters (radius, mass, position or velocity).
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Negative or non-finite timestep.
    #[error("invalid timestep: {0} (must be finite and >= 0)")]
    InvalidTimestep(f32),

    /// Rejected world or scene configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Index-based access on a body that does not exist.
    #[error("no body at index {0}")]
    BodyOutOfRange(usize),
}
