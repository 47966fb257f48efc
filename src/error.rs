//! Error types for rope construction and world queries.

use thiserror::Error;

/// Errors raised when a rope is built or reconfigured.
///
/// Stepping never fails; degenerate numeric states are handled by policy
/// inside the solver instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RopeError {
    /// The chain needs a start and an end particle.
    #[error("rope needs at least 2 particles, got {count}")]
    TooFewParticles { count: usize },
    /// At least one relaxation pass is required.
    #[error("constraint iterations must be at least 1")]
    NoIterations,
    /// Damping must be finite and in [0, 1].
    #[error("damping must be in [0, 1]")]
    InvalidDamping,
    /// A mid anchor needs a particle strictly between the two end pins.
    #[error("mid anchor needs at least 3 particles, got {count}")]
    NoInteriorParticle { count: usize },
    /// A layout direction had zero length.
    #[error("layout direction has zero length")]
    DegenerateDirection,
    /// An explicit particle layout did not match the configured count.
    #[error("expected {expected} particle positions, got {actual}")]
    LayoutMismatch { expected: usize, actual: usize },
}

/// Errors a [`WorldQuery`](crate::probe::WorldQuery) may report.
///
/// The probe treats every variant as "no hit" for the segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The world cannot be queried right now (e.g. not loaded yet).
    #[error("world query unavailable")]
    Unavailable,
    /// The query ran and failed.
    #[error("world query failed: {0}")]
    Failed(&'static str),
}
