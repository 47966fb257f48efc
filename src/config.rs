//! Configuration for a rope simulation.

use crate::error::RopeError;
use crate::float::Float;
use crate::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shortest rope length accepted. Shorter (or non-positive) lengths are
/// clamped up to this value.
pub const MIN_ROPE_LENGTH: f32 = 0.1;

/// Configuration for a rope simulation.
///
/// # Builder Pattern
/// ```
/// use tether::config::RopeConfig;
/// use tether::vec::Vec3;
///
/// let config: RopeConfig<Vec3<f32>> = RopeConfig::new()
///     .with_particle_count(24)
///     .with_rope_length(6.0)
///     .with_iterations(16)
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0))
///     .with_damping(0.99)
///     .with_mid_anchor(0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RopeConfig<V: Vec> {
    /// Number of simulated points, anchors included. The chain has
    /// `particle_count - 1` segments. Must be at least 2. Default: 20.
    pub particle_count: usize,
    /// Maximum rope length; also the rest length of the whole chain.
    /// Default: 5.0.
    pub rope_length: V::Scalar,
    /// Relaxation passes per step. Must be at least 1. Default: 10.
    pub constraint_iterations: usize,
    /// Velocity damping factor [0, 1]. 1.0 = no damping. Default: 0.99.
    pub damping: V::Scalar,
    /// Gravity acceleration vector. Default: zero (no gravity).
    pub gravity: V,
    /// Pin an interior particle to the mid anchor when one is supplied.
    /// Default: false.
    pub use_mid_anchor: bool,
    /// Where along the chain the mid anchor sits, 0 = start, 1 = end.
    /// Default: 0.5.
    pub mid_anchor_fraction: V::Scalar,
    /// Clamp the end anchor to `rope_length` from the start anchor.
    /// Default: true.
    pub limit_length: bool,
}

impl<V: Vec> RopeConfig<V> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        RopeConfig {
            particle_count: 20,
            rope_length: V::Scalar::from_f32(5.0),
            constraint_iterations: 10,
            damping: V::Scalar::from_f32(0.99),
            gravity: V::zero(),
            use_mid_anchor: false,
            mid_anchor_fraction: V::Scalar::half(),
            limit_length: true,
        }
    }

    /// Set the number of simulated points.
    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }

    /// Set the rope length. Clamped when the rope is built.
    pub fn with_rope_length(mut self, rope_length: V::Scalar) -> Self {
        self.rope_length = rope_length;
        self
    }

    /// Set the number of relaxation passes.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.constraint_iterations = iterations;
        self
    }

    /// Set the damping factor.
    pub fn with_damping(mut self, damping: V::Scalar) -> Self {
        self.damping = damping;
        self
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: V) -> Self {
        self.gravity = gravity;
        self
    }

    /// Enable the mid anchor at `fraction` along the chain.
    pub fn with_mid_anchor(mut self, fraction: V::Scalar) -> Self {
        self.use_mid_anchor = true;
        self.mid_anchor_fraction = fraction;
        self
    }

    /// Enable or disable the max-length clamp.
    pub fn with_length_limit(mut self, enabled: bool) -> Self {
        self.limit_length = enabled;
        self
    }

    /// Target distance between adjacent particles.
    pub fn segment_length(&self) -> V::Scalar {
        clamp_rope_length(self.rope_length) / V::Scalar::from_usize(self.particle_count.max(2) - 1)
    }

    /// Check the hard requirements and return a copy with the soft ones
    /// clamped (rope length, mid anchor fraction).
    pub fn validated(&self) -> Result<Self, RopeError> {
        if self.particle_count < 2 {
            return Err(RopeError::TooFewParticles { count: self.particle_count });
        }
        if self.constraint_iterations == 0 {
            return Err(RopeError::NoIterations);
        }
        if !valid_damping(self.damping) {
            return Err(RopeError::InvalidDamping);
        }
        if self.use_mid_anchor && self.particle_count < 3 {
            return Err(RopeError::NoInteriorParticle { count: self.particle_count });
        }

        let mut config = self.clone();
        config.rope_length = clamp_rope_length(self.rope_length);
        if config.rope_length != self.rope_length {
            log::debug!("rope length {:?} clamped to {:?}", self.rope_length, config.rope_length);
        }
        config.mid_anchor_fraction = clamp_fraction(self.mid_anchor_fraction);
        Ok(config)
    }
}

impl<V: Vec> Default for RopeConfig<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp a requested length to at least [`MIN_ROPE_LENGTH`]. NaN and
/// infinite lengths map to the minimum.
pub fn clamp_rope_length<F: Float>(length: F) -> F {
    let min = F::from_f32(MIN_ROPE_LENGTH);
    if !length.is_finite() {
        return min;
    }
    length.max(min)
}

pub(crate) fn clamp_fraction<F: Float>(fraction: F) -> F {
    fraction.clamp(F::zero(), F::one())
}

pub(crate) fn valid_damping<F: Float>(damping: F) -> bool {
    damping.is_finite() && damping >= F::zero() && damping <= F::one()
}
