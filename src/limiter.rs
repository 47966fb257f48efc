//! Max-length clamp between the start and end anchors.

use crate::chain::ParticleChain;
use crate::float::Float;
use crate::vec::Vec;

/// Keeps the end anchor within `max_length` of the start anchor.
///
/// Runs after relaxation. When it clamps, the clamped position is the end
/// anchor for the tick and whatever moves the end anchor should adopt it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LengthLimiter<F: Float> {
    pub max_length: F,
}

impl<F: Float> LengthLimiter<F> {
    pub fn new(max_length: F) -> Self {
        LengthLimiter { max_length }
    }

    /// The clamped end position, or `None` when `end` is within reach.
    pub fn limit<V: Vec<Scalar = F>>(&self, start: V, end: V) -> Option<V> {
        if self.max_length <= F::zero() {
            return None;
        }
        let dir = end - start;
        let dist_sq = dir.length_sq();
        if dist_sq <= self.max_length * self.max_length {
            return None;
        }
        Some(start + dir.scale(self.max_length / dist_sq.sqrt()))
    }

    /// Clamp and write the result into the chain's last particle.
    ///
    /// Returns the clamped end anchor, or `None` when nothing was clamped
    /// and the chain is untouched.
    pub fn apply<V: Vec<Scalar = F>>(&self, chain: &mut ParticleChain<V>, start: V, end: V) -> Option<V> {
        let clamped = self.limit(start, end)?;
        let last = chain.last_index();
        chain.particle_mut(last).pos = clamped;
        Some(clamped)
    }
}
