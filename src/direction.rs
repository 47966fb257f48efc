//! Smoothed tangent direction at the free end of a chain.

use crate::chain::ParticleChain;
use crate::float::Float;
use crate::vec::Vec;

/// Squared length below which a segment or an accumulated direction is
/// treated as degenerate.
pub const DIRECTION_EPSILON: f32 = 1e-12;

/// Averages the directions of the last few segments of a chain.
///
/// A smoothing of 1 is the raw direction of the final segment; larger
/// values trade responsiveness for stability when the rope whips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndDirectionEstimator {
    pub smoothing: usize,
}

impl EndDirectionEstimator {
    pub fn new(smoothing: usize) -> Self {
        EndDirectionEstimator { smoothing }
    }

    /// Unit direction pointing out of the end of the chain, or
    /// [`Vec::forward`] when no segment has a usable direction.
    pub fn estimate<V: Vec>(&self, chain: &ParticleChain<V>) -> V {
        let eps = V::Scalar::from_f32(DIRECTION_EPSILON);
        let last = chain.last_index();
        let k = self.smoothing.clamp(1, last);

        let mut accum = V::zero();
        for i in 0..k {
            let (a, b) = chain.segment(last - i - 1);
            let segment = b - a;
            let len_sq = segment.length_sq();
            if len_sq > eps {
                accum = accum + segment.scale(V::Scalar::one() / len_sq.sqrt());
            }
        }

        let len_sq = accum.length_sq();
        if len_sq > eps {
            accum.scale(V::Scalar::one() / len_sq.sqrt())
        } else {
            V::forward()
        }
    }
}
