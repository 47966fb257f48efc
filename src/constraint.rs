//! Rope constraints for Verlet relaxation: segment distance and anchor pins.

use crate::float::Float;
use crate::vec::Vec;
use crate::particle::Particle;

/// Keeps two adjacent particles at the chain's segment rest length.
///
/// The rest length lives on the chain rather than on the constraint, so a
/// rope length change takes effect without rebuilding constraints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistanceConstraint {
    pub a: usize,
    pub b: usize,
}

/// Places one particle exactly on an anchor position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinConstraint<V: Vec> {
    pub particle: usize,
    pub position: V,
}

impl DistanceConstraint {
    pub fn new(a: usize, b: usize) -> Self {
        DistanceConstraint { a, b }
    }

    /// Move the pair toward `rest_length`, each free side taking half of
    /// the error. Pinned particles are never moved, and a collapsed pair
    /// (zero distance) has no direction to correct along so it is skipped.
    pub fn solve<V: Vec>(&self, particles: &mut [Particle<V>], rest_length: V::Scalar) {
        let a_pos = particles[self.a].pos;
        let b_pos = particles[self.b].pos;

        let delta = b_pos - a_pos;
        let dist = delta.length();
        if dist.is_near_zero(V::Scalar::from_f32(1e-10)) {
            return; // degenerate
        }

        let error = dist - rest_length;
        let correction = delta.scale(error * V::Scalar::half() / dist);

        if !particles[self.a].pinned {
            particles[self.a].pos = a_pos + correction;
        }
        if !particles[self.b].pinned {
            particles[self.b].pos = b_pos - correction;
        }
    }
}

impl<V: Vec> PinConstraint<V> {
    pub fn new(particle: usize, position: V) -> Self {
        PinConstraint { particle, position }
    }

    /// Overwrite the particle position. Pins are exact, never blended.
    pub fn solve(&self, particles: &mut [Particle<V>]) {
        particles[self.particle].pos = self.position;
    }
}
