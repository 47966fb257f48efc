//! Verlet integration of the free particles of a chain.

use crate::chain::ParticleChain;
use crate::config::RopeConfig;
use crate::vec::Vec;

/// Advances unpinned particles by one Verlet step with damping and a
/// constant external acceleration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Integrator<V: Vec> {
    pub damping: V::Scalar,
    pub gravity: V,
}

impl<V: Vec> Integrator<V> {
    pub fn new(damping: V::Scalar, gravity: V) -> Self {
        Integrator { damping, gravity }
    }

    pub fn from_config(config: &RopeConfig<V>) -> Self {
        Integrator::new(config.damping, config.gravity)
    }

    /// Integrate every particle not currently pinned.
    pub fn step(&self, chain: &mut ParticleChain<V>, dt: V::Scalar) {
        for p in chain.particles_mut().iter_mut() {
            p.integrate(dt, self.damping, self.gravity);
        }
    }
}
