//! Verlet particles with position-based dynamics.

use crate::float::Float;
use crate::vec::Vec;

/// A Verlet particle: position-based dynamics with implicit velocity.
///
/// `pinned` marks a particle owned by an anchor for the current tick: the
/// integrator leaves it alone and distance constraints never move it.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle<V: Vec> {
    pub pos: V,
    pub prev_pos: V,
    pub pinned: bool,
}

impl<V: Vec> Particle<V> {
    /// A free particle at rest.
    pub fn new(pos: V) -> Self {
        Particle {
            pos,
            prev_pos: pos,
            pinned: false,
        }
    }

    /// Advance one Verlet step.
    ///
    /// `prev_pos` is captured before `pos` is overwritten, and `gravity` is
    /// integrated twice with the same `dt`.
    pub fn integrate(&mut self, dt: V::Scalar, damping: V::Scalar, gravity: V) {
        if self.pinned {
            return;
        }
        let velocity = (self.pos - self.prev_pos).scale(damping);
        let new_pos = self.pos + velocity + gravity.scale(dt * dt);
        self.prev_pos = self.pos;
        self.pos = new_pos;
    }

    /// Per-step displacement, `pos - prev_pos`.
    pub fn velocity_raw(&self) -> V {
        self.pos - self.prev_pos
    }

    /// Velocity in units per second for a step of `dt`.
    pub fn velocity(&self, dt: V::Scalar) -> V {
        if dt.is_near_zero(V::Scalar::from_f32(1e-30)) {
            return V::zero();
        }
        self.velocity_raw().scale(V::Scalar::one() / dt)
    }

    /// Hand the particle to an anchor, moving it onto `target`.
    ///
    /// The old position becomes `prev_pos` so the anchor's motion carries
    /// over as implicit velocity if the pin is released later.
    pub fn pin_to(&mut self, target: V) {
        self.pinned = true;
        self.prev_pos = self.pos;
        self.pos = target;
    }

    /// Return the particle to the integrator.
    pub fn unpin(&mut self) {
        self.pinned = false;
    }
}
