//! Anchor positions supplied by collaborators and the pins they produce.

use crate::chain::ParticleChain;
use crate::config::RopeConfig;
use crate::constraint::PinConstraint;
use crate::float::Float;
use crate::vec::Vec;

/// World positions the rope is attached to for one tick.
///
/// Owned by whatever moves the anchors; the rope only reads it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorBinding<V: Vec> {
    pub start: V,
    pub end: V,
    pub mid: Option<V>,
}

impl<V: Vec> AnchorBinding<V> {
    pub fn new(start: V, end: V) -> Self {
        AnchorBinding { start, end, mid: None }
    }

    pub fn with_mid(mut self, mid: V) -> Self {
        self.mid = Some(mid);
        self
    }
}

/// The two or three pins applied on every relaxation pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorSet<V: Vec> {
    pub start: PinConstraint<V>,
    pub end: PinConstraint<V>,
    pub mid: Option<PinConstraint<V>>,
}

impl<V: Vec> AnchorSet<V> {
    /// Resolve a binding against a chain of `count` particles.
    ///
    /// The mid pin is only produced when the config enables it and the
    /// binding supplies a position.
    pub fn resolve(binding: &AnchorBinding<V>, count: usize, config: &RopeConfig<V>) -> Self {
        let mid = match binding.mid {
            Some(position) if config.use_mid_anchor && count >= 3 => Some(PinConstraint::new(
                mid_anchor_index(config.mid_anchor_fraction, count),
                position,
            )),
            _ => None,
        };
        AnchorSet {
            start: PinConstraint::new(0, binding.start),
            end: PinConstraint::new(count - 1, binding.end),
            mid,
        }
    }

    pub fn pins(&self) -> impl Iterator<Item = &PinConstraint<V>> {
        [Some(&self.start), Some(&self.end), self.mid.as_ref()]
            .into_iter()
            .flatten()
    }

    pub fn is_anchor(&self, index: usize) -> bool {
        self.pins().any(|p| p.particle == index)
    }

    /// Mark exactly the anchored particles as pinned and move them onto
    /// their anchors. Particles pinned last tick but not this one are
    /// released to the integrator.
    pub fn bind(&self, chain: &mut ParticleChain<V>) {
        for i in 0..chain.len() {
            if !self.is_anchor(i) {
                chain.particle_mut(i).unpin();
            }
        }
        for pin in self.pins() {
            chain.particle_mut(pin.particle).pin_to(pin.position);
        }
    }
}

/// Particle index nearest `fraction` along a chain of `count` particles,
/// kept off both end pins. Requires `count >= 3`.
pub fn mid_anchor_index<F: Float>(fraction: F, count: usize) -> usize {
    let last = count - 1;
    let fraction = fraction.clamp(F::zero(), F::one());
    let index = (fraction * F::from_usize(last)).round().to_usize();
    index.clamp(1, last - 1)
}
