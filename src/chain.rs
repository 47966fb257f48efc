//! Fixed-size particle chain backing a rope.

use crate::error::RopeError;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// An ordered run of Verlet particles with a shared segment rest length.
///
/// Index 0 belongs to the start anchor and the last index to the end
/// anchor. The particle count is fixed at construction; changing the rope
/// length only changes [`segment_length`](Self::segment_length).
#[derive(Clone, Debug)]
pub struct ParticleChain<V: Vec> {
    particles: AllocVec<Particle<V>>,
    segment_length: V::Scalar,
}

impl<V: Vec> ParticleChain<V> {
    /// Lay `count` particles out evenly on the line from `start` to `end`.
    pub fn between(
        start: V,
        end: V,
        count: usize,
        segment_length: V::Scalar,
    ) -> Result<Self, RopeError> {
        check_count(count)?;
        let last = V::Scalar::from_usize(count - 1);
        let particles = (0..count)
            .map(|i| {
                let t = V::Scalar::from_usize(i) / last;
                Particle::new(start.lerp(end, t))
            })
            .collect();
        Ok(ParticleChain { particles, segment_length })
    }

    /// Lay `count` particles out from `start` along `direction`, one
    /// `segment_length` apart, as if the rope hung fully extended.
    pub fn along(
        start: V,
        direction: V,
        count: usize,
        segment_length: V::Scalar,
    ) -> Result<Self, RopeError> {
        check_count(count)?;
        let step = direction.normalize();
        if step == V::zero() {
            return Err(RopeError::DegenerateDirection);
        }
        let step = step.scale(segment_length);
        let mut particles = AllocVec::with_capacity(count);
        let mut pos = start;
        for _ in 0..count {
            particles.push(Particle::new(pos));
            pos = pos + step;
        }
        Ok(ParticleChain { particles, segment_length })
    }

    /// Build a chain from explicit positions, all at rest.
    pub fn from_positions(positions: &[V], segment_length: V::Scalar) -> Result<Self, RopeError> {
        check_count(positions.len())?;
        let particles = positions.iter().copied().map(Particle::new).collect();
        Ok(ParticleChain { particles, segment_length })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Always false; a chain holds at least two particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.particles.len() - 1
    }

    pub fn segment_count(&self) -> usize {
        self.particles.len() - 1
    }

    pub fn segment_length(&self) -> V::Scalar {
        self.segment_length
    }

    pub fn set_segment_length(&mut self, segment_length: V::Scalar) {
        self.segment_length = segment_length;
    }

    pub fn particle(&self, index: usize) -> &Particle<V> {
        &self.particles[index]
    }

    pub fn particle_mut(&mut self, index: usize) -> &mut Particle<V> {
        &mut self.particles[index]
    }

    pub fn particles(&self) -> &[Particle<V>] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle<V>] {
        &mut self.particles
    }

    /// Endpoints of segment `index`, from particle `index` to `index + 1`.
    pub fn segment(&self, index: usize) -> (V, V) {
        (self.particles[index].pos, self.particles[index + 1].pos)
    }

    pub fn positions(&self) -> AllocVec<V> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    /// Sum of the current segment lengths.
    pub fn current_length(&self) -> V::Scalar {
        self.particles
            .windows(2)
            .fold(V::Scalar::zero(), |acc, w| acc + w[0].pos.distance(w[1].pos))
    }

    /// Largest deviation of any segment from the rest length.
    pub fn max_segment_error(&self) -> V::Scalar {
        let rest = self.segment_length;
        self.particles
            .windows(2)
            .fold(V::Scalar::zero(), |acc, w| {
                acc.max((w[0].pos.distance(w[1].pos) - rest).abs())
            })
    }
}

fn check_count(count: usize) -> Result<(), RopeError> {
    if count < 2 {
        return Err(RopeError::TooFewParticles { count });
    }
    Ok(())
}
