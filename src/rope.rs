//! A rope between two moving anchors: the public simulation surface.

use crate::anchor::{AnchorBinding, AnchorSet};
use crate::chain::ParticleChain;
use crate::config::{clamp_fraction, clamp_rope_length, RopeConfig};
use crate::direction::EndDirectionEstimator;
use crate::error::RopeError;
use crate::float::Float;
use crate::integrator::Integrator;
use crate::limiter::LengthLimiter;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::probe::{CollisionProbe, ProbeReport, WorldQuery};
use crate::solver::ConstraintSolver;
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// A Verlet rope pinned between a start and an end anchor, with an
/// optional mid anchor.
///
/// Call [`step`](Self::step) once per fixed tick with that tick's anchor
/// positions. Each step integrates the free particles, relaxes the
/// constraints, clamps the end anchor to the rope length and probes every
/// segment against the world, in that order.
///
/// ```
/// use tether::{AnchorBinding, NoOpStepObserver, NoWorld, Rope, RopeConfig, Vec3};
///
/// let config: RopeConfig<Vec3<f32>> = RopeConfig::new()
///     .with_particle_count(5)
///     .with_rope_length(4.0)
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0));
/// let start = Vec3::new(0.0f32, 0.0, 0.0);
/// let mut rope = Rope::new(start, Vec3::new(0.0, 0.0, 4.0), config).unwrap();
///
/// // The holder tries to walk away; the rope holds it at 4 units.
/// let anchors = AnchorBinding::new(start, Vec3::new(0.0, 0.0, 10.0));
/// rope.step(1.0 / 60.0, &anchors, &NoWorld, &mut NoOpStepObserver);
/// assert!(rope.was_clamped());
/// assert!((rope.end_anchor().z - 4.0).abs() < 1e-5);
/// ```
#[derive(Clone, Debug)]
pub struct Rope<V: Vec> {
    chain: ParticleChain<V>,
    solver: ConstraintSolver,
    config: RopeConfig<V>,
    end_anchor: V,
    clamped: bool,
    probe: ProbeReport<V>,
}

impl<V: Vec> Rope<V> {
    /// Build a straight rope from `start` to `end`, all particles at rest.
    pub fn new(start: V, end: V, config: RopeConfig<V>) -> Result<Self, RopeError> {
        let config = config.validated()?;
        let chain = ParticleChain::between(start, end, config.particle_count, config.segment_length())?;
        Ok(Self::from_parts(chain, config, end))
    }

    /// Build a rope hanging from `start` along `direction`, particles one
    /// segment length apart, all at rest.
    pub fn hanging(start: V, direction: V, config: RopeConfig<V>) -> Result<Self, RopeError> {
        let config = config.validated()?;
        let chain = ParticleChain::along(start, direction, config.particle_count, config.segment_length())?;
        let end = chain.particle(chain.last_index()).pos;
        Ok(Self::from_parts(chain, config, end))
    }

    /// Build a rope through explicit positions, all at rest.
    pub fn from_positions(positions: &[V], config: RopeConfig<V>) -> Result<Self, RopeError> {
        let config = config.validated()?;
        if positions.len() != config.particle_count {
            return Err(RopeError::LayoutMismatch {
                expected: config.particle_count,
                actual: positions.len(),
            });
        }
        let chain = ParticleChain::from_positions(positions, config.segment_length())?;
        let end = chain.particle(chain.last_index()).pos;
        Ok(Self::from_parts(chain, config, end))
    }

    fn from_parts(chain: ParticleChain<V>, config: RopeConfig<V>, end_anchor: V) -> Self {
        log::debug!(
            "rope created: {} particles, length {:?}, segment length {:?}",
            chain.len(),
            config.rope_length,
            chain.segment_length(),
        );
        Rope {
            solver: ConstraintSolver::for_chain(chain.len(), config.constraint_iterations),
            probe: ProbeReport::with_capacity(chain.segment_count()),
            chain,
            config,
            end_anchor,
            clamped: false,
        }
    }

    /// Advance the simulation by one fixed tick of `dt`.
    pub fn step<W, O>(&mut self, dt: V::Scalar, anchors: &AnchorBinding<V>, world: &W, observer: &mut O)
    where
        W: WorldQuery<V> + ?Sized,
        O: StepObserver<V>,
    {
        let pins = AnchorSet::resolve(anchors, self.chain.len(), &self.config);
        pins.bind(&mut self.chain);

        Integrator::from_config(&self.config).step(&mut self.chain, dt);
        observer.on_integrate();

        self.solver.solve(&mut self.chain, &pins, observer);

        let clamped = if self.config.limit_length {
            LengthLimiter::new(self.config.rope_length).apply(&mut self.chain, anchors.start, anchors.end)
        } else {
            None
        };
        self.clamped = clamped.is_some();
        self.end_anchor = match clamped {
            Some(end) => {
                log::trace!("rope end anchor clamped from {:?} to {:?}", anchors.end, end);
                observer.on_length_clamped(anchors.end, end);
                end
            }
            None => anchors.end,
        };

        CollisionProbe.scan(&self.chain, world, &mut self.probe, observer);
        observer.on_step_complete();
    }

    /// Snapshot of the particle positions, start to end, for rendering.
    pub fn positions(&self) -> AllocVec<V> {
        self.chain.positions()
    }

    /// Smoothed unit direction out of the end of the rope, averaged over
    /// the last `smoothing` segments.
    pub fn end_direction(&self, smoothing: usize) -> V {
        EndDirectionEstimator::new(smoothing).estimate(&self.chain)
    }

    /// The end anchor after the length limiter ran on the last step.
    ///
    /// Whatever moves the end anchor should adopt this position when it
    /// differs from what it asked for.
    pub fn end_anchor(&self) -> V {
        self.end_anchor
    }

    /// Whether the last step clamped the end anchor.
    pub fn was_clamped(&self) -> bool {
        self.clamped
    }

    /// Probe results from the last step.
    pub fn probe_report(&self) -> &ProbeReport<V> {
        &self.probe
    }

    /// Change the maximum rope length. Lengths below
    /// [`MIN_ROPE_LENGTH`](crate::config::MIN_ROPE_LENGTH) are clamped up.
    /// The particle count never changes; only the segment rest length does.
    pub fn set_rope_length(&mut self, length: V::Scalar) {
        let clamped = clamp_rope_length(length);
        if clamped != length {
            log::debug!("rope length {:?} clamped to {:?}", length, clamped);
        }
        self.config.rope_length = clamped;
        self.chain.set_segment_length(self.config.segment_length());
    }

    pub fn rope_length(&self) -> V::Scalar {
        self.config.rope_length
    }

    /// Set the relaxation passes per step, at least one.
    pub fn set_constraint_iterations(&mut self, iterations: usize) {
        self.solver.set_iterations(iterations);
        self.config.constraint_iterations = self.solver.iterations();
    }

    /// Set the velocity damping, clamped to [0, 1]. Non-finite values are
    /// ignored.
    pub fn set_damping(&mut self, damping: V::Scalar) {
        if !damping.is_finite() {
            return;
        }
        self.config.damping = damping.clamp(V::Scalar::zero(), V::Scalar::one());
    }

    pub fn set_gravity(&mut self, gravity: V) {
        self.config.gravity = gravity;
    }

    /// Enable or disable the mid anchor and move it along the chain.
    pub fn set_mid_anchor(&mut self, enabled: bool, fraction: V::Scalar) -> Result<(), RopeError> {
        if enabled && self.chain.len() < 3 {
            return Err(RopeError::NoInteriorParticle { count: self.chain.len() });
        }
        self.config.use_mid_anchor = enabled;
        self.config.mid_anchor_fraction = clamp_fraction(fraction);
        Ok(())
    }

    pub fn set_length_limit(&mut self, enabled: bool) {
        self.config.limit_length = enabled;
    }

    pub fn config(&self) -> &RopeConfig<V> {
        &self.config
    }

    pub fn particle_count(&self) -> usize {
        self.chain.len()
    }

    pub fn segment_length(&self) -> V::Scalar {
        self.chain.segment_length()
    }

    /// Sum of the current segment lengths.
    pub fn current_length(&self) -> V::Scalar {
        self.chain.current_length()
    }

    /// Largest deviation of any segment from its rest length.
    pub fn max_segment_error(&self) -> V::Scalar {
        self.chain.max_segment_error()
    }

    pub fn particle(&self, index: usize) -> &Particle<V> {
        self.chain.particle(index)
    }

    pub fn chain(&self) -> &ParticleChain<V> {
        &self.chain
    }
}
