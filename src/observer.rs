//! Step observer trait for monitoring rope simulation progress.

use crate::probe::ProbeHit;
use crate::vec::Vec;

/// Trait for observing rope simulation steps.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver<V: Vec> {
    /// Called after the free particles have been integrated (Verlet step).
    fn on_integrate(&mut self) {}

    /// Called after each relaxation pass.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called when the length limiter pulls the end anchor in.
    fn on_length_clamped(&mut self, _requested: V, _clamped: V) {}

    /// Called once per segment with the probe result, in segment order.
    fn on_segment_probed(&mut self, _segment: usize, _hit: Option<&ProbeHit<V>>) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl<V: Vec> StepObserver<V> for NoOpStepObserver {}
