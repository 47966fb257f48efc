//! Iterative constraint relaxation for a rope chain.

use crate::anchor::AnchorSet;
use crate::chain::ParticleChain;
use crate::constraint::DistanceConstraint;
use crate::observer::StepObserver;
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// Gauss-Seidel relaxation of anchor pins and segment lengths.
///
/// Every pass re-applies the pins first, then walks the segments from the
/// start anchor to the end anchor. Both the order and the even split of
/// each correction are fixed, so results are reproducible bit for bit.
#[derive(Clone, Debug)]
pub struct ConstraintSolver {
    constraints: AllocVec<DistanceConstraint>,
    iterations: usize,
}

impl ConstraintSolver {
    /// Solver for a chain of `particle_count` particles.
    pub fn for_chain(particle_count: usize, iterations: usize) -> Self {
        let constraints = (1..particle_count)
            .map(|i| DistanceConstraint::new(i - 1, i))
            .collect();
        ConstraintSolver {
            constraints,
            iterations: iterations.max(1),
        }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn set_iterations(&mut self, iterations: usize) {
        self.iterations = iterations.max(1);
    }

    pub fn solve<V: Vec, O: StepObserver<V>>(
        &self,
        chain: &mut ParticleChain<V>,
        anchors: &AnchorSet<V>,
        observer: &mut O,
    ) {
        let rest_length = chain.segment_length();
        for i in 0..self.iterations {
            let particles = chain.particles_mut();
            for pin in anchors.pins() {
                pin.solve(particles);
            }
            for c in self.constraints.iter() {
                c.solve(particles, rest_length);
            }
            observer.on_constraint_iteration(i);
        }
    }
}
