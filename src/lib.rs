//! Verlet rope simulation between moving anchors, for games.
//!
//! `tether` simulates a cable strung between two externally driven anchor
//! points (a hand and a thrown blade, a grapple and its hook) using
//! position-based Verlet dynamics. It is meant to be stepped once per fixed
//! physics tick and hands back a point sequence for a line renderer and a
//! smoothed tangent at the free end for orientation logic.
//!
//! # Features
//!
//! - **Verlet integration**: Position-based dynamics with implicit velocity,
//!   damping and gravity
//! - **Exact anchors**: Start and end pins, plus an optional mid anchor
//! - **Constraint relaxation**: Fixed-order segment-length passes, stiffer
//!   with more iterations
//! - **Length limiter**: The end anchor is clamped to the rope length and
//!   reported back to whatever moves it
//! - **Collision probing**: Per-segment linecasts against your world through
//!   the `WorldQuery` trait, reported but never resolved
//! - **Observable**: Monitor physics steps via the `StepObserver` trait and
//!   the `log` facade
//! - **`no_std` compatible**: Works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod chain;
pub mod anchor;
pub mod constraint;
pub mod integrator;
pub mod solver;
pub mod limiter;
pub mod probe;
pub mod direction;
pub mod rope;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec2, Vec3};
pub use particle::Particle;
pub use chain::ParticleChain;
pub use anchor::{AnchorBinding, AnchorSet};
pub use constraint::{DistanceConstraint, PinConstraint};
pub use integrator::Integrator;
pub use solver::ConstraintSolver;
pub use limiter::LengthLimiter;
pub use probe::{CollisionProbe, ColliderId, NoWorld, Plane, ProbeHit, ProbeReport, WorldQuery};
pub use direction::EndDirectionEstimator;
pub use rope::Rope;
pub use config::{RopeConfig, MIN_ROPE_LENGTH};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::{ProbeError, RopeError};
