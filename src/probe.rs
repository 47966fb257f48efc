//! Per-segment collision probing against external world geometry.
//!
//! Probing is observational: hits are reported, never resolved. A world
//! that fails to answer degrades to "no hit" so a missing or broken query
//! can never stall the simulation.

use crate::chain::ParticleChain;
use crate::error::ProbeError;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// Identifier of whatever the world says was hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(pub u64);

/// Where a probe struck the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeHit<V: Vec> {
    /// Contact point in world space.
    pub point: V,
    /// Surface normal at the contact point.
    pub normal: V,
    /// Distance from the probe origin to `point`.
    pub distance: V::Scalar,
    pub collider: ColliderId,
}

/// World geometry that can answer a line-segment query.
pub trait WorldQuery<V: Vec> {
    /// First hit on the segment from `from` to `to`, if any.
    fn linecast(&self, from: V, to: V) -> Result<Option<ProbeHit<V>>, ProbeError>;
}

impl<V, F> WorldQuery<V> for F
where
    V: Vec,
    F: Fn(V, V) -> Result<Option<ProbeHit<V>>, ProbeError>,
{
    fn linecast(&self, from: V, to: V) -> Result<Option<ProbeHit<V>>, ProbeError> {
        self(from, to)
    }
}

/// An empty world. Nothing is ever hit.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoWorld;

impl<V: Vec> WorldQuery<V> for NoWorld {
    fn linecast(&self, _from: V, _to: V) -> Result<Option<ProbeHit<V>>, ProbeError> {
        Ok(None)
    }
}

/// An infinite plane through `point` facing `normal`, e.g. the ground.
///
/// A segment hits when it crosses or touches the plane, from either side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane<V: Vec> {
    pub point: V,
    pub normal: V,
    pub collider: ColliderId,
}

impl<V: Vec> Plane<V> {
    pub fn new(point: V, normal: V, collider: ColliderId) -> Self {
        Plane { point, normal: normal.normalize(), collider }
    }
}

impl<V: Vec> WorldQuery<V> for Plane<V> {
    fn linecast(&self, from: V, to: V) -> Result<Option<ProbeHit<V>>, ProbeError> {
        let zero = V::Scalar::zero();
        let d0 = (from - self.point).dot(self.normal);
        let d1 = (to - self.point).dot(self.normal);
        if (d0 > zero && d1 > zero) || (d0 < zero && d1 < zero) {
            return Ok(None);
        }
        let denom = d0 - d1;
        let t = if denom.is_near_zero(V::Scalar::from_f32(1e-12)) {
            zero // lies in the plane
        } else {
            d0 / denom
        };
        let point = from.lerp(to, t);
        let normal = if d0 < zero { -self.normal } else { self.normal };
        Ok(Some(ProbeHit {
            point,
            normal,
            distance: from.distance(point),
            collider: self.collider,
        }))
    }
}

/// Probe results for every segment of the last step.
#[derive(Clone, Debug)]
pub struct ProbeReport<V: Vec> {
    segments: AllocVec<Option<ProbeHit<V>>>,
    failures: usize,
}

impl<V: Vec> ProbeReport<V> {
    /// An empty report sized for `segment_count` segments.
    pub fn with_capacity(segment_count: usize) -> Self {
        ProbeReport {
            segments: AllocVec::with_capacity(segment_count),
            failures: 0,
        }
    }

    /// Number of segments probed.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, index: usize) -> Option<&ProbeHit<V>> {
        self.segments.get(index).and_then(Option::as_ref)
    }

    pub fn is_hit(&self, index: usize) -> bool {
        self.segment(index).is_some()
    }

    /// Hit flag per segment, in segment order.
    pub fn hit_flags(&self) -> impl Iterator<Item = bool> + '_ {
        self.segments.iter().map(Option::is_some)
    }

    /// `(segment, hit)` for every segment that hit something.
    pub fn hits(&self) -> impl Iterator<Item = (usize, &ProbeHit<V>)> {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(i, h)| h.as_ref().map(|h| (i, h)))
    }

    pub fn hit_count(&self) -> usize {
        self.segments.iter().filter(|h| h.is_some()).count()
    }

    pub fn any_hit(&self) -> bool {
        self.segments.iter().any(Option::is_some)
    }

    /// Queries that failed during the last probe and were counted as misses.
    pub fn failures(&self) -> usize {
        self.failures
    }
}

/// Casts one linear probe per segment of a chain.
#[derive(Clone, Copy, Debug, Default)]
pub struct CollisionProbe;

impl CollisionProbe {
    /// Probe every segment, overwriting `report` in place.
    pub fn scan<V, W, O>(
        &self,
        chain: &ParticleChain<V>,
        world: &W,
        report: &mut ProbeReport<V>,
        observer: &mut O,
    ) where
        V: Vec,
        W: WorldQuery<V> + ?Sized,
        O: StepObserver<V>,
    {
        report.segments.clear();
        report.failures = 0;
        for i in 0..chain.segment_count() {
            let (a, b) = chain.segment(i);
            let hit = match world.linecast(a, b) {
                Ok(hit) => hit,
                Err(err) => {
                    log::warn!("rope segment {} probe failed: {}", i, err);
                    report.failures += 1;
                    None
                }
            };
            observer.on_segment_probed(i, hit.as_ref());
            report.segments.push(hit);
        }
    }
}
