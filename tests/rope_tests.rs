use approx::assert_abs_diff_eq;
use tether::{
    AnchorBinding, NoOpStepObserver, NoWorld, ProbeHit, Rope, RopeConfig, RopeError,
    StepObserver, Vec3, MIN_ROPE_LENGTH,
};
use tether::vec::Vec as _;

type V = Vec3<f64>;

fn straight_config(count: usize, length: f64) -> RopeConfig<V> {
    RopeConfig::new()
        .with_particle_count(count)
        .with_rope_length(length)
        .with_iterations(20)
        .with_damping(1.0)
}

fn step(rope: &mut Rope<V>, anchors: &AnchorBinding<V>) {
    rope.step(1.0 / 60.0, anchors, &NoWorld, &mut NoOpStepObserver);
}

#[test]
fn initialize_pins_ends_at_rest() {
    let start = Vec3::new(1.0, 2.0, 3.0);
    let end = Vec3::new(-4.0, 0.5, 7.0);
    for count in [2, 3, 7, 40] {
        let rope = Rope::new(start, end, straight_config(count, 5.0)).unwrap();
        assert_eq!(rope.particle_count(), count);
        assert_eq!(rope.particle(0).pos, start);
        assert_eq!(rope.particle(count - 1).pos, end);
        for i in 0..count {
            let p = rope.particle(i);
            assert_eq!(p.prev_pos, p.pos, "particle {} should start at rest", i);
        }
    }
}

#[test]
fn initialize_rejects_single_particle() {
    let err = Rope::new(Vec3::zero(), Vec3::new(1.0, 0.0, 0.0), straight_config(1, 1.0)).unwrap_err();
    assert_eq!(err, RopeError::TooFewParticles { count: 1 });
}

#[test]
fn straight_rope_settles_at_unit_segments() {
    let start = Vec3::new(0.0, 0.0, 0.0);
    let end = Vec3::new(0.0, 0.0, 4.0);
    let mut rope = Rope::new(start, end, straight_config(5, 4.0)).unwrap();

    step(&mut rope, &AnchorBinding::new(start, end));

    let positions = rope.positions();
    for w in positions.windows(2) {
        assert_abs_diff_eq!(w[0].distance(w[1]), 1.0, epsilon = 1e-3);
    }
    for p in &positions {
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-9);
    }
    assert!(!rope.was_clamped());
    assert_eq!(rope.end_direction(2), Vec3::new(0.0, 0.0, 1.0));
}

#[test]
fn overreaching_end_anchor_is_clamped() {
    let start = Vec3::new(0.0, 0.0, 0.0);
    let mut rope = Rope::new(start, Vec3::new(0.0, 0.0, 4.0), straight_config(5, 4.0)).unwrap();

    step(&mut rope, &AnchorBinding::new(start, Vec3::new(0.0, 0.0, 10.0)));

    let end = rope.end_anchor();
    assert!(rope.was_clamped());
    assert_abs_diff_eq!(end.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(end.y, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(end.z, 4.0, epsilon = 1e-12);
    assert_eq!(rope.particle(4).pos, end);
}

#[test]
fn clamped_end_is_exactly_rope_length_away() {
    let start = Vec3::new(1.0, -2.0, 0.5);
    let mut rope = Rope::new(start, Vec3::new(2.0, -2.0, 0.5), straight_config(12, 3.0)).unwrap();
    step(&mut rope, &AnchorBinding::new(start, Vec3::new(9.0, 4.0, -3.0)));
    assert_abs_diff_eq!(rope.end_anchor().distance(start), 3.0, epsilon = 1e-9);
}

#[test]
fn limiter_can_be_disabled() {
    let start = Vec3::zero();
    let far = Vec3::new(0.0, 0.0, 10.0);
    let config = straight_config(5, 4.0).with_length_limit(false);
    let mut rope = Rope::new(start, Vec3::new(0.0, 0.0, 4.0), config).unwrap();
    step(&mut rope, &AnchorBinding::new(start, far));
    assert!(!rope.was_clamped());
    assert_eq!(rope.end_anchor(), far);
    assert_eq!(rope.particle(4).pos, far);
}

#[test]
fn pins_stay_exact_under_moving_anchors() {
    let config = straight_config(16, 6.0).with_gravity(Vec3::new(0.0, -9.81, 0.0));
    let mut rope = Rope::new(Vec3::zero(), Vec3::new(5.0, 0.0, 0.0), config).unwrap();

    for tick in 0..240 {
        let t = tick as f64 / 60.0;
        let start = Vec3::new(0.0, 0.2 * t, 0.0);
        let end = Vec3::new(5.0 * (1.0 + t).recip(), 3.0 * t, -t);
        step(&mut rope, &AnchorBinding::new(start, end));

        assert_eq!(rope.particle(0).pos, start);
        assert_eq!(rope.particle(15).pos, rope.end_anchor());
        assert!(rope.end_anchor().distance(start) <= 6.0 + 1e-9);
    }
}

#[test]
fn mid_anchor_is_pinned_exactly() {
    let config = straight_config(9, 6.0)
        .with_gravity(Vec3::new(0.0, -9.81, 0.0))
        .with_damping(0.98)
        .with_mid_anchor(0.5);
    let start = Vec3::zero();
    let end = Vec3::new(4.0, 0.0, 0.0);
    let mid = Vec3::new(2.0, 2.0, 0.0);
    let mut rope = Rope::new(start, end, config).unwrap();

    for _ in 0..5 {
        step(&mut rope, &AnchorBinding::new(start, end).with_mid(mid));
        assert_eq!(rope.particle(4).pos, mid);
    }

    // Dropping the mid anchor hands the particle back to the integrator.
    step(&mut rope, &AnchorBinding::new(start, end));
    assert!(!rope.particle(4).pinned);
}

#[test]
fn rope_sags_under_gravity() {
    let config = straight_config(13, 6.0)
        .with_gravity(Vec3::new(0.0, -9.81, 0.0))
        .with_damping(0.98);
    let start = Vec3::new(0.0, 1.0, 0.0);
    let end = Vec3::new(4.0, 1.0, 0.0);
    let mut rope = Rope::new(start, end, config).unwrap();

    for _ in 0..300 {
        step(&mut rope, &AnchorBinding::new(start, end));
    }

    assert!(rope.particle(6).pos.y < 0.0, "middle should hang below the anchors");
    assert_abs_diff_eq!(rope.current_length(), 6.0, epsilon = 0.05);
    assert!(rope.max_segment_error() < 0.01);
}

#[test]
fn hanging_layout_spaces_particles_by_segment_length() {
    let config = straight_config(5, 2.0);
    let rope = Rope::hanging(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, -1.0, 0.0), config).unwrap();
    assert_abs_diff_eq!(rope.segment_length(), 0.5, epsilon = 1e-12);
    assert_eq!(rope.end_anchor(), Vec3::new(0.0, 1.0, 0.0));
    assert!(rope.max_segment_error() < 1e-12);
}

#[test]
fn from_positions_checks_count() {
    let points = [Vec3::zero(), Vec3::new(1.0, 0.0, 0.0)];
    let err = Rope::from_positions(&points, straight_config(3, 2.0)).unwrap_err();
    assert_eq!(err, RopeError::LayoutMismatch { expected: 3, actual: 2 });
}

#[test]
fn set_rope_length_keeps_particle_count() {
    let mut rope = Rope::new(Vec3::zero(), Vec3::new(4.0, 0.0, 0.0), straight_config(5, 4.0)).unwrap();

    rope.set_rope_length(8.0);
    assert_eq!(rope.particle_count(), 5);
    assert_abs_diff_eq!(rope.segment_length(), 2.0, epsilon = 1e-12);

    rope.set_rope_length(-1.0);
    assert_abs_diff_eq!(rope.rope_length(), MIN_ROPE_LENGTH as f64, epsilon = 1e-12);
    assert_abs_diff_eq!(rope.segment_length(), MIN_ROPE_LENGTH as f64 / 4.0, epsilon = 1e-12);
    assert_eq!(rope.particle_count(), 5);
}

#[test]
fn non_finite_rope_length_falls_back_to_minimum() {
    let start = Vec3::zero();
    let end = Vec3::new(4.0, 0.0, 0.0);
    let config = straight_config(5, 4.0).with_gravity(Vec3::new(0.0, -9.81, 0.0));
    let mut rope = Rope::new(start, end, config).unwrap();

    rope.set_rope_length(f64::INFINITY);
    assert_abs_diff_eq!(rope.rope_length(), MIN_ROPE_LENGTH as f64, epsilon = 1e-12);
    for _ in 0..10 {
        step(&mut rope, &AnchorBinding::new(start, end));
    }
    for p in rope.positions() {
        assert!(p.is_finite(), "particle went non-finite: {:?}", p);
    }
    assert_abs_diff_eq!(rope.end_anchor().distance(start), MIN_ROPE_LENGTH as f64, epsilon = 1e-9);

    let built = Rope::new(start, end, straight_config(5, f64::INFINITY)).unwrap();
    assert_abs_diff_eq!(built.rope_length(), MIN_ROPE_LENGTH as f64, epsilon = 1e-12);
    assert!(built.segment_length().is_finite());
}

#[test]
fn shortened_rope_drags_end_anchor_in() {
    let start = Vec3::zero();
    let end = Vec3::new(4.0, 0.0, 0.0);
    let mut rope = Rope::new(start, end, straight_config(5, 4.0)).unwrap();
    rope.set_rope_length(2.5);
    step(&mut rope, &AnchorBinding::new(start, end));
    assert_abs_diff_eq!(rope.end_anchor().x, 2.5, epsilon = 1e-12);
}

#[test]
fn positions_are_idempotent_between_steps() {
    let config = straight_config(10, 5.0).with_gravity(Vec3::new(0.0, -9.81, 0.0));
    let start = Vec3::zero();
    let end = Vec3::new(3.0, 0.0, 0.0);
    let mut rope = Rope::new(start, end, config).unwrap();
    step(&mut rope, &AnchorBinding::new(start, end));
    assert_eq!(rope.positions(), rope.positions());
    assert_eq!(rope.end_direction(3), rope.end_direction(3));
}

#[test]
fn setters_clamp_their_inputs() {
    let mut rope = Rope::new(Vec3::zero(), Vec3::new(2.0, 0.0, 0.0), straight_config(2, 2.0)).unwrap();

    rope.set_constraint_iterations(0);
    assert_eq!(rope.config().constraint_iterations, 1);

    rope.set_damping(1.7);
    assert_eq!(rope.config().damping, 1.0);
    rope.set_damping(f64::NAN);
    assert_eq!(rope.config().damping, 1.0);

    assert_eq!(
        rope.set_mid_anchor(true, 0.5),
        Err(RopeError::NoInteriorParticle { count: 2 }),
    );
    assert!(rope.set_mid_anchor(false, 0.5).is_ok());
}

#[test]
fn length_limit_and_gravity_change_between_ticks() {
    let start = Vec3::zero();
    let far = Vec3::new(0.0, 0.0, 10.0);
    let mut rope = Rope::new(start, Vec3::new(0.0, 0.0, 4.0), straight_config(5, 4.0)).unwrap();

    rope.set_length_limit(false);
    step(&mut rope, &AnchorBinding::new(start, far));
    assert!(!rope.was_clamped());
    assert_eq!(rope.end_anchor(), far);

    rope.set_length_limit(true);
    step(&mut rope, &AnchorBinding::new(start, far));
    assert!(rope.was_clamped());
    assert_abs_diff_eq!(rope.end_anchor().z, 4.0, epsilon = 1e-12);

    // Straight along z with no gravity, the interior never leaves the axis.
    let anchored = AnchorBinding::new(start, Vec3::new(0.0, 0.0, 4.0));
    step(&mut rope, &anchored);
    assert_eq!(rope.particle(2).pos.y, 0.0);

    let gravity = Vec3::new(0.0, -9.81, 0.0);
    rope.set_gravity(gravity);
    assert_eq!(rope.config().gravity, gravity);
    step(&mut rope, &anchored);
    assert!(rope.particle(2).pos.y < 0.0);
}

#[derive(Default)]
struct ClampCounter {
    clamps: usize,
}

impl StepObserver<V> for ClampCounter {
    fn on_length_clamped(&mut self, _requested: V, _clamped: V) {
        self.clamps += 1;
    }
}

#[test]
fn clamp_flag_matches_clamp_events() {
    let start = Vec3::zero();
    let mut rope = Rope::new(start, Vec3::new(0.0, 0.0, 4.0), straight_config(5, 4.0)).unwrap();
    let mut counter = ClampCounter::default();

    // Exactly at full reach is not a clamp.
    rope.step(1.0 / 60.0, &AnchorBinding::new(start, Vec3::new(0.0, 0.0, 4.0)), &NoWorld, &mut counter);
    assert!(!rope.was_clamped());
    assert_eq!(counter.clamps, 0);

    rope.step(1.0 / 60.0, &AnchorBinding::new(start, Vec3::new(0.0, 3.0, 4.0)), &NoWorld, &mut counter);
    assert!(rope.was_clamped());
    assert_eq!(counter.clamps, 1);
    assert_abs_diff_eq!(rope.end_anchor().distance(start), 4.0, epsilon = 1e-12);
}

#[derive(Debug, PartialEq)]
enum Event {
    Integrate,
    Iteration(usize),
    Clamped,
    Probed(usize, bool),
    Complete,
}

#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
}

impl StepObserver<V> for Recorder {
    fn on_integrate(&mut self) {
        self.events.push(Event::Integrate);
    }
    fn on_constraint_iteration(&mut self, iteration: usize) {
        self.events.push(Event::Iteration(iteration));
    }
    fn on_length_clamped(&mut self, _requested: V, _clamped: V) {
        self.events.push(Event::Clamped);
    }
    fn on_segment_probed(&mut self, segment: usize, hit: Option<&ProbeHit<V>>) {
        self.events.push(Event::Probed(segment, hit.is_some()));
    }
    fn on_step_complete(&mut self) {
        self.events.push(Event::Complete);
    }
}

#[test]
fn observer_sees_pipeline_in_order() {
    let config = straight_config(4, 3.0).with_iterations(3);
    let start = Vec3::zero();
    let mut rope = Rope::new(start, Vec3::new(3.0, 0.0, 0.0), config).unwrap();
    let mut recorder = Recorder::default();

    rope.step(1.0 / 60.0, &AnchorBinding::new(start, Vec3::new(9.0, 0.0, 0.0)), &NoWorld, &mut recorder);

    assert_eq!(
        recorder.events,
        vec![
            Event::Integrate,
            Event::Iteration(0),
            Event::Iteration(1),
            Event::Iteration(2),
            Event::Clamped,
            Event::Probed(0, false),
            Event::Probed(1, false),
            Event::Probed(2, false),
            Event::Complete,
        ],
    );
}
