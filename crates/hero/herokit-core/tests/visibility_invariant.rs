use herokit_core::{
    CornerRadii, Direction, HeroId, HeroTransition, Rect, StartOutcome, TransitionState,
};

fn measured() -> HeroTransition {
    let mut h = HeroTransition::new(HeroId::from("card"), CornerRadii::new(12.0, 0.0));
    h.measure_source(Rect::new(24.0, 300.0, 160.0, 160.0));
    h.measure_destination(Rect::new(0.0, 0.0, 390.0, 600.0));
    h
}

fn assert_single_visible(h: &HeroTransition) {
    let v = h.visibility();
    assert_eq!(
        v.visible_count(),
        1,
        "state {:?} has visibility {:?}",
        h.state(),
        v
    );
}

/// Small deterministic LCG so the sweep is reproducible without extra crates.
struct Lcg(u64);

impl Lcg {
    fn next_f32(&mut self) -> f32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 40) as f32) / ((1u64 << 24) as f32)
    }
}

#[test]
fn sweep_zero_to_one_to_zero_keeps_one_representation() {
    let mut h = measured();
    assert_single_visible(&h);

    h.start().unwrap();
    assert_single_visible(&h);
    for k in 1..=10 {
        h.set_progress(k as f32 / 10.0);
        assert_single_visible(&h);
    }
    assert_eq!(h.state(), TransitionState::SourceHidden);

    h.start_reverse().unwrap();
    assert_single_visible(&h);
    for k in (0..10).rev() {
        h.set_progress(k as f32 / 10.0);
        assert_single_visible(&h);
    }
    assert_eq!(h.state(), TransitionState::Idle);
}

#[test]
fn random_progress_walks_never_show_two_views() {
    let mut rng = Lcg(7);
    for _ in 0..50 {
        let mut h = measured();
        for _ in 0..200 {
            match h.state() {
                TransitionState::Idle => {
                    h.start().unwrap();
                }
                TransitionState::SourceHidden => {
                    h.start_reverse().unwrap();
                }
                _ => {
                    let r = rng.next_f32();
                    // Bias toward the ends so completions actually happen.
                    let p = if r < 0.1 {
                        0.0
                    } else if r > 0.9 {
                        1.0
                    } else {
                        r * 1.4 - 0.2
                    };
                    h.set_progress(p);
                }
            }
            assert_single_visible(&h);
        }
    }
}

#[test]
fn pending_start_keeps_source_visible_until_measured() {
    let mut h = HeroTransition::new(HeroId::from("note"), CornerRadii::default());
    h.measure_source(Rect::new(10.0, 10.0, 100.0, 100.0));
    assert!(matches!(h.start(), Ok(StartOutcome::Deferred { .. })));
    for p in [0.1, 0.4, 0.9] {
        assert_eq!(h.set_progress(p), None);
        assert!(h.visibility().source);
        assert_single_visible(&h);
    }
    let frame = h
        .measure_destination(Rect::new(0.0, 0.0, 300.0, 500.0))
        .expect("activated on measure");
    // Never tweened against a zero rect.
    assert!(!frame.rect.is_empty());
    assert_eq!(
        h.state(),
        TransitionState::Animating {
            progress: 0.9,
            direction: Direction::Forward
        }
    );
    assert_single_visible(&h);
}

#[test]
fn cancel_and_reset_restore_a_single_view() {
    let mut h = measured();
    h.start().unwrap();
    h.set_progress(0.6);
    h.cancel();
    assert_single_visible(&h);
    assert!(h.visibility().source);

    h.start().unwrap();
    h.set_progress(1.0);
    h.start_reverse().unwrap();
    h.scrub(0.5);
    h.reset();
    assert_eq!(h.state(), TransitionState::Idle);
    assert_single_visible(&h);
}
