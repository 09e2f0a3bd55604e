use herokit_core::{tween, tween_with_radius, CornerRadii, Rect, RectTween};
use herokit_test_fixtures::transitions;
use serde::Deserialize;

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn components(r: &Rect) -> [f32; 4] {
    [r.origin.x, r.origin.y, r.size.width, r.size.height]
}

#[derive(Debug, Deserialize)]
struct Sample {
    progress: f32,
    rect: [f32; 4],
    corner_radius: f32,
}

#[derive(Debug, Deserialize)]
struct TweenFixture {
    source: Rect,
    destination: Rect,
    radii: CornerRadii,
    samples: Vec<Sample>,
}

fn pairs() -> Vec<(Rect, Rect)> {
    vec![
        (Rect::new(0.0, 0.0, 50.0, 50.0), Rect::new(100.0, 200.0, 300.0, 400.0)),
        (Rect::new(300.0, 500.0, 80.0, 80.0), Rect::new(0.0, 0.0, 390.0, 844.0)),
        (Rect::new(-20.0, 10.0, 500.0, 20.0), Rect::new(40.0, -60.0, 10.0, 600.0)),
        (Rect::new(5.0, 5.0, 5.0, 5.0), Rect::new(5.0, 5.0, 5.0, 5.0)),
    ]
}

#[test]
fn worked_example_halfway() {
    let got = tween(
        Rect::new(0.0, 0.0, 50.0, 50.0),
        Rect::new(100.0, 200.0, 300.0, 400.0),
        0.5,
    );
    assert_eq!(got, Rect::new(50.0, 100.0, 175.0, 225.0));
}

#[test]
fn fixture_transitions_match_expected_samples() {
    for name in transitions::keys() {
        let fx: TweenFixture = transitions::load(&name).expect("transition fixture");
        let t = RectTween::new(fx.source, fx.destination, fx.radii);
        for s in &fx.samples {
            let frame = t.sample(s.progress);
            let got = components(&frame.rect);
            for k in 0..4 {
                approx(got[k], s.rect[k], 1e-3);
            }
            approx(frame.corner_radius, s.corner_radius, 1e-3);
        }
    }
}

#[test]
fn ends_reproduce_source_and_destination() {
    for (s, d) in pairs() {
        assert!(tween(s, d, 0.0).approx_eq(&s, 1e-4));
        assert!(tween(s, d, 1.0).approx_eq(&d, 1e-4));
    }
}

#[test]
fn each_coordinate_moves_monotonically_without_overshoot() {
    for (s, d) in pairs() {
        let src = components(&s);
        let dst = components(&d);
        let mut prev = src;
        for k in 1..=20 {
            let p = k as f32 / 20.0;
            let cur = components(&tween(s, d, p));
            for c in 0..4 {
                let (lo, hi) = if src[c] <= dst[c] {
                    (src[c], dst[c])
                } else {
                    (dst[c], src[c])
                };
                assert!(cur[c] >= lo - 1e-3 && cur[c] <= hi + 1e-3);
                // prev lies between the source and the current sample.
                let (a, b) = if src[c] <= cur[c] {
                    (src[c], cur[c])
                } else {
                    (cur[c], src[c])
                };
                assert!(prev[c] >= a - 1e-3 && prev[c] <= b + 1e-3);
            }
            prev = cur;
        }
    }
}

#[test]
fn out_of_range_progress_never_inverts_sizes() {
    for (s, d) in pairs() {
        for p in [-10.0, -0.01, 1.01, 25.0, f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
            let r = tween(s, d, p);
            assert!(r.width() >= 0.0 && r.height() >= 0.0);
            assert!(r.is_finite());
        }
    }
}

#[test]
fn avatar_radius_collapses_to_square_corners() {
    let avatar = Rect::new(16.0, 120.0, 60.0, 60.0);
    let header = Rect::new(0.0, 0.0, 390.0, 320.0);
    let radii = CornerRadii::new(30.0, 0.0);
    assert_eq!(tween_with_radius(avatar, header, radii, 0.0).corner_radius, 30.0);
    assert_eq!(tween_with_radius(avatar, header, radii, 0.5).corner_radius, 15.0);
    assert_eq!(tween_with_radius(avatar, header, radii, 1.0).corner_radius, 0.0);
}
