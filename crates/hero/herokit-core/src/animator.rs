//! Timed progress driver.
//!
//! Hosts with their own animation timer can feed progress straight into a
//! transition. Hosts without one hand the engine a target and a duration and
//! let `ProgressAnimator` produce the per-tick values.

use serde::{Deserialize, Serialize};

use crate::interp::functions::{cubic_bezier_ease, lerp_f32};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "ctrl", rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    /// CSS-style control points (x1, y1, x2, y2).
    CubicBezier([f32; 4]),
}

impl Easing {
    fn control_points(self) -> [f32; 4] {
        match self {
            Easing::Linear => [0.0, 0.0, 1.0, 1.0],
            Easing::EaseIn => [0.42, 0.0, 1.0, 1.0],
            Easing::EaseOut => [0.0, 0.0, 0.58, 1.0],
            Easing::EaseInOut => [0.42, 0.0, 0.58, 1.0],
            Easing::CubicBezier(ctrl) => ctrl,
        }
    }

    /// Eased value of `t`; input is clamped and both ends are exact.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        cubic_bezier_ease(t, self.control_points())
    }
}

/// Drives progress from `from` to `to` over `duration_s` seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressAnimator {
    pub from: f32,
    pub to: f32,
    pub duration_s: f32,
    pub easing: Easing,
    elapsed: f32,
}

impl ProgressAnimator {
    pub fn new(from: f32, to: f32, duration_s: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_s: duration_s.max(0.0),
            easing,
            elapsed: 0.0,
        }
    }

    /// Fraction of the duration that has elapsed, in [0, 1].
    pub fn fraction(&self) -> f32 {
        if self.duration_s <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration_s).clamp(0.0, 1.0)
    }

    pub fn value(&self) -> f32 {
        let f = self.fraction();
        if f >= 1.0 {
            return self.to;
        }
        lerp_f32(self.from, self.to, self.easing.apply(f))
    }

    /// Advance by `dt` seconds and return the new value. Negative or
    /// non-finite steps are ignored.
    pub fn tick(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration_s);
        }
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.fraction() >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints_are_exact() {
        for e in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::CubicBezier([0.2, 0.9, 0.1, 1.0]),
        ] {
            assert_eq!(e.apply(0.0), 0.0);
            assert_eq!(e.apply(1.0), 1.0);
            assert_eq!(e.apply(-2.0), 0.0);
            assert_eq!(e.apply(3.0), 1.0);
        }
    }

    #[test]
    fn ease_in_starts_slow_ease_out_starts_fast() {
        assert!(Easing::EaseIn.apply(0.25) < 0.25);
        assert!(Easing::EaseOut.apply(0.25) > 0.25);
    }

    #[test]
    fn linear_animator_progresses_evenly() {
        let mut a = ProgressAnimator::new(0.0, 1.0, 1.0, Easing::Linear);
        assert!((a.tick(0.25) - 0.25).abs() < 1e-5);
        assert!((a.tick(0.25) - 0.5).abs() < 1e-5);
        assert!(!a.is_finished());
        assert_eq!(a.tick(10.0), 1.0);
        assert!(a.is_finished());
    }

    #[test]
    fn reverse_animation_counts_down() {
        let mut a = ProgressAnimator::new(0.8, 0.0, 0.5, Easing::Linear);
        assert!((a.tick(0.25) - 0.4).abs() < 1e-5);
        assert_eq!(a.tick(0.25), 0.0);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let a = ProgressAnimator::new(0.0, 1.0, 0.0, Easing::EaseInOut);
        assert!(a.is_finished());
        assert_eq!(a.value(), 1.0);
    }

    #[test]
    fn easing_json_tags() {
        let json = serde_json::to_value(Easing::CubicBezier([0.1, 0.2, 0.3, 0.4])).unwrap();
        assert_eq!(json["type"], "cubic_bezier");
        let back: Easing = serde_json::from_str(r#"{"type":"ease_out"}"#).unwrap();
        assert_eq!(back, Easing::EaseOut);
    }
}
