//! Rect + corner radius tween between a measured source and destination.
//!
//! Progress is clamped to [0, 1] before blending so the overlay can never
//! overshoot either end or invert its size.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::interp::functions::{lerp_f32, lerp_rect};

/// Clamp progress into [0, 1]; NaN counts as 0.
#[inline]
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Interpolated rect at `progress`.
pub fn tween(source: Rect, destination: Rect, progress: f32) -> Rect {
    lerp_rect(source, destination, clamp_progress(progress))
}

/// Corner radius at each end of the tween. A circular avatar opening into a
/// full-bleed detail view is typically `{ source: w / 2, destination: 0 }`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CornerRadii {
    pub source: f32,
    pub destination: f32,
}

impl CornerRadii {
    pub fn new(source: f32, destination: f32) -> Self {
        Self {
            source: source.max(0.0),
            destination: destination.max(0.0),
        }
    }

    /// Same radius at both ends.
    pub fn uniform(radius: f32) -> Self {
        Self::new(radius, radius)
    }

    pub fn swapped(self) -> Self {
        Self {
            source: self.destination,
            destination: self.source,
        }
    }
}

/// One overlay sample.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TweenFrame {
    pub rect: Rect,
    pub corner_radius: f32,
    /// Clamped progress the frame was sampled at.
    pub progress: f32,
}

pub fn tween_with_radius(
    source: Rect,
    destination: Rect,
    radii: CornerRadii,
    progress: f32,
) -> TweenFrame {
    let p = clamp_progress(progress);
    TweenFrame {
        rect: lerp_rect(source, destination, p),
        corner_radius: lerp_f32(radii.source, radii.destination, p).max(0.0),
        progress: p,
    }
}

/// A source/destination pair with the radii to blend between.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RectTween {
    pub source: Rect,
    pub destination: Rect,
    #[serde(default)]
    pub radii: CornerRadii,
}

impl RectTween {
    pub fn new(source: Rect, destination: Rect, radii: CornerRadii) -> Self {
        Self {
            source,
            destination,
            radii,
        }
    }

    #[inline]
    pub fn sample(&self, progress: f32) -> TweenFrame {
        tween_with_radius(self.source, self.destination, self.radii, progress)
    }

    /// The same tween run from the destination back to the source.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.destination,
            destination: self.source,
            radii: self.radii.swapped(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src() -> Rect {
        Rect::new(0.0, 0.0, 50.0, 50.0)
    }

    fn dst() -> Rect {
        Rect::new(100.0, 200.0, 300.0, 400.0)
    }

    #[test]
    fn halfway() {
        assert_eq!(tween(src(), dst(), 0.5), Rect::new(50.0, 100.0, 175.0, 225.0));
    }

    #[test]
    fn progress_is_clamped_not_extrapolated() {
        assert_eq!(tween(src(), dst(), -1.0), src());
        assert_eq!(tween(src(), dst(), 2.5), dst());
        assert_eq!(tween(src(), dst(), f32::NAN), src());
    }

    #[test]
    fn radius_follows_progress() {
        let t = RectTween::new(src(), dst(), CornerRadii::new(25.0, 0.0));
        assert_eq!(t.sample(0.0).corner_radius, 25.0);
        assert_eq!(t.sample(0.4).corner_radius, 15.0);
        assert_eq!(t.sample(1.0).corner_radius, 0.0);
    }

    #[test]
    fn reversed_mirrors_progress() {
        let t = RectTween::new(src(), dst(), CornerRadii::new(25.0, 0.0));
        let r = t.reversed();
        let a = t.sample(0.25);
        let b = r.sample(0.75);
        assert!(a.rect.approx_eq(&b.rect, 1e-4));
        assert!((a.corner_radius - b.corner_radius).abs() < 1e-4);
    }
}
