//! Drag-to-progress mapping for interactive dismissal.
//!
//! Dragging a presented detail view downward shrinks it back toward its
//! source: progress starts at 1 and falls as the translation grows. On
//! release the transition settles at whichever end the gesture points to.

use serde::{Deserialize, Serialize};

use crate::interp::range::interpolate;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Translation (points) that maps progress all the way to 0.
    pub distance: f32,
    /// Progress below which a slow release rolls back to the source.
    pub threshold: f32,
    /// Release speed (points/s) that decides the outcome on its own.
    pub velocity_threshold: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            distance: 300.0,
            threshold: 0.5,
            velocity_threshold: 800.0,
        }
    }
}

/// Progress for a dismissal drag of `translation` points (positive = down).
pub fn drag_progress(translation: f32, cfg: &DragConfig) -> f32 {
    let distance = cfg.distance.max(f32::EPSILON);
    interpolate(translation, &[0.0, distance], &[1.0, 0.0])
}

/// End (0.0 or 1.0) a released drag should settle at.
///
/// `velocity` is in points/s along the drag axis; positive moves toward the
/// source (progress falling).
pub fn release_target(progress: f32, velocity: f32, cfg: &DragConfig) -> f32 {
    if velocity.is_finite() && velocity.abs() >= cfg.velocity_threshold {
        return if velocity > 0.0 { 0.0 } else { 1.0 };
    }
    if progress < cfg.threshold {
        0.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_maps_translation_to_falling_progress() {
        let cfg = DragConfig::default();
        assert_eq!(drag_progress(0.0, &cfg), 1.0);
        assert_eq!(drag_progress(-40.0, &cfg), 1.0);
        assert!((drag_progress(150.0, &cfg) - 0.5).abs() < 1e-6);
        assert_eq!(drag_progress(300.0, &cfg), 0.0);
        assert_eq!(drag_progress(900.0, &cfg), 0.0);
    }

    #[test]
    fn slow_release_uses_threshold() {
        let cfg = DragConfig::default();
        assert_eq!(release_target(0.3, 0.0, &cfg), 0.0);
        assert_eq!(release_target(0.7, 100.0, &cfg), 1.0);
    }

    #[test]
    fn fling_overrides_threshold() {
        let cfg = DragConfig::default();
        assert_eq!(release_target(0.9, 1200.0, &cfg), 0.0);
        assert_eq!(release_target(0.1, -1200.0, &cfg), 1.0);
    }
}
