//! Core configuration for herokit-core.

use serde::{Deserialize, Serialize};

use crate::animator::Easing;
use crate::gesture::DragConfig;

/// Engine-wide tuning. Every field has a default, so partial JSON works.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Progress within this distance of 0 or 1 counts as reaching that end.
    pub progress_epsilon: f32,
    /// Duration used when a released drag settles.
    pub settle_duration_s: f32,
    /// Easing used by `animate_to` commands that do not name one.
    pub default_easing: Easing,
    pub drag: DragConfig,
    /// Events beyond this count in one tick are dropped.
    pub max_events_per_tick: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            progress_epsilon: 1e-4,
            settle_duration_s: 0.35,
            default_easing: Easing::EaseInOut,
            drag: DragConfig::default(),
            max_events_per_tick: 1024,
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = Config::from_json_str(r#"{ "settle_duration_s": 0.5, "drag": { "threshold": 0.3 } }"#)
            .unwrap();
        assert_eq!(cfg.settle_duration_s, 0.5);
        assert_eq!(cfg.drag.threshold, 0.3);
        assert_eq!(cfg.drag.distance, 300.0);
        assert_eq!(cfg.progress_epsilon, 1e-4);
    }
}
