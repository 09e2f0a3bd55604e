//! Error types for hero transitions and range interpolation.
//!
//! None of these are fatal. Fail-soft entry points log and fall back; the
//! strict `try_*` variants surface them to callers that want to know.

use serde::{Deserialize, Serialize};

use crate::ids::HeroId;

/// Which measured rect a transition is still waiting on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RectSlot {
    Source,
    Destination,
}

impl std::fmt::Display for RectSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RectSlot::Source => f.write_str("source"),
            RectSlot::Destination => f.write_str("destination"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum HeroError {
    /// Breakpoint table is empty, mismatched or not sorted.
    #[error("invalid breakpoint table ({input_len} inputs, {output_len} outputs): {reason}")]
    InvalidConfiguration {
        input_len: usize,
        output_len: usize,
        reason: String,
    },

    /// Zero-width input segment; the slope is undefined.
    #[error("degenerate segment ending at breakpoint {index} (x = {at})")]
    DegenerateSegment { index: usize, at: f32 },

    /// A rect the transition needs has not been measured by the host yet.
    #[error("hero '{hero}' is waiting for its {which} rect")]
    PendingMeasurement { hero: HeroId, which: RectSlot },

    #[error("unknown hero '{hero}'")]
    UnknownHero { hero: HeroId },

    /// Operation not valid from the transition's current state.
    #[error("hero '{hero}' cannot {action} while {state}")]
    InvalidState {
        hero: HeroId,
        state: String,
        action: String,
    },
}

impl HeroError {
    pub(crate) fn invalid_table(input_len: usize, output_len: usize, reason: &str) -> Self {
        HeroError::InvalidConfiguration {
            input_len,
            output_len,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_hero() {
        let err = HeroError::PendingMeasurement {
            hero: HeroId::from("avatar-3"),
            which: RectSlot::Destination,
        };
        assert_eq!(
            err.to_string(),
            "hero 'avatar-3' is waiting for its destination rect"
        );
    }
}
