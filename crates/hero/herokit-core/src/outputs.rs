//! Output contracts from the hero engine.
//!
//! Outputs carry one overlay frame per hero whose overlay moved this tick,
//! plus a separate list of semantic events. Host adapters apply the frames to
//! their overlay views and use the events to mount/unmount real views.

use serde::{Deserialize, Serialize};

use crate::error::RectSlot;
use crate::geometry::Rect;
use crate::ids::{HeroId, TransitionSeq};
use crate::transition::{Direction, Visibility};

/// Overlay geometry for one hero this tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayFrame {
    pub hero: HeroId,
    pub seq: TransitionSeq,
    pub rect: Rect,
    pub corner_radius: f32,
    pub progress: f32,
    pub visibility: Visibility,
}

/// Discrete semantic signals emitted while stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum HeroEvent {
    Started {
        hero: HeroId,
        seq: TransitionSeq,
        direction: Direction,
    },
    Deferred {
        hero: HeroId,
        seq: TransitionSeq,
        waiting_on: RectSlot,
    },
    Activated {
        hero: HeroId,
        seq: TransitionSeq,
        direction: Direction,
    },
    /// Progress settled at `end` (0.0 = source shown, 1.0 = destination shown).
    Completed {
        hero: HeroId,
        seq: TransitionSeq,
        direction: Direction,
        end: f32,
    },
    Cancelled {
        hero: HeroId,
        seq: TransitionSeq,
        direction: Direction,
    },
    Error {
        message: String,
    },
}

/// Outputs returned by HeroEngine::update().
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub frames: Vec<OverlayFrame>,
    #[serde(default)]
    pub events: Vec<HeroEvent>,
    /// Events dropped this tick because of `max_events_per_tick`.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub dropped_events: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.frames.clear();
        self.events.clear();
        self.dropped_events = 0;
    }

    /// Replace any earlier frame for the same hero so each hero appears once.
    pub fn push_frame(&mut self, frame: OverlayFrame) {
        match self.frames.iter_mut().find(|f| f.hero == frame.hero) {
            Some(existing) => *existing = frame,
            None => self.frames.push(frame),
        }
    }

    #[inline]
    pub fn push_event(&mut self, event: HeroEvent) {
        self.events.push(event);
    }

    pub fn frame_for(&self, hero: &HeroId) -> Option<&OverlayFrame> {
        self.frames.iter().find(|f| &f.hero == hero)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() && self.events.is_empty()
    }
}
