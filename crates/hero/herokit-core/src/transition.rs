//! Per-hero transition state machine.
//!
//! Exactly one representation of the transitioning content is visible at any
//! time: the real source view, the real destination view, or the synthesized
//! overlay that is tweened between them.
//!
//! ```text
//!            start()                      progress -> 1
//!   Idle ───────────────► Animating ───────────────────► SourceHidden
//!    ▲   (dest unknown)       ▲  │                              │
//!    │        │               │  │ progress -> 0                │ start_reverse()
//!    │        ▼   measured    │  ▼                              ▼
//!    │     Pending ───────────┘ Idle                        Animating(rev)
//! ```
//!
//! Progress is always expressed on the source -> destination axis: 0 is the
//! source rect, 1 is the destination rect, whichever direction is running.

use serde::{Deserialize, Serialize};

use crate::error::{HeroError, RectSlot};
use crate::geometry::Rect;
use crate::ids::{HeroId, IdAllocator, TransitionSeq};
use crate::outputs::HeroEvent;
use crate::tween::{clamp_progress, CornerRadii, RectTween, TweenFrame};

const DEFAULT_EPSILON: f32 = 1e-4;
const DEFAULT_EVENT_CAP: usize = 1024;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Source -> destination, started from `Idle`.
    Forward,
    /// Destination -> source, started from `SourceHidden`.
    Reverse,
}

impl Direction {
    /// Progress value the direction starts from.
    pub fn start_progress(self) -> f32 {
        match self {
            Direction::Forward => 0.0,
            Direction::Reverse => 1.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TransitionState {
    /// Source shown, destination hidden.
    #[default]
    Idle,
    /// Start requested before both rects were measured. The resting view for
    /// `direction` stays visible; `progress` is the latest requested value.
    Pending { progress: f32, direction: Direction },
    /// Overlay shown, both real views hidden.
    Animating { progress: f32, direction: Direction },
    /// Destination shown, source hidden.
    SourceHidden,
}

impl TransitionState {
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            TransitionState::Pending { .. } | TransitionState::Animating { .. }
        )
    }

    pub fn progress(&self) -> Option<f32> {
        match self {
            TransitionState::Pending { progress, .. }
            | TransitionState::Animating { progress, .. } => Some(*progress),
            TransitionState::Idle | TransitionState::SourceHidden => None,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            TransitionState::Pending { direction, .. }
            | TransitionState::Animating { direction, .. } => Some(*direction),
            TransitionState::Idle | TransitionState::SourceHidden => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransitionState::Idle => "idle",
            TransitionState::Pending { .. } => "pending",
            TransitionState::Animating { .. } => "animating",
            TransitionState::SourceHidden => "source_hidden",
        }
    }
}

/// Which representation the host should draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub source: bool,
    pub destination: bool,
    pub overlay: bool,
}

impl Visibility {
    const SOURCE: Visibility = Visibility {
        source: true,
        destination: false,
        overlay: false,
    };
    const DESTINATION: Visibility = Visibility {
        source: false,
        destination: true,
        overlay: false,
    };
    const OVERLAY: Visibility = Visibility {
        source: false,
        destination: false,
        overlay: true,
    };

    pub fn visible_count(&self) -> usize {
        [self.source, self.destination, self.overlay]
            .iter()
            .filter(|v| **v)
            .count()
    }
}

impl From<&TransitionState> for Visibility {
    fn from(state: &TransitionState) -> Self {
        match state {
            TransitionState::Idle => Visibility::SOURCE,
            TransitionState::Pending {
                direction: Direction::Forward,
                ..
            } => Visibility::SOURCE,
            TransitionState::Pending {
                direction: Direction::Reverse,
                ..
            } => Visibility::DESTINATION,
            TransitionState::Animating { .. } => Visibility::OVERLAY,
            TransitionState::SourceHidden => Visibility::DESTINATION,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StartOutcome {
    /// Overlay is live; apply `frame` now.
    Activated { frame: TweenFrame },
    /// Waiting for the host to measure `waiting_on`.
    Deferred { waiting_on: RectSlot },
}

/// One hero context: measured rects, state and the current overlay frame.
#[derive(Debug)]
pub struct HeroTransition {
    id: HeroId,
    radii: CornerRadii,
    source: Option<Rect>,
    destination: Option<Rect>,
    state: TransitionState,
    frame: Option<TweenFrame>,
    seqs: IdAllocator,
    seq: TransitionSeq,
    /// Progress has moved away from the direction's start value.
    departed: bool,
    epsilon: f32,
    events: Vec<HeroEvent>,
    event_cap: usize,
    dropped_events: usize,
}

/// Host rects with no area or non-finite components count as unmeasured.
fn usable(rect: Rect) -> Option<Rect> {
    (rect.is_finite() && !rect.is_empty()).then_some(rect)
}

impl HeroTransition {
    pub fn new(id: HeroId, radii: CornerRadii) -> Self {
        Self {
            id,
            radii,
            source: None,
            destination: None,
            state: TransitionState::Idle,
            frame: None,
            seqs: IdAllocator::new(),
            seq: TransitionSeq::default(),
            departed: false,
            epsilon: DEFAULT_EPSILON,
            events: Vec::new(),
            event_cap: DEFAULT_EVENT_CAP,
            dropped_events: 0,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon.max(0.0);
        self
    }

    /// Bound the undrained event queue; events past the cap are counted
    /// in [`dropped_events`](Self::dropped_events) and discarded.
    pub fn with_event_cap(mut self, cap: usize) -> Self {
        self.event_cap = cap;
        self
    }

    /// Events discarded because the queue was full when they were recorded.
    pub fn dropped_events(&self) -> usize {
        self.dropped_events
    }

    pub fn id(&self) -> &HeroId {
        &self.id
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::from(&self.state)
    }

    /// Overlay frame; `Some` only while animating.
    pub fn frame(&self) -> Option<TweenFrame> {
        self.frame
    }

    /// Sequence number of the most recent start.
    pub fn seq(&self) -> TransitionSeq {
        self.seq
    }

    pub fn radii(&self) -> CornerRadii {
        self.radii
    }

    pub fn set_radii(&mut self, radii: CornerRadii) {
        self.radii = radii;
        self.refresh_frame();
    }

    pub fn source_rect(&self) -> Option<Rect> {
        self.source
    }

    pub fn destination_rect(&self) -> Option<Rect> {
        self.destination
    }

    /// Tween between the measured rects, if both are known.
    pub fn tween(&self) -> Option<RectTween> {
        match (self.source, self.destination) {
            (Some(s), Some(d)) => Some(RectTween::new(s, d, self.radii)),
            _ => None,
        }
    }

    /// Record the source rect. Returns the overlay frame if this measurement
    /// activated a pending transition or moved a running one.
    pub fn measure_source(&mut self, rect: Rect) -> Option<TweenFrame> {
        self.source = usable(rect);
        if self.source.is_none() {
            log::debug!("hero '{}': ignoring unusable source rect {:?}", self.id, rect);
        }
        self.after_measure()
    }

    /// Record the destination rect; see [`measure_source`](Self::measure_source).
    pub fn measure_destination(&mut self, rect: Rect) -> Option<TweenFrame> {
        self.destination = usable(rect);
        if self.destination.is_none() {
            log::debug!(
                "hero '{}': ignoring unusable destination rect {:?}",
                self.id,
                rect
            );
        }
        self.after_measure()
    }

    /// Forget the source rect, e.g. when the source cell scrolled away.
    /// A running overlay falls back to `Pending` until it is measured again.
    pub fn invalidate_source(&mut self) {
        self.source = None;
        self.after_measure();
    }

    /// Forget the destination rect, e.g. when the detail view unmounts.
    pub fn invalidate_destination(&mut self) {
        self.destination = None;
        self.after_measure();
    }

    fn missing_slot(&self) -> Option<RectSlot> {
        match (self.source, self.destination) {
            (None, _) => Some(RectSlot::Source),
            (_, None) => Some(RectSlot::Destination),
            _ => None,
        }
    }

    fn after_measure(&mut self) -> Option<TweenFrame> {
        match self.state {
            TransitionState::Pending {
                progress,
                direction,
            } => {
                if self.tween().is_some() {
                    self.activate(progress, direction);
                }
                self.frame
            }
            TransitionState::Animating {
                progress,
                direction,
            } => {
                if let Some(waiting_on) = self.missing_slot() {
                    self.suspend(progress, direction, waiting_on);
                    return None;
                }
                self.refresh_frame();
                self.frame
            }
            TransitionState::Idle | TransitionState::SourceHidden => None,
        }
    }

    /// Park a running overlay that lost one of its rects. The resting view
    /// is shown again and progress is kept for reactivation.
    fn suspend(&mut self, progress: f32, direction: Direction, waiting_on: RectSlot) {
        self.state = TransitionState::Pending {
            progress,
            direction,
        };
        self.frame = None;
        log::debug!(
            "hero '{}': {} rect lost at progress {}, waiting for a new measurement",
            self.id,
            waiting_on,
            progress
        );
        self.record(HeroEvent::Deferred {
            hero: self.id.clone(),
            seq: self.seq,
            waiting_on,
        });
    }

    fn record(&mut self, event: HeroEvent) {
        if self.events.len() < self.event_cap {
            self.events.push(event);
        } else {
            self.dropped_events += 1;
        }
    }

    fn refresh_frame(&mut self) {
        if let TransitionState::Animating { progress, .. } = self.state {
            if let Some(tween) = self.tween() {
                self.frame = Some(tween.sample(progress));
            }
        }
    }

    /// Show the overlay at `progress`. Progress already at an end completes
    /// immediately.
    fn activate(&mut self, progress: f32, direction: Direction) {
        self.state = TransitionState::Animating {
            progress,
            direction,
        };
        log::debug!(
            "hero '{}': animating {:?} from progress {}",
            self.id,
            direction,
            progress
        );
        self.record(HeroEvent::Activated {
            hero: self.id.clone(),
            seq: self.seq,
            direction,
        });
        self.apply_progress(progress, true);
    }

    fn invalid(&self, action: &str) -> HeroError {
        HeroError::InvalidState {
            hero: self.id.clone(),
            state: self.state.name().to_string(),
            action: action.to_string(),
        }
    }

    fn begin(&mut self, direction: Direction) -> Result<StartOutcome, HeroError> {
        let (resting, resting_slot, other, other_slot) = match direction {
            Direction::Forward => (
                self.source,
                RectSlot::Source,
                self.destination,
                RectSlot::Destination,
            ),
            Direction::Reverse => (
                self.destination,
                RectSlot::Destination,
                self.source,
                RectSlot::Source,
            ),
        };
        if resting.is_none() {
            return Err(HeroError::PendingMeasurement {
                hero: self.id.clone(),
                which: resting_slot,
            });
        }

        self.seq = self.seqs.alloc_seq();
        self.departed = false;
        self.record(HeroEvent::Started {
            hero: self.id.clone(),
            seq: self.seq,
            direction,
        });

        let progress = direction.start_progress();
        if other.is_none() {
            self.state = TransitionState::Pending {
                progress,
                direction,
            };
            self.frame = None;
            log::debug!(
                "hero '{}': start deferred until the {} rect is measured",
                self.id,
                other_slot
            );
            self.record(HeroEvent::Deferred {
                hero: self.id.clone(),
                seq: self.seq,
                waiting_on: other_slot,
            });
            return Ok(StartOutcome::Deferred {
                waiting_on: other_slot,
            });
        }

        self.activate(progress, direction);
        match self.frame {
            Some(frame) => Ok(StartOutcome::Activated { frame }),
            None => Err(HeroError::PendingMeasurement {
                hero: self.id.clone(),
                which: other_slot,
            }),
        }
    }

    /// Start the forward transition from `Idle`.
    ///
    /// Fails with `PendingMeasurement` if the source was never measured and
    /// with `InvalidState` if a transition is already running or presented.
    pub fn start(&mut self) -> Result<StartOutcome, HeroError> {
        if self.state != TransitionState::Idle {
            return Err(self.invalid("start"));
        }
        self.begin(Direction::Forward)
    }

    /// Start the dismissal from `SourceHidden`; progress begins at 1.
    pub fn start_reverse(&mut self) -> Result<StartOutcome, HeroError> {
        if self.state != TransitionState::SourceHidden {
            return Err(self.invalid("start_reverse"));
        }
        self.begin(Direction::Reverse)
    }

    /// Move progress without ever completing; for drags still in flight.
    pub fn scrub(&mut self, progress: f32) -> Option<TweenFrame> {
        self.apply_progress(progress, false)
    }

    /// Move progress; reaching 1 finishes at `SourceHidden`, reaching 0
    /// finishes at `Idle`. An end only counts once progress has left the
    /// value the transition started from.
    ///
    /// Returns the overlay frame while the overlay stays visible.
    pub fn set_progress(&mut self, progress: f32) -> Option<TweenFrame> {
        self.apply_progress(progress, true)
    }

    fn apply_progress(&mut self, progress: f32, may_complete: bool) -> Option<TweenFrame> {
        let p = clamp_progress(progress);
        match self.state {
            TransitionState::Pending { direction, .. } => {
                self.state = TransitionState::Pending {
                    progress: p,
                    direction,
                };
                None
            }
            TransitionState::Animating { direction, .. } => {
                self.state = TransitionState::Animating {
                    progress: p,
                    direction,
                };
                self.refresh_frame();
                log::trace!("hero '{}': progress {}", self.id, p);

                let start = direction.start_progress();
                if (p - start).abs() > self.epsilon {
                    self.departed = true;
                }
                if !may_complete {
                    return self.frame;
                }
                if p >= 1.0 - self.epsilon && (self.departed || start < 1.0) {
                    self.complete(direction, 1.0);
                    return None;
                }
                if p <= self.epsilon && (self.departed || start > 0.0) {
                    self.complete(direction, 0.0);
                    return None;
                }
                self.frame
            }
            TransitionState::Idle | TransitionState::SourceHidden => {
                log::trace!(
                    "hero '{}': progress {} ignored while {}",
                    self.id,
                    p,
                    self.state.name()
                );
                None
            }
        }
    }

    fn complete(&mut self, direction: Direction, end: f32) {
        self.state = if end >= 1.0 {
            TransitionState::SourceHidden
        } else {
            TransitionState::Idle
        };
        self.frame = None;
        self.departed = false;
        log::debug!(
            "hero '{}': {:?} transition settled at {} ({})",
            self.id,
            direction,
            end,
            self.state.name()
        );
        self.record(HeroEvent::Completed {
            hero: self.id.clone(),
            seq: self.seq,
            direction,
            end,
        });
    }

    /// Snap a running overlay to the nearer end (0 or 1) and complete there,
    /// even if progress never left its start value. Returns `false` unless
    /// the transition was animating.
    pub fn finish(&mut self, end: f32) -> bool {
        let TransitionState::Animating { direction, .. } = self.state else {
            return false;
        };
        let end = if end >= 0.5 { 1.0 } else { 0.0 };
        self.complete(direction, end);
        true
    }

    /// Drop a running transition and snap back to where it started.
    /// Returns `false` if nothing was running.
    pub fn cancel(&mut self) -> bool {
        let Some(direction) = self.state.direction() else {
            return false;
        };
        self.state = match direction {
            Direction::Forward => TransitionState::Idle,
            Direction::Reverse => TransitionState::SourceHidden,
        };
        self.frame = None;
        self.departed = false;
        log::debug!("hero '{}': {:?} transition cancelled", self.id, direction);
        self.record(HeroEvent::Cancelled {
            hero: self.id.clone(),
            seq: self.seq,
            direction,
        });
        true
    }

    /// Back to `Idle` from any state. Measured rects are kept.
    pub fn reset(&mut self) {
        if self.state.is_running() {
            self.cancel();
        }
        self.state = TransitionState::Idle;
        self.frame = None;
        self.departed = false;
    }

    /// Take the events recorded since the last drain.
    ///
    /// Direct users must drain periodically; once the queue holds the event
    /// cap, further events are dropped. The engine drains after every call.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, HeroEvent> {
        self.events.drain(..)
    }
}
