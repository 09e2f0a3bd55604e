//! Engine: owns one transition per hero id and steps them once per frame.
//!
//! The engine is the explicit context object hosts pass to their rendering
//! and gesture layers. It is single-writer: every mutating method takes
//! `&mut self`, and transitions for different ids never share state.
//!
//! Methods:
//! - register / unregister / transition
//! - measure_* (layout pass), start / start_reverse (tap), drag / release
//!   (gesture), set_progress / animate_to (timer), cancel
//! - update(dt, inputs): apply commands → advance animators → collect frames

use hashbrown::HashMap;

use crate::animator::{Easing, ProgressAnimator};
use crate::config::Config;
use crate::error::HeroError;
use crate::geometry::Rect;
use crate::gesture::{drag_progress, release_target};
use crate::ids::HeroId;
use crate::inputs::{HeroCommand, Inputs};
use crate::outputs::{HeroEvent, OverlayFrame, Outputs};
use crate::transition::{HeroTransition, StartOutcome, TransitionState};
use crate::tween::{CornerRadii, TweenFrame};

/// Transition plus the engine-side driver state for one hero.
#[derive(Debug)]
struct Slot {
    transition: HeroTransition,
    animator: Option<ProgressAnimator>,
    /// Last frame reported through `Outputs`, to skip unchanged frames.
    last_emitted: Option<TweenFrame>,
}

#[derive(Debug)]
pub struct HeroEngine {
    cfg: Config,
    heroes: HashMap<HeroId, Slot>,
    /// Events recorded since the last `update`, in occurrence order.
    pending: Vec<HeroEvent>,
    outputs: Outputs,
}

fn unknown(hero: &HeroId) -> HeroError {
    HeroError::UnknownHero { hero: hero.clone() }
}

impl Default for HeroEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl HeroEngine {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            heroes: HashMap::new(),
            pending: Vec::new(),
            outputs: Outputs::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Add a hero context, or update the radii of an existing one.
    pub fn register(&mut self, hero: impl Into<HeroId>, radii: CornerRadii) -> &mut HeroTransition {
        let hero = hero.into();
        let epsilon = self.cfg.progress_epsilon;
        let event_cap = self.cfg.max_events_per_tick;
        let slot = self.heroes.entry(hero.clone()).or_insert_with(|| {
            log::debug!("register hero '{}'", hero);
            Slot {
                transition: HeroTransition::new(hero.clone(), radii)
                    .with_epsilon(epsilon)
                    .with_event_cap(event_cap),
                animator: None,
                last_emitted: None,
            }
        });
        slot.transition.set_radii(radii);
        &mut slot.transition
    }

    /// Remove a hero context; a running transition is reported as cancelled.
    pub fn unregister(&mut self, hero: &HeroId) -> Option<HeroTransition> {
        let mut slot = self.heroes.remove(hero)?;
        slot.transition.cancel();
        self.pending.extend(slot.transition.drain_events());
        Some(slot.transition)
    }

    pub fn transition(&self, hero: &HeroId) -> Option<&HeroTransition> {
        self.heroes.get(hero).map(|s| &s.transition)
    }

    pub fn ids(&self) -> impl Iterator<Item = &HeroId> {
        self.heroes.keys()
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    /// Whether an engine animator is currently driving `hero`.
    pub fn is_animating(&self, hero: &HeroId) -> bool {
        self.heroes
            .get(hero)
            .is_some_and(|s| s.animator.is_some())
    }

    /// Run `op` against a hero's slot and queue whatever events it produced.
    fn with_slot<R>(
        &mut self,
        hero: &HeroId,
        op: impl FnOnce(&mut Slot, &Config) -> Result<R, HeroError>,
    ) -> Result<R, HeroError> {
        let slot = self.heroes.get_mut(hero).ok_or_else(|| unknown(hero))?;
        let result = op(slot, &self.cfg);
        self.pending.extend(slot.transition.drain_events());
        result
    }

    pub fn measure_source(&mut self, hero: &HeroId, rect: Rect) -> Result<Option<TweenFrame>, HeroError> {
        self.with_slot(hero, |slot, _| Ok(slot.transition.measure_source(rect)))
    }

    pub fn measure_destination(
        &mut self,
        hero: &HeroId,
        rect: Rect,
    ) -> Result<Option<TweenFrame>, HeroError> {
        self.with_slot(hero, |slot, _| Ok(slot.transition.measure_destination(rect)))
    }

    pub fn invalidate_destination(&mut self, hero: &HeroId) -> Result<(), HeroError> {
        self.with_slot(hero, |slot, _| {
            slot.transition.invalidate_destination();
            Ok(())
        })
    }

    pub fn start(&mut self, hero: &HeroId) -> Result<StartOutcome, HeroError> {
        self.with_slot(hero, |slot, _| {
            let outcome = slot.transition.start()?;
            slot.animator = None;
            Ok(outcome)
        })
    }

    pub fn start_reverse(&mut self, hero: &HeroId) -> Result<StartOutcome, HeroError> {
        self.with_slot(hero, |slot, _| {
            let outcome = slot.transition.start_reverse()?;
            slot.animator = None;
            Ok(outcome)
        })
    }

    /// Host-driven progress. Takes over from any engine animator.
    pub fn set_progress(&mut self, hero: &HeroId, progress: f32) -> Result<Option<TweenFrame>, HeroError> {
        self.with_slot(hero, |slot, _| {
            slot.animator = None;
            Ok(slot.transition.set_progress(progress))
        })
    }

    /// Dismissal drag in flight. Never completes the transition.
    pub fn drag(&mut self, hero: &HeroId, translation: f32) -> Result<Option<TweenFrame>, HeroError> {
        self.with_slot(hero, |slot, cfg| {
            slot.animator = None;
            Ok(slot.transition.scrub(drag_progress(translation, &cfg.drag)))
        })
    }

    /// Drag ended: animate to the end chosen by `release_target` over
    /// `settle_duration_s`. Returns that end.
    pub fn release(&mut self, hero: &HeroId, velocity: f32) -> Result<f32, HeroError> {
        self.with_slot(hero, |slot, cfg| {
            let Some(progress) = slot.transition.state().progress() else {
                return Err(HeroError::InvalidState {
                    hero: hero.clone(),
                    state: slot.transition.state().name().to_string(),
                    action: "release".to_string(),
                });
            };
            let target = release_target(progress, velocity, &cfg.drag);
            slot.animator = Some(ProgressAnimator::new(
                progress,
                target,
                cfg.settle_duration_s,
                cfg.default_easing,
            ));
            Ok(target)
        })
    }

    /// Let the engine drive progress to `target` over `duration_s`.
    pub fn animate_to(
        &mut self,
        hero: &HeroId,
        target: f32,
        duration_s: f32,
        easing: Option<Easing>,
    ) -> Result<(), HeroError> {
        self.with_slot(hero, |slot, cfg| {
            let Some(progress) = slot.transition.state().progress() else {
                return Err(HeroError::InvalidState {
                    hero: hero.clone(),
                    state: slot.transition.state().name().to_string(),
                    action: "animate".to_string(),
                });
            };
            slot.animator = Some(ProgressAnimator::new(
                progress,
                target.clamp(0.0, 1.0),
                duration_s,
                easing.unwrap_or(cfg.default_easing),
            ));
            Ok(())
        })
    }

    pub fn cancel(&mut self, hero: &HeroId) -> Result<bool, HeroError> {
        self.with_slot(hero, |slot, _| {
            slot.animator = None;
            Ok(slot.transition.cancel())
        })
    }

    fn apply_command(&mut self, cmd: HeroCommand) -> Result<(), HeroError> {
        match cmd {
            HeroCommand::Register { hero, radii } => {
                self.register(hero, radii);
            }
            HeroCommand::Unregister { hero } => {
                self.unregister(&hero).ok_or_else(|| unknown(&hero))?;
            }
            HeroCommand::MeasureSource { hero, rect } => {
                self.measure_source(&hero, rect)?;
            }
            HeroCommand::MeasureDestination { hero, rect } => {
                self.measure_destination(&hero, rect)?;
            }
            HeroCommand::InvalidateDestination { hero } => self.invalidate_destination(&hero)?,
            HeroCommand::Start { hero } => {
                self.start(&hero)?;
            }
            HeroCommand::StartReverse { hero } => {
                self.start_reverse(&hero)?;
            }
            HeroCommand::SetProgress { hero, progress } => {
                self.set_progress(&hero, progress)?;
            }
            HeroCommand::Drag { hero, translation } => {
                self.drag(&hero, translation)?;
            }
            HeroCommand::Release { hero, velocity } => {
                self.release(&hero, velocity)?;
            }
            HeroCommand::AnimateTo {
                hero,
                target,
                duration_s,
                easing,
            } => self.animate_to(&hero, target, duration_s, easing)?,
            HeroCommand::Cancel { hero } => {
                self.cancel(&hero)?;
            }
        }
        Ok(())
    }

    /// Apply a batch of commands in order. Failures become `HeroEvent::Error`
    /// and do not stop the rest of the batch.
    pub fn apply(&mut self, inputs: Inputs) {
        for cmd in inputs.commands {
            if let Err(err) = self.apply_command(cmd) {
                log::warn!("hero command failed: {err}");
                self.pending.push(HeroEvent::Error {
                    message: err.to_string(),
                });
            }
        }
    }

    fn step_animators(&mut self, dt: f32) {
        let mut ids: Vec<HeroId> = self
            .heroes
            .iter()
            .filter(|(_, s)| s.animator.is_some())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();

        let eps = self.cfg.progress_epsilon;
        for id in ids {
            let Some(slot) = self.heroes.get_mut(&id) else {
                continue;
            };
            match slot.transition.state() {
                TransitionState::Animating { .. } => {}
                // Timed animations wait for a pending start to activate.
                TransitionState::Pending { .. } => continue,
                TransitionState::Idle | TransitionState::SourceHidden => {
                    slot.animator = None;
                    continue;
                }
            }
            let Some(animator) = slot.animator.as_mut() else {
                continue;
            };
            let value = animator.tick(dt);
            let finished = animator.is_finished();
            let target = animator.to;
            slot.transition.set_progress(value);
            if finished {
                slot.animator = None;
                if target <= eps || target >= 1.0 - eps {
                    slot.transition.finish(target);
                }
            }
            self.pending.extend(slot.transition.drain_events());
        }
    }

    fn flush_events(&mut self) {
        let max = self.cfg.max_events_per_tick;
        for event in self.pending.drain(..) {
            if self.outputs.events.len() < max {
                self.outputs.push_event(event);
            } else {
                self.outputs.dropped_events += 1;
            }
        }
        if self.outputs.dropped_events > 0 {
            log::warn!(
                "dropped {} hero events over the per-tick limit of {}",
                self.outputs.dropped_events,
                max
            );
        }
    }

    fn collect_frames(&mut self) {
        let mut frames = Vec::new();
        for (id, slot) in self.heroes.iter_mut() {
            let frame = slot.transition.frame();
            if frame == slot.last_emitted {
                continue;
            }
            slot.last_emitted = frame;
            if let Some(f) = frame {
                frames.push(OverlayFrame {
                    hero: id.clone(),
                    seq: slot.transition.seq(),
                    rect: f.rect,
                    corner_radius: f.corner_radius,
                    progress: f.progress,
                    visibility: slot.transition.visibility(),
                });
            }
        }
        frames.sort_by(|a, b| a.hero.cmp(&b.hero));
        for frame in frames {
            self.outputs.push_frame(frame);
        }
    }

    /// Step one frame: apply `inputs`, advance animators by `dt` seconds,
    /// and report overlay frames that changed plus all queued events.
    pub fn update(&mut self, dt: f32, inputs: Inputs) -> &Outputs {
        self.outputs.clear();
        self.apply(inputs);
        self.step_animators(dt);
        self.flush_events();
        self.collect_frames();
        &self.outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> HeroId {
        HeroId::from(s)
    }

    #[test]
    fn unknown_hero_is_an_error_directly_and_an_event_in_batches() {
        let mut eng = HeroEngine::default();
        assert!(matches!(
            eng.start(&id("ghost")),
            Err(HeroError::UnknownHero { .. })
        ));
        let out = eng.update(
            0.016,
            Inputs::from(vec![HeroCommand::Start { hero: id("ghost") }]),
        );
        assert!(matches!(out.events[0], HeroEvent::Error { .. }));
    }

    #[test]
    fn register_is_idempotent_and_updates_radii() {
        let mut eng = HeroEngine::default();
        eng.register("a", CornerRadii::uniform(4.0));
        eng.register("a", CornerRadii::uniform(8.0));
        assert_eq!(eng.len(), 1);
        assert_eq!(
            eng.transition(&id("a")).unwrap().radii(),
            CornerRadii::uniform(8.0)
        );
    }

    #[test]
    fn release_requires_running_transition() {
        let mut eng = HeroEngine::default();
        eng.register("a", CornerRadii::default());
        assert!(matches!(
            eng.release(&id("a"), 0.0),
            Err(HeroError::InvalidState { .. })
        ));
    }

    #[test]
    fn host_progress_finished_while_pending_completes_on_measure() {
        let mut eng = HeroEngine::default();
        let h = id("h");
        eng.register(h.clone(), CornerRadii::default());
        eng.measure_source(&h, Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        eng.start(&h).unwrap();
        assert_eq!(eng.set_progress(&h, 1.0).unwrap(), None);
        eng.update(0.0, Inputs::default());

        let out = eng.update(
            0.016,
            Inputs::from(vec![HeroCommand::MeasureDestination {
                hero: h.clone(),
                rect: Rect::new(0.0, 0.0, 100.0, 100.0),
            }]),
        );
        assert!(out.frames.is_empty());
        assert!(out
            .events
            .iter()
            .any(|e| matches!(e, HeroEvent::Completed { end, .. } if *end == 1.0)));
        assert_eq!(
            eng.transition(&h).unwrap().state(),
            TransitionState::SourceHidden
        );
    }

    #[test]
    fn animator_waits_while_a_lost_rect_is_remeasured() {
        let mut eng = HeroEngine::default();
        let h = id("h");
        eng.register(h.clone(), CornerRadii::default());
        eng.measure_source(&h, Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        eng.measure_destination(&h, Rect::new(0.0, 0.0, 100.0, 100.0))
            .unwrap();
        eng.start(&h).unwrap();
        eng.animate_to(&h, 1.0, 1.0, Some(Easing::Linear)).unwrap();
        let out = eng.update(0.5, Inputs::default());
        assert!((out.frames[0].progress - 0.5).abs() < 1e-5);

        eng.invalidate_destination(&h).unwrap();
        let out = eng.update(0.25, Inputs::default());
        assert!(out.frames.is_empty());
        assert!(matches!(
            eng.transition(&h).unwrap().state(),
            TransitionState::Pending { .. }
        ));

        eng.measure_destination(&h, Rect::new(0.0, 0.0, 100.0, 100.0))
            .unwrap();
        let out = eng.update(0.25, Inputs::default());
        assert!((out.frames[0].progress - 0.75).abs() < 1e-5);
    }

    #[test]
    fn event_cap_counts_drops() {
        let cfg = Config {
            max_events_per_tick: 1,
            ..Config::default()
        };
        let mut eng = HeroEngine::new(cfg);
        let out = eng.update(
            0.0,
            Inputs::from(vec![
                HeroCommand::Start { hero: id("x") },
                HeroCommand::Start { hero: id("y") },
            ]),
        );
        assert_eq!(out.events.len(), 1);
        assert_eq!(out.dropped_events, 1);
    }
}
