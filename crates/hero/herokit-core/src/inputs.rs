//! Input contracts for the hero engine.
//!
//! Host adapters collect layout measurements, taps, drags and timer requests
//! into an `Inputs` batch and hand it to `HeroEngine::update()` once per
//! frame. Commands are applied in the order they appear.

use serde::{Deserialize, Serialize};

use crate::animator::Easing;
use crate::geometry::Rect;
use crate::ids::HeroId;
use crate::tween::CornerRadii;

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    #[serde(default)]
    pub commands: Vec<HeroCommand>,
}

impl Inputs {
    pub fn push(&mut self, cmd: HeroCommand) -> &mut Self {
        self.commands.push(cmd);
        self
    }
}

impl From<Vec<HeroCommand>> for Inputs {
    fn from(commands: Vec<HeroCommand>) -> Self {
        Self { commands }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum HeroCommand {
    Register {
        hero: HeroId,
        #[serde(default)]
        radii: CornerRadii,
    },
    Unregister {
        hero: HeroId,
    },
    MeasureSource {
        hero: HeroId,
        rect: Rect,
    },
    MeasureDestination {
        hero: HeroId,
        rect: Rect,
    },
    InvalidateDestination {
        hero: HeroId,
    },
    Start {
        hero: HeroId,
    },
    StartReverse {
        hero: HeroId,
    },
    /// Progress from the host's own timer; may complete the transition.
    SetProgress {
        hero: HeroId,
        progress: f32,
    },
    /// Dismissal drag in flight; translation in points, positive toward the source.
    Drag {
        hero: HeroId,
        translation: f32,
    },
    /// Drag ended; settle at the end the gesture points to.
    Release {
        hero: HeroId,
        #[serde(default)]
        velocity: f32,
    },
    /// Let the engine's animator drive progress to `target`.
    AnimateTo {
        hero: HeroId,
        target: f32,
        duration_s: f32,
        #[serde(default)]
        easing: Option<Easing>,
    },
    Cancel {
        hero: HeroId,
    },
}

impl HeroCommand {
    pub fn hero(&self) -> &HeroId {
        match self {
            HeroCommand::Register { hero, .. }
            | HeroCommand::Unregister { hero }
            | HeroCommand::MeasureSource { hero, .. }
            | HeroCommand::MeasureDestination { hero, .. }
            | HeroCommand::InvalidateDestination { hero }
            | HeroCommand::Start { hero }
            | HeroCommand::StartReverse { hero }
            | HeroCommand::SetProgress { hero, .. }
            | HeroCommand::Drag { hero, .. }
            | HeroCommand::Release { hero, .. }
            | HeroCommand::AnimateTo { hero, .. }
            | HeroCommand::Cancel { hero } => hero,
        }
    }
}
