//! herokit core (engine-agnostic)
//!
//! Math and bookkeeping for shared-element ("hero") transitions. The host UI
//! toolkit measures the source and destination rects, feeds progress from its
//! gesture recognisers or timers, and applies the overlay frames returned here.
//!
//! Layers, bottom-up:
//! - `interp`: scalar/rect blending and piecewise-linear range mapping.
//! - `tween`: rect + corner radius tween between two measured rects.
//! - `transition`: per-hero visibility state machine.
//! - `animator` / `gesture`: timed progress and drag-to-progress helpers.
//! - `engine`: explicit context owning one transition per hero id.

pub mod animator;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod ids;
pub mod inputs;
pub mod interp;
pub mod outputs;
pub mod transition;
pub mod tween;

// Re-exports for consumers (host adapters)
pub use animator::{Easing, ProgressAnimator};
pub use config::Config;
pub use engine::HeroEngine;
pub use error::HeroError;
pub use geometry::{Point, Rect, Size};
pub use gesture::{drag_progress, release_target, DragConfig};
pub use ids::{HeroId, TransitionSeq};
pub use inputs::{HeroCommand, Inputs};
pub use interp::range::{interpolate, try_interpolate, RangeMap};
pub use outputs::{HeroEvent, OverlayFrame, Outputs};
pub use transition::{Direction, HeroTransition, StartOutcome, TransitionState, Visibility};
pub use tween::{tween, tween_with_radius, CornerRadii, RectTween, TweenFrame};
