//! Interpolation helpers.
//!
//! `functions` holds the component-wise blends and the cubic-bezier timing
//! curve; `range` holds the piecewise-linear breakpoint mapping used for
//! non-linear, scroll- or progress-driven curves.

pub mod functions;
pub mod range;
