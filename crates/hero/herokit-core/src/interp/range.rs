//! Piecewise-linear range mapping.
//!
//! A breakpoint table is a pair of parallel slices: `input` (non-decreasing)
//! and `output`. Values below the first input clamp to the first output,
//! values above the last input clamp to the last output, and values in
//! between are blended linearly inside the segment `input[i-1] < v <= input[i]`.
//!
//! `interpolate` never fails: a broken table logs a warning and yields the
//! first output breakpoint. `try_interpolate` and `RangeMap` report the
//! problem instead.

use serde::{Deserialize, Serialize};

use crate::error::HeroError;

/// Value returned for a table that cannot be sampled.
fn fallback(input: &[f32], output: &[f32]) -> f32 {
    output
        .first()
        .or_else(|| input.first())
        .copied()
        .unwrap_or(0.0)
}

/// Sample a table whose lengths are already known to match and be non-zero.
///
/// Exact breakpoint hits return the stored output; zero-width or inverted
/// segments (only reachable with an unsorted table) and segments with an
/// infinite end return the left output.
fn sample_unchecked(value: f32, input: &[f32], output: &[f32]) -> f32 {
    let last = input.len() - 1;
    if value.is_nan() || value <= input[0] {
        return output[0];
    }
    if value >= input[last] {
        return output[last];
    }
    // First index with input[i] >= value; input[0] < value so i >= 1.
    let i = input.partition_point(|x| *x < value).clamp(1, last);
    let (x1, x2) = (input[i - 1], input[i]);
    let (y1, y2) = (output[i - 1], output[i]);
    if value == x2 {
        return y2;
    }
    if !(x2 > x1) {
        log::debug!("degenerate segment {}..{} at x = {}", i - 1, i, x2);
        return y1;
    }
    // Widened so spans near f32::MAX do not overflow.
    let t = (f64::from(value) - f64::from(x1)) / (f64::from(x2) - f64::from(x1));
    if !t.is_finite() {
        log::debug!("unbounded segment {}..{}; holding left output", i - 1, i);
        return y1;
    }
    let y = f64::from(y1) + (f64::from(y2) - f64::from(y1)) * t.clamp(0.0, 1.0);
    if y.is_nan() {
        return y1;
    }
    y as f32
}

fn validate(input: &[f32], output: &[f32]) -> Result<(), HeroError> {
    if input.is_empty() || output.is_empty() {
        return Err(HeroError::invalid_table(
            input.len(),
            output.len(),
            "breakpoint table is empty",
        ));
    }
    if input.len() != output.len() {
        return Err(HeroError::invalid_table(
            input.len(),
            output.len(),
            "input and output lengths differ",
        ));
    }
    if input.iter().chain(output.iter()).any(|v| !v.is_finite()) {
        return Err(HeroError::invalid_table(
            input.len(),
            output.len(),
            "breakpoints must be finite",
        ));
    }
    if input.windows(2).any(|w| w[1] < w[0]) {
        return Err(HeroError::invalid_table(
            input.len(),
            output.len(),
            "input breakpoints must be non-decreasing",
        ));
    }
    Ok(())
}

/// Map `value` through the breakpoint table, falling back instead of failing.
///
/// Empty or mismatched tables return `output[0]` (or `input[0]` when there
/// are no outputs, or `0.0` when both are empty).
pub fn interpolate(value: f32, input: &[f32], output: &[f32]) -> f32 {
    if input.is_empty() || input.len() != output.len() {
        log::warn!(
            "interpolate: mismatched breakpoint table ({} inputs, {} outputs); using fallback",
            input.len(),
            output.len()
        );
        return fallback(input, output);
    }
    sample_unchecked(value, input, output)
}

/// Strict variant of [`interpolate`].
///
/// Rejects empty, mismatched, non-finite and unsorted tables, and a table
/// whose whole input span collapses to a single point.
pub fn try_interpolate(value: f32, input: &[f32], output: &[f32]) -> Result<f32, HeroError> {
    validate(input, output)?;
    let last = input.len() - 1;
    if last > 0 && input[0] == input[last] {
        return Err(HeroError::DegenerateSegment {
            index: last,
            at: input[last],
        });
    }
    Ok(sample_unchecked(value, input, output))
}

/// Owned, validated breakpoint table for curves sampled every frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RangeMapRaw", into = "RangeMapRaw")]
pub struct RangeMap {
    input: Vec<f32>,
    output: Vec<f32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct RangeMapRaw {
    input: Vec<f32>,
    output: Vec<f32>,
}

impl TryFrom<RangeMapRaw> for RangeMap {
    type Error = HeroError;

    fn try_from(raw: RangeMapRaw) -> Result<Self, Self::Error> {
        RangeMap::new(raw.input, raw.output)
    }
}

impl From<RangeMap> for RangeMapRaw {
    fn from(map: RangeMap) -> Self {
        RangeMapRaw {
            input: map.input,
            output: map.output,
        }
    }
}

impl RangeMap {
    pub fn new(input: Vec<f32>, output: Vec<f32>) -> Result<Self, HeroError> {
        validate(&input, &output)?;
        Ok(Self { input, output })
    }

    /// Two-point map `[in0, in1] -> [out0, out1]`.
    pub fn linear(in0: f32, in1: f32, out0: f32, out1: f32) -> Result<Self, HeroError> {
        Self::new(vec![in0, in1], vec![out0, out1])
    }

    #[inline]
    pub fn sample(&self, value: f32) -> f32 {
        sample_unchecked(value, &self.input, &self.output)
    }

    /// Like `sample`, but refuses a table whose inputs are all equal.
    pub fn try_sample(&self, value: f32) -> Result<f32, HeroError> {
        try_interpolate(value, &self.input, &self.output)
    }

    pub fn input(&self) -> &[f32] {
        &self.input
    }

    pub fn output(&self) -> &[f32] {
        &self.output
    }

    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }
}
