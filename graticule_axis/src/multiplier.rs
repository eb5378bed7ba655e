// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-step tick generation.
//!
//! Ticks are emitted every `multiplier` model units, starting from a value aligned to the initial
//! first bound so gridlines stay put while panning. The step adapts to the zoom factor according
//! to a [`MultiplierUpdate`] policy.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::approx::{approx_equal, approx_equal_eps};
use crate::axis::Axis;
use crate::generator::AxisValuesGenerator;
use crate::nice::nice_number;
use crate::time::{add_months, months_between};

/// Default upper bound on the number of steps walked per generation.
pub const DEFAULT_MAX_TICKS: usize = 10_000;

/// Relative tolerance used when comparing tick values with window bounds.
const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// How the step follows the zoom factor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MultiplierUpdate {
    /// Divide the step by the largest power of two not above the zoom factor. Ticks only appear
    /// or disappear in whole halvings, so existing gridlines never move.
    #[default]
    Halve,
    /// Recompute the step from the number of steps that fit the zoomed length, snapped to a nice
    /// number.
    Nice,
}

impl MultiplierUpdate {
    /// Returns the step to use for `axis`, given the unzoomed step `multiplier`.
    #[must_use]
    pub fn apply(self, multiplier: f64, axis: &Axis) -> f64 {
        match self {
            Self::Halve => {
                const ROUND_DECIMALS: f64 = 1e12;
                let zoom_log =
                    ((axis.zoom_factor().log2() * ROUND_DECIMALS).round() / ROUND_DECIMALS).floor();
                if !zoom_log.is_finite() {
                    return multiplier;
                }
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "log2 of a finite f64 lies within +-1075"
                )]
                let halvings = zoom_log as i32;
                multiplier / 2.0_f64.powi(halvings)
            }
            Self::Nice => {
                let original_dividers = axis.length() / multiplier;
                let dividers = (original_dividers * axis.zoom_factor()).floor();
                nice_number(axis.length() / dividers, true)
            }
        }
    }
}

/// How consecutive ticks are derived from the step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Stepping {
    /// `scalar + multiplier`.
    Linear,
    /// Whole multiples of a unit of `unit` model units. Fractional steps are truncated.
    Units(f64),
    /// Whole multiples of a calendar unit spanning this many months, on seconds since the epoch.
    Months(u32),
}

/// Shared stepping state for every multiplier-based generator.
#[derive(Clone, Debug)]
pub(crate) struct Stepper {
    pub(crate) multiplier: f64,
    last_valid_multiplier: Option<f64>,
    update: MultiplierUpdate,
    max_ticks: usize,
    stepping: Stepping,
}

impl Stepper {
    pub(crate) fn new(multiplier: f64, update: MultiplierUpdate, stepping: Stepping) -> Self {
        Self {
            multiplier,
            last_valid_multiplier: None,
            update,
            max_ticks: DEFAULT_MAX_TICKS,
            stepping,
        }
    }

    pub(crate) fn set_max_ticks(&mut self, max_ticks: usize) {
        self.max_ticks = max_ticks;
    }

    pub(crate) fn generate(&mut self, axis: &Axis) -> Vec<f64> {
        let multiplier = self.update.apply(self.multiplier, axis);
        self.generate_with(axis, multiplier, true)
    }

    fn model_start(&self, axis: &Axis, multiplier: f64) -> f64 {
        match self.stepping {
            Stepping::Linear => {
                ((axis.first_visible() - axis.first_init()) / multiplier).floor() * multiplier
                    + axis.first_init()
            }
            Stepping::Units(unit) => {
                let whole = multiplier.trunc();
                let units = (axis.first_visible() - axis.first_init()) / unit;
                axis.first_init() + (units / multiplier).trunc() * whole * unit
            }
            Stepping::Months(months) => {
                let Some(elapsed) = months_between(axis.first_init(), axis.first_visible()) else {
                    return f64::NAN;
                };
                let units = (elapsed / i64::from(months)) as f64;
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "calendar steps are small whole numbers"
                )]
                let (steps, whole) = ((units / multiplier).trunc() as i64, multiplier.trunc() as i64);
                let offset = steps.saturating_mul(whole).saturating_mul(i64::from(months));
                add_months(axis.first_init(), offset).unwrap_or(f64::NAN)
            }
        }
    }

    fn increment(&self, scalar: f64, multiplier: f64) -> f64 {
        match self.stepping {
            Stepping::Linear => scalar + multiplier,
            Stepping::Units(unit) => scalar + multiplier.trunc() * unit,
            Stepping::Months(months) => {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "calendar steps are small whole numbers"
                )]
                let whole = multiplier.trunc() as i64;
                // A step that cannot be taken reports no progress.
                add_months(scalar, whole.saturating_mul(i64::from(months))).unwrap_or(scalar)
            }
        }
    }

    fn generate_with(&mut self, axis: &Axis, multiplier: f64, allow_fallback: bool) -> Vec<f64> {
        let first_visible = axis.first_visible();
        let last_visible = axis.last_visible();
        let slack = (multiplier * BOUNDARY_TOLERANCE).abs();
        let at_init_zoom = approx_equal_eps(axis.zoom_factor(), 1.0, BOUNDARY_TOLERANCE);
        let near = |a: f64, b: f64| approx_equal(a, b) || approx_equal_eps(a, b, slack);

        let mut values = Vec::new();
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return self.fall_back(axis, multiplier, allow_fallback, values);
        }

        let mut scalar = self.model_start(axis, multiplier);
        if !scalar.is_finite() {
            return self.fall_back(axis, multiplier, allow_fallback, values);
        }
        let step = self.increment(scalar, multiplier) - scalar;
        if step.is_nan() || step <= 0.0 || approx_equal(scalar + step, scalar) {
            return self.fall_back(axis, multiplier, allow_fallback, values);
        }
        let projected = ((last_visible - scalar) / step).floor() + 1.0;
        #[allow(clippy::cast_precision_loss, reason = "tick caps are far below 2^52")]
        let cap = self.max_ticks as f64;
        if !projected.is_finite() || projected > cap {
            tracing::debug!(
                multiplier,
                projected,
                max_ticks = self.max_ticks,
                "tick step would exceed the cap"
            );
            return self.fall_back(axis, multiplier, allow_fallback, values);
        }

        // Accumulated rounding can add one step past the projection.
        let step_limit = self.max_ticks.saturating_add(1);
        let mut steps = 0;
        while scalar <= last_visible || near(scalar, last_visible) {
            let after_first = (at_init_zoom && near(scalar, axis.first_init()))
                || scalar >= first_visible
                || near(scalar, first_visible);
            let before_last = (at_init_zoom && near(scalar, axis.last_init()))
                || scalar <= last_visible
                || near(scalar, last_visible);
            if after_first && before_last {
                values.push(scalar);
            }

            let next = self.increment(scalar, multiplier);
            if approx_equal(next, scalar) || next <= scalar {
                return self.fall_back(axis, multiplier, allow_fallback, values);
            }
            self.last_valid_multiplier = Some(multiplier);

            steps += 1;
            if steps > step_limit {
                return self.fall_back(axis, multiplier, allow_fallback, Vec::new());
            }
            scalar = next;
        }
        values
    }

    fn fall_back(
        &mut self,
        axis: &Axis,
        multiplier: f64,
        allow_fallback: bool,
        values: Vec<f64>,
    ) -> Vec<f64> {
        let fallback = self
            .last_valid_multiplier
            .filter(|last| allow_fallback && *last != multiplier);
        match fallback {
            Some(last) => {
                tracing::debug!(
                    multiplier,
                    fallback = last,
                    "tick step collapsed, reusing last valid step"
                );
                let first_visible = axis.first_visible();
                let last_visible = axis.last_visible();
                let mut values = self.generate_with(axis, last, false);
                values.retain(|v| *v >= first_visible && *v <= last_visible);
                values
            }
            None if allow_fallback => {
                tracing::debug!(multiplier, "tick step collapsed without a fallback");
                Vec::new()
            }
            None => values,
        }
    }
}

/// Emits a tick every `multiplier` model units.
#[derive(Clone, Debug)]
pub struct MultiplierGenerator {
    stepper: Stepper,
}

impl MultiplierGenerator {
    /// Creates a generator stepping by `multiplier` at zoom factor 1, halving on zoom.
    #[must_use]
    pub fn new(multiplier: f64) -> Self {
        Self {
            stepper: Stepper::new(multiplier, MultiplierUpdate::Halve, Stepping::Linear),
        }
    }

    /// Sets the zoom policy.
    #[must_use]
    pub fn with_update(mut self, update: MultiplierUpdate) -> Self {
        self.stepper.update = update;
        self
    }

    /// Caps the number of steps walked per generation.
    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.stepper.set_max_ticks(max_ticks);
        self
    }

    /// The unzoomed step.
    pub fn multiplier(&self) -> f64 {
        self.stepper.multiplier
    }
}

impl AxisValuesGenerator for MultiplierGenerator {
    fn generate(&mut self, axis: &Axis) -> Vec<f64> {
        self.stepper.generate(axis)
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;

    fn assert_values(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn steps_through_the_initial_range() {
        let axis = Axis::x(0.0, 50.0, 0.0, 300.0).unwrap();
        let mut generator = MultiplierGenerator::new(10.0);
        assert_values(
            &generator.generate(&axis),
            &[0.0, 10.0, 20.0, 30.0, 40.0, 50.0],
        );
    }

    #[test]
    fn halves_when_zoomed() {
        let mut axis = Axis::x(0.0, 100.0, 0.0, 300.0).unwrap();
        axis.zoom(2.0, 1.0, 0.0, 0.0, false);
        let mut generator = MultiplierGenerator::new(20.0);
        // Visible window is 0..50, step 10.
        assert_values(
            &generator.generate(&axis),
            &[0.0, 10.0, 20.0, 30.0, 40.0, 50.0],
        );

        // Zoom 3 still rounds down to one halving.
        axis.zoom(1.5, 1.0, 0.0, 0.0, false);
        let values = generator.generate(&axis);
        assert!(values.windows(2).all(|w| (w[1] - w[0] - 10.0).abs() < 1e-9), "{values:?}");
    }

    #[test]
    fn values_stay_aligned_while_panning() {
        let mut axis = Axis::x(0.0, 100.0, 0.0, 300.0).unwrap();
        axis.zoom(2.0, 1.0, 0.0, 0.0, false);
        axis.pan(-45.0, 0.0, false);
        let mut generator = MultiplierGenerator::new(20.0);
        let values = generator.generate(&axis);
        assert!(!values.is_empty(), "window is not empty");
        for v in &values {
            assert!((v / 10.0 - (v / 10.0).round()).abs() < 1e-9, "{v} is aligned");
            assert!(*v >= axis.first_visible() && *v <= axis.last_visible(), "{v} visible");
        }
    }

    #[test]
    fn nice_update_snaps_step() {
        let mut axis = Axis::x(0.0, 100.0, 0.0, 300.0).unwrap();
        axis.zoom(3.0, 1.0, 0.0, 0.0, false);
        let mut generator = MultiplierGenerator::new(10.0).with_update(MultiplierUpdate::Nice);
        let values = generator.generate(&axis);
        // 30 dividers over 100 gives 3.33, snapped to 5.
        assert_values(&values[..3], &[0.0, 5.0, 10.0]);
    }

    #[test]
    fn extreme_zoom_terminates() {
        let mut axis = Axis::x(0.0, 100.0, 0.0, 300.0).unwrap();
        axis.zoom(1e15, 1.0, 150.0, 0.0, false);
        let mut generator = MultiplierGenerator::new(10.0);
        let values = generator.generate(&axis);
        assert!(values.len() < DEFAULT_MAX_TICKS, "bounded: {}", values.len());
        for v in &values {
            assert!(v.is_finite(), "finite tick");
        }

        // A step that cannot make progress at this magnitude falls back to nothing.
        let far = Axis::x(1e17, 1e17 + 1e4, 0.0, 300.0).unwrap();
        let mut tiny = MultiplierGenerator::new(1e-3);
        assert!(tiny.generate(&far).is_empty(), "collapsed step yields no ticks");
    }

    #[test]
    fn collapsing_step_reuses_last_valid_multiplier() {
        let mut axis = Axis::x(1e6, 1e6 + 1.0, 0.0, 300.0).unwrap();
        let mut generator = MultiplierGenerator::new(0.25);
        assert_eq!(generator.generate(&axis).len(), 5, "initial ticks");
        // Zoom far enough that the halved step falls below the float resolution near 1e6.
        axis.zoom(1e12, 1.0, 150.0, 0.0, false);
        let values = generator.generate(&axis);
        let (lo, hi) = (axis.first_visible(), axis.last_visible());
        assert!(values.iter().all(|v| *v >= lo && *v <= hi), "{values:?} in {lo}..{hi}");
    }

    #[test]
    fn step_cap_never_truncates_the_window() {
        let axis = Axis::x(0.0, 1.0, 0.0, 300.0).unwrap();

        let mut too_fine = MultiplierGenerator::new(1e-5);
        assert!(too_fine.generate(&axis).is_empty(), "over the default cap");

        let mut capped = MultiplierGenerator::new(1e-3).with_max_ticks(100);
        assert!(capped.generate(&axis).is_empty(), "over an explicit cap");

        let mut fits = MultiplierGenerator::new(1e-3).with_max_ticks(2_000);
        let values: Vec<f64> = fits.generate(&axis);
        assert_eq!(values.len(), 1_001, "every step in 0..=1");
        assert!(values[0].abs() < 1e-9, "starts at the window start");
        let last = values[values.len() - 1];
        assert!((last - 1.0).abs() < 1e-6, "reaches the window end: {last}");
    }
}
