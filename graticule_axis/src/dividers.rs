// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick generation for axes that must split their range into a whole number of equal parts.

use alloc::vec::Vec;

use graticule_text::{TextMeasurer, TextStyle};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::Axis;
use crate::format::NumberFormat;
use crate::generator::{AxisValuesGenerator, required_length_for_dividers};
use crate::multiplier::{MultiplierUpdate, Stepper, Stepping};
use crate::nice::{pow10, prime_factors};

const MAX_GROW_STEPS: u32 = 100;

/// Splits `min..max` into the largest number of equal divisions whose labels still fit.
///
/// With `nice`, the range is first rounded outwards to a power of ten one magnitude below its
/// span, then widened in small increments (up to a sixth of its length) looking for a span
/// with a better divisor.
#[derive(Clone, Debug)]
pub struct DividersGenerator {
    min: f64,
    max: f64,
    preferred_dividers: u32,
    nice: bool,
    min_space: f64,
    max_text_size: f64,
    stepper: Stepper,
}

impl DividersGenerator {
    /// Creates a generator with an explicit label extent.
    #[must_use]
    pub fn new(min: f64, max: f64, preferred_dividers: u32, nice: bool, max_text_size: f64) -> Self {
        Self {
            min,
            max,
            preferred_dividers,
            nice,
            min_space: 10.0,
            max_text_size,
            stepper: Stepper::new(f64::MAX, MultiplierUpdate::Halve, Stepping::Linear),
        }
    }

    /// Creates a generator whose label extent is measured from the formatted bounds.
    ///
    /// Room for every optional fraction digit of `format` is added on top.
    #[must_use]
    pub fn measured(
        min: f64,
        max: f64,
        preferred_dividers: u32,
        nice: bool,
        format: &NumberFormat,
        style: &TextStyle,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let width = |text: &str| measurer.size(text, style).0;
        let optional_digits = format
            .max_fraction_digits
            .saturating_sub(format.min_fraction_digits);
        let remaining = (0..optional_digits).map(|_| width("0")).sum::<f64>();
        let max_text_size = width(&format.format(min)).max(width(&format.format(max))) + remaining;
        Self::new(min, max, preferred_dividers, nice, max_text_size)
    }

    /// Sets the minimum space between labels.
    #[must_use]
    pub fn with_min_space(mut self, min_space: f64) -> Self {
        self.min_space = min_space;
        self
    }

    /// Sets the zoom policy.
    #[must_use]
    pub fn with_update(mut self, update: MultiplierUpdate) -> Self {
        self.stepper = Stepper::new(self.stepper.multiplier, update, Stepping::Linear);
        self
    }

    /// The current unzoomed step.
    pub fn multiplier(&self) -> f64 {
        self.stepper.multiplier
    }

    fn fits(&self, dividers: u64, axis: &Axis) -> bool {
        required_length_for_dividers(dividers as f64, self.min_space, self.max_text_size)
            < axis.screen_length()
    }

    /// Largest prefix product of the prime factors of `model_length` whose labels fit.
    fn find_fitting_factor(&self, axis: &Axis, model_length: u64) -> Option<u64> {
        let mut last_fitting = None;
        let mut product = 1_u64;
        for factor in prime_factors(model_length) {
            product = product.saturating_mul(factor);
            if self.fits(product, axis) {
                last_fitting = Some(product);
            } else {
                return last_fitting;
            }
        }
        last_fitting
    }

    fn nice_bounds(&mut self) {
        let span = pow10((self.max - self.min).log10().round() - 1.0);
        if span > 0.0 && span.is_finite() {
            self.min = (self.min / span).floor() * span;
            self.max = (self.max / span).ceil() * span;
        }
    }

    fn fitting_range_and_factor(&mut self, axis: &Axis) -> Option<(f64, f64, u64)> {
        self.nice_bounds();

        let grow_delta = pow10(self.min.abs().min(self.max.abs()).log10().round()).floor();
        let max_delta = (self.max - self.min) / 6.0;

        let mut best: Option<(f64, f64, u64)> = None;
        let mut delta = 0.0;
        let mut counter = 0;
        while delta < max_delta && counter < MAX_GROW_STEPS {
            let min = self.min - delta;
            let max = self.max + delta;
            if let Some(factor) = integral_span(max - min)
                .and_then(|span| self.find_fitting_factor(axis, span))
            {
                if best.is_none_or(|(_, _, best_factor)| factor > best_factor) {
                    best = Some((min, max, factor));
                }
            }
            delta += grow_delta;
            counter += 1;
        }
        best
    }

    fn default_multiplier(&mut self, axis: &Axis) {
        let max_dividers =
            ((axis.screen_length() + self.min_space) / (self.max_text_size + self.min_space)).floor();
        let dividers = f64::from(self.preferred_dividers).min(max_dividers);
        self.stepper.multiplier = axis.length() / dividers;
    }
}

/// Truncates a positive span to an integer, or `None` if it does not fit.
fn integral_span(span: f64) -> Option<u64> {
    if span.is_finite() && span >= 1.0 && span < 9.0e15 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "checked to be within the exact integer range of f64"
        )]
        Some(span as u64)
    } else {
        None
    }
}

impl AxisValuesGenerator for DividersGenerator {
    fn generate(&mut self, axis: &Axis) -> Vec<f64> {
        self.stepper.generate(axis)
    }

    fn axis_initialized(&mut self, axis: &Axis) {
        if self.nice {
            if let Some((min, max, factor)) = self.fitting_range_and_factor(axis) {
                self.min = min;
                self.max = max;
                self.stepper.multiplier = (max - min) / factor as f64;
                tracing::trace!(min, max, factor, "dividers fit");
                return;
            }
        }
        self.default_multiplier(axis);
    }

    fn first(&self) -> Option<f64> {
        Some(self.min)
    }

    fn last(&self) -> Option<f64> {
        Some(self.max)
    }
}

#[cfg(test)]
mod tests {
    use graticule_text::FixedAdvanceMeasurer;

    use super::*;

    #[test]
    fn picks_largest_fitting_prefix_product() {
        let axis = Axis::x(0.0, 100.0, 0.0, 300.0).unwrap();
        let mut generator = DividersGenerator::new(0.0, 100.0, 10, true, 20.0);
        generator.axis_initialized(&axis);
        // 100 = 2 * 2 * 5 * 5: 4 divisions fit (10 + 30 * 4 < 300), 20 do not.
        assert_eq!(generator.multiplier(), 25.0);
        let values = generator.generate(&axis);
        assert_eq!(values, [0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn widens_range_for_a_better_divisor() {
        let axis = Axis::x(10.0, 97.0, 0.0, 600.0).unwrap();
        let mut generator = DividersGenerator::new(10.0, 97.0, 10, true, 20.0);
        generator.axis_initialized(&axis);
        // Rounded to 10..100, grown by 10 per step up to a sixth of the span.
        let first = generator.first().unwrap();
        let last = generator.last().unwrap();
        assert!(first <= 10.0 && last >= 97.0, "{first}..{last}");
        let divisions = (last - first) / generator.multiplier();
        assert!((divisions - divisions.round()).abs() < 1e-9, "whole divisions");
        assert!(10.0 + 30.0 * divisions < 600.0, "{divisions} labels fit");
        // 10..100 splits into 18; 0..110 only into 10.
        assert_eq!(divisions.round(), 18.0);
    }

    #[test]
    fn default_uses_screen_capacity() {
        let axis = Axis::x(0.0, 100.0, 0.0, 300.0).unwrap();
        let mut generator = DividersGenerator::new(0.0, 100.0, 20, false, 20.0);
        generator.axis_initialized(&axis);
        // (300 + 10) / 30 = 10 dividers at most.
        assert_eq!(generator.multiplier(), 10.0);
    }

    #[test]
    fn measured_adds_room_for_fraction_digits() {
        let measurer = FixedAdvanceMeasurer::new(6.0, 10.0);
        let generator = DividersGenerator::measured(
            0.0,
            1000.0,
            5,
            false,
            &NumberFormat::default(),
            &TextStyle::default(),
            &measurer,
        );
        // "1000" plus two optional fraction digits.
        assert_eq!(generator.max_text_size, 36.0);
    }
}
