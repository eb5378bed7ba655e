// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nice-range tick generation: bounds and step are rounded outward to nice numbers.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::Axis;
use crate::generator::{AxisValuesGenerator, required_length_for_dividers};
use crate::multiplier::{MultiplierUpdate, Stepper, Stepping};
use crate::nice::nice_number;

/// A nice `(min, max, step)` triple.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NiceRange {
    /// Lower bound, a multiple of `step` at or below the data minimum.
    pub min: f64,
    /// Upper bound, a multiple of `step` at or above the data maximum.
    pub max: f64,
    /// Tick step.
    pub step: f64,
}

/// Rounds `min..max` outwards so that roughly `dividers` nice steps cover it.
#[must_use]
pub fn nice_range(min: f64, max: f64, dividers: u32) -> NiceRange {
    let nice_length = nice_number(max - min, true);
    let step = nice_number(nice_length / (f64::from(dividers) - 1.0), true);
    NiceRange {
        min: (min / step).floor() * step,
        max: (max / step).ceil() * step,
        step,
    }
}

/// Picks the largest divider count whose labels fit the axis, then steps by the matching nice
/// step.
///
/// The axis bounds are replaced by the rounded range through [`AxisValuesGenerator::first`] and
/// [`AxisValuesGenerator::last`].
#[derive(Clone, Debug)]
pub struct NiceGenerator {
    min: f64,
    max: f64,
    preferred_dividers: u32,
    min_space: f64,
    max_text_size: f64,
    stepper: Stepper,
}

impl NiceGenerator {
    /// Creates a generator for `min..max` aiming for `preferred_dividers` ticks, with labels at
    /// most `max_text_size` wide and `min_space` apart.
    #[must_use]
    pub fn new(
        min: f64,
        max: f64,
        preferred_dividers: u32,
        min_space: f64,
        max_text_size: f64,
    ) -> Self {
        Self {
            min,
            max,
            preferred_dividers,
            min_space,
            max_text_size,
            stepper: Stepper::new(f64::MAX, MultiplierUpdate::Halve, Stepping::Linear),
        }
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
}

impl AxisValuesGenerator for NiceGenerator {
    fn generate(&mut self, axis: &Axis) -> Vec<f64> {
        self.stepper.generate(axis)
    }

    fn axis_initialized(&mut self, axis: &Axis) {
        let mut dividers = self.preferred_dividers;
        while dividers > 1 {
            if required_length_for_dividers(f64::from(dividers), self.min_space, self.max_text_size)
                < axis.screen_length()
            {
                let range = nice_range(self.min, self.max, dividers);
                self.min = range.min;
                self.max = range.max;
                self.stepper.multiplier = range.step;
                tracing::trace!(dividers, step = range.step, "nice range fits");
                return;
            }
            dividers -= 1;
        }
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
    use super::*;

    #[test]
    fn rounds_range_outwards() {
        let range = nice_range(3.2, 47.0, 6);
        assert_eq!(range.step, 10.0);
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 50.0);
    }

    #[test]
    fn fewer_dividers_on_short_axes() {
        let probe = Axis::x(3.2, 47.0, 0.0, 120.0).unwrap();
        let mut generator = NiceGenerator::new(3.2, 47.0, 10, 5.0, 20.0);
        generator.axis_initialized(&probe);
        // 5 + 25 * d < 120 first holds for d = 4, and nice(50 / 3) is 20.
        assert_eq!(generator.multiplier(), 20.0);
        assert_eq!(generator.first(), Some(0.0));
        assert_eq!(generator.last(), Some(60.0));

        let axis = Axis::x(0.0, 60.0, 0.0, 120.0).unwrap();
        let values = generator.generate(&axis);
        assert_eq!(values.len(), 4, "{values:?}");
    }

    #[test]
    fn keeps_raw_bounds_when_nothing_fits() {
        let probe = Axis::x(0.0, 1.0, 0.0, 10.0).unwrap();
        let mut generator = NiceGenerator::new(0.3, 0.7, 5, 5.0, 50.0);
        generator.axis_initialized(&probe);
        assert_eq!(generator.first(), Some(0.3));
        assert_eq!(generator.multiplier(), f64::MAX);
    }
}
