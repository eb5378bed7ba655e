// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tick generation interface.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::axis::Axis;

/// Produces the model values that get a tick on an axis.
///
/// Generators are stateful: they may adapt their step to the first axis they see
/// ([`AxisValuesGenerator::axis_initialized`]) and remember the last step that made progress.
pub trait AxisValuesGenerator {
    /// Returns the tick values for the current visible window of `axis`, in ascending order.
    fn generate(&mut self, axis: &Axis) -> Vec<f64>;

    /// Called once with a probe axis before layout, so the generator can size its step to the
    /// available screen length.
    fn axis_initialized(&mut self, _axis: &Axis) {}

    /// Overrides the model value of the first axis bound, e.g. after rounding it outwards.
    fn first(&self) -> Option<f64> {
        None
    }

    /// Overrides the model value of the last axis bound.
    fn last(&self) -> Option<f64> {
        None
    }
}

impl<G: AxisValuesGenerator + ?Sized> AxisValuesGenerator for Box<G> {
    fn generate(&mut self, axis: &Axis) -> Vec<f64> {
        (**self).generate(axis)
    }

    fn axis_initialized(&mut self, axis: &Axis) {
        (**self).axis_initialized(axis);
    }

    fn first(&self) -> Option<f64> {
        (**self).first()
    }

    fn last(&self) -> Option<f64> {
        (**self).last()
    }
}

/// Screen length needed to show `dividers` labels of `max_text_size` with `min_space` around
/// each.
pub(crate) fn required_length_for_dividers(dividers: f64, min_space: f64, max_text_size: f64) -> f64 {
    min_space + (max_text_size + min_space) * dividers
}
