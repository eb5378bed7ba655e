// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generators over an explicit list of values.

use alloc::vec::Vec;

use graticule_text::TextMeasurer;
use kurbo::Size;

use crate::axis::{Axis, Orientation};
use crate::format::NumberFormat;
use crate::generator::AxisValuesGenerator;
use crate::label::{AxisLabel, LabelSettings};
use crate::value::AxisValue;

/// Emits the given values that lie inside the visible window.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedGenerator {
    values: Vec<f64>,
}

impl FixedGenerator {
    /// Creates a generator over `values`, which should be ascending.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Creates a generator over the scalars of `values`.
    #[must_use]
    pub fn from_axis_values(values: &[AxisValue]) -> Self {
        Self::new(values.iter().map(|value| value.scalar).collect())
    }

    /// All configured values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

fn visible_values(values: &[f64], axis: &Axis) -> Vec<f64> {
    let (low, high) = if axis.first_visible() > axis.last_visible() {
        (axis.last_model_value_in_bounds(), axis.first_visible())
    } else {
        (axis.first_visible(), axis.last_visible())
    };
    values
        .iter()
        .copied()
        .filter(|value| *value >= low && *value <= high)
        .collect()
}

impl AxisValuesGenerator for FixedGenerator {
    fn generate(&mut self, axis: &Axis) -> Vec<f64> {
        visible_values(&self.values, axis)
    }

    fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

/// Thins a fixed list so neighbouring labels keep `spacing` apart.
///
/// Values are assumed to be spread evenly over the screen length. Walking in order, a value is
/// kept once the previous kept label (plus spacing) has been passed. The last value always
/// replaces the last kept one so the end of the range stays labeled.
#[derive(Clone, Debug)]
pub struct FixedNonOverlappingGenerator {
    values: Vec<f64>,
    max_label_size: Size,
    orientation: Orientation,
    spacing: f64,
}

impl FixedNonOverlappingGenerator {
    /// Creates a generator whose widest (X) or tallest (Y) label is `max_label_size`.
    #[must_use]
    pub fn new(values: &[AxisValue], max_label_size: Size, orientation: Orientation) -> Self {
        Self {
            values: values.iter().map(|value| value.scalar).collect(),
            max_label_size,
            orientation,
            spacing: 4.0,
        }
    }

    /// Measures the default label of every value to find the maximum label size.
    #[must_use]
    pub fn measured(
        values: &[AxisValue],
        settings: &LabelSettings,
        format: &NumberFormat,
        measurer: &dyn TextMeasurer,
        orientation: Orientation,
    ) -> Self {
        let max_label_size = values
            .iter()
            .map(|value| {
                AxisLabel::new(value.label_text(format), settings.clone(), measurer).text_size()
            })
            .fold(Size::ZERO, |max, size| {
                Size::new(max.width.max(size.width), max.height.max(size.height))
            });
        Self::new(values, max_label_size, orientation)
    }

    /// Sets the gap kept between labels. Defaults to 4.
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    fn select(&self, screen_length: f64) -> Vec<f64> {
        let Some(&last) = self.values.last() else {
            return Vec::new();
        };
        let extent = match self.orientation {
            Orientation::X => self.max_label_size.width,
            Orientation::Y => self.max_label_size.height,
        };
        let space_per_tick = screen_length / self.values.len() as f64;

        let mut selected = Vec::new();
        let mut coord = 0.0;
        let mut label_end = 0.0;
        for &value in &self.values {
            coord += space_per_tick;
            if label_end <= coord {
                selected.push(value);
                label_end = coord + extent + self.spacing;
            }
        }
        if let Some(selected_last) = selected.last_mut() {
            *selected_last = last;
        }
        selected
    }
}

impl AxisValuesGenerator for FixedNonOverlappingGenerator {
    fn generate(&mut self, axis: &Axis) -> Vec<f64> {
        visible_values(&self.select(axis.screen_length()), axis)
    }

    fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }
}
