// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static axis values bounding a set of data points.
//!
//! A segment is the space between two consecutive axis values. The values start at a multiple
//! of `multiple` at or below the smallest point and end at a multiple at or above the largest,
//! and the segment width doubles until no more than `max_segment_count` segments remain.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::approx::approx_equal;
use crate::axis::Orientation;
use crate::error::{AxisError, AxisResult, ensure_finite};
use crate::multiplier::DEFAULT_MAX_TICKS;
use crate::value::{AxisValue, ChartPoint};

/// Segment constraints for [`values_for_points`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticValuesParams {
    /// Lower bound on the segment count. Wins over the maximum.
    pub min_segment_count: f64,
    /// Upper bound on the segment count.
    pub max_segment_count: f64,
    /// Base segment width.
    pub multiple: f64,
    /// Adds an extra segment at an end when the data lands exactly on it.
    pub add_padding_segment_if_edge: bool,
}

impl Default for StaticValuesParams {
    fn default() -> Self {
        Self {
            min_segment_count: 2.0,
            max_segment_count: 10.0,
            multiple: 10.0,
            add_padding_segment_if_edge: false,
        }
    }
}

impl StaticValuesParams {
    /// Sets the segment count range.
    #[must_use]
    pub fn with_segment_count(mut self, min: f64, max: f64) -> Self {
        self.min_segment_count = min;
        self.max_segment_count = max;
        self
    }

    /// Sets the base segment width.
    #[must_use]
    pub fn with_multiple(mut self, multiple: f64) -> Self {
        self.multiple = multiple;
        self
    }

    /// Enables edge padding segments.
    #[must_use]
    pub fn with_padding_segment_if_edge(mut self, pad: bool) -> Self {
        self.add_padding_segment_if_edge = pad;
        self
    }
}

/// Computes axis values covering every scalar in `scalars`.
///
/// Returns an empty list for empty input, and an error for a non-positive multiple or a
/// non-finite scalar.
pub fn values_for_points(
    scalars: impl IntoIterator<Item = f64>,
    params: &StaticValuesParams,
) -> AxisResult<Vec<f64>> {
    if params.multiple <= 0.0 || !params.multiple.is_finite() {
        return Err(AxisError::NonPositiveMultiple(params.multiple));
    }
    let mut bounds: Option<(f64, f64)> = None;
    for scalar in scalars {
        ensure_finite("point", scalar)?;
        bounds = Some(match bounds {
            Some((low, high)) => (low.min(scalar), high.max(scalar)),
            None => (scalar, scalar),
        });
    }
    let Some((first, last)) = bounds else {
        tracing::debug!("no points to generate static axis values from");
        return Ok(Vec::new());
    };
    Ok(values_for_range(first, last, params))
}

/// Computes axis values along one dimension of `points`, converting each scalar with `make`.
pub fn axis_values_for_points(
    points: &[ChartPoint],
    orientation: Orientation,
    params: &StaticValuesParams,
    make: impl Fn(f64) -> AxisValue,
) -> AxisResult<Vec<AxisValue>> {
    let scalars = points.iter().map(|point| match orientation {
        Orientation::X => point.x.scalar,
        Orientation::Y => point.y.scalar,
    });
    Ok(values_for_points(scalars, params)?.into_iter().map(make).collect())
}

fn values_for_range(first: f64, last: f64, params: &StaticValuesParams) -> Vec<f64> {
    let multiple = params.multiple;
    let last = if approx_equal(first, last) { last + 1.0 } else { last };

    let mut first_value = (first / multiple).floor() * multiple;
    let mut last_value = (last / multiple).ceil() * multiple;
    if params.add_padding_segment_if_edge {
        if approx_equal(first_value, first) {
            first_value -= multiple;
        }
        if approx_equal(last_value, last) {
            last_value += multiple;
        }
    }

    let distance = last_value - first_value;
    let mut segment_size = multiple;
    let mut segment_count = distance / segment_size;
    while segment_count > params.max_segment_count && segment_size.is_finite() {
        segment_size *= 2.0;
        segment_count = distance / segment_size;
    }
    let segment_count = segment_count
        .ceil()
        .max(params.min_segment_count.ceil())
        .clamp(0.0, DEFAULT_MAX_TICKS as f64);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "clamped to the tick cap above"
    )]
    let segment_count = segment_count as usize;

    (0..=segment_count)
        .map(|segment| first_value + segment as f64 * segment_size)
        .collect()
}
