// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.
//!
//! Everything here describes caller misuse caught at construction time. Degenerate geometry that
//! shows up while the chart is live (a collapsing tick step, an overshooting gesture) is recovered
//! locally and never surfaces as an error.

use thiserror::Error;

/// Errors raised while constructing axes, generators, and controllers.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AxisError {
    /// The model range of an axis is empty.
    #[error("axis model range is empty: first and last are both {0}")]
    EmptyRange(f64),
    /// A bound or parameter that must be finite was not.
    #[error("{what} must be finite, got {value}")]
    NonFinite {
        /// Which value was rejected.
        what: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// An axis model was built from an empty list of axis values.
    #[error("at least one axis value is required")]
    NoAxisValues,
    /// A step multiple was zero or negative.
    #[error("multiple must be positive, got {0}")]
    NonPositiveMultiple(f64),
    /// A zoom range has its minimum above its maximum.
    #[error("invalid zoom range: min {min} is greater than max {max}")]
    InvalidZoomRange {
        /// Configured minimum scale.
        min: f64,
        /// Configured maximum scale.
        max: f64,
    },
}

/// Result alias for fallible constructors in this crate.
pub type AxisResult<T> = Result<T, AxisError>;

pub(crate) fn ensure_finite(what: &'static str, value: f64) -> AxisResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AxisError::NonFinite { what, value })
    }
}
