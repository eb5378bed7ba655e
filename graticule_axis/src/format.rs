// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting policy for tick labels.

use alloc::string::String;

/// Formats tick scalars as decimal text.
///
/// Fraction digits beyond `min_fraction_digits` are dropped when they are zero, so `2.50` prints
/// as `2.5` with the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    /// Digits always shown after the decimal point.
    pub min_fraction_digits: usize,
    /// Digits shown at most after the decimal point. The value is rounded to this precision.
    pub max_fraction_digits: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            min_fraction_digits: 0,
            max_fraction_digits: 2,
        }
    }
}

impl NumberFormat {
    /// Shows between `min` and `max` fraction digits.
    #[must_use]
    pub fn with_fraction_digits(mut self, min: usize, max: usize) -> Self {
        self.min_fraction_digits = min;
        self.max_fraction_digits = max.max(min);
        self
    }

    /// Formats `value`.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return alloc::format!("{value}");
        }
        let mut text = alloc::format!("{:.*}", self.max_fraction_digits, value);
        if let Some(dot) = text.find('.') {
            let keep = dot + 1 + self.min_fraction_digits;
            while text.len() > keep && text.ends_with('0') {
                text.pop();
            }
            if text.ends_with('.') {
                text.pop();
            }
        }
        if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
            text.remove(0);
        }
        text
    }
}
