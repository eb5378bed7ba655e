// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! "Nice" numbers: 1, 2 or 5 times a power of ten.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Snaps `value` to a human-friendly magnitude.
///
/// With `round`, the leading fraction is rounded to 1, 2, 5 or 10 at the thresholds 1.5, 3 and 7.
/// Without it, fractions up to 1 give 1, up to 2 give 2, and everything above gives 5. Values
/// larger than 5 times the power of ten are never bumped to 10 in that mode.
///
/// `value` is expected to be positive. Non-positive or non-finite inputs give non-finite output.
#[must_use]
pub fn nice_number(value: f64, round: bool) -> f64 {
    let exponent = value.log10().floor();
    let magnitude = pow10(exponent);
    let fraction = value / magnitude;

    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else {
        5.0
    };

    nice_fraction * magnitude
}

/// `10^exponent` for an integral `exponent`.
pub(crate) fn pow10(exponent: f64) -> f64 {
    if !exponent.is_finite() {
        return if exponent > 0.0 { f64::INFINITY } else { 0.0 };
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "exponents of finite f64 values fit comfortably in i32"
    )]
    let exponent = exponent as i32;
    10.0_f64.powi(exponent)
}

/// Prime factors of `n` in ascending order, with repetition. Empty for `n < 2`.
#[must_use]
pub fn prime_factors(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    let mut candidate = 2;
    while candidate * candidate <= n {
        while n % candidate == 0 {
            factors.push(candidate);
            n /= candidate;
        }
        candidate += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}
