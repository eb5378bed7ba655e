// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tolerant float comparison.

/// The tolerance used by [`approx_equal`].
///
/// This is the machine epsilon of `f64`. It is absolute, so it only treats values as equal when
/// they are within one ulp of `1.0` of each other.
pub const EPSILON: f64 = f64::EPSILON;

/// Returns `true` if `a` and `b` differ by less than [`EPSILON`].
#[must_use]
pub fn approx_equal(a: f64, b: f64) -> bool {
    approx_equal_eps(a, b, EPSILON)
}

/// Returns `true` if `a` and `b` differ by less than `epsilon`.
#[must_use]
pub fn approx_equal_eps(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_one_epsilon() {
        assert!(approx_equal(1.0, 1.0 + EPSILON / 2.0), "half an ulp apart");
        assert!(!approx_equal(1.0, 1.0 + 2.0 * EPSILON), "two ulps apart");
        assert!(approx_equal(0.1 + 0.2, 0.3), "classic rounding noise");
    }

    #[test]
    fn custom_tolerance() {
        assert!(approx_equal_eps(10.0, 10.05, 0.1), "inside tolerance");
        assert!(!approx_equal_eps(10.0, 10.2, 0.1), "outside tolerance");
    }
}
