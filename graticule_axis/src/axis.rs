// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-dimensional model-to-screen mapping.
//!
//! An [`Axis`] maps model scalars to screen coordinates for a single dimension and carries the
//! zoom/pan state of that dimension. Horizontal and vertical axes share one data layout; the
//! [`Orientation`] tag selects the handful of geometry rules that differ between them (Y grows
//! downwards on screen while model values grow upwards).
//!
//! Three sets of screen bounds are tracked:
//! - `first_screen`/`last_screen`: where the first/last model values currently land. Zooming and
//!   panning move these, so they can lie far outside the visible window.
//! - `first_visible_screen`/`last_visible_screen`: the window the axis is drawn into.
//! - the `*_init` snapshots, taken at construction, which bound non-elastic zoom and pan.

use kurbo::Size;

use crate::approx::approx_equal;
use crate::error::{AxisError, AxisResult, ensure_finite};

/// Direction of an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Horizontal: screen coordinates grow with model values.
    X,
    /// Vertical: screen coordinates shrink as model values grow.
    Y,
}

/// Scale and translation derived from an axis' zoom/pan state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisTransform {
    /// Current zoom factor.
    pub scale: f64,
    /// Offset of the first screen location relative to its initial position.
    pub translation: f64,
}

/// A model-to-screen mapping for one chart dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    orientation: Orientation,
    first: f64,
    last: f64,
    first_screen: f64,
    last_screen: f64,
    first_visible_screen: f64,
    last_visible_screen: f64,
    padding_first_screen: f64,
    padding_last_screen: f64,
    fixed_padding_first_screen: Option<f64>,
    fixed_padding_last_screen: Option<f64>,
    first_init: f64,
    last_init: f64,
    first_screen_init: f64,
    last_screen_init: f64,
}

impl Axis {
    /// Creates an axis mapping `first..last` onto `first_screen..last_screen`.
    ///
    /// For [`Orientation::Y`], `first_screen` is the bottom edge (the larger screen coordinate).
    ///
    /// Returns an error if the model range is empty or any bound is not finite.
    pub fn new(
        orientation: Orientation,
        first: f64,
        last: f64,
        first_screen: f64,
        last_screen: f64,
    ) -> AxisResult<Self> {
        ensure_finite("first", first)?;
        ensure_finite("last", last)?;
        ensure_finite("first_screen", first_screen)?;
        ensure_finite("last_screen", last_screen)?;
        if first == last {
            return Err(AxisError::EmptyRange(first));
        }
        Ok(Self {
            orientation,
            first,
            last,
            first_screen,
            last_screen,
            first_visible_screen: first_screen,
            last_visible_screen: last_screen,
            padding_first_screen: 0.0,
            padding_last_screen: 0.0,
            fixed_padding_first_screen: None,
            fixed_padding_last_screen: None,
            first_init: first,
            last_init: last,
            first_screen_init: first_screen,
            last_screen_init: last_screen,
        })
    }

    /// Creates a horizontal axis.
    pub fn x(first: f64, last: f64, first_screen: f64, last_screen: f64) -> AxisResult<Self> {
        Self::new(Orientation::X, first, last, first_screen, last_screen)
    }

    /// Creates a vertical axis. `first_screen` is the bottom edge.
    pub fn y(first: f64, last: f64, first_screen: f64, last_screen: f64) -> AxisResult<Self> {
        Self::new(Orientation::Y, first, last, first_screen, last_screen)
    }

    /// Reserves screen space before the first and after the last model value.
    ///
    /// The initial model bounds are kept at the padded positions, so `first`/`last` are
    /// recomputed to the model values found at the unpadded screen edges.
    #[must_use]
    pub fn with_padding(mut self, padding_first_screen: f64, padding_last_screen: f64) -> Self {
        self.padding_first_screen = padding_first_screen;
        self.padding_last_screen = padding_last_screen;
        self.adjust_model_boundaries_for_padding();
        self
    }

    /// Overrides the padding used by the in-bounds checks, independent of layout padding.
    ///
    /// This keeps pan/zoom bounds stable when the layout padding is scaled with the zoom level.
    #[must_use]
    pub fn with_fixed_padding(mut self, first: Option<f64>, last: Option<f64>) -> Self {
        self.fixed_padding_first_screen = first;
        self.fixed_padding_last_screen = last;
        self
    }

    /// Rebuilds the axis on new screen bounds, keeping model bounds and padding.
    pub fn with_screen(&self, first_screen: f64, last_screen: f64) -> AxisResult<Self> {
        Ok(Self::new(
            self.orientation,
            self.first,
            self.last,
            first_screen,
            last_screen,
        )?
        .with_padding(self.padding_first_screen, self.padding_last_screen)
        .with_fixed_padding(
            self.fixed_padding_first_screen,
            self.fixed_padding_last_screen,
        ))
    }

    /// The orientation of this axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Model value at `first_screen`.
    pub fn first(&self) -> f64 {
        self.first
    }

    /// Model value at `last_screen`.
    pub fn last(&self) -> f64 {
        self.last
    }

    /// Model value of the first bound at construction time.
    pub fn first_init(&self) -> f64 {
        self.first_init
    }

    /// Model value of the last bound at construction time.
    pub fn last_init(&self) -> f64 {
        self.last_init
    }

    /// Screen location of `first`.
    pub fn first_screen(&self) -> f64 {
        self.first_screen
    }

    /// Screen location of `last`.
    pub fn last_screen(&self) -> f64 {
        self.last_screen
    }

    /// Initial screen location of `first`.
    pub fn first_screen_init(&self) -> f64 {
        self.first_screen_init
    }

    /// Initial screen location of `last`.
    pub fn last_screen_init(&self) -> f64 {
        self.last_screen_init
    }

    /// Start of the visible screen window.
    pub fn first_visible_screen(&self) -> f64 {
        self.first_visible_screen
    }

    /// End of the visible screen window.
    pub fn last_visible_screen(&self) -> f64 {
        self.last_visible_screen
    }

    /// Layout padding before the first value.
    pub fn padding_first_screen(&self) -> f64 {
        self.padding_first_screen
    }

    /// Layout padding after the last value.
    pub fn padding_last_screen(&self) -> f64 {
        self.padding_last_screen
    }

    /// Model value at the start of the visible window.
    pub fn first_visible(&self) -> f64 {
        self.scalar_for_screen_loc(self.first_visible_screen)
    }

    /// Model value at the end of the visible window.
    pub fn last_visible(&self) -> f64 {
        self.scalar_for_screen_loc(self.last_visible_screen)
    }

    /// Signed model span. Negative for axes running from a larger to a smaller value.
    pub fn length(&self) -> f64 {
        self.last - self.first
    }

    /// Signed screen span between `first_screen` and `last_screen`.
    pub fn screen_length(&self) -> f64 {
        match self.orientation {
            Orientation::X => self.last_screen - self.first_screen,
            Orientation::Y => self.first_screen - self.last_screen,
        }
    }

    /// Screen span at construction time.
    pub fn screen_length_init(&self) -> f64 {
        match self.orientation {
            Orientation::X => self.last_screen_init - self.first_screen_init,
            Orientation::Y => self.first_screen_init - self.last_screen_init,
        }
    }

    /// Model span of the visible window.
    pub fn visible_length(&self) -> f64 {
        self.last_visible() - self.first_visible()
    }

    /// Screen span of the visible window.
    pub fn visible_screen_length(&self) -> f64 {
        match self.orientation {
            Orientation::X => self.last_visible_screen - self.first_visible_screen,
            Orientation::Y => self.first_visible_screen - self.last_visible_screen,
        }
    }

    /// `|length / visible_length|`, or 1 when nothing is visible.
    pub fn zoom_factor(&self) -> f64 {
        let visible = self.visible_length();
        if visible == 0.0 {
            return 1.0;
        }
        (self.length() / visible).abs()
    }

    /// Screen units per model unit.
    pub fn screen_to_model_ratio(&self) -> f64 {
        self.screen_length() / self.length()
    }

    /// Model units per screen unit.
    pub fn model_to_screen_ratio(&self) -> f64 {
        self.length() / self.screen_length()
    }

    fn internal_screen_loc_for_scalar(&self, scalar: f64) -> f64 {
        (scalar - self.first) * self.screen_to_model_ratio()
    }

    /// Maps a model value to a screen coordinate. Values outside the model range extrapolate.
    pub fn screen_loc_for_scalar(&self, scalar: f64) -> f64 {
        match self.orientation {
            Orientation::X => self.first_screen + self.internal_screen_loc_for_scalar(scalar),
            Orientation::Y => self.first_screen - self.internal_screen_loc_for_scalar(scalar),
        }
    }

    /// Maps a screen coordinate back to a model value.
    pub fn scalar_for_screen_loc(&self, loc: f64) -> f64 {
        match self.orientation {
            Orientation::X => (loc - self.first_screen) * self.model_to_screen_ratio() + self.first,
            Orientation::Y => {
                -(loc - self.first_screen) * self.model_to_screen_ratio() + self.first
            }
        }
    }

    /// Maps a model value to a coordinate relative to the axis origin, for content drawn in the
    /// inner frame's own coordinate system (top-left origin for Y).
    pub fn inner_screen_loc_for_scalar(&self, scalar: f64) -> f64 {
        match self.orientation {
            Orientation::X => self.internal_screen_loc_for_scalar(scalar),
            Orientation::Y => self.screen_length() - self.internal_screen_loc_for_scalar(scalar),
        }
    }

    /// Inverse of [`Axis::inner_screen_loc_for_scalar`].
    pub fn inner_scalar_for_screen_loc(&self, loc: f64) -> f64 {
        match self.orientation {
            Orientation::X => loc * self.model_to_screen_ratio() + self.first,
            Orientation::Y => self.length() - loc * self.model_to_screen_ratio() + self.first,
        }
    }

    /// Converts a screen distance into a model distance. Positive screen distances map to
    /// positive model distances for both orientations.
    pub fn screen_to_model_length(&self, screen_length: f64) -> f64 {
        let delta = self.scalar_for_screen_loc(screen_length) - self.scalar_for_screen_loc(0.0);
        match self.orientation {
            Orientation::X => delta,
            Orientation::Y => -delta,
        }
    }

    /// Converts a model distance into a screen distance.
    pub fn model_to_screen_length(&self, model_length: f64) -> f64 {
        let delta = self.screen_loc_for_scalar(model_length) - self.screen_loc_for_scalar(0.0);
        match self.orientation {
            Orientation::X => delta,
            Orientation::Y => -delta,
        }
    }

    /// First model value inside the visible window once padding is accounted for.
    pub fn first_model_value_in_bounds(&self) -> f64 {
        let padding = self
            .fixed_padding_first_screen
            .unwrap_or(self.padding_first_screen);
        self.first_visible() + self.screen_to_model_length(padding)
    }

    /// Last model value inside the visible window once padding is accounted for.
    pub fn last_model_value_in_bounds(&self) -> f64 {
        let padding = self
            .fixed_padding_last_screen
            .unwrap_or(self.padding_last_screen);
        self.last_visible() - self.screen_to_model_length(padding)
    }

    /// Current zoom and translation.
    pub fn transform(&self) -> AxisTransform {
        AxisTransform {
            scale: self.zoom_factor(),
            translation: self.first_screen_init - self.first_screen,
        }
    }

    fn inner_ratio(&self) -> f64 {
        (self.last_init - self.first_init)
            / (self.screen_length_init() - self.padding_first_screen - self.padding_last_screen)
    }

    fn to_model_inner(&self, loc: f64) -> f64 {
        match self.orientation {
            Orientation::X => {
                (loc - self.first_screen_init - self.padding_first_screen) * self.inner_ratio()
                    + self.first_init
            }
            Orientation::Y => {
                let model_inner = (loc - self.last_screen_init - self.padding_last_screen)
                    * self.inner_ratio()
                    + self.first_init;
                self.last_init - model_inner + self.first_init
            }
        }
    }

    fn adjust_model_boundaries_for_padding(&mut self) {
        if self.padding_first_screen != 0.0 || self.padding_last_screen != 0.0 {
            self.first = self.to_model_inner(self.first_screen_init);
            self.last = self.to_model_inner(self.last_screen_init);
            tracing::trace!(
                first = self.first,
                last = self.last,
                "adjusted model bounds for padding"
            );
        }
    }

    /// Moves the first screen bound (current, initial and visible) by `offset`.
    ///
    /// Used when a neighbouring axis changes size and this axis has to start further in.
    pub fn offset_first_screen(&mut self, offset: f64) {
        self.first_screen += offset;
        self.first_screen_init += offset;
        self.first_visible_screen += offset;
        self.adjust_model_boundaries_for_padding();
    }

    /// Moves the last screen bound (current, initial and visible) by `offset`.
    pub fn offset_last_screen(&mut self, offset: f64) {
        self.last_screen += offset;
        self.last_screen_init += offset;
        self.last_visible_screen += offset;
        self.adjust_model_boundaries_for_padding();
    }

    /// Returns `true` if a label of `size` centred at `screen_center` fits inside the visible
    /// window.
    pub fn is_in_boundaries(&self, screen_center: f64, size: Size) -> bool {
        match self.orientation {
            Orientation::X => {
                screen_center - size.width / 2.0 >= self.first_visible_screen
                    && screen_center + size.width / 2.0 <= self.last_visible_screen
            }
            Orientation::Y => {
                screen_center - size.height / 2.0 >= self.last_visible_screen
                    && screen_center + size.height / 2.0 <= self.first_visible_screen
            }
        }
    }

    /// Zooms incrementally around a screen anchor.
    ///
    /// `x` applies to horizontal axes, `y` to vertical ones: each side of the anchor is scaled by
    /// the factor. Without `elastic`, the result is clamped so the visible window never leaves
    /// the initial window.
    pub fn zoom(&mut self, x: f64, y: f64, center_x: f64, center_y: f64, elastic: bool) {
        let (new_first, new_last) = match self.orientation {
            Orientation::X => {
                let segment1 = center_x - self.first_screen;
                let segment2 = self.last_screen - center_x;
                (
                    self.first_screen - (segment1 * x - segment1),
                    self.last_screen + (segment2 * x - segment2),
                )
            }
            Orientation::Y => {
                let segment1 = self.first_screen - center_y;
                let segment2 = center_y - self.last_screen;
                (
                    self.first_screen + (segment1 * y - segment1),
                    self.last_screen - (segment2 * y - segment2),
                )
            }
        };
        if elastic {
            self.first_screen = new_first;
            self.last_screen = new_last;
        } else {
            self.clamp_screen_bounds(new_first, new_last);
        }
    }

    /// Zooms to absolute scale factors by converting them into increments of the current zoom.
    pub fn zoom_absolute(
        &mut self,
        scale_x: f64,
        scale_y: f64,
        center_x: f64,
        center_y: f64,
        elastic: bool,
    ) {
        let zoom_factor = self.zoom_factor();
        match self.orientation {
            Orientation::X => self.zoom(scale_x / zoom_factor, scale_y, center_x, center_y, elastic),
            Orientation::Y => self.zoom(scale_x, scale_y / zoom_factor, center_x, center_y, elastic),
        }
    }

    /// Translates the axis by a screen delta.
    ///
    /// Without `elastic`, the end moving towards the window is stopped at its initial bound and
    /// the current zoomed length is preserved.
    pub fn pan(&mut self, delta_x: f64, delta_y: f64, elastic: bool) {
        let length = self.screen_length();
        let (new_first, new_last) = match self.orientation {
            Orientation::X => {
                if delta_x < 0.0 {
                    let try_last = self.last_screen + delta_x;
                    let last = if elastic {
                        try_last
                    } else {
                        self.last_screen_init.max(try_last)
                    };
                    (last - length, last)
                } else if delta_x > 0.0 {
                    let try_first = self.first_screen + delta_x;
                    let first = if elastic {
                        try_first
                    } else {
                        try_first.min(self.first_screen_init)
                    };
                    (first, first + length)
                } else {
                    (self.first_screen, self.last_screen)
                }
            }
            Orientation::Y => {
                if delta_y < 0.0 {
                    let try_first = self.first_screen + delta_y;
                    let first = if elastic {
                        try_first
                    } else {
                        self.first_screen_init.max(try_first)
                    };
                    (first, first - length)
                } else if delta_y > 0.0 {
                    let try_last = self.last_screen + delta_y;
                    let last = if elastic {
                        try_last
                    } else {
                        self.last_screen_init.min(try_last)
                    };
                    (last + length, last)
                } else {
                    (self.first_screen, self.last_screen)
                }
            }
        };
        self.first_screen = new_first;
        self.last_screen = new_last;
    }

    /// Re-applies the non-elastic clamp to the current screen bounds. Idempotent.
    pub fn keep_in_boundaries(&mut self) {
        self.clamp_screen_bounds(self.first_screen, self.last_screen);
    }

    fn clamp_screen_bounds(&mut self, mut new_first: f64, mut new_last: f64) {
        match self.orientation {
            Orientation::X => {
                if new_last < self.last_screen_init {
                    let delta = self.last_screen_init - new_last;
                    new_last = self.last_screen_init;
                    new_first += delta;
                }
                if new_first > self.first_screen_init {
                    let delta = new_first - self.first_screen_init;
                    new_first = self.first_screen_init;
                    new_last -= delta;
                }
                if new_last - new_first > self.last_screen_init - self.first_screen_init {
                    self.first_screen = new_first;
                    self.last_screen = new_last;
                    let offset = self.first_screen - self.first_screen_init;
                    if offset > 0.0 {
                        self.first_screen -= offset;
                        self.last_screen -= offset;
                    }
                } else {
                    self.first_screen = self.first_screen_init;
                    self.last_screen = self.last_screen_init;
                }
            }
            Orientation::Y => {
                if new_last > self.last_screen_init {
                    let delta = new_last - self.last_screen_init;
                    new_last = self.last_screen_init;
                    new_first -= delta;
                }
                if new_first < self.first_screen_init {
                    let delta = self.first_screen_init - new_first;
                    new_first = self.first_screen_init;
                    new_last += delta;
                }
                if new_first - new_last > self.first_screen_init - self.last_screen_init {
                    self.first_screen = new_first;
                    self.last_screen = new_last;
                    let offset = self.first_screen_init - self.first_screen;
                    if offset > 0.0 {
                        self.first_screen += offset;
                        self.last_screen += offset;
                    }
                } else {
                    self.first_screen = self.first_screen_init;
                    self.last_screen = self.last_screen_init;
                }
            }
        }
    }

    /// Returns `true` if the visible model window lies within the initial model range.
    pub fn visible_within_init(&self, tolerance: f64) -> bool {
        let (lo, hi) = if self.first_init <= self.last_init {
            (self.first_init, self.last_init)
        } else {
            (self.last_init, self.first_init)
        };
        let a = self.first_visible();
        let b = self.last_visible();
        let (va, vb) = if a <= b { (a, b) } else { (b, a) };
        va >= lo - tolerance && vb <= hi + tolerance
    }

    /// Returns `true` if the axis is back at its initial zoom and translation.
    pub fn is_at_init(&self) -> bool {
        approx_equal(self.first_screen, self.first_screen_init)
            && approx_equal(self.last_screen, self.last_screen_init)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn rejects_empty_and_non_finite_ranges() {
        assert_eq!(
            Axis::x(5.0, 5.0, 0.0, 100.0),
            Err(AxisError::EmptyRange(5.0))
        );
        assert!(
            matches!(
                Axis::y(0.0, f64::NAN, 100.0, 0.0),
                Err(AxisError::NonFinite { what: "last", .. })
            ),
            "nan bounds are rejected"
        );
    }

    #[test]
    fn x_axis_maps_linearly() {
        let axis = Axis::x(0.0, 50.0, 10.0, 210.0).unwrap();
        assert!(close(axis.screen_loc_for_scalar(25.0), 110.0), "midpoint");
        assert!(close(axis.screen_loc_for_scalar(-25.0), -90.0), "extrapolates");
        assert!(close(axis.scalar_for_screen_loc(210.0), 50.0), "inverse");
        assert!(close(axis.screen_to_model_length(40.0), 10.0), "lengths");
    }

    #[test]
    fn y_axis_is_inverted() {
        // Bottom edge at 300, top edge at 100.
        let axis = Axis::y(0.0, 50.0, 300.0, 100.0).unwrap();
        assert!(close(axis.screen_loc_for_scalar(0.0), 300.0), "first at bottom");
        assert!(close(axis.screen_loc_for_scalar(50.0), 100.0), "last at top");
        // 60% of the way up.
        assert!(close(axis.screen_loc_for_scalar(30.0), 180.0), "30 of 50");
        assert!(close(axis.screen_to_model_length(40.0), 10.0), "positive length");
        assert!(close(axis.model_to_screen_length(10.0), 40.0), "positive screen length");
        assert!(close(axis.inner_screen_loc_for_scalar(50.0), 0.0), "inner top");
        assert!(close(axis.inner_scalar_for_screen_loc(200.0), 0.0), "inner bottom");
    }

    #[test]
    fn ratios_are_reciprocal() {
        let axis = Axis::y(-3.0, 7.0, 400.0, 20.0).unwrap();
        let product = axis.screen_to_model_ratio() * axis.model_to_screen_ratio();
        assert!(close(product, 1.0), "product was {product}");
    }

    #[test]
    fn padding_keeps_init_values_at_padded_positions() {
        let axis = Axis::x(0.0, 100.0, 0.0, 300.0)
            .unwrap()
            .with_padding(10.0, 20.0);
        assert!(close(axis.screen_loc_for_scalar(0.0), 10.0), "first padded");
        assert!(close(axis.screen_loc_for_scalar(100.0), 280.0), "last padded");
        assert!(axis.first() < 0.0 && axis.last() > 100.0, "model range grew");

        let y = Axis::y(0.0, 100.0, 300.0, 0.0)
            .unwrap()
            .with_padding(10.0, 20.0);
        assert!(close(y.screen_loc_for_scalar(0.0), 290.0), "y first padded");
        assert!(close(y.screen_loc_for_scalar(100.0), 20.0), "y last padded");
        assert!(
            close(y.first_model_value_in_bounds(), 0.0),
            "first in bounds was {}",
            y.first_model_value_in_bounds()
        );
        assert!(close(y.last_model_value_in_bounds(), 100.0), "last in bounds");
    }

    #[test]
    fn zoom_then_pan_stays_inside_initial_window() {
        let mut axis = Axis::x(0.0, 100.0, 0.0, 300.0).unwrap();
        axis.zoom(2.0, 1.0, 150.0, 0.0, false);
        assert!(close(axis.first_screen(), -150.0), "zoomed first");
        assert!(close(axis.last_screen(), 450.0), "zoomed last");

        axis.pan(-50.0, 0.0, false);
        assert!(close(axis.first_screen(), -200.0), "panned first");
        assert!(close(axis.last_screen(), 400.0), "panned last");
        assert!(close(axis.zoom_factor(), 2.0), "zoom {}", axis.zoom_factor());
        assert!(axis.first_screen() <= axis.first_screen_init(), "covers start");
        assert!(axis.last_screen() >= axis.last_screen_init(), "covers end");
        assert!(axis.visible_within_init(1e-9), "visible window inside");

        // Panning far past the end stops at the initial bound.
        axis.pan(-1000.0, 0.0, false);
        assert!(close(axis.last_screen(), 300.0), "stopped at end");
        assert!(close(axis.zoom_factor(), 2.0), "length preserved");

        // Zooming out beyond the original range resets.
        axis.zoom_absolute(0.5, 1.0, 10.0, 0.0, false);
        assert!(axis.is_at_init(), "reset to init: {axis:?}");
    }

    #[test]
    fn zoom_out_transfers_excess_to_the_other_side() {
        let mut axis = Axis::x(0.0, 100.0, 0.0, 300.0).unwrap();
        axis.zoom(4.0, 1.0, 0.0, 0.0, false);
        assert!(close(axis.first_screen(), 0.0), "anchored at start");
        // Zoom out around the right edge: the end would cross the initial end, so the whole
        // window shifts instead.
        axis.zoom(0.75, 1.0, 300.0, 0.0, false);
        assert!(axis.first_screen() <= 0.0, "start stays covered");
        assert!(axis.last_screen() >= 300.0, "end stays covered");
        assert!(close(axis.screen_length(), 900.0), "zoom still applied");
    }

    #[test]
    fn elastic_zoom_is_unclamped() {
        let mut axis = Axis::y(0.0, 10.0, 100.0, 0.0).unwrap();
        axis.zoom(1.0, 0.5, 0.0, 50.0, true);
        assert!(close(axis.first_screen(), 75.0), "first {}", axis.first_screen());
        assert!(close(axis.last_screen(), 25.0), "last {}", axis.last_screen());
        axis.keep_in_boundaries();
        assert!(axis.is_at_init(), "clamp resets the zoom-out");
    }

    #[test]
    fn y_pan_clamps_each_end() {
        let mut axis = Axis::y(0.0, 10.0, 100.0, 0.0).unwrap();
        axis.zoom(1.0, 2.0, 0.0, 50.0, false);
        assert!(close(axis.first_screen(), 150.0), "zoomed bottom");
        axis.pan(0.0, -500.0, false);
        assert!(close(axis.first_screen(), 100.0), "bottom stopped");
        assert!(close(axis.last_screen(), -100.0), "length kept");
        axis.pan(0.0, 500.0, false);
        assert!(close(axis.last_screen(), 0.0), "top stopped");
    }

    #[test]
    fn offsets_move_all_bounds() {
        let mut axis = Axis::x(0.0, 10.0, 0.0, 100.0).unwrap();
        axis.offset_first_screen(20.0);
        assert!(close(axis.first_screen_init(), 20.0), "init moved");
        assert!(close(axis.first_visible_screen(), 20.0), "visible moved");
        assert!(close(axis.screen_loc_for_scalar(0.0), 20.0), "mapping follows");
        axis.offset_last_screen(-10.0);
        assert!(close(axis.screen_loc_for_scalar(10.0), 90.0), "end follows");
    }

    #[test]
    fn boundary_check_uses_visible_window() {
        let x = Axis::x(0.0, 10.0, 0.0, 100.0).unwrap();
        assert!(x.is_in_boundaries(10.0, Size::new(20.0, 5.0)), "fits");
        assert!(!x.is_in_boundaries(5.0, Size::new(20.0, 5.0)), "overflows start");
        let y = Axis::y(0.0, 10.0, 100.0, 0.0).unwrap();
        assert!(y.is_in_boundaries(50.0, Size::new(500.0, 10.0)), "only height matters");
        assert!(!y.is_in_boundaries(98.0, Size::new(5.0, 10.0)), "overflows bottom");
    }

    #[test]
    fn transform_reports_zoom_and_translation() {
        let mut axis = Axis::x(0.0, 100.0, 0.0, 300.0).unwrap();
        axis.zoom(2.0, 1.0, 0.0, 0.0, false);
        axis.pan(-30.0, 0.0, false);
        let t = axis.transform();
        assert!(close(t.scale, 2.0), "scale {}", t.scale);
        assert!(close(t.translation, 30.0), "translation {}", t.translation);
    }

    fn unpadded_axis() -> impl Strategy<Value = Axis> {
        (
            prop_oneof![Just(Orientation::X), Just(Orientation::Y)],
            -1e6..1e6_f64,
            1e-3..1e6_f64,
            0.0..2000.0_f64,
            100.0..2000.0_f64,
        )
            .prop_map(|(o, first, span, screen0, screen_span)| {
                let (s0, s1) = match o {
                    Orientation::X => (screen0, screen0 + screen_span),
                    Orientation::Y => (screen0 + screen_span, screen0),
                };
                Axis::new(o, first, first + span, s0, s1).unwrap()
            })
    }

    fn any_axis() -> impl Strategy<Value = Axis> {
        (unpadded_axis(), 0.0..40.0_f64, 0.0..40.0_f64)
            .prop_map(|(axis, p0, p1)| axis.with_padding(p0, p1))
    }

    proptest! {
        #[test]
        fn screen_mapping_round_trips(axis in any_axis(), t in -3.0..4.0_f64) {
            let scalar = axis.first_init() + t * (axis.last_init() - axis.first_init());
            let back = axis.scalar_for_screen_loc(axis.screen_loc_for_scalar(scalar));
            let scale = scalar.abs().max(axis.length().abs()).max(1.0);
            prop_assert!((back - scalar).abs() <= 1e-9 * scale, "{scalar} -> {back}");
        }

        #[test]
        fn screen_mapping_is_monotonic(axis in any_axis(), a in -1.0..2.0_f64, d in 1e-3..1.0_f64) {
            let lo = axis.first_init() + a * axis.length();
            let hi = lo + d * axis.length();
            let (sa, sb) = (axis.screen_loc_for_scalar(lo), axis.screen_loc_for_scalar(hi));
            match axis.orientation() {
                Orientation::X => prop_assert!(sb > sa, "x grows"),
                Orientation::Y => prop_assert!(sb < sa, "y shrinks"),
            }
        }

        #[test]
        fn non_elastic_gestures_stay_in_bounds(
            axis in any_axis(),
            ops in proptest::collection::vec((any::<bool>(), 0.2..5.0_f64, -500.0..500.0_f64), 1..12),
        ) {
            let mut axis = axis;
            let center = (axis.first_screen() + axis.last_screen()) / 2.0;
            for (is_zoom, scale, delta) in ops {
                if is_zoom {
                    axis.zoom(scale, scale, center + delta / 4.0, center + delta / 4.0, false);
                } else {
                    axis.pan(delta, delta, false);
                }
                let tolerance = 1e-6 * axis.length().abs().max(1.0);
                let a = axis.first_visible();
                let b = axis.last_visible();
                prop_assert!(a >= axis.first() - tolerance && b <= axis.last() + tolerance,
                    "visible {a}..{b} outside {}..{}", axis.first(), axis.last());
            }
        }

        #[test]
        fn unpadded_gestures_stay_within_init_bounds(
            axis in unpadded_axis(),
            ops in proptest::collection::vec((any::<bool>(), 0.2..5.0_f64, -500.0..500.0_f64), 1..12),
        ) {
            let mut axis = axis;
            let center = (axis.first_screen() + axis.last_screen()) / 2.0;
            for (is_zoom, scale, delta) in ops {
                if is_zoom {
                    axis.zoom(scale, scale, center + delta / 4.0, center + delta / 4.0, false);
                } else {
                    axis.pan(delta, delta, false);
                }
                let tolerance = 1e-6 * axis.length().abs().max(1.0);
                let a = axis.first_visible();
                let b = axis.last_visible();
                prop_assert!(
                    a >= axis.first_init() - tolerance && b <= axis.last_init() + tolerance,
                    "visible {a}..{b} outside {}..{}", axis.first_init(), axis.last_init()
                );
            }
        }
    }
}
