// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering port.
//!
//! Layers compute geometry and hand it to a [`RenderSink`]; they never draw pixels themselves.

use kurbo::{Circle, Line, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use smallvec::SmallVec;

use crate::label::LabelSettings;

/// A paint and width pair for stroked lines.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in screen units.
    pub stroke_width: f64,
    /// Alternating dash and gap lengths. Empty for a solid line.
    pub dash: SmallVec<[f64; 2]>,
}

impl StrokeStyle {
    /// A solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
            dash: SmallVec::new(),
        }
    }

    /// Sets the dash pattern.
    #[must_use]
    pub fn with_dash(mut self, dash: &[f64]) -> Self {
        self.dash = SmallVec::from_slice(dash);
        self
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// A stroked line segment.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSegment {
    /// Endpoints in screen coordinates.
    pub line: Line,
    /// Stroke.
    pub stroke: StrokeStyle,
}

/// A label positioned on screen.
#[derive(Clone, Copy, Debug)]
pub struct LabelPlacement<'a> {
    /// Text to draw.
    pub text: &'a str,
    /// Unrotated text box. Rotation, if any, is around its center.
    pub rect: Rect,
    /// Font, paint and rotation.
    pub settings: &'a LabelSettings,
}

/// Receives the geometry of a chart.
pub trait RenderSink {
    /// Draws a stroked line segment.
    fn line(&mut self, segment: &LineSegment);

    /// Draws a label.
    fn label(&mut self, label: &LabelPlacement<'_>);

    /// Fills a circle. Sinks that do not draw content markers can ignore this.
    fn circle(&mut self, _circle: Circle, _brush: &Brush) {}

    /// Restricts subsequent drawing to `rect` until [`RenderSink::pop_clip`].
    fn push_clip(&mut self, _rect: Rect) {}

    /// Ends the innermost clip.
    fn pop_clip(&mut self) {}
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn line(&mut self, segment: &LineSegment) {
        (**self).line(segment);
    }

    fn label(&mut self, label: &LabelPlacement<'_>) {
        (**self).label(label);
    }

    fn circle(&mut self, circle: Circle, brush: &Brush) {
        (**self).circle(circle, brush);
    }

    fn push_clip(&mut self, rect: Rect) {
        (**self).push_clip(rect);
    }

    fn pop_clip(&mut self) {
        (**self).pop_clip();
    }
}
