// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content layers drawn inside the inner frame.
//!
//! These are thin clients of the axis mapping: they place data through an X and a Y [`Axis`] and
//! hand the geometry to a [`RenderSink`].

use alloc::vec::Vec;

use kurbo::{Circle, Line, Point, Rect, Size};
use peniko::Brush;
use peniko::color::palette::css;

use crate::approx::approx_equal_eps;
use crate::axis::Axis;
use crate::layer::{AxisEdge, AxisLayer};
use crate::render::{LineSegment, RenderSink, StrokeStyle};
use crate::value::ChartPoint;

// Screen locations are compared at sub-pixel precision.
const SCREEN_TOLERANCE: f64 = 1e-6;

/// A point hit by a tap.
#[derive(Clone, Debug, PartialEq)]
pub struct TappedPoint {
    /// Position in the layer's point list.
    pub index: usize,
    /// The data point.
    pub point: ChartPoint,
    /// Where it is drawn.
    pub screen_loc: Point,
    /// Distance from the tap.
    pub distance: f64,
}

/// Data points drawn as filled circles.
#[derive(Clone, Debug)]
pub struct ScatterLayer {
    points: Vec<ChartPoint>,
    item_size: Size,
    fill: Brush,
    tap_radius: f64,
}

impl ScatterLayer {
    /// Draws each point as a circle fitting `item_size`.
    pub fn new(points: Vec<ChartPoint>, item_size: Size, fill: impl Into<Brush>) -> Self {
        Self {
            points,
            item_size,
            fill: fill.into(),
            tap_radius: 30.0,
        }
    }

    /// Sets how far from a point a tap still hits it. Defaults to 30.
    #[must_use]
    pub fn with_tap_radius(mut self, radius: f64) -> Self {
        self.tap_radius = radius;
        self
    }

    /// The data points.
    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    /// Screen location of `point`.
    pub fn screen_loc(point: &ChartPoint, x: &Axis, y: &Axis) -> Point {
        Point::new(
            x.screen_loc_for_scalar(point.x.scalar),
            y.screen_loc_for_scalar(point.y.scalar),
        )
    }

    /// Screen locations of all points, in order.
    pub fn screen_locs(&self, x: &Axis, y: &Axis) -> Vec<Point> {
        self.points
            .iter()
            .map(|point| Self::screen_loc(point, x, y))
            .collect()
    }

    /// Points drawn at horizontal screen location `loc`.
    pub fn points_at_screen_x(&self, loc: f64, x: &Axis, y: &Axis) -> Vec<&ChartPoint> {
        self.points
            .iter()
            .filter(|point| {
                approx_equal_eps(Self::screen_loc(point, x, y).x, loc, SCREEN_TOLERANCE)
            })
            .collect()
    }

    /// Points drawn at vertical screen location `loc`.
    pub fn points_at_screen_y(&self, loc: f64, x: &Axis, y: &Axis) -> Vec<&ChartPoint> {
        self.points
            .iter()
            .filter(|point| {
                approx_equal_eps(Self::screen_loc(point, x, y).y, loc, SCREEN_TOLERANCE)
            })
            .collect()
    }

    /// Smallest horizontal and vertical gaps between consecutive points, in list order.
    pub fn min_screen_space(&self, x: &Axis, y: &Axis) -> Option<(f64, f64)> {
        let locs = self.screen_locs(x, y);
        locs.windows(2)
            .map(|pair| ((pair[1].x - pair[0].x).abs(), (pair[1].y - pair[0].y).abs()))
            .reduce(|a, b| (a.0.min(b.0), a.1.min(b.1)))
    }

    /// Points within the tap radius of `location`.
    pub fn handle_tap(&self, location: Point, x: &Axis, y: &Axis) -> Vec<TappedPoint> {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(index, point)| {
                let screen_loc = Self::screen_loc(point, x, y);
                let distance = screen_loc.distance(location);
                (distance < self.tap_radius).then(|| TappedPoint {
                    index,
                    point: point.clone(),
                    screen_loc,
                    distance,
                })
            })
            .collect()
    }

    /// Emits one circle per point.
    pub fn render(&self, x: &Axis, y: &Axis, sink: &mut dyn RenderSink) {
        let radius = self.item_size.width.min(self.item_size.height) / 2.0;
        for loc in self.screen_locs(x, y) {
            sink.circle(Circle::new(loc, radius), &self.fill);
        }
    }
}

/// Which dimensions get guide lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GuideLinesAxis {
    /// Vertical lines at the X ticks.
    X,
    /// Horizontal lines at the Y ticks.
    Y,
    /// Both.
    #[default]
    XAndY,
}

/// Lines across the inner frame at every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct GuideLines {
    axis: GuideLinesAxis,
    stroke: StrokeStyle,
}

impl Default for GuideLines {
    fn default() -> Self {
        Self::new(StrokeStyle::solid(css::GRAY, 0.3))
    }
}

impl GuideLines {
    /// Solid guide lines.
    pub fn new(stroke: StrokeStyle) -> Self {
        Self {
            axis: GuideLinesAxis::XAndY,
            stroke,
        }
    }

    /// Dotted guide lines.
    pub fn dotted(brush: impl Into<Brush>, width: f64, dot_width: f64, dot_spacing: f64) -> Self {
        Self::new(StrokeStyle::solid(brush, width).with_dash(&[dot_width, dot_spacing]))
    }

    /// Restricts the lines to one dimension.
    #[must_use]
    pub fn with_axis(mut self, axis: GuideLinesAxis) -> Self {
        self.axis = axis;
        self
    }

    /// The line stroke.
    pub fn stroke(&self) -> &StrokeStyle {
        &self.stroke
    }

    /// Guide lines across `inner_frame` at the ticks of `x_layer` and `y_layer`.
    ///
    /// Lines that would run over the other axis' layer are left out.
    pub fn lines(&self, x_layer: &AxisLayer, y_layer: &AxisLayer, inner_frame: Rect) -> Vec<LineSegment> {
        let mut lines = Vec::new();
        if matches!(self.axis, GuideLinesAxis::X | GuideLinesAxis::XAndY) {
            let y_frame = y_layer.frame();
            let y_low = y_layer.edge() == AxisEdge::YLow;
            for x in x_layer.axis_values_screen_locs() {
                let clear = if y_low { x > y_frame.x1 } else { x < y_frame.x0 };
                if clear {
                    lines.push(self.segment(Line::new((x, inner_frame.y0), (x, inner_frame.y1))));
                }
            }
        }
        if matches!(self.axis, GuideLinesAxis::Y | GuideLinesAxis::XAndY) {
            let x_frame = x_layer.frame();
            let x_low = x_layer.edge() == AxisEdge::XLow;
            for y in y_layer.axis_values_screen_locs() {
                let clear = if x_low { y < x_frame.y0 } else { y > x_frame.y1 };
                if clear {
                    lines.push(self.segment(Line::new((inner_frame.x0, y), (inner_frame.x1, y))));
                }
            }
        }
        lines
    }

    fn segment(&self, line: Line) -> LineSegment {
        LineSegment {
            line,
            stroke: self.stroke.clone(),
        }
    }

    /// Emits the guide lines.
    pub fn render(
        &self,
        x_layer: &AxisLayer,
        y_layer: &AxisLayer,
        inner_frame: Rect,
        sink: &mut dyn RenderSink,
    ) {
        for segment in self.lines(x_layer, y_layer, inner_frame) {
            sink.line(&segment);
        }
    }
}
