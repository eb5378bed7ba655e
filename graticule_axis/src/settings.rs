// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart, axis and zoom/pan configuration.

use peniko::Brush;
use peniko::color::palette::css;

use crate::error::{AxisError, AxisResult};

/// How a pinch is split between the two dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureMode {
    /// Only the horizontal dimension zooms.
    OnlyX,
    /// Only the vertical dimension zooms.
    OnlyY,
    /// The dimension the fingers are spread along zooms; the other stays put.
    #[default]
    Max,
    /// Both dimensions zoom, the minor one proportionally less.
    Both,
}

/// Zoom and pan behavior of a chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomPanSettings {
    /// Accept pan gestures.
    pub pan_enabled: bool,
    /// Accept pinch gestures.
    pub zoom_enabled: bool,
    /// Smallest horizontal scale.
    pub min_zoom_x: Option<f64>,
    /// Largest horizontal scale.
    pub max_zoom_x: Option<f64>,
    /// Smallest vertical scale.
    pub min_zoom_y: Option<f64>,
    /// Largest vertical scale.
    pub max_zoom_y: Option<f64>,
    /// Pinch splitting.
    pub gesture_mode: GestureMode,
    /// Let content overshoot its bounds during a gesture and correct it afterwards.
    pub elastic: bool,
    /// Correction steps before a final uncapped correction is applied.
    pub correction_cap: usize,
    /// Largest relative scale change per zoom correction step.
    pub zoom_correction_velocity: f64,
    /// Largest translation per pan correction step, in screen units.
    pub pan_correction_velocity: f64,
    /// Release velocity is divided by this to get the first inertial delta.
    pub initial_friction: f64,
    /// Inertial velocity is multiplied by this after every step.
    pub friction_factor: f64,
    /// Inertia stops once both velocity components fall below this.
    pub stop_threshold: f64,
}

impl Default for ZoomPanSettings {
    fn default() -> Self {
        Self {
            pan_enabled: false,
            zoom_enabled: false,
            min_zoom_x: None,
            max_zoom_x: None,
            min_zoom_y: None,
            max_zoom_y: None,
            gesture_mode: GestureMode::Max,
            elastic: false,
            correction_cap: 400,
            zoom_correction_velocity: 0.2,
            pan_correction_velocity: 20.0,
            initial_friction: 50.0,
            friction_factor: 0.9,
            stop_threshold: 0.1,
        }
    }
}

impl ZoomPanSettings {
    /// Enables pan and zoom.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            pan_enabled: true,
            zoom_enabled: true,
            ..Self::default()
        }
    }

    /// Sets the horizontal scale limits.
    #[must_use]
    pub fn with_zoom_x(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_zoom_x = min;
        self.max_zoom_x = max;
        self
    }

    /// Sets the vertical scale limits.
    #[must_use]
    pub fn with_zoom_y(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_zoom_y = min;
        self.max_zoom_y = max;
        self
    }

    /// Sets the pinch splitting mode.
    #[must_use]
    pub fn with_gesture_mode(mut self, mode: GestureMode) -> Self {
        self.gesture_mode = mode;
        self
    }

    /// Sets elastic mode.
    #[must_use]
    pub fn with_elastic(mut self, elastic: bool) -> Self {
        self.elastic = elastic;
        self
    }

    /// Sets the correction step cap.
    #[must_use]
    pub fn with_correction_cap(mut self, cap: usize) -> Self {
        self.correction_cap = cap;
        self
    }

    /// Checks that each configured range has `min <= max`.
    pub fn validate(&self) -> AxisResult<()> {
        for (min, max) in [
            (self.min_zoom_x, self.max_zoom_x),
            (self.min_zoom_y, self.max_zoom_y),
        ] {
            if let (Some(min), Some(max)) = (min, max) {
                if min > max {
                    return Err(AxisError::InvalidZoomRange { min, max });
                }
            }
        }
        Ok(())
    }
}

/// Outer layout of a chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartSettings {
    /// Inset from the left edge.
    pub leading: f64,
    /// Inset from the top edge.
    pub top: f64,
    /// Inset from the right edge.
    pub trailing: f64,
    /// Inset from the bottom edge.
    pub bottom: f64,
    /// Gap between label rows.
    pub labels_spacing: f64,
    /// Gap between an X axis line and its labels.
    pub labels_to_axis_spacing_x: f64,
    /// Gap between a Y axis line and its labels.
    pub labels_to_axis_spacing_y: f64,
    /// Gap between stacked X axes.
    pub spacing_between_axes_x: f64,
    /// Gap between stacked Y axes.
    pub spacing_between_axes_y: f64,
    /// Gap between the labels and the title.
    pub axis_title_labels_to_labels_spacing: f64,
    /// Width of the axis lines.
    pub axis_stroke_width: f64,
    /// Gesture behavior.
    pub zoom_pan: ZoomPanSettings,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            leading: 0.0,
            top: 0.0,
            trailing: 0.0,
            bottom: 0.0,
            labels_spacing: 5.0,
            labels_to_axis_spacing_x: 5.0,
            labels_to_axis_spacing_y: 5.0,
            spacing_between_axes_x: 15.0,
            spacing_between_axes_y: 15.0,
            axis_title_labels_to_labels_spacing: 5.0,
            axis_stroke_width: 1.0,
            zoom_pan: ZoomPanSettings::default(),
        }
    }
}

impl ChartSettings {
    /// Sets all four insets.
    #[must_use]
    pub fn with_insets(mut self, leading: f64, top: f64, trailing: f64, bottom: f64) -> Self {
        self.leading = leading;
        self.top = top;
        self.trailing = trailing;
        self.bottom = bottom;
        self
    }

    /// Sets the gesture behavior.
    #[must_use]
    pub fn with_zoom_pan(mut self, zoom_pan: ZoomPanSettings) -> Self {
        self.zoom_pan = zoom_pan;
        self
    }
}

/// Spacing and stroke of one axis layer.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSettings {
    /// Left bound of the chart area, used by high Y axes.
    pub screen_leading: f64,
    /// Right inset, used by high Y axes.
    pub screen_trailing: f64,
    /// Top bound, used by high X axes.
    pub screen_top: f64,
    /// Bottom inset, used by low X axes.
    pub screen_bottom: f64,
    /// Gap between label rows.
    pub labels_spacing: f64,
    /// Gap between an X axis line and its labels.
    pub labels_to_axis_spacing_x: f64,
    /// Gap between a Y axis line and its labels.
    pub labels_to_axis_spacing_y: f64,
    /// Gap between the labels and the title.
    pub axis_title_labels_to_labels_spacing: f64,
    /// Axis line paint.
    pub line_color: Brush,
    /// Axis line width.
    pub axis_stroke_width: f64,
    /// Draw the axis line.
    pub is_axis_line_visible: bool,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            screen_leading: 0.0,
            screen_trailing: 0.0,
            screen_top: 0.0,
            screen_bottom: 0.0,
            labels_spacing: 5.0,
            labels_to_axis_spacing_x: 5.0,
            labels_to_axis_spacing_y: 5.0,
            axis_title_labels_to_labels_spacing: 5.0,
            line_color: Brush::Solid(css::BLACK),
            axis_stroke_width: 1.0,
            is_axis_line_visible: true,
        }
    }
}

impl AxisSettings {
    /// Derives axis settings from the chart settings.
    #[must_use]
    pub fn from_chart(chart: &ChartSettings) -> Self {
        Self {
            screen_leading: chart.leading,
            screen_trailing: chart.trailing,
            screen_top: chart.top,
            screen_bottom: chart.bottom,
            labels_spacing: chart.labels_spacing,
            labels_to_axis_spacing_x: chart.labels_to_axis_spacing_x,
            labels_to_axis_spacing_y: chart.labels_to_axis_spacing_y,
            axis_title_labels_to_labels_spacing: chart.axis_title_labels_to_labels_spacing,
            axis_stroke_width: chart.axis_stroke_width,
            ..Self::default()
        }
    }

    /// Sets the axis line paint.
    #[must_use]
    pub fn with_line_color(mut self, brush: impl Into<Brush>) -> Self {
        self.line_color = brush.into();
        self
    }

    /// Shows or hides the axis line.
    #[must_use]
    pub fn with_axis_line_visible(mut self, visible: bool) -> Self {
        self.is_axis_line_visible = visible;
        self
    }
}
