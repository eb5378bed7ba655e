// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis layers: the laid-out form of an axis.
//!
//! An [`AxisLayer`] owns an [`Axis`] and its [`AxisModel`] and computes everything that is drawn
//! for it: the axis line, the tick labels and the title. The four [`AxisEdge`]s share one data
//! layout and differ only in where the line, labels and title sit inside the layer frame.
//!
//! ```text
//!  XLow          XHigh         YLow                 YHigh
//!  ───────       Title         Title  Label  │      │  Label  Title
//!  Label         Label                       │      │
//!  Title         ───────
//! ```

use alloc::vec::Vec;

use graticule_text::TextMeasurer;
use kurbo::{Line, Point, Rect, Size};
use smallvec::SmallVec;

use crate::approx::approx_equal;
use crate::axis::{Axis, Orientation};
use crate::label::{AxisLabel, TextAlignment};
use crate::labels::LabelList;
use crate::model::{AxisModel, PresentedExtents};
use crate::render::{LabelPlacement, LineSegment, RenderSink, StrokeStyle};
use crate::settings::AxisSettings;
use crate::zoom_pan::ZoomPanDelta;

/// Which side of the inner frame an axis sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisEdge {
    /// Below the inner frame.
    XLow,
    /// Above the inner frame.
    XHigh,
    /// Left of the inner frame.
    YLow,
    /// Right of the inner frame.
    YHigh,
}

impl AxisEdge {
    /// The orientation of axes on this edge.
    pub fn orientation(self) -> Orientation {
        match self {
            Self::XLow | Self::XHigh => Orientation::X,
            Self::YLow | Self::YHigh => Orientation::Y,
        }
    }
}

/// A layer's frame grew or shrank after an update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameChange {
    /// Edge of the layer that changed.
    pub edge: AxisEdge,
    /// Growth across the edge: height for X layers, width for Y layers.
    pub delta: f64,
    /// The layer's frame after the change.
    pub frame: Rect,
}

/// The labels of one tick and the screen boxes they occupy.
#[derive(Clone, Debug, PartialEq)]
pub struct TickLabels {
    /// Tick value.
    pub scalar: f64,
    /// Labels, one per row.
    pub labels: LabelList,
    /// Bounding box of each label, rotation included.
    pub rects: SmallVec<[Rect; 1]>,
}

/// A laid-out axis.
#[derive(Debug)]
pub struct AxisLayer {
    edge: AxisEdge,
    axis: Axis,
    model: AxisModel,
    settings: AxisSettings,
    offset: f64,
    ticks: Vec<TickLabels>,
    row_heights: SmallVec<[f64; 2]>,
    labels_extent: f64,
    presented: PresentedExtents,
    title_extent: f64,
    title_rects: Vec<Rect>,
    tap_expand: Size,
    last_frame: Rect,
}

impl AxisLayer {
    /// Lays out `model` on `axis`.
    ///
    /// `offset` is the position of the layer across its axis: the top edge of X layers and the
    /// left edge of Y layers.
    pub fn new(
        edge: AxisEdge,
        axis: Axis,
        model: AxisModel,
        settings: AxisSettings,
        offset: f64,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let title_extent = match edge.orientation() {
            Orientation::X => model
                .title_labels
                .iter()
                .map(|label| label.text_size().height)
                .sum(),
            Orientation::Y => {
                if model.title_labels.len() > 1 {
                    tracing::warn!(
                        titles = model.title_labels.len(),
                        "vertical axes show only their first title"
                    );
                }
                model
                    .title_labels
                    .first()
                    .map_or(0.0, |label| label.text_size().width)
            }
        };
        let mut layer = Self {
            edge,
            axis,
            model,
            settings,
            offset,
            ticks: Vec::new(),
            row_heights: SmallVec::new(),
            labels_extent: 0.0,
            presented: PresentedExtents::default(),
            title_extent,
            title_rects: Vec::new(),
            tap_expand: Size::new(10.0, 10.0),
            last_frame: Rect::ZERO,
        };
        layer.relayout(measurer);
        layer.last_frame = layer.frame();
        layer
    }

    /// Sets how far tap targets extend beyond each label. Defaults to 10 by 10.
    #[must_use]
    pub fn with_tap_expand(mut self, expand: Size) -> Self {
        self.tap_expand = expand;
        self
    }

    /// The edge this layer sits on.
    pub fn edge(&self) -> AxisEdge {
        self.edge
    }

    /// The axis mapping.
    pub fn axis(&self) -> &Axis {
        &self.axis
    }

    /// The axis description.
    pub fn model(&self) -> &AxisModel {
        &self.model
    }

    /// Spacing and stroke.
    pub fn settings(&self) -> &AxisSettings {
        &self.settings
    }

    /// Position across the axis.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Gives back the model, dropping the layout.
    pub fn into_model(self) -> AxisModel {
        self.model
    }

    /// Ticks currently shown, with their labels.
    pub fn ticks(&self) -> &[TickLabels] {
        &self.ticks
    }

    /// Screen locations of the ticks currently shown.
    pub fn axis_values_screen_locs(&self) -> Vec<f64> {
        self.ticks
            .iter()
            .map(|tick| self.axis.screen_loc_for_scalar(tick.scalar))
            .collect()
    }

    /// Smallest screen distance between neighbouring ticks, or `None` with fewer than two ticks.
    pub fn min_axis_screen_space(&self) -> Option<f64> {
        self.axis_values_screen_locs()
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).abs())
            .reduce(f64::min)
    }

    /// Extent reserved for the labels: total row height for X layers, column width for Y layers.
    pub fn labels_extent(&self) -> f64 {
        self.labels_extent
    }

    fn extent_without_labels(&self) -> f64 {
        let s = &self.settings;
        let labels_to_axis = match self.edge.orientation() {
            Orientation::X => s.labels_to_axis_spacing_x,
            Orientation::Y => s.labels_to_axis_spacing_y,
        };
        s.axis_stroke_width + labels_to_axis + s.axis_title_labels_to_labels_spacing + self.title_extent
    }

    fn frame_with_extent(&self, extent: f64) -> Rect {
        match self.edge.orientation() {
            Orientation::X => Rect::from_origin_size(
                (self.axis.first_screen(), self.offset),
                (self.axis.screen_length(), extent),
            ),
            Orientation::Y => Rect::from_origin_size(
                (self.offset, self.axis.last_screen()),
                (extent, self.axis.screen_length()),
            ),
        }
    }

    /// Space taken by the layer. Spans the whole (possibly zoomed) axis length.
    pub fn frame(&self) -> Rect {
        self.frame_with_extent(self.labels_extent + self.extent_without_labels())
    }

    /// Space taken by the layer without its labels. Used to stack axes on one edge.
    pub fn frame_without_labels(&self) -> Rect {
        self.frame_with_extent(self.extent_without_labels())
    }

    /// The part of the frame inside the visible window.
    pub fn visible_frame(&self) -> Rect {
        let extent = self.labels_extent + self.extent_without_labels();
        match self.edge.orientation() {
            Orientation::X => Rect::from_origin_size(
                (self.axis.first_visible_screen(), self.offset),
                (self.axis.visible_screen_length(), extent),
            ),
            Orientation::Y => Rect::from_origin_size(
                (self.offset, self.axis.last_visible_screen()),
                (extent, self.axis.visible_screen_length()),
            ),
        }
    }

    /// The axis line. X lines overshoot the visible window by the stroke width on both ends so
    /// they meet the Y lines at a right angle.
    pub fn line(&self) -> Line {
        let stroke = self.settings.axis_stroke_width;
        let half = stroke / 2.0;
        let labels_to_axis_x = self.settings.labels_to_axis_spacing_x;
        match self.edge {
            AxisEdge::XLow | AxisEdge::XHigh => {
                let y = match self.edge {
                    AxisEdge::XLow => self.offset + half,
                    _ => {
                        self.offset
                            + self.title_extent
                            + self.settings.axis_title_labels_to_labels_spacing
                            + labels_to_axis_x
                            + self.labels_extent
                            + half
                    }
                };
                Line::new(
                    (self.axis.first_visible_screen() - stroke, y),
                    (self.axis.last_visible_screen() + stroke, y),
                )
            }
            AxisEdge::YLow | AxisEdge::YHigh => {
                let x = match self.edge {
                    AxisEdge::YLow => {
                        self.offset + self.y_labels_offset() + self.labels_extent
                            + self.settings.labels_to_axis_spacing_y
                            + stroke
                            - half
                    }
                    _ => self.offset + half,
                };
                Line::new(
                    (x, self.axis.first_visible_screen()),
                    (x, self.axis.last_visible_screen()),
                )
            }
        }
    }

    fn x_labels_offset(&self) -> f64 {
        let s = &self.settings;
        match self.edge {
            AxisEdge::XLow => s.axis_stroke_width + s.labels_to_axis_spacing_x,
            _ => self.title_extent + s.axis_title_labels_to_labels_spacing,
        }
    }

    fn y_labels_offset(&self) -> f64 {
        let s = &self.settings;
        match self.edge {
            AxisEdge::YLow => self.title_extent + s.axis_title_labels_to_labels_spacing,
            _ => s.labels_to_axis_spacing_y + s.axis_stroke_width,
        }
    }

    fn title_offset(&self) -> f64 {
        let spacing = self.settings.axis_title_labels_to_labels_spacing;
        match self.edge {
            AxisEdge::XLow => self.x_labels_offset() + self.labels_extent + spacing,
            AxisEdge::YHigh => self.y_labels_offset() + self.labels_extent + spacing,
            AxisEdge::XHigh | AxisEdge::YLow => 0.0,
        }
    }

    fn measure(&mut self, measurer: &dyn TextMeasurer) {
        let scalars = self.model.values_generator.generate(&self.axis);
        self.ticks = scalars
            .into_iter()
            .map(|scalar| TickLabels {
                scalar,
                labels: self
                    .model
                    .labels_generator
                    .generate(scalar, &self.axis, measurer),
                rects: SmallVec::new(),
            })
            .collect();

        let (current, has_labels) = match self.edge.orientation() {
            Orientation::X => {
                let rows = self.ticks.iter().map(|tick| tick.labels.len()).max().unwrap_or(0);
                self.row_heights = (0..rows)
                    .map(|row| {
                        self.ticks
                            .iter()
                            .filter_map(|tick| tick.labels.get(row))
                            .map(|label| label.text_size().height)
                            .fold(0.0, f64::max)
                    })
                    .collect();
                let total = self
                    .row_heights
                    .iter()
                    .map(|height| height + self.settings.labels_spacing)
                    .sum();
                (total, !self.row_heights.is_empty())
            }
            Orientation::Y => {
                let width = self
                    .ticks
                    .iter()
                    .filter_map(|tick| tick.labels.first())
                    .map(|label| label.text_size().width)
                    .fold(0.0, f64::max);
                (width, !self.ticks.is_empty())
            }
        };
        self.labels_extent = self
            .model
            .label_space_reservation
            .reserve(current, &self.presented);
        if has_labels {
            self.presented.record(current);
        }
    }

    fn row_y(row_heights: &[f64], row: usize, spacing: f64) -> f64 {
        row_heights[..row].iter().map(|height| height + spacing).sum()
    }

    fn place(&mut self) {
        let spacing = self.settings.labels_spacing;
        match self.edge.orientation() {
            Orientation::X => {
                let top = self.offset + self.x_labels_offset();
                for tick in &mut self.ticks {
                    let x = self.axis.screen_loc_for_scalar(tick.scalar);
                    tick.rects = tick
                        .labels
                        .iter()
                        .enumerate()
                        .map(|(row, label)| {
                            let size = label.text_size();
                            let y = top + Self::row_y(&self.row_heights, row, spacing);
                            Rect::from_origin_size((x - size.width / 2.0, y), size)
                        })
                        .collect();
                }

                let title_heights: SmallVec<[f64; 2]> = self
                    .model
                    .title_labels
                    .iter()
                    .map(|label| label.text_size().height)
                    .collect();
                let mid = self.axis.first_screen_init()
                    + (self.axis.last_screen_init() - self.axis.first_screen_init()) / 2.0;
                let top = self.offset + self.title_offset();
                self.title_rects = self
                    .model
                    .title_labels
                    .iter()
                    .enumerate()
                    .map(|(row, label)| {
                        let size = label.text_size();
                        let y = top + Self::row_y(&title_heights, row, spacing);
                        Rect::from_origin_size((mid - size.width / 2.0, y), size)
                    })
                    .collect();
            }
            Orientation::Y => {
                let left = self.offset + self.y_labels_offset();
                for tick in &mut self.ticks {
                    let y = self.axis.screen_loc_for_scalar(tick.scalar);
                    tick.rects = tick
                        .labels
                        .first()
                        .map(|label| {
                            let size = label.text_size();
                            let flush_right = match label.settings.text_alignment {
                                TextAlignment::Right => true,
                                TextAlignment::Left => false,
                                TextAlignment::Default => self.edge == AxisEdge::YLow,
                            };
                            let x = if flush_right {
                                left + self.labels_extent - size.width
                            } else {
                                left
                            };
                            Rect::from_origin_size((x, y - size.height / 2.0), size)
                        })
                        .into_iter()
                        .collect();
                }
                if let Some(solver) = &self.model.conflict_solver {
                    let mut rects: Vec<Rect> =
                        self.ticks.iter().filter_map(|tick| tick.rects.first().copied()).collect();
                    solver.solve_conflicts(&mut rects);
                    let placed = self.ticks.iter_mut().filter(|tick| !tick.rects.is_empty());
                    for (tick, rect) in placed.zip(rects) {
                        tick.rects[0] = rect;
                    }
                }

                let mid = self.axis.last_screen_init()
                    + (self.axis.first_screen_init() - self.axis.last_screen_init()) / 2.0;
                let x = self.offset + self.title_offset();
                self.title_rects = self
                    .model
                    .title_labels
                    .first()
                    .map(|label| {
                        let size = label.text_size();
                        Rect::from_origin_size((x, mid - size.height / 2.0), size)
                    })
                    .into_iter()
                    .collect();
            }
        }
    }

    fn relayout(&mut self, measurer: &dyn TextMeasurer) {
        self.measure(measurer);
        self.place();
    }

    /// Regenerates ticks and labels after the axis changed.
    ///
    /// If the frame changed size across the edge since the last update, low X and high Y layers
    /// move outwards by the difference so they keep hugging the inner frame, and the change is
    /// returned so the chart can shrink the inner frame and the neighbouring layers.
    pub fn update(&mut self, measurer: &dyn TextMeasurer) -> Option<FrameChange> {
        self.relayout(measurer);
        let frame = self.frame();
        let delta = match self.edge.orientation() {
            Orientation::X => frame.height() - self.last_frame.height(),
            Orientation::Y => frame.width() - self.last_frame.width(),
        };
        if approx_equal(delta, 0.0) {
            self.last_frame = frame;
            return None;
        }
        if matches!(self.edge, AxisEdge::XLow | AxisEdge::YHigh) {
            self.offset -= delta;
            self.place();
        }
        self.last_frame = self.frame();
        tracing::trace!(edge = ?self.edge, delta, "axis layer frame changed");
        Some(FrameChange {
            edge: self.edge,
            delta,
            frame: self.last_frame,
        })
    }

    /// Reacts to another layer changing size.
    ///
    /// Layers across the changed one shrink their axis; layers on the same edge further in
    /// move away from the edge.
    pub fn handle_frame_change(&mut self, change: &FrameChange, measurer: &dyn TextMeasurer) {
        let own = self.frame();
        let delta = change.delta;
        let moved = match (self.edge, change.edge) {
            (AxisEdge::XLow | AxisEdge::XHigh, AxisEdge::YLow) => {
                self.axis.offset_first_screen(delta);
                true
            }
            (AxisEdge::XLow | AxisEdge::XHigh, AxisEdge::YHigh) => {
                self.axis.offset_last_screen(-delta);
                true
            }
            (AxisEdge::YLow | AxisEdge::YHigh, AxisEdge::XLow) => {
                self.axis.offset_first_screen(-delta);
                true
            }
            (AxisEdge::YLow | AxisEdge::YHigh, AxisEdge::XHigh) => {
                self.axis.offset_last_screen(delta);
                true
            }
            (AxisEdge::XLow, AxisEdge::XLow) if change.frame.y1 > own.y1 => {
                self.offset -= delta;
                true
            }
            (AxisEdge::XHigh, AxisEdge::XHigh) if change.frame.y0 < own.y0 => {
                self.offset += delta;
                true
            }
            (AxisEdge::YLow, AxisEdge::YLow) if change.frame.x0 < own.x0 => {
                self.offset += delta;
                true
            }
            (AxisEdge::YHigh, AxisEdge::YHigh) if change.frame.x1 > own.x1 => {
                self.offset -= delta;
                true
            }
            _ => false,
        };
        if moved {
            self.relayout(measurer);
        }
    }

    /// Applies a zoom or pan step to the axis and regenerates the layer.
    pub fn process_zoom_pan(
        &mut self,
        delta: &ZoomPanDelta,
        elastic: bool,
        measurer: &dyn TextMeasurer,
    ) -> Option<FrameChange> {
        match *delta {
            ZoomPanDelta::Zoom {
                x,
                y,
                center_x,
                center_y,
            } => self.axis.zoom(x, y, center_x, center_y, elastic),
            ZoomPanDelta::ZoomAbsolute {
                scale_x,
                scale_y,
                center_x,
                center_y,
            } => self
                .axis
                .zoom_absolute(scale_x, scale_y, center_x, center_y, elastic),
            ZoomPanDelta::Pan { dx, dy } => self.axis.pan(dx, dy, elastic),
            ZoomPanDelta::KeepInBoundaries => self.axis.keep_in_boundaries(),
        }
        self.update(measurer)
    }

    /// Returns the tick whose label (grown by the tap margin) contains `point`.
    ///
    /// Taps outside the visible frame hit nothing.
    pub fn handle_tap(&self, point: Point) -> Option<&TickLabels> {
        if !self.visible_frame().contains(point) {
            return None;
        }
        let (dx, dy) = (self.tap_expand.width, self.tap_expand.height);
        self.ticks
            .iter()
            .find(|tick| tick.rects.iter().any(|rect| rect.inflate(dx, dy).contains(point)))
    }

    /// Placed titles: every row on X layers, the first one on Y layers.
    pub fn title_rects(&self) -> &[Rect] {
        &self.title_rects
    }

    /// Emits the line, labels and titles.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        if self.model.clip_contents {
            sink.push_clip(self.visible_frame());
        }
        if self.settings.is_axis_line_visible {
            sink.line(&LineSegment {
                line: self.line(),
                stroke: StrokeStyle::solid(
                    self.settings.line_color.clone(),
                    self.settings.axis_stroke_width,
                ),
            });
        }
        for tick in &self.ticks {
            for (label, rect) in tick.labels.iter().zip(&tick.rects) {
                emit_label(sink, label, *rect);
            }
        }
        for (label, rect) in self.model.title_labels.iter().zip(&self.title_rects) {
            emit_label(sink, label, *rect);
        }
        if self.model.clip_contents {
            sink.pop_clip();
        }
    }
}

fn emit_label(sink: &mut dyn RenderSink, label: &AxisLabel, bounds: Rect) {
    if label.hidden {
        return;
    }
    sink.label(&LabelPlacement {
        text: &label.text,
        rect: Rect::from_center_size(bounds.center(), label.text_size_non_rotated()),
        settings: &label.settings,
    });
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use graticule_text::FixedAdvanceMeasurer;

    use super::*;
    use crate::conflict::MoveUpDown;
    use crate::format::NumberFormat;
    use crate::label::LabelSettings;
    use crate::model::LabelSpaceReservation;
    use crate::render::recording::RecordingSink;
    use crate::value::AxisValue;

    // 10px per character, 20px line height.
    fn measurer() -> FixedAdvanceMeasurer {
        FixedAdvanceMeasurer::new(10.0, 20.0)
    }

    fn model(values: &[f64], title: &str) -> AxisModel {
        let m = measurer();
        let values: Vec<AxisValue> = values.iter().copied().map(AxisValue::number).collect();
        AxisModel::from_axis_values(&values, LabelSettings::default(), &NumberFormat::default())
            .unwrap()
            .with_title(AxisLabel::new(title, LabelSettings::default(), &m))
    }

    #[test]
    fn x_low_stacks_line_labels_title() {
        let m = measurer();
        let axis = Axis::x(0.0, 50.0, 100.0, 600.0).unwrap();
        let layer = AxisLayer::new(
            AxisEdge::XLow,
            axis,
            model(&[0.0, 10.0, 20.0, 30.0, 40.0, 50.0], "Predicted"),
            AxisSettings::default(),
            300.0,
            &m,
        );
        // One row of 20px plus 5px spacing; stroke 1, labels-to-axis 5, title spacing 5, title 20.
        assert_eq!(layer.labels_extent(), 25.0);
        assert_eq!(layer.frame(), Rect::new(100.0, 300.0, 600.0, 356.0));
        assert_eq!(layer.frame_without_labels().height(), 31.0);
        assert_eq!(layer.line(), Line::new((99.0, 300.5), (601.0, 300.5)));

        let first = &layer.ticks()[0];
        assert_eq!(first.rects[0], Rect::new(95.0, 306.0, 105.0, 326.0));
        // "Predicted" is 90px wide, centered on the axis, below labels and title spacing.
        assert_eq!(layer.title_rects()[0], Rect::new(305.0, 336.0, 395.0, 356.0));
        assert_eq!(layer.min_axis_screen_space(), Some(100.0));
    }

    #[test]
    fn x_high_puts_the_title_on_top() {
        let m = measurer();
        let axis = Axis::x(0.0, 50.0, 0.0, 500.0).unwrap();
        let layer = AxisLayer::new(
            AxisEdge::XHigh,
            axis,
            model(&[0.0, 50.0], "T"),
            AxisSettings::default(),
            0.0,
            &m,
        );
        assert_eq!(layer.title_rects()[0].y0, 0.0);
        assert_eq!(layer.ticks()[0].rects[0].y0, 25.0);
        // Title 20 + 5, labels 25, labels-to-axis 5, half stroke.
        assert_eq!(layer.line().p0.y, 55.5);
        assert_eq!(layer.frame().height(), 56.0);
    }

    #[test]
    fn y_low_right_aligns_labels_against_the_line() {
        let m = measurer();
        let axis = Axis::y(0.0, 100.0, 400.0, 0.0).unwrap();
        let layer = AxisLayer::new(
            AxisEdge::YLow,
            axis,
            model(&[0.0, 50.0, 100.0], "M").with_conflict_solver(MoveUpDown::new()),
            AxisSettings::default(),
            0.0,
            &m,
        );
        // Widest label "100" is 30px, title "M" is 10px wide.
        assert_eq!(layer.labels_extent(), 30.0);
        assert_eq!(layer.frame(), Rect::new(0.0, 0.0, 51.0, 400.0));
        let labels_left = 10.0 + 5.0;
        assert_eq!(layer.ticks()[0].rects[0], Rect::new(labels_left + 20.0, 390.0, 45.0, 410.0));
        assert_eq!(layer.ticks()[2].rects[0].x0, labels_left);
        assert_eq!(layer.line().p0.x, 50.5);
        assert_eq!(layer.title_rects()[0], Rect::new(0.0, 190.0, 10.0, 210.0));
    }

    #[test]
    fn y_high_left_aligns_labels() {
        let m = measurer();
        let axis = Axis::y(0.0, 100.0, 400.0, 0.0).unwrap();
        let layer = AxisLayer::new(
            AxisEdge::YHigh,
            axis,
            model(&[0.0, 100.0], "M"),
            AxisSettings::default(),
            500.0,
            &m,
        );
        assert_eq!(layer.line().p0.x, 500.5);
        assert_eq!(layer.ticks()[0].rects[0].x0, 506.0);
        assert_eq!(layer.title_rects()[0].x0, 506.0 + 30.0 + 5.0);
    }

    #[test]
    fn x_low_grows_upwards_when_rows_are_added() {
        let m = measurer();
        let labels = crate::labels::FnLabels::rows(LabelSettings::default(), |v| {
            if v > 50.0 {
                alloc::vec![String::from("a"), String::from("b")]
            } else {
                alloc::vec![String::from("a")]
            }
        });
        let model = AxisModel::new(
            0.0,
            100.0,
            crate::multiplier::MultiplierGenerator::new(25.0),
            labels,
        )
        .unwrap()
        .with_label_space_reservation(LabelSpaceReservation::Current);
        let axis = Axis::x(0.0, 100.0, 0.0, 400.0).unwrap();
        let mut layer = AxisLayer::new(AxisEdge::XLow, axis, model, AxisSettings::default(), 300.0, &m);
        assert_eq!(layer.labels_extent(), 50.0);

        // Zoomed into the left half, only single-row labels remain.
        let change = layer
            .process_zoom_pan(
                &ZoomPanDelta::Zoom {
                    x: 2.0,
                    y: 1.0,
                    center_x: 0.0,
                    center_y: 0.0,
                },
                false,
                &m,
            )
            .expect("the label block shrank");
        assert_eq!(change.delta, -25.0);
        assert_eq!(layer.offset(), 325.0);
        assert_eq!(layer.update(&m), None);
    }

    #[test]
    fn neighbours_react_to_frame_changes() {
        let m = measurer();
        let axis = Axis::x(0.0, 50.0, 100.0, 600.0).unwrap();
        let mut layer = AxisLayer::new(
            AxisEdge::XLow,
            axis,
            model(&[0.0, 50.0], "X"),
            AxisSettings::default(),
            300.0,
            &m,
        );
        let change = FrameChange {
            edge: AxisEdge::YLow,
            delta: 20.0,
            frame: Rect::new(0.0, 0.0, 120.0, 300.0),
        };
        layer.handle_frame_change(&change, &m);
        assert_eq!(layer.axis().first_screen(), 120.0);
        assert_eq!(layer.ticks()[0].rects[0].center().x, 120.0);

        // A taller X layer below pushes this one up.
        let below = FrameChange {
            edge: AxisEdge::XLow,
            delta: 10.0,
            frame: Rect::new(100.0, 356.0, 600.0, 420.0),
        };
        layer.handle_frame_change(&below, &m);
        assert_eq!(layer.offset(), 290.0);
    }

    #[test]
    fn taps_hit_expanded_labels_inside_the_visible_frame() {
        let m = measurer();
        let axis = Axis::x(0.0, 50.0, 0.0, 500.0).unwrap();
        let layer = AxisLayer::new(
            AxisEdge::XLow,
            axis,
            model(&[0.0, 10.0, 20.0, 30.0, 40.0, 50.0], "X"),
            AxisSettings::default(),
            0.0,
            &m,
        );
        // Label "10" spans 90..110 by 6..26.
        let hit = layer.handle_tap(Point::new(118.0, 30.0)).expect("within the tap margin");
        assert_eq!(hit.scalar, 10.0);
        assert!(layer.handle_tap(Point::new(150.0, 15.0)).is_none(), "between labels");
        assert!(layer.handle_tap(Point::new(-5.0, 15.0)).is_none(), "outside the frame");
    }

    #[test]
    fn render_emits_line_labels_and_titles() {
        let m = measurer();
        let axis = Axis::x(0.0, 50.0, 0.0, 500.0).unwrap();
        let values = [AxisValue::number(0.0), AxisValue::number(50.0).with_hidden(true)];
        let model =
            AxisModel::from_axis_values(&values, LabelSettings::default(), &NumberFormat::default())
                .unwrap()
                .with_title(AxisLabel::new("X", LabelSettings::default(), &m))
                .with_clip_contents(true);
        let layer = AxisLayer::new(AxisEdge::XLow, axis, model, AxisSettings::default(), 0.0, &m);
        let mut sink = RecordingSink::default();
        layer.render(&mut sink);
        assert_eq!(sink.lines.len(), 1);
        let texts: Vec<&str> = sink.labels.iter().map(|(text, _)| text.as_str()).collect();
        assert_eq!(texts, ["0", "X"]);
        assert_eq!(sink.clips, 1);

        let hidden_line = AxisLayer::new(
            AxisEdge::XLow,
            Axis::x(0.0, 50.0, 0.0, 500.0).unwrap(),
            AxisModel::from_axis_values(&values, LabelSettings::default(), &NumberFormat::default())
                .unwrap(),
            AxisSettings::default().with_axis_line_visible(false),
            0.0,
            &m,
        );
        let mut sink = RecordingSink::default();
        hidden_line.render(&mut sink);
        assert!(sink.lines.is_empty(), "line hidden");
    }
}
