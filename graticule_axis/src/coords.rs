// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate-space composition.
//!
//! [`CoordsSpace`] lays out the axes on all four edges of a chart and computes the inner frame
//! that is left for content.
//!
//! ```text
//!  ┌──────────────────────────────────────────┐
//!  │                   top                    │
//!  │   ┌────┬────────────────────────┬────┐   │
//!  │   │    │         X high         │    │   │
//!  │   ├────┼────────────────────────┼────┤   │
//!  │   │ Y  │                        │ Y  │   │
//!  │ ▶ │low │      inner frame       │high│ ◀ │
//!  │   │    │                        │    │   │
//!  │   ├────┼────────────────────────┼────┤   │
//!  │   │    │         X low          │    │   │
//!  │   └────┴────────────────────────┴────┘   │
//!  │                  bottom                  │
//!  └──────────────────────────────────────────┘
//! ```
//!
//! Axis sizes depend on the inner frame (tick density) and the inner frame depends on the axis
//! sizes, so every axis is built twice: probe layers on the chart area minus insets measure the
//! footprint of each edge, then the final layers are built on the resulting inner frame.

use alloc::vec::Vec;

use graticule_text::TextMeasurer;
use kurbo::{Rect, Size};

use crate::axis::{Axis, Orientation};
use crate::error::AxisResult;
use crate::layer::{AxisEdge, AxisLayer};
use crate::model::AxisModel;
use crate::settings::{AxisSettings, ChartSettings};

/// Axis layers on all four edges and the inner frame between them.
#[derive(Debug)]
pub struct CoordsSpace {
    settings: ChartSettings,
    chart_size: Size,
    inner_frame: Rect,
    layers: Vec<AxisLayer>,
}

impl CoordsSpace {
    /// Lays out the given axes on a chart of `chart_size`.
    ///
    /// Axes on one edge are stacked outer to inner in the order given. Fails if a model has an
    /// empty or non-finite range.
    pub fn new(
        settings: ChartSettings,
        chart_size: Size,
        y_low: Vec<AxisModel>,
        y_high: Vec<AxisModel>,
        x_low: Vec<AxisModel>,
        x_high: Vec<AxisModel>,
        measurer: &dyn TextMeasurer,
    ) -> AxisResult<Self> {
        let probe_frame = Rect::new(
            settings.leading,
            settings.top,
            chart_size.width - settings.trailing,
            chart_size.height - settings.bottom,
        );
        let (y_low, y_low_width) = probe(AxisEdge::YLow, y_low, probe_frame, &settings, measurer)?;
        let (y_high, y_high_width) =
            probe(AxisEdge::YHigh, y_high, probe_frame, &settings, measurer)?;
        let (x_low, x_low_height) = probe(AxisEdge::XLow, x_low, probe_frame, &settings, measurer)?;
        let (x_high, x_high_height) =
            probe(AxisEdge::XHigh, x_high, probe_frame, &settings, measurer)?;

        let inner_frame = Rect::new(
            settings.leading + y_low_width,
            settings.top + x_high_height,
            chart_size.width - settings.trailing - y_high_width,
            chart_size.height - settings.bottom - x_low_height,
        );
        tracing::debug!(?inner_frame, "chart inner frame");

        let mut layers = Vec::new();
        let edges = [
            (AxisEdge::YLow, y_low, settings.leading),
            (AxisEdge::YHigh, y_high, inner_frame.x1),
            (AxisEdge::XLow, x_low, inner_frame.y1),
            (AxisEdge::XHigh, x_high, settings.top),
        ];
        for (edge, models, offset) in edges {
            layers.extend(stack(edge, models, inner_frame, offset, &settings, measurer)?);
        }
        Ok(Self {
            settings,
            chart_size,
            inner_frame,
            layers,
        })
    }

    /// One Y axis on the left, one X axis at the bottom.
    pub fn left_bottom(
        settings: ChartSettings,
        chart_size: Size,
        x_model: AxisModel,
        y_model: AxisModel,
        measurer: &dyn TextMeasurer,
    ) -> AxisResult<Self> {
        Self::new(
            settings,
            chart_size,
            alloc::vec![y_model],
            Vec::new(),
            alloc::vec![x_model],
            Vec::new(),
            measurer,
        )
    }

    /// One Y axis on the left, one X axis at the top.
    pub fn left_top(
        settings: ChartSettings,
        chart_size: Size,
        x_model: AxisModel,
        y_model: AxisModel,
        measurer: &dyn TextMeasurer,
    ) -> AxisResult<Self> {
        Self::new(
            settings,
            chart_size,
            alloc::vec![y_model],
            Vec::new(),
            Vec::new(),
            alloc::vec![x_model],
            measurer,
        )
    }

    /// One Y axis on the right, one X axis at the bottom.
    pub fn right_bottom(
        settings: ChartSettings,
        chart_size: Size,
        x_model: AxisModel,
        y_model: AxisModel,
        measurer: &dyn TextMeasurer,
    ) -> AxisResult<Self> {
        Self::new(
            settings,
            chart_size,
            Vec::new(),
            alloc::vec![y_model],
            alloc::vec![x_model],
            Vec::new(),
            measurer,
        )
    }

    /// One Y axis on the right, one X axis at the top.
    pub fn right_top(
        settings: ChartSettings,
        chart_size: Size,
        x_model: AxisModel,
        y_model: AxisModel,
        measurer: &dyn TextMeasurer,
    ) -> AxisResult<Self> {
        Self::new(
            settings,
            chart_size,
            Vec::new(),
            alloc::vec![y_model],
            Vec::new(),
            alloc::vec![x_model],
            measurer,
        )
    }

    /// Chart settings used for the layout.
    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Total chart size.
    pub fn chart_size(&self) -> Size {
        self.chart_size
    }

    /// The area left for content.
    pub fn inner_frame(&self) -> Rect {
        self.inner_frame
    }

    /// All layers: low Y, high Y, low X, then high X, each outer to inner.
    pub fn layers(&self) -> &[AxisLayer] {
        &self.layers
    }

    /// The layers on one edge, outer to inner.
    pub fn layers_on(&self, edge: AxisEdge) -> impl Iterator<Item = &AxisLayer> {
        self.layers.iter().filter(move |layer| layer.edge() == edge)
    }

    /// The outermost layer on `edge`.
    pub fn first_layer(&self, edge: AxisEdge) -> Option<&AxisLayer> {
        self.layers_on(edge).next()
    }

    /// Splits into the inner frame and the layers.
    pub fn into_parts(self) -> (Rect, Vec<AxisLayer>) {
        (self.inner_frame, self.layers)
    }
}

/// Screen bounds of an axis on `edge` spanning `frame`: left to right for X, bottom to top for Y.
fn screen_bounds(edge: AxisEdge, frame: Rect) -> (f64, f64) {
    match edge.orientation() {
        Orientation::X => (frame.x0, frame.x1),
        Orientation::Y => (frame.y1, frame.y0),
    }
}

/// Builds the layer for one model: a probe axis to initialize the generator, then the final
/// axis padded from the labels of the boundary ticks.
fn build_layer(
    edge: AxisEdge,
    mut model: AxisModel,
    frame: Rect,
    offset: f64,
    settings: AxisSettings,
    measurer: &dyn TextMeasurer,
) -> AxisResult<AxisLayer> {
    let orientation = edge.orientation();
    let (first_screen, last_screen) = screen_bounds(edge, frame);
    let probe = Axis::new(orientation, model.first, model.last, first_screen, last_screen)?;
    model.values_generator.axis_initialized(&probe);
    let first = model.values_generator.first().unwrap_or(model.first);
    let last = model.values_generator.last().unwrap_or(model.last);
    let probe = Axis::new(orientation, first, last, first_screen, last_screen)?;

    let (leading, trailing) = (model.leading_padding, model.trailing_padding);
    let (first_half, last_half) = if leading.needs_label() || trailing.needs_label() {
        let values = model.values_generator.generate(&probe);
        let mut half_extent = |value: Option<&f64>| {
            value
                .and_then(|&value| {
                    let labels = model.labels_generator.generate(value, &probe, measurer);
                    labels.first().map(|label| {
                        let size = label.text_size();
                        match orientation {
                            Orientation::X => size.width / 2.0,
                            Orientation::Y => size.height / 2.0,
                        }
                    })
                })
                .unwrap_or(0.0)
        };
        (half_extent(values.first()), half_extent(values.last()))
    } else {
        (0.0, 0.0)
    };
    let padding_first = leading.resolve(first_half);
    let padding_last = trailing.resolve(last_half);
    tracing::trace!(?edge, padding_first, padding_last, "axis padding");

    let axis = Axis::new(orientation, first, last, first_screen, last_screen)?
        .with_padding(padding_first, padding_last);
    Ok(AxisLayer::new(edge, axis, model, settings, offset, measurer))
}

fn axis_settings(chart: &ChartSettings, model: &AxisModel) -> AxisSettings {
    AxisSettings::from_chart(chart).with_line_color(model.line_color.clone())
}

/// Measures the total footprint of an edge and gives the models back.
fn probe(
    edge: AxisEdge,
    models: Vec<AxisModel>,
    frame: Rect,
    chart: &ChartSettings,
    measurer: &dyn TextMeasurer,
) -> AxisResult<(Vec<AxisModel>, f64)> {
    let spacing = match edge.orientation() {
        Orientation::X => chart.spacing_between_axes_x,
        Orientation::Y => chart.spacing_between_axes_y,
    };
    let mut total = 0.0;
    let mut returned = Vec::with_capacity(models.len());
    for (i, model) in models.into_iter().enumerate() {
        let settings = axis_settings(chart, &model);
        let layer = build_layer(edge, model, frame, 0.0, settings, measurer)?;
        let frame = layer.frame();
        if i > 0 {
            total += spacing;
        }
        total += match edge.orientation() {
            Orientation::X => frame.height(),
            Orientation::Y => frame.width(),
        };
        returned.push(layer.into_model());
    }
    Ok((returned, total))
}

/// Builds the final layers of an edge, each offset by the previous one's footprint without
/// labels plus the spacing between axes.
fn stack(
    edge: AxisEdge,
    models: Vec<AxisModel>,
    inner_frame: Rect,
    mut offset: f64,
    chart: &ChartSettings,
    measurer: &dyn TextMeasurer,
) -> AxisResult<Vec<AxisLayer>> {
    let mut layers = Vec::with_capacity(models.len());
    for model in models {
        let settings = axis_settings(chart, &model);
        let layer = build_layer(edge, model, inner_frame, offset, settings, measurer)?;
        let footprint = layer.frame_without_labels();
        offset += match edge.orientation() {
            Orientation::X => footprint.height() + chart.spacing_between_axes_x,
            Orientation::Y => footprint.width() + chart.spacing_between_axes_y,
        };
        layers.push(layer);
    }
    Ok(layers)
}
