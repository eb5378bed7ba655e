// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter chart demo for `graticule_axis`.
//!
//! Lays out a chart, writes it to `scatter.svg`, replays a scripted pinch and fling, drains the
//! deferred inertia steps, and writes the result to `scatter_zoomed.svg`.
//!
//! Set `RUST_LOG=graticule_axis=debug` to trace layout and gesture handling.

mod svg;

use std::error::Error;

use graticule_axis::{
    AxisLabel, AxisModel, AxisValue, Chart, ChartDelegate, ChartPoint, ChartSettings, ChartTap,
    CoordsSpace, GestureEvent, GesturePhase, GuideLines, LabelSettings, ManualScheduler,
    NumberFormat, ScatterLayer, ZoomPanDelta, ZoomPanSettings,
};
use graticule_text::{FontWeight, HeuristicTextMeasurer, TextMeasurer, TextStyle};
use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;
use peniko::color::palette::css;
use tracing_subscriber::EnvFilter;

const CHART_SIZE: Size = Size::new(500.0, 400.0);

#[derive(Debug)]
struct LogDelegate;

impl ChartDelegate for LogDelegate {
    fn on_zoom(&mut self, scale_x: f64, scale_y: f64, _delta: &ZoomPanDelta) {
        tracing::info!(scale_x, scale_y, "zoomed");
    }

    fn on_tap(&mut self, tap: &ChartTap) {
        tracing::info!(
            x = tap.location.x,
            y = tap.location.y,
            points = tap.points.len(),
            labels = tap.axis_labels.len(),
            "tapped"
        );
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let measurer = HeuristicTextMeasurer;
    let mut chart = scatter_chart(&measurer)?;
    write_svg(&chart, "scatter.svg")?;

    let mut scheduler = ManualScheduler::new();
    let center = chart.inner_frame().center();
    let script = [
        GestureEvent::Pinch {
            phase: GesturePhase::Began,
            center,
            span: Vec2::new(120.0, 30.0),
            scale: 1.5,
        },
        GestureEvent::Pinch {
            phase: GesturePhase::Changed,
            center,
            span: Vec2::new(160.0, 30.0),
            scale: 1.2,
        },
        GestureEvent::Pinch {
            phase: GesturePhase::Ended,
            center,
            span: Vec2::new(160.0, 30.0),
            scale: 1.0,
        },
        GestureEvent::Pan {
            phase: GesturePhase::Began,
            translation: Vec2::ZERO,
            velocity: Vec2::ZERO,
        },
        GestureEvent::Pan {
            phase: GesturePhase::Changed,
            translation: Vec2::new(-30.0, 4.0),
            velocity: Vec2::ZERO,
        },
        GestureEvent::Pan {
            phase: GesturePhase::Ended,
            translation: Vec2::new(-30.0, 4.0),
            velocity: Vec2::new(-400.0, 20.0),
        },
    ];
    for event in &script {
        chart.handle_gesture(event, &mut scheduler, &measurer);
    }
    let mut steps = 0_usize;
    while let Some(step) = scheduler.pop() {
        chart.run_step(step, &mut scheduler, &measurer);
        steps += 1;
    }
    tracing::info!(steps, inner_frame = ?chart.inner_frame(), "gesture script done");

    chart.handle_tap(center);
    write_svg(&chart, "scatter_zoomed.svg")?;
    Ok(())
}

fn scatter_chart(measurer: &dyn TextMeasurer) -> Result<Chart, Box<dyn Error>> {
    let label_settings = LabelSettings::default();
    let title_settings = label_settings
        .clone()
        .with_style(TextStyle::new(16.0).with_weight(FontWeight::BOLD));
    let values: Vec<AxisValue> = (0..=5)
        .map(|i| AxisValue::number(f64::from(i) * 10.0))
        .collect();
    let format = NumberFormat::default();

    let x_model = AxisModel::from_axis_values(&values, label_settings.clone(), &format)?
        .with_title(AxisLabel::new("Measured", title_settings.clone(), measurer));
    let y_model = AxisModel::from_axis_values(&values, label_settings.clone(), &format)?
        .with_title(AxisLabel::new(
            "Predicted",
            title_settings.vertical(),
            measurer,
        ));

    let settings = ChartSettings::default()
        .with_insets(10.0, 10.0, 20.0, 10.0)
        .with_zoom_pan(
            ZoomPanSettings::enabled()
                .with_zoom_x(Some(1.0), Some(4.0))
                .with_zoom_y(Some(1.0), Some(4.0))
                .with_elastic(true),
        );
    let space = CoordsSpace::left_bottom(settings, CHART_SIZE, x_model, y_model, measurer)?;

    let points = [
        (2.0, 4.0),
        (7.5, 6.0),
        (12.0, 15.5),
        (18.0, 16.0),
        (21.0, 24.0),
        (26.5, 25.0),
        (31.0, 33.0),
        (37.0, 35.5),
        (41.0, 40.0),
        (46.0, 49.0),
    ]
    .into_iter()
    .map(|(x, y)| ChartPoint::from_scalars(x, y))
    .collect();

    let chart = Chart::new(space, measurer)?
        .with_guide_lines(GuideLines::dotted(css::GRAY, 0.5, 2.0, 2.0))
        .with_scatter(ScatterLayer::new(
            points,
            Size::new(7.0, 7.0),
            Color::from_rgb8(0x1f, 0x77, 0xb4),
        ))
        .with_delegate(LogDelegate);
    Ok(chart)
}

fn write_svg(chart: &Chart, path: &str) -> std::io::Result<()> {
    let mut sink = svg::SvgSink::new(Rect::from_origin_size(Point::ZERO, CHART_SIZE));
    chart.render(&mut sink);
    std::fs::write(path, sink.into_svg_string())?;
    println!("wrote {path}");
    Ok(())
}
