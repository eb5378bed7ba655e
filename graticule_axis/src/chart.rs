// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A laid-out chart that reacts to gestures.
//!
//! [`Chart`] ties a [`CoordsSpace`] to a [`ZoomPanController`]: every delta the controller
//! produces is replayed on all axis layers, and when a layer grows or shrinks the other layers
//! and the inner frame are adjusted so the axes keep meeting at the corners.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use graticule_text::TextMeasurer;
use kurbo::{Point, Rect};

use crate::axis::Orientation;
use crate::content::{GuideLines, ScatterLayer, TappedPoint};
use crate::coords::CoordsSpace;
use crate::error::AxisResult;
use crate::layer::{AxisEdge, AxisLayer, FrameChange};
use crate::render::RenderSink;
use crate::schedule::{ScheduledStep, Scheduler};
use crate::settings::ChartSettings;
use crate::zoom_pan::{GestureEvent, ZoomPanController, ZoomPanDelta};

/// Everything a tap hit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartTap {
    /// Tap location.
    pub location: Point,
    /// Axis labels hit, as the edge of their layer and the tick value.
    pub axis_labels: Vec<(AxisEdge, f64)>,
    /// Scatter points hit, as the index of their layer and the hit.
    pub points: Vec<(usize, TappedPoint)>,
}

impl ChartTap {
    /// Returns `true` if nothing was hit.
    pub fn is_empty(&self) -> bool {
        self.axis_labels.is_empty() && self.points.is_empty()
    }
}

/// Observes a chart. Every method defaults to doing nothing.
pub trait ChartDelegate {
    /// The chart zoomed. Scales are relative to the unzoomed content.
    fn on_zoom(&mut self, _scale_x: f64, _scale_y: f64, _delta: &ZoomPanDelta) {}

    /// The chart panned.
    fn on_pan(&mut self, _dx: f64, _dy: f64) {}

    /// The chart was tapped.
    fn on_tap(&mut self, _tap: &ChartTap) {}
}

/// Axes, content and gesture handling for one chart.
pub struct Chart {
    settings: ChartSettings,
    inner_frame: Rect,
    layers: Vec<AxisLayer>,
    scatter: Vec<ScatterLayer>,
    guide_lines: Option<GuideLines>,
    controller: ZoomPanController,
    delegate: Option<Box<dyn ChartDelegate>>,
}

impl fmt::Debug for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chart")
            .field("settings", &self.settings)
            .field("inner_frame", &self.inner_frame)
            .field("layers", &self.layers)
            .field("scatter", &self.scatter)
            .field("guide_lines", &self.guide_lines)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl Chart {
    /// Creates a chart from a laid-out coordinate space.
    ///
    /// If a minimum zoom is configured the chart starts zoomed to it. Fails if a zoom range is
    /// inverted.
    pub fn new(space: CoordsSpace, measurer: &dyn TextMeasurer) -> AxisResult<Self> {
        let settings = *space.settings();
        let (inner_frame, layers) = space.into_parts();
        let controller = ZoomPanController::new(settings.zoom_pan, inner_frame)?;
        let mut chart = Self {
            settings,
            inner_frame,
            layers,
            scatter: Vec::new(),
            guide_lines: None,
            controller,
            delegate: None,
        };
        if let Some(delta) = chart.controller.initial_zoom() {
            chart.apply(&delta, settings.zoom_pan.elastic, measurer);
        }
        Ok(chart)
    }

    /// Adds a scatter layer.
    #[must_use]
    pub fn with_scatter(mut self, layer: ScatterLayer) -> Self {
        self.scatter.push(layer);
        self
    }

    /// Draws guide lines behind the content.
    #[must_use]
    pub fn with_guide_lines(mut self, guide_lines: GuideLines) -> Self {
        self.guide_lines = Some(guide_lines);
        self
    }

    /// Sets the observer.
    #[must_use]
    pub fn with_delegate(mut self, delegate: impl ChartDelegate + 'static) -> Self {
        self.delegate = Some(Box::new(delegate));
        self
    }

    /// Chart settings.
    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// The area left for content.
    pub fn inner_frame(&self) -> Rect {
        self.inner_frame
    }

    /// All axis layers.
    pub fn layers(&self) -> &[AxisLayer] {
        &self.layers
    }

    /// Scatter layers, in drawing order.
    pub fn scatter_layers(&self) -> &[ScatterLayer] {
        &self.scatter
    }

    /// The gesture state machine.
    pub fn controller(&self) -> &ZoomPanController {
        &self.controller
    }

    /// The first X and first Y layer: the axes content is placed through.
    pub fn content_axes(&self) -> Option<(&AxisLayer, &AxisLayer)> {
        let x = self
            .layers
            .iter()
            .find(|layer| layer.edge().orientation() == Orientation::X)?;
        let y = self
            .layers
            .iter()
            .find(|layer| layer.edge().orientation() == Orientation::Y)?;
        Some((x, y))
    }

    /// Feeds a gesture event through the controller and applies the result.
    pub fn handle_gesture(
        &mut self,
        event: &GestureEvent,
        scheduler: &mut dyn Scheduler,
        measurer: &dyn TextMeasurer,
    ) {
        if let GestureEvent::Tap { location } = *event {
            self.handle_tap(location);
            return;
        }
        let deltas = self.controller.handle(event, scheduler);
        self.apply_all(&deltas, self.settings.zoom_pan.elastic, measurer);
    }

    /// Runs a deferred step from the scheduler.
    pub fn run_step(
        &mut self,
        step: ScheduledStep,
        scheduler: &mut dyn Scheduler,
        measurer: &dyn TextMeasurer,
    ) {
        let deltas = self.controller.run_step(step, scheduler);
        self.apply_all(&deltas, self.settings.zoom_pan.elastic, measurer);
    }

    /// Zooms by `x`/`y` around `anchor` (0 to 1 across the inner frame).
    pub fn zoom(&mut self, x: f64, y: f64, anchor_x: f64, anchor_y: f64, measurer: &dyn TextMeasurer) {
        let delta = self.controller.zoom(x, y, anchor_x, anchor_y);
        self.apply_all(&[delta], self.settings.zoom_pan.elastic, measurer);
    }

    /// Zooms to absolute scales around `anchor`.
    pub fn zoom_absolute(
        &mut self,
        scale_x: f64,
        scale_y: f64,
        anchor_x: f64,
        anchor_y: f64,
        measurer: &dyn TextMeasurer,
    ) {
        let delta = self
            .controller
            .zoom_absolute(scale_x, scale_y, anchor_x, anchor_y);
        self.apply_all(&[delta], self.settings.zoom_pan.elastic, measurer);
    }

    /// Pans by a screen delta.
    pub fn pan(&mut self, dx: f64, dy: f64, measurer: &dyn TextMeasurer) {
        let delta = self.controller.pan(dx, dy);
        self.apply_all(&[delta], self.settings.zoom_pan.elastic, measurer);
    }

    /// Returns to the minimum zoom at the origin.
    pub fn reset_pan_zoom(&mut self, measurer: &dyn TextMeasurer) {
        let deltas = self.controller.reset_pan_zoom();
        self.apply_all(&deltas, false, measurer);
    }

    fn apply_all(&mut self, deltas: &[ZoomPanDelta], elastic: bool, measurer: &dyn TextMeasurer) {
        for delta in deltas {
            self.apply(delta, elastic, measurer);
            self.notify(delta);
        }
    }

    fn notify(&mut self, delta: &ZoomPanDelta) {
        let Some(delegate) = self.delegate.as_mut() else {
            return;
        };
        match *delta {
            ZoomPanDelta::Pan { dx, dy } => delegate.on_pan(dx, dy),
            ZoomPanDelta::KeepInBoundaries => {}
            ZoomPanDelta::Zoom { .. } | ZoomPanDelta::ZoomAbsolute { .. } => {
                let transform = self.controller.transform();
                delegate.on_zoom(transform.scale_x(), transform.scale_y(), delta);
            }
        }
    }

    /// Replays `delta` on every axis layer, propagating frame changes as they happen.
    pub fn apply(&mut self, delta: &ZoomPanDelta, elastic: bool, measurer: &dyn TextMeasurer) {
        for i in 0..self.layers.len() {
            if let Some(change) = self.layers[i].process_zoom_pan(delta, elastic, measurer) {
                self.propagate(i, &change, measurer);
            }
        }
    }

    /// Re-measures every layer and propagates size changes. Call after changing label content.
    pub fn update(&mut self, measurer: &dyn TextMeasurer) {
        for i in 0..self.layers.len() {
            if let Some(change) = self.layers[i].update(measurer) {
                self.propagate(i, &change, measurer);
            }
        }
    }

    fn propagate(&mut self, source: usize, change: &FrameChange, measurer: &dyn TextMeasurer) {
        for (i, layer) in self.layers.iter_mut().enumerate() {
            if i != source {
                layer.handle_frame_change(change, measurer);
            }
        }
        let d = change.delta;
        let (left, top, right, bottom) = match change.edge {
            AxisEdge::YLow => (d, 0.0, 0.0, 0.0),
            AxisEdge::YHigh => (0.0, 0.0, d, 0.0),
            AxisEdge::XLow => (0.0, 0.0, 0.0, d),
            AxisEdge::XHigh => (0.0, d, 0.0, 0.0),
        };
        let f = self.inner_frame;
        self.inner_frame = Rect::new(f.x0 + left, f.y0 + top, f.x1 - right, f.y1 - bottom);
        self.controller.inset_container(left, top, right, bottom);
        tracing::debug!(inner_frame = ?self.inner_frame, edge = ?change.edge, "inner frame changed");
    }

    /// Hit-tests axis labels and scatter points, and tells the delegate.
    pub fn handle_tap(&mut self, location: Point) -> ChartTap {
        let axis_labels = self
            .layers
            .iter()
            .filter_map(|layer| {
                layer
                    .handle_tap(location)
                    .map(|tick| (layer.edge(), tick.scalar))
            })
            .collect();
        let points = match self.content_axes() {
            Some((x, y)) => self
                .scatter
                .iter()
                .enumerate()
                .flat_map(|(i, layer)| {
                    layer
                        .handle_tap(location, x.axis(), y.axis())
                        .into_iter()
                        .map(move |hit| (i, hit))
                })
                .collect(),
            None => Vec::new(),
        };
        let tap = ChartTap {
            location,
            axis_labels,
            points,
        };
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.on_tap(&tap);
        }
        tap
    }

    /// Emits the axes, then the guide lines and content clipped to the inner frame.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        for layer in &self.layers {
            layer.render(sink);
        }
        let Some((x, y)) = self.content_axes() else {
            return;
        };
        sink.push_clip(self.inner_frame);
        if let Some(guide_lines) = &self.guide_lines {
            guide_lines.render(x, y, self.inner_frame, sink);
        }
        for layer in &self.scatter {
            layer.render(x.axis(), y.axis(), sink);
        }
        sink.pop_clip();
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use core::cell::RefCell;

    use graticule_text::FixedAdvanceMeasurer;
    use kurbo::{Size, Vec2};
    use peniko::color::palette::css;

    use super::*;
    use crate::format::NumberFormat;
    use crate::label::LabelSettings;
    use crate::labels::FnLabels;
    use crate::model::{AxisModel, LabelSpaceReservation};
    use crate::multiplier::MultiplierGenerator;
    use crate::render::recording::RecordingSink;
    use crate::schedule::ManualScheduler;
    use crate::settings::ZoomPanSettings;
    use crate::value::{AxisValue, ChartPoint};
    use crate::zoom_pan::GesturePhase;

    // 10px per character, 20px line height.
    fn measurer() -> FixedAdvanceMeasurer {
        FixedAdvanceMeasurer::new(10.0, 20.0)
    }

    fn steps_of_ten() -> AxisModel {
        let values: Vec<AxisValue> =
            (0..=5).map(|i| AxisValue::number(f64::from(i) * 10.0)).collect();
        AxisModel::from_axis_values(&values, LabelSettings::default(), &NumberFormat::default())
            .unwrap()
    }

    fn chart(x_model: AxisModel, zoom_pan: ZoomPanSettings) -> Chart {
        let m = measurer();
        let settings = ChartSettings::default().with_zoom_pan(zoom_pan);
        let space =
            CoordsSpace::left_bottom(settings, Size::new(500.0, 400.0), x_model, steps_of_ten(), &m)
                .unwrap();
        Chart::new(space, &m).unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        zooms: Vec<(f64, f64)>,
        pans: Vec<(f64, f64)>,
        taps: usize,
    }

    struct Shared(Rc<RefCell<Recorder>>);

    impl ChartDelegate for Shared {
        fn on_zoom(&mut self, scale_x: f64, scale_y: f64, _delta: &ZoomPanDelta) {
            self.0.borrow_mut().zooms.push((scale_x, scale_y));
        }

        fn on_pan(&mut self, dx: f64, dy: f64) {
            self.0.borrow_mut().pans.push((dx, dy));
        }

        fn on_tap(&mut self, _tap: &ChartTap) {
            self.0.borrow_mut().taps += 1;
        }
    }

    #[test]
    fn shrinking_x_labels_grow_the_inner_frame() {
        let m = measurer();
        let labels = FnLabels::rows(LabelSettings::default(), |v| {
            if v > 50.0 {
                alloc::vec![String::from("a"), String::from("b")]
            } else {
                alloc::vec![String::from("a")]
            }
        });
        let x_model = AxisModel::new(0.0, 100.0, MultiplierGenerator::new(25.0), labels)
            .unwrap()
            .with_label_space_reservation(LabelSpaceReservation::Current);
        let mut chart = chart(x_model, ZoomPanSettings::enabled());
        // Labels past 50 take two rows.
        assert_eq!(chart.inner_frame(), Rect::new(31.0, 0.0, 500.0, 339.0));

        chart.zoom(2.0, 1.0, 0.0, 0.0, &m);
        assert_eq!(chart.inner_frame(), Rect::new(31.0, 0.0, 500.0, 364.0));
        let (x, y) = chart.content_axes().unwrap();
        assert_eq!(x.offset(), 364.0);
        assert_eq!(y.axis().first_screen(), 364.0);
        assert_eq!(chart.controller().transform().container(), chart.inner_frame());
    }

    #[test]
    fn zoom_pan_then_reset_restores_the_axes() {
        let m = measurer();
        let mut chart = chart(steps_of_ten(), ZoomPanSettings::enabled());
        chart.zoom(2.0, 2.0, 0.5, 0.5, &m);
        chart.pan(-50.0, 30.0, &m);
        let (x, _) = chart.content_axes().unwrap();
        assert!((x.axis().zoom_factor() - 2.0).abs() < 1e-9, "zoomed");
        assert!(
            x.axis().first_visible_screen() >= x.axis().first_screen_init()
                && x.axis().last_visible_screen() <= x.axis().last_screen_init(),
            "window stays inside the initial bounds"
        );

        chart.reset_pan_zoom(&m);
        for layer in chart.layers() {
            let axis = layer.axis();
            assert!(
                (axis.first_screen() - axis.first_screen_init()).abs() < 1e-6
                    && (axis.last_screen() - axis.last_screen_init()).abs() < 1e-6,
                "{:?} back at init: {axis:?}",
                layer.edge()
            );
        }
    }

    #[test]
    fn gestures_reach_the_axes_and_the_delegate() {
        let m = measurer();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut chart = chart(steps_of_ten(), ZoomPanSettings::enabled())
            .with_scatter(ScatterLayer::new(
                alloc::vec![ChartPoint::from_scalars(25.0, 30.0)],
                Size::new(7.0, 7.0),
                css::BLUE,
            ))
            .with_guide_lines(GuideLines::default())
            .with_delegate(Shared(Rc::clone(&recorder)));
        let mut scheduler = ManualScheduler::new();
        let center = chart.inner_frame().center();
        chart.handle_gesture(
            &GestureEvent::Pinch {
                phase: GesturePhase::Began,
                center,
                span: Vec2::new(100.0, 10.0),
                scale: 2.0,
            },
            &mut scheduler,
            &m,
        );
        let (x, y) = chart.content_axes().unwrap();
        assert!((x.axis().zoom_factor() - 2.0).abs() < 1e-9, "X zoomed");
        assert!((y.axis().zoom_factor() - 1.0).abs() < 1e-9, "Y untouched");
        {
            let zooms = &recorder.borrow().zooms;
            assert_eq!(zooms.len(), 1);
            assert!((zooms[0].0 - 2.0).abs() < 1e-9 && (zooms[0].1 - 1.0).abs() < 1e-9);
        }

        for (phase, tx) in [(GesturePhase::Began, 0.0), (GesturePhase::Changed, -20.0)] {
            chart.handle_gesture(
                &GestureEvent::Pan {
                    phase,
                    translation: Vec2::new(tx, 0.0),
                    velocity: Vec2::ZERO,
                },
                &mut scheduler,
                &m,
            );
        }
        assert_eq!(recorder.borrow().pans, [(-20.0, 0.0)]);

        let point = ScatterLayer::screen_loc(
            &chart.scatter_layers()[0].points()[0],
            chart.content_axes().unwrap().0.axis(),
            chart.content_axes().unwrap().1.axis(),
        );
        chart.handle_gesture(&GestureEvent::Tap { location: point }, &mut scheduler, &m);
        assert_eq!(recorder.borrow().taps, 1);
        let tap = chart.handle_tap(point);
        assert_eq!(tap.points.len(), 1);
        assert!(tap.axis_labels.is_empty(), "no label near the point");

        let mut sink = RecordingSink::default();
        chart.render(&mut sink);
        assert_eq!(sink.circles.len(), 1);
        assert_eq!(sink.clips, 1);
    }

    #[test]
    fn minimum_zoom_applies_at_start() {
        let settings = ZoomPanSettings::enabled().with_zoom_x(Some(2.0), None);
        let chart = chart(steps_of_ten(), settings);
        let (x, y) = chart.content_axes().unwrap();
        assert!((x.axis().zoom_factor() - 2.0).abs() < 1e-9, "starts at the minimum");
        assert!(
            (x.axis().first_screen() - x.axis().first_screen_init()).abs() < 1e-6,
            "anchored left"
        );
        assert!((y.axis().zoom_factor() - 1.0).abs() < 1e-9, "Y unchanged");
    }
}
