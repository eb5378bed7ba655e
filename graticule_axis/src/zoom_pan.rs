// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture-driven zoom and pan.
//!
//! A [`ContentTransform`] tracks the zoomed and panned content rectangle inside its container
//! (the chart's inner frame). The [`ZoomPanController`] turns raw gesture events into
//! [`ZoomPanDelta`]s, applies them to the transform, and returns them so the caller can replay
//! them on every axis layer.
//!
//! Inertia after a pan and the elastic snap-back after an overshooting gesture run as chains of
//! [`ScheduledStep`]s. Each chain is tagged with the gesture generation that started it and is
//! capped at [`ZoomPanSettings::correction_cap`] steps, after which one uncapped correction is
//! applied.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use crate::approx::approx_equal_eps;
use crate::error::AxisResult;
use crate::schedule::{ScheduledStep, Scheduler, StepKind};
use crate::settings::{GestureMode, ZoomPanSettings};

// Scales accumulate rounding error over many gesture steps.
const SCALE_TOLERANCE: f64 = 1e-9;

/// A change to replay on the axis layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomPanDelta {
    /// Multiply the current scale by `x`/`y` around a screen point.
    Zoom {
        /// Horizontal factor.
        x: f64,
        /// Vertical factor.
        y: f64,
        /// Anchor, horizontal screen coordinate.
        center_x: f64,
        /// Anchor, vertical screen coordinate.
        center_y: f64,
    },
    /// Set the scale to `scale_x`/`scale_y` around a screen point.
    ZoomAbsolute {
        /// Horizontal scale.
        scale_x: f64,
        /// Vertical scale.
        scale_y: f64,
        /// Anchor, horizontal screen coordinate.
        center_x: f64,
        /// Anchor, vertical screen coordinate.
        center_y: f64,
    },
    /// Translate by a screen delta.
    Pan {
        /// Horizontal delta.
        dx: f64,
        /// Vertical delta.
        dy: f64,
    },
    /// Clamp back into the initial bounds.
    KeepInBoundaries,
}

impl ZoomPanDelta {
    fn zoom(x: f64, y: f64, center: Point) -> Self {
        Self::Zoom {
            x,
            y,
            center_x: center.x,
            center_y: center.y,
        }
    }
}

/// The content rectangle of a zoomable chart relative to its container.
///
/// `content` is in container-local coordinates: at scale 1 and no pan it equals
/// `(0, 0, container.width, container.height)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentTransform {
    container: Rect,
    content: Rect,
}

impl ContentTransform {
    /// An unzoomed, unpanned transform for `container`.
    pub fn new(container: Rect) -> Self {
        Self {
            container,
            content: Rect::from_origin_size(Point::ZERO, container.size()),
        }
    }

    /// The container in screen coordinates.
    pub fn container(&self) -> Rect {
        self.container
    }

    /// The content in container-local coordinates.
    pub fn content(&self) -> Rect {
        self.content
    }

    /// Horizontal scale relative to the container.
    pub fn scale_x(&self) -> f64 {
        ratio(self.content.width(), self.container.width())
    }

    /// Vertical scale relative to the container.
    pub fn scale_y(&self) -> f64 {
        ratio(self.content.height(), self.container.height())
    }

    /// Screen point at `anchor` (0 to 1 on each side) of the container, shifted by the pan.
    pub fn center_at(&self, anchor_x: f64, anchor_y: f64) -> Point {
        Point::new(
            self.container.x0 + self.content.x0 + self.container.width() * anchor_x,
            self.container.y0 + self.content.y0 + self.container.height() * anchor_y,
        )
    }

    fn to_local(&self, center: Point) -> Point {
        Point::new(center.x - self.container.x0, center.y - self.container.y0)
    }

    fn scale_by(&mut self, fx: f64, fy: f64, center: Point, elastic: bool) {
        let local = self.to_local(center);
        let c = self.content;
        self.content = Rect::new(
            local.x - (local.x - c.x0) * fx,
            local.y - (local.y - c.y0) * fy,
            local.x + (c.x1 - local.x) * fx,
            local.y + (c.y1 - local.y) * fy,
        );
        if !elastic {
            self.keep_in_boundaries();
        }
    }

    /// Zooms incrementally around a screen point and returns the factors the axes should apply.
    ///
    /// Without elasticity the factors are limited to the configured scale range, and the
    /// content never shrinks below the container.
    pub fn zoom(&mut self, x: f64, y: f64, center: Point, settings: &ZoomPanSettings) -> (f64, f64) {
        let (dx, dy) = if settings.elastic {
            (x, y)
        } else {
            (
                clamp_delta(x, self.scale_x(), settings.min_zoom_x, settings.max_zoom_x),
                clamp_delta(y, self.scale_y(), settings.min_zoom_y, settings.max_zoom_y),
            )
        };
        let (fx, fy) = if settings.elastic {
            (dx, dy)
        } else {
            (
                dx.max(ratio(self.container.width(), self.content.width())),
                dy.max(ratio(self.container.height(), self.content.height())),
            )
        };
        self.scale_by(fx, fy, center, settings.elastic);
        (dx, dy)
    }

    /// Zooms to absolute scales, limited to the configured range. Returns the applied scales.
    pub fn zoom_absolute(
        &mut self,
        scale_x: f64,
        scale_y: f64,
        center: Point,
        settings: &ZoomPanSettings,
    ) -> (f64, f64) {
        let sx = clamp_scale(scale_x, settings.min_zoom_x, settings.max_zoom_x);
        let sy = clamp_scale(scale_y, settings.min_zoom_y, settings.max_zoom_y);
        let fx = ratio(sx * self.container.width(), self.content.width());
        let fy = ratio(sy * self.container.height(), self.content.height());
        self.scale_by(fx, fy, center, settings.elastic);
        (sx, sy)
    }

    /// Translates the content. Without elasticity the content keeps covering the container.
    pub fn pan(&mut self, dx: f64, dy: f64, elastic: bool) {
        let c = self.content;
        let (x0, y0) = if elastic {
            (c.x0 + dx, c.y0 + dy)
        } else {
            (
                (self.container.width() - c.width()).max((c.x0 + dx).min(0.0)),
                (self.container.height() - c.height()).max((c.y0 + dy).min(0.0)),
            )
        };
        self.content = Rect::from_origin_size((x0, y0), c.size());
    }

    /// Shifts the content so it covers the container wherever it is large enough to.
    pub fn keep_in_boundaries(&mut self) {
        let mut shift = Vec2::ZERO;
        let c = self.content;
        if c.y0 > 0.0 {
            shift.y -= c.y0;
        }
        if c.y1 + shift.y < self.container.height() {
            shift.y += self.container.height() - (c.y1 + shift.y);
        }
        if c.x0 > 0.0 {
            shift.x -= c.x0;
        }
        if c.x1 + shift.x < self.container.width() {
            shift.x += self.container.width() - (c.x1 + shift.x);
        }
        self.content = c + shift;
    }

    /// Shrinks the container after the axes took more room. The content keeps its origin and
    /// loses the same amount.
    pub fn inset_container(&mut self, left: f64, top: f64, right: f64, bottom: f64) {
        let c = self.container;
        self.container = Rect::new(c.x0 + left, c.y0 + top, c.x1 - right, c.y1 - bottom);
        let size = self.content.size();
        self.content = Rect::from_origin_size(
            self.content.origin(),
            (size.width - (left + right), size.height - (top + bottom)),
        );
    }

    /// Maps a point in unzoomed container-local coordinates to the screen.
    pub fn to_screen(&self, local: Point) -> Point {
        Point::new(
            self.container.x0 + self.content.x0 + local.x * self.scale_x(),
            self.container.y0 + self.content.y0 + local.y * self.scale_y(),
        )
    }

    fn pan_correction(&self, limit: Option<f64>) -> Vec2 {
        let c = self.content;
        let axis = |min: f64, max: f64, container: f64| -> f64 {
            let offset = max - container;
            let value = if min > 0.0 {
                limit.map_or(-min, |limit| (-limit).max(-min))
            } else if offset < 0.0 {
                limit.map_or(-offset, |limit| limit.min(-offset))
            } else {
                0.0
            };
            if approx_equal_eps(value, 0.0, SCALE_TOLERANCE) {
                0.0
            } else {
                value
            }
        };
        Vec2::new(
            axis(c.x0, c.x1, self.container.width()),
            axis(c.y0, c.y1, self.container.height()),
        )
    }

    fn zoom_correction(&self, settings: &ZoomPanSettings, limit: Option<f64>) -> (f64, f64) {
        let axis = |scale: f64, min: Option<f64>| -> f64 {
            let min = min.unwrap_or(1.0);
            if scale < min && !approx_equal_eps(scale, min, SCALE_TOLERANCE) {
                let full = min / scale;
                limit.map_or(full, |limit| (1.0 + limit).min(full))
            } else {
                1.0
            }
        };
        (
            axis(self.scale_x(), settings.min_zoom_x),
            axis(self.scale_y(), settings.min_zoom_y),
        )
    }
}

fn ratio(a: f64, b: f64) -> f64 {
    if b == 0.0 { 1.0 } else { a / b }
}

fn clamp_delta(delta: f64, scale: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let delta = min.map_or(delta, |min| delta.max(min / scale));
    max.map_or(delta, |max| delta.min(max / scale))
}

fn clamp_scale(scale: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let scale = min.map_or(scale, |min| scale.max(min));
    max.map_or(scale, |max| scale.min(max))
}

/// Lifecycle phase of a continuous gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// The gesture was recognized.
    Began,
    /// The gesture moved.
    Changed,
    /// The fingers lifted.
    Ended,
    /// The platform aborted the gesture.
    Cancelled,
}

/// A platform gesture, already reduced to what the controller needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// Two-finger pinch.
    Pinch {
        /// Lifecycle phase.
        phase: GesturePhase,
        /// Midpoint of the touches, in screen coordinates.
        center: Point,
        /// Absolute distance between the touches along each dimension.
        span: Vec2,
        /// Scale change since the previous event.
        scale: f64,
    },
    /// One-finger drag.
    Pan {
        /// Lifecycle phase.
        phase: GesturePhase,
        /// Cumulative translation since the gesture began.
        translation: Vec2,
        /// Release velocity, in screen units per second.
        velocity: Vec2,
    },
    /// Single tap.
    Tap {
        /// Tap location, in screen coordinates.
        location: Point,
    },
}

/// What the controller is doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// No gesture or deferred step is active.
    #[default]
    Idle,
    /// A pinch is in progress.
    Pinching,
    /// A pan is in progress.
    Panning,
    /// Inertia is running after a pan.
    Decelerating,
    /// Content is snapping back into bounds.
    Correcting,
}

/// Turns gestures into zoom and pan deltas.
#[derive(Clone, Debug)]
pub struct ZoomPanController {
    settings: ZoomPanSettings,
    transform: ContentTransform,
    state: GestureState,
    generation: u64,
    pinch_center: Option<Point>,
    pan_x_locked: Option<bool>,
    last_translation: Option<Vec2>,
}

impl ZoomPanController {
    /// Creates a controller for content filling `container`.
    ///
    /// Returns an error if a zoom range is inverted.
    pub fn new(settings: ZoomPanSettings, container: Rect) -> AxisResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            transform: ContentTransform::new(container),
            state: GestureState::Idle,
            generation: 0,
            pinch_center: None,
            pan_x_locked: None,
            last_translation: None,
        })
    }

    /// Gesture settings.
    pub fn settings(&self) -> &ZoomPanSettings {
        &self.settings
    }

    /// The content transform.
    pub fn transform(&self) -> &ContentTransform {
        &self.transform
    }

    /// Shrinks the container. See [`ContentTransform::inset_container`].
    pub fn inset_container(&mut self, left: f64, top: f64, right: f64, bottom: f64) {
        self.transform.inset_container(left, top, right, bottom);
    }

    /// Current state.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Gesture generation. Deferred steps from older generations are ignored.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Zooms to the configured minimum scale, anchored at the top left, if one is set.
    pub fn initial_zoom(&mut self) -> Option<ZoomPanDelta> {
        if self.settings.min_zoom_x.is_none() && self.settings.min_zoom_y.is_none() {
            return None;
        }
        let scale_x = self.settings.min_zoom_x.unwrap_or(1.0);
        let scale_y = self.settings.min_zoom_y.unwrap_or(1.0);
        Some(self.zoom_absolute_at(scale_x, scale_y, 0.0, 0.0))
    }

    fn zoom_absolute_at(
        &mut self,
        scale_x: f64,
        scale_y: f64,
        anchor_x: f64,
        anchor_y: f64,
    ) -> ZoomPanDelta {
        let center = self.transform.center_at(anchor_x, anchor_y);
        let (scale_x, scale_y) =
            self.transform
                .zoom_absolute(scale_x, scale_y, center, &self.settings);
        ZoomPanDelta::ZoomAbsolute {
            scale_x,
            scale_y,
            center_x: center.x,
            center_y: center.y,
        }
    }

    /// Programmatic incremental zoom around `anchor` (0 to 1 on each side of the container).
    pub fn zoom(&mut self, x: f64, y: f64, anchor_x: f64, anchor_y: f64) -> ZoomPanDelta {
        let center = self.transform.center_at(anchor_x, anchor_y);
        let (x, y) = self.transform.zoom(x, y, center, &self.settings);
        ZoomPanDelta::zoom(x, y, center)
    }

    /// Programmatic absolute zoom around `anchor`.
    pub fn zoom_absolute(
        &mut self,
        scale_x: f64,
        scale_y: f64,
        anchor_x: f64,
        anchor_y: f64,
    ) -> ZoomPanDelta {
        self.zoom_absolute_at(scale_x, scale_y, anchor_x, anchor_y)
    }

    /// Programmatic pan.
    pub fn pan(&mut self, dx: f64, dy: f64) -> ZoomPanDelta {
        self.transform.pan(dx, dy, self.settings.elastic);
        ZoomPanDelta::Pan { dx, dy }
    }

    /// Returns to the minimum scale (or 1) at the top left.
    ///
    /// Cancels any running chain. The returned deltas must be applied without elasticity.
    pub fn reset_pan_zoom(&mut self) -> Vec<ZoomPanDelta> {
        self.cancel();
        let scale_x = self.settings.min_zoom_x.unwrap_or(1.0);
        let scale_y = self.settings.min_zoom_y.unwrap_or(1.0);
        let zoom = self.zoom_absolute_at(scale_x, scale_y, 0.0, 0.0);
        self.transform.pan(10_000.0, 10_000.0, false);
        self.transform.keep_in_boundaries();
        alloc::vec![
            zoom,
            ZoomPanDelta::Pan {
                dx: 10_000.0,
                dy: 10_000.0
            },
            ZoomPanDelta::KeepInBoundaries,
        ]
    }

    fn cancel(&mut self) {
        self.generation += 1;
        self.state = GestureState::Idle;
    }

    /// Handles a gesture event.
    ///
    /// Returns the deltas to apply to the axis layers. Taps produce none.
    pub fn handle(
        &mut self,
        event: &GestureEvent,
        scheduler: &mut dyn Scheduler,
    ) -> Vec<ZoomPanDelta> {
        let mut out = Vec::new();
        match *event {
            GestureEvent::Pinch {
                phase,
                center,
                span,
                scale,
            } if self.settings.zoom_enabled => {
                self.handle_pinch(phase, center, span, scale, scheduler, &mut out);
            }
            GestureEvent::Pan {
                phase,
                translation,
                velocity,
            } if self.settings.pan_enabled => {
                self.handle_pan(phase, translation, velocity, scheduler, &mut out);
            }
            _ => {}
        }
        out
    }

    fn handle_pinch(
        &mut self,
        phase: GesturePhase,
        center: Point,
        span: Vec2,
        scale: f64,
        scheduler: &mut dyn Scheduler,
        out: &mut Vec<ZoomPanDelta>,
    ) {
        match phase {
            GesturePhase::Began | GesturePhase::Changed => {
                if phase == GesturePhase::Began || self.state != GestureState::Pinching {
                    self.generation += 1;
                    self.pinch_center = None;
                    self.state = GestureState::Pinching;
                }
                let center = *self.pinch_center.get_or_insert(center);
                let (x, y) = self.split_pinch(span, scale);
                let (x, y) = self.transform.zoom(x, y, center, &self.settings);
                out.push(ZoomPanDelta::zoom(x, y, center));
            }
            GesturePhase::Ended => {
                self.state = GestureState::Idle;
                if self.settings.elastic {
                    let center = self.pinch_center.unwrap_or(center);
                    self.correct_zoom(0, center, scheduler, out);
                }
            }
            GesturePhase::Cancelled => self.cancel(),
        }
    }

    fn split_pinch(&self, span: Vec2, scale: f64) -> (f64, f64) {
        let (abs_x, abs_y) = (span.x.abs(), span.y.abs());
        match self.settings.gesture_mode {
            GestureMode::OnlyX => (scale, 1.0),
            GestureMode::OnlyY => (1.0, scale),
            GestureMode::Max => {
                if abs_x > abs_y {
                    (scale, 1.0)
                } else {
                    (1.0, scale)
                }
            }
            GestureMode::Both => {
                let (max, min) = if abs_x > abs_y { (abs_x, abs_y) } else { (abs_y, abs_x) };
                let minor = if max == 0.0 {
                    scale
                } else {
                    min * (scale - 1.0) / max + 1.0
                };
                if abs_x > abs_y { (scale, minor) } else { (minor, scale) }
            }
        }
    }

    fn filter_pan(&mut self, delta: Vec2) -> Vec2 {
        match self.settings.gesture_mode {
            GestureMode::OnlyX => Vec2::new(delta.x, 0.0),
            GestureMode::OnlyY => Vec2::new(0.0, delta.y),
            GestureMode::Both => delta,
            GestureMode::Max => {
                if self.pan_x_locked.is_none() && delta != Vec2::ZERO {
                    self.pan_x_locked = Some(delta.x.abs() > delta.y.abs());
                }
                match self.pan_x_locked {
                    Some(true) => Vec2::new(delta.x, 0.0),
                    Some(false) => Vec2::new(0.0, delta.y),
                    None => Vec2::ZERO,
                }
            }
        }
    }

    fn handle_pan(
        &mut self,
        phase: GesturePhase,
        translation: Vec2,
        velocity: Vec2,
        scheduler: &mut dyn Scheduler,
        out: &mut Vec<ZoomPanDelta>,
    ) {
        match phase {
            GesturePhase::Began => self.begin_pan(),
            GesturePhase::Changed => {
                if self.state != GestureState::Panning {
                    self.begin_pan();
                }
                // The first change moves by the whole translation since the gesture began.
                let delta = translation - self.last_translation.unwrap_or(Vec2::ZERO);
                self.last_translation = Some(translation);
                let delta = self.filter_pan(delta);
                if delta != Vec2::ZERO {
                    out.push(self.pan(delta.x, delta.y));
                }
            }
            GesturePhase::Ended => {
                self.state = GestureState::Idle;
                let velocity = self.filter_pan(velocity);
                if self.settings.elastic && self.correct_pan(0, scheduler, out) {
                    return;
                }
                let first = velocity / self.settings.initial_friction;
                self.state = GestureState::Decelerating;
                self.schedule(
                    scheduler,
                    StepKind::Decelerate {
                        vx: first.x,
                        vy: first.y,
                    },
                );
            }
            GesturePhase::Cancelled => self.cancel(),
        }
    }

    fn begin_pan(&mut self) {
        self.generation += 1;
        self.pan_x_locked = None;
        self.last_translation = None;
        self.state = GestureState::Panning;
    }

    fn schedule(&self, scheduler: &mut dyn Scheduler, kind: StepKind) {
        scheduler.schedule(ScheduledStep {
            generation: self.generation,
            kind,
        });
    }

    /// Runs a deferred step and returns the deltas it produced.
    ///
    /// Steps scheduled before the latest gesture began are dropped.
    pub fn run_step(
        &mut self,
        step: ScheduledStep,
        scheduler: &mut dyn Scheduler,
    ) -> Vec<ZoomPanDelta> {
        let mut out = Vec::new();
        if step.generation != self.generation {
            tracing::debug!(
                step = step.generation,
                current = self.generation,
                "dropping stale zoom/pan step"
            );
            return out;
        }
        match step.kind {
            StepKind::Decelerate { vx, vy } => {
                out.push(self.pan(vx, vy));
                let threshold = self.settings.stop_threshold;
                if vx.abs() > threshold || vy.abs() > threshold {
                    let factor = self.settings.friction_factor;
                    self.schedule(
                        scheduler,
                        StepKind::Decelerate {
                            vx: vx * factor,
                            vy: vy * factor,
                        },
                    );
                } else {
                    self.state = GestureState::Idle;
                    if self.settings.elastic {
                        self.correct_pan(0, scheduler, &mut out);
                    }
                }
            }
            StepKind::CorrectPan { iteration } => {
                self.correct_pan(iteration, scheduler, &mut out);
            }
            StepKind::CorrectZoom { iteration, center } => {
                self.correct_zoom(iteration, center, scheduler, &mut out);
            }
        }
        out
    }

    /// One pan correction step. Returns `true` if the content was out of bounds.
    fn correct_pan(
        &mut self,
        iteration: usize,
        scheduler: &mut dyn Scheduler,
        out: &mut Vec<ZoomPanDelta>,
    ) -> bool {
        let capped = iteration < self.settings.correction_cap;
        let limit = capped.then_some(self.settings.pan_correction_velocity);
        let offset = self.transform.pan_correction(limit);
        if offset == Vec2::ZERO {
            self.state = GestureState::Idle;
            return false;
        }
        out.push(self.pan(offset.x, offset.y));
        if capped {
            self.state = GestureState::Correcting;
            self.schedule(
                scheduler,
                StepKind::CorrectPan {
                    iteration: iteration + 1,
                },
            );
        } else {
            tracing::warn!(iteration, "pan correction hit its step cap");
            self.state = GestureState::Idle;
        }
        true
    }

    /// One zoom correction step. Once the scale is back in range, pans back to the origin if the
    /// content sits at its minimum scale.
    fn correct_zoom(
        &mut self,
        iteration: usize,
        center: Point,
        scheduler: &mut dyn Scheduler,
        out: &mut Vec<ZoomPanDelta>,
    ) {
        let capped = iteration < self.settings.correction_cap;
        let limit = capped.then_some(self.settings.zoom_correction_velocity);
        let (x, y) = self.transform.zoom_correction(&self.settings, limit);
        if x == 1.0 && y == 1.0 {
            self.state = GestureState::Idle;
            let content = self.transform.content();
            let at_min = |scale: f64, min: Option<f64>| {
                approx_equal_eps(scale, min.unwrap_or(1.0), SCALE_TOLERANCE)
            };
            let dx = if at_min(self.transform.scale_x(), self.settings.min_zoom_x) {
                -content.x0
            } else {
                0.0
            };
            let dy = if at_min(self.transform.scale_y(), self.settings.min_zoom_y) {
                -content.y0
            } else {
                0.0
            };
            if dx != 0.0 || dy != 0.0 {
                out.push(self.pan(dx, dy));
            }
            return;
        }
        let (x, y) = self.transform.zoom(x, y, center, &self.settings);
        out.push(ZoomPanDelta::zoom(x, y, center));
        if capped {
            self.state = GestureState::Correcting;
            self.schedule(
                scheduler,
                StepKind::CorrectZoom {
                    iteration: iteration + 1,
                    center,
                },
            );
        } else {
            tracing::warn!(iteration, "zoom correction hit its step cap");
            self.state = GestureState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ManualScheduler;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn container() -> Rect {
        Rect::new(50.0, 20.0, 450.0, 320.0)
    }

    fn controller(settings: ZoomPanSettings) -> ZoomPanController {
        ZoomPanController::new(settings, container()).unwrap()
    }

    fn pinch(phase: GesturePhase, span: Vec2, scale: f64) -> GestureEvent {
        GestureEvent::Pinch {
            phase,
            center: Point::new(250.0, 170.0),
            span,
            scale,
        }
    }

    fn pan(phase: GesturePhase, tx: f64, ty: f64, velocity: Vec2) -> GestureEvent {
        GestureEvent::Pan {
            phase,
            translation: Vec2::new(tx, ty),
            velocity,
        }
    }

    /// Runs every pending step, returning how many produced deltas.
    fn drain(c: &mut ZoomPanController, scheduler: &mut ManualScheduler) -> usize {
        let mut steps = 0;
        while let Some(step) = scheduler.pop() {
            if !c.run_step(step, scheduler).is_empty() {
                steps += 1;
            }
            assert!(steps < 10_000, "deferred chain must terminate");
        }
        steps
    }

    #[test]
    fn max_mode_zooms_along_the_spread() {
        let mut c = controller(ZoomPanSettings::enabled());
        let mut s = ManualScheduler::new();
        let deltas = c.handle(&pinch(GesturePhase::Began, Vec2::new(200.0, 50.0), 2.0), &mut s);
        assert_eq!(
            deltas,
            [ZoomPanDelta::Zoom {
                x: 2.0,
                y: 1.0,
                center_x: 250.0,
                center_y: 170.0
            }]
        );
        assert_eq!(c.transform().content(), Rect::new(-200.0, 0.0, 600.0, 300.0));
        assert_eq!(c.state(), GestureState::Pinching);

        // Later events keep the anchor of the first one.
        let moved = GestureEvent::Pinch {
            phase: GesturePhase::Changed,
            center: Point::new(60.0, 30.0),
            span: Vec2::new(50.0, 200.0),
            scale: 1.5,
        };
        let deltas = c.handle(&moved, &mut s);
        assert_eq!(
            deltas,
            [ZoomPanDelta::Zoom {
                x: 1.0,
                y: 1.5,
                center_x: 250.0,
                center_y: 170.0
            }]
        );
    }

    #[test]
    fn both_mode_scales_the_minor_axis_proportionally() {
        let mut c = controller(ZoomPanSettings::enabled().with_gesture_mode(GestureMode::Both));
        let mut s = ManualScheduler::new();
        let deltas = c.handle(&pinch(GesturePhase::Began, Vec2::new(200.0, 100.0), 3.0), &mut s);
        assert!(
            matches!(deltas[..], [ZoomPanDelta::Zoom { x, y, .. }] if x == 3.0 && y == 2.0),
            "minor axis gets half the growth: {deltas:?}"
        );
    }

    #[test]
    fn non_elastic_zoom_respects_the_scale_range() {
        let settings = ZoomPanSettings::enabled().with_zoom_x(Some(1.0), Some(2.0));
        let mut c = controller(settings);
        let mut s = ManualScheduler::new();
        let deltas = c.handle(&pinch(GesturePhase::Began, Vec2::new(200.0, 0.0), 3.0), &mut s);
        assert!(
            matches!(deltas[..], [ZoomPanDelta::Zoom { x, .. }] if x == 2.0),
            "clamped to the maximum: {deltas:?}"
        );
        assert!(close(c.transform().scale_x(), 2.0), "scale is at the maximum");

        c.handle(&pinch(GesturePhase::Changed, Vec2::new(200.0, 0.0), 0.1), &mut s);
        assert!(close(c.transform().scale_x(), 1.0), "never below the minimum");
        let content = c.transform().content();
        assert!(content.x0 <= 0.0 && content.x1 >= 400.0, "content covers the container");
    }

    #[test]
    fn pan_locks_to_the_dominant_axis_and_decelerates() {
        let mut c = controller(ZoomPanSettings::enabled());
        let mut s = ManualScheduler::new();
        c.zoom(2.0, 2.0, 0.5, 0.5);

        assert!(c.handle(&pan(GesturePhase::Began, 0.0, 0.0, Vec2::ZERO), &mut s).is_empty());
        let deltas = c.handle(&pan(GesturePhase::Changed, 30.0, 10.0, Vec2::ZERO), &mut s);
        assert_eq!(deltas, [ZoomPanDelta::Pan { dx: 30.0, dy: 0.0 }]);
        let deltas = c.handle(&pan(GesturePhase::Changed, 40.0, 60.0, Vec2::ZERO), &mut s);
        assert_eq!(deltas, [ZoomPanDelta::Pan { dx: 10.0, dy: 0.0 }]);

        c.handle(
            &pan(GesturePhase::Ended, 40.0, 60.0, Vec2::new(-500.0, 900.0)),
            &mut s,
        );
        assert_eq!(c.state(), GestureState::Decelerating);
        let first = s.pop().expect("inertia was scheduled");
        assert_eq!(first.kind, StepKind::Decelerate { vx: -10.0, vy: 0.0 });
        s.schedule(first);

        let steps = drain(&mut c, &mut s);
        // 10 * 0.9^n drops below 0.1 after 44 steps.
        assert_eq!(steps, 45);
        assert_eq!(c.state(), GestureState::Idle);
        let content = c.transform().content();
        assert!(content.x0 <= 0.0 && content.x1 >= 400.0, "inertia is clamped too");
    }

    #[test]
    fn pan_begins_without_moving_and_locks_on_the_first_change() {
        let mut c = controller(ZoomPanSettings::enabled());
        let mut s = ManualScheduler::new();
        c.zoom(2.0, 2.0, 0.5, 0.5);
        let before = *c.transform();

        let deltas = c.handle(&pan(GesturePhase::Began, 30.0, 10.0, Vec2::ZERO), &mut s);
        assert!(deltas.is_empty(), "began only resets: {deltas:?}");
        assert_eq!(*c.transform(), before);
        assert_eq!(c.state(), GestureState::Panning);

        // The lock follows the cumulative translation, which is mostly vertical.
        let deltas = c.handle(&pan(GesturePhase::Changed, 40.0, 60.0, Vec2::ZERO), &mut s);
        assert_eq!(deltas, [ZoomPanDelta::Pan { dx: 0.0, dy: 60.0 }]);
        let deltas = c.handle(&pan(GesturePhase::Changed, 90.0, 70.0, Vec2::ZERO), &mut s);
        assert_eq!(deltas, [ZoomPanDelta::Pan { dx: 0.0, dy: 10.0 }]);
    }

    #[test]
    fn elastic_pan_snaps_back_in_bounded_steps() {
        let mut c = controller(ZoomPanSettings::enabled().with_elastic(true));
        let mut s = ManualScheduler::new();
        c.handle(&pan(GesturePhase::Began, 0.0, 0.0, Vec2::ZERO), &mut s);
        c.handle(&pan(GesturePhase::Changed, 100.0, 0.0, Vec2::ZERO), &mut s);
        assert_eq!(c.transform().content().x0, 100.0);

        let deltas = c.handle(&pan(GesturePhase::Ended, 100.0, 0.0, Vec2::ZERO), &mut s);
        assert_eq!(deltas, [ZoomPanDelta::Pan { dx: -20.0, dy: 0.0 }]);
        assert_eq!(c.state(), GestureState::Correcting);
        assert_eq!(drain(&mut c, &mut s), 4);
        assert_eq!(c.transform().content().x0, 0.0);
        assert_eq!(c.state(), GestureState::Idle);
    }

    #[test]
    fn elastic_zoom_recovers_the_minimum_scale() {
        let settings = ZoomPanSettings::enabled()
            .with_elastic(true)
            .with_zoom_x(Some(1.0), None);
        let mut c = controller(settings);
        let mut s = ManualScheduler::new();
        c.handle(&pinch(GesturePhase::Began, Vec2::new(200.0, 0.0), 0.5), &mut s);
        assert!(close(c.transform().scale_x(), 0.5), "elastic overshoot");

        let deltas = c.handle(&pinch(GesturePhase::Ended, Vec2::new(200.0, 0.0), 1.0), &mut s);
        assert!(
            matches!(deltas[..], [ZoomPanDelta::Zoom { x, y, .. }] if close(x, 1.2) && y == 1.0),
            "first step is limited: {deltas:?}"
        );
        drain(&mut c, &mut s);
        assert!(close(c.transform().scale_x(), 1.0), "back at the minimum");
        assert!(close(c.transform().content().x0, 0.0), "panned back to the origin");
        assert_eq!(c.state(), GestureState::Idle);
    }

    #[test]
    fn correction_cap_ends_with_one_uncapped_step() {
        let settings = ZoomPanSettings::enabled()
            .with_elastic(true)
            .with_correction_cap(2);
        let mut c = controller(settings);
        let mut s = ManualScheduler::new();
        c.handle(&pinch(GesturePhase::Began, Vec2::new(200.0, 0.0), 0.1), &mut s);
        c.handle(&pinch(GesturePhase::Ended, Vec2::new(200.0, 0.0), 1.0), &mut s);
        // Steps 1 and 2 run from the queue; step 2 is past the cap and finishes the job.
        assert_eq!(drain(&mut c, &mut s), 2);
        assert!(close(c.transform().scale_x(), 1.0), "uncapped step reaches the minimum");
    }

    #[test]
    fn a_new_gesture_cancels_pending_steps() {
        let mut c = controller(ZoomPanSettings::enabled());
        let mut s = ManualScheduler::new();
        c.zoom(2.0, 1.0, 0.5, 0.5);
        c.handle(&pan(GesturePhase::Began, -10.0, 0.0, Vec2::ZERO), &mut s);
        c.handle(&pan(GesturePhase::Ended, -10.0, 0.0, Vec2::new(-500.0, 0.0)), &mut s);
        let stale = s.pop().expect("inertia was scheduled");

        c.handle(&pan(GesturePhase::Began, 0.0, 0.0, Vec2::ZERO), &mut s);
        let before = *c.transform();
        assert!(c.run_step(stale, &mut s).is_empty(), "stale step does nothing");
        assert_eq!(*c.transform(), before);
        assert!(s.is_empty(), "and schedules nothing");
    }

    #[test]
    fn zoom_pan_then_reset() {
        let mut c = controller(ZoomPanSettings::enabled());
        let mut s = ManualScheduler::new();
        c.handle(&pinch(GesturePhase::Began, Vec2::new(100.0, 100.0), 3.0), &mut s);
        c.handle(&pan(GesturePhase::Began, 0.0, 0.0, Vec2::ZERO), &mut s);
        c.handle(&pan(GesturePhase::Changed, -50.0, -40.0, Vec2::ZERO), &mut s);
        assert_ne!(c.transform().content().origin(), Point::ZERO);

        let deltas = c.reset_pan_zoom();
        assert_eq!(deltas.len(), 3);
        assert_eq!(deltas[2], ZoomPanDelta::KeepInBoundaries);
        let content = c.transform().content();
        assert!(
            close(content.x0, 0.0) && close(content.y0, 0.0),
            "back at the origin: {content:?}"
        );
        assert!(close(content.width(), 400.0) && close(content.height(), 300.0), "unzoomed");
        assert_eq!(c.state(), GestureState::Idle);
    }

    #[test]
    fn initial_zoom_only_with_a_minimum() {
        assert_eq!(controller(ZoomPanSettings::enabled()).initial_zoom(), None);
        let settings = ZoomPanSettings::enabled().with_zoom_x(Some(2.0), None);
        let mut c = controller(settings);
        assert_eq!(
            c.initial_zoom(),
            Some(ZoomPanDelta::ZoomAbsolute {
                scale_x: 2.0,
                scale_y: 1.0,
                center_x: 50.0,
                center_y: 20.0
            })
        );
        assert_eq!(c.transform().content(), Rect::new(0.0, 0.0, 800.0, 300.0));
    }

    #[test]
    fn disabled_gestures_are_ignored() {
        let mut c = controller(ZoomPanSettings::default());
        let mut s = ManualScheduler::new();
        assert!(c.handle(&pinch(GesturePhase::Began, Vec2::new(1.0, 0.0), 2.0), &mut s).is_empty());
        assert!(c.handle(&pan(GesturePhase::Began, 5.0, 0.0, Vec2::ZERO), &mut s).is_empty());
        assert_eq!(c.generation(), 0);
    }

    #[test]
    fn container_insets_shrink_the_content() {
        let mut t = ContentTransform::new(container());
        t.inset_container(10.0, 0.0, 5.0, 20.0);
        assert_eq!(t.container(), Rect::new(60.0, 20.0, 445.0, 300.0));
        assert_eq!(t.content(), Rect::new(0.0, 0.0, 385.0, 280.0));
        assert_eq!(t.to_screen(Point::new(10.0, 10.0)), Point::new(70.0, 30.0));
    }
}
