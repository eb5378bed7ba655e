// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis coordinates, layout and zoom/pan math for 2D charts.
//!
//! The crate is organized bottom-up:
//! - **Values and labels**: [`AxisValue`] carries a scalar and how to show it. Values generators
//!   ([`MultiplierGenerator`], [`NiceGenerator`], [`FixedGenerator`], [`TimeGenerator`], ...)
//!   choose tick positions for a visible range; labels generators turn each tick into
//!   [`AxisLabel`]s.
//! - **Mapping**: an [`Axis`] maps scalars to screen coordinates along one dimension, and
//!   zooms and pans that mapping inside its initial bounds.
//! - **Layout**: an [`AxisLayer`] measures its ticks, labels and titles, and [`CoordsSpace`]
//!   stacks layers around the edges of a chart, leaving an inner frame for content.
//! - **Interaction**: [`ZoomPanController`] turns gestures into [`ZoomPanDelta`]s, with inertia
//!   and bounds correction run as deferred steps through a [`Scheduler`]. [`Chart`] replays the
//!   deltas on every layer and keeps the inner frame in sync when layers change size.
//!
//! Drawing goes through [`RenderSink`]; text measurement through
//! [`graticule_text::TextMeasurer`]. Neither depends on a renderer.
//!
//! ## Features
//!
//! - `std`: use `std` float math.
//! - `libm` (default): use `libm` float math in `no_std` builds.

#![no_std]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

mod approx;
mod axis;
mod chart;
mod conflict;
mod content;
mod coords;
mod dividers;
mod error;
mod fixed;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod generator;
mod label;
mod labels;
mod layer;
mod model;
mod multiplier;
mod nice;
mod nice_range;
mod render;
mod schedule;
mod settings;
mod static_values;
mod time;
mod value;
mod zoom_pan;

pub use approx::{EPSILON, approx_equal, approx_equal_eps};
pub use axis::{Axis, AxisTransform, Orientation};
pub use chart::{Chart, ChartDelegate, ChartTap};
pub use conflict::{LabelsConflictSolver, MoveUpDown};
pub use content::{GuideLines, GuideLinesAxis, ScatterLayer, TappedPoint};
pub use coords::CoordsSpace;
pub use dividers::DividersGenerator;
pub use error::{AxisError, AxisResult};
pub use fixed::{FixedGenerator, FixedNonOverlappingGenerator};
pub use format::NumberFormat;
pub use generator::AxisValuesGenerator;
pub use label::{AxisLabel, LabelSettings, RotationKeep, TextAlignment};
pub use labels::{
    AxisLabelsGenerator, FixedLabels, FnLabels, LabelList, LabelsCache, NumberLabels,
    SuffixLabels, SuffixUnit,
};
pub use layer::{AxisEdge, AxisLayer, FrameChange, TickLabels};
pub use model::{AxisModel, AxisPadding, LabelSpaceReservation};
pub use multiplier::{DEFAULT_MAX_TICKS, MultiplierGenerator, MultiplierUpdate};
pub use nice::{nice_number, prime_factors};
pub use nice_range::{NiceGenerator, NiceRange, nice_range};
pub use render::{LabelPlacement, LineSegment, RenderSink, StrokeStyle};
pub use schedule::{ManualScheduler, ScheduledStep, Scheduler, StepKind};
pub use settings::{AxisSettings, ChartSettings, GestureMode, ZoomPanSettings};
pub use static_values::{StaticValuesParams, axis_values_for_points, values_for_points};
pub use time::{TimeGenerator, TimeLabels, TimeUnit, format_calendar_date, format_time_seconds};
pub use value::{AxisValue, AxisValueKind, ChartPoint};
pub use zoom_pan::{
    ContentTransform, GestureEvent, GesturePhase, GestureState, ZoomPanController, ZoomPanDelta,
};
