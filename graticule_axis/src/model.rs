// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative axis descriptions.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use peniko::Brush;
use peniko::color::palette::css;

use crate::conflict::LabelsConflictSolver;
use crate::error::{AxisError, AxisResult, ensure_finite};
use crate::fixed::FixedGenerator;
use crate::format::NumberFormat;
use crate::generator::AxisValuesGenerator;
use crate::label::{AxisLabel, LabelSettings};
use crate::labels::{AxisLabelsGenerator, FixedLabels};
use crate::value::AxisValue;

/// Screen space reserved before the first or after the last tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AxisPadding {
    /// No padding.
    #[default]
    None,
    /// Half the extent of the boundary tick's label, so it is not clipped.
    Label,
    /// A fixed amount.
    Fixed(f64),
    /// The larger of [`AxisPadding::Label`] and the fixed amount.
    MaxLabelFixed(f64),
    /// [`AxisPadding::Label`] plus the fixed amount.
    LabelPlus(f64),
}

impl AxisPadding {
    /// Returns `true` if the padding depends on the size of a boundary label.
    pub fn needs_label(self) -> bool {
        matches!(self, Self::Label | Self::MaxLabelFixed(_) | Self::LabelPlus(_))
    }

    /// Resolves the padding given half the boundary label's extent.
    pub fn resolve(self, half_label_extent: f64) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Label => half_label_extent,
            Self::Fixed(fixed) => fixed,
            Self::MaxLabelFixed(fixed) => half_label_extent.max(fixed),
            Self::LabelPlus(fixed) => half_label_extent + fixed,
        }
    }
}

/// How much space an axis layer reserves for its labels.
///
/// The presented-size modes keep the chart from jittering as ticks scroll in and out of view.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LabelSpaceReservation {
    /// Never less than the smallest label block shown so far.
    #[default]
    MinPresentedSize,
    /// Never less than the largest label block shown so far.
    MaxPresentedSize,
    /// A constant size.
    Fixed(f64),
    /// The label block of the ticks currently shown.
    Current,
}

impl LabelSpaceReservation {
    /// Picks the reserved extent for a label block of `current` extent.
    pub(crate) fn reserve(self, current: f64, presented: &PresentedExtents) -> f64 {
        match self {
            Self::MinPresentedSize => presented.min.map_or(current, |min| min.max(current)),
            Self::MaxPresentedSize => presented.max.map_or(current, |max| max.max(current)),
            Self::Fixed(fixed) => fixed,
            Self::Current => current,
        }
    }
}

/// Smallest and largest label block extents an axis layer has shown.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct PresentedExtents {
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
}

impl PresentedExtents {
    pub(crate) fn record(&mut self, extent: f64) {
        self.min = Some(self.min.map_or(extent, |min| min.min(extent)));
        self.max = Some(self.max.map_or(extent, |max| max.max(extent)));
    }
}

/// Everything needed to build an axis layer except its screen placement.
pub struct AxisModel {
    /// First model value.
    pub first: f64,
    /// Last model value.
    pub last: f64,
    /// Tick values.
    pub values_generator: Box<dyn AxisValuesGenerator>,
    /// Tick labels.
    pub labels_generator: Box<dyn AxisLabelsGenerator>,
    /// Title rows, outermost last.
    pub title_labels: Vec<AxisLabel>,
    /// Axis line paint.
    pub line_color: Brush,
    /// Padding before the first tick.
    pub leading_padding: AxisPadding,
    /// Padding after the last tick.
    pub trailing_padding: AxisPadding,
    /// Label block sizing.
    pub label_space_reservation: LabelSpaceReservation,
    /// Label overlap resolution. Only vertical axes use it.
    pub conflict_solver: Option<Box<dyn LabelsConflictSolver>>,
    /// Clip content to the axis' visible window.
    pub clip_contents: bool,
}

impl fmt::Debug for AxisModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisModel")
            .field("first", &self.first)
            .field("last", &self.last)
            .field("title_labels", &self.title_labels)
            .field("line_color", &self.line_color)
            .field("leading_padding", &self.leading_padding)
            .field("trailing_padding", &self.trailing_padding)
            .field("label_space_reservation", &self.label_space_reservation)
            .field("conflict_solver", &self.conflict_solver)
            .field("clip_contents", &self.clip_contents)
            .finish_non_exhaustive()
    }
}

impl AxisModel {
    /// Creates a model over `first..last`.
    pub fn new(
        first: f64,
        last: f64,
        values_generator: impl AxisValuesGenerator + 'static,
        labels_generator: impl AxisLabelsGenerator + 'static,
    ) -> AxisResult<Self> {
        ensure_finite("first", first)?;
        ensure_finite("last", last)?;
        Ok(Self {
            first,
            last,
            values_generator: Box::new(values_generator),
            labels_generator: Box::new(labels_generator),
            title_labels: Vec::new(),
            line_color: Brush::Solid(css::BLACK),
            leading_padding: AxisPadding::None,
            trailing_padding: AxisPadding::None,
            label_space_reservation: LabelSpaceReservation::MinPresentedSize,
            conflict_solver: None,
            clip_contents: false,
        })
    }

    /// Creates a model that shows exactly `values`, bounded by the first and last of them.
    ///
    /// Hidden values still get a tick position but no label.
    pub fn from_axis_values(
        values: &[AxisValue],
        settings: LabelSettings,
        format: &NumberFormat,
    ) -> AxisResult<Self> {
        let (Some(first), Some(last)) = (values.first(), values.last()) else {
            return Err(AxisError::NoAxisValues);
        };
        Self::new(
            first.scalar,
            last.scalar,
            FixedGenerator::from_axis_values(values),
            FixedLabels::from_axis_values(settings, values, format),
        )
    }

    /// Adds a title row.
    #[must_use]
    pub fn with_title(mut self, label: AxisLabel) -> Self {
        self.title_labels.push(label);
        self
    }

    /// Sets the axis line paint.
    #[must_use]
    pub fn with_line_color(mut self, brush: impl Into<Brush>) -> Self {
        self.line_color = brush.into();
        self
    }

    /// Sets leading and trailing padding.
    #[must_use]
    pub fn with_padding(mut self, leading: AxisPadding, trailing: AxisPadding) -> Self {
        self.leading_padding = leading;
        self.trailing_padding = trailing;
        self
    }

    /// Sets the label block sizing.
    #[must_use]
    pub fn with_label_space_reservation(mut self, reservation: LabelSpaceReservation) -> Self {
        self.label_space_reservation = reservation;
        self
    }

    /// Sets the label conflict solver.
    #[must_use]
    pub fn with_conflict_solver(mut self, solver: impl LabelsConflictSolver + 'static) -> Self {
        self.conflict_solver = Some(Box::new(solver));
        self
    }

    /// Clips content to the visible window of the axis.
    #[must_use]
    pub fn with_clip_contents(mut self, clip: bool) -> Self {
        self.clip_contents = clip;
        self
    }
}

#[cfg(test)]
mod tests {
    use graticule_text::FixedAdvanceMeasurer;

    use super::*;
    use crate::axis::Axis;
    use crate::conflict::MoveUpDown;

    #[test]
    fn padding_resolution() {
        assert_eq!(AxisPadding::None.resolve(12.0), 0.0);
        assert_eq!(AxisPadding::Label.resolve(12.0), 12.0);
        assert_eq!(AxisPadding::Fixed(3.0).resolve(12.0), 3.0);
        assert_eq!(AxisPadding::MaxLabelFixed(20.0).resolve(12.0), 20.0);
        assert_eq!(AxisPadding::MaxLabelFixed(3.0).resolve(12.0), 12.0);
        assert_eq!(AxisPadding::LabelPlus(3.0).resolve(12.0), 15.0);
        assert!(!AxisPadding::Fixed(3.0).needs_label(), "fixed padding needs no label");
    }

    #[test]
    fn reservation_never_drops_below_the_tracked_size() {
        let mut presented = PresentedExtents::default();
        let min = LabelSpaceReservation::MinPresentedSize;
        let max = LabelSpaceReservation::MaxPresentedSize;
        assert_eq!(min.reserve(30.0, &presented), 30.0);
        presented.record(30.0);
        presented.record(50.0);
        assert_eq!(presented, PresentedExtents { min: Some(30.0), max: Some(50.0) });

        assert_eq!(min.reserve(20.0, &presented), 30.0);
        assert_eq!(min.reserve(40.0, &presented), 40.0);
        assert_eq!(max.reserve(40.0, &presented), 50.0);
        assert_eq!(LabelSpaceReservation::Fixed(7.0).reserve(40.0, &presented), 7.0);
        assert_eq!(LabelSpaceReservation::Current.reserve(20.0, &presented), 20.0);
    }

    #[test]
    fn from_axis_values_uses_the_ends() {
        let m = FixedAdvanceMeasurer::new(10.0, 20.0);
        let values = [0.0, 10.0, 20.0].map(AxisValue::number);
        let mut model =
            AxisModel::from_axis_values(&values, LabelSettings::default(), &NumberFormat::default())
                .unwrap()
                .with_conflict_solver(MoveUpDown::new());
        assert_eq!((model.first, model.last), (0.0, 20.0));

        let axis = Axis::x(0.0, 20.0, 0.0, 200.0).unwrap();
        assert_eq!(model.values_generator.generate(&axis), [0.0, 10.0, 20.0]);
        assert_eq!(model.labels_generator.generate(10.0, &axis, &m)[0].text, "10");
        assert!(model.conflict_solver.is_some(), "solver was set");
    }

    #[test]
    fn empty_values_are_rejected() {
        let result =
            AxisModel::from_axis_values(&[], LabelSettings::default(), &NumberFormat::default());
        assert!(matches!(result, Err(AxisError::NoAxisValues)));
    }
}
