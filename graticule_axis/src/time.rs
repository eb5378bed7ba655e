// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time axes.
//!
//! Time is modeled as seconds since the Unix epoch. Ticks step by whole multiples of a
//! [`TimeUnit`]. Fixed-length units are labeled as `h:mm:ss`, `m:ss` or plain seconds; calendar
//! units step through the proleptic Gregorian calendar in UTC and are labeled as dates.

use alloc::string::String;
use alloc::vec::Vec;

use chrono::{DateTime, Datelike, Months, Utc};
use graticule_text::TextMeasurer;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::Axis;
use crate::generator::{AxisValuesGenerator, required_length_for_dividers};
use crate::label::{AxisLabel, LabelSettings};
use crate::labels::{AxisLabelsGenerator, LabelList, LabelsCache};
use crate::multiplier::{MultiplierUpdate, Stepper, Stepping};

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const YEAR: f64 = 365.2425 * DAY;

/// Units a time axis steps by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// One second.
    Second,
    /// Sixty seconds.
    #[default]
    Minute,
    /// Sixty minutes.
    Hour,
    /// Twenty-four hours.
    Day,
    /// Seven days.
    Week,
    /// One calendar month. Days past the end of a shorter month clamp to its last day.
    Month,
    /// Twelve calendar months.
    Year,
}

impl TimeUnit {
    /// Length of the unit in seconds.
    ///
    /// Calendar units report their mean Gregorian length.
    #[must_use]
    pub fn seconds(self) -> f64 {
        match self {
            Self::Second => 1.0,
            Self::Minute => MINUTE,
            Self::Hour => HOUR,
            Self::Day => DAY,
            Self::Week => 7.0 * DAY,
            Self::Month => YEAR / 12.0,
            Self::Year => YEAR,
        }
    }

    /// Months per unit, for calendar units.
    #[must_use]
    pub fn months(self) -> Option<u32> {
        match self {
            Self::Month => Some(1),
            Self::Year => Some(12),
            _ => None,
        }
    }

    fn stepping(self) -> Stepping {
        match self.months() {
            Some(months) => Stepping::Months(months),
            None => Stepping::Units(self.seconds()),
        }
    }

    /// Whole units from `from` to `to`, truncated towards zero.
    fn units_between(self, from: f64, to: f64) -> f64 {
        match self.months() {
            #[allow(clippy::cast_precision_loss, reason = "month counts stay far below 2^52")]
            Some(months) => months_between(from, to)
                .map_or(f64::NAN, |elapsed| (elapsed / i64::from(months)) as f64),
            None => ((to - from) / self.seconds()).trunc(),
        }
    }
}

fn date_time(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    #[allow(
        clippy::cast_possible_truncation,
        reason = "out of range values saturate and are rejected by chrono"
    )]
    let (secs, nanos) = (whole as i64, ((seconds - whole) * 1e9).round() as u32);
    DateTime::from_timestamp(secs, nanos.min(999_999_999))
}

#[allow(
    clippy::cast_precision_loss,
    reason = "chrono timestamps fit the f64 mantissa to well below a microsecond"
)]
fn seconds_of(date: DateTime<Utc>) -> f64 {
    date.timestamp() as f64 + f64::from(date.timestamp_subsec_nanos()) * 1e-9
}

/// Moves `seconds` by `months` calendar months, or `None` outside the representable range.
pub(crate) fn add_months(seconds: f64, months: i64) -> Option<f64> {
    let date = date_time(seconds)?;
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(u32::try_from(months).ok()?))
    } else {
        date.checked_sub_months(Months::new(u32::try_from(months.unsigned_abs()).ok()?))
    }?;
    Some(seconds_of(shifted))
}

/// Whole calendar months from `from` to `to`, truncated towards zero.
pub(crate) fn months_between(from: f64, to: f64) -> Option<i64> {
    let (start, end) = (date_time(from)?, date_time(to)?);
    let mut months = i64::from(end.year() - start.year()) * 12
        + i64::from(end.month()) - i64::from(start.month());
    // The month difference overshoots when `to` falls earlier in its month than `from`.
    if months > 0 && add_months(from, months)? > to {
        months -= 1;
    } else if months < 0 && add_months(from, months)? < to {
        months += 1;
    }
    Some(months)
}

/// Formats `seconds` as a UTC date at the precision of a calendar `unit`.
///
/// Fixed-length units fall back to [`format_time_seconds`].
pub fn format_calendar_date(seconds: f64, unit: TimeUnit) -> String {
    let pattern = match unit {
        TimeUnit::Year => "%Y",
        TimeUnit::Month => "%Y-%m",
        _ => return format_time_seconds(seconds, unit.seconds()),
    };
    match date_time(seconds) {
        Some(date) => alloc::format!("{}", date.format(pattern)),
        None => alloc::format!("{seconds}"),
    }
}

/// Formats `seconds` for a tick spaced `step` seconds from its neighbours.
///
/// Hours are shown once the step or the value reaches an hour, minutes once either reaches a
/// minute.
pub fn format_time_seconds(seconds: f64, step: f64) -> String {
    if !seconds.is_finite() {
        return alloc::format!("{seconds}");
    }
    let sign = if seconds < 0.0 { "-" } else { "" };
    #[allow(
        clippy::cast_possible_truncation,
        reason = "saturating float to int conversion is what we want here"
    )]
    let total = seconds.abs().round() as u64;
    let (hours, minutes, secs) = (total / 3600, total / 60 % 60, total % 60);
    let step = step.abs();

    if hours > 0 || step >= HOUR {
        alloc::format!("{sign}{hours}:{minutes:02}:{secs:02}")
    } else if minutes > 0 || step >= MINUTE {
        alloc::format!("{sign}{minutes}:{secs:02}")
    } else {
        alloc::format!("{sign}{secs}")
    }
}

/// Steps a time axis by whole units, aligned to the initial first bound.
///
/// Until [`AxisValuesGenerator::axis_initialized`] picks a step, no ticks are produced.
#[derive(Clone, Debug)]
pub struct TimeGenerator {
    unit: TimeUnit,
    preferred_dividers: u32,
    min_space: f64,
    max_text_size: f64,
    stepper: Stepper,
}

impl TimeGenerator {
    /// Creates a generator stepping by multiples of `unit`.
    #[must_use]
    pub fn new(unit: TimeUnit, preferred_dividers: u32, min_space: f64, max_text_size: f64) -> Self {
        Self {
            unit,
            preferred_dividers,
            min_space,
            max_text_size,
            stepper: Stepper::new(0.0, MultiplierUpdate::Halve, unit.stepping()),
        }
    }

    /// Sets the zoom policy.
    #[must_use]
    pub fn with_update(mut self, update: MultiplierUpdate) -> Self {
        self.stepper = Stepper::new(self.stepper.multiplier, update, self.unit.stepping());
        self
    }

    /// The step unit.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// The current unzoomed step, in units.
    pub fn multiplier(&self) -> f64 {
        self.stepper.multiplier
    }
}

impl AxisValuesGenerator for TimeGenerator {
    fn generate(&mut self, axis: &Axis) -> Vec<f64> {
        self.stepper.generate(axis)
    }

    fn axis_initialized(&mut self, axis: &Axis) {
        let mut dividers = self.preferred_dividers;
        while dividers > 1 {
            if required_length_for_dividers(f64::from(dividers), self.min_space, self.max_text_size)
                < axis.screen_length()
            {
                let units = self.unit.units_between(axis.first(), axis.last());
                self.stepper.multiplier = units / f64::from(dividers);
                tracing::trace!(dividers, multiplier = self.stepper.multiplier, "time step");
                return;
            }
            dividers -= 1;
        }
    }
}

/// Labels seconds as clock durations, or as dates for calendar units.
#[derive(Clone, Debug, Default)]
pub struct TimeLabels {
    settings: LabelSettings,
    unit: TimeUnit,
    cache: LabelsCache,
}

impl TimeLabels {
    /// Formats for ticks roughly one `unit` apart.
    #[must_use]
    pub fn new(settings: LabelSettings, unit: TimeUnit) -> Self {
        Self {
            settings,
            unit,
            cache: LabelsCache::new(),
        }
    }
}

impl AxisLabelsGenerator for TimeLabels {
    fn labels_for(&self, scalar: f64, measurer: &dyn TextMeasurer) -> LabelList {
        let mut labels = LabelList::new();
        labels.push(AxisLabel::new(
            format_calendar_date(scalar, self.unit),
            self.settings.clone(),
            measurer,
        ));
        labels
    }

    fn cache(&mut self) -> &mut LabelsCache {
        &mut self.cache
    }
}

#[cfg(test)]
mod tests {
    use graticule_text::FixedAdvanceMeasurer;

    use super::*;

    #[test]
    fn formats_by_magnitude() {
        assert_eq!(format_time_seconds(5.0, 1.0), "5");
        assert_eq!(format_time_seconds(65.0, 1.0), "1:05");
        assert_eq!(format_time_seconds(5.0, 60.0), "0:05");
        assert_eq!(format_time_seconds(3723.0, 60.0), "1:02:03");
        assert_eq!(format_time_seconds(-90.0, 1.0), "-1:30");
    }

    #[test]
    fn steps_by_whole_units() {
        // One hour on 600px; at most 10 labels of 40px with 10px gaps fit: 6 minutes apart.
        let axis = Axis::x(0.0, HOUR, 0.0, 600.0).unwrap();
        let mut generator = TimeGenerator::new(TimeUnit::Minute, 10, 10.0, 40.0);
        assert!(generator.generate(&axis).is_empty(), "no step before initialization");

        generator.axis_initialized(&axis);
        assert_eq!(generator.multiplier(), 6.0);
        let values = generator.generate(&axis);
        assert_eq!(values.len(), 11, "{values:?}");
        assert_eq!(values[1], 360.0);
        assert_eq!(*values.last().unwrap(), HOUR);
    }

    // 2024-01-31T00:00:00Z
    const JAN_31_2024: f64 = 1_706_659_200.0;
    // 2024-01-01T00:00:00Z
    const JAN_1_2024: f64 = 1_704_067_200.0;

    #[test]
    fn calendar_months_clamp_to_the_month_end() {
        let feb = add_months(JAN_31_2024, 1).unwrap();
        assert_eq!(format_calendar_date(feb, TimeUnit::Month), "2024-02");
        assert_eq!(feb - JAN_31_2024, 29.0 * DAY, "leap February ends on the 29th");
        assert_eq!(add_months(feb, -1).unwrap(), JAN_31_2024 - 2.0 * DAY);

        assert_eq!(months_between(JAN_31_2024, feb), Some(1));
        assert_eq!(months_between(JAN_31_2024, feb - 1.0), Some(0), "one second short");
        assert_eq!(months_between(feb, JAN_1_2024), Some(-1));
        assert_eq!(add_months(f64::NAN, 1), None);
    }

    #[test]
    fn steps_by_calendar_months() {
        // 2024-01-01 to 2025-01-01 on 600px: 12 labels of 40px fit, one per month.
        let jan_2025 = add_months(JAN_1_2024, 12).unwrap();
        let axis = Axis::x(JAN_1_2024, jan_2025, 0.0, 600.0).unwrap();
        let mut generator = TimeGenerator::new(TimeUnit::Month, 12, 5.0, 40.0);
        generator.axis_initialized(&axis);
        assert_eq!(generator.multiplier(), 1.0);

        let values = generator.generate(&axis);
        assert_eq!(values.len(), 13, "{values:?}");
        let labels = TimeLabels::new(LabelSettings::default(), TimeUnit::Month);
        let m = FixedAdvanceMeasurer::new(10.0, 20.0);
        assert_eq!(labels.labels_for(values[2], &m)[0].text, "2024-03");
        assert_eq!(values[2] - values[1], 29.0 * DAY, "February 2024 has 29 days");
        assert_eq!(values[12], jan_2025);
    }

    #[test]
    fn calendar_steps_stay_aligned_when_panned() {
        let start = JAN_1_2024;
        let end = add_months(start, 10 * 12).unwrap();
        let mut axis = Axis::x(start, end, 0.0, 600.0).unwrap();
        let mut generator = TimeGenerator::new(TimeUnit::Year, 5, 10.0, 40.0);
        generator.axis_initialized(&axis);
        assert_eq!(generator.multiplier(), 2.0, "ten years over five dividers");

        axis.zoom(2.0, 1.0, 0.0, 0.0, false);
        axis.pan(-200.0, 0.0, false);
        let values = generator.generate(&axis);
        assert!(!values.is_empty(), "window is not empty");
        for v in &values {
            let months = months_between(start, *v).unwrap();
            let label = format_calendar_date(*v, TimeUnit::Month);
            assert_eq!(months % 12, 0, "{label} is on a year boundary");
            assert!(
                *v >= axis.first_visible() - 1e-6 && *v <= axis.last_visible() + 1e-6,
                "{label} is visible"
            );
        }
    }

    #[test]
    fn labels_use_the_unit_step() {
        let m = FixedAdvanceMeasurer::new(10.0, 20.0);
        let mut labels = TimeLabels::new(LabelSettings::default(), TimeUnit::Hour);
        assert_eq!(labels.generate_unbounded(7200.0, &m)[0].text, "2:00:00");
    }
}
