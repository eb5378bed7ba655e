// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis values and chart points.

use alloc::string::String;
use alloc::sync::Arc;
use core::hash::{Hash, Hasher};

use crate::approx::approx_equal;
use crate::format::NumberFormat;
use crate::time::format_time_seconds;

/// What an [`AxisValue`] stands for.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisValueKind {
    /// A plain number.
    Number,
    /// A point in time, as seconds since the Unix epoch.
    Date,
    /// A category: the scalar is its ordinal index.
    Text(Arc<str>),
    /// The scalar positions the value; `display` is what gets printed.
    ScreenLoc {
        /// Value shown in the label.
        display: f64,
    },
}

/// A position on an axis.
///
/// Two values are equal when their scalars are within [`crate::EPSILON`] of each other,
/// regardless of kind. Hashing uses the bit pattern of the scalar.
#[derive(Clone, Debug)]
pub struct AxisValue {
    /// Canonical model value, used for positioning.
    pub scalar: f64,
    /// Variant data.
    pub kind: AxisValueKind,
    /// Hidden values keep their slot but draw no label.
    pub hidden: bool,
}

impl AxisValue {
    /// A numeric value.
    #[must_use]
    pub fn number(scalar: f64) -> Self {
        Self {
            scalar,
            kind: AxisValueKind::Number,
            hidden: false,
        }
    }

    /// A date given in seconds since the Unix epoch.
    #[must_use]
    pub fn date(unix_seconds: f64) -> Self {
        Self {
            scalar: unix_seconds,
            kind: AxisValueKind::Date,
            hidden: false,
        }
    }

    /// A category at ordinal `index`.
    #[must_use]
    pub fn text(index: f64, text: impl Into<Arc<str>>) -> Self {
        Self {
            scalar: index,
            kind: AxisValueKind::Text(text.into()),
            hidden: false,
        }
    }

    /// A value placed at `position` but labeled with `display`.
    #[must_use]
    pub fn screen_loc(position: f64, display: f64) -> Self {
        Self {
            scalar: position,
            kind: AxisValueKind::ScreenLoc { display },
            hidden: false,
        }
    }

    /// Marks the value hidden.
    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// The value printed in labels.
    #[must_use]
    pub fn display_scalar(&self) -> f64 {
        match self.kind {
            AxisValueKind::ScreenLoc { display } => display,
            _ => self.scalar,
        }
    }

    /// Default label text.
    #[must_use]
    pub fn label_text(&self, format: &NumberFormat) -> String {
        match &self.kind {
            AxisValueKind::Number => format.format(self.scalar),
            AxisValueKind::Date => format_time_seconds(self.scalar, 1.0),
            AxisValueKind::Text(text) => String::from(&**text),
            AxisValueKind::ScreenLoc { display } => format.format(*display),
        }
    }
}

impl PartialEq for AxisValue {
    fn eq(&self, other: &Self) -> bool {
        approx_equal(self.scalar, other.scalar)
    }
}

impl Hash for AxisValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scalar.to_bits().hash(state);
    }
}

impl From<f64> for AxisValue {
    fn from(scalar: f64) -> Self {
        Self::number(scalar)
    }
}

/// A data point: one axis value per dimension.
#[derive(Clone, Debug, PartialEq, Hash)]
pub struct ChartPoint {
    /// Horizontal value.
    pub x: AxisValue,
    /// Vertical value.
    pub y: AxisValue,
}

impl ChartPoint {
    /// Creates a point from two axis values.
    #[must_use]
    pub fn new(x: AxisValue, y: AxisValue) -> Self {
        Self { x, y }
    }

    /// Creates a numeric point.
    #[must_use]
    pub fn from_scalars(x: f64, y: f64) -> Self {
        Self::new(AxisValue::number(x), AxisValue::number(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_tolerant_and_ignores_kind() {
        assert_eq!(AxisValue::number(0.1 + 0.2), AxisValue::date(0.3));
        assert_ne!(AxisValue::number(1.0), AxisValue::number(1.0001));
        assert_eq!(
            ChartPoint::from_scalars(1.0, 2.0),
            ChartPoint::new(AxisValue::text(1.0, "b"), AxisValue::number(2.0))
        );
        assert_ne!(
            ChartPoint::from_scalars(1.0, 2.0),
            ChartPoint::from_scalars(1.0, 3.0)
        );
    }

    #[test]
    fn label_text_by_kind() {
        let format = NumberFormat::default();
        assert_eq!(AxisValue::number(12.5).label_text(&format), "12.5");
        assert_eq!(AxisValue::text(2.0, "Mar").label_text(&format), "Mar");
        assert_eq!(AxisValue::date(3723.0).label_text(&format), "1:02:03");
        let value = AxisValue::screen_loc(100.0, 7.0);
        assert_eq!(value.label_text(&format), "7");
        assert_eq!(value.display_scalar(), 7.0);
    }
}
