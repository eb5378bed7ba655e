// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis labels and their styling.

use alloc::string::String;
use alloc::vec::Vec;

use graticule_text::{TextMeasurer, TextStyle};
use kurbo::{Affine, Rect, Size};
use peniko::Brush;
use peniko::color::palette::css;

use crate::approx::approx_equal;

/// Horizontal alignment of a label inside the label column of a Y axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    /// Right-aligned on a low Y axis, left-aligned on a high one, so labels hug the axis line.
    #[default]
    Default,
    /// Flush with the left edge of the column.
    Left,
    /// Flush with the right edge of the column.
    Right,
}

/// Which edge of a rotated label stays anchored to the tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RotationKeep {
    /// The label rotates around its center.
    #[default]
    Center,
    /// The top edge stays at the unrotated top.
    Top,
    /// The bottom edge stays at the unrotated bottom.
    Bottom,
}

/// Styling shared by the labels of one generator.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelSettings {
    /// Font used for measuring and drawing.
    pub style: TextStyle,
    /// Text paint.
    pub brush: Brush,
    /// Rotation in degrees, clockwise.
    pub rotation: f64,
    /// Anchor kept in place when rotating.
    pub rotation_keep: RotationKeep,
    /// Shift rotated X labels sideways so their end sits under the tick.
    pub shift_x_on_rotation: bool,
    /// Alignment inside the Y label column.
    pub text_alignment: TextAlignment,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            style: TextStyle::new(14.0),
            brush: Brush::Solid(css::BLACK),
            rotation: 0.0,
            rotation_keep: RotationKeep::Center,
            shift_x_on_rotation: true,
            text_alignment: TextAlignment::Default,
        }
    }
}

impl LabelSettings {
    /// Sets the text style.
    #[must_use]
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the text paint.
    #[must_use]
    pub fn with_brush(mut self, brush: impl Into<Brush>) -> Self {
        self.brush = brush.into();
        self
    }

    /// Sets the rotation in degrees.
    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Sets the alignment inside the Y label column.
    #[must_use]
    pub fn with_text_alignment(mut self, alignment: TextAlignment) -> Self {
        self.text_alignment = alignment;
        self
    }

    /// The same settings rotated to read bottom-to-top, as used for Y axis titles.
    #[must_use]
    pub fn vertical(&self) -> Self {
        self.clone().with_rotation(-90.0)
    }
}

/// A measured label.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabel {
    /// Displayed text, possibly truncated.
    pub text: String,
    /// Styling.
    pub settings: LabelSettings,
    /// Text before truncation.
    pub original_text: String,
    /// Hidden labels take no space and are not drawn.
    pub hidden: bool,
    text_size_non_rotated: Size,
}

impl AxisLabel {
    /// Creates a label and measures it.
    #[must_use]
    pub fn new(text: impl Into<String>, settings: LabelSettings, measurer: &dyn TextMeasurer) -> Self {
        let text = text.into();
        let (width, height) = measurer.size(&text, &settings.style);
        Self {
            original_text: text.clone(),
            text,
            settings,
            hidden: false,
            text_size_non_rotated: Size::new(width, height),
        }
    }

    /// Marks the label hidden.
    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Measured size before rotation.
    pub fn text_size_non_rotated(&self) -> Size {
        self.text_size_non_rotated
    }

    /// Size of the bounding box of the rotated label.
    pub fn text_size(&self) -> Size {
        if approx_equal(self.settings.rotation, 0.0) {
            return self.text_size_non_rotated;
        }
        let rect = Rect::from_origin_size((0.0, 0.0), self.text_size_non_rotated);
        Affine::rotate(self.settings.rotation.to_radians())
            .transform_rect_bbox(rect)
            .size()
    }

    /// Shortens the text to fit `max_width`, replacing the cut part with `"..."`.
    ///
    /// The longest prefix that fits together with the ellipsis is kept, with surrounding
    /// whitespace trimmed. Labels that already fit are returned unchanged.
    #[must_use]
    pub fn truncated(&self, max_width: f64, measurer: &dyn TextMeasurer) -> Self {
        const ELLIPSIS: &str = "...";
        let style = &self.settings.style;
        let available = max_width - measurer.size(ELLIPSIS, style).0;

        let mut ends: Vec<usize> = self.text.char_indices().map(|(i, _)| i).skip(1).collect();
        ends.push(self.text.len());

        let fitting = ends
            .iter()
            .rev()
            .map(|end| &self.text[..*end])
            .find(|prefix| measurer.size(prefix, style).0 <= available)
            .unwrap_or("");
        if fitting.len() == self.text.len() {
            return self.clone();
        }

        let mut text = String::from(fitting.trim());
        text.push_str(ELLIPSIS);
        let mut label = Self::new(text, self.settings.clone(), measurer);
        label.original_text.clone_from(&self.original_text);
        label.hidden = self.hidden;
        label
    }
}

#[cfg(test)]
mod tests {
    use graticule_text::FixedAdvanceMeasurer;

    use super::*;

    fn measurer() -> FixedAdvanceMeasurer {
        FixedAdvanceMeasurer::new(10.0, 20.0)
    }

    #[test]
    fn rotated_size_is_the_bounding_box() {
        let m = measurer();
        let label = AxisLabel::new("abcd", LabelSettings::default(), &m);
        assert_eq!(label.text_size(), Size::new(40.0, 20.0));

        let vertical = AxisLabel::new("abcd", LabelSettings::default().vertical(), &m);
        let size = vertical.text_size();
        assert!((size.width - 20.0).abs() < 1e-9, "{size:?}");
        assert!((size.height - 40.0).abs() < 1e-9, "{size:?}");
        assert_eq!(vertical.text_size_non_rotated(), Size::new(40.0, 20.0));

        let diagonal = AxisLabel::new("ab", LabelSettings::default().with_rotation(45.0), &m);
        let expected = (20.0 + 20.0) * core::f64::consts::FRAC_1_SQRT_2;
        assert!((diagonal.text_size().width - expected).abs() < 1e-9, "45 degrees");
    }

    #[test]
    fn truncation_keeps_longest_fitting_prefix() {
        let m = measurer();
        let label = AxisLabel::new("Measured value", LabelSettings::default(), &m);
        // 100 wide leaves 70 for text: "Measure" fits.
        let short = label.truncated(100.0, &m);
        assert_eq!(short.text, "Measure...");
        assert_eq!(short.original_text, "Measured value");
        assert_eq!(short.text_size_non_rotated().width, 100.0);

        // The prefix is trimmed before the ellipsis is added.
        let trimmed = label.truncated(120.0, &m);
        assert_eq!(trimmed.text, "Measured...");

        assert_eq!(label.truncated(1000.0, &m), label, "fits already");
        assert_eq!(label.truncated(10.0, &m).text, "...", "nothing fits");
    }
}
