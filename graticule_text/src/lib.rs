// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text metrics port for axis layout.
//!
//! Axis layout needs label extents long before anything is drawn: padding is derived from the
//! size of the boundary labels, label rows are stacked by their heights, and the inner frame of a
//! chart shrinks by the width of the widest Y label. Graticule keeps shaping and glyph layout
//! downstream, so the layout core only depends on the small [`TextMeasurer`] trait defined here.
//!
//! Implementations must be deterministic and free of observable side effects: the same string and
//! style always measure the same.

#![no_std]

extern crate alloc;

use alloc::sync::Arc;

/// Measures single lines of text.
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; callers split on `\n` themselves.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Returns the unrotated `(width, height)` of `text`.
    fn size(&self, text: &str, style: &TextStyle) -> (f64, f64) {
        let m = self.measure(text, style);
        (m.advance_width, m.line_height())
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

/// Font of an axis label or title.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Size in screen units.
    pub font_size: f64,
    /// Family.
    pub font_family: FontFamily,
    /// Weight, `400` is regular.
    pub font_weight: FontWeight,
}

impl TextStyle {
    /// A regular sans-serif font of `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Generic serif.
    Serif,
    /// Generic sans-serif.
    SansSerif,
    /// Generic monospace. Tick labels line up best in it.
    Monospace,
    /// A family by name, such as `"Helvetica Neue"`.
    Named(Arc<str>),
}

impl FontFamily {
    /// The family as written in CSS and SVG `font-family` attributes.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// Font weight on the CSS scale of 100 to 900.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// `400`.
    pub const NORMAL: Self = Self(400);
    /// `700`, used for axis titles.
    pub const BOLD: Self = Self(700);
}

/// Size of one measured line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Horizontal advance of the whole line.
    pub advance_width: f64,
    /// Baseline to top.
    pub ascent: f64,
    /// Baseline to bottom.
    pub descent: f64,
    /// Extra space between lines.
    pub leading: f64,
}

impl TextMetrics {
    /// Height a label row takes.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// Estimates text size from the font size alone: 0.6em per character, 1em per line.
///
/// Good enough for the SVG demo, where the viewer picks the actual font.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let advance_width = 0.6 * style.font_size * text.chars().count() as f64;
        TextMetrics {
            advance_width,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
            leading: 0.0,
        }
    }
}

/// A measurer where every character has the same advance and every line the same height,
/// regardless of style.
///
/// Handy when layout must be checked against exact pixel values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceMeasurer {
    /// Advance per character.
    pub advance: f64,
    /// Height of every line.
    pub line_height: f64,
}

impl FixedAdvanceMeasurer {
    /// Creates a measurer with the given per-character advance and line height.
    #[must_use]
    pub fn new(advance: f64, line_height: f64) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, _style: &TextStyle) -> TextMetrics {
        TextMetrics {
            advance_width: self.advance * text.chars().count() as f64,
            ascent: self.line_height,
            descent: 0.0,
            leading: 0.0,
        }
    }
}
