// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label generation for tick values.
//!
//! Every generator owns a [`LabelsCache`]: labels are measured once per scalar, optionally
//! truncated, and then filtered per axis state by the completeness policy.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use graticule_text::TextMeasurer;
use hashbrown::HashMap;
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::Axis;
use crate::format::NumberFormat;
use crate::label::{AxisLabel, LabelSettings};
use crate::value::AxisValue;

/// Labels of one tick. X axes may stack several rows; Y axes use only the first.
pub type LabelList = SmallVec<[AxisLabel; 1]>;

/// Memoized labels plus the truncation and completeness policies.
#[derive(Clone, Debug, Default)]
pub struct LabelsCache {
    labels: HashMap<u64, LabelList>,
    max_label_width: Option<f64>,
    only_show_complete_labels: bool,
}

impl LabelsCache {
    /// An empty cache without truncation that keeps partially visible labels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Truncates labels wider than `max_width` with an ellipsis.
    #[must_use]
    pub fn with_max_label_width(mut self, max_width: f64) -> Self {
        self.max_label_width = Some(max_width);
        self
    }

    /// Drops a tick's labels when its first label would stick out of the visible window.
    #[must_use]
    pub fn with_only_show_complete_labels(mut self, only_complete: bool) -> Self {
        self.only_show_complete_labels = only_complete;
        self
    }

    /// Number of memoized scalars.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if nothing is memoized.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Forgets all memoized labels.
    pub fn clear(&mut self) {
        self.labels.clear();
    }

    fn get(&self, scalar: f64) -> Option<&LabelList> {
        self.labels.get(&scalar.to_bits())
    }

    fn store(&mut self, scalar: f64, labels: LabelList, measurer: &dyn TextMeasurer) -> LabelList {
        let labels: LabelList = match self.max_label_width {
            Some(max_width) => labels
                .iter()
                .map(|label| label.truncated(max_width, measurer))
                .collect(),
            None => labels,
        };
        self.labels.insert(scalar.to_bits(), labels.clone());
        labels
    }

    fn filter_complete(&self, scalar: f64, labels: LabelList, axis: &Axis) -> LabelList {
        if !self.only_show_complete_labels {
            return labels;
        }
        labels
            .into_iter()
            .next()
            .filter(|label| {
                axis.is_in_boundaries(axis.screen_loc_for_scalar(scalar), label.text_size())
            })
            .into_iter()
            .collect()
    }
}

/// Turns tick scalars into labels.
pub trait AxisLabelsGenerator {
    /// Builds the labels for `scalar` without consulting the cache.
    fn labels_for(&self, scalar: f64, measurer: &dyn TextMeasurer) -> LabelList;

    /// The cache and policies of this generator.
    fn cache(&mut self) -> &mut LabelsCache;

    /// Labels for `scalar`, memoized and truncated but not filtered by axis state.
    fn generate_unbounded(&mut self, scalar: f64, measurer: &dyn TextMeasurer) -> LabelList {
        if let Some(labels) = self.cache().get(scalar) {
            return labels.clone();
        }
        let labels = self.labels_for(scalar, measurer);
        self.cache().store(scalar, labels, measurer)
    }

    /// Labels for `scalar` as shown on `axis`.
    fn generate(&mut self, scalar: f64, axis: &Axis, measurer: &dyn TextMeasurer) -> LabelList {
        let labels = self.generate_unbounded(scalar, measurer);
        self.cache().filter_complete(scalar, labels, axis)
    }
}

impl<G: AxisLabelsGenerator + ?Sized> AxisLabelsGenerator for Box<G> {
    fn labels_for(&self, scalar: f64, measurer: &dyn TextMeasurer) -> LabelList {
        (**self).labels_for(scalar, measurer)
    }

    fn cache(&mut self) -> &mut LabelsCache {
        (**self).cache()
    }
}

fn single(text: String, settings: &LabelSettings, measurer: &dyn TextMeasurer) -> LabelList {
    let mut labels = LabelList::new();
    labels.push(AxisLabel::new(text, settings.clone(), measurer));
    labels
}

/// Decimal labels.
#[derive(Clone, Debug, Default)]
pub struct NumberLabels {
    settings: LabelSettings,
    format: NumberFormat,
    cache: LabelsCache,
}

impl NumberLabels {
    /// Formats with at most two fraction digits.
    #[must_use]
    pub fn new(settings: LabelSettings) -> Self {
        Self {
            settings,
            format: NumberFormat::default(),
            cache: LabelsCache::new(),
        }
    }

    /// Sets the number format.
    #[must_use]
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    /// Replaces the cache policies.
    #[must_use]
    pub fn with_cache(mut self, cache: LabelsCache) -> Self {
        self.cache = cache;
        self
    }
}

impl AxisLabelsGenerator for NumberLabels {
    fn labels_for(&self, scalar: f64, measurer: &dyn TextMeasurer) -> LabelList {
        single(self.format.format(scalar), &self.settings, measurer)
    }

    fn cache(&mut self) -> &mut LabelsCache {
        &mut self.cache
    }
}

/// Magnitude suffixes for [`SuffixLabels`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SuffixUnit {
    /// Thousands, `K`.
    Kilo,
    /// Millions, `M`.
    #[default]
    Mega,
    /// Billions, `G`.
    Giga,
    /// Trillions, `T`.
    Tera,
    /// 10^15, `P`.
    Peta,
    /// 10^18, `E`.
    Exa,
}

impl SuffixUnit {
    const ALL: [Self; 6] = [
        Self::Kilo,
        Self::Mega,
        Self::Giga,
        Self::Tera,
        Self::Peta,
        Self::Exa,
    ];

    /// The multiplier this suffix stands for.
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Self::Kilo => 1e3,
            Self::Mega => 1e6,
            Self::Giga => 1e9,
            Self::Tera => 1e12,
            Self::Peta => 1e15,
            Self::Exa => 1e18,
        }
    }

    /// The suffix text.
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::Kilo => "K",
            Self::Mega => "M",
            Self::Giga => "G",
            Self::Tera => "T",
            Self::Peta => "P",
            Self::Exa => "E",
        }
    }
}

/// Labels like `2.5M`: values from `start_unit` upwards are scaled by their magnitude and
/// rounded to one decimal.
#[derive(Clone, Debug, Default)]
pub struct SuffixLabels {
    settings: LabelSettings,
    start_unit: SuffixUnit,
    format: NumberFormat,
    cache: LabelsCache,
}

impl SuffixLabels {
    /// Starts suffixing at millions.
    #[must_use]
    pub fn new(settings: LabelSettings) -> Self {
        Self {
            settings,
            start_unit: SuffixUnit::Mega,
            format: NumberFormat::default(),
            cache: LabelsCache::new(),
        }
    }

    /// Sets the smallest magnitude that gets a suffix.
    #[must_use]
    pub fn with_start_unit(mut self, unit: SuffixUnit) -> Self {
        self.start_unit = unit;
        self
    }

    /// Formats `scalar` with its suffix.
    #[must_use]
    pub fn text(&self, scalar: f64) -> String {
        let sign = if scalar < 0.0 { "-" } else { "" };
        let abs = scalar.abs();
        if abs < self.start_unit.factor() {
            return alloc::format!("{sign}{}", self.format.format(abs));
        }
        let exponent = (abs.log10() / 3.0).floor();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "clamped to the suffix table below"
        )]
        let index = (exponent as usize).clamp(1, SuffixUnit::ALL.len()) - 1;
        let unit = SuffixUnit::ALL[index];
        let rounded = (10.0 * abs / unit.factor()).round() / 10.0;
        alloc::format!("{sign}{}{}", self.format.format(rounded), unit.text())
    }
}

impl AxisLabelsGenerator for SuffixLabels {
    fn labels_for(&self, scalar: f64, measurer: &dyn TextMeasurer) -> LabelList {
        single(self.text(scalar), &self.settings, measurer)
    }

    fn cache(&mut self) -> &mut LabelsCache {
        &mut self.cache
    }
}

/// Labels looked up in a fixed table. Scalars without an entry get no label.
#[derive(Clone, Debug, Default)]
pub struct FixedLabels {
    settings: LabelSettings,
    texts: HashMap<u64, String>,
    cache: LabelsCache,
}

impl FixedLabels {
    /// Creates a table from `(scalar, text)` pairs.
    #[must_use]
    pub fn new(settings: LabelSettings, entries: impl IntoIterator<Item = (f64, String)>) -> Self {
        Self {
            settings,
            texts: entries
                .into_iter()
                .map(|(scalar, text)| (scalar.to_bits(), text))
                .collect(),
            cache: LabelsCache::new(),
        }
    }

    /// Creates a table from axis values, skipping hidden ones.
    #[must_use]
    pub fn from_axis_values(
        settings: LabelSettings,
        values: &[AxisValue],
        format: &NumberFormat,
    ) -> Self {
        Self::new(
            settings,
            values
                .iter()
                .filter(|value| !value.hidden)
                .map(|value| (value.scalar, value.label_text(format))),
        )
    }
}

impl AxisLabelsGenerator for FixedLabels {
    fn labels_for(&self, scalar: f64, measurer: &dyn TextMeasurer) -> LabelList {
        match self.texts.get(&scalar.to_bits()) {
            Some(text) => single(text.clone(), &self.settings, measurer),
            None => LabelList::new(),
        }
    }

    fn cache(&mut self) -> &mut LabelsCache {
        &mut self.cache
    }
}

type LabelFn = Box<dyn Fn(f64) -> Vec<String>>;

/// Labels computed by a closure. Returning several strings stacks rows on X axes.
pub struct FnLabels {
    settings: LabelSettings,
    f: LabelFn,
    cache: LabelsCache,
}

impl fmt::Debug for FnLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnLabels")
            .field("settings", &self.settings)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl FnLabels {
    /// One label per scalar.
    #[must_use]
    pub fn new(settings: LabelSettings, f: impl Fn(f64) -> String + 'static) -> Self {
        Self::rows(settings, move |scalar| alloc::vec![f(scalar)])
    }

    /// Any number of label rows per scalar.
    #[must_use]
    pub fn rows(settings: LabelSettings, f: impl Fn(f64) -> Vec<String> + 'static) -> Self {
        Self {
            settings,
            f: Box::new(f),
            cache: LabelsCache::new(),
        }
    }

    /// Replaces the cache policies.
    #[must_use]
    pub fn with_cache(mut self, cache: LabelsCache) -> Self {
        self.cache = cache;
        self
    }
}

impl AxisLabelsGenerator for FnLabels {
    fn labels_for(&self, scalar: f64, measurer: &dyn TextMeasurer) -> LabelList {
        (self.f)(scalar)
            .into_iter()
            .map(|text| AxisLabel::new(text, self.settings.clone(), measurer))
            .collect()
    }

    fn cache(&mut self) -> &mut LabelsCache {
        &mut self.cache
    }
}
