//! Threshold/limit selection: percentages to a final category list.
//!
//! The selector decides which categories an image "belongs to". Thresholds
//! produce the initial pick; the limit policy then pads or trims the
//! *non-achromatic* subset into the configured bounds. The result is never
//! empty: when nothing clears a threshold the single highest-percentage
//! category stands in.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::category::{CategoryMap, CategorySet, ColorCategory};

/// Default per-category threshold, in percent.
pub const DEFAULT_THRESHOLD: f64 = 10.0;

/// Per-category percentage cutoffs.
///
/// Deserializes from a partial `{category: percent}` map; unnamed
/// categories keep [`DEFAULT_THRESHOLD`]. The selector itself accepts any
/// values -- deliberately unreachable thresholds (above 100) are a valid
/// way to force the highest-percentage fallback. Range checking to
/// `[0, 100]` is a configuration-load concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "HashMap<ColorCategory, f64>",
    into = "HashMap<ColorCategory, f64>"
)]
pub struct Thresholds {
    values: CategoryMap<f64>,
}

impl Thresholds {
    /// The same threshold for every category.
    pub fn uniform(percent: f64) -> Self {
        Self {
            values: CategoryMap::from_fn(|_| percent),
        }
    }

    #[inline]
    pub fn get(&self, category: ColorCategory) -> f64 {
        self.values[category]
    }

    pub fn set(&mut self, category: ColorCategory, percent: f64) {
        self.values[category] = percent;
    }

    /// Entries in tie-break order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorCategory, f64)> + '_ {
        self.values.iter().map(|(c, v)| (c, *v))
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::uniform(DEFAULT_THRESHOLD)
    }
}

impl From<HashMap<ColorCategory, f64>> for Thresholds {
    fn from(map: HashMap<ColorCategory, f64>) -> Self {
        let mut thresholds = Thresholds::default();
        for (category, percent) in map {
            thresholds.set(category, percent);
        }
        thresholds
    }
}

impl From<Thresholds> for HashMap<ColorCategory, f64> {
    fn from(thresholds: Thresholds) -> Self {
        ColorCategory::ALL
            .iter()
            .map(|&c| (c, thresholds.get(c)))
            .collect()
    }
}

/// Bounds on the number of non-achromatic categories in a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitBounds {
    pub min_colors: usize,
    pub max_colors: usize,
}

impl LimitBounds {
    pub fn new(min_colors: usize, max_colors: usize) -> Self {
        Self {
            min_colors,
            max_colors,
        }
    }
}

/// The limit policy, switched on whether achromatic was selected.
///
/// Both variants bound only the non-achromatic subset; achromatic itself is
/// never padded in or trimmed out by the limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionLimits {
    #[serde(default = "default_with_achromatic")]
    pub with_achromatic: LimitBounds,
    #[serde(default = "default_without_achromatic")]
    pub without_achromatic: LimitBounds,
}

fn default_with_achromatic() -> LimitBounds {
    LimitBounds::new(1, 2)
}

fn default_without_achromatic() -> LimitBounds {
    LimitBounds::new(1, 3)
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            with_achromatic: default_with_achromatic(),
            without_achromatic: default_without_achromatic(),
        }
    }
}

/// The highest-percentage category, ties broken by the fixed category
/// ordering. Achromatic when every percentage is zero.
pub fn dominant(percentages: &CategoryMap<f64>) -> ColorCategory {
    let mut best = ColorCategory::Red;
    for category in ColorCategory::ALL {
        if percentages[category] > percentages[best] {
            best = category;
        }
    }
    if percentages[best] > 0.0 {
        best
    } else {
        ColorCategory::Achromatic
    }
}

/// Turn percentages into the final category list.
///
/// 1. Select every category at or above its threshold.
/// 2. Pick the limit variant by achromatic membership.
/// 3. Pad the non-achromatic subset from unselected categories with nonzero
///    percentage (highest first) until `min_colors` is met or candidates
///    run out.
/// 4. Trim the non-achromatic subset to the top `max_colors`; achromatic is
///    always retained.
/// 5. An empty selection falls back to [`dominant`], so the result is never
///    empty.
///
/// All ordering ties break by the fixed category ordering, which keeps the
/// function deterministic for equal percentages.
///
/// # Example
///
/// ```
/// use hue_classify::{select, CategoryMap, ColorCategory, SelectionLimits, Thresholds};
///
/// let mut percentages: CategoryMap<f64> = CategoryMap::default();
/// percentages[ColorCategory::Blue] = 70.0;
/// percentages[ColorCategory::Green] = 30.0;
///
/// let picked = select(
///     &percentages,
///     &Thresholds::default(),
///     &SelectionLimits::default(),
/// );
/// assert!(picked.contains(ColorCategory::Blue));
/// assert!(picked.contains(ColorCategory::Green));
/// ```
pub fn select(
    percentages: &CategoryMap<f64>,
    thresholds: &Thresholds,
    limits: &SelectionLimits,
) -> CategorySet {
    let mut selected = CategorySet::empty();
    for category in ColorCategory::ALL {
        if percentages[category] >= thresholds.get(category) {
            selected.insert(category);
        }
    }

    let bounds = if selected.contains(ColorCategory::Achromatic) {
        &limits.with_achromatic
    } else {
        &limits.without_achromatic
    };

    let mut chromatic: Vec<ColorCategory> =
        selected.iter().filter(|c| c.is_chromatic()).collect();

    if chromatic.len() < bounds.min_colors {
        let mut candidates: Vec<ColorCategory> = ColorCategory::CHROMATIC
            .into_iter()
            .filter(|&c| !selected.contains(c) && percentages[c] > 0.0)
            .collect();
        sort_by_percentage_desc(&mut candidates, percentages);

        for category in candidates {
            if chromatic.len() >= bounds.min_colors {
                break;
            }
            chromatic.push(category);
            selected.insert(category);
        }
    }

    if chromatic.len() > bounds.max_colors {
        sort_by_percentage_desc(&mut chromatic, percentages);
        for category in chromatic.drain(bounds.max_colors..) {
            selected.remove(category);
        }
    }

    if selected.is_empty() {
        return CategorySet::single(dominant(percentages));
    }
    selected
}

/// Stable descending sort by percentage. Candidates arrive in tie-break
/// order, so equal percentages keep that order.
fn sort_by_percentage_desc(categories: &mut [ColorCategory], percentages: &CategoryMap<f64>) {
    categories.sort_by(|&a, &b| {
        percentages[b]
            .partial_cmp(&percentages[a])
            .unwrap_or(Ordering::Equal)
    });
}
