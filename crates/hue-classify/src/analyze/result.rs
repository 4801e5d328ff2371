//! The output of a full-image analysis.

use serde::Serialize;

use crate::category::{CategoryMap, ColorCategory};
use crate::select::dominant;

/// Per-category percentages and the diagnostics behind them.
///
/// Percentages are weighted: each category's raw pixel count is multiplied
/// by its range weight before normalization, so they sum to 100 whenever
/// any weighted count is non-zero. Raw counts are *not* mutually exclusive
/// (a pixel can belong to several categories), so they need not sum to the
/// pixel count.
///
/// `range_sizes` and `range_weights` are exposed for external tuning tools;
/// the engine itself only needs `percentages`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Weighted share per category; all zero only when nothing was counted.
    pub percentages: CategoryMap<f64>,
    /// Unweighted pixel tallies per category.
    pub raw_counts: CategoryMap<u64>,
    /// Combined hue-range width in degrees per chromatic category
    /// (0 for achromatic, which has no hue ranges).
    pub range_sizes: CategoryMap<f64>,
    /// The weight each raw count was multiplied by (1.0 for achromatic).
    pub range_weights: CategoryMap<f64>,
}

impl AnalysisResult {
    /// Weighted percentage for one category.
    #[inline]
    pub fn percentage(&self, category: ColorCategory) -> f64 {
        self.percentages[category]
    }

    /// The highest-percentage category under the fixed tie-break ordering;
    /// achromatic when every percentage is zero.
    pub fn dominant(&self) -> ColorCategory {
        dominant(&self.percentages)
    }

    /// Sum of all weighted percentages. 100 (within float tolerance) for
    /// any non-empty analysis, 0 when nothing was counted.
    pub fn total_percentage(&self) -> f64 {
        ColorCategory::ALL.iter().map(|&c| self.percentages[c]).sum()
    }
}
