//! Per-pixel classification: HSV to a set of category labels.

use crate::category::{CategorySet, ColorCategory};
use crate::color::Hsv;
use crate::params::ParameterSet;

/// Classify one pixel into its set of categories.
///
/// The achromatic thresholds are checked first: a pixel that is too
/// desaturated, too dark, or too bright is exactly `{achromatic}` and no
/// chromatic test runs. Otherwise every chromatic category whose
/// saturation/value gates admit the pixel and whose hue windows contain `h`
/// is included -- ranges may overlap by configuration, so a pixel can carry
/// several labels. A pixel matching nothing falls back to `{achromatic}`.
///
/// Total over all inputs and never returns an empty set. Assumes a
/// validated [`ParameterSet`]; malformed parameters are a load-time error,
/// not a per-pixel one.
///
/// # Example
///
/// ```
/// use hue_classify::{classify, ColorCategory, Hsv, ParameterSet, Rgb};
///
/// let params = ParameterSet::default();
///
/// let red = classify(Hsv::from(Rgb::from_u8(255, 0, 0)), &params);
/// assert!(red.contains(ColorCategory::Red));
///
/// let black = classify(Hsv::from(Rgb::from_u8(0, 0, 0)), &params);
/// assert_eq!(black.to_vec(), vec![ColorCategory::Achromatic]);
/// ```
pub fn classify(hsv: Hsv, params: &ParameterSet) -> CategorySet {
    let achromatic = &params.achromatic;
    if hsv.s < achromatic.saturation_threshold
        || hsv.v < achromatic.low_value_threshold
        || hsv.v > achromatic.high_value_threshold
    {
        return CategorySet::single(ColorCategory::Achromatic);
    }

    let mut set = CategorySet::empty();
    for (category, chromatic) in params.chromatic_entries() {
        if !chromatic.admits(hsv.s, hsv.v) {
            continue;
        }
        if chromatic.hue_ranges.iter().any(|r| r.contains(hsv.h)) {
            set.insert(category);
        }
    }

    if set.is_empty() {
        set.insert(ColorCategory::Achromatic);
    }
    set
}
