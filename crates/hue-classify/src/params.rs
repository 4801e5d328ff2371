//! Classification parameters: hue windows, gates, weights, and validation.
//!
//! A [`ParameterSet`] is the full tuning surface of the engine: one
//! [`ChromaticParams`] per hue category plus the [`AchromaticParams`]
//! thresholds that route pixels into the catch-all bucket. Parameter sets
//! are immutable once loaded; every malformed value is rejected here, at
//! load time, so the per-pixel path never has to re-check anything.
//!
//! The JSON shape accepted by [`ParameterSet::from_json`]:
//!
//! ```json
//! {
//!   "red": {
//!     "hue_ranges": [[0.0, 30.0], [330.0, 360.0]],
//!     "hue_weights": [1.0, 1.0],
//!     "saturation_range": [0.0, 1.0],
//!     "value_range": [0.0, 1.0]
//!   },
//!   "achromatic": {
//!     "saturation_threshold": 0.15,
//!     "low_value_threshold": 0.15,
//!     "high_value_threshold": 1.0
//!   }
//! }
//! ```
//!
//! Omitted categories and fields fall back to the stock hue wheel.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::category::ColorCategory;
use crate::error::ParamsError;

/// A half-open hue window `[min, max)` in degrees.
///
/// A category owns a *list* of independent ranges. Colors that straddle the
/// top of the hue circle (red) are expressed as two disjoint ranges, one at
/// each end; there is no wrap-around range type.
///
/// Serializes as a two-element array `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct HueRange {
    pub min: f32,
    pub max: f32,
}

impl HueRange {
    #[inline]
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Whether `h` falls inside `[min, max)`.
    #[inline]
    pub fn contains(&self, h: f32) -> bool {
        h >= self.min && h < self.max
    }

    /// Angular width in degrees.
    #[inline]
    pub fn size(&self) -> f32 {
        self.max - self.min
    }
}

impl From<[f32; 2]> for HueRange {
    fn from(pair: [f32; 2]) -> Self {
        HueRange::new(pair[0], pair[1])
    }
}

impl From<HueRange> for [f32; 2] {
    fn from(range: HueRange) -> Self {
        [range.min, range.max]
    }
}

/// Tuning for one chromatic category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChromaticParams {
    /// Hue windows owned by the category. Ranges of different categories may
    /// overlap; a pixel then belongs to all of them.
    pub hue_ranges: Vec<HueRange>,

    /// Optional per-range emphasis, one entry per hue range.
    ///
    /// When present, the category's aggregation weight is the mean of the
    /// *squares* of these values. When absent, the weight falls back to the
    /// inverse-size heuristic (see [`Self::range_weight`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue_weights: Option<Vec<f64>>,

    /// Saturation gate `[min, max]`, inclusive, subset of `[0, 1]`.
    #[serde(default = "full_unit_range")]
    pub saturation_range: [f32; 2],

    /// Value gate `[min, max]`, inclusive, subset of `[0, 1]`.
    #[serde(default = "full_unit_range")]
    pub value_range: [f32; 2],
}

fn full_unit_range() -> [f32; 2] {
    [0.0, 1.0]
}

impl ChromaticParams {
    /// Category tuning with the given hue windows, no explicit weights, and
    /// wide-open saturation/value gates.
    pub fn new(hue_ranges: Vec<HueRange>) -> Self {
        Self {
            hue_ranges,
            hue_weights: None,
            saturation_range: full_unit_range(),
            value_range: full_unit_range(),
        }
    }

    /// Attach explicit per-range weights.
    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.hue_weights = Some(weights);
        self
    }

    /// Whether saturation and value both pass this category's gates.
    #[inline]
    pub(crate) fn admits(&self, s: f32, v: f32) -> bool {
        s >= self.saturation_range[0]
            && s <= self.saturation_range[1]
            && v >= self.value_range[0]
            && v <= self.value_range[1]
    }

    /// Combined angular width of all hue ranges, in degrees.
    pub fn total_range_size(&self) -> f64 {
        self.hue_ranges.iter().map(|r| r.size() as f64).sum()
    }

    /// Aggregation weight for this category.
    ///
    /// With explicit `hue_weights`, the weight is the mean of their squares,
    /// which amplifies user-supplied emphasis non-linearly: weights
    /// `[2.0, 1.0]` yield `(4 + 1) / 2 = 2.5`, not `1.5`.
    ///
    /// Without explicit weights, the inverse-size heuristic
    /// `360 / (total_size + 60)` boosts categories with narrow hue windows
    /// so that wide ranges cannot dominate purely by angular area.
    pub fn range_weight(&self) -> f64 {
        match &self.hue_weights {
            Some(weights) if !weights.is_empty() => {
                weights.iter().map(|w| w * w).sum::<f64>() / weights.len() as f64
            }
            _ => 360.0 / (self.total_range_size() + 60.0),
        }
    }
}

/// Thresholds routing pixels into the achromatic bucket.
///
/// A pixel is achromatic when its saturation is below
/// `saturation_threshold`, or its value is below `low_value_threshold`
/// (near black), or above `high_value_threshold` (near white). The default
/// high threshold is 1.0, which disables the bright cutoff: fully saturated
/// primaries have value 1.0 and must stay chromatic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AchromaticParams {
    #[serde(default = "default_saturation_threshold")]
    pub saturation_threshold: f32,
    #[serde(default = "default_low_value_threshold")]
    pub low_value_threshold: f32,
    #[serde(default = "default_high_value_threshold")]
    pub high_value_threshold: f32,
}

fn default_saturation_threshold() -> f32 {
    0.15
}

fn default_low_value_threshold() -> f32 {
    0.15
}

fn default_high_value_threshold() -> f32 {
    1.0
}

impl Default for AchromaticParams {
    fn default() -> Self {
        Self {
            saturation_threshold: default_saturation_threshold(),
            low_value_threshold: default_low_value_threshold(),
            high_value_threshold: default_high_value_threshold(),
        }
    }
}

/// The complete, validated tuning surface of the engine.
///
/// One [`ChromaticParams`] per hue category plus the achromatic thresholds.
/// Construct via [`Default`] (the stock hue wheel), or [`from_json`]
/// (which validates), or by mutating fields and calling [`validate`]
/// before use. The analyzer assumes a validated set.
///
/// [`from_json`]: Self::from_json
/// [`validate`]: Self::validate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    #[serde(default = "default_red")]
    pub red: ChromaticParams,
    #[serde(default = "default_orange")]
    pub orange: ChromaticParams,
    #[serde(default = "default_yellow")]
    pub yellow: ChromaticParams,
    #[serde(default = "default_green")]
    pub green: ChromaticParams,
    #[serde(default = "default_blue")]
    pub blue: ChromaticParams,
    #[serde(default = "default_pink")]
    pub pink: ChromaticParams,
    #[serde(default)]
    pub achromatic: AchromaticParams,
}

// Stock hue wheel. Red takes both ends of the circle as two disjoint
// ranges. Every category carries explicit unit weights, so the default
// aggregation weight is 1.0 across the board; the inverse-size heuristic
// only kicks in for configs that omit hue_weights.

fn default_red() -> ChromaticParams {
    ChromaticParams::new(vec![HueRange::new(0.0, 30.0), HueRange::new(330.0, 360.0)])
        .with_weights(vec![1.0, 1.0])
}

fn default_orange() -> ChromaticParams {
    ChromaticParams::new(vec![HueRange::new(30.0, 60.0)]).with_weights(vec![1.0])
}

fn default_yellow() -> ChromaticParams {
    ChromaticParams::new(vec![HueRange::new(60.0, 90.0)]).with_weights(vec![1.0])
}

fn default_green() -> ChromaticParams {
    ChromaticParams::new(vec![HueRange::new(90.0, 180.0)]).with_weights(vec![1.0])
}

fn default_blue() -> ChromaticParams {
    ChromaticParams::new(vec![HueRange::new(180.0, 270.0)]).with_weights(vec![1.0])
}

fn default_pink() -> ChromaticParams {
    ChromaticParams::new(vec![HueRange::new(270.0, 330.0)]).with_weights(vec![1.0])
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            red: default_red(),
            orange: default_orange(),
            yellow: default_yellow(),
            green: default_green(),
            blue: default_blue(),
            pink: default_pink(),
            achromatic: AchromaticParams::default(),
        }
    }
}

impl ParameterSet {
    /// Parse and validate a parameter set from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::Json`] for malformed JSON and the specific
    /// validation variant for out-of-range values. Nothing is silently
    /// defaulted: a malformed hue range would change classification results
    /// behind the caller's back, so loading fails instead.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        let set: ParameterSet =
            serde_json::from_str(json).map_err(|e| ParamsError::Json(e.to_string()))?;
        set.validate()?;
        Ok(set)
    }

    /// The chromatic tuning for `category`, or `None` for achromatic.
    pub fn chromatic(&self, category: ColorCategory) -> Option<&ChromaticParams> {
        match category {
            ColorCategory::Red => Some(&self.red),
            ColorCategory::Orange => Some(&self.orange),
            ColorCategory::Yellow => Some(&self.yellow),
            ColorCategory::Green => Some(&self.green),
            ColorCategory::Blue => Some(&self.blue),
            ColorCategory::Pink => Some(&self.pink),
            ColorCategory::Achromatic => None,
        }
    }

    /// All six chromatic categories paired with their tuning, in tie-break
    /// order. The iteration order of the classifier and aggregator.
    pub fn chromatic_entries(&self) -> [(ColorCategory, &ChromaticParams); 6] {
        [
            (ColorCategory::Red, &self.red),
            (ColorCategory::Orange, &self.orange),
            (ColorCategory::Yellow, &self.yellow),
            (ColorCategory::Green, &self.green),
            (ColorCategory::Blue, &self.blue),
            (ColorCategory::Pink, &self.pink),
        ]
    }

    /// Check every range and threshold.
    ///
    /// # Errors
    ///
    /// The first violation found, as a [`ParamsError`] naming the offending
    /// category and values.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (category, params) in self.chromatic_entries() {
            validate_chromatic(category, params)?;
        }
        validate_achromatic(&self.achromatic)
    }

    /// Stable hex SHA-256 over the canonical JSON serialization.
    ///
    /// Identical parameter sets always produce identical fingerprints, so
    /// the fingerprint is usable as a cache key component: any parameter
    /// change changes the key and naturally misses the cache.
    pub fn fingerprint(&self) -> String {
        let canonical =
            serde_json::to_string(self).expect("ParameterSet always serializes to JSON");
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        hex::encode(hasher.finalize())
    }
}

fn validate_chromatic(
    category: ColorCategory,
    params: &ChromaticParams,
) -> Result<(), ParamsError> {
    for range in &params.hue_ranges {
        if !(range.min >= 0.0 && range.min < range.max && range.max <= 360.0) {
            return Err(ParamsError::InvalidHueRange {
                category,
                min: range.min,
                max: range.max,
            });
        }
    }

    validate_unit_range(category, "saturation", params.saturation_range)?;
    validate_unit_range(category, "value", params.value_range)?;

    if let Some(weights) = &params.hue_weights {
        if weights.len() != params.hue_ranges.len() {
            return Err(ParamsError::WeightCountMismatch {
                category,
                ranges: params.hue_ranges.len(),
                supplied: weights.len(),
            });
        }
        for &weight in weights {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ParamsError::InvalidWeight {
                    category,
                    value: weight,
                });
            }
        }
    }

    Ok(())
}

fn validate_unit_range(
    category: ColorCategory,
    kind: &'static str,
    range: [f32; 2],
) -> Result<(), ParamsError> {
    if range[0] >= 0.0 && range[0] < range[1] && range[1] <= 1.0 {
        Ok(())
    } else {
        Err(ParamsError::InvalidUnitRange {
            category,
            kind,
            min: range[0],
            max: range[1],
        })
    }
}

fn validate_achromatic(params: &AchromaticParams) -> Result<(), ParamsError> {
    let thresholds = [
        ("saturation_threshold", params.saturation_threshold),
        ("low_value_threshold", params.low_value_threshold),
        ("high_value_threshold", params.high_value_threshold),
    ];
    for (name, value) in thresholds {
        if !(0.0..=1.0).contains(&value) {
            return Err(ParamsError::ThresholdOutOfRange { name, value });
        }
    }

    if params.low_value_threshold > params.high_value_threshold {
        return Err(ParamsError::InvertedValueThresholds {
            low: params.low_value_threshold,
            high: params.high_value_threshold,
        });
    }

    Ok(())
}
