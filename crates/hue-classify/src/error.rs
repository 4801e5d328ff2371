//! Error types for the classification engine.
//!
//! Per-pixel and per-category logic is total; only two boundaries can fail.
//! [`ParamsError`] covers malformed configuration and is raised once at load
//! time, never during scanning. [`AnalysisError`] covers unusable image
//! input and is reported per image, so a bad file in a batch never aborts
//! the rest.

use thiserror::Error;

use crate::category::ColorCategory;

/// A parameter set failed validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamsError {
    #[error("{category}: hue range [{min}, {max}) is invalid (need 0 <= min < max <= 360)")]
    InvalidHueRange {
        category: ColorCategory,
        min: f32,
        max: f32,
    },

    #[error("{category}: {kind} range [{min}, {max}] is invalid (need 0 <= min < max <= 1)")]
    InvalidUnitRange {
        category: ColorCategory,
        kind: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{category}: {supplied} hue weights supplied for {ranges} hue ranges")]
    WeightCountMismatch {
        category: ColorCategory,
        ranges: usize,
        supplied: usize,
    },

    #[error("{category}: hue weight {value} is not a positive finite number")]
    InvalidWeight { category: ColorCategory, value: f64 },

    #[error("achromatic {name} is {value}, outside [0, 1]")]
    ThresholdOutOfRange { name: &'static str, value: f32 },

    #[error("achromatic value thresholds inverted: low {low} > high {high}")]
    InvertedValueThresholds { low: f32, high: f32 },

    #[error("malformed parameter JSON: {0}")]
    Json(String),
}

/// The image handed to the analyzer cannot be scanned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("invalid image: zero dimension ({width}x{height})")]
    ZeroDimensions { width: u32, height: u32 },

    #[error("invalid image: pixel buffer holds {actual} pixels, expected {expected}")]
    PixelCountMismatch { expected: usize, actual: usize },

    #[error("invalid resize target: {width}x{height}")]
    InvalidResize { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_error_messages_name_the_category() {
        let err = ParamsError::InvalidHueRange {
            category: ColorCategory::Red,
            min: 40.0,
            max: 30.0,
        };
        assert_eq!(
            err.to_string(),
            "red: hue range [40, 30) is invalid (need 0 <= min < max <= 360)"
        );

        let err = ParamsError::WeightCountMismatch {
            category: ColorCategory::Pink,
            ranges: 2,
            supplied: 1,
        };
        assert_eq!(err.to_string(), "pink: 1 hue weights supplied for 2 hue ranges");
    }

    #[test]
    fn test_analysis_error_messages() {
        let err = AnalysisError::ZeroDimensions {
            width: 0,
            height: 40,
        };
        assert_eq!(err.to_string(), "invalid image: zero dimension (0x40)");

        let err = AnalysisError::PixelCountMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "invalid image: pixel buffer holds 3 pixels, expected 4"
        );
    }
}
