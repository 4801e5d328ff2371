use std::path::PathBuf;

use hue_classify::{AnalysisError, ColorCategory, ParamsError};
use thiserror::Error;

/// Application-level errors.
///
/// Configuration variants are fail-fast: they abort the command before any
/// image is touched. `Decode` and `Analysis` are per-image: the batch
/// records them as failed outcomes and keeps going.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid parameters: {0}")]
    Params(#[from] ParamsError),

    #[error("threshold for {category} is {value}, outside [0, 100]")]
    ThresholdOutOfRange { category: ColorCategory, value: f64 },

    #[error("selection limits invalid ({variant}): min_colors {min} > max_colors {max}")]
    LimitsInvalid {
        variant: &'static str,
        min: usize,
        max: usize,
    },

    #[error("resize dimensions invalid: {width}x{height}")]
    ResizeInvalid { width: u32, height: u32 },

    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("analysis failed for {path}: {source}")]
    Analysis {
        path: PathBuf,
        source: AnalysisError,
    },

    #[error("failed to scan directory {path}: {source}")]
    DirScan {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_error_message() {
        let error = AppError::ThresholdOutOfRange {
            category: ColorCategory::Pink,
            value: 120.0,
        };
        assert_eq!(
            error.to_string(),
            "threshold for pink is 120, outside [0, 100]"
        );
    }

    #[test]
    fn test_limits_error_message() {
        let error = AppError::LimitsInvalid {
            variant: "with_achromatic",
            min: 3,
            max: 1,
        };
        assert_eq!(
            error.to_string(),
            "selection limits invalid (with_achromatic): min_colors 3 > max_colors 1"
        );
    }
}
