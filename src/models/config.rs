use std::path::Path;

use hue_classify::{ParameterSet, SelectionLimits, Thresholds};
use serde::Deserialize;

use crate::error::AppError;

/// Application configuration loaded from a JSON file.
///
/// Every section is optional; omitted sections use the engine defaults
/// (stock hue wheel, 10% thresholds, 100x100 analysis resolution). Loading
/// is fail-fast: a malformed value aborts instead of silently defaulting,
/// since a quietly "fixed" hue range would change classification results
/// without the caller knowing.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Per-category hue windows, gates, and weights.
    #[serde(default)]
    pub parameters: ParameterSet,

    /// Per-category selection thresholds in percent.
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Min/max bounds on selected non-achromatic categories.
    #[serde(default)]
    pub limits: SelectionLimits,

    /// Analysis resolution `[width, height]`.
    #[serde(default = "default_resize")]
    pub resize: [u32; 2],
}

fn default_resize() -> [u32; 2] {
    let (w, h) = hue_classify::DEFAULT_RESIZE;
    [w, h]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            parameters: ParameterSet::default(),
            thresholds: Thresholds::default(),
            limits: SelectionLimits::default(),
            resize: default_resize(),
        }
    }
}

impl AppConfig {
    /// Load and validate configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&content).map_err(|source| AppError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;

        tracing::info!(
            config = %path.display(),
            resize_width = config.resize[0],
            resize_height = config.resize[1],
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load `path` if given, otherwise the validated defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Check every section. Parameter validation is delegated to the
    /// engine; thresholds and limits are checked here because the engine
    /// deliberately accepts out-of-range values for them.
    pub fn validate(&self) -> Result<(), AppError> {
        self.parameters.validate()?;

        for (category, value) in self.thresholds.iter() {
            if !(0.0..=100.0).contains(&value) {
                return Err(AppError::ThresholdOutOfRange { category, value });
            }
        }

        for (variant, bounds) in [
            ("with_achromatic", self.limits.with_achromatic),
            ("without_achromatic", self.limits.without_achromatic),
        ] {
            if bounds.min_colors > bounds.max_colors {
                return Err(AppError::LimitsInvalid {
                    variant,
                    min: bounds.min_colors,
                    max: bounds.max_colors,
                });
            }
        }

        if self.resize[0] == 0 || self.resize[1] == 0 {
            return Err(AppError::ResizeInvalid {
                width: self.resize[0],
                height: self.resize[1],
            });
        }

        Ok(())
    }

    /// Analysis resolution as the tuple the engine expects.
    pub fn resize_dims(&self) -> (u32, u32) {
        (self.resize[0], self.resize[1])
    }
}
