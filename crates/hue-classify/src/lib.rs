//! hue-classify: weighted color categorization for images
//!
//! This library classifies an image's pixels into a fixed set of weighted
//! color categories -- six chromatic hues (red, orange, yellow, green,
//! blue, pink) plus a catch-all achromatic bucket -- aggregates the
//! classifications into per-category percentages, and applies a
//! threshold/limit policy to decide which categories the image belongs to.
//!
//! # Quick Start
//!
//! ```
//! use hue_classify::{analyze, select, ParameterSet, PixelBuffer, Rgb};
//! use hue_classify::{SelectionLimits, Thresholds, DEFAULT_RESIZE};
//!
//! let params = ParameterSet::default();
//!
//! // A decoded RGB buffer from any source.
//! let pixels = vec![Rgb::from_u8(200, 30, 30); 64 * 64];
//! let image = PixelBuffer::new(pixels, 64, 64).unwrap();
//!
//! let result = analyze(&image, DEFAULT_RESIZE, &params).unwrap();
//! let picked = select(
//!     &result.percentages,
//!     &Thresholds::default(),
//!     &SelectionLimits::default(),
//! );
//!
//! assert!(!picked.is_empty());
//! ```
//!
//! # Pipeline
//!
//! ```text
//! Rgb pixel buffer        (decoded by the caller)
//!     |
//!     v
//! box resize              (deterministic, default 100x100)
//!     |
//!     v
//! Hsv conversion          (per pixel)
//!     |
//!     v
//! classify()              (achromatic gate, then hue windows -> CategorySet)
//!     |
//!     v
//! weighted aggregation    (raw counts x range weights -> percentages)
//!     |
//!     v
//! select()                (thresholds + min/max limit policy -> final set)
//! ```
//!
//! # Weighting
//!
//! Hue windows differ wildly in angular width (green may own 90 degrees
//! while orange owns 30), so raw pixel counts would let wide categories
//! dominate purely by area. Each category's count is therefore multiplied
//! by a range weight before normalization:
//!
//! - With explicit `hue_weights` configured, the weight is the mean of the
//!   *squares* of those values, amplifying user emphasis non-linearly.
//! - Without them, the inverse-size heuristic `360 / (size + 60)` boosts
//!   narrow categories.
//! - Achromatic is always weighted 1.0.
//!
//! # Caching
//!
//! [`AnalysisCache`] memoizes [`analyze`] output keyed by image identity,
//! analysis resolution, and a SHA-256 fingerprint of the parameter set.
//! Analysis is pure and deterministic, so cached results are exact. The
//! cache is an explicit handle owned by the caller; clear it whenever
//! parameters change.

pub mod analyze;
pub mod cache;
pub mod category;
pub mod classify;
pub mod color;
pub mod error;
pub mod params;
pub mod select;


pub use analyze::{analyze, AnalysisResult, PixelBuffer, DEFAULT_RESIZE};
pub use cache::{AnalysisCache, CacheKey};
pub use category::{CategoryMap, CategorySet, ColorCategory};
pub use classify::classify;
pub use color::{Hsv, Rgb};
pub use error::{AnalysisError, ParamsError};
pub use params::{AchromaticParams, ChromaticParams, HueRange, ParameterSet};
pub use select::{dominant, select, LimitBounds, SelectionLimits, Thresholds, DEFAULT_THRESHOLD};
