//! Chromasort
//!
//! Batch orchestrator over the hue-classify engine: decodes images, runs
//! weighted color categorization across a worker pool, and reports
//! per-image outcomes. This library exposes modules for integration
//! testing.

pub mod error;
pub mod models;
pub mod services;
