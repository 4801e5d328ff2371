use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use hue_classify::{
    analyze, select, AnalysisCache, CacheKey, ParameterSet, SelectionLimits, Thresholds,
};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::AppError;
use crate::models::{AppConfig, BatchReport, ImageOutcome};
use crate::services::loader::load_pixels;

/// Cooperative cancellation handle.
///
/// Checked once per image boundary: a single image's analysis is cheap and
/// effectively atomic, so nothing interrupts a pixel loop in flight.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Runs analyses across a fixed-size worker pool.
///
/// Images are embarrassingly parallel: each worker reads its own pixel
/// buffer plus the shared read-only parameters, and the only shared mutable
/// state is the [`AnalysisCache`], which is locked per lookup -- never
/// while an analysis computes. The runner owns the cache; reusing one
/// runner across batches reuses cached results, and swapping parameters
/// means building a new runner (or calling `cache().clear()`).
pub struct BatchRunner {
    params: Arc<ParameterSet>,
    thresholds: Thresholds,
    limits: SelectionLimits,
    resize: (u32, u32),
    /// Parameter fingerprint, computed once per runner rather than per image.
    fingerprint: String,
    cache: Arc<AnalysisCache>,
    workers: usize,
    cancel: CancelFlag,
}

impl BatchRunner {
    /// Build a runner from validated configuration. Worker count defaults
    /// to the number of CPUs.
    pub fn new(config: &AppConfig) -> Self {
        let fingerprint = config.parameters.fingerprint();
        Self {
            params: Arc::new(config.parameters.clone()),
            thresholds: config.thresholds.clone(),
            limits: config.limits,
            resize: config.resize_dims(),
            fingerprint,
            cache: Arc::new(AnalysisCache::new()),
            workers: num_cpus::get(),
            cancel: CancelFlag::new(),
        }
    }

    /// Override the worker pool size (minimum 1).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Handle for cancelling the batch from another task.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// The result cache shared by all workers.
    pub fn cache(&self) -> &Arc<AnalysisCache> {
        &self.cache
    }

    /// Analyze and categorize every image, collecting per-image outcomes.
    ///
    /// A failed image becomes a `Failed` outcome; it never aborts the rest
    /// of the batch. Completion order between images is unconstrained; the
    /// report sorts outcomes by path.
    pub async fn run(&self, paths: Vec<PathBuf>) -> BatchReport {
        let started_at = chrono::Utc::now();
        let started = Instant::now();
        let total = paths.len();
        tracing::info!(images = total, workers = self.workers, "Starting batch");

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();

        let mut dispatched = 0usize;
        for path in paths {
            if self.cancel.is_cancelled() {
                tracing::warn!(
                    dispatched,
                    skipped = total - dispatched,
                    "Batch cancelled, skipping remaining images"
                );
                break;
            }
            dispatched += 1;

            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .expect("semaphore is never closed");
            let params = Arc::clone(&self.params);
            let cache = Arc::clone(&self.cache);
            let thresholds = self.thresholds.clone();
            let limits = self.limits;
            let resize = self.resize;
            let fingerprint = self.fingerprint.clone();

            tasks.spawn(async move {
                let _permit = permit;
                let blocking_path = path.clone();
                let joined = tokio::task::spawn_blocking(move || {
                    process_image(
                        &blocking_path,
                        resize,
                        &params,
                        &thresholds,
                        &limits,
                        &fingerprint,
                        &cache,
                    )
                })
                .await;

                joined.unwrap_or_else(|e| {
                    ImageOutcome::failed(path, format!("analysis worker panicked: {e}"))
                })
            });
        }

        let mut outcomes = Vec::with_capacity(dispatched);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => tracing::error!(%e, "Batch task could not be joined"),
            }
        }

        let report =
            BatchReport::from_outcomes(outcomes, started_at, started.elapsed().as_millis() as u64);
        tracing::info!(
            processed = report.processed,
            errors = report.errors,
            elapsed_ms = report.elapsed_ms,
            "Batch finished"
        );
        report
    }
}

/// Process a single image, turning any failure into a `Failed` outcome.
fn process_image(
    path: &Path,
    resize: (u32, u32),
    params: &ParameterSet,
    thresholds: &Thresholds,
    limits: &SelectionLimits,
    fingerprint: &str,
    cache: &AnalysisCache,
) -> ImageOutcome {
    match try_process(path, resize, params, thresholds, limits, fingerprint, cache) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(image = %path.display(), error = %e, "Skipping image");
            ImageOutcome::failed(path.to_path_buf(), e.to_string())
        }
    }
}

fn try_process(
    path: &Path,
    resize: (u32, u32),
    params: &ParameterSet,
    thresholds: &Thresholds,
    limits: &SelectionLimits,
    fingerprint: &str,
    cache: &AnalysisCache,
) -> Result<ImageOutcome, AppError> {
    let buffer = load_pixels(path)?;

    // Canonical path as cache identity; unresolvable paths fall back to the
    // given form so the cache still works, just with a weaker key.
    let image_id = path
        .canonicalize()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| path.to_string_lossy().into_owned());
    let key = CacheKey::new(image_id, resize, fingerprint.to_string());

    let result = cache
        .get_or_compute(&key, || analyze(&buffer, resize, params))
        .map_err(|source| AppError::Analysis {
            path: path.to_path_buf(),
            source,
        })?;

    let selection = select(&result.percentages, thresholds, limits);
    Ok(ImageOutcome::analyzed(
        path.to_path_buf(),
        selection,
        result.percentages,
    ))
}
