//! Read-through memoization of analysis results.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::analyze::AnalysisResult;
use crate::error::AnalysisError;

/// Cache key: image identity, analysis resolution, parameter fingerprint.
///
/// The fingerprint component means a parameter change naturally misses; an
/// explicit [`AnalysisCache::clear`] on configuration change keeps stale
/// entries from accumulating.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Caller-chosen identity of the source image (typically its path).
    pub image_id: String,
    /// Analysis resolution the result was computed at.
    pub resize: (u32, u32),
    /// [`ParameterSet::fingerprint`](crate::ParameterSet::fingerprint) of
    /// the parameters used.
    pub fingerprint: String,
}

impl CacheKey {
    pub fn new(image_id: impl Into<String>, resize: (u32, u32), fingerprint: String) -> Self {
        Self {
            image_id: image_id.into(),
            resize,
            fingerprint,
        }
    }
}

/// Memoized analysis results, keyed by [`CacheKey`].
///
/// An explicit handle owned by the batch orchestrator and shared by
/// reference -- never a hidden process-wide singleton. Safe to share across
/// worker threads; the lock is held only for map access, never while an
/// analysis computes. Two concurrent misses on the same key may both
/// compute; the second insert overwrites the first with an identical value.
pub struct AnalysisCache {
    entries: RwLock<HashMap<CacheKey, AnalysisResult>>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Retrieve a cached result.
    pub fn get(&self, key: &CacheKey) -> Option<AnalysisResult> {
        let entries = self.entries.read().expect("cache lock poisoned");
        entries.get(key).cloned()
    }

    /// Store a result, replacing any previous entry for the key.
    pub fn store(&self, key: CacheKey, result: AnalysisResult) {
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.insert(key, result);
    }

    /// Return the cached result for `key`, or run `compute`, store its
    /// output, and return it. Errors from `compute` are passed through and
    /// nothing is stored.
    pub fn get_or_compute<F>(&self, key: &CacheKey, compute: F) -> Result<AnalysisResult, AnalysisError>
    where
        F: FnOnce() -> Result<AnalysisResult, AnalysisError>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }
        let result = compute()?;
        self.store(key.clone(), result.clone());
        Ok(result)
    }

    /// Drop every entry. Call whenever parameters change.
    pub fn clear(&self) {
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.clear();
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        let entries = self.entries.read().expect("cache lock poisoned");
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new()
    }
}
