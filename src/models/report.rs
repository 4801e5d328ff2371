use std::path::PathBuf;

use hue_classify::{CategoryMap, CategorySet, ColorCategory};
use serde::Serialize;

/// The result of processing one image in a batch.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ImageOutcome {
    /// The image was analyzed and categorized.
    Analyzed {
        path: PathBuf,
        /// Selected categories in tie-break order.
        categories: Vec<ColorCategory>,
        /// Weighted percentages behind the selection.
        percentages: CategoryMap<f64>,
    },
    /// The image could not be processed; the rest of the batch continues.
    Failed { path: PathBuf, error: String },
}

impl ImageOutcome {
    pub fn analyzed(path: PathBuf, selection: CategorySet, percentages: CategoryMap<f64>) -> Self {
        ImageOutcome::Analyzed {
            path,
            categories: selection.to_vec(),
            percentages,
        }
    }

    pub fn failed(path: PathBuf, error: String) -> Self {
        ImageOutcome::Failed { path, error }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            ImageOutcome::Analyzed { path, .. } => path,
            ImageOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_analyzed(&self) -> bool {
        matches!(self, ImageOutcome::Analyzed { .. })
    }
}

/// Aggregate batch output: counts first, then per-image detail.
///
/// `processed` and `errors` always accompany the category tallies so a
/// caller can tell "no red images" apart from "every image failed".
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Images successfully analyzed.
    pub processed: usize,
    /// Images that failed to decode or analyze.
    pub errors: usize,
    /// How many analyzed images were assigned each category.
    pub tallies: CategoryMap<u64>,
    /// When the batch started.
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// Wall-clock duration of the batch.
    pub elapsed_ms: u64,
    /// Per-image outcomes, sorted by path.
    pub outcomes: Vec<ImageOutcome>,
}

impl BatchReport {
    /// Assemble a report from collected outcomes.
    pub fn from_outcomes(
        mut outcomes: Vec<ImageOutcome>,
        started_at: chrono::DateTime<chrono::Utc>,
        elapsed_ms: u64,
    ) -> Self {
        outcomes.sort_by(|a, b| a.path().cmp(b.path()));

        let mut processed = 0;
        let mut errors = 0;
        let mut tallies: CategoryMap<u64> = CategoryMap::default();
        for outcome in &outcomes {
            match outcome {
                ImageOutcome::Analyzed { categories, .. } => {
                    processed += 1;
                    for &category in categories {
                        tallies[category] += 1;
                    }
                }
                ImageOutcome::Failed { .. } => errors += 1,
            }
        }

        Self {
            processed,
            errors,
            tallies,
            started_at,
            elapsed_ms,
            outcomes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percentages() -> CategoryMap<f64> {
        let mut map: CategoryMap<f64> = CategoryMap::default();
        map[ColorCategory::Red] = 100.0;
        map
    }

    #[test]
    fn test_report_counts_and_tallies() {
        let selection = CategorySet::single(ColorCategory::Red);
        let outcomes = vec![
            ImageOutcome::analyzed(PathBuf::from("b.png"), selection, percentages()),
            ImageOutcome::failed(PathBuf::from("a.png"), "decode error".into()),
            ImageOutcome::analyzed(PathBuf::from("c.png"), selection, percentages()),
        ];

        let report = BatchReport::from_outcomes(outcomes, chrono::Utc::now(), 12);
        assert_eq!(report.processed, 2);
        assert_eq!(report.errors, 1);
        assert_eq!(report.tallies[ColorCategory::Red], 2);
        assert_eq!(report.tallies[ColorCategory::Blue], 0);

        // Outcomes come back sorted by path.
        let paths: Vec<&PathBuf> = report.outcomes.iter().map(|o| o.path()).collect();
        assert_eq!(
            paths,
            vec![
                &PathBuf::from("a.png"),
                &PathBuf::from("b.png"),
                &PathBuf::from("c.png")
            ]
        );
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = ImageOutcome::failed(PathBuf::from("x.png"), "oops".into());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "oops");
    }
}
