//! End-to-end batch tests: decode real files from a temporary tree, run the
//! worker pool, and check the report against known-color images.

use std::path::{Path, PathBuf};

use chromasort::models::{AppConfig, ImageOutcome};
use chromasort::services::{loader, BatchRunner};
use hue_classify::ColorCategory;
use pretty_assertions::assert_eq;

fn write_png(dir: &Path, name: &str, rgb: [u8; 3], size: u32) -> PathBuf {
    let path = dir.join(name);
    let img = image::RgbImage::from_pixel(size, size, image::Rgb(rgb));
    img.save(&path).unwrap();
    path
}

#[tokio::test]
async fn test_scan_categorizes_a_mixed_tree() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("wallpapers");
    std::fs::create_dir(&nested).unwrap();

    write_png(dir.path(), "red.png", [255, 0, 0], 16);
    write_png(dir.path(), "green.png", [0, 200, 0], 16);
    write_png(&nested, "blue.png", [20, 20, 230], 16);
    write_png(&nested, "gray.png", [128, 128, 128], 16);
    std::fs::write(dir.path().join("readme.txt"), "not an image").unwrap();

    let paths = loader::collect_image_paths(dir.path()).unwrap();
    assert_eq!(paths.len(), 4);

    let runner = BatchRunner::new(&AppConfig::default()).with_workers(4);
    let report = runner.run(paths).await;

    assert_eq!(report.processed, 4);
    assert_eq!(report.errors, 0);
    assert_eq!(report.tallies[ColorCategory::Red], 1);
    assert_eq!(report.tallies[ColorCategory::Green], 1);
    assert_eq!(report.tallies[ColorCategory::Blue], 1);
    assert_eq!(report.tallies[ColorCategory::Achromatic], 1);

    for outcome in &report.outcomes {
        match outcome {
            ImageOutcome::Analyzed { categories, .. } => {
                assert_eq!(categories.len(), 1, "solid images map to one category")
            }
            ImageOutcome::Failed { path, error } => {
                panic!("{} unexpectedly failed: {error}", path.display())
            }
        }
    }
}

#[tokio::test]
async fn test_scan_survives_corrupt_files() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "ok.png", [255, 0, 0], 8);
    std::fs::write(dir.path().join("corrupt.png"), b"\x89PNG garbage").unwrap();
    std::fs::write(dir.path().join("empty.jpg"), b"").unwrap();

    let paths = loader::collect_image_paths(dir.path()).unwrap();
    let runner = BatchRunner::new(&AppConfig::default()).with_workers(2);
    let report = runner.run(paths).await;

    // Bad files are recorded and skipped; the good one still processes.
    assert_eq!(report.processed, 1);
    assert_eq!(report.errors, 2);
    assert_eq!(report.tallies[ColorCategory::Red], 1);
}

#[tokio::test]
async fn test_scan_with_config_file() {
    let dir = tempfile::tempdir().unwrap();

    // Everything reads as red with a wide-open red range and a threshold
    // only red can clear.
    let config_path = dir.path().join("config.json");
    std::fs::write(
        &config_path,
        r#"{
            "parameters": {
                "red": { "hue_ranges": [[0.0, 360.0]], "hue_weights": [1.0] }
            },
            "thresholds": {
                "red": 10.0, "orange": 100.0, "yellow": 100.0, "green": 100.0,
                "blue": 100.0, "pink": 100.0, "achromatic": 100.0
            },
            "resize": [20, 20]
        }"#,
    )
    .unwrap();

    write_png(dir.path(), "teal.png", [0, 180, 180], 16);

    let config = AppConfig::load(&config_path).unwrap();
    assert_eq!(config.resize_dims(), (20, 20));

    let paths = loader::collect_image_paths(dir.path()).unwrap();
    let report = BatchRunner::new(&config).run(paths).await;

    assert_eq!(report.processed, 1);
    assert_eq!(report.tallies[ColorCategory::Red], 1);
    assert_eq!(report.tallies[ColorCategory::Blue], 0);
}

#[test]
fn test_invalid_config_file_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("bad.json");
    std::fs::write(
        &config_path,
        r#"{ "parameters": { "red": { "hue_ranges": [[30.0, 10.0]] } } }"#,
    )
    .unwrap();

    let err = AppConfig::load(&config_path).unwrap_err();
    assert!(err.to_string().contains("hue range"));
}
