use std::path::Path;

use hue_classify::{PixelBuffer, Rgb};

use crate::error::AppError;

/// Decode an image file into the engine's pixel buffer.
///
/// Any format the `image` crate understands is accepted; alpha is dropped
/// by converting to RGB8. Decode failures are per-image errors -- the batch
/// records them and moves on.
pub fn load_pixels(path: &Path) -> Result<PixelBuffer, AppError> {
    let decoded = image::open(path).map_err(|source| AppError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    let pixels: Vec<Rgb> = rgb.pixels().map(|p| Rgb::from_bytes(p.0)).collect();

    PixelBuffer::new(pixels, width, height).map_err(|source| AppError::Analysis {
        path: path.to_path_buf(),
        source,
    })
}

/// File extensions treated as images when scanning a directory.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff"];

/// Recursively collect image files under `dir`, sorted by path.
pub fn collect_image_paths(dir: &Path) -> Result<Vec<std::path::PathBuf>, AppError> {
    let mut paths = Vec::new();
    collect_into(dir, &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn collect_into(dir: &Path, paths: &mut Vec<std::path::PathBuf>) -> Result<(), AppError> {
    let entries = std::fs::read_dir(dir).map_err(|source| AppError::DirScan {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| AppError::DirScan {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_dir() {
            collect_into(&path, paths)?;
        } else if is_image_path(&path) {
            paths.push(path);
        }
    }
    Ok(())
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_image_path_by_extension() {
        assert!(is_image_path(&PathBuf::from("a/photo.PNG")));
        assert!(is_image_path(&PathBuf::from("b.jpeg")));
        assert!(!is_image_path(&PathBuf::from("notes.txt")));
        assert!(!is_image_path(&PathBuf::from("no_extension")));
    }

    #[test]
    fn test_load_pixels_missing_file_is_decode_error() {
        let err = load_pixels(&PathBuf::from("/nonexistent/missing.png")).unwrap_err();
        assert!(matches!(err, AppError::Decode { .. }));
    }

    #[test]
    fn test_collect_finds_nested_images() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sub");
        std::fs::create_dir(&nested).unwrap();

        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([255, 0, 0]));
        img.save(dir.path().join("top.png")).unwrap();
        img.save(nested.join("deep.png")).unwrap();
        std::fs::write(dir.path().join("ignore.txt"), "not an image").unwrap();

        let paths = collect_image_paths(dir.path()).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.extension().unwrap() == "png"));
    }

    #[test]
    fn test_load_pixels_round_trips_decoded_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        let img = image::RgbImage::from_pixel(3, 2, image::Rgb([200, 10, 10]));
        img.save(&path).unwrap();

        let buffer = load_pixels(&path).unwrap();
        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.height(), 2);
        assert!(buffer.pixels().iter().all(|p| *p == Rgb::from_u8(200, 10, 10)));
    }
}
