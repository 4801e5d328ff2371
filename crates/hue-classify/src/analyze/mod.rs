//! Whole-image aggregation: scan a pixel buffer, tally weighted categories.
//!
//! [`analyze`] is the heart of the engine: it downscales the buffer to the
//! analysis resolution, classifies every pixel, and turns the weighted
//! tallies into per-category percentages. The computation is pure and
//! deterministic -- identical inputs produce bit-identical results, which
//! is what makes the result cache sound.

mod resize;
mod result;

pub use result::AnalysisResult;

use crate::category::{CategoryMap, ColorCategory};
use crate::classify::classify;
use crate::color::{Hsv, Rgb};
use crate::error::AnalysisError;
use crate::params::ParameterSet;
use resize::resize_box;

/// Default analysis resolution. About 10k pixels: small enough that a scan
/// is effectively free, large enough that percentages are stable.
pub const DEFAULT_RESIZE: (u32, u32) = (100, 100);

/// A decoded RGB image, validated on construction.
///
/// The engine performs no decoding; callers hand in a row-major pixel
/// buffer at whatever resolution the decoder produced. Construction is the
/// image-level failure boundary: zero dimensions and length mismatches are
/// rejected here so everything downstream can assume a well-formed buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixels: Vec<Rgb>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Wrap a row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::ZeroDimensions`] when either dimension is zero,
    /// [`AnalysisError::PixelCountMismatch`] when the buffer length is not
    /// `width * height`.
    pub fn new(pixels: Vec<Rgb>, width: u32, height: u32) -> Result<Self, AnalysisError> {
        if width == 0 || height == 0 {
            return Err(AnalysisError::ZeroDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(AnalysisError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }
}

/// Analyze one image: resize, classify every pixel, aggregate percentages.
///
/// The buffer is scaled to `resize_dims` with a deterministic box filter
/// before scanning (pass the source dimensions to skip scaling). Every
/// pixel's category set increments the matching raw counts; a pixel with
/// several labels increments all of them.
///
/// Each category's raw count is then multiplied by its range weight
/// ([`crate::ChromaticParams::range_weight`]; achromatic is fixed at 1.0)
/// and percentages are the weighted counts normalized to 100. When the
/// weighted total is zero every percentage is zero -- there is no division
/// in that branch.
///
/// # Errors
///
/// [`AnalysisError::InvalidResize`] when either target dimension is zero.
/// All other failures are ruled out by [`PixelBuffer`] construction.
///
/// # Example
///
/// ```
/// use hue_classify::{analyze, ColorCategory, ParameterSet, PixelBuffer, Rgb};
///
/// let pixels = vec![Rgb::from_u8(255, 0, 0); 4];
/// let image = PixelBuffer::new(pixels, 2, 2).unwrap();
/// let result = analyze(&image, (2, 2), &ParameterSet::default()).unwrap();
///
/// assert_eq!(result.percentage(ColorCategory::Red), 100.0);
/// ```
pub fn analyze(
    image: &PixelBuffer,
    resize_dims: (u32, u32),
    params: &ParameterSet,
) -> Result<AnalysisResult, AnalysisError> {
    let (target_w, target_h) = resize_dims;
    if target_w == 0 || target_h == 0 {
        return Err(AnalysisError::InvalidResize {
            width: target_w,
            height: target_h,
        });
    }

    let scaled;
    let pixels: &[Rgb] = if (image.width, image.height) == (target_w, target_h) {
        &image.pixels
    } else {
        scaled = resize_box(&image.pixels, image.width, image.height, target_w, target_h);
        &scaled
    };

    let mut raw_counts: CategoryMap<u64> = CategoryMap::default();
    for &pixel in pixels {
        let set = classify(Hsv::from(pixel), params);
        for category in set.iter() {
            raw_counts[category] += 1;
        }
    }

    let range_sizes = CategoryMap::from_fn(|category| {
        params
            .chromatic(category)
            .map(|p| p.total_range_size())
            .unwrap_or(0.0)
    });
    let range_weights = CategoryMap::from_fn(|category| {
        params
            .chromatic(category)
            .map(|p| p.range_weight())
            .unwrap_or(1.0)
    });

    let weighted =
        CategoryMap::from_fn(|category| raw_counts[category] as f64 * range_weights[category]);
    let total: f64 = ColorCategory::ALL.iter().map(|&c| weighted[c]).sum();

    let percentages = if total > 0.0 {
        CategoryMap::from_fn(|category| 100.0 * weighted[category] / total)
    } else {
        CategoryMap::default()
    };

    Ok(AnalysisResult {
        percentages,
        raw_counts,
        range_sizes,
        range_weights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_image(color: Rgb, width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::new(vec![color; (width * height) as usize], width, height).unwrap()
    }

    #[test]
    fn test_pixel_buffer_rejects_zero_dimensions() {
        let err = PixelBuffer::new(vec![], 0, 10).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::ZeroDimensions {
                width: 0,
                height: 10
            }
        );
    }

    #[test]
    fn test_pixel_buffer_rejects_length_mismatch() {
        let err = PixelBuffer::new(vec![Rgb::from_u8(0, 0, 0); 3], 2, 2).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::PixelCountMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_analyze_rejects_zero_resize() {
        let image = solid_image(Rgb::from_u8(255, 0, 0), 2, 2);
        let err = analyze(&image, (0, 100), &ParameterSet::default()).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InvalidResize {
                width: 0,
                height: 100
            }
        );
    }

    #[test]
    fn test_solid_red_is_all_red() {
        let image = solid_image(Rgb::from_u8(255, 0, 0), 8, 8);
        let result = analyze(&image, DEFAULT_RESIZE, &ParameterSet::default()).unwrap();

        assert_eq!(result.percentage(ColorCategory::Red), 100.0);
        assert_eq!(result.raw_counts[ColorCategory::Red], 100 * 100);
        assert_eq!(result.percentage(ColorCategory::Achromatic), 0.0);
    }

    #[test]
    fn test_percentages_sum_to_100() {
        // A mixed image: red, green, blue, gray quadrants.
        let mut pixels = Vec::new();
        pixels.extend(vec![Rgb::from_u8(255, 0, 0); 16]);
        pixels.extend(vec![Rgb::from_u8(0, 255, 0); 16]);
        pixels.extend(vec![Rgb::from_u8(0, 0, 255); 16]);
        pixels.extend(vec![Rgb::from_u8(128, 128, 128); 16]);
        let image = PixelBuffer::new(pixels, 8, 8).unwrap();

        let result = analyze(&image, (8, 8), &ParameterSet::default()).unwrap();
        assert!(
            (result.total_percentage() - 100.0).abs() < 1e-6,
            "percentages sum to {}",
            result.total_percentage()
        );
    }

    #[test]
    fn test_multi_label_pixels_increment_all_counts() {
        let mut params = ParameterSet::default();
        // Orange overlaps red's low range entirely.
        params.orange.hue_ranges = vec![crate::params::HueRange::new(0.0, 60.0)];
        params.orange.hue_weights = Some(vec![1.0]);

        let image = solid_image(Rgb::from_u8(255, 0, 0), 4, 4);
        let result = analyze(&image, (4, 4), &params).unwrap();

        assert_eq!(result.raw_counts[ColorCategory::Red], 16);
        assert_eq!(result.raw_counts[ColorCategory::Orange], 16);
        // 32 labels from 16 pixels -- counts are not mutually exclusive.
        let total_raw: u64 = ColorCategory::ALL
            .iter()
            .map(|&c| result.raw_counts[c])
            .sum();
        assert_eq!(total_raw, 32);
    }

    #[test]
    fn test_weights_shift_percentages() {
        // Half red, half blue. With red emphasized 2x (squared to 4x),
        // red should take 80% of the weighted share.
        let mut params = ParameterSet::default();
        params.red.hue_weights = Some(vec![2.0, 2.0]);

        let mut pixels = vec![Rgb::from_u8(255, 0, 0); 8];
        pixels.extend(vec![Rgb::from_u8(0, 0, 255); 8]);
        let image = PixelBuffer::new(pixels, 4, 4).unwrap();

        let result = analyze(&image, (4, 4), &params).unwrap();
        assert!(
            (result.percentage(ColorCategory::Red) - 80.0).abs() < 1e-9,
            "red at {}",
            result.percentage(ColorCategory::Red)
        );
        assert!((result.percentage(ColorCategory::Blue) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_heuristic_weight_reported_in_diagnostics() {
        let mut params = ParameterSet::default();
        params.green.hue_weights = None;

        let image = solid_image(Rgb::from_u8(0, 255, 0), 4, 4);
        let result = analyze(&image, (4, 4), &params).unwrap();

        // 90 degrees of green -> 360 / (90 + 60) = 2.4
        assert_eq!(result.range_weights[ColorCategory::Green], 2.4);
        assert_eq!(result.range_sizes[ColorCategory::Green], 90.0);
        assert_eq!(result.range_weights[ColorCategory::Achromatic], 1.0);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let pixels: Vec<Rgb> = (0..32 * 32)
            .map(|i| Rgb::from_u8((i * 7 % 256) as u8, (i * 13 % 256) as u8, (i % 256) as u8))
            .collect();
        let image = PixelBuffer::new(pixels, 32, 32).unwrap();
        let params = ParameterSet::default();

        let first = analyze(&image, DEFAULT_RESIZE, &params).unwrap();
        let second = analyze(&image, DEFAULT_RESIZE, &params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_dominant_prefers_tiebreak_order() {
        let mut percentages: CategoryMap<f64> = CategoryMap::default();
        percentages[ColorCategory::Yellow] = 40.0;
        percentages[ColorCategory::Blue] = 40.0;

        assert_eq!(crate::select::dominant(&percentages), ColorCategory::Yellow);
    }
}
