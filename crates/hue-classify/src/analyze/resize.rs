//! Deterministic box-average downscaling for the analysis pass.
//!
//! Analysis always scans at a fixed small resolution, so results are
//! comparable across source sizes and the pixel loop cost is bounded. The
//! filter is a plain integer box average: each target pixel is the mean of
//! its source region. All arithmetic is integral, so resizing the same
//! buffer twice is bit-identical.

use crate::color::Rgb;

/// Scale `pixels` (row-major, `width * height`) to `target_w * target_h`.
///
/// Each target pixel averages the source box `[x0, x1) x [y0, y1)` computed
/// by integer projection. When a target dimension exceeds the source
/// dimension the box degenerates to a single source pixel (nearest
/// neighbor). Callers guarantee non-zero dimensions and a matching buffer
/// length.
pub(crate) fn resize_box(
    pixels: &[Rgb],
    width: u32,
    height: u32,
    target_w: u32,
    target_h: u32,
) -> Vec<Rgb> {
    let mut out = Vec::with_capacity(target_w as usize * target_h as usize);

    for ty in 0..target_h as u64 {
        let y0 = (ty * height as u64 / target_h as u64) as u32;
        let y1 = (((ty + 1) * height as u64) / target_h as u64).max(y0 as u64 + 1) as u32;

        for tx in 0..target_w as u64 {
            let x0 = (tx * width as u64 / target_w as u64) as u32;
            let x1 = (((tx + 1) * width as u64) / target_w as u64).max(x0 as u64 + 1) as u32;

            let mut sum_r = 0u64;
            let mut sum_g = 0u64;
            let mut sum_b = 0u64;
            for y in y0..y1 {
                let row = y as usize * width as usize;
                for x in x0..x1 {
                    let p = pixels[row + x as usize];
                    sum_r += p.r as u64;
                    sum_g += p.g as u64;
                    sum_b += p.b as u64;
                }
            }

            let n = (y1 - y0) as u64 * (x1 - x0) as u64;
            out.push(Rgb::from_u8(
                (sum_r / n) as u8,
                (sum_g / n) as u8,
                (sum_b / n) as u8,
            ));
        }
    }

    out
}
