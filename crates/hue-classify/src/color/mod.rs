//! Color types and the RGB to HSV conversion.
//!
//! Classification operates on HSV because the category definitions are hue
//! windows gated by saturation and value. [`Rgb`] is the storage type for
//! decoded pixel buffers; [`Hsv`] is derived per pixel during scanning.
//!
//! # Example
//!
//! ```
//! use hue_classify::{Hsv, Rgb};
//!
//! let red = Rgb::from_u8(255, 0, 0);
//! let hsv = Hsv::from(red);
//!
//! assert_eq!(hsv.h, 0.0);
//! assert_eq!(hsv.s, 1.0);
//! assert_eq!(hsv.v, 1.0);
//! ```

mod hsv;
mod rgb;

pub use hsv::Hsv;
pub use rgb::Rgb;
