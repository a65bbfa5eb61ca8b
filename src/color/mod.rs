//! Color conversion and mixing module
//!
//! This module handles the color space conversions, the ΔE metric and the
//! CMYK-proxy subtractive mixer used to evaluate recipe candidates.

use palette::white_point::D65;

pub mod conversion;
pub mod mixing;

pub use conversion::ColorConverter;
pub use mixing::{Cmyk, SubtractiveMixer};

/// 8-bit sRGB color; the `u8` channels enforce the [0, 255] range
pub type Rgb = palette::Srgb<u8>;

/// CIE L*a*b* under D65 in double precision
pub type Lab = palette::Lab<D65, f64>;
