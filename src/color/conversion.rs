//! Color space conversion utilities
//!
//! Provides the conversions the matching engine depends on:
//! - `#RRGGBB` hex strings to and from 8-bit sRGB
//! - Float channel triples to clamped 8-bit sRGB
//! - 8-bit sRGB to CIE Lab (D65) through linear sRGB and XYZ
//! - ΔE76 color difference
//!
//! The Lab transform is written out with fixed constants instead of
//! delegating to `palette`, so results are reproducible to the last digit
//! across platforms and match existing golden fixtures.

use super::{Lab, Rgb};
use crate::constants::{lab, srgb, D65_WHITE_POINT_XYZ};
use crate::{MatchError, Result};

/// Color converter with a fixed D65 reference white
#[derive(Debug, Clone, Copy)]
pub struct ColorConverter {
    /// Reference white used to normalize XYZ before the Lab nonlinearity
    white_point: [f64; 3],
}

impl Default for ColorConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorConverter {
    /// Create a new color converter with D65 as reference white
    pub fn new() -> Self {
        Self {
            white_point: D65_WHITE_POINT_XYZ,
        }
    }

    /// Parse a `#RRGGBB` hex string (case-insensitive) to RGB
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidHex` unless the input is exactly `#`
    /// followed by six hexadecimal digits. Shorthand (`#F00`), a missing
    /// `#`, and surrounding whitespace are all rejected.
    pub fn hex_to_rgb(&self, hex: &str) -> Result<Rgb> {
        let digits = hex
            .strip_prefix('#')
            .filter(|digits| digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| MatchError::invalid_hex(hex))?;

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| MatchError::invalid_hex(hex))
        };

        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Format RGB as an uppercase `#RRGGBB` string
    pub fn rgb_to_hex(&self, rgb: Rgb) -> String {
        format!("#{:02X}{:02X}{:02X}", rgb.red, rgb.green, rgb.blue)
    }

    /// Clamp and round float channels (nominally 0-255) to RGB
    pub fn channels_to_rgb(&self, channels: [f64; 3]) -> Rgb {
        let [r, g, b] = channels.map(clamp_channel);
        Rgb::new(r, g, b)
    }

    /// Format float channels (nominally 0-255) as `#RRGGBB`
    ///
    /// Out-of-range values are clamped, never wrapped.
    pub fn channels_to_hex(&self, channels: [f64; 3]) -> String {
        self.rgb_to_hex(self.channels_to_rgb(channels))
    }

    /// Convert RGB (0-255) to CIE Lab under D65
    pub fn rgb_to_lab(&self, rgb: Rgb) -> Lab {
        let linear = [rgb.red, rgb.green, rgb.blue].map(|c| srgb_to_linear(f64::from(c) / 255.0));

        let mut xyz = [0.0; 3];
        for (out, row) in xyz.iter_mut().zip(srgb::TO_XYZ.iter()) {
            *out = row[0] * linear[0] + row[1] * linear[1] + row[2] * linear[2];
        }

        let [fx, fy, fz] = [0, 1, 2].map(|i| lab_f(xyz[i] / self.white_point[i]));

        Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
    }

    /// Compute Delta E (color difference) between two Lab colors
    ///
    /// Plain Euclidean distance (ΔE76). Accuracy percentages downstream are
    /// calibrated against this metric, so it must not be swapped for
    /// ΔE94 or CIEDE2000.
    pub fn delta_e(&self, lab1: Lab, lab2: Lab) -> f64 {
        let dl = lab2.l - lab1.l;
        let da = lab2.a - lab1.a;
        let db = lab2.b - lab1.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

/// Clamp to [0, 255] and round to the nearest integer; NaN maps to 0
fn clamp_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

/// sRGB transfer function, encoded [0, 1] to linear [0, 1]
fn srgb_to_linear(encoded: f64) -> f64 {
    if encoded <= srgb::LINEAR_THRESHOLD {
        encoded / srgb::LINEAR_SCALE
    } else {
        ((encoded + srgb::GAMMA_OFFSET) / (1.0 + srgb::GAMMA_OFFSET)).powf(srgb::GAMMA)
    }
}

/// CIE Lab companding of a white-normalized XYZ component
fn lab_f(t: f64) -> f64 {
    if t > lab::EPSILON {
        t.cbrt()
    } else {
        lab::LINEAR_SLOPE * t + lab::LINEAR_OFFSET
    }
}
