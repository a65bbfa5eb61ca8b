//! CMYK-proxy subtractive mixing
//!
//! Each pigment is converted to naive device CMYK, the components are
//! averaged by weight, and the average is converted back to RGB. This is a
//! fast linear blend, not a Kubelka-Munk model; it overdarkens compared to
//! real paint and recipe fixtures depend on exactly that behavior.

use super::{ColorConverter, Rgb};
use crate::catalog::RecipeEntry;

/// Naive device CMYK, every component in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

impl Cmyk {
    /// Convert 8-bit RGB to CMYK
    ///
    /// Pure black has `k = 1` and `c = m = y = 0`.
    pub fn from_rgb(rgb: Rgb) -> Self {
        let r = f64::from(rgb.red) / 255.0;
        let g = f64::from(rgb.green) / 255.0;
        let b = f64::from(rgb.blue) / 255.0;

        let k = 1.0 - r.max(g).max(b);
        if k >= 1.0 {
            return Self {
                k: 1.0,
                ..Self::default()
            };
        }

        Self {
            c: (1.0 - r - k) / (1.0 - k),
            m: (1.0 - g - k) / (1.0 - k),
            y: (1.0 - b - k) / (1.0 - k),
            k,
        }
    }

    /// Convert back to unclamped float channels in 0-255
    pub fn to_channels(self) -> [f64; 3] {
        [self.c, self.m, self.y].map(|x| 255.0 * (1.0 - x) * (1.0 - self.k))
    }
}

/// Weighted CMYK blender
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtractiveMixer {
    converter: ColorConverter,
}

impl SubtractiveMixer {
    /// Create a new mixer
    pub fn new() -> Self {
        Self {
            converter: ColorConverter::new(),
        }
    }

    /// Mix recipe entries by their parts
    ///
    /// An empty recipe, or one whose parts sum to zero, mixes to black.
    pub fn mix_colors(&self, entries: &[RecipeEntry]) -> Rgb {
        self.mix_weighted(entries.iter().map(|entry| (entry.pigment.color, entry.parts)))
    }

    /// Mix `(color, parts)` pairs
    ///
    /// Parts are normalized by their total, so scaling every part by the
    /// same positive factor leaves the result unchanged.
    pub fn mix_weighted<I>(&self, parts: I) -> Rgb
    where
        I: IntoIterator<Item = (Rgb, f64)>,
        I::IntoIter: Clone,
    {
        let parts = parts.into_iter();
        let total: f64 = parts.clone().map(|(_, weight)| weight).sum();
        if total <= 0.0 || !total.is_finite() {
            return Rgb::new(0, 0, 0);
        }

        let mixed = parts.fold(Cmyk::default(), |acc, (color, weight)| {
            let share = weight / total;
            let cmyk = Cmyk::from_rgb(color);
            Cmyk {
                c: acc.c + cmyk.c * share,
                m: acc.m + cmyk.m * share,
                y: acc.y + cmyk.y * share,
                k: acc.k + cmyk.k * share,
            }
        });

        self.converter.channels_to_rgb(mixed.to_channels())
    }
}
