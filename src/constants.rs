//! Reference values, thresholds and search bounds for pigment matching
//!
//! Every number that influences an observable search outcome lives here, so
//! that golden fixtures can be audited against a single table.

/// D65 Standard Illuminant Reference
///
/// CIE Standard Illuminant D65 (average daylight, 6504K) is the reference
/// white for sRGB and therefore for every Lab value this crate produces.
pub mod d65 {
    /// D65 white point in CIE XYZ color space
    /// Source: CIE 15:2004 Colorimetry, 3rd edition
    pub const WHITE_POINT_XYZ: [f64; 3] = [0.95047, 1.00000, 1.08883];
}

/// Re-export D65 white point at top level for convenience
pub const D65_WHITE_POINT_XYZ: [f64; 3] = d65::WHITE_POINT_XYZ;

/// sRGB transfer function and primaries
pub mod srgb {
    /// Encoded values at or below this use the linear segment
    pub const LINEAR_THRESHOLD: f64 = 0.04045;

    /// Slope divisor of the linear segment
    pub const LINEAR_SCALE: f64 = 12.92;

    /// Offset of the power-law segment
    pub const GAMMA_OFFSET: f64 = 0.055;

    /// Exponent of the power-law segment
    pub const GAMMA: f64 = 2.4;

    /// Linear sRGB to CIE XYZ (D65), rows X, Y, Z
    pub const TO_XYZ: [[f64; 3]; 3] = [
        [0.4124564, 0.3575761, 0.1804375],
        [0.2126729, 0.7151522, 0.0721750],
        [0.0193339, 0.1191920, 0.9503041],
    ];
}

/// CIE Lab nonlinearity
pub mod lab {
    /// Normalized XYZ values above this take the cube-root branch
    pub const EPSILON: f64 = 0.008856;

    /// Slope of the linear branch
    pub const LINEAR_SLOPE: f64 = 7.787;

    /// Offset of the linear branch
    pub const LINEAR_OFFSET: f64 = 16.0 / 116.0;
}

/// Matching thresholds
pub mod thresholds {
    /// Best single-pigment ΔE below which that pigment is returned alone
    pub const EXACT_MATCH_DELTA_E: f64 = 2.0;
}

/// Combinatorial search bounds
pub mod search {
    /// Individually closest pigments considered for two-pigment mixes
    pub const PAIR_SHORTLIST: usize = 10;

    /// Ratio sweep resolution for pairs (1/40 = 2.5%)
    pub const PAIR_RATIO_STEPS: usize = 40;

    /// Individually closest pigments considered for three-pigment mixes
    pub const TRIPLE_SHORTLIST: usize = 6;

    /// Fixed ratio splits tried for every triple, in evaluation order
    pub const TRIPLE_SPLITS: [[f64; 3]; 5] = [
        [0.5, 0.3, 0.2],
        [0.5, 0.25, 0.25],
        [0.4, 0.4, 0.2],
        [0.4, 0.3, 0.3],
        [0.6, 0.2, 0.2],
    ];

    /// Ratio increment for white and black refinement trials
    pub const TINT_STEP: f64 = 0.025;

    /// Number of white (tint) trials: 2.5% .. 20%
    pub const TINT_STEPS: usize = 8;

    /// Number of black (shade) trials: 2.5% .. 15%
    pub const SHADE_STEPS: usize = 6;
}

/// Accuracy percentage scale factors
pub mod accuracy {
    /// ΔE multiplier for pre-made catalog ranking
    pub const RANKING_SCALE: f64 = 1.5;

    /// ΔE multiplier for synthesized recipes
    pub const RECIPE_SCALE: f64 = 8.0;

    /// Upper bound of the accuracy percentage
    pub const MAX_ACCURACY: f64 = 100.0;
}

/// Recipe normalization
pub mod normalization {
    /// Recipes are expressed on a base of this many parts
    pub const TOTAL_UNITS: f64 = 20.0;

    /// Parts are rounded to the nearest multiple of this
    pub const GRANULARITY: f64 = 0.5;
}

/// Catalog conventions
pub mod references {
    /// Reserved identifier of the pure white reference pigment
    pub const WHITE_ID: &str = "white";

    /// Reserved identifier of the pure black reference pigment
    pub const BLACK_ID: &str = "black";

    /// Default number of results in ranking mode
    pub const DEFAULT_RANK_LIMIT: usize = 15;
}
