//! Recipe synthesis
//!
//! A recipe is searched for in stages of increasing complexity (single
//! pigment, pairs, triples, tint/shade refinement) and the winning
//! candidate is normalized into practical parts.

use serde::{Deserialize, Serialize};

use crate::catalog::Recipe;
use crate::color::Rgb;

pub mod normalize;
pub mod search;

pub use normalize::RecipeNormalizer;
pub use search::RecipeSearch;

/// Search stage that produced the winning candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// A single pigment within the exact-match threshold
    Exact,
    /// Two pigments (or one pigment paired with itself)
    Pair,
    /// Three distinct pigments at a fixed split
    Triple,
    /// Best pair/triple lightened with white
    Tint,
    /// Best pair/triple darkened with black
    Shade,
}

/// Synthesized recipe and how close it gets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeMatch {
    /// Normalized entries, descending by parts
    pub recipe: Recipe,
    /// Mixed color of the winning candidate
    pub achieved: Rgb,
    /// `achieved` as `#RRGGBB`
    pub achieved_hex: String,
    /// Display percentage in [0, 100], decreasing in `distance`
    pub accuracy: f64,
    /// ΔE between target and `achieved`
    pub distance: f64,
    /// Stage that produced the winner
    pub kind: MatchKind,
}
