//! # Pigment Match
//!
//! A Rust crate for matching a target color against a catalog of real-world
//! pigments.
//!
//! Two modes are provided:
//! - Ranked lookup of the closest pre-made paints by ΔE in CIE Lab
//! - Synthesis of a mixing recipe from a small palette when no single
//!   pigment is close enough, using a CMYK-proxy subtractive mixing model
//!
//! All operations are synchronous, allocation-light and free of shared
//! state; concurrent calls need no coordination.
//!
//! ## Example
//!
//! ```rust
//! use pigment_match::{Pigment, PigmentMatcher, Rgb};
//!
//! let catalog = vec![
//!     Pigment::new("white", "Titanium White", Rgb::new(255, 255, 255)),
//!     Pigment::new("black", "Ivory Black", Rgb::new(0, 0, 0)),
//! ];
//!
//! let matcher = PigmentMatcher::new();
//! let result = matcher.recipe_hex("#808080", &catalog, None)?.expect("non-empty catalog");
//! for entry in &result.recipe {
//!     println!("{} parts {}", entry.parts, entry.pigment.display_name);
//! }
//! println!("achieved {} ({:.0}%)", result.achieved_hex, result.accuracy);
//! # Ok::<(), pigment_match::MatchError>(())
//! ```

pub mod catalog;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod ranking;
pub mod recipe;

pub use catalog::{Catalog, Inventory, Pigment, PigmentRole, Recipe, RecipeEntry};
pub use color::{Cmyk, ColorConverter, Lab, Rgb, SubtractiveMixer};
pub use config::MatchConfig;
pub use error::{MatchError, Result};
pub use ranking::{CatalogRanking, RankedPigment};
pub use recipe::{MatchKind, RecipeMatch, RecipeNormalizer, RecipeSearch};

use crate::constants::accuracy::MAX_ACCURACY;

/// Convert a ΔE into a display percentage: `max(0, 100 - distance * scale)`
///
/// Monotonically non-increasing in `distance`. Comparisons inside the
/// engine always use the raw distance, never this value.
pub fn accuracy_from_distance(distance: f64, scale: f64) -> f64 {
    (MAX_ACCURACY - distance * scale).max(0.0)
}

/// Entry point combining ranking and recipe search over one configuration
#[derive(Debug, Clone, Default)]
pub struct PigmentMatcher {
    config: MatchConfig,
    converter: ColorConverter,
}

impl PigmentMatcher {
    /// Create a matcher with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with a validated custom configuration
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidParameter` if the configuration is unusable.
    pub fn with_config(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            converter: ColorConverter::new(),
        })
    }

    /// Configuration this matcher was built with
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Rank catalog pigments by closeness to `target`
    ///
    /// `inventory` restricts the eligible pigments; `limit = None` uses the
    /// configured default. Returns an empty list when nothing is eligible.
    pub fn rank(
        &self,
        target: Rgb,
        catalog: &[Pigment],
        inventory: Option<&Inventory>,
        limit: Option<usize>,
    ) -> Vec<RankedPigment> {
        let pigments = crate::catalog::eligible(catalog, inventory);
        let limit = limit.unwrap_or(self.config.references.default_rank_limit);
        CatalogRanking::new(&self.config).rank(target, &pigments, limit)
    }

    /// [`rank`](Self::rank) for a `#RRGGBB` target
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidHex` for a malformed target.
    pub fn rank_hex(
        &self,
        hex: &str,
        catalog: &[Pigment],
        inventory: Option<&Inventory>,
        limit: Option<usize>,
    ) -> Result<Vec<RankedPigment>> {
        let target = self.converter.hex_to_rgb(hex)?;
        Ok(self.rank(target, catalog, inventory, limit))
    }

    /// Compute a mixing recipe approximating `target`
    ///
    /// Returns `None` when no pigment is eligible.
    pub fn recipe(&self, target: Rgb, catalog: &[Pigment], inventory: Option<&Inventory>) -> Option<RecipeMatch> {
        let pigments = crate::catalog::eligible(catalog, inventory);
        RecipeSearch::new(&self.config).search(target, &pigments)
    }

    /// [`recipe`](Self::recipe) for a `#RRGGBB` target
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidHex` for a malformed target.
    pub fn recipe_hex(
        &self,
        hex: &str,
        catalog: &[Pigment],
        inventory: Option<&Inventory>,
    ) -> Result<Option<RecipeMatch>> {
        let target = self.converter.hex_to_rgb(hex)?;
        Ok(self.recipe(target, catalog, inventory))
    }
}

/// Compute a recipe with the default configuration and no inventory filter
pub fn calculate_recipe(target: Rgb, catalog: &[Pigment]) -> Option<RecipeMatch> {
    PigmentMatcher::new().recipe(target, catalog, None)
}

/// Rank the closest `limit` pigments with the default configuration
pub fn rank_catalog(target: Rgb, catalog: &[Pigment], limit: usize) -> Vec<RankedPigment> {
    PigmentMatcher::new().rank(target, catalog, None, Some(limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Pigment> {
        vec![
            Pigment::new("white", "Titanium White", Rgb::new(255, 255, 255)),
            Pigment::new("black", "Ivory Black", Rgb::new(0, 0, 0)),
            Pigment::new("red", "Cadmium Red", Rgb::new(227, 23, 10)),
        ]
    }

    #[test]
    fn test_accuracy_from_distance() {
        assert_eq!(accuracy_from_distance(0.0, 8.0), 100.0);
        assert_eq!(accuracy_from_distance(2.5, 8.0), 80.0);
        assert_eq!(accuracy_from_distance(10.0, 1.5), 85.0);
        assert_eq!(accuracy_from_distance(500.0, 1.5), 0.0);
    }

    #[test]
    fn test_recipe_hex_invalid() {
        let matcher = PigmentMatcher::new();
        assert!(matches!(
            matcher.recipe_hex("red", &catalog(), None),
            Err(MatchError::InvalidHex { .. })
        ));
        assert!(matcher.rank_hex("#12345G", &catalog(), None, None).is_err());
    }

    #[test]
    fn test_inventory_excluding_everything_yields_no_result() {
        let matcher = PigmentMatcher::new();
        let inventory = Inventory::from_ids(["ultramarine"]);
        assert!(matcher.recipe(Rgb::new(0, 0, 128), &catalog(), Some(&inventory)).is_none());
        assert!(matcher.rank(Rgb::new(0, 0, 128), &catalog(), Some(&inventory), None).is_empty());
    }

    #[test]
    fn test_inventory_restricts_recipe() {
        let matcher = PigmentMatcher::new();
        let inventory = Inventory::from_ids(["white", "red"]);
        let result = matcher.recipe(Rgb::new(20, 20, 20), &catalog(), Some(&inventory)).unwrap();
        assert!(result.recipe.iter().all(|e| e.pigment.id != "black"));
    }

    #[test]
    fn test_rank_default_limit() {
        let matcher = PigmentMatcher::new();
        let many: Vec<Pigment> = (0..40u8)
            .map(|i| Pigment::new(format!("p{}", i), format!("Pigment {}", i), Rgb::new(i * 6, 100, 200)))
            .collect();
        assert_eq!(matcher.rank(Rgb::new(0, 100, 200), &many, None, None).len(), 15);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let mut config = MatchConfig::default();
        config.accuracy.recipe_scale = -1.0;
        assert!(PigmentMatcher::with_config(config).is_err());
    }

    #[test]
    fn test_recipe_match_serialization() {
        let result = calculate_recipe(Rgb::new(128, 128, 128), &catalog()).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        let deserialized: RecipeMatch = serde_json::from_str(&json).unwrap();

        assert_eq!(result, deserialized);
    }
}
