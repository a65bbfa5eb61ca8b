//! Recipe consolidation and rounding
//!
//! Turns raw search weights such as `0.49 / 0.485 / 0.025` into
//! practical units ("10 parts A, 9.5 parts B, 0.5 parts white").

use crate::catalog::{Recipe, RecipeEntry};
use crate::config::NormalizationConfig;
use crate::constants::normalization;

/// Rescales recipes to a fixed unit base with fixed rounding granularity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeNormalizer {
    total_units: f64,
    granularity: f64,
}

impl Default for RecipeNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeNormalizer {
    /// Create a normalizer expressing recipes in 20 parts, rounded to halves
    pub fn new() -> Self {
        Self {
            total_units: normalization::TOTAL_UNITS,
            granularity: normalization::GRANULARITY,
        }
    }

    /// Create a normalizer from configuration
    pub fn with_config(config: &NormalizationConfig) -> Self {
        Self {
            total_units: config.total_units,
            granularity: config.granularity,
        }
    }

    /// Merge entries sharing a pigment id by summing their parts
    ///
    /// The first occurrence of each id keeps its position.
    pub fn consolidate(entries: &[RecipeEntry]) -> Recipe {
        let mut merged: Recipe = Vec::with_capacity(entries.len());
        for entry in entries {
            match merged.iter_mut().find(|m| m.pigment.id == entry.pigment.id) {
                Some(existing) => existing.parts += entry.parts,
                None => merged.push(entry.clone()),
            }
        }
        merged
    }

    /// Consolidate, rescale to the unit base, round, drop zeros and sort
    ///
    /// Each entry becomes `round(parts / total * units / granularity) * granularity`.
    /// Entries that round to zero are dropped; the rest are sorted by
    /// descending parts, ties keeping consolidated order. A recipe whose
    /// parts do not sum to a positive total normalizes to nothing.
    pub fn normalize(&self, entries: &[RecipeEntry]) -> Recipe {
        let merged = Self::consolidate(entries);
        let total: f64 = merged.iter().map(|entry| entry.parts).sum();
        if total <= 0.0 || !total.is_finite() {
            return Vec::new();
        }

        let mut recipe: Recipe = merged
            .into_iter()
            .map(|entry| RecipeEntry {
                parts: self.round_units(entry.parts / total),
                pigment: entry.pigment,
            })
            .filter(|entry| entry.parts > 0.0)
            .collect();

        recipe.sort_by(|a, b| b.parts.total_cmp(&a.parts));
        recipe
    }

    fn round_units(&self, share: f64) -> f64 {
        (share * self.total_units / self.granularity).round() * self.granularity
    }
}
