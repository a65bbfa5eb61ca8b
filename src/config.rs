//! Configuration structures for the pigment matching engine.
//!
//! Every tunable the search reads is grouped here. The defaults reproduce
//! the constants in [`crate::constants`] exactly; changing any of them
//! changes observable recipes, so treat a non-default config as a different
//! fixture set.
//!
//! # Configuration Loading
//!
//! ```no_run
//! use pigment_match::MatchConfig;
//! use std::path::Path;
//!
//! // Load from file (missing fields take their defaults)
//! let config = MatchConfig::from_json_file(Path::new("match.json"))?;
//!
//! // Or use defaults
//! let config = MatchConfig::default();
//! # Ok::<(), pigment_match::MatchError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`SearchConfig`]: shortlist sizes, ratio sweeps and refinement steps
//! - [`AccuracyConfig`]: ΔE to percentage scale factors
//! - [`NormalizationConfig`]: recipe unit base and rounding granularity
//! - [`ReferenceConfig`]: reserved white/black identifiers and ranking limit

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{accuracy, normalization, references, search, thresholds};
use crate::{MatchError, Result};

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Best single-pigment ΔE below which the search stops immediately
    pub exact_match_threshold: f64,

    /// Combinatorial search bounds
    pub search: SearchConfig,

    /// Accuracy percentage scales
    pub accuracy: AccuracyConfig,

    /// Recipe rounding
    pub normalization: NormalizationConfig,

    /// Catalog conventions
    pub references: ReferenceConfig,
}

/// Combinatorial search bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Shortlist size for two-pigment mixes
    pub pair_shortlist: usize,

    /// Pair ratios are `i / pair_ratio_steps` for `i` in `1..pair_ratio_steps`
    pub pair_ratio_steps: usize,

    /// Shortlist size for three-pigment mixes
    pub triple_shortlist: usize,

    /// Ratio splits tried for every triple, in order
    pub triple_splits: Vec<[f64; 3]>,

    /// Increment of the white/black refinement ratio
    pub tint_step: f64,

    /// Number of white trials
    pub tint_steps: usize,

    /// Number of black trials
    pub shade_steps: usize,
}

/// Accuracy percentage scales: `max(0, 100 - ΔE * scale)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccuracyConfig {
    /// Scale for pre-made catalog ranking
    pub ranking_scale: f64,

    /// Scale for synthesized recipes
    pub recipe_scale: f64,
}

/// Recipe normalization parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationConfig {
    /// Parts are rescaled so that they sum to this before rounding
    pub total_units: f64,

    /// Rounding granularity of rescaled parts
    pub granularity: f64,
}

/// Catalog conventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Identifier treated as pure white when no pigment carries a role tag
    pub white_id: String,

    /// Identifier treated as pure black when no pigment carries a role tag
    pub black_id: String,

    /// Number of ranked results when the caller gives no limit
    pub default_rank_limit: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            exact_match_threshold: thresholds::EXACT_MATCH_DELTA_E,
            search: SearchConfig::default(),
            accuracy: AccuracyConfig::default(),
            normalization: NormalizationConfig::default(),
            references: ReferenceConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pair_shortlist: search::PAIR_SHORTLIST,
            pair_ratio_steps: search::PAIR_RATIO_STEPS,
            triple_shortlist: search::TRIPLE_SHORTLIST,
            triple_splits: search::TRIPLE_SPLITS.to_vec(),
            tint_step: search::TINT_STEP,
            tint_steps: search::TINT_STEPS,
            shade_steps: search::SHADE_STEPS,
        }
    }
}

impl Default for AccuracyConfig {
    fn default() -> Self {
        Self {
            ranking_scale: accuracy::RANKING_SCALE,
            recipe_scale: accuracy::RECIPE_SCALE,
        }
    }
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            total_units: normalization::TOTAL_UNITS,
            granularity: normalization::GRANULARITY,
        }
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            white_id: references::WHITE_ID.to_string(),
            black_id: references::BLACK_ID.to_string(),
            default_rank_limit: references::DEFAULT_RANK_LIMIT,
        }
    }
}

impl MatchConfig {
    /// Check that every parameter is usable by the search
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f64) -> Result<()> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(MatchError::invalid_parameter(name, value))
            }
        }

        if !(self.exact_match_threshold >= 0.0 && self.exact_match_threshold.is_finite()) {
            return Err(MatchError::invalid_parameter(
                "exact_match_threshold",
                self.exact_match_threshold,
            ));
        }

        let search = &self.search;
        if search.pair_shortlist == 0 {
            return Err(MatchError::invalid_parameter("search.pair_shortlist", 0));
        }
        if search.pair_ratio_steps < 2 {
            return Err(MatchError::invalid_parameter(
                "search.pair_ratio_steps",
                search.pair_ratio_steps,
            ));
        }
        for split in &search.triple_splits {
            let sum: f64 = split.iter().sum();
            if split.iter().any(|share| *share <= 0.0) || (sum - 1.0).abs() > 1e-9 {
                return Err(MatchError::invalid_parameter(
                    "search.triple_splits",
                    format!("{:?}", split),
                ));
            }
        }
        positive("search.tint_step", search.tint_step)?;
        let max_ratio = search.tint_step * search.tint_steps.max(search.shade_steps) as f64;
        if max_ratio >= 1.0 {
            return Err(MatchError::invalid_parameter(
                "search.tint_step",
                format!("{} reaches {} of the mix", search.tint_step, max_ratio),
            ));
        }

        positive("accuracy.ranking_scale", self.accuracy.ranking_scale)?;
        positive("accuracy.recipe_scale", self.accuracy.recipe_scale)?;
        positive("normalization.total_units", self.normalization.total_units)?;
        positive("normalization.granularity", self.normalization.granularity)?;

        if self.references.default_rank_limit == 0 {
            return Err(MatchError::invalid_parameter("references.default_rank_limit", 0));
        }

        Ok(())
    }

    /// Load and validate configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MatchError::io(format!("reading config {}", path.display()), e))?;
        Self::from_json_str(&content)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MatchError::serialization("parsing match config", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| MatchError::serialization("serializing match config", e))?;
        std::fs::write(path, json)
            .map_err(|e| MatchError::io(format!("writing config {}", path.display()), e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = MatchConfig::default();
        assert_eq!(config.exact_match_threshold, 2.0);
        assert_eq!(config.search.pair_shortlist, 10);
        assert_eq!(config.search.pair_ratio_steps, 40);
        assert_eq!(config.search.triple_shortlist, 6);
        assert_eq!(config.search.triple_splits.len(), 5);
        assert_eq!(config.accuracy.ranking_scale, 1.5);
        assert_eq!(config.accuracy.recipe_scale, 8.0);
        assert_eq!(config.references.default_rank_limit, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = MatchConfig::from_json_str(r#"{"search": {"pair_shortlist": 4}}"#).unwrap();
        assert_eq!(config.search.pair_shortlist, 4);
        assert_eq!(config.search.triple_shortlist, 6);
        assert_eq!(config.exact_match_threshold, 2.0);
        assert_eq!(config.references.white_id, "white");
    }

    #[test]
    fn test_json_round_trip() {
        let config = MatchConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(MatchConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_bad_split() {
        let mut config = MatchConfig::default();
        config.search.triple_splits.push([0.5, 0.5, 0.5]);
        match config.validate() {
            Err(MatchError::InvalidParameter { parameter, .. }) => {
                assert_eq!(parameter, "search.triple_splits")
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_shortlist_and_steps() {
        let mut config = MatchConfig::default();
        config.search.pair_shortlist = 0;
        assert!(config.validate().is_err());

        let mut config = MatchConfig::default();
        config.search.pair_ratio_steps = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_refinement_reaching_full_mix() {
        let mut config = MatchConfig::default();
        config.search.tint_step = 0.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        assert!(matches!(
            MatchConfig::from_json_str("{not json"),
            Err(MatchError::Serialization { .. })
        ));
    }

    #[test]
    fn test_to_and_from_file() {
        let path = std::env::temp_dir().join(format!("pigment_match_config_{}.json", std::process::id()));
        let mut config = MatchConfig::default();
        config.references.white_id = "titanium-white".to_string();
        config.to_json_file(&path).unwrap();
        let loaded = MatchConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
