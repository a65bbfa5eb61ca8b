//! Pre-made paint lookup
//!
//! Scores every eligible pigment by ΔE to the target and keeps the closest.

use serde::{Deserialize, Serialize};

use crate::accuracy_from_distance;
use crate::catalog::Pigment;
use crate::color::{ColorConverter, Rgb};
use crate::config::MatchConfig;

/// Catalog pigment with its distance to the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPigment {
    pub pigment: Pigment,
    /// ΔE between target and pigment
    pub distance: f64,
    /// Display percentage in [0, 100]
    pub accuracy: f64,
}

/// Ranks catalog pigments by perceptual distance
#[derive(Debug, Clone)]
pub struct CatalogRanking<'c> {
    config: &'c MatchConfig,
    converter: ColorConverter,
}

impl<'c> CatalogRanking<'c> {
    /// Create a ranking over the given configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Source of the ranking accuracy scale
    pub fn new(config: &'c MatchConfig) -> Self {
        Self {
            config,
            converter: ColorConverter::new(),
        }
    }

    /// The `limit` pigments closest to `target`, ascending by ΔE
    ///
    /// Equal distances keep catalog order. An empty input yields an empty list.
    pub fn rank(&self, target: Rgb, pigments: &[&Pigment], limit: usize) -> Vec<RankedPigment> {
        let target_lab = self.converter.rgb_to_lab(target);

        let mut scored: Vec<(&Pigment, f64)> = pigments
            .iter()
            .map(|&pigment| {
                let lab = self.converter.rgb_to_lab(pigment.color);
                (pigment, self.converter.delta_e(target_lab, lab))
            })
            .collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));

        scored
            .into_iter()
            .take(limit)
            .map(|(pigment, distance)| RankedPigment {
                pigment: pigment.clone(),
                distance,
                accuracy: accuracy_from_distance(distance, self.config.accuracy.ranking_scale),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Pigment> {
        vec![
            Pigment::new("w", "White", Rgb::new(255, 255, 255)),
            Pigment::new("b", "Black", Rgb::new(0, 0, 0)),
            Pigment::new("r", "Red", Rgb::new(230, 20, 20)),
        ]
    }

    #[test]
    fn test_rank_orders_by_distance() {
        let config = MatchConfig::default();
        let catalog = catalog();
        let refs: Vec<&Pigment> = catalog.iter().collect();

        let ranked = CatalogRanking::new(&config).rank(Rgb::new(255, 0, 0), &refs, 15);
        let ids: Vec<&str> = ranked.iter().map(|r| r.pigment.id.as_str()).collect();
        assert_eq!(ids, vec!["r", "w", "b"]);
        assert!(ranked.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_rank_accuracy_uses_ranking_scale() {
        let config = MatchConfig::default();
        let catalog = catalog();
        let refs: Vec<&Pigment> = catalog.iter().collect();

        let ranked = CatalogRanking::new(&config).rank(Rgb::new(255, 0, 0), &refs, 15);
        let red = &ranked[0];
        assert!((red.accuracy - (100.0 - red.distance * 1.5)).abs() < 1e-9);
        // White and black are over 100 ΔE from pure red
        assert_eq!(ranked[1].accuracy, 0.0);
        assert_eq!(ranked[2].accuracy, 0.0);
    }

    #[test]
    fn test_rank_respects_limit() {
        let config = MatchConfig::default();
        let catalog = catalog();
        let refs: Vec<&Pigment> = catalog.iter().collect();

        let ranked = CatalogRanking::new(&config).rank(Rgb::new(10, 10, 10), &refs, 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].pigment.id, "b");
    }

    #[test]
    fn test_rank_empty_catalog() {
        let config = MatchConfig::default();
        assert!(CatalogRanking::new(&config).rank(Rgb::new(1, 2, 3), &[], 15).is_empty());
    }

    #[test]
    fn test_rank_ties_keep_catalog_order() {
        let config = MatchConfig::default();
        let catalog = vec![
            Pigment::new("x", "X", Rgb::new(9, 99, 199)),
            Pigment::new("y", "Y", Rgb::new(9, 99, 199)),
        ];
        let refs: Vec<&Pigment> = catalog.iter().collect();

        let ranked = CatalogRanking::new(&config).rank(Rgb::new(200, 10, 10), &refs, 15);
        assert_eq!(ranked[0].pigment.id, "x");
        assert_eq!(ranked[1].pigment.id, "y");
    }
}
