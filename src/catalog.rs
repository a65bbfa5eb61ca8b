//! Pigment catalog records and inventory filtering
//!
//! The engine only ever borrows a `&[Pigment]`; `Catalog` is a loading
//! convenience for callers that keep their catalog as JSON.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::{MatchError, Result};

/// Explicit tag for the reference pigments used in tint/shade refinement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PigmentRole {
    White,
    Black,
}

/// Immutable catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pigment {
    /// Identifier, unique within a catalog
    pub id: String,
    /// Human-readable name
    pub display_name: String,
    /// Swatch color, serialized as `#RRGGBB`
    #[serde(with = "hex_color")]
    pub color: Rgb,
    /// Reference role, if this pigment is the catalog's pure white or black
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<PigmentRole>,
}

impl Pigment {
    /// Create an untagged pigment
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, color: Rgb) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            color,
            role: None,
        }
    }

    /// Tag this pigment as a white or black reference
    #[must_use]
    pub fn with_role(mut self, role: PigmentRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Role from the explicit tag, falling back to the reserved identifiers
    pub fn effective_role(&self, white_id: &str, black_id: &str) -> Option<PigmentRole> {
        self.role.or_else(|| {
            if self.id == white_id {
                Some(PigmentRole::White)
            } else if self.id == black_id {
                Some(PigmentRole::Black)
            } else {
                None
            }
        })
    }
}

/// One pigment and its share of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub pigment: Pigment,
    pub parts: f64,
}

/// Recipe entries, descending by parts once normalized
pub type Recipe = Vec<RecipeEntry>;

/// Ordered pigment list loaded from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pigments: Vec<Pigment>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate identifiers
    pub fn new(pigments: Vec<Pigment>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(pigments.len());
        for pigment in &pigments {
            if !seen.insert(pigment.id.as_str()) {
                return Err(MatchError::invalid_parameter("pigment.id", format!("duplicate {:?}", pigment.id)));
            }
        }
        Ok(Self { pigments })
    }

    /// Parse a JSON array of pigment records
    pub fn from_json_str(json: &str) -> Result<Self> {
        let pigments: Vec<Pigment> = serde_json::from_str(json)
            .map_err(|e| MatchError::serialization("parsing pigment catalog", e))?;
        Self::new(pigments)
    }

    /// Load a JSON array of pigment records from file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MatchError::io(format!("reading catalog {}", path.display()), e))?;
        Self::from_json_str(&content)
    }

    /// Pigments in catalog order
    pub fn pigments(&self) -> &[Pigment] {
        &self.pigments
    }

    /// Number of pigments
    pub fn len(&self) -> usize {
        self.pigments.len()
    }

    /// Whether the catalog holds no pigments
    pub fn is_empty(&self) -> bool {
        self.pigments.is_empty()
    }

    /// Consume the catalog, returning its pigments in order
    pub fn into_pigments(self) -> Vec<Pigment> {
        self.pigments
    }
}

impl AsRef<[Pigment]> for Catalog {
    fn as_ref(&self) -> &[Pigment] {
        &self.pigments
    }
}

/// In-stock subset of a catalog, by pigment id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    ids: HashSet<String>,
}

impl Inventory {
    /// Create an inventory from pigment identifiers
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the pigment is in stock
    pub fn allows(&self, pigment: &Pigment) -> bool {
        self.ids.contains(&pigment.id)
    }

    /// Eligible pigments, preserving catalog order
    pub fn filter<'a>(&self, catalog: &'a [Pigment]) -> Vec<&'a Pigment> {
        catalog.iter().filter(|p| self.allows(p)).collect()
    }

    /// Number of in-stock identifiers
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is in stock
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Inventory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}

/// Select the pigments a search may use
pub(crate) fn eligible<'a>(catalog: &'a [Pigment], inventory: Option<&Inventory>) -> Vec<&'a Pigment> {
    match inventory {
        Some(inventory) => inventory.filter(catalog),
        None => catalog.iter().collect(),
    }
}

/// Serde adapter storing `Rgb` as `#RRGGBB`
mod hex_color {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::color::{ColorConverter, Rgb};

    pub fn serialize<S: Serializer>(color: &Rgb, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ColorConverter::new().rgb_to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgb, D::Error> {
        let hex = String::deserialize(deserializer)?;
        ColorConverter::new()
            .hex_to_rgb(&hex)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"[
        {"id": "white", "display_name": "Titanium White", "color": "#FFFFFF"},
        {"id": "ivory", "display_name": "Ivory Black", "color": "#101010", "role": "black"},
        {"id": "cad-red", "display_name": "Cadmium Red", "color": "#e3170a"}
    ]"##;

    #[test]
    fn test_catalog_from_json() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.pigments()[2].color, Rgb::new(0xE3, 0x17, 0x0A));
        assert_eq!(catalog.pigments()[1].role, Some(PigmentRole::Black));
        assert_eq!(catalog.pigments()[0].role, None);
    }

    #[test]
    fn test_catalog_rejects_invalid_hex() {
        let json = r##"[{"id": "x", "display_name": "X", "color": "#12"}]"##;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(MatchError::Serialization { .. })
        ));
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let pigments = vec![
            Pigment::new("a", "A", Rgb::new(1, 2, 3)),
            Pigment::new("a", "Also A", Rgb::new(4, 5, 6)),
        ];
        assert!(matches!(Catalog::new(pigments), Err(MatchError::InvalidParameter { .. })));
    }

    #[test]
    fn test_catalog_missing_file() {
        let err = Catalog::from_json_file(Path::new("no/such/catalog.json")).unwrap_err();
        assert!(matches!(err, MatchError::ConfigIo { .. }));
    }

    #[test]
    fn test_pigment_serializes_hex_uppercase() {
        let pigment = Pigment::new("r", "Red", Rgb::new(0xE3, 0x17, 0x0A));
        let json = serde_json::to_string(&pigment).unwrap();
        assert_eq!(json, r##"{"id":"r","display_name":"Red","color":"#E3170A"}"##);
    }

    #[test]
    fn test_effective_role() {
        let tagged = Pigment::new("zinc", "Zinc White", Rgb::new(250, 250, 250)).with_role(PigmentRole::White);
        let reserved = Pigment::new("black", "Mars Black", Rgb::new(0, 0, 0));
        let plain = Pigment::new("umber", "Raw Umber", Rgb::new(115, 74, 18));

        assert_eq!(tagged.effective_role("white", "black"), Some(PigmentRole::White));
        assert_eq!(reserved.effective_role("white", "black"), Some(PigmentRole::Black));
        assert_eq!(plain.effective_role("white", "black"), None);
    }

    #[test]
    fn test_inventory_filter_preserves_order() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        let inventory: Inventory = ["cad-red", "white", "unknown"].into_iter().collect();
        let ids: Vec<&str> = inventory
            .filter(catalog.pigments())
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["white", "cad-red"]);
    }

    #[test]
    fn test_empty_inventory_excludes_everything() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        assert!(eligible(catalog.pigments(), Some(&Inventory::default())).is_empty());
        assert_eq!(eligible(catalog.pigments(), None).len(), 3);
    }
}
