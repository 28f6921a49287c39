//! Property catalog types

use serde::{Deserialize, Serialize};

/// Property category (closed set)
///
/// Declaration order is the enumeration order used by entity extraction and by
/// the financing rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    #[serde(alias = "residencial")]
    Residential,
    #[serde(alias = "comercial")]
    Commercial,
    Industrial,
    #[serde(alias = "campestre", alias = "rural")]
    RuralRecreational,
}

impl PropertyCategory {
    /// All categories in enumeration order
    pub const ALL: [PropertyCategory; 4] = [
        PropertyCategory::Residential,
        PropertyCategory::Commercial,
        PropertyCategory::Industrial,
        PropertyCategory::RuralRecreational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::Industrial => "industrial",
            Self::RuralRecreational => "rural_recreational",
        }
    }

    /// Parse from either the canonical label or the Spanish listing label
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "residential" | "residencial" => Some(Self::Residential),
            "commercial" | "comercial" => Some(Self::Commercial),
            "industrial" => Some(Self::Industrial),
            "rural_recreational" | "rural-recreational" | "campestre" | "rural" => {
                Some(Self::RuralRecreational)
            }
            _ => None,
        }
    }

    /// Spanish display name used in replies
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Residential => "Residencial",
            Self::Commercial => "Comercial",
            Self::Industrial => "Industrial",
            Self::RuralRecreational => "Campestre",
        }
    }
}

impl std::fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    #[serde(alias = "disponible")]
    Available,
    #[serde(alias = "apartado")]
    Reserved,
    #[serde(alias = "vendido")]
    Sold,
}

/// Geographic coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Catalog entry for a listed terrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Unique identifier within the catalog
    pub id: String,
    pub name: String,
    /// Price in whole USD
    pub price: u64,
    pub price_text: String,
    /// Area in square meters
    pub area: u64,
    pub area_text: String,
    pub location: String,
    pub category: PropertyCategory,
    #[serde(default)]
    pub status: Availability,
    /// Ordered, most relevant first
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub financing_options: Vec<String>,
    #[serde(default)]
    pub legal_status: String,
}

impl Property {
    /// The first `n` features
    pub fn top_features(&self, n: usize) -> &[String] {
        &self.features[..self.features.len().min(n)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_accepts_spanish_labels() {
        assert_eq!(PropertyCategory::parse("campestre"), Some(PropertyCategory::RuralRecreational));
        assert_eq!(PropertyCategory::parse("Comercial"), Some(PropertyCategory::Commercial));
        assert_eq!(PropertyCategory::parse("commercial"), Some(PropertyCategory::Commercial));
        assert_eq!(PropertyCategory::parse("hotel"), None);
    }

    #[test]
    fn test_category_order_matches_enumeration() {
        let mut sorted = PropertyCategory::ALL;
        sorted.sort();
        assert_eq!(sorted, PropertyCategory::ALL);
    }

    #[test]
    fn test_category_yaml_alias() {
        let category: PropertyCategory = serde_yaml::from_str("residencial").unwrap();
        assert_eq!(category, PropertyCategory::Residential);
        let category: PropertyCategory = serde_yaml::from_str("rural_recreational").unwrap();
        assert_eq!(category, PropertyCategory::RuralRecreational);
    }

    #[test]
    fn test_coordinates_validity() {
        assert!(Coordinates::new(19.4326, -99.1332).is_valid());
        assert!(!Coordinates::new(95.0, 0.0).is_valid());
    }
}
