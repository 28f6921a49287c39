//! Entity Extraction
//!
//! Pulls structured attributes out of a normalized message:
//! - Property category, from Spanish keyword lists
//! - Price tier (low / medium / high)
//! - Desired area in square meters
//!
//! Each attribute is extracted independently and is absent when nothing in
//! the message mentions it.
//!
//! # Example
//!
//! ```
//! use terrenos_text_processing::entities::EntityExtractor;
//! use terrenos_core::{PriceRange, PropertyCategory};
//!
//! let extractor = EntityExtractor::new();
//! let entities = extractor.extract("busco una casa de precio bajo, 500 m²");
//!
//! assert_eq!(entities.property_type, Some(PropertyCategory::Residential));
//! assert_eq!(entities.price_range, Some(PriceRange::Low));
//! assert_eq!(entities.desired_area, Some(500));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use terrenos_core::{Entities, PriceRange, PropertyCategory};

/// Price tier patterns, checked in order; the first hit decides
static PRICE_TIERS: Lazy<[(PriceRange, Regex); 3]> = Lazy::new(|| {
    [
        (PriceRange::Low, Regex::new(r"barato|económico|bajo").unwrap()),
        (PriceRange::Medium, Regex::new(r"medio|promedio").unwrap()),
        (PriceRange::High, Regex::new(r"alto|premium|lujo").unwrap()),
    ]
});

static AREA_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(m²|metros|metro)").unwrap());

static DECIMAL_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d$").unwrap());

/// Default category keywords
pub fn default_category_keywords() -> Vec<(PropertyCategory, Vec<String>)> {
    let table: [(PropertyCategory, &[&str]); 4] = [
        (
            PropertyCategory::Residential,
            &["residencial", "casa", "hogar", "vivienda"],
        ),
        (
            PropertyCategory::Commercial,
            &["comercial", "negocio", "tienda", "oficina"],
        ),
        (
            PropertyCategory::Industrial,
            &["industrial", "fábrica", "bodega", "almacén"],
        ),
        (
            PropertyCategory::RuralRecreational,
            &["campestre", "campo", "rural", "naturaleza"],
        ),
    ];

    table
        .iter()
        .map(|(category, words)| (*category, words.iter().map(|w| w.to_string()).collect()))
        .collect()
}

/// Keyword and pattern based entity extractor
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    /// Scanned in order; the first category with a keyword hit wins
    category_keywords: Vec<(PropertyCategory, Vec<String>)>,
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityExtractor {
    pub fn new() -> Self {
        Self {
            category_keywords: default_category_keywords(),
        }
    }

    /// Replace the keyword list of one category
    ///
    /// Keywords are matched as substrings of the normalized message, so they
    /// should be lowercase.
    pub fn with_category_keywords(
        mut self,
        category: PropertyCategory,
        keywords: Vec<String>,
    ) -> Self {
        match self
            .category_keywords
            .iter_mut()
            .find(|(c, _)| *c == category)
        {
            Some((_, existing)) => *existing = keywords,
            None => self.category_keywords.push((category, keywords)),
        }
        self
    }

    /// Extract all entities from a normalized message
    pub fn extract(&self, normalized: &str) -> Entities {
        Entities {
            property_type: self.extract_property_type(normalized),
            price_range: self.extract_price_range(normalized),
            desired_area: self.extract_area(normalized),
        }
    }

    pub fn extract_property_type(&self, text: &str) -> Option<PropertyCategory> {
        self.category_keywords
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|(category, _)| *category)
    }

    pub fn extract_price_range(&self, text: &str) -> Option<PriceRange> {
        PRICE_TIERS
            .iter()
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(tier, _)| *tier)
    }

    /// Square meters from the first `<digits> m²|metros|metro` mention
    ///
    /// Digit runs too large for `u64` count as no mention.
    pub fn extract_area(&self, text: &str) -> Option<u64> {
        let caps = AREA_PATTERN.captures(text)?;
        let digits = caps.get(1)?.as_str();
        let area = digits.chars().try_fold(0u64, |acc, c| {
            acc.checked_mul(10)?.checked_add(u64::from(decimal_value(c)?))
        });
        if area.is_none() {
            tracing::debug!(digits = %digits, "Area value out of range");
        }
        area
    }
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Value of any Unicode decimal digit (`\d`), not only ASCII
///
/// Decimal digits come in contiguous runs of ten starting at zero, so the
/// value is the offset from the start of the run.
fn decimal_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    Some((c as u32 - start) % 10)
}
