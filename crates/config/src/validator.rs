//! Knowledge base validation
//!
//! Runs at startup so a bad catalog stops the process before it serves.
//! Checks:
//! - Required fields and non-empty catalog
//! - Duplicate property ids
//! - Coordinate and rate ranges

use std::collections::HashSet;

use terrenos_core::KnowledgeBase;

/// Validation error with context
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Config section
    pub source: String,
    /// Specific field
    pub field: Option<String>,
    pub message: String,
    pub severity: ValidationSeverity,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field_str = self.field.as_deref().unwrap_or("(root)");
        write!(
            f,
            "[{:?}] {}/{}: {}",
            self.severity, self.source, field_str, self.message
        )
    }
}

impl std::error::Error for ValidationError {}

/// Severity of validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Warning,
    /// Prevents startup
    Critical,
}

/// Validation result
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn add_critical(&mut self, source: &str, field: Option<&str>, message: impl Into<String>) {
        self.errors.push(ValidationError {
            source: source.to_string(),
            field: field.map(str::to_string),
            message: message.into(),
            severity: ValidationSeverity::Critical,
        });
    }

    pub fn add_warning(&mut self, source: &str, field: Option<&str>, message: impl Into<String>) {
        self.errors.push(ValidationError {
            source: source.to_string(),
            field: field.map(str::to_string),
            message: message.into(),
            severity: ValidationSeverity::Warning,
        });
    }

    /// No critical errors
    pub fn is_ok(&self) -> bool {
        !self.errors.iter().any(|e| e.severity == ValidationSeverity::Critical)
    }

    pub fn critical_errors(&self) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ValidationSeverity::Critical)
            .collect()
    }

    pub fn warnings(&self) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ValidationSeverity::Warning)
            .collect()
    }
}

/// Validate a catalog
pub fn validate_knowledge_base(kb: &KnowledgeBase) -> ValidationResult {
    let mut result = ValidationResult::default();

    if kb.properties.is_empty() {
        result.add_critical("properties", None, "Catalog has no properties");
    }

    let mut seen = HashSet::new();
    for (i, property) in kb.properties.iter().enumerate() {
        let field = format!("properties[{}]", i);
        if property.id.trim().is_empty() {
            result.add_critical("properties", Some(&field), "Property id is empty");
        } else if !seen.insert(property.id.as_str()) {
            result.add_critical(
                "properties",
                Some(&field),
                format!("Duplicate property id: {}", property.id),
            );
        }
        if property.name.trim().is_empty() {
            result.add_critical("properties", Some(&field), "Property name is empty");
        }
        if !property.coordinates.is_valid() {
            result.add_critical(
                "properties",
                Some(&field),
                format!(
                    "Coordinates out of range: {}, {}",
                    property.coordinates.lat, property.coordinates.lon
                ),
            );
        }
        if property.price_text.trim().is_empty() || property.area_text.trim().is_empty() {
            result.add_warning(
                "properties",
                Some(&field),
                format!("{} has no formatted price or area text", property.id),
            );
        }
    }

    let company = &kb.company;
    for (name, value) in [
        ("name", &company.name),
        ("phone", &company.phone),
        ("email", &company.email),
        ("address", &company.address),
    ] {
        if value.trim().is_empty() {
            result.add_critical("company", Some(name), "Required field is empty");
        }
    }
    if !company.whatsapp.chars().all(|c| c.is_ascii_digit()) {
        result.add_warning("company", Some("whatsapp"), "Handle should contain digits only");
    }

    let financing = &kb.financing;
    if financing.down_payment_min_percent > 100 {
        result.add_critical(
            "financing",
            Some("down_payment_min_percent"),
            format!("Must be at most 100, got {}", financing.down_payment_min_percent),
        );
    }
    for (category, rate) in &financing.interest_rates {
        if !(0.0..=100.0).contains(rate) {
            result.add_critical(
                "financing",
                Some(category.as_str()),
                format!("Interest rate out of range: {}", rate),
            );
        }
    }
    if financing.terms_months.contains(&0) {
        result.add_critical("financing", Some("terms_months"), "Term of 0 months");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let result = validate_knowledge_base(&KnowledgeBase::builtin());
        assert!(result.is_ok(), "{:?}", result.errors);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut kb = KnowledgeBase::builtin();
        kb.properties[1].id = kb.properties[0].id.clone();
        let result = validate_knowledge_base(&kb);
        assert!(!result.is_ok());
        assert!(result.critical_errors()[0].message.contains("Duplicate"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let mut kb = KnowledgeBase::builtin();
        kb.properties.clear();
        assert!(!validate_knowledge_base(&kb).is_ok());
    }

    #[test]
    fn test_bad_rate_rejected() {
        let mut kb = KnowledgeBase::builtin();
        kb.financing
            .interest_rates
            .insert(terrenos_core::PropertyCategory::RuralRecreational, 150.0);
        assert!(!validate_knowledge_base(&kb).is_ok());
    }

    #[test]
    fn test_missing_text_is_only_a_warning() {
        let mut kb = KnowledgeBase::builtin();
        kb.properties[0].price_text.clear();
        let result = validate_knowledge_base(&kb);
        assert!(result.is_ok());
        assert_eq!(result.warnings().len(), 1);
    }
}
