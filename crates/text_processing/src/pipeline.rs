//! Text analysis pipeline
//!
//! Order: Normalize → {Classify, Extract}. Classification and extraction
//! both read the normalized text and do not depend on each other.

use terrenos_core::Entities;

use crate::entities::EntityExtractor;
use crate::intent::{Classification, IntentClassifier};
use crate::normalizer::normalize;

/// Everything the responder needs to know about one message
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub normalized: String,
    pub classification: Classification,
    pub entities: Entities,
}

/// Normalizer, classifier and extractor bundled together
#[derive(Debug, Clone, Default)]
pub struct TextAnalyzer {
    classifier: IntentClassifier,
    extractor: EntityExtractor,
}

impl TextAnalyzer {
    pub fn new(classifier: IntentClassifier, extractor: EntityExtractor) -> Self {
        Self {
            classifier,
            extractor,
        }
    }

    /// Default pattern table and keyword lists
    pub fn builtin() -> Self {
        Self::new(IntentClassifier::builtin(), EntityExtractor::new())
    }

    pub fn analyze(&self, raw: &str) -> Analysis {
        let normalized = normalize(raw);
        let classification = self.classifier.classify(&normalized);
        let entities = self.extractor.extract(&normalized);

        tracing::debug!(
            intent = %classification.intent,
            matches = classification.match_count,
            entities = entities.len(),
            "Analyzed message"
        );

        Analysis {
            normalized,
            classification,
            entities,
        }
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrenos_core::{IntentLabel, PropertyCategory};

    #[test]
    fn test_analyze_normalizes_first() {
        let analysis = TextAnalyzer::builtin().analyze("  TERRENO   Comercial ");
        assert_eq!(analysis.normalized, "terreno comercial");
        assert_eq!(analysis.classification.intent, IntentLabel::PropertyInquiry);
        assert_eq!(
            analysis.entities.property_type,
            Some(PropertyCategory::Commercial)
        );
    }

    #[test]
    fn test_blank_input() {
        let analysis = TextAnalyzer::builtin().analyze(" \n ");
        assert_eq!(analysis.normalized, "");
        assert_eq!(analysis.classification.intent, IntentLabel::General);
        assert!(analysis.entities.is_empty());
    }
}
