//! Intent Classification
//!
//! Maps a normalized message to one [`IntentLabel`] using an ordered table of
//! intent → regex patterns.
//!
//! Every pattern of every intent is tested on each call, in table order. The
//! reported intent is the **last** intent with a matching pattern, so for
//! overlapping messages later table entries override earlier ones
//! (`"hola, ¿qué propiedades tienen?"` is a greeting, not a property inquiry).
//! No match yields [`IntentLabel::General`].
//!
//! # Example
//!
//! ```
//! use terrenos_text_processing::intent::IntentClassifier;
//! use terrenos_core::IntentLabel;
//!
//! let classifier = IntentClassifier::builtin();
//! let result = classifier.classify("quiero agendar una visita");
//!
//! assert_eq!(result.intent, IntentLabel::VisitRequest);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use terrenos_core::IntentLabel;

use crate::{Result, TextProcessingError};

/// Default pattern table, in evaluation order
pub const DEFAULT_INTENT_PATTERNS: &[(IntentLabel, &[&str])] = &[
    (
        IntentLabel::PropertyInquiry,
        &[
            r"propiedad|terreno|disponible|venta|comprar",
            r"residencial|comercial|industrial|campestre",
            r"casa|negocio|empresa|campo",
        ],
    ),
    (
        IntentLabel::PriceInquiry,
        &[r"precio|costo|cuanto|vale|valor", r"pagar|dinero|inversión"],
    ),
    (
        IntentLabel::LocationInquiry,
        &[r"ubicación|donde|dirección|lugar", r"zona|área|región"],
    ),
    (
        IntentLabel::VisitRequest,
        &[r"visita|ver|conocer|agendar|cita", r"mostrar|enseñar"],
    ),
    (
        IntentLabel::FinancingInquiry,
        &[
            r"financiamiento|crédito|préstamo",
            r"pago|mensualidad|enganche",
            r"banco|hipoteca",
        ],
    ),
    (
        IntentLabel::ContactRequest,
        &[r"contacto|teléfono|email|llamar", r"comunicar|hablar"],
    ),
    (
        IntentLabel::ServicesInquiry,
        &[r"servicio|asesoría|ayuda|apoyo", r"legal|topografía|permiso"],
    ),
    (
        IntentLabel::Greeting,
        &[r"hola|buenos|buenas|saludos", r"qué tal|cómo está"],
    ),
    (IntentLabel::Thanks, &[r"gracias|thank|agradezco"]),
];

static BUILTIN_TABLE: Lazy<Vec<CompiledIntent>> = Lazy::new(|| {
    DEFAULT_INTENT_PATTERNS
        .iter()
        .map(|(intent, patterns)| CompiledIntent {
            intent: *intent,
            patterns: patterns.iter().map(|p| Regex::new(p).unwrap()).collect(),
        })
        .collect()
});

/// Result of classifying one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Winning intent
    pub intent: IntentLabel,
    /// Number of patterns that matched, across all intents
    pub match_count: usize,
    /// Intent of each matching pattern, in evaluation order
    pub matched: Vec<IntentLabel>,
}

impl Classification {
    fn fallback() -> Self {
        Self {
            intent: IntentLabel::General,
            match_count: 0,
            matched: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledIntent {
    intent: IntentLabel,
    patterns: Vec<Regex>,
}

/// Regex-table intent classifier
///
/// Patterns are compiled once at construction; `classify` is pure and can be
/// shared across tasks.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    table: Vec<CompiledIntent>,
}

impl IntentClassifier {
    /// Classifier over the default table
    pub fn builtin() -> Self {
        Self {
            table: BUILTIN_TABLE.clone(),
        }
    }

    /// Compile a custom table, kept in the given order
    pub fn new<I, P, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (IntentLabel, P)>,
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Vec::new();
        for (intent, patterns) in entries {
            let mut compiled = Vec::new();
            for pattern in patterns {
                let pattern = pattern.as_ref();
                let regex =
                    Regex::new(pattern).map_err(|e| TextProcessingError::InvalidPattern {
                        intent: intent.to_string(),
                        pattern: pattern.to_string(),
                        message: e.to_string(),
                    })?;
                compiled.push(regex);
            }
            table.push(CompiledIntent {
                intent,
                patterns: compiled,
            });
        }

        if table.iter().all(|entry| entry.patterns.is_empty()) {
            return Err(TextProcessingError::EmptyTable);
        }

        tracing::debug!(intents = table.len(), "Compiled intent pattern table");
        Ok(Self { table })
    }

    /// Classify a normalized message
    pub fn classify(&self, normalized: &str) -> Classification {
        let mut result = Classification::fallback();

        for entry in &self.table {
            for pattern in &entry.patterns {
                if pattern.is_match(normalized) {
                    result.match_count += 1;
                    result.matched.push(entry.intent);
                    result.intent = entry.intent;
                }
            }
        }

        result
    }

    /// Intents in evaluation order
    pub fn intents(&self) -> impl Iterator<Item = IntentLabel> + '_ {
        self.table.iter().map(|entry| entry.intent)
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> IntentLabel {
        IntentClassifier::builtin().classify(text).intent
    }

    #[test]
    fn test_single_intents() {
        assert_eq!(classify("hola"), IntentLabel::Greeting);
        assert_eq!(classify("terreno comercial"), IntentLabel::PropertyInquiry);
        assert_eq!(classify("precio"), IntentLabel::PriceInquiry);
        assert_eq!(classify("dónde está la ubicación"), IntentLabel::LocationInquiry);
        assert_eq!(classify("quiero agendar una cita"), IntentLabel::VisitRequest);
        assert_eq!(classify("opciones de crédito"), IntentLabel::FinancingInquiry);
        assert_eq!(classify("su teléfono"), IntentLabel::ContactRequest);
        assert_eq!(classify("asesoría legal"), IntentLabel::ServicesInquiry);
        assert_eq!(classify("muchas gracias"), IntentLabel::Thanks);
    }

    #[test]
    fn test_no_match_is_general() {
        let result = IntentClassifier::builtin().classify("xyz");
        assert_eq!(result, Classification::fallback());
        assert_eq!(classify(""), IntentLabel::General);
    }

    #[test]
    fn test_last_match_wins() {
        let result = IntentClassifier::builtin()
            .classify("hola, ¿qué propiedades tienen disponibles?");
        assert_eq!(result.intent, IntentLabel::Greeting);
        assert_eq!(
            result.matched,
            vec![IntentLabel::PropertyInquiry, IntentLabel::Greeting]
        );
        assert_eq!(result.match_count, 2);

        assert_eq!(classify("gracias por el precio"), IntentLabel::Thanks);
    }

    #[test]
    fn test_counts_every_matching_pattern() {
        let result = IntentClassifier::builtin().classify("terreno residencial para casa");
        assert_eq!(result.intent, IntentLabel::PropertyInquiry);
        assert_eq!(result.match_count, 3);
    }

    #[test]
    fn test_deterministic() {
        let classifier = IntentClassifier::builtin();
        let text = "hola, quiero ver el precio del terreno y hablar con un asesor";
        let first = classifier.classify(text);
        for _ in 0..10 {
            assert_eq!(classifier.classify(text), first);
        }
    }

    #[test]
    fn test_custom_table_order() {
        let classifier = IntentClassifier::new(vec![
            (IntentLabel::Greeting, vec!["hola"]),
            (IntentLabel::PropertyInquiry, vec!["terreno"]),
        ])
        .unwrap();
        assert_eq!(
            classifier.classify("hola, busco terreno").intent,
            IntentLabel::PropertyInquiry
        );
        assert_eq!(
            classifier.intents().collect::<Vec<_>>(),
            vec![IntentLabel::Greeting, IntentLabel::PropertyInquiry]
        );
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err =
            IntentClassifier::new(vec![(IntentLabel::Thanks, vec!["(gracias"])]).unwrap_err();
        assert!(matches!(err, TextProcessingError::InvalidPattern { .. }));
    }

    #[test]
    fn test_empty_table_rejected() {
        let entries: Vec<(IntentLabel, Vec<String>)> = Vec::new();
        assert!(matches!(
            IntentClassifier::new(entries),
            Err(TextProcessingError::EmptyTable)
        ));
    }
}
