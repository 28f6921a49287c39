//! Intent pattern table configuration
//!
//! Overrides the classifier's built-in pattern table from a YAML file:
//!
//! ```yaml
//! intents:
//!   - intent: property_inquiry
//!     patterns: ["propiedad|terreno|disponible"]
//!   - intent: greeting
//!     patterns: ["hola|buenas"]
//! ```
//!
//! Entry order is evaluation order, which decides last-match-wins ties.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use terrenos_core::IntentLabel;

use crate::ConfigError;

/// Intent pattern table loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntentPatternsConfig {
    #[serde(default)]
    pub intents: Vec<IntentPatternDefinition>,
}

/// Patterns for a single intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentPatternDefinition {
    pub intent: IntentLabel,
    pub patterns: Vec<String>,
}

impl IntentPatternsConfig {
    /// Load from a YAML file and validate
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            intents = config.intents.len(),
            "Loaded intent pattern table"
        );
        Ok(config)
    }

    /// Every entry names a matchable intent once and has compilable patterns
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.intents.is_empty() {
            return Err(ConfigError::MissingField("intents".to_string()));
        }

        let mut seen = HashSet::new();
        for def in &self.intents {
            let field = format!("intents.{}", def.intent);
            if def.intent == IntentLabel::General {
                return Err(ConfigError::InvalidValue {
                    field,
                    message: "general is the fallback and cannot have patterns".to_string(),
                });
            }
            if !seen.insert(def.intent) {
                return Err(ConfigError::InvalidValue {
                    field,
                    message: "intent listed more than once".to_string(),
                });
            }
            if def.patterns.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field,
                    message: "no patterns".to_string(),
                });
            }
            for pattern in &def.patterns {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidValue {
                    field: field.clone(),
                    message: format!("invalid pattern {:?}: {}", pattern, e),
                })?;
            }
        }
        Ok(())
    }

    /// Table in evaluation order
    pub fn entries(&self) -> Vec<(IntentLabel, Vec<String>)> {
        self.intents
            .iter()
            .map(|def| (def.intent, def.patterns.clone()))
            .collect()
    }
}
