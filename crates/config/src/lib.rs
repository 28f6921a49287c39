//! Configuration management for the Terrenos assistant
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default.*`, `config/{env}.*`)
//! - Environment variables (`TERRENOS__` prefix, `__` separator)
//!
//! The knowledge base and the intent pattern table are separate YAML
//! documents, loaded once at startup and validated before use.

pub mod constants;
pub mod intents;
pub mod knowledge;
pub mod settings;
pub mod validator;

pub use intents::{IntentPatternDefinition, IntentPatternsConfig};
pub use knowledge::{load_knowledge_base, resolve_knowledge_base};
pub use settings::{
    load_settings, AssistantConfig, ObservabilityConfig, PersistenceConfig, RuntimeEnvironment,
    ServerConfig, Settings, StoreBackend,
};
pub use validator::{validate_knowledge_base, ValidationError, ValidationResult, ValidationSeverity};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
