//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{env, observability, persistence, server};
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Conversation store configuration
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Knowledge base, intent table and template selection
    #[serde(default)]
    pub assistant: AssistantConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    server::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    server::DEFAULT_PORT
}

fn default_timeout() -> u64 {
    server::DEFAULT_TIMEOUT_SECONDS
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Which conversation store backs the assistant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local; lost on restart
    #[default]
    Memory,
    Scylla,
}

/// Persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// ScyllaDB host addresses
    #[serde(default = "default_scylla_hosts")]
    pub scylla_hosts: Vec<String>,

    /// ScyllaDB keyspace name
    #[serde(default = "default_scylla_keyspace")]
    pub keyspace: String,

    #[serde(default = "default_replication_factor")]
    pub replication_factor: u8,

    /// Bound on each conversation write; exceeding it counts as a failure
    #[serde(default = "default_write_timeout_ms")]
    pub write_timeout_ms: u64,
}

fn default_scylla_hosts() -> Vec<String> {
    std::env::var(env::SCYLLA_HOSTS)
        .map(|s| s.split(',').map(|h| h.trim().to_string()).collect())
        .unwrap_or_else(|_| vec![persistence::DEFAULT_SCYLLA_HOST.to_string()])
}

fn default_scylla_keyspace() -> String {
    std::env::var(env::SCYLLA_KEYSPACE)
        .unwrap_or_else(|_| persistence::DEFAULT_KEYSPACE.to_string())
}

fn default_replication_factor() -> u8 {
    persistence::DEFAULT_REPLICATION_FACTOR
}

fn default_write_timeout_ms() -> u64 {
    persistence::DEFAULT_WRITE_TIMEOUT_MS
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            scylla_hosts: default_scylla_hosts(),
            keyspace: default_scylla_keyspace(),
            replication_factor: default_replication_factor(),
            write_timeout_ms: default_write_timeout_ms(),
        }
    }
}

/// Assistant configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AssistantConfig {
    /// YAML catalog; the built-in catalog is used when unset
    #[serde(default)]
    pub knowledge_base_path: Option<String>,

    /// YAML intent pattern table; the built-in table is used when unset
    #[serde(default)]
    pub intent_patterns_path: Option<String>,

    /// Seed for greeting/thanks/fallback template choice (random when unset)
    #[serde(default)]
    pub template_seed: Option<u64>,
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    observability::DEFAULT_LOG_LEVEL.to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_persistence()?;
        self.validate_observability()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        Ok(())
    }

    fn validate_persistence(&self) -> Result<(), ConfigError> {
        let p = &self.persistence;

        if p.write_timeout_ms == 0 || p.write_timeout_ms > persistence::MAX_WRITE_TIMEOUT_MS {
            return Err(ConfigError::InvalidValue {
                field: "persistence.write_timeout_ms".to_string(),
                message: format!(
                    "Must be between 1 and {}, got {}",
                    persistence::MAX_WRITE_TIMEOUT_MS,
                    p.write_timeout_ms
                ),
            });
        }

        if p.backend == StoreBackend::Scylla {
            if p.scylla_hosts.is_empty() {
                return Err(ConfigError::MissingField("persistence.scylla_hosts".to_string()));
            }
            let keyspace_ok = !p.keyspace.is_empty()
                && p.keyspace.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !keyspace_ok {
                return Err(ConfigError::InvalidValue {
                    field: "persistence.keyspace".to_string(),
                    message: format!("Invalid keyspace name: {:?}", p.keyspace),
                });
            }
            if p.replication_factor == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "persistence.replication_factor".to_string(),
                    message: "Replication factor must be at least 1".to_string(),
                });
            }
        }

        Ok(())
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        let level = self.observability.log_level.to_lowercase();
        if !LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!("Unknown log level: {}", self.observability.log_level),
            });
        }
        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority: env vars > config/{env}.* > config/default.* > defaults
pub fn load_settings(env_name: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env_name {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix(env::SETTINGS_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.persistence.backend, StoreBackend::Memory);
        assert_eq!(settings.persistence.write_timeout_ms, 2_000);
        assert!(settings.assistant.knowledge_base_path.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_port_zero_rejected() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_write_timeout_bounds() {
        let mut settings = Settings::default();
        settings.persistence.write_timeout_ms = 0;
        assert!(settings.validate().is_err());

        settings.persistence.write_timeout_ms = 120_000;
        assert!(settings.validate().is_err());

        settings.persistence.write_timeout_ms = 500;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_scylla_keyspace_validation() {
        let mut settings = Settings::default();
        settings.persistence.backend = StoreBackend::Scylla;
        settings.persistence.keyspace = "bad-name;drop".to_string();
        assert!(settings.validate().is_err());

        settings.persistence.keyspace = "terrenos_assistant".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_log_level_validation() {
        let mut settings = Settings::default();
        settings.observability.log_level = "loud".to_string();
        assert!(settings.validate().is_err());
        settings.observability.log_level = "DEBUG".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_settings_without_files_uses_defaults() {
        let settings = load_settings(Some("nonexistent-env")).unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
    }
}
