//! Centralized defaults for the assistant
//!
//! Single source of truth for default values referenced by settings and by the
//! crates that fall back to them.

/// HTTP server defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
    /// Origin allowed when CORS is enabled but nothing is configured
    pub const FALLBACK_CORS_ORIGIN: &str = "http://localhost:3000";
}

/// Conversation store defaults
pub mod persistence {
    /// Upper bound on a single conversation write
    pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 2_000;
    pub const MAX_WRITE_TIMEOUT_MS: u64 = 60_000;
    pub const DEFAULT_SCYLLA_HOST: &str = "127.0.0.1:9042";
    pub const DEFAULT_KEYSPACE: &str = "terrenos_assistant";
    pub const DEFAULT_REPLICATION_FACTOR: u8 = 1;
}

/// Logging defaults
pub mod observability {
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}

/// Environment variable names
pub mod env {
    /// Prefix for settings overrides, e.g. `TERRENOS__SERVER__PORT`
    pub const SETTINGS_PREFIX: &str = "TERRENOS";
    /// Selects `config/{env}.*`
    pub const ENVIRONMENT: &str = "TERRENOS_ENV";
    pub const SCYLLA_HOSTS: &str = "SCYLLA_HOSTS";
    pub const SCYLLA_KEYSPACE: &str = "SCYLLA_KEYSPACE";
}
