//! ScyllaDB session handling for the conversation log

use std::sync::Arc;
use std::time::Duration;

use scylla::{Session, SessionBuilder};

use crate::error::PersistenceError;
use crate::schema;

/// Table holding one row per processed message
pub const TURNS_TABLE: &str = "conversation_turns";
/// Table holding captured leads
pub const LEADS_TABLE: &str = "leads";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the conversation keyspace lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScyllaConfig {
    /// `host:port` contact points
    pub hosts: Vec<String>,
    pub keyspace: String,
    pub replication_factor: u8,
}

impl Default for ScyllaConfig {
    fn default() -> Self {
        Self {
            hosts: vec!["127.0.0.1:9042".to_string()],
            keyspace: "terrenos_assistant".to_string(),
            replication_factor: 1,
        }
    }
}

/// Shared session bound to the conversation keyspace
#[derive(Clone)]
pub struct ScyllaClient {
    session: Arc<Session>,
    config: ScyllaConfig,
}

impl ScyllaClient {
    /// Open a session against the configured contact points
    pub async fn connect(config: ScyllaConfig) -> Result<Self, PersistenceError> {
        if config.hosts.iter().all(|h| h.trim().is_empty()) {
            return Err(PersistenceError::Connection(
                "no ScyllaDB contact points configured".to_string(),
            ));
        }

        tracing::info!(
            hosts = ?config.hosts,
            keyspace = %config.keyspace,
            "Opening conversation store session"
        );

        let session = SessionBuilder::new()
            .known_nodes(&config.hosts)
            .connection_timeout(CONNECT_TIMEOUT)
            .build()
            .await?;

        Ok(Self {
            session: Arc::new(session),
            config,
        })
    }

    /// Create the keyspace and both tables when missing
    pub async fn ensure_schema(&self) -> Result<(), PersistenceError> {
        let keyspace = &self.config.keyspace;
        schema::create_keyspace(&self.session, keyspace, self.config.replication_factor).await?;
        schema::create_tables(&self.session, keyspace).await?;
        tracing::info!(
            keyspace = %keyspace,
            tables = ?[TURNS_TABLE, LEADS_TABLE],
            "Conversation schema ready"
        );
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Keyspace-qualified table name
    pub fn table(&self, name: &str) -> String {
        qualified(&self.config.keyspace, name)
    }
}

pub(crate) fn qualified(keyspace: &str, table: &str) -> String {
    format!("{}.{}", keyspace, table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_table_names() {
        assert_eq!(
            qualified("terrenos_assistant", TURNS_TABLE),
            "terrenos_assistant.conversation_turns"
        );
        assert_eq!(qualified("ks", LEADS_TABLE), "ks.leads");
    }

    #[tokio::test]
    async fn test_connect_without_hosts() {
        let config = ScyllaConfig {
            hosts: vec![" ".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            ScyllaClient::connect(config).await,
            Err(PersistenceError::Connection(_))
        ));
    }
}
