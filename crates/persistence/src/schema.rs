//! ScyllaDB schema creation
//!
//! Timestamps are stored as BIGINT milliseconds since the epoch.

use scylla::Session;

use crate::client::{qualified, LEADS_TABLE, TURNS_TABLE};
use crate::error::PersistenceError;

/// Create the keyspace if it doesn't exist
pub async fn create_keyspace(
    session: &Session,
    keyspace: &str,
    replication_factor: u8,
) -> Result<(), PersistenceError> {
    let query = format!(
        "CREATE KEYSPACE IF NOT EXISTS {} WITH replication = {{'class': 'SimpleStrategy', 'replication_factor': {}}}",
        keyspace, replication_factor
    );

    session
        .query_unpaged(query, &[])
        .await
        .map_err(|e| PersistenceError::SchemaError(format!("Failed to create keyspace: {}", e)))?;

    Ok(())
}

/// Create all required tables
pub async fn create_tables(session: &Session, keyspace: &str) -> Result<(), PersistenceError> {
    session
        .query_unpaged(turns_table_ddl(keyspace), &[])
        .await
        .map_err(|e| {
            PersistenceError::SchemaError(format!(
                "Failed to create conversation_turns table: {}",
                e
            ))
        })?;

    session
        .query_unpaged(leads_table_ddl(keyspace), &[])
        .await
        .map_err(|e| {
            PersistenceError::SchemaError(format!("Failed to create leads table: {}", e))
        })?;

    Ok(())
}

/// One partition per chat session, turns in recording order
///
/// `turn_id` orders rows; `turn_ref` keeps rows written by different
/// processes in the same microsecond apart.
fn turns_table_ddl(keyspace: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            session_id TEXT,
            turn_id BIGINT,
            turn_ref UUID,
            user_message TEXT,
            bot_response TEXT,
            created_at BIGINT,
            origin_address TEXT,
            origin_page TEXT,
            PRIMARY KEY ((session_id), turn_id, turn_ref)
        ) WITH CLUSTERING ORDER BY (turn_id ASC, turn_ref ASC)
    "#,
        qualified(keyspace, TURNS_TABLE)
    )
}

/// Leads keyed by their random reference; `lead_id` is only for ordering
fn leads_table_ddl(keyspace: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            lead_ref UUID,
            lead_id BIGINT,
            name TEXT,
            email TEXT,
            phone TEXT,
            property_interest TEXT,
            message TEXT,
            source TEXT,
            status TEXT,
            created_at BIGINT,
            PRIMARY KEY (lead_ref)
        )
    "#,
        qualified(keyspace, LEADS_TABLE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_rows_keyed_beyond_timestamp() {
        let ddl = turns_table_ddl("ks");
        assert!(ddl.contains("ks.conversation_turns"));
        assert!(ddl.contains("PRIMARY KEY ((session_id), turn_id, turn_ref)"));
        assert!(ddl.contains("CLUSTERING ORDER BY (turn_id ASC, turn_ref ASC)"));
    }

    #[test]
    fn test_leads_keyed_by_reference() {
        let ddl = leads_table_ddl("ks");
        assert!(ddl.contains("ks.leads"));
        assert!(ddl.contains("PRIMARY KEY (lead_ref)"));
    }
}
