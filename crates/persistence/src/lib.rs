//! Conversation persistence for the Terrenos assistant
//!
//! Provides append-only storage for:
//! - Conversation turns (one per processed message, grouped by session)
//! - Leads captured from the chat widget or contact form
//!
//! Two backends implement [`ConversationStore`]: an in-memory store for
//! development and tests, and ScyllaDB for production. The assistant writes
//! through [`ConversationLog`], which bounds every write with a timeout and
//! never lets a failed turn write reach the visitor.

pub mod client;
pub mod error;
pub mod log;
pub mod memory;
pub mod schema;
pub mod scylla_store;
pub mod store;

pub use client::{ScyllaClient, ScyllaConfig};
pub use error::PersistenceError;
pub use log::ConversationLog;
pub use memory::InMemoryConversationStore;
pub use scylla_store::ScyllaConversationStore;
pub use store::ConversationStore;

/// Connect to ScyllaDB, ensure the schema and return the store
pub async fn init(config: ScyllaConfig) -> Result<ScyllaConversationStore, PersistenceError> {
    let client = ScyllaClient::connect(config).await?;
    client.ensure_schema().await?;
    Ok(ScyllaConversationStore::new(client))
}
