//! Conversation store abstraction

use async_trait::async_trait;

use terrenos_core::{ConversationTurn, Lead, NewLead, NewTurn};

use crate::PersistenceError;

/// Append-only storage for conversation turns and leads
///
/// Implementations assign ids and timestamps. Ids are monotonic, so turns of
/// one session come back from [`history`](Self::history) in the order they
/// were appended.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn append_turn(&self, turn: NewTurn) -> Result<ConversationTurn, PersistenceError>;

    async fn append_lead(&self, lead: NewLead) -> Result<Lead, PersistenceError>;

    /// Turns of one session, oldest first
    async fn history(&self, session_id: &str) -> Result<Vec<ConversationTurn>, PersistenceError>;

    /// Short backend name for logs and readiness checks
    fn backend_name(&self) -> &'static str;
}
