//! Conversation persistence using ScyllaDB
//!
//! Several server processes may share one keyspace. Row keys therefore carry
//! a random v4 uuid (`turn_ref`, `lead_ref`); the microsecond ids only order
//! rows and are not unique across processes.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use terrenos_core::{ConversationTurn, Lead, LeadStatus, NewLead, NewTurn};

use crate::client::{LEADS_TABLE, TURNS_TABLE};
use crate::{ConversationStore, PersistenceError, ScyllaClient};

/// Monotonic id source
///
/// Ids are microsecond timestamps bumped past the last issued value, so they
/// keep increasing within a process.
#[derive(Debug)]
struct IdSequence {
    last: AtomicI64,
}

impl IdSequence {
    fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    fn next(&self) -> i64 {
        let now = Utc::now().timestamp_micros();
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        now.max(prev + 1)
    }
}

/// ScyllaDB implementation of the conversation store
pub struct ScyllaConversationStore {
    client: ScyllaClient,
    ids: IdSequence,
}

impl ScyllaConversationStore {
    pub fn new(client: ScyllaClient) -> Self {
        Self {
            client,
            ids: IdSequence::new(),
        }
    }
}

#[async_trait]
impl ConversationStore for ScyllaConversationStore {
    async fn append_turn(&self, turn: NewTurn) -> Result<ConversationTurn, PersistenceError> {
        let query = format!(
            "INSERT INTO {} (
                session_id, turn_id, turn_ref, user_message, bot_response,
                created_at, origin_address, origin_page
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            self.client.table(TURNS_TABLE)
        );

        let id = self.ids.next();
        let timestamp = Utc::now();

        self.client
            .session()
            .query_unpaged(
                query,
                (
                    &turn.session_id,
                    id,
                    Uuid::new_v4(),
                    &turn.user_message,
                    &turn.bot_response,
                    timestamp.timestamp_millis(),
                    &turn.origin_address,
                    &turn.origin_page,
                ),
            )
            .await?;

        tracing::debug!(
            session_id = %turn.session_id,
            turn_id = id,
            "Conversation turn stored in ScyllaDB"
        );

        Ok(ConversationTurn {
            id,
            session_id: turn.session_id,
            user_message: turn.user_message,
            bot_response: turn.bot_response,
            timestamp,
            origin_address: turn.origin_address,
            origin_page: turn.origin_page,
        })
    }

    async fn append_lead(&self, lead: NewLead) -> Result<Lead, PersistenceError> {
        let query = format!(
            "INSERT INTO {} (
                lead_ref, lead_id, name, email, phone, property_interest,
                message, source, status, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            self.client.table(LEADS_TABLE)
        );

        let stored = new_lead(self.ids.next(), lead);

        self.client
            .session()
            .query_unpaged(
                query,
                (
                    stored.reference,
                    stored.id,
                    &stored.name,
                    &stored.email,
                    &stored.phone,
                    &stored.property_interest,
                    &stored.message,
                    &stored.source,
                    stored.status.as_str(),
                    stored.created_at.timestamp_millis(),
                ),
            )
            .await?;

        tracing::info!(
            lead_id = stored.id,
            reference = %stored.reference,
            source = %stored.source,
            "Lead stored in ScyllaDB"
        );

        Ok(stored)
    }

    async fn history(&self, session_id: &str) -> Result<Vec<ConversationTurn>, PersistenceError> {
        let query = format!(
            "SELECT turn_id, session_id, user_message, bot_response,
                    created_at, origin_address, origin_page
             FROM {} WHERE session_id = ?",
            self.client.table(TURNS_TABLE)
        );

        let result = self
            .client
            .session()
            .query_unpaged(query, (session_id,))
            .await?;

        let mut turns = Vec::new();
        if let Some(rows) = result.rows {
            for row in rows {
                turns.push(row_to_turn(row)?);
            }
        }

        Ok(turns)
    }

    fn backend_name(&self) -> &'static str {
        "scylla"
    }
}

fn new_lead(id: i64, lead: NewLead) -> Lead {
    Lead {
        id,
        reference: Uuid::new_v4(),
        source: lead.source_or_default().to_string(),
        name: lead.name,
        email: lead.email,
        phone: lead.phone,
        property_interest: lead.property_interest,
        message: lead.message,
        status: LeadStatus::New,
        created_at: Utc::now(),
    }
}

fn row_to_turn(
    row: scylla::frame::response::result::Row,
) -> Result<ConversationTurn, PersistenceError> {
    let (id, session_id, user_message, bot_response, created_at, origin_address, origin_page): (
        i64,
        String,
        String,
        String,
        i64,
        Option<String>,
        Option<String>,
    ) = row
        .into_typed()
        .map_err(|e| PersistenceError::InvalidData(e.to_string()))?;

    let timestamp = DateTime::from_timestamp_millis(created_at).ok_or_else(|| {
        PersistenceError::InvalidData(format!("timestamp out of range: {}", created_at))
    })?;

    Ok(ConversationTurn {
        id,
        session_id,
        user_message,
        bot_response,
        timestamp,
        origin_address,
        origin_page,
    })
}
