//! In-memory conversation store
//!
//! Used for development and tests. Contents are lost on restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use terrenos_core::{ConversationTurn, Lead, LeadStatus, NewLead, NewTurn};

use crate::{ConversationStore, PersistenceError};

/// Store backed by process memory
#[derive(Debug)]
pub struct InMemoryConversationStore {
    turns: RwLock<HashMap<String, Vec<ConversationTurn>>>,
    leads: RwLock<Vec<Lead>>,
    next_turn_id: AtomicI64,
    next_lead_id: AtomicI64,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self {
            turns: RwLock::new(HashMap::new()),
            leads: RwLock::new(Vec::new()),
            next_turn_id: AtomicI64::new(1),
            next_lead_id: AtomicI64::new(1),
        }
    }

    /// Total turns across all sessions
    pub fn turn_count(&self) -> usize {
        self.turns.read().values().map(Vec::len).sum()
    }

    pub fn session_count(&self) -> usize {
        self.turns.read().len()
    }

    /// Snapshot of captured leads, oldest first
    pub fn leads(&self) -> Vec<Lead> {
        self.leads.read().clone()
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn append_turn(&self, turn: NewTurn) -> Result<ConversationTurn, PersistenceError> {
        let mut turns = self.turns.write();
        // id is taken under the write lock so per-session order matches id order
        let stored = ConversationTurn {
            id: self.next_turn_id.fetch_add(1, Ordering::SeqCst),
            session_id: turn.session_id,
            user_message: turn.user_message,
            bot_response: turn.bot_response,
            timestamp: Utc::now(),
            origin_address: turn.origin_address,
            origin_page: turn.origin_page,
        };
        turns
            .entry(stored.session_id.clone())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn append_lead(&self, lead: NewLead) -> Result<Lead, PersistenceError> {
        let mut leads = self.leads.write();
        let stored = Lead {
            id: self.next_lead_id.fetch_add(1, Ordering::SeqCst),
            reference: Uuid::new_v4(),
            source: lead.source_or_default().to_string(),
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            property_interest: lead.property_interest,
            message: lead.message,
            status: LeadStatus::New,
            created_at: Utc::now(),
        };
        leads.push(stored.clone());
        Ok(stored)
    }

    async fn history(&self, session_id: &str) -> Result<Vec<ConversationTurn>, PersistenceError> {
        Ok(self
            .turns
            .read()
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
