//! Best-effort conversation log
//!
//! The facade the assistant writes through. Turn writes never fail the
//! caller: errors and timeouts are logged and counted, then dropped. Lead
//! capture reports failure, since the caller has to tell the visitor.

use std::sync::Arc;
use std::time::Duration;

use terrenos_core::{ConversationTurn, Lead, NewLead, NewTurn};

use crate::{ConversationStore, PersistenceError};

/// Metric names emitted by the log
pub mod metric_names {
    pub const PERSISTENCE_FAILURES: &str = "terrenos_persistence_failures_total";
    pub const LEADS_CAPTURED: &str = "terrenos_leads_captured_total";
}

#[derive(Clone)]
pub struct ConversationLog {
    store: Arc<dyn ConversationStore>,
    /// Bound on every store call, reads included
    store_timeout: Duration,
}

impl ConversationLog {
    pub fn new(store: Arc<dyn ConversationStore>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Append one exchange; failures are logged and swallowed
    pub async fn record_turn(
        &self,
        session_id: &str,
        user_message: &str,
        bot_response: &str,
        origin_address: Option<&str>,
        origin_page: Option<&str>,
    ) {
        let turn = NewTurn {
            session_id: session_id.to_string(),
            user_message: user_message.to_string(),
            bot_response: bot_response.to_string(),
            origin_address: origin_address.map(str::to_string),
            origin_page: origin_page.map(str::to_string),
        };

        match self.bounded(self.store.append_turn(turn)).await {
            Ok(stored) => {
                tracing::debug!(session_id = %session_id, turn_id = stored.id, "Turn recorded");
            }
            Err(e) => {
                metrics::counter!(metric_names::PERSISTENCE_FAILURES, "operation" => "record_turn")
                    .increment(1);
                tracing::warn!(
                    session_id = %session_id,
                    backend = self.store.backend_name(),
                    error = %e,
                    "Failed to record conversation turn"
                );
            }
        }
    }

    /// Validate and store a lead
    pub async fn record_lead(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        property_interest: Option<&str>,
        message: Option<&str>,
    ) -> Result<Lead, PersistenceError> {
        let lead = NewLead {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: non_blank(phone),
            property_interest: non_blank(property_interest),
            message: non_blank(message),
            source: None,
        };
        self.capture_lead(lead).await
    }

    /// Store a prepared lead, keeping its source
    pub async fn capture_lead(&self, lead: NewLead) -> Result<Lead, PersistenceError> {
        lead.validate().map_err(PersistenceError::InvalidData)?;

        match self.bounded(self.store.append_lead(lead)).await {
            Ok(stored) => {
                metrics::counter!(metric_names::LEADS_CAPTURED, "source" => stored.source.clone())
                    .increment(1);
                tracing::info!(lead_id = stored.id, source = %stored.source, "Lead captured");
                Ok(stored)
            }
            Err(e) => {
                metrics::counter!(metric_names::PERSISTENCE_FAILURES, "operation" => "record_lead")
                    .increment(1);
                tracing::error!(
                    backend = self.store.backend_name(),
                    error = %e,
                    "Failed to record lead"
                );
                Err(e)
            }
        }
    }

    /// Turns of a session, oldest first
    ///
    /// Empty when there are none, or when the read fails or outlives the
    /// store timeout.
    pub async fn get_history(&self, session_id: &str) -> Vec<ConversationTurn> {
        match self.bounded(self.store.history(session_id)).await {
            Ok(turns) => turns,
            Err(e) => {
                metrics::counter!(metric_names::PERSISTENCE_FAILURES, "operation" => "get_history")
                    .increment(1);
                tracing::warn!(session_id = %session_id, error = %e, "Failed to read history");
                Vec::new()
            }
        }
    }

    async fn bounded<T>(
        &self,
        op: impl std::future::Future<Output = Result<T, PersistenceError>>,
    ) -> Result<T, PersistenceError> {
        match tokio::time::timeout(self.store_timeout, op).await {
            Ok(result) => result,
            Err(_) => Err(PersistenceError::Timeout(
                self.store_timeout.as_millis() as u64
            )),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryConversationStore;
    use async_trait::async_trait;

    struct FailingStore;

    #[async_trait]
    impl ConversationStore for FailingStore {
        async fn append_turn(&self, _turn: NewTurn) -> Result<ConversationTurn, PersistenceError> {
            Err(PersistenceError::Query("disk full".to_string()))
        }

        async fn append_lead(&self, _lead: NewLead) -> Result<Lead, PersistenceError> {
            Err(PersistenceError::Query("disk full".to_string()))
        }

        async fn history(
            &self,
            _session_id: &str,
        ) -> Result<Vec<ConversationTurn>, PersistenceError> {
            Err(PersistenceError::Query("disk full".to_string()))
        }

        fn backend_name(&self) -> &'static str {
            "failing"
        }
    }

    struct StalledStore;

    #[async_trait]
    impl ConversationStore for StalledStore {
        async fn append_turn(&self, _turn: NewTurn) -> Result<ConversationTurn, PersistenceError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(PersistenceError::Query("unreachable".to_string()))
        }

        async fn append_lead(&self, _lead: NewLead) -> Result<Lead, PersistenceError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(PersistenceError::Query("unreachable".to_string()))
        }

        async fn history(
            &self,
            _session_id: &str,
        ) -> Result<Vec<ConversationTurn>, PersistenceError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(PersistenceError::Query("unreachable".to_string()))
        }

        fn backend_name(&self) -> &'static str {
            "stalled"
        }
    }

    fn memory_log() -> ConversationLog {
        ConversationLog::new(
            Arc::new(InMemoryConversationStore::new()),
            Duration::from_millis(500),
        )
    }

    #[tokio::test]
    async fn test_record_then_history() {
        let log = memory_log();
        log.record_turn("s1", "Hola", "¡Hola!", Some("10.0.0.1"), Some("/terrenos"))
            .await;
        log.record_turn("s1", "precio", "Precios...", None, None).await;

        let history = log.get_history("s1").await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].user_message, "Hola");
        assert_eq!(history[0].bot_response, "¡Hola!");
        assert_eq!(history[0].origin_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(history[0].origin_page.as_deref(), Some("/terrenos"));
        assert_eq!(history[1].user_message, "precio");
        assert!(log.get_history("other").await.is_empty());
    }

    #[tokio::test]
    async fn test_failing_store_is_swallowed() {
        let log = ConversationLog::new(Arc::new(FailingStore), Duration::from_millis(500));
        log.record_turn("s1", "hola", "hola", None, None).await;
        assert!(log.get_history("s1").await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_write_times_out() {
        let log = ConversationLog::new(Arc::new(StalledStore), Duration::from_millis(50));
        log.record_turn("s1", "hola", "hola", None, None).await;

        let err = log.record_lead("Ana", "ana@example.com", None, None, None).await;
        assert!(matches!(err, Err(PersistenceError::Timeout(50))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_history_read_is_empty() {
        let log = ConversationLog::new(Arc::new(StalledStore), Duration::from_millis(50));
        let started = tokio::time::Instant::now();

        assert!(log.get_history("s1").await.is_empty());
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_record_lead() {
        let log = memory_log();
        let lead = log
            .record_lead(
                " Ana López ",
                "ana@example.com",
                Some("555-1234"),
                Some("terreno1"),
                Some("  "),
            )
            .await
            .unwrap();
        assert_eq!(lead.name, "Ana López");
        assert_eq!(lead.phone.as_deref(), Some("555-1234"));
        assert_eq!(lead.message, None);
        assert_eq!(lead.source, "chatbot");
    }

    #[tokio::test]
    async fn test_invalid_lead_rejected_before_store() {
        let log = ConversationLog::new(Arc::new(FailingStore), Duration::from_millis(500));
        let err = log.record_lead("", "ana@example.com", None, None, None).await;
        assert!(matches!(err, Err(PersistenceError::InvalidData(_))));

        let err = log.record_lead("Ana", "no-at-sign", None, None, None).await;
        assert!(matches!(err, Err(PersistenceError::InvalidData(_))));

        // valid input reaches the store and its failure is reported
        let err = log.record_lead("Ana", "ana@example.com", None, None, None).await;
        assert!(matches!(err, Err(PersistenceError::Query(_))));
    }

    #[tokio::test]
    async fn test_capture_lead_keeps_source() {
        let log = memory_log();
        let mut lead = NewLead::new("Luis", "luis@example.com");
        lead.source = Some("website".to_string());
        let stored = log.capture_lead(lead).await.unwrap();
        assert_eq!(stored.source, "website");
    }
}
