//! Chat assistant
//!
//! Wires the text pipeline, the responder and the conversation log together.
//! Processing a message is synchronous CPU work followed by one bounded,
//! best-effort write.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use terrenos_config::constants::persistence::DEFAULT_WRITE_TIMEOUT_MS;
use terrenos_config::{
    resolve_knowledge_base, IntentPatternsConfig, PersistenceConfig, Settings, StoreBackend,
};
use terrenos_core::{ConversationTurn, IntentLabel, KnowledgeBase, Lead, NewLead};
use terrenos_persistence::{
    ConversationLog, ConversationStore, InMemoryConversationStore, PersistenceError, ScyllaConfig,
};
use terrenos_text_processing::{Analysis, EntityExtractor, IntentClassifier, TextAnalyzer};

use crate::responder::{
    quick_replies, welcome_message, QuickReply, RandomSelector, ResponseSynthesizer,
    SeededSelector, TemplateSelector,
};
use crate::AgentError;

/// Metric names emitted by the assistant
pub mod metric_names {
    pub const MESSAGES: &str = "terrenos_messages_total";
    pub const PIPELINE_LATENCY: &str = "terrenos_pipeline_duration_seconds";
}

/// One inbound chat message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub text: String,
    /// Absent for the first message of a conversation
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub origin_address: Option<String>,
    #[serde(default)]
    pub origin_page: Option<String>,
}

impl IncomingMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Reply to one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantReply {
    /// Given or freshly assigned; the caller continues the session with it
    pub session_id: String,
    pub intent: IntentLabel,
    pub response: String,
}

/// Pipeline output before anything is persisted
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyDraft {
    pub analysis: Analysis,
    pub response: String,
}

impl ReplyDraft {
    pub fn intent(&self) -> IntentLabel {
        self.analysis.classification.intent
    }
}

/// Opening content for the chat widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Welcome {
    pub message: &'static str,
    pub quick_replies: Vec<QuickReply>,
}

/// Rule-based chat assistant
#[derive(Clone)]
pub struct ChatAssistant {
    analyzer: Arc<TextAnalyzer>,
    synthesizer: ResponseSynthesizer,
    log: ConversationLog,
}

impl ChatAssistant {
    pub fn new(
        analyzer: TextAnalyzer,
        synthesizer: ResponseSynthesizer,
        log: ConversationLog,
    ) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            synthesizer,
            log,
        }
    }

    /// Default pipeline and random templates over the given catalog and store
    pub fn with_store(kb: Arc<KnowledgeBase>, store: Arc<dyn ConversationStore>) -> Self {
        let write_timeout = Duration::from_millis(DEFAULT_WRITE_TIMEOUT_MS);
        Self::new(
            TextAnalyzer::builtin(),
            ResponseSynthesizer::with_random_templates(kb),
            ConversationLog::new(store, write_timeout),
        )
    }

    /// Built-in catalog and an in-memory store
    pub fn in_memory() -> Self {
        Self::with_store(
            Arc::new(KnowledgeBase::builtin()),
            Arc::new(InMemoryConversationStore::new()),
        )
    }

    /// Build everything the settings describe
    ///
    /// Fails on an unreadable or invalid knowledge base or pattern table, or
    /// when the configured store cannot be reached.
    pub async fn from_settings(settings: &Settings) -> Result<Self, AgentError> {
        let assistant = &settings.assistant;

        let kb = Arc::new(resolve_knowledge_base(assistant.knowledge_base_path.as_deref())?);

        let classifier = match assistant.intent_patterns_path.as_deref() {
            Some(path) => IntentClassifier::new(IntentPatternsConfig::load(path)?.entries())?,
            None => IntentClassifier::builtin(),
        };
        let analyzer = TextAnalyzer::new(classifier, EntityExtractor::new());

        let selector: Arc<dyn TemplateSelector> = match assistant.template_seed {
            Some(seed) => Arc::new(SeededSelector::new(seed)),
            None => Arc::new(RandomSelector),
        };
        let synthesizer = ResponseSynthesizer::new(kb, selector);

        let store = open_store(&settings.persistence).await?;
        let log = ConversationLog::new(
            store,
            Duration::from_millis(settings.persistence.write_timeout_ms),
        );

        tracing::info!(
            backend = log.backend_name(),
            intents = analyzer.classifier().intents().count(),
            seeded = assistant.template_seed.is_some(),
            "Chat assistant ready"
        );

        Ok(Self::new(analyzer, synthesizer, log))
    }

    /// Run the pipeline without persisting anything
    pub fn reply(&self, text: &str) -> ReplyDraft {
        let analysis = self.analyzer.analyze(text);
        let mut response = self.synthesizer.respond(
            analysis.classification.intent,
            &analysis.entities,
            &analysis.normalized,
        );
        if response.trim().is_empty() {
            response = self.synthesizer.default_response();
        }
        ReplyDraft { analysis, response }
    }

    /// Answer a message and record the exchange
    ///
    /// Never fails: a store error only shows up in logs and metrics.
    pub async fn process_message(&self, message: IncomingMessage) -> AssistantReply {
        let started = Instant::now();

        let session_id = match message.session_id.filter(|s| !s.trim().is_empty()) {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().to_string();
                tracing::debug!(session_id = %id, "Assigned new session id");
                id
            }
        };

        let draft = self.reply(&message.text);
        let intent = draft.intent();

        metrics::counter!(metric_names::MESSAGES, "intent" => intent.as_str()).increment(1);
        metrics::histogram!(metric_names::PIPELINE_LATENCY)
            .record(started.elapsed().as_secs_f64());

        tracing::info!(
            session_id = %session_id,
            intent = %intent,
            matches = draft.analysis.classification.match_count,
            "Processed chat message"
        );

        self.log
            .record_turn(
                &session_id,
                &message.text,
                &draft.response,
                message.origin_address.as_deref(),
                message.origin_page.as_deref(),
            )
            .await;

        AssistantReply {
            session_id,
            intent,
            response: draft.response,
        }
    }

    pub async fn record_lead(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        property_interest: Option<&str>,
        message: Option<&str>,
    ) -> Result<Lead, PersistenceError> {
        self.log
            .record_lead(name, email, phone, property_interest, message)
            .await
    }

    pub async fn capture_lead(&self, lead: NewLead) -> Result<Lead, PersistenceError> {
        self.log.capture_lead(lead).await
    }

    pub async fn history(&self, session_id: &str) -> Vec<ConversationTurn> {
        self.log.get_history(session_id).await
    }

    pub fn welcome(&self) -> Welcome {
        Welcome {
            message: welcome_message(),
            quick_replies: quick_replies(),
        }
    }

    pub fn knowledge_base(&self) -> &Arc<KnowledgeBase> {
        self.synthesizer.knowledge_base()
    }

    pub fn backend_name(&self) -> &'static str {
        self.log.backend_name()
    }
}

async fn open_store(config: &PersistenceConfig) -> Result<Arc<dyn ConversationStore>, AgentError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory conversation store; turns are lost on restart");
            Ok(Arc::new(InMemoryConversationStore::new()))
        }
        StoreBackend::Scylla => {
            let store = terrenos_persistence::init(ScyllaConfig {
                hosts: config.scylla_hosts.clone(),
                keyspace: config.keyspace.clone(),
                replication_factor: config.replication_factor,
            })
            .await?;
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::FixedSelector;

    fn assistant_with(store: Arc<InMemoryConversationStore>) -> ChatAssistant {
        ChatAssistant::new(
            TextAnalyzer::builtin(),
            ResponseSynthesizer::new(
                Arc::new(KnowledgeBase::builtin()),
                Arc::new(FixedSelector(0)),
            ),
            ConversationLog::new(store, Duration::from_millis(500)),
        )
    }

    #[test]
    fn test_reply_is_pure() {
        let assistant = ChatAssistant::in_memory();
        let draft = assistant.reply("Busco un terreno de 500 m²");
        assert_eq!(draft.intent(), IntentLabel::PropertyInquiry);
        assert_eq!(draft.analysis.entities.desired_area, Some(500));
        assert!(!draft.response.is_empty());
    }

    #[tokio::test]
    async fn test_session_id_assigned_when_missing() {
        let store = Arc::new(InMemoryConversationStore::new());
        let assistant = assistant_with(store.clone());

        let reply = assistant.process_message(IncomingMessage::new("hola")).await;
        assert!(Uuid::parse_str(&reply.session_id).is_ok());
        assert_eq!(reply.intent, IntentLabel::Greeting);

        let blank = assistant
            .process_message(IncomingMessage::new("hola").with_session("  "))
            .await;
        assert_ne!(blank.session_id.trim(), "");
        assert_eq!(store.session_count(), 2);
    }

    #[tokio::test]
    async fn test_session_id_kept() {
        let store = Arc::new(InMemoryConversationStore::new());
        let assistant = assistant_with(store);

        let reply = assistant
            .process_message(IncomingMessage::new("gracias").with_session("abc"))
            .await;
        assert_eq!(reply.session_id, "abc");
        assert_eq!(assistant.history("abc").await.len(), 1);
    }

    #[tokio::test]
    async fn test_origin_metadata_recorded() {
        let store = Arc::new(InMemoryConversationStore::new());
        let assistant = assistant_with(store);

        let message = IncomingMessage {
            text: "¿Dónde están ubicados?".to_string(),
            session_id: Some("s".to_string()),
            origin_address: Some("203.0.113.7".to_string()),
            origin_page: Some("https://terrenospremium.com/".to_string()),
        };
        assistant.process_message(message).await;

        let history = assistant.history("s").await;
        assert_eq!(history[0].user_message, "¿Dónde están ubicados?");
        assert_eq!(history[0].origin_address.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_welcome() {
        let welcome = ChatAssistant::in_memory().welcome();
        assert!(!welcome.message.is_empty());
        assert_eq!(welcome.quick_replies.len(), 4);
    }

    #[tokio::test]
    async fn test_from_default_settings() {
        let assistant = ChatAssistant::from_settings(&Settings::default()).await.unwrap();
        assert_eq!(assistant.backend_name(), "memory");
        assert_eq!(assistant.knowledge_base().properties.len(), 4);
    }

    #[tokio::test]
    async fn test_from_settings_bad_catalog_path() {
        let mut settings = Settings::default();
        settings.assistant.knowledge_base_path = Some("/nonexistent/kb.yaml".to_string());
        assert!(matches!(
            ChatAssistant::from_settings(&settings).await,
            Err(AgentError::Config(_))
        ));
    }
}
