//! Terrenos chat assistant
//!
//! Features:
//! - Keyword intent classification and entity extraction (via text_processing)
//! - Templated Spanish replies rendered from the knowledge base
//! - Best-effort conversation logging and lead capture (via persistence)
//! - Chat widget content: welcome message and quick replies

pub mod assistant;
pub mod responder;

pub use assistant::{AssistantReply, ChatAssistant, IncomingMessage, ReplyDraft, Welcome};
pub use responder::{
    quick_replies, welcome_message, FixedSelector, QuickReply, RandomSelector,
    ResponseSynthesizer, SeededSelector, TemplateSelector,
};

use thiserror::Error;

/// Assistant construction errors
///
/// Message processing itself never fails; these only come out of
/// [`ChatAssistant::from_settings`].
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(#[from] terrenos_config::ConfigError),

    #[error("Intent table error: {0}")]
    Intent(#[from] terrenos_text_processing::TextProcessingError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] terrenos_persistence::PersistenceError),
}
