//! Core types for the Terrenos property assistant
//!
//! This crate provides the domain types shared by every other crate:
//! - Property catalog and knowledge base
//! - Intent labels and extracted entities
//! - Conversation turns and leads

pub mod catalog;
pub mod conversation;
pub mod intent;
pub mod knowledge;

pub use catalog::{Availability, Coordinates, Property, PropertyCategory};
pub use conversation::{
    ConversationTurn, Lead, LeadStatus, NewLead, NewTurn, DEFAULT_LEAD_SOURCE,
};
pub use intent::{Entities, IntentLabel, PriceRange};
pub use knowledge::{CompanyInfo, FinancingTerms, KnowledgeBase, ServiceOffering};
