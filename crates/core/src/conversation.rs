//! Conversation log and lead records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Source tag for leads captured by the assistant
pub const DEFAULT_LEAD_SOURCE: &str = "chatbot";

/// One processed exchange, as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Store-assigned, monotonic
    pub id: i64,
    pub session_id: String,
    pub user_message: String,
    pub bot_response: String,
    /// Assigned at write time
    pub timestamp: DateTime<Utc>,
    pub origin_address: Option<String>,
    pub origin_page: Option<String>,
}

/// Turn data handed to the store; id and timestamp are assigned on append
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTurn {
    pub session_id: String,
    pub user_message: String,
    pub bot_response: String,
    pub origin_address: Option<String>,
    pub origin_page: Option<String>,
}

/// Lead lifecycle, mutated only by the admin side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Closed,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Closed => "closed",
        }
    }
}

/// A captured lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Store-assigned, increasing; orders leads but may repeat across processes
    pub id: i64,
    /// Random v4 key, unique across every writer of the store
    pub reference: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub property_interest: Option<String>,
    pub message: Option<String>,
    pub source: String,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
}

/// Lead data provided by the caller
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub property_interest: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Defaults to "chatbot"
    #[serde(default)]
    pub source: Option<String>,
}

impl NewLead {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn source_or_default(&self) -> &str {
        self.source.as_deref().unwrap_or(DEFAULT_LEAD_SOURCE)
    }

    /// Basic shape check; returns a description of the first problem found
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err("email is required".to_string());
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(format!("invalid email address: {}", email)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lead_defaults() {
        let lead = NewLead::new("Ana", "ana@example.com");
        assert_eq!(lead.source_or_default(), "chatbot");
        assert!(lead.validate().is_ok());
    }

    #[test]
    fn test_new_lead_validation() {
        assert!(NewLead::new("", "ana@example.com").validate().is_err());
        assert!(NewLead::new("Ana", "").validate().is_err());
        assert!(NewLead::new("Ana", "ana.example.com").validate().is_err());
        assert!(NewLead::new("Ana", "@example.com").validate().is_err());
    }

    #[test]
    fn test_lead_status_labels() {
        assert_eq!(LeadStatus::default().as_str(), "new");
        assert_eq!(LeadStatus::Qualified.as_str(), "qualified");
    }
}
