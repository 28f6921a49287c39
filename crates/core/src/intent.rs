//! Intent labels and extracted entities

use serde::{Deserialize, Serialize};

use crate::catalog::PropertyCategory;

/// Closed set of intents the assistant recognises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntentLabel {
    PropertyInquiry,
    PriceInquiry,
    LocationInquiry,
    VisitRequest,
    FinancingInquiry,
    ContactRequest,
    ServicesInquiry,
    Greeting,
    Thanks,
    /// Nothing matched
    #[default]
    General,
}

impl IntentLabel {
    /// Pattern-table order; `General` has no patterns and is not listed
    pub const MATCHABLE: [IntentLabel; 9] = [
        IntentLabel::PropertyInquiry,
        IntentLabel::PriceInquiry,
        IntentLabel::LocationInquiry,
        IntentLabel::VisitRequest,
        IntentLabel::FinancingInquiry,
        IntentLabel::ContactRequest,
        IntentLabel::ServicesInquiry,
        IntentLabel::Greeting,
        IntentLabel::Thanks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PropertyInquiry => "property_inquiry",
            Self::PriceInquiry => "price_inquiry",
            Self::LocationInquiry => "location_inquiry",
            Self::VisitRequest => "visit_request",
            Self::FinancingInquiry => "financing_inquiry",
            Self::ContactRequest => "contact_request",
            Self::ServicesInquiry => "services_inquiry",
            Self::Greeting => "greeting",
            Self::Thanks => "thanks",
            Self::General => "general",
        }
    }

    /// Parse a label; unknown labels yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "property_inquiry" => Some(Self::PropertyInquiry),
            "price_inquiry" => Some(Self::PriceInquiry),
            "location_inquiry" => Some(Self::LocationInquiry),
            "visit_request" => Some(Self::VisitRequest),
            "financing_inquiry" => Some(Self::FinancingInquiry),
            "contact_request" => Some(Self::ContactRequest),
            "services_inquiry" => Some(Self::ServicesInquiry),
            "greeting" => Some(Self::Greeting),
            "thanks" => Some(Self::Thanks),
            "general" => Some(Self::General),
            _ => None,
        }
    }
}

impl std::fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price tier mentioned by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceRange {
    Low,
    Medium,
    High,
}

/// Entities pulled out of a message; every key is independent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    /// Square meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_area: Option<u64>,
}

impl Entities {
    pub fn is_empty(&self) -> bool {
        self.property_type.is_none() && self.price_range.is_none() && self.desired_area.is_none()
    }

    /// Number of populated keys
    pub fn len(&self) -> usize {
        self.property_type.is_some() as usize
            + self.price_range.is_some() as usize
            + self.desired_area.is_some() as usize
    }
}
