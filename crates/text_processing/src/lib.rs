//! Text processing for the Terrenos assistant
//!
//! This crate turns a raw chat message into something the responder can act on:
//! - **Normalization**: whitespace collapsing and Unicode lowercasing
//! - **Intent classification**: an ordered regex table, last match wins
//! - **Entity extraction**: property category, price tier and desired area
//!
//! # Example
//!
//! ```
//! use terrenos_text_processing::TextAnalyzer;
//! use terrenos_core::{IntentLabel, PropertyCategory};
//!
//! let analyzer = TextAnalyzer::builtin();
//! let analysis = analyzer.analyze("  Busco un TERRENO comercial ");
//!
//! assert_eq!(analysis.normalized, "busco un terreno comercial");
//! assert_eq!(analysis.classification.intent, IntentLabel::PropertyInquiry);
//! assert_eq!(analysis.entities.property_type, Some(PropertyCategory::Commercial));
//! ```

pub mod entities;
pub mod intent;
pub mod normalizer;

mod error;
mod pipeline;

pub use error::{Result, TextProcessingError};
pub use pipeline::{Analysis, TextAnalyzer};

pub use entities::EntityExtractor;
pub use intent::{Classification, IntentClassifier, DEFAULT_INTENT_PATTERNS};
pub use normalizer::normalize;
