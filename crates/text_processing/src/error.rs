//! Text processing errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextProcessingError {
    #[error("Invalid pattern for {intent}: {pattern:?}: {message}")]
    InvalidPattern {
        intent: String,
        pattern: String,
        message: String,
    },

    #[error("Empty pattern table")]
    EmptyTable,
}

pub type Result<T> = std::result::Result<T, TextProcessingError>;
