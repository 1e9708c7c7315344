//! Validation Error Types

use thiserror::Error;

/// Errors raised while turning an ingest payload into a report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Missing required field
    #[error("missing parameter [{0}]")]
    MissingField(&'static str),

    /// Body could not be decoded into a payload
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl ValidationError {
    /// Name of the missing field, if this is a missing-field error
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingField(name) => Some(*name),
            ValidationError::InvalidPayload(_) => None,
        }
    }
}
