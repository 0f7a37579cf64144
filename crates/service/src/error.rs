//! Typed error enum for the service layer.
//!
//! Unifies storage, validation and parameter failures into a single error type,
//! so handlers can map each failure mode to a status code without downcasting.

use crimestat_core::{CoreError, ValidationErrors};
use crimestat_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying storage, validation and request failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, duplicate, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Candidate record rejected by field or cross-field rules.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Caller provided missing or malformed parameters.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A named state or record id has no data.
    #[error("not found: {0}")]
    NotFound(String),

    /// Import payload could not be decoded.
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Storage(StorageError::NotFound { .. }))
    }

    /// Whether this error came from a rejected candidate record.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
