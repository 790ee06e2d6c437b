//! Error types for the grievance portal.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Stored content under `key` could not be parsed. Never treated
    /// as "no data".
    #[error("Corrupted collection '{key}': {reason}")]
    Corrupted { key: String, reason: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Export failed: {0}")]
    Export(String),
}

pub type PortalResult<T> = Result<T, PortalError>;
