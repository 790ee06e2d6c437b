//! Database-specific error types and conversions.

use grievance_core::error::PortalError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// The stored payload does not parse as the expected collection.
    #[error("Collection '{key}' is corrupted: {source}")]
    Corrupted {
        key: String,
        source: serde_json::Error,
    },

    /// The payload parses but its contents break a store invariant.
    #[error("Collection '{key}' is invalid: {reason}")]
    InvalidContent { key: String, reason: String },

    #[error("Serialization failed: {0}")]
    Serialize(serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DbError> for PortalError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => PortalError::NotFound { entity, id },
            DbError::Corrupted { key, source } => PortalError::Corrupted {
                key,
                reason: source.to_string(),
            },
            DbError::InvalidContent { key, reason } => PortalError::Corrupted { key, reason },
            DbError::Io(e) => PortalError::Export(e.to_string()),
            other => PortalError::Database(other.to_string()),
        }
    }
}
