//! Grievance domain model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PortalError;

/// Mood stored when the submitter never picked one.
pub const DEFAULT_MOOD: &str = "😐";

/// Submitter identity recorded when there is no session user.
pub const ANONYMOUS_USERNAME: &str = "anonymous";
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Timestamp-derived identifier (milliseconds since the Unix epoch).
pub type GrievanceId = i64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GrievanceStatus {
    Pending,
    Resolved,
    /// Debug artifact kept only so stored test rows still parse.
    Test,
}

impl GrievanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrievanceStatus::Pending => "pending",
            GrievanceStatus::Resolved => "resolved",
            GrievanceStatus::Test => "test",
        }
    }
}

impl fmt::Display for GrievanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One submitted complaint, as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Grievance {
    pub id: GrievanceId,
    pub title: String,
    pub complaint: String,
    pub mood: String,
    /// Free-text "what would help". The persisted field name is kept
    /// for compatibility with existing collections.
    pub severity: String,
    pub submitted_by: String,
    pub submitted_by_name: String,
    /// Locale-formatted creation time. Not sortable.
    pub timestamp: String,
    pub status: GrievanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Caller-supplied fields. The id, timestamp and status are assigned
/// by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateGrievance {
    pub title: String,
    pub complaint: String,
    pub mood: String,
    pub severity: String,
    pub submitted_by: String,
    pub submitted_by_name: String,
}

impl CreateGrievance {
    /// Title, complaint and requested resolution must be non-empty
    /// after trimming.
    pub fn validate(&self) -> Result<(), PortalError> {
        let missing: Vec<&str> = [
            ("title", &self.title),
            ("complaint", &self.complaint),
            ("severity", &self.severity),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PortalError::Validation {
                message: format!("missing required fields: {}", missing.join(", ")),
            })
        }
    }
}

/// Aggregate counts shown on the portal home.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GrievanceStats {
    pub total: u64,
    pub pending: u64,
    pub resolved: u64,
}
