//! Contract for the outbound notification collaborator.
//!
//! A send is a single attempt that either succeeds or fails. Callers
//! never retry automatically.

use std::fmt;

use thiserror::Error;

use crate::models::grievance::Grievance;

/// Flat message handed to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub recipient_name: String,
    pub body: String,
    pub sent_at: String,
}

impl NotificationMessage {
    /// Build the alert for a stored grievance. The grievance must
    /// already carry its assigned id.
    pub fn for_grievance(grievance: &Grievance, sent_at: String) -> Self {
        let from = if grievance.submitted_by_name.is_empty() {
            &grievance.submitted_by
        } else {
            &grievance.submitted_by_name
        };
        let recipient_name = if from.is_empty() {
            "Anonymous User".to_string()
        } else {
            from.clone()
        };

        let body = format!(
            "🔸 NEW GRIEVANCE SUBMITTED 🔸\n\
             \n\
             📋 Title: {title}\n\
             😔 Mood: {mood}\n\
             👤 From: {from}\n\
             \n\
             📝 COMPLAINT:\n\
             {complaint}\n\
             \n\
             💡 WHAT WOULD HELP:\n\
             {help}\n\
             \n\
             🕒 Submitted: {timestamp}\n\
             🆔 Grievance ID: #{id}",
            title = grievance.title,
            mood = grievance.mood,
            complaint = grievance.complaint,
            help = grievance.severity,
            timestamp = grievance.timestamp,
            id = grievance.id,
        );

        Self {
            recipient_name,
            body,
            sent_at,
        }
    }

    /// Fixed diagnostic message used to check the collaborator setup.
    pub fn diagnostic(sent_at: String) -> Self {
        Self {
            recipient_name: "Test User".into(),
            body: "This is a test message to verify the email system is working correctly."
                .into(),
            sent_at,
        }
    }
}

/// What a successful send returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationReceipt {
    pub status: u16,
    pub text: String,
}

/// A rejected send. `status` is absent when the request never got an
/// HTTP answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("notification rejected ({}): {}", status_label(.status), detail_label(.detail))]
pub struct NotificationError {
    pub status: Option<u16>,
    pub detail: Option<String>,
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("HTTP {code}"),
        None => "transport".to_string(),
    }
}

fn detail_label(detail: &Option<String>) -> &str {
    detail.as_deref().unwrap_or("no detail")
}

impl NotificationError {
    pub fn http(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            detail: Some(detail.into()),
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            detail: Some(detail.into()),
        }
    }

    pub fn cause(&self) -> FailureCause {
        FailureCause::from_status(self.status)
    }
}

/// Human-readable diagnosis of a failed send. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    BadIdentifiers,
    BadCredentials,
    QuotaExceeded,
    TemplateParameters,
    RateLimited,
    Unknown(u16),
    Transport,
}

impl FailureCause {
    pub fn from_status(status: Option<u16>) -> Self {
        match status {
            Some(400) => FailureCause::BadIdentifiers,
            Some(401) => FailureCause::BadCredentials,
            Some(402) => FailureCause::QuotaExceeded,
            Some(422) => FailureCause::TemplateParameters,
            Some(429) => FailureCause::RateLimited,
            Some(other) => FailureCause::Unknown(other),
            None => FailureCause::Transport,
        }
    }
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::BadIdentifiers => {
                f.write_str("bad request: check the service and template identifiers")
            }
            FailureCause::BadCredentials => f.write_str("unauthorized: check the public key"),
            FailureCause::QuotaExceeded => f.write_str("payment required: sending quota exceeded"),
            FailureCause::TemplateParameters => {
                f.write_str("template error: check the template variable names")
            }
            FailureCause::RateLimited => f.write_str("rate limited: too many requests"),
            FailureCause::Unknown(status) => write!(f, "unexpected status {status}"),
            FailureCause::Transport => f.write_str("request did not reach the service"),
        }
    }
}

/// The external email collaborator.
pub trait Notifier: Send + Sync {
    fn send(
        &self,
        message: NotificationMessage,
    ) -> impl Future<Output = Result<NotificationReceipt, NotificationError>> + Send;
}
