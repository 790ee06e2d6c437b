//! Portal configuration.

use std::path::PathBuf;

use grievance_core::models::grievance::{ANONYMOUS_NAME, ANONYMOUS_USERNAME, DEFAULT_MOOD};

#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Mood stored when the submitter skipped emoji selection.
    pub default_mood: String,
    /// Submitter id recorded without a session user.
    pub anonymous_username: String,
    /// Submitter display name recorded without a session user.
    pub anonymous_name: String,
    /// Directory backup exports are written to.
    pub export_dir: PathBuf,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            default_mood: DEFAULT_MOOD.into(),
            anonymous_username: ANONYMOUS_USERNAME.into(),
            anonymous_name: ANONYMOUS_NAME.into(),
            export_dir: PathBuf::from("."),
        }
    }
}
