//! EmailJS configuration.

/// Identifiers and template parameter names for the EmailJS send call.
#[derive(Debug, Clone)]
pub struct EmailJsConfig {
    /// Send endpoint.
    pub api_url: String,
    /// EmailJS service identifier.
    pub service_id: String,
    /// EmailJS template identifier.
    pub template_id: String,
    /// Account public key, sent as `user_id`.
    pub public_key: String,
    /// Template variable holding the sender's display name.
    pub recipient_param: String,
    /// Template variable holding the formatted message body.
    pub message_param: String,
    /// Template variable holding the send time.
    pub time_param: String,
    /// Request timeout in seconds. Unset by default, so a send waits as
    /// long as the HTTP client does. When set, an expired timeout surfaces
    /// as a transport failure; there is no retry.
    pub timeout_secs: Option<u64>,
}

impl Default for EmailJsConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.emailjs.com/api/v1.0/email/send".into(),
            service_id: "service_9940f7p".into(),
            template_id: "template_wfljobv".into(),
            public_key: "6aN6bauWpZH4EqUEF".into(),
            recipient_param: "Rabhya".into(),
            message_param: "message".into(),
            time_param: "time".into(),
            timeout_secs: None,
        }
    }
}
