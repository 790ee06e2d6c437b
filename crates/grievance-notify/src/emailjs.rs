//! [`Notifier`] implementation over the EmailJS REST API.

use std::time::Duration;

use grievance_core::notification::{
    FailureCause, NotificationError, NotificationMessage, NotificationReceipt, Notifier,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::config::EmailJsConfig;

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: Map<String, Value>,
}

pub struct EmailJsNotifier {
    client: reqwest::Client,
    config: EmailJsConfig,
}

impl EmailJsNotifier {
    pub fn new(config: EmailJsConfig) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });
        Self { client, config }
    }

    /// The flat parameter mapping the template expects.
    pub fn template_params(&self, message: &NotificationMessage) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert(
            self.config.recipient_param.clone(),
            Value::String(message.recipient_name.clone()),
        );
        params.insert(
            self.config.message_param.clone(),
            Value::String(message.body.clone()),
        );
        params.insert(
            self.config.time_param.clone(),
            Value::String(message.sent_at.clone()),
        );
        params
    }

    fn request_body(&self, message: &NotificationMessage) -> SendRequest<'_> {
        SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: self.template_params(message),
        }
    }

    fn report(&self, err: &NotificationError) {
        let cause = err.cause();
        error!(
            status = ?err.status,
            cause = %cause,
            detail = err.detail.as_deref().unwrap_or(""),
            "Notification send failed"
        );
        if cause == FailureCause::TemplateParameters {
            error!(
                expected = ?[
                    &self.config.recipient_param,
                    &self.config.message_param,
                    &self.config.time_param,
                ],
                "Template rejected the parameters sent"
            );
        }
    }
}

impl Notifier for EmailJsNotifier {
    async fn send(
        &self,
        message: NotificationMessage,
    ) -> Result<NotificationReceipt, NotificationError> {
        let body = self.request_body(&message);
        info!(
            service_id = %self.config.service_id,
            template_id = %self.config.template_id,
            "Sending notification"
        );

        let response = match self.client.post(&self.config.api_url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                let err = NotificationError::transport(e.to_string());
                self.report(&err);
                return Err(err);
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(status = status.as_u16(), error = %e, "Failed to read notification response body");
                format!("failed to read response body: {e}")
            }
        };

        if status.is_success() {
            info!(status = status.as_u16(), "Notification delivered");
            Ok(NotificationReceipt {
                status: status.as_u16(),
                text,
            })
        } else {
            let err = NotificationError::http(status.as_u16(), text);
            self.report(&err);
            Err(err)
        }
    }
}
