//! Environment-driven configuration for the portal process.

use std::env;
use std::path::PathBuf;

use grievance_db::DbConfig;
use grievance_notify::EmailJsConfig;
use grievance_portal::PortalConfig;
use tracing::info;

pub struct ServerConfig {
    pub db: DbConfig,
    pub email: EmailJsConfig,
    pub portal: PortalConfig,
    /// Write a backup export once storage is ready.
    pub export_on_start: bool,
    /// Send the diagnostic notification once the notifier is built.
    pub send_test_email: bool,
}

impl ServerConfig {
    pub fn load() -> Self {
        let db_defaults = DbConfig::default();
        let email_defaults = EmailJsConfig::default();
        let portal_defaults = PortalConfig::default();

        Self {
            db: DbConfig {
                endpoint: var_or("PORTAL_DB_ENDPOINT", db_defaults.endpoint),
                namespace: var_or("PORTAL_DB_NAMESPACE", db_defaults.namespace),
                database: var_or("PORTAL_DB_DATABASE", db_defaults.database),
                username: env::var("PORTAL_DB_USERNAME").ok(),
                password: env::var("PORTAL_DB_PASSWORD").ok(),
            },
            email: EmailJsConfig {
                api_url: var_or("EMAILJS_API_URL", email_defaults.api_url),
                service_id: var_or("EMAILJS_SERVICE_ID", email_defaults.service_id),
                template_id: var_or("EMAILJS_TEMPLATE_ID", email_defaults.template_id),
                public_key: var_or("EMAILJS_PUBLIC_KEY", email_defaults.public_key),
                ..email_defaults
            },
            portal: PortalConfig {
                export_dir: PathBuf::from(var_or(
                    "PORTAL_EXPORT_DIR",
                    portal_defaults.export_dir.display().to_string(),
                )),
                ..portal_defaults
            },
            export_on_start: flag("PORTAL_EXPORT_ON_START"),
            send_test_email: flag("PORTAL_SEND_TEST_EMAIL"),
        }
    }
}

fn var_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default
    })
}

fn flag(key: &str) -> bool {
    matches!(env::var(key).as_deref(), Ok("1" | "true" | "yes"))
}
