//! Grievance Portal — process entry point.
//!
//! Builds the single portal context (storage, notifier, controller)
//! once at startup and runs the startup diagnostics.

mod config;

use std::process::ExitCode;

use grievance_core::error::PortalResult;
use grievance_db::repository::{SurrealGrievanceRepository, SurrealUserRepository};
use grievance_db::{DbError, DbManager};
use grievance_notify::EmailJsNotifier;
use grievance_portal::PortalController;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("grievance=info".parse().unwrap()),
        )
        .json()
        .init();

    info!("Starting grievance portal...");

    match run(ServerConfig::load()).await {
        Ok(()) => {
            info!("Grievance portal stopped.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Grievance portal failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> PortalResult<()> {
    let manager = DbManager::connect(&config.db)
        .await
        .map_err(DbError::from)?;
    grievance_db::run_migrations(manager.client()).await?;

    let email = &config.email;
    info!(
        api_url = %email.api_url,
        service_id = %email.service_id,
        template_id = %email.template_id,
        params = ?[&email.recipient_param, &email.message_param, &email.time_param],
        "Notification collaborator configured"
    );

    let portal = PortalController::new(
        SurrealUserRepository::new(manager.client().clone()),
        SurrealGrievanceRepository::new(manager.client().clone()),
        EmailJsNotifier::new(config.email),
        config.portal,
    );
    portal.initialize().await?;

    let stats = portal.stats().await?;
    info!(
        total = stats.total,
        pending = stats.pending,
        resolved = stats.resolved,
        "Grievance store ready"
    );

    if config.send_test_email {
        if let Err(e) = portal.send_test_notification().await {
            warn!(cause = %e.cause(), "Notification setup check failed");
        }
    }

    if config.export_on_start {
        let path = portal.export().await?;
        info!(path = %path.display(), "Startup backup written");
    }

    Ok(())
}
