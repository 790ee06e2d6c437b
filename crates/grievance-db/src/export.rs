//! Backup export of the grievance collection.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use grievance_core::error::{PortalError, PortalResult};
use grievance_core::repository::GrievanceRepository;
use tracing::info;

use crate::error::DbError;

/// `grievances_backup_<YYYY-MM-DD>.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("grievances_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Write the full collection, pretty-printed, into `dir` and return
/// the path of the written file.
pub async fn export_all<R: GrievanceRepository>(repo: &R, dir: &Path) -> PortalResult<PathBuf> {
    let grievances = repo.list().await?;
    let body = serde_json::to_string_pretty(&grievances)
        .map_err(|e| PortalError::Export(e.to_string()))?;

    let path = dir.join(backup_file_name(Utc::now().date_naive()));
    tokio::fs::write(&path, body).await.map_err(DbError::from)?;

    info!(path = %path.display(), count = grievances.len(), "Exported grievances");
    Ok(path)
}
