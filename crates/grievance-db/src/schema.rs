//! Schema definitions and migration runner for SurrealDB.
//!
//! The portal keeps everything in one SCHEMAFULL key-value table.
//! Each record id is a collection key and its payload is the
//! serialized collection.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info};

use crate::error::DbError;

/// One applied migration per record, keyed by version.
const LEDGER_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
";

#[derive(Debug, SurrealValue)]
struct LedgerEntry {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "local_store",
    sql: SCHEMA_V1,
}];

const SCHEMA_V1: &str = "\
DEFINE TABLE local_store SCHEMAFULL;
DEFINE FIELD payload ON TABLE local_store TYPE string;
DEFINE FIELD updated_at ON TABLE local_store TYPE datetime \
    DEFAULT time::now();
";

/// Bring the store up to the latest schema.
///
/// Safe to call on every start: versions already in the ledger are
/// skipped.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(LEDGER_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(format!("ledger setup: {e}")))?;

    let applied = applied_version(db).await?;
    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > applied).collect();
    if pending.is_empty() {
        debug!(version = applied, "Schema up to date");
        return Ok(());
    }

    for migration in pending {
        apply(db, migration).await?;
    }
    Ok(())
}

async fn applied_version<C: Connection>(db: &Surreal<C>) -> Result<u32, DbError> {
    let entries: Vec<LedgerEntry> = db.query("SELECT version FROM _migration").await?.take(0)?;
    Ok(entries.iter().map(|e| e.version).max().unwrap_or(0))
}

/// Run the DDL and its ledger entry in one transaction so a failed
/// migration leaves no record behind.
async fn apply<C: Connection>(db: &Surreal<C>, migration: &Migration) -> Result<(), DbError> {
    info!(version = migration.version, name = migration.name, "Applying migration");

    let sql = format!(
        "BEGIN TRANSACTION;\n{}\
         CREATE type::record('_migration', $version) SET version = $version, name = $name;\n\
         COMMIT TRANSACTION;",
        migration.sql
    );
    db.query(sql)
        .bind(("version", migration.version))
        .bind(("name", migration.name))
        .await?
        .check()
        .map_err(|e| {
            DbError::Migration(format!("v{} '{}': {e}", migration.version, migration.name))
        })?;

    info!(version = migration.version, "Migration applied");
    Ok(())
}
