//! Grievance Portal storage — the SurrealDB-backed local store and the
//! repository implementations layered on it.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - The key-value store holding the serialized collections ([`LocalStore`])
//! - Repository implementations for `grievance-core` traits
//! - Backup export ([`export_all`])
//! - Error types ([`DbError`])

pub mod clock;
mod connection;
mod error;
mod export;
pub mod repository;
mod schema;
mod store;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use export::{backup_file_name, export_all};
pub use repository::{SurrealGrievanceRepository, SurrealUserRepository, initialize};
pub use schema::run_migrations;
pub use store::{GRIEVANCES_KEY, LocalStore, USERS_KEY};
