//! Domain models for the grievance portal.
//!
//! Field names serialize in the camelCase shape the persisted
//! collections use.

pub mod grievance;
pub mod user;
