//! Grievance Portal core — domain models, storage traits, the
//! notification contract and the shared error type.

pub mod error;
pub mod models;
pub mod notification;
pub mod repository;
