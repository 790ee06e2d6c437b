//! Grievance Portal — page flow, login, validated submission with
//! persist-then-notify ordering, and list rendering.

pub mod config;
pub mod controller;
pub mod page;
pub mod render;

pub use config::PortalConfig;
pub use controller::{
    GrievanceForm, GrievanceListView, NotificationState, PendingSubmission, PortalController,
    SubmissionReceipt,
};
pub use page::Page;
