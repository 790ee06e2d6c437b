//! Grievance Portal notify — delivers new-grievance alerts through the
//! EmailJS transactional email REST API.

pub mod config;
pub mod emailjs;

pub use config::EmailJsConfig;
pub use emailjs::EmailJsNotifier;
