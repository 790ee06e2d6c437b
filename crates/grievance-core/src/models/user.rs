//! User domain model.

use serde::{Deserialize, Serialize};

/// A login credential. The password is compared in plaintext; this is
/// a toy gate, not an account system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct User {
    pub username: String,
    pub password: String,
    pub name: String,
}

impl User {
    /// Case-insensitive on username, exact on password.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username.to_lowercase() == username.to_lowercase() && self.password == password
    }
}

/// The records written on first initialization.
pub fn default_seed_users() -> Vec<User> {
    vec![User {
        username: "rani".into(),
        password: "rani123".into(),
        name: "Rani".into(),
    }]
}
