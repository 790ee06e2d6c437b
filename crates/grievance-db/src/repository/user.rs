//! [`UserRepository`] over the `users` collection.

use grievance_core::error::PortalResult;
use grievance_core::models::user::{User, default_seed_users};
use grievance_core::repository::UserRepository;
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::store::{LocalStore, USERS_KEY};

#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    store: LocalStore<C>,
    /// Written on first initialization only.
    seed: Vec<User>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self::with_seed(db, default_seed_users())
    }

    pub fn with_seed(db: Surreal<C>, seed: Vec<User>) -> Self {
        Self {
            store: LocalStore::new(db),
            seed,
        }
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn initialize(&self) -> PortalResult<()> {
        if self.store.ensure_collection(USERS_KEY, &self.seed).await? {
            info!(count = self.seed.len(), "Seeded users collection");
        }
        Ok(())
    }

    async fn authenticate(&self, username: &str, password: &str) -> PortalResult<Option<User>> {
        let users = self.list().await?;
        Ok(users.into_iter().find(|u| u.matches(username, password)))
    }

    async fn list(&self) -> PortalResult<Vec<User>> {
        Ok(self.store.read_collection(USERS_KEY).await?)
    }
}
