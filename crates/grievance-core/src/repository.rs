//! Storage trait definitions.
//!
//! All operations are async. Each call re-reads the backing store, so
//! there is no in-memory cache to go stale.

use crate::error::PortalResult;
use crate::models::grievance::{CreateGrievance, Grievance, GrievanceId, GrievanceStatus};
use crate::models::user::User;

pub trait UserRepository: Send + Sync {
    /// Ensure the `users` collection exists, seeding it on first run.
    fn initialize(&self) -> impl Future<Output = PortalResult<()>> + Send;
    /// `Ok(None)` on bad credentials; errors are reserved for storage
    /// failures.
    fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = PortalResult<Option<User>>> + Send;
    fn list(&self) -> impl Future<Output = PortalResult<Vec<User>>> + Send;
}

pub trait GrievanceRepository: Send + Sync {
    /// Ensure the `grievances` collection exists.
    fn initialize(&self) -> impl Future<Output = PortalResult<()>> + Send;
    /// Assign id, timestamp and `pending` status, append and persist.
    fn create(&self, input: CreateGrievance) -> impl Future<Output = PortalResult<Grievance>> + Send;
    /// Insertion order, oldest first.
    fn list(&self) -> impl Future<Output = PortalResult<Vec<Grievance>>> + Send;
    fn list_by_status(
        &self,
        status: GrievanceStatus,
    ) -> impl Future<Output = PortalResult<Vec<Grievance>>> + Send;
    fn get_by_id(&self, id: GrievanceId) -> impl Future<Output = PortalResult<Grievance>> + Send;
    fn update_status(
        &self,
        id: GrievanceId,
        status: GrievanceStatus,
    ) -> impl Future<Output = PortalResult<Grievance>> + Send;
    /// Succeeds even when no record matches.
    fn delete(&self, id: GrievanceId) -> impl Future<Output = PortalResult<()>> + Send;
    fn clear_all(&self) -> impl Future<Output = PortalResult<()>> + Send;
    fn count(&self) -> impl Future<Output = PortalResult<u64>> + Send;
    fn count_by_status(
        &self,
        status: GrievanceStatus,
    ) -> impl Future<Output = PortalResult<u64>> + Send;
}
