//! Repository implementations over [`LocalStore`](crate::LocalStore).

mod grievance;
mod user;

use grievance_core::error::PortalResult;
use grievance_core::repository::{GrievanceRepository, UserRepository};

pub use grievance::SurrealGrievanceRepository;
pub use user::SurrealUserRepository;

/// Ensure both collections exist. Idempotent; writes only on first run.
pub async fn initialize<U: UserRepository, G: GrievanceRepository>(
    users: &U,
    grievances: &G,
) -> PortalResult<()> {
    users.initialize().await?;
    grievances.initialize().await
}
