//! [`GrievanceRepository`] over the `grievances` collection.
//!
//! Every mutation is one read-modify-write of the whole collection.

use grievance_core::error::PortalResult;
use grievance_core::models::grievance::{CreateGrievance, Grievance, GrievanceId, GrievanceStatus};
use grievance_core::repository::GrievanceRepository;
use surrealdb::{Connection, Surreal};
use tracing::{debug, info};

use crate::clock;
use crate::error::DbError;
use crate::store::{GRIEVANCES_KEY, LocalStore};

#[derive(Clone)]
pub struct SurrealGrievanceRepository<C: Connection> {
    store: LocalStore<C>,
}

impl<C: Connection> SurrealGrievanceRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            store: LocalStore::new(db),
        }
    }

    async fn load(&self) -> Result<Vec<Grievance>, DbError> {
        self.store.read_collection(GRIEVANCES_KEY).await
    }

    async fn save(&self, grievances: &[Grievance]) -> Result<(), DbError> {
        self.store.write_collection(GRIEVANCES_KEY, grievances).await
    }
}

fn not_found(id: GrievanceId) -> DbError {
    DbError::NotFound {
        entity: "grievance".into(),
        id: id.to_string(),
    }
}

impl<C: Connection> GrievanceRepository for SurrealGrievanceRepository<C> {
    async fn initialize(&self) -> PortalResult<()> {
        let empty: &[Grievance] = &[];
        if self.store.ensure_collection(GRIEVANCES_KEY, empty).await? {
            info!("Created empty grievances collection");
        }
        Ok(())
    }

    async fn create(&self, input: CreateGrievance) -> PortalResult<Grievance> {
        input.validate()?;

        let mut grievances = self.load().await?;
        let id = clock::next_id(clock::now_millis(), &grievances).ok_or_else(|| {
            DbError::InvalidContent {
                key: GRIEVANCES_KEY.into(),
                reason: "no identifier left above the largest stored id".into(),
            }
        })?;
        let grievance = Grievance {
            id,
            title: input.title,
            complaint: input.complaint,
            mood: input.mood,
            severity: input.severity,
            submitted_by: input.submitted_by,
            submitted_by_name: input.submitted_by_name,
            timestamp: clock::now_locale(),
            status: GrievanceStatus::Pending,
            updated_at: None,
        };

        grievances.push(grievance.clone());
        self.save(&grievances).await?;

        debug!(id = grievance.id, total = grievances.len(), "Grievance stored");
        Ok(grievance)
    }

    async fn list(&self) -> PortalResult<Vec<Grievance>> {
        Ok(self.load().await?)
    }

    async fn list_by_status(&self, status: GrievanceStatus) -> PortalResult<Vec<Grievance>> {
        let mut grievances = self.load().await?;
        grievances.retain(|g| g.status == status);
        Ok(grievances)
    }

    async fn get_by_id(&self, id: GrievanceId) -> PortalResult<Grievance> {
        let grievances = self.load().await?;
        let found = grievances.into_iter().find(|g| g.id == id);
        Ok(found.ok_or_else(|| not_found(id))?)
    }

    async fn update_status(&self, id: GrievanceId, status: GrievanceStatus) -> PortalResult<Grievance> {
        let mut grievances = self.load().await?;
        let grievance = grievances
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| not_found(id))?;

        grievance.status = status;
        grievance.updated_at = Some(clock::now_locale());
        let updated = grievance.clone();

        self.save(&grievances).await?;

        info!(id, status = %status, "Grievance status updated");
        Ok(updated)
    }

    async fn delete(&self, id: GrievanceId) -> PortalResult<()> {
        let mut grievances = self.load().await?;
        grievances.retain(|g| g.id != id);
        self.save(&grievances).await?;
        Ok(())
    }

    async fn clear_all(&self) -> PortalResult<()> {
        let empty: &[Grievance] = &[];
        self.save(empty).await?;
        Ok(())
    }

    async fn count(&self) -> PortalResult<u64> {
        Ok(self.load().await?.len() as u64)
    }

    async fn count_by_status(&self, status: GrievanceStatus) -> PortalResult<u64> {
        Ok(self.list_by_status(status).await?.len() as u64)
    }
}
