use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::checklists::models::ChecklistSubmission;
use crate::features::definitions::models::{ChecklistItemDefinition, ChecklistType};
use crate::features::history::models::{CorrectiveAction, NewCorrectiveAction, PersistedChecklist};
use crate::features::vehicles::models::Vehicle;

/// Everything the checklist lifecycle reads from or writes to storage
///
/// Services only see this trait, so tests swap the Postgres store for an
/// in-memory one.
#[async_trait]
pub trait FleetStore: Send + Sync {
    /// Active definitions of one checklist type, in catalog order
    async fn load_definitions(
        &self,
        checklist_type: ChecklistType,
    ) -> Result<Vec<ChecklistItemDefinition>>;

    async fn load_vehicles_for_driver(&self, driver_id: &str) -> Result<Vec<Vehicle>>;

    /// Store a checklist with all its items atomically and return its id
    async fn submit_checklist(&self, submission: &ChecklistSubmission) -> Result<Uuid>;

    /// Checklists submitted by a driver, newest first
    async fn load_checklist_history(&self, driver_id: &str) -> Result<Vec<PersistedChecklist>>;

    async fn load_checklist(&self, checklist_id: Uuid) -> Result<Option<PersistedChecklist>>;

    async fn load_corrective_actions(&self, checklist_id: Uuid) -> Result<Vec<CorrectiveAction>>;

    async fn save_corrective_action(&self, action: &NewCorrectiveAction) -> Result<CorrectiveAction>;
}
