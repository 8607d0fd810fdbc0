#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use chrono::Utc;
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::core::error::{AppError, Result};
#[cfg(test)]
use crate::features::checklists::models::ChecklistSubmission;
#[cfg(test)]
use crate::features::checklists::services::DriverIdentity;
#[cfg(test)]
use crate::features::definitions::models::{ChecklistItemDefinition, ChecklistType, VehicleScope};
#[cfg(test)]
use crate::features::history::models::{
    ChecklistStatus, CorrectiveAction, NewCorrectiveAction, PersistedChecklist,
    PersistedChecklistItem,
};
#[cfg(test)]
use crate::features::vehicles::models::{Vehicle, VehicleKind};
#[cfg(test)]
use crate::modules::persistence::FleetStore;
#[cfg(test)]
use crate::modules::storage::EvidenceStore;

#[cfg(test)]
pub fn test_driver() -> DriverIdentity {
    DriverIdentity {
        id: "driver-1".to_string(),
        name: "Ana Souza".to_string(),
    }
}

#[cfg(test)]
pub fn definition(
    id: &str,
    name: &str,
    category: Option<&str>,
    scope: Option<VehicleScope>,
) -> ChecklistItemDefinition {
    ChecklistItemDefinition {
        id: id.to_string(),
        name: name.to_string(),
        category: category.map(String::from),
        vehicle_scope: scope,
    }
}

#[cfg(test)]
pub fn tractor(plate: &str) -> Vehicle {
    Vehicle {
        id: Uuid::new_v4(),
        plate: plate.to_string(),
        kind: VehicleKind::Tractor,
        brand: Some("Scania".to_string()),
        model: Some("R 450".to_string()),
        year: Some(2020),
        trailer_type: None,
        axle_count: None,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
pub fn trailer(plate: &str) -> Vehicle {
    Vehicle {
        id: Uuid::new_v4(),
        plate: plate.to_string(),
        kind: VehicleKind::Trailer,
        brand: None,
        model: None,
        year: None,
        trailer_type: Some("Flatbed".to_string()),
        axle_count: Some(3),
        created_at: Utc::now(),
    }
}

/// [`FleetStore`] kept in memory, with switches to make calls fail
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryFleetStore {
    definitions: Mutex<HashMap<ChecklistType, Vec<ChecklistItemDefinition>>>,
    vehicles: Mutex<HashMap<String, Vec<Vehicle>>>,
    checklists: Mutex<Vec<(String, PersistedChecklist)>>,
    actions: Mutex<Vec<CorrectiveAction>>,
    submissions: Mutex<Vec<ChecklistSubmission>>,
    submit_calls: AtomicUsize,
    pub fail_definitions: AtomicBool,
    pub fail_vehicles: AtomicBool,
    pub fail_submit: AtomicBool,
    pub fail_history: AtomicBool,
    pub fail_actions: AtomicBool,
    pub fail_save_action: AtomicBool,
}

#[cfg(test)]
impl InMemoryFleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_definitions(
        self,
        checklist_type: ChecklistType,
        definitions: Vec<ChecklistItemDefinition>,
    ) -> Self {
        self.definitions
            .lock()
            .unwrap()
            .insert(checklist_type, definitions);
        self
    }

    pub fn with_vehicles(self, driver_id: &str, vehicles: Vec<Vehicle>) -> Self {
        self.vehicles
            .lock()
            .unwrap()
            .insert(driver_id.to_string(), vehicles);
        self
    }

    /// Seed a stored checklist, as if submitted earlier by `driver_id`
    pub fn with_checklist(self, driver_id: &str, checklist: PersistedChecklist) -> Self {
        self.checklists
            .lock()
            .unwrap()
            .push((driver_id.to_string(), checklist));
        self
    }

    pub fn with_action(self, action: CorrectiveAction) -> Self {
        self.actions.lock().unwrap().push(action);
        self
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> Vec<ChecklistSubmission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn actions(&self) -> Vec<CorrectiveAction> {
        self.actions.lock().unwrap().clone()
    }

    fn check(flag: &AtomicBool, what: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            Err(AppError::Internal(format!("{} unavailable", what)))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
#[async_trait]
impl FleetStore for InMemoryFleetStore {
    async fn load_definitions(
        &self,
        checklist_type: ChecklistType,
    ) -> Result<Vec<ChecklistItemDefinition>> {
        Self::check(&self.fail_definitions, "definitions")?;
        Ok(self
            .definitions
            .lock()
            .unwrap()
            .get(&checklist_type)
            .cloned()
            .unwrap_or_default())
    }

    async fn load_vehicles_for_driver(&self, driver_id: &str) -> Result<Vec<Vehicle>> {
        Self::check(&self.fail_vehicles, "vehicles")?;
        Ok(self
            .vehicles
            .lock()
            .unwrap()
            .get(driver_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn submit_checklist(&self, submission: &ChecklistSubmission) -> Result<Uuid> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.fail_submit, "checklist storage")?;

        let plate = self
            .vehicles
            .lock()
            .unwrap()
            .values()
            .flatten()
            .find(|v| v.id == submission.vehicle_id)
            .map(|v| v.plate.clone());

        let checklist = PersistedChecklist {
            id: Uuid::now_v7(),
            date: Utc::now(),
            checklist_type: submission.checklist_type,
            status: if submission.has_problems() {
                ChecklistStatus::Pending
            } else {
                ChecklistStatus::Completed
            },
            vehicle_id: Some(submission.vehicle_id),
            vehicle_plate: plate,
            items: submission
                .items
                .iter()
                .map(|item| PersistedChecklistItem {
                    id: Some(item.item_id.clone()),
                    name: Some(item.label.clone()),
                    status: item.status,
                    comment: item.stored_comment().map(String::from),
                    photo: item.photo.as_ref().map(|p| p.to_string()),
                })
                .collect(),
        };
        let id = checklist.id;

        self.checklists
            .lock()
            .unwrap()
            .push((submission.driver_id.clone(), checklist));
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(id)
    }

    async fn load_checklist_history(&self, driver_id: &str) -> Result<Vec<PersistedChecklist>> {
        Self::check(&self.fail_history, "history")?;
        // insertion order, not sorted; callers order it themselves
        Ok(self
            .checklists
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| owner == driver_id)
            .map(|(_, checklist)| checklist.clone())
            .collect())
    }

    async fn load_checklist(&self, checklist_id: Uuid) -> Result<Option<PersistedChecklist>> {
        Self::check(&self.fail_history, "history")?;
        Ok(self
            .checklists
            .lock()
            .unwrap()
            .iter()
            .find(|(_, checklist)| checklist.id == checklist_id)
            .map(|(_, checklist)| checklist.clone()))
    }

    async fn load_corrective_actions(&self, checklist_id: Uuid) -> Result<Vec<CorrectiveAction>> {
        Self::check(&self.fail_actions, "corrective actions")?;
        Ok(self
            .actions
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.checklist_id == checklist_id)
            .cloned()
            .collect())
    }

    async fn save_corrective_action(&self, action: &NewCorrectiveAction) -> Result<CorrectiveAction> {
        Self::check(&self.fail_save_action, "corrective action storage")?;
        let saved = CorrectiveAction {
            id: Uuid::now_v7(),
            checklist_id: action.checklist_id,
            item_id: action.item_id.clone(),
            corrected_by: action.corrected_by.clone(),
            action_taken: action.action_taken.clone(),
            verified: false,
            created_at: Utc::now(),
        };
        self.actions.lock().unwrap().push(saved.clone());
        Ok(saved)
    }
}

/// [`EvidenceStore`] that keeps uploaded objects in a map
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryEvidenceStore {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    pub fail_uploads: AtomicBool,
}

#[cfg(test)]
impl InMemoryEvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }
}

#[cfg(test)]
#[async_trait]
impl EvidenceStore for InMemoryEvidenceStore {
    fn prefix(&self) -> &str {
        "evidence"
    }

    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(AppError::Internal("object storage unavailable".to_string()));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (data, content_type.to_string()));
        Ok(format!("memory://{}", key))
    }
}
