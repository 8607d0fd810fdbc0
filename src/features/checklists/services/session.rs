use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::checklists::models::{
    AnswerEntry, AnswerStatus, ChecklistSubmission, PhotoRef,
};
use crate::features::definitions::models::{
    all_items, ChecklistItemDefinition, ChecklistSection, ChecklistType,
};
use crate::features::definitions::services::build_sections;
use crate::features::vehicles::models::{Vehicle, VehicleKind};

use super::{assemble_submission, compute_progress, AnswerLedger, DriverIdentity, Progress};

/// Captured when a definition reload starts; results are only applied while
/// the session's generation still matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadTicket {
    pub generation: u64,
    pub checklist_type: ChecklistType,
    pub vehicle_kind: Option<VehicleKind>,
}

/// State of one driver filling one checklist
///
/// Owns the sections and the answer ledger. Any change to the effective item
/// set (checklist type or selected vehicle) discards all answers.
#[derive(Debug, Clone)]
pub struct ChecklistSession {
    id: Uuid,
    driver: DriverIdentity,
    checklist_type: ChecklistType,
    vehicles: Vec<Vehicle>,
    selected_vehicle: Option<Vehicle>,
    sections: Vec<ChecklistSection>,
    ledger: AnswerLedger,
    generation: u64,
    loading: bool,
    load_error: Option<String>,
    submitting: bool,
    created_at: DateTime<Utc>,
    last_touched: Instant,
}

impl ChecklistSession {
    pub fn new(
        driver: DriverIdentity,
        checklist_type: ChecklistType,
        vehicles: Vec<Vehicle>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            driver,
            checklist_type,
            vehicles,
            selected_vehicle: None,
            sections: Vec::new(),
            ledger: AnswerLedger::new(),
            generation: 0,
            loading: false,
            load_error: None,
            submitting: false,
            created_at: Utc::now(),
            last_touched: Instant::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn driver(&self) -> &DriverIdentity {
        &self.driver
    }

    pub fn checklist_type(&self) -> ChecklistType {
        self.checklist_type
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        self.selected_vehicle.as_ref()
    }

    pub fn sections(&self) -> &[ChecklistSection] {
        &self.sections
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn touch(&mut self) {
        self.last_touched = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_touched.elapsed()
    }

    /// Start a definition reload for the current type and vehicle
    ///
    /// Bumps the generation, clears the ledger and drops the current sections
    /// so nothing stale is shown while the fetch is in flight.
    pub fn begin_reload(&mut self) -> ReloadTicket {
        self.generation += 1;
        self.ledger.reset();
        self.sections.clear();
        self.load_error = None;
        self.loading = true;

        ReloadTicket {
            generation: self.generation,
            checklist_type: self.checklist_type,
            vehicle_kind: self.selected_vehicle.as_ref().map(|v| v.kind),
        }
    }

    /// Apply fetched definitions. Returns false when the ticket is stale.
    ///
    /// A failed fetch leaves the sections empty and records the error.
    pub fn apply_reload(
        &mut self,
        ticket: ReloadTicket,
        definitions: std::result::Result<Vec<ChecklistItemDefinition>, String>,
    ) -> bool {
        if ticket.generation != self.generation {
            return false;
        }

        self.loading = false;
        match definitions {
            Ok(definitions) => {
                self.sections =
                    build_sections(ticket.checklist_type, ticket.vehicle_kind, definitions);
                self.load_error = None;
            }
            Err(message) => {
                self.sections.clear();
                self.load_error = Some(message);
            }
        }
        true
    }

    /// Retry loading the current definitions, e.g. after a failed fetch
    pub fn request_reload(&mut self) -> Result<ReloadTicket> {
        self.ensure_editable()?;
        Ok(self.begin_reload())
    }

    /// Select one of the driver's candidate vehicles
    ///
    /// Returns a reload ticket when the selection actually changed.
    pub fn select_vehicle(&mut self, vehicle_id: Uuid) -> Result<Option<ReloadTicket>> {
        self.ensure_editable()?;
        if self.selected_vehicle.as_ref().map(|v| v.id) == Some(vehicle_id) {
            return Ok(None);
        }

        let vehicle = self
            .vehicles
            .iter()
            .find(|v| v.id == vehicle_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Vehicle {} is not assigned to driver {}",
                    vehicle_id, self.driver.id
                ))
            })?;

        self.selected_vehicle = Some(vehicle);
        Ok(Some(self.begin_reload()))
    }

    /// Switch the checklist type. Returns a reload ticket when it changed.
    pub fn set_checklist_type(
        &mut self,
        checklist_type: ChecklistType,
    ) -> Result<Option<ReloadTicket>> {
        self.ensure_editable()?;
        if self.checklist_type == checklist_type {
            return Ok(None);
        }
        self.checklist_type = checklist_type;
        Ok(Some(self.begin_reload()))
    }

    fn ensure_item(&self, item_id: &str) -> Result<()> {
        if all_items(&self.sections).any(|item| item.id == item_id) {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "Item {} is not part of this checklist",
                item_id
            )))
        }
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.submitting {
            return Err(AppError::Conflict(
                "Checklist is being submitted".to_string(),
            ));
        }
        Ok(())
    }

    pub fn set_status(&mut self, item_id: &str, status: AnswerStatus) -> Result<()> {
        self.ensure_editable()?;
        self.ensure_item(item_id)?;
        self.ledger.set_status(item_id, status);
        Ok(())
    }

    pub fn set_photo(&mut self, item_id: &str, photo: PhotoRef) -> Result<()> {
        self.ensure_editable()?;
        self.ensure_item(item_id)?;
        self.ledger.set_photo(item_id, photo);
        Ok(())
    }

    pub fn clear_photo(&mut self, item_id: &str) -> Result<()> {
        self.ensure_editable()?;
        self.ensure_item(item_id)?;
        self.ledger.clear_photo(item_id);
        Ok(())
    }

    pub fn set_comment(&mut self, item_id: &str, comment: String) -> Result<()> {
        self.ensure_editable()?;
        self.ensure_item(item_id)?;
        self.ledger.set_comment(item_id, comment);
        Ok(())
    }

    pub fn answer(&self, item_id: &str) -> AnswerEntry {
        self.ledger.entry(item_id)
    }

    pub fn progress(&self) -> Progress {
        compute_progress(&self.ledger, &self.sections)
    }

    /// Check item membership without touching the ledger
    pub fn contains_item(&self, item_id: &str) -> bool {
        self.ensure_item(item_id).is_ok()
    }

    /// Validate and build the payload; marks the session as submitting
    pub fn prepare_submission(&mut self) -> Result<ChecklistSubmission> {
        self.ensure_editable()?;
        if self.loading {
            return Err(AppError::Conflict(
                "Checklist items are still loading".to_string(),
            ));
        }
        if let Some(error) = &self.load_error {
            return Err(AppError::LoadFailure(format!(
                "Checklist items were not loaded ({}); reload before submitting",
                error
            )));
        }
        if all_items(&self.sections).next().is_none() {
            return Err(AppError::Conflict(
                "There are no checklist items to submit".to_string(),
            ));
        }

        let submission = assemble_submission(
            &self.driver,
            self.checklist_type,
            self.selected_vehicle.as_ref(),
            &self.sections,
            &self.ledger,
        )?;

        self.submitting = true;
        Ok(submission)
    }

    /// Re-open the session after a failed submission; answers are untouched
    pub fn abort_submission(&mut self) {
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::checklists::services::SubmissionRejection;
    use crate::features::definitions::models::VehicleScope;

    fn vehicle(kind: VehicleKind, plate: &str) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            plate: plate.to_string(),
            kind,
            brand: None,
            model: None,
            year: None,
            trailer_type: None,
            axle_count: None,
            created_at: Utc::now(),
        }
    }

    fn catalog() -> Vec<ChecklistItemDefinition> {
        vec![
            ChecklistItemDefinition {
                id: "1".to_string(),
                name: "Tires".to_string(),
                category: Some("Safety".to_string()),
                vehicle_scope: Some(VehicleScope::All),
            },
            ChecklistItemDefinition {
                id: "2".to_string(),
                name: "Tarp".to_string(),
                category: Some("Cargo".to_string()),
                vehicle_scope: Some(VehicleScope::Trailer),
            },
        ]
    }

    fn session_with(vehicles: Vec<Vehicle>) -> ChecklistSession {
        let driver = DriverIdentity {
            id: "driver-1".to_string(),
            name: "Ana".to_string(),
        };
        let mut session = ChecklistSession::new(driver, ChecklistType::Maintenance, vehicles);
        let ticket = session.begin_reload();
        assert!(session.apply_reload(ticket, Ok(catalog())));
        session
    }

    #[test]
    fn test_vehicle_switch_clears_answers() {
        let tractor = vehicle(VehicleKind::Tractor, "TR-1");
        let trailer = vehicle(VehicleKind::Trailer, "TL-1");
        let mut session = session_with(vec![tractor.clone(), trailer.clone()]);

        let ticket = session.select_vehicle(tractor.id).unwrap().unwrap();
        session.apply_reload(ticket, Ok(catalog()));
        session.set_status("1", AnswerStatus::Ok).unwrap();
        session.set_comment("1", "good".to_string()).unwrap();
        assert_eq!(session.progress().completed, 1);

        let ticket = session.select_vehicle(trailer.id).unwrap().unwrap();
        assert_eq!(session.answer("1"), AnswerEntry::default());
        session.apply_reload(ticket, Ok(catalog()));

        assert_eq!(session.answer("1"), AnswerEntry::default());
        assert_eq!(session.progress().completed, 0);
        assert_eq!(session.progress().total, 2);
    }

    #[test]
    fn test_reselecting_same_vehicle_keeps_answers() {
        let tractor = vehicle(VehicleKind::Tractor, "TR-1");
        let mut session = session_with(vec![tractor.clone()]);

        let ticket = session.select_vehicle(tractor.id).unwrap().unwrap();
        session.apply_reload(ticket, Ok(catalog()));
        session.set_status("1", AnswerStatus::Ok).unwrap();

        assert!(session.select_vehicle(tractor.id).unwrap().is_none());
        assert_eq!(session.answer("1").status, AnswerStatus::Ok);
    }

    #[test]
    fn test_unknown_vehicle_is_rejected() {
        let mut session = session_with(vec![vehicle(VehicleKind::Tractor, "TR-1")]);
        let result = session.select_vehicle(Uuid::new_v4());
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(session.selected_vehicle().is_none());
    }

    #[test]
    fn test_tractor_selection_filters_trailer_items() {
        let tractor = vehicle(VehicleKind::Tractor, "TR-1");
        let mut session = session_with(vec![tractor.clone()]);
        assert_eq!(session.progress().total, 2);

        let ticket = session.select_vehicle(tractor.id).unwrap().unwrap();
        session.apply_reload(ticket, Ok(catalog()));

        assert_eq!(session.sections().len(), 1);
        assert_eq!(session.sections()[0].category, "Safety");
        assert!(session.contains_item("1"));
        assert!(!session.contains_item("2"));
    }

    #[test]
    fn test_stale_reload_is_discarded() {
        let tractor = vehicle(VehicleKind::Tractor, "TR-1");
        let trailer = vehicle(VehicleKind::Trailer, "TL-1");
        let mut session = session_with(vec![tractor.clone(), trailer.clone()]);

        let first = session.select_vehicle(tractor.id).unwrap().unwrap();
        let second = session.select_vehicle(trailer.id).unwrap().unwrap();

        // second response arrives first, then the slow first one
        assert!(session.apply_reload(second, Ok(catalog())));
        assert!(!session.apply_reload(first, Ok(catalog())));

        // trailer view keeps both items
        assert_eq!(session.progress().total, 2);
        assert!(session.contains_item("2"));
    }

    #[test]
    fn test_failed_reload_leaves_sections_empty() {
        let mut session = session_with(Vec::new());
        let ticket = session
            .set_checklist_type(ChecklistType::Cargo)
            .unwrap()
            .unwrap();

        assert!(session.apply_reload(ticket, Err("catalog unavailable".to_string())));
        assert!(session.sections().is_empty());
        assert_eq!(session.load_error(), Some("catalog unavailable"));
        assert!(!session.is_loading());
        assert!(matches!(
            session.prepare_submission(),
            Err(AppError::LoadFailure(_))
        ));

        let retry = session.request_reload().unwrap();
        assert!(session.is_loading());
        assert_eq!(session.load_error(), None);
        assert!(session.apply_reload(retry, Ok(catalog())));
        assert_eq!(session.progress().total, 2);
    }

    #[test]
    fn test_answers_for_unknown_items_are_rejected() {
        let mut session = session_with(Vec::new());
        let result = session.set_status("42", AnswerStatus::Ok);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_submission_lock_blocks_edits_until_aborted() {
        let tractor = vehicle(VehicleKind::Tractor, "TR-1");
        let mut session = session_with(vec![tractor.clone()]);
        let ticket = session.select_vehicle(tractor.id).unwrap().unwrap();
        session.apply_reload(ticket, Ok(catalog()));
        session.set_status("1", AnswerStatus::Ok).unwrap();

        let submission = session.prepare_submission().unwrap();
        assert_eq!(submission.items.len(), 1);
        assert!(matches!(
            session.set_status("1", AnswerStatus::Problem),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            session.prepare_submission(),
            Err(AppError::Conflict(_))
        ));

        session.abort_submission();
        assert_eq!(session.answer("1").status, AnswerStatus::Ok);
        assert!(session.set_status("1", AnswerStatus::Problem).is_ok());
    }

    #[test]
    fn test_rejected_submission_does_not_lock_session() {
        let mut session = session_with(Vec::new());
        let result = session.prepare_submission();
        assert!(matches!(
            result,
            Err(AppError::Submission(SubmissionRejection::UnansweredItems(_)))
        ));
        assert!(session.set_status("1", AnswerStatus::Ok).is_ok());
    }
}
