use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::history::dtos::{ChecklistDetailDto, ChecklistSummaryDto};
use crate::features::history::models::{CorrectiveAction, PersistedChecklist};
use crate::modules::persistence::FleetStore;

use super::{reconcile, CorrectionEditor, CorrectionError};

/// Read side of submitted checklists and the corrections recorded on them
pub struct HistoryService {
    store: Arc<dyn FleetStore>,
}

impl HistoryService {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    /// A driver's checklists, newest first
    pub async fn list_for_driver(&self, driver_id: &str) -> Result<Vec<ChecklistSummaryDto>> {
        let mut checklists = self
            .store
            .load_checklist_history(driver_id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load history for driver {}: {:?}", driver_id, e);
                AppError::LoadFailure("Could not load checklist history".to_string())
            })?;

        checklists.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(checklists.iter().map(ChecklistSummaryDto::from).collect())
    }

    /// One checklist with each problem item matched to its corrective action
    ///
    /// Corrective actions are only fetched when the checklist has a problem
    /// item. When they cannot be loaded the checklist is still shown, with no
    /// item marked as corrected.
    pub async fn detail(&self, checklist_id: Uuid) -> Result<ChecklistDetailDto> {
        let checklist = self.load_checklist(checklist_id).await?;
        if !checklist.has_problems() {
            return Ok(ChecklistDetailDto::new(
                &checklist,
                reconcile(&checklist, &[]),
                true,
            ));
        }

        let (actions, corrections_available) =
            match self.store.load_corrective_actions(checklist_id).await {
                Ok(actions) => (actions, true),
                Err(e) => {
                    tracing::warn!(
                        "Corrective actions unavailable for checklist {}: {:?}",
                        checklist_id,
                        e
                    );
                    (Vec::new(), false)
                }
            };

        Ok(ChecklistDetailDto::new(
            &checklist,
            reconcile(&checklist, &actions),
            corrections_available,
        ))
    }

    /// Record the corrective action for one problem item
    ///
    /// Returns the reloaded detail so the item shows as corrected.
    pub async fn record_correction(
        &self,
        checklist_id: Uuid,
        item_key: &str,
        corrected_by: &str,
        action_taken: &str,
    ) -> Result<ChecklistDetailDto> {
        // refused before anything is loaded or stored
        if action_taken.trim().is_empty() {
            return Err(CorrectionError::EmptyText.into());
        }

        let mut editor = CorrectionEditor::new();
        editor.begin(item_key);
        editor.set_text(action_taken)?;

        let checklist = self.load_checklist(checklist_id).await?;
        let actions = self.load_actions(checklist_id).await?;
        let reconciled = reconcile(&checklist, &actions);

        let new_action = editor.commit(checklist_id, corrected_by, &reconciled)?;

        let saved = self
            .store
            .save_corrective_action(&new_action)
            .await
            .map_err(|e| match e {
                AppError::Conflict(message) => AppError::Conflict(message),
                other => {
                    tracing::error!(
                        "Failed to save corrective action for checklist {} item {}: {:?}",
                        checklist_id,
                        new_action.item_id,
                        other
                    );
                    AppError::CorrectionSaveFailure(format!(
                        "{}; please try again, your text was not lost",
                        other.detail()
                    ))
                }
            })?;
        editor.finish();

        tracing::info!(
            "Correction recorded: checklist={}, item={}, by={}",
            checklist_id,
            saved.item_id,
            saved.corrected_by
        );

        self.detail(checklist_id).await
    }

    async fn load_checklist(&self, checklist_id: Uuid) -> Result<PersistedChecklist> {
        self.store
            .load_checklist(checklist_id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load checklist {}: {:?}", checklist_id, e);
                AppError::LoadFailure("Could not load checklist".to_string())
            })?
            .ok_or_else(|| AppError::NotFound(format!("Checklist {} not found", checklist_id)))
    }

    async fn load_actions(&self, checklist_id: Uuid) -> Result<Vec<CorrectiveAction>> {
        self.store
            .load_corrective_actions(checklist_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to load corrective actions for checklist {}: {:?}",
                    checklist_id,
                    e
                );
                AppError::LoadFailure("Could not load corrective actions".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::checklists::models::ItemStatus;
    use crate::features::definitions::models::ChecklistType;
    use crate::features::history::models::{ChecklistStatus, PersistedChecklistItem};
    use crate::shared::test_helpers::InMemoryFleetStore;
    use chrono::{Duration, Utc};
    use std::sync::atomic::Ordering;

    fn item(id: Option<&str>, name: &str, status: ItemStatus) -> PersistedChecklistItem {
        PersistedChecklistItem {
            id: id.map(String::from),
            name: Some(name.to_string()),
            status,
            comment: None,
            photo: None,
        }
    }

    fn checklist(days_ago: i64, items: Vec<PersistedChecklistItem>) -> PersistedChecklist {
        PersistedChecklist {
            id: Uuid::new_v4(),
            date: Utc::now() - Duration::days(days_ago),
            checklist_type: ChecklistType::Maintenance,
            status: ChecklistStatus::Pending,
            vehicle_id: None,
            vehicle_plate: Some("ABC-1234".to_string()),
            items,
        }
    }

    fn action(checklist_id: Uuid, item_id: &str) -> CorrectiveAction {
        CorrectiveAction {
            id: Uuid::new_v4(),
            checklist_id,
            item_id: item_id.to_string(),
            corrected_by: "Mechanic".to_string(),
            action_taken: "done".to_string(),
            verified: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_history_is_newest_first() {
        let old = checklist(5, vec![item(Some("1"), "Tires", ItemStatus::Ok)]);
        let new = checklist(1, vec![item(Some("1"), "Tires", ItemStatus::Ok)]);
        let (old_id, new_id) = (old.id, new.id);
        let store = InMemoryFleetStore::new()
            .with_checklist("driver-1", old)
            .with_checklist("driver-1", new);
        let service = HistoryService::new(Arc::new(store));

        let history = service.list_for_driver("driver-1").await.unwrap();
        let ids: Vec<Uuid> = history.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![new_id, old_id]);
    }

    #[tokio::test]
    async fn test_history_failure_is_load_failure() {
        let store = InMemoryFleetStore::new();
        store.fail_history.store(true, Ordering::SeqCst);
        let service = HistoryService::new(Arc::new(store));

        assert!(matches!(
            service.list_for_driver("driver-1").await,
            Err(AppError::LoadFailure(_))
        ));
    }

    #[tokio::test]
    async fn test_legacy_item_correction_round_trip() {
        let list = checklist(
            2,
            vec![
                PersistedChecklistItem {
                    id: None,
                    name: Some("Oil".to_string()),
                    status: ItemStatus::Problem,
                    comment: Some("low".to_string()),
                    photo: Some("photo-1".to_string()),
                },
                item(Some("7"), "Horn", ItemStatus::Problem),
            ],
        );
        let id = list.id;
        let store = Arc::new(InMemoryFleetStore::new().with_checklist("driver-1", list));
        let service = HistoryService::new(store.clone());

        let before = service.detail(id).await.unwrap();
        assert!(before.items.iter().all(|i| i.awaiting_correction));

        let after = service
            .record_correction(id, "Oil", "Mechanic", "changed oil")
            .await
            .unwrap();

        let oil = after
            .items
            .iter()
            .find(|i| i.correction_key.as_deref() == Some("Oil"))
            .unwrap();
        assert!(!oil.awaiting_correction);
        assert_eq!(
            oil.correction.as_ref().map(|c| c.action_taken.as_str()),
            Some("changed oil")
        );
        assert_eq!(store.actions()[0].item_id, "Oil");

        let horn = after
            .items
            .iter()
            .find(|i| i.correction_key.as_deref() == Some("7"))
            .unwrap();
        assert!(horn.awaiting_correction);
    }

    #[tokio::test]
    async fn test_blank_correction_never_reaches_store() {
        let list = checklist(1, vec![item(Some("7"), "Horn", ItemStatus::Problem)]);
        let id = list.id;
        let store = Arc::new(InMemoryFleetStore::new().with_checklist("driver-1", list));
        let service = HistoryService::new(store.clone());

        let result = service.record_correction(id, "7", "Mechanic", "   ").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.actions().is_empty());
    }

    #[tokio::test]
    async fn test_second_correction_is_conflict() {
        let list = checklist(1, vec![item(Some("7"), "Horn", ItemStatus::Problem)]);
        let id = list.id;
        let store = InMemoryFleetStore::new()
            .with_checklist("driver-1", list)
            .with_action(action(id, "7"));
        let service = HistoryService::new(Arc::new(store));

        let result = service.record_correction(id, "7", "Mechanic", "again").await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        let list = checklist(1, vec![item(Some("7"), "Horn", ItemStatus::Problem)]);
        let id = list.id;
        let store = InMemoryFleetStore::new().with_checklist("driver-1", list);
        store.fail_save_action.store(true, Ordering::SeqCst);
        let service = HistoryService::new(Arc::new(store));

        let result = service.record_correction(id, "7", "Mechanic", "fixed").await;
        match result {
            Err(AppError::CorrectionSaveFailure(message)) => assert!(
                message.contains("corrective action storage unavailable"),
                "{}",
                message
            ),
            other => panic!("expected save failure, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_detail_without_problems_skips_actions() {
        let list = checklist(1, vec![item(Some("1"), "Tires", ItemStatus::Ok)]);
        let id = list.id;
        let store = InMemoryFleetStore::new().with_checklist("driver-1", list);
        store.fail_actions.store(true, Ordering::SeqCst);
        let service = HistoryService::new(Arc::new(store));

        let detail = service.detail(id).await.unwrap();
        assert!(detail.corrections_available);
        assert!(detail.items.iter().all(|i| !i.awaiting_correction));
    }

    #[tokio::test]
    async fn test_detail_survives_missing_actions() {
        let list = checklist(1, vec![item(Some("7"), "Horn", ItemStatus::Problem)]);
        let id = list.id;
        let store = InMemoryFleetStore::new()
            .with_checklist("driver-1", list)
            .with_action(action(id, "7"));
        store.fail_actions.store(true, Ordering::SeqCst);
        let service = HistoryService::new(Arc::new(store));

        let detail = service.detail(id).await.unwrap();
        assert!(!detail.corrections_available);
        assert!(detail.items[0].correction.is_none());

        assert!(matches!(
            service.detail(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
