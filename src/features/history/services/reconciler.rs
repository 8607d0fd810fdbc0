//! Matches corrective actions back to the checklist items they fix.
//!
//! Items are addressed by `id` when they have one and by `name` otherwise;
//! legacy rows never got an `id`, so both keys are checked on every match.

use thiserror::Error;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::features::history::models::{
    CorrectiveAction, NewCorrectiveAction, PersistedChecklist, PersistedChecklistItem,
};

/// A stored item together with the action that corrected it, if any
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledItem {
    pub item: PersistedChecklistItem,
    pub correction: Option<CorrectiveAction>,
}

impl ReconciledItem {
    /// Problem item with no action yet; offered for a new correction
    pub fn awaiting_correction(&self) -> bool {
        self.item.is_problem() && self.correction.is_none() && self.item.correction_key().is_some()
    }
}

/// First action whose item identifier names `item` by id or by name
pub fn find_correction<'a>(
    item: &PersistedChecklistItem,
    actions: &'a [CorrectiveAction],
) -> Option<&'a CorrectiveAction> {
    actions
        .iter()
        .find(|action| item.is_identified_by(&action.item_id))
}

/// Pair every item of a checklist with its corrective action
///
/// Only problem items are matched; OK items never carry a correction.
pub fn reconcile(checklist: &PersistedChecklist, actions: &[CorrectiveAction]) -> Vec<ReconciledItem> {
    checklist
        .items
        .iter()
        .map(|item| ReconciledItem {
            item: item.clone(),
            correction: if item.is_problem() {
                find_correction(item, actions).cloned()
            } else {
                None
            },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorrectionError {
    #[error("No correction is being edited")]
    NotEditing,

    #[error("Describe the corrective action taken")]
    EmptyText,

    #[error("Name of the person who corrected the item is required")]
    MissingCorrector,

    #[error("Item {0} is not part of this checklist")]
    UnknownItem(String),

    #[error("Item {0} was not reported as a problem")]
    NotAProblem(String),

    #[error("Item {0} already has a corrective action")]
    AlreadyCorrected(String),
}

impl From<CorrectionError> for AppError {
    fn from(err: CorrectionError) -> Self {
        match err {
            CorrectionError::NotEditing => AppError::BadRequest(err.to_string()),
            CorrectionError::EmptyText | CorrectionError::MissingCorrector => {
                AppError::Validation(err.to_string())
            }
            CorrectionError::UnknownItem(_) => AppError::NotFound(err.to_string()),
            CorrectionError::NotAProblem(_) => AppError::BadRequest(err.to_string()),
            CorrectionError::AlreadyCorrected(_) => AppError::Conflict(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CorrectionDraft {
    item_key: String,
    text: String,
}

/// Holds the single correction currently being written
///
/// The HTTP API records one item per request, so handlers build a fresh
/// editor each time and the draft never outlives the request.
#[derive(Debug, Clone, Default)]
pub struct CorrectionEditor {
    draft: Option<CorrectionDraft>,
}

impl CorrectionEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `item_key`. Unsaved text for a different item is dropped.
    pub fn begin(&mut self, item_key: impl Into<String>) {
        let item_key = item_key.into();
        if self.editing_item() == Some(item_key.as_str()) {
            return;
        }
        self.draft = Some(CorrectionDraft {
            item_key,
            text: String::new(),
        });
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), CorrectionError> {
        let draft = self.draft.as_mut().ok_or(CorrectionError::NotEditing)?;
        draft.text = text.into();
        Ok(())
    }

    pub fn editing_item(&self) -> Option<&str> {
        self.draft.as_ref().map(|d| d.item_key.as_str())
    }

    /// Validate the draft against the reconciled items and build the record
    ///
    /// The draft is kept so a failed save can be retried with the same text;
    /// call [`CorrectionEditor::finish`] once the save succeeded.
    pub fn commit(
        &self,
        checklist_id: Uuid,
        corrected_by: &str,
        items: &[ReconciledItem],
    ) -> Result<NewCorrectiveAction, CorrectionError> {
        let draft = self.draft.as_ref().ok_or(CorrectionError::NotEditing)?;

        let action_taken = draft.text.trim();
        if action_taken.is_empty() {
            return Err(CorrectionError::EmptyText);
        }

        let corrected_by = corrected_by.trim();
        if corrected_by.is_empty() {
            return Err(CorrectionError::MissingCorrector);
        }

        let target = items
            .iter()
            .find(|reconciled| reconciled.item.correction_key() == Some(draft.item_key.as_str()))
            .ok_or_else(|| CorrectionError::UnknownItem(draft.item_key.clone()))?;

        if !target.item.is_problem() {
            return Err(CorrectionError::NotAProblem(draft.item_key.clone()));
        }
        if target.correction.is_some() {
            return Err(CorrectionError::AlreadyCorrected(draft.item_key.clone()));
        }

        Ok(NewCorrectiveAction {
            checklist_id,
            item_id: draft.item_key.clone(),
            corrected_by: corrected_by.to_string(),
            action_taken: action_taken.to_string(),
        })
    }

    /// Drop the draft after it was persisted
    pub fn finish(&mut self) {
        self.draft = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::checklists::models::ItemStatus;
    use crate::features::definitions::models::ChecklistType;
    use crate::features::history::models::ChecklistStatus;
    use chrono::Utc;

    fn item(id: Option<&str>, name: Option<&str>, status: ItemStatus) -> PersistedChecklistItem {
        PersistedChecklistItem {
            id: id.map(String::from),
            name: name.map(String::from),
            status,
            comment: None,
            photo: None,
        }
    }

    fn checklist(items: Vec<PersistedChecklistItem>) -> PersistedChecklist {
        PersistedChecklist {
            id: Uuid::new_v4(),
            date: Utc::now(),
            checklist_type: ChecklistType::Maintenance,
            status: ChecklistStatus::Pending,
            vehicle_id: None,
            vehicle_plate: None,
            items,
        }
    }

    fn action(checklist_id: Uuid, item_id: &str, text: &str) -> CorrectiveAction {
        CorrectiveAction {
            id: Uuid::new_v4(),
            checklist_id,
            item_id: item_id.to_string(),
            corrected_by: "Mechanic".to_string(),
            action_taken: text.to_string(),
            verified: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_matches_by_id() {
        let list = checklist(vec![item(Some("7"), Some("Brakes"), ItemStatus::Problem)]);
        let actions = vec![action(list.id, "7", "replaced pads")];

        let reconciled = reconcile(&list, &actions);
        assert_eq!(
            reconciled[0].correction.as_ref().map(|a| a.action_taken.as_str()),
            Some("replaced pads")
        );
        assert!(!reconciled[0].awaiting_correction());
    }

    #[test]
    fn test_legacy_item_matches_by_name() {
        let list = checklist(vec![
            item(None, Some("Oil"), ItemStatus::Problem),
            item(None, Some("Tires"), ItemStatus::Ok),
        ]);
        let actions = vec![action(list.id, "Oil", "topped up oil")];

        let reconciled = reconcile(&list, &actions);

        let oil = &reconciled[0];
        assert_eq!(
            oil.correction.as_ref().map(|a| a.action_taken.as_str()),
            Some("topped up oil")
        );
        assert!(!oil.awaiting_correction());
        assert!(!reconciled[1].awaiting_correction());
    }

    #[test]
    fn test_action_keyed_by_name_matches_item_with_id() {
        let list = checklist(vec![item(Some("12"), Some("Mirrors"), ItemStatus::Problem)]);
        let actions = vec![action(list.id, "Mirrors", "adjusted")];

        assert!(reconcile(&list, &actions)[0].correction.is_some());
    }

    #[test]
    fn test_unmatched_problem_awaits_correction() {
        let list = checklist(vec![
            item(Some("1"), Some("Horn"), ItemStatus::Problem),
            item(Some("2"), Some("Lights"), ItemStatus::Problem),
        ]);
        let actions = vec![action(list.id, "2", "bulb replaced")];

        let reconciled = reconcile(&list, &actions);
        assert!(reconciled[0].awaiting_correction());
        assert!(!reconciled[1].awaiting_correction());
    }

    #[test]
    fn test_ok_items_never_carry_corrections() {
        let list = checklist(vec![item(Some("3"), Some("Seat"), ItemStatus::Ok)]);
        let actions = vec![action(list.id, "3", "noop")];

        let reconciled = reconcile(&list, &actions);
        assert!(reconciled[0].correction.is_none());
        assert!(!reconciled[0].awaiting_correction());
    }

    #[test]
    fn test_correction_key_prefers_id() {
        assert_eq!(
            item(Some("9"), Some("Wipers"), ItemStatus::Problem).correction_key(),
            Some("9")
        );
        assert_eq!(
            item(None, Some("Wipers"), ItemStatus::Problem).correction_key(),
            Some("Wipers")
        );
        assert_eq!(item(None, None, ItemStatus::Problem).correction_key(), None);
    }

    #[test]
    fn test_editor_builds_action_for_legacy_item() {
        let list = checklist(vec![item(None, Some("Oil"), ItemStatus::Problem)]);
        let reconciled = reconcile(&list, &[]);

        let mut editor = CorrectionEditor::new();
        editor.begin("Oil");
        editor.set_text("  changed oil filter ").unwrap();

        let new_action = editor.commit(list.id, "Ana", &reconciled).unwrap();
        assert_eq!(
            new_action,
            NewCorrectiveAction {
                checklist_id: list.id,
                item_id: "Oil".to_string(),
                corrected_by: "Ana".to_string(),
                action_taken: "changed oil filter".to_string(),
            }
        );
        // kept until the save is confirmed
        assert_eq!(editor.editing_item(), Some("Oil"));
        editor.finish();
        assert_eq!(editor.editing_item(), None);
    }

    #[test]
    fn test_editor_rejects_blank_text() {
        let list = checklist(vec![item(Some("1"), Some("Horn"), ItemStatus::Problem)]);
        let reconciled = reconcile(&list, &[]);

        let mut editor = CorrectionEditor::new();
        editor.begin("1");
        editor.set_text(" \t ").unwrap();

        assert_eq!(
            editor.commit(list.id, "Ana", &reconciled),
            Err(CorrectionError::EmptyText)
        );
    }

    #[test]
    fn test_switching_items_abandons_unsaved_text() {
        let list = checklist(vec![
            item(Some("1"), Some("Horn"), ItemStatus::Problem),
            item(Some("2"), Some("Mirror"), ItemStatus::Problem),
        ]);
        let reconciled = reconcile(&list, &[]);

        let mut editor = CorrectionEditor::new();
        editor.begin("1");
        editor.set_text("half written").unwrap();

        editor.begin("1");
        assert_eq!(
            editor.commit(list.id, "Ana", &reconciled).map(|a| a.action_taken),
            Ok("half written".to_string())
        );

        editor.begin("2");
        assert_eq!(editor.editing_item(), Some("2"));
        assert_eq!(
            editor.commit(list.id, "Ana", &reconciled),
            Err(CorrectionError::EmptyText)
        );
    }

    #[test]
    fn test_editor_refuses_second_correction() {
        let list = checklist(vec![item(None, Some("Oil"), ItemStatus::Problem)]);
        let actions = vec![action(list.id, "Oil", "done")];
        let reconciled = reconcile(&list, &actions);

        let mut editor = CorrectionEditor::new();
        editor.begin("Oil");
        editor.set_text("again").unwrap();

        assert_eq!(
            editor.commit(list.id, "Ana", &reconciled),
            Err(CorrectionError::AlreadyCorrected("Oil".to_string()))
        );
    }

    #[test]
    fn test_editor_requires_problem_item() {
        let list = checklist(vec![item(Some("1"), Some("Horn"), ItemStatus::Ok)]);
        let reconciled = reconcile(&list, &[]);

        let mut editor = CorrectionEditor::new();
        assert_eq!(editor.set_text("x"), Err(CorrectionError::NotEditing));

        editor.begin("1");
        editor.set_text("fixed").unwrap();
        assert_eq!(
            editor.commit(list.id, "Ana", &reconciled),
            Err(CorrectionError::NotAProblem("1".to_string()))
        );

        editor.begin("404");
        editor.set_text("fixed").unwrap();
        assert_eq!(
            editor.commit(list.id, "Ana", &reconciled),
            Err(CorrectionError::UnknownItem("404".to_string()))
        );

        editor.finish();
        assert_eq!(
            editor.commit(list.id, "Ana", &reconciled),
            Err(CorrectionError::NotEditing)
        );
    }
}
