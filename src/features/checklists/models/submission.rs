use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::definitions::models::ChecklistType;

use super::PhotoRef;

/// Status of a submitted item, matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "item_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    Ok,
    Problem,
}

/// One answered item as handed to persistence
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionItem {
    pub item_id: String,
    /// Item name copied at submission time so history survives catalog edits
    pub label: String,
    pub status: ItemStatus,
    pub photo: Option<PhotoRef>,
    pub comment: String,
}

impl SubmissionItem {
    /// Comment exactly as typed; `None` only when nothing was entered
    pub fn stored_comment(&self) -> Option<&str> {
        Some(self.comment.as_str()).filter(|c| !c.is_empty())
    }
}

/// Complete checklist sent to persistence in one call
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSubmission {
    pub vehicle_id: Uuid,
    pub driver_id: String,
    pub driver_name: String,
    pub checklist_type: ChecklistType,
    pub items: Vec<SubmissionItem>,
}

impl ChecklistSubmission {
    pub fn has_problems(&self) -> bool {
        self.items
            .iter()
            .any(|item| item.status == ItemStatus::Problem)
    }
}
