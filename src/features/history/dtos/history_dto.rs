use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::checklists::models::ItemStatus;
use crate::features::definitions::models::ChecklistType;
use crate::features::history::models::{ChecklistStatus, CorrectiveAction, PersistedChecklist};
use crate::features::history::services::ReconciledItem;

/// One row of a driver's history
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSummaryDto {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub checklist_type: ChecklistType,
    pub status: ChecklistStatus,
    pub vehicle_id: Option<Uuid>,
    pub vehicle_plate: Option<String>,
    pub item_count: usize,
    pub problem_count: usize,
}

impl From<&PersistedChecklist> for ChecklistSummaryDto {
    fn from(c: &PersistedChecklist) -> Self {
        Self {
            id: c.id,
            date: c.date,
            checklist_type: c.checklist_type,
            status: c.status,
            vehicle_id: c.vehicle_id,
            vehicle_plate: c.vehicle_plate.clone(),
            item_count: c.items.len(),
            problem_count: c.problem_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CorrectiveActionDto {
    pub id: Uuid,
    pub item_id: String,
    pub corrected_by: String,
    pub action_taken: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CorrectiveAction> for CorrectiveActionDto {
    fn from(a: CorrectiveAction) -> Self {
        Self {
            id: a.id,
            item_id: a.item_id,
            corrected_by: a.corrected_by,
            action_taken: a.action_taken,
            verified: a.verified,
            created_at: a.created_at,
        }
    }
}

/// A stored item with its correction state
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledItemDto {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Display label: name, falling back to id
    pub label: String,
    /// Identifier to send when recording a correction for this item
    pub correction_key: Option<String>,
    pub status: ItemStatus,
    pub comment: Option<String>,
    pub photo: Option<String>,
    pub correction: Option<CorrectiveActionDto>,
    pub awaiting_correction: bool,
}

impl From<ReconciledItem> for ReconciledItemDto {
    fn from(r: ReconciledItem) -> Self {
        let awaiting_correction = r.awaiting_correction();
        let correction_key = r.item.correction_key().map(String::from);
        let item = r.item;

        Self {
            label: item
                .name
                .clone()
                .or_else(|| item.id.clone())
                .unwrap_or_default(),
            id: item.id,
            name: item.name,
            correction_key,
            status: item.status,
            comment: item.comment,
            photo: item.photo,
            correction: r.correction.map(CorrectiveActionDto::from),
            awaiting_correction,
        }
    }
}

/// A checklist with every item reconciled against its corrective actions
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistDetailDto {
    #[serde(flatten)]
    pub summary: ChecklistSummaryDto,
    /// False when corrective actions could not be loaded; no item is shown as corrected
    pub corrections_available: bool,
    pub items: Vec<ReconciledItemDto>,
}

impl ChecklistDetailDto {
    pub fn new(
        checklist: &PersistedChecklist,
        items: Vec<ReconciledItem>,
        corrections_available: bool,
    ) -> Self {
        Self {
            summary: checklist.into(),
            corrections_available,
            items: items.into_iter().map(ReconciledItemDto::from).collect(),
        }
    }
}

/// Request DTO for recording a corrective action
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordCorrectionDto {
    /// `correctionKey` of the item: its id, or its name for legacy items
    #[validate(length(min = 1, max = 500, message = "Item key must be 1-500 characters"))]
    pub item_key: String,

    #[validate(length(min = 1, max = 200, message = "Corrected by must be 1-200 characters"))]
    pub corrected_by: String,

    #[validate(length(max = 5000, message = "Action taken must not exceed 5000 characters"))]
    pub action_taken: String,
}
