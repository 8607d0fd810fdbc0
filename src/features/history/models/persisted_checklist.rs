use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::checklists::models::ItemStatus;
use crate::features::definitions::models::ChecklistType;

/// Checklist status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "checklist_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChecklistStatus {
    Completed,
    Pending,
}

/// A submitted checklist as read back from storage
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedChecklist {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub checklist_type: ChecklistType,
    pub status: ChecklistStatus,
    pub vehicle_id: Option<Uuid>,
    pub vehicle_plate: Option<String>,
    pub items: Vec<PersistedChecklistItem>,
}

/// A stored item. Legacy rows carry only `name`; newer rows carry both.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedChecklistItem {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: ItemStatus,
    pub comment: Option<String>,
    pub photo: Option<String>,
}

impl PersistedChecklistItem {
    /// Identifier a new corrective action is keyed by: `id`, else `name`
    pub fn correction_key(&self) -> Option<&str> {
        self.id
            .as_deref()
            .or(self.name.as_deref())
            .filter(|key| !key.is_empty())
    }

    /// Whether `identifier` names this item under either scheme
    pub fn is_identified_by(&self, identifier: &str) -> bool {
        self.id.as_deref() == Some(identifier) || self.name.as_deref() == Some(identifier)
    }

    pub fn is_problem(&self) -> bool {
        self.status == ItemStatus::Problem
    }
}

impl PersistedChecklist {
    pub fn has_problems(&self) -> bool {
        self.items.iter().any(PersistedChecklistItem::is_problem)
    }

    pub fn problem_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_problem()).count()
    }
}
