use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for corrective action
///
/// `item_id` holds whichever identifier the item had when the action was
/// recorded: its stable id, or its name for legacy items.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CorrectiveAction {
    pub id: Uuid,
    pub checklist_id: Uuid,
    pub item_id: String,
    pub corrected_by: String,
    pub action_taken: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Data for recording a new corrective action
#[derive(Debug, Clone, PartialEq)]
pub struct NewCorrectiveAction {
    pub checklist_id: Uuid,
    pub item_id: String,
    pub corrected_by: String,
    pub action_taken: String,
}
