use serde::Serialize;
use utoipa::ToSchema;

use crate::features::definitions::models::{all_items, ChecklistSection};

use super::AnswerLedger;

/// Completion of a checklist-filling session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// `completed / total`, or 0 for an empty checklist
    pub ratio: f64,
}

/// Derive progress from the ledger and the current sections. Not cached.
pub fn compute_progress(ledger: &AnswerLedger, sections: &[ChecklistSection]) -> Progress {
    let total = all_items(sections).count();
    let completed = ledger.answered_count(all_items(sections).map(|item| item.id.as_str()));
    let ratio = if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64
    };

    Progress {
        completed,
        total,
        ratio,
    }
}
