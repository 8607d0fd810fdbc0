mod corrective_action;
mod persisted_checklist;

pub use corrective_action::{CorrectiveAction, NewCorrectiveAction};
pub use persisted_checklist::{ChecklistStatus, PersistedChecklist, PersistedChecklistItem};
