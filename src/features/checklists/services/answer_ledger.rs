use std::collections::HashMap;

use crate::features::checklists::models::{AnswerEntry, AnswerStatus, PhotoRef};

/// Per-item answers captured during one checklist-filling session
///
/// Entries are created lazily on the first write. Reads of an item that was
/// never touched return the default (unanswered, no photo, empty comment).
#[derive(Debug, Clone, Default)]
pub struct AnswerLedger {
    entries: HashMap<String, AnswerEntry>,
}

impl AnswerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_mut(&mut self, item_id: &str) -> &mut AnswerEntry {
        self.entries.entry(item_id.to_string()).or_default()
    }

    /// Overwrite the status; previously captured photo and comment are kept
    pub fn set_status(&mut self, item_id: &str, status: AnswerStatus) {
        self.entry_mut(item_id).status = status;
    }

    pub fn set_photo(&mut self, item_id: &str, photo: PhotoRef) {
        self.entry_mut(item_id).photo = Some(photo);
    }

    pub fn clear_photo(&mut self, item_id: &str) {
        if let Some(entry) = self.entries.get_mut(item_id) {
            entry.photo = None;
        }
    }

    pub fn set_comment(&mut self, item_id: &str, comment: impl Into<String>) {
        self.entry_mut(item_id).comment = comment.into();
    }

    /// Snapshot of an item's answer
    pub fn entry(&self, item_id: &str) -> AnswerEntry {
        self.entries.get(item_id).cloned().unwrap_or_default()
    }

    pub fn status(&self, item_id: &str) -> AnswerStatus {
        self.entries
            .get(item_id)
            .map(|entry| entry.status)
            .unwrap_or_default()
    }

    /// Drop every entry
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count items among `item_ids` with a non-unanswered status
    pub fn answered_count<'a>(&self, item_ids: impl IntoIterator<Item = &'a str>) -> usize {
        item_ids
            .into_iter()
            .filter(|id| self.status(id).is_answered())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(reference: &str) -> PhotoRef {
        PhotoRef::new(reference).unwrap()
    }

    #[test]
    fn test_missing_item_reads_as_default() {
        let ledger = AnswerLedger::new();

        assert_eq!(ledger.status("nope"), AnswerStatus::Unanswered);
        assert_eq!(ledger.entry("nope"), AnswerEntry::default());
        assert!(ledger.entry("nope").comment.is_empty());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_status_switch_preserves_evidence() {
        let mut ledger = AnswerLedger::new();
        ledger.set_status("5", AnswerStatus::Problem);
        ledger.set_photo("5", photo("photo-5"));
        ledger.set_comment("5", "cracked");

        ledger.set_status("5", AnswerStatus::Ok);
        ledger.set_status("5", AnswerStatus::Problem);

        let entry = ledger.entry("5");
        assert_eq!(entry.status, AnswerStatus::Problem);
        assert_eq!(entry.photo, Some(photo("photo-5")));
        assert_eq!(entry.comment, "cracked");
    }

    #[test]
    fn test_evidence_can_be_attached_without_status() {
        let mut ledger = AnswerLedger::new();
        ledger.set_photo("7", photo("photo-7"));
        ledger.set_comment("8", "fine");

        assert_eq!(ledger.status("7"), AnswerStatus::Unanswered);
        assert_eq!(ledger.entry("7").photo, Some(photo("photo-7")));
        assert_eq!(ledger.entry("8").comment, "fine");
    }

    #[test]
    fn test_clear_photo_keeps_status_and_comment() {
        let mut ledger = AnswerLedger::new();
        ledger.set_status("1", AnswerStatus::Ok);
        ledger.set_comment("1", "scratch");
        ledger.set_photo("1", photo("p"));

        ledger.clear_photo("1");
        ledger.clear_photo("unknown");

        let entry = ledger.entry("1");
        assert_eq!(entry.photo, None);
        assert_eq!(entry.status, AnswerStatus::Ok);
        assert_eq!(entry.comment, "scratch");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut ledger = AnswerLedger::new();
        ledger.set_status("1", AnswerStatus::Ok);
        ledger.set_status("2", AnswerStatus::Problem);

        ledger.reset();

        assert!(ledger.is_empty());
        assert_eq!(ledger.status("1"), AnswerStatus::Unanswered);
        assert_eq!(ledger.answered_count(["1", "2"]), 0);
    }

    #[test]
    fn test_answered_count() {
        let mut ledger = AnswerLedger::new();
        ledger.set_status("1", AnswerStatus::Ok);
        ledger.set_status("2", AnswerStatus::Problem);
        ledger.set_status("3", AnswerStatus::Unanswered);
        ledger.set_comment("4", "only a comment");

        assert_eq!(ledger.answered_count(["1", "2", "3", "4", "5"]), 2);
    }
}
