use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ItemStatus;

/// Answer state of one checklist item during a filling session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnswerStatus {
    #[default]
    Unanswered,
    Ok,
    Problem,
}

impl AnswerStatus {
    pub fn is_answered(self) -> bool {
        self != AnswerStatus::Unanswered
    }

    /// Persisted status for an answered item; `None` while unanswered
    pub fn to_item_status(self) -> Option<ItemStatus> {
        match self {
            AnswerStatus::Unanswered => None,
            AnswerStatus::Ok => Some(ItemStatus::Ok),
            AnswerStatus::Problem => Some(ItemStatus::Problem),
        }
    }
}

/// Opaque reference to a captured photo (object URL or blob key)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PhotoRef(String);

impl PhotoRef {
    /// Blank references are treated as no photo at all
    pub fn new(reference: impl Into<String>) -> Option<Self> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            None
        } else {
            Some(Self(reference))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Captured answer for one item
#[derive(Debug, Clone, PartialEq, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub status: AnswerStatus,
    pub photo: Option<PhotoRef>,
    pub comment: String,
}

impl AnswerEntry {
    /// A problem needs a photo and a comment with visible text
    pub fn has_required_evidence(&self) -> bool {
        self.photo.is_some() && !self.comment.trim().is_empty()
    }
}
