mod answer;
mod submission;

pub use answer::{AnswerEntry, AnswerStatus, PhotoRef};
pub use submission::{ChecklistSubmission, ItemStatus, SubmissionItem};
