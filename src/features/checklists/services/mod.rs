mod answer_ledger;
mod progress;
mod session;
mod session_service;
mod submission_assembler;

pub use answer_ledger::AnswerLedger;
pub use progress::{compute_progress, Progress};
pub use session::{ChecklistSession, ReloadTicket};
pub use session_service::SessionService;
pub use submission_assembler::{assemble_submission, DriverIdentity, SubmissionRejection};
