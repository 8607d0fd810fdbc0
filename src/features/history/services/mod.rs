mod history_service;
mod reconciler;

pub use history_service::HistoryService;
pub use reconciler::{reconcile, CorrectionEditor, CorrectionError, ReconciledItem};
