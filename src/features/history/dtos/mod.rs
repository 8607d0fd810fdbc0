mod history_dto;

pub use history_dto::{
    ChecklistDetailDto, ChecklistSummaryDto, CorrectiveActionDto, ReconciledItemDto,
    RecordCorrectionDto,
};
