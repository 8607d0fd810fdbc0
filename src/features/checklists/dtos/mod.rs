mod session_dto;

pub use session_dto::{
    ItemAnswerDto, SelectVehicleDto, SessionItemDto, SessionSectionDto, SessionViewDto,
    SetChecklistTypeDto, SetCommentDto, SetPhotoDto, SetStatusDto, StartSessionDto,
    SubmissionResultDto, UploadPhotoDto,
};
