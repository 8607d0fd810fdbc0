use utoipa::{Modify, OpenApi};

use crate::features::checklists::{
    dtos as checklists_dtos, handlers as checklists_handlers, models as checklists_models,
    services::Progress,
};
use crate::features::definitions::{
    dtos as definitions_dtos, handlers as definitions_handlers, models as definitions_models,
};
use crate::features::history::{
    dtos as history_dtos, handlers as history_handlers, models as history_models,
};
use crate::features::vehicles::{
    dtos as vehicles_dtos, handlers as vehicles_handlers, models as vehicles_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Definitions
        definitions_handlers::get_definitions,
        // Vehicles
        vehicles_handlers::list_driver_vehicles,
        // Checklist sessions
        checklists_handlers::start_session,
        checklists_handlers::get_session,
        checklists_handlers::discard_session,
        checklists_handlers::select_vehicle,
        checklists_handlers::set_checklist_type,
        checklists_handlers::reload_definitions,
        checklists_handlers::set_item_status,
        checklists_handlers::set_item_comment,
        checklists_handlers::set_item_photo,
        checklists_handlers::clear_item_photo,
        checklists_handlers::upload_item_photo,
        checklists_handlers::get_progress,
        checklists_handlers::submit_session,
        // History
        history_handlers::list_driver_checklists,
        history_handlers::get_checklist,
        history_handlers::record_correction,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Definitions
            definitions_models::ChecklistType,
            definitions_models::VehicleScope,
            definitions_models::ChecklistItemDefinition,
            definitions_dtos::SectionDto,
            definitions_dtos::ChecklistDefinitionsDto,
            ApiResponse<definitions_dtos::ChecklistDefinitionsDto>,
            // Vehicles
            vehicles_models::VehicleKind,
            vehicles_dtos::VehicleResponseDto,
            ApiResponse<Vec<vehicles_dtos::VehicleResponseDto>>,
            // Checklist sessions
            checklists_models::AnswerStatus,
            checklists_models::PhotoRef,
            checklists_models::ItemStatus,
            Progress,
            checklists_dtos::StartSessionDto,
            checklists_dtos::SelectVehicleDto,
            checklists_dtos::SetChecklistTypeDto,
            checklists_dtos::SetStatusDto,
            checklists_dtos::SetCommentDto,
            checklists_dtos::SetPhotoDto,
            checklists_dtos::UploadPhotoDto,
            checklists_dtos::SessionItemDto,
            checklists_dtos::SessionSectionDto,
            checklists_dtos::SessionViewDto,
            checklists_dtos::ItemAnswerDto,
            checklists_dtos::SubmissionResultDto,
            ApiResponse<checklists_dtos::SessionViewDto>,
            ApiResponse<checklists_dtos::ItemAnswerDto>,
            ApiResponse<checklists_dtos::SubmissionResultDto>,
            ApiResponse<Progress>,
            // History
            history_models::ChecklistStatus,
            history_dtos::ChecklistSummaryDto,
            history_dtos::CorrectiveActionDto,
            history_dtos::ReconciledItemDto,
            history_dtos::ChecklistDetailDto,
            history_dtos::RecordCorrectionDto,
            ApiResponse<Vec<history_dtos::ChecklistSummaryDto>>,
            ApiResponse<history_dtos::ChecklistDetailDto>,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "definitions", description = "Checklist item catalog grouped into sections"),
        (name = "vehicles", description = "Vehicles a driver can inspect"),
        (name = "checklist-sessions", description = "Filling, progress and submission of checklists"),
        (name = "history", description = "Submitted checklists and corrective actions"),
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
