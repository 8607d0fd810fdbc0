use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::history::dtos::{
    ChecklistDetailDto, ChecklistSummaryDto, RecordCorrectionDto,
};
use crate::features::history::services::HistoryService;
use crate::shared::types::{ApiResponse, Meta};

/// List a driver's submitted checklists, newest first
#[utoipa::path(
    get,
    path = "/api/drivers/{driver_id}/checklists",
    params(
        ("driver_id" = String, Path, description = "Driver identifier")
    ),
    responses(
        (status = 200, description = "Checklist history", body = ApiResponse<Vec<ChecklistSummaryDto>>),
        (status = 502, description = "History could not be loaded")
    ),
    tag = "history"
)]
pub async fn list_driver_checklists(
    State(service): State<Arc<HistoryService>>,
    Path(driver_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ChecklistSummaryDto>>>> {
    let history = service.list_for_driver(&driver_id).await?;
    let meta = Meta::total(history.len());
    Ok(Json(ApiResponse::success(Some(history), None, Some(meta))))
}

/// Get a checklist with its corrective actions
#[utoipa::path(
    get,
    path = "/api/checklists/{id}",
    params(("id" = Uuid, Path, description = "Checklist ID")),
    responses(
        (status = 200, description = "Checklist detail", body = ApiResponse<ChecklistDetailDto>),
        (status = 404, description = "Checklist not found")
    ),
    tag = "history"
)]
pub async fn get_checklist(
    State(service): State<Arc<HistoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ChecklistDetailDto>>> {
    let detail = service.detail(id).await?;
    Ok(Json(ApiResponse::success(Some(detail), None, None)))
}

/// Record the corrective action taken for a problem item
///
/// Returns the reloaded checklist.
#[utoipa::path(
    post,
    path = "/api/checklists/{id}/corrections",
    params(("id" = Uuid, Path, description = "Checklist ID")),
    request_body = RecordCorrectionDto,
    responses(
        (status = 201, description = "Correction recorded", body = ApiResponse<ChecklistDetailDto>),
        (status = 400, description = "Empty text or item not a problem"),
        (status = 404, description = "Checklist or item not found"),
        (status = 409, description = "Item already corrected"),
        (status = 502, description = "Correction could not be saved")
    ),
    tag = "history"
)]
pub async fn record_correction(
    State(service): State<Arc<HistoryService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<RecordCorrectionDto>,
) -> Result<(StatusCode, Json<ApiResponse<ChecklistDetailDto>>)> {
    let detail = service
        .record_correction(id, &dto.item_key, &dto.corrected_by, &dto.action_taken)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(detail),
            Some("Corrective action recorded".to_string()),
            None,
        )),
    ))
}
