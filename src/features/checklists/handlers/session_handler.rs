use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, ValidatedJson};
use crate::features::checklists::dtos::{
    ItemAnswerDto, SelectVehicleDto, SessionViewDto, SetChecklistTypeDto, SetCommentDto,
    SetPhotoDto, SetStatusDto, StartSessionDto, SubmissionResultDto, UploadPhotoDto,
};
use crate::features::checklists::services::{DriverIdentity, Progress, SessionService};
use crate::features::evidence::PhotoUpload;
use crate::shared::types::ApiResponse;

/// Start filling a checklist
///
/// Loads the driver's vehicles and the definitions for the checklist type.
#[utoipa::path(
    post,
    path = "/api/checklist-sessions",
    request_body = StartSessionDto,
    responses(
        (status = 201, description = "Session started", body = ApiResponse<SessionViewDto>),
        (status = 400, description = "Validation error"),
        (status = 502, description = "Vehicles could not be loaded")
    ),
    tag = "checklist-sessions"
)]
pub async fn start_session(
    State(service): State<Arc<SessionService>>,
    ValidatedJson(dto): ValidatedJson<StartSessionDto>,
) -> Result<(StatusCode, Json<ApiResponse<SessionViewDto>>)> {
    let driver = DriverIdentity {
        id: dto.driver_id.trim().to_string(),
        name: dto.driver_name.trim().to_string(),
    };
    let view = service.start(driver, dto.checklist_type).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(view), None, None)),
    ))
}

/// Get the sections, answers and progress of a session
#[utoipa::path(
    get,
    path = "/api/checklist-sessions/{id}",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session state", body = ApiResponse<SessionViewDto>),
        (status = 404, description = "Session not found")
    ),
    tag = "checklist-sessions"
)]
pub async fn get_session(
    State(service): State<Arc<SessionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SessionViewDto>>> {
    let view = service.view(id).await?;
    Ok(Json(ApiResponse::success(Some(view), None, None)))
}

/// Discard a session without submitting
#[utoipa::path(
    delete,
    path = "/api/checklist-sessions/{id}",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session discarded"),
        (status = 404, description = "Session not found")
    ),
    tag = "checklist-sessions"
)]
pub async fn discard_session(
    State(service): State<Arc<SessionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.discard(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Checklist session discarded".to_string()),
        None,
    )))
}

/// Select the vehicle being inspected
///
/// Changing the vehicle discards every answer and reloads the items.
#[utoipa::path(
    put,
    path = "/api/checklist-sessions/{id}/vehicle",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = SelectVehicleDto,
    responses(
        (status = 200, description = "Vehicle selected", body = ApiResponse<SessionViewDto>),
        (status = 404, description = "Session or vehicle not found"),
        (status = 409, description = "Session is being submitted")
    ),
    tag = "checklist-sessions"
)]
pub async fn select_vehicle(
    State(service): State<Arc<SessionService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<SelectVehicleDto>,
) -> Result<Json<ApiResponse<SessionViewDto>>> {
    let view = service.select_vehicle(id, dto.vehicle_id).await?;
    Ok(Json(ApiResponse::success(Some(view), None, None)))
}

/// Switch between maintenance and cargo checklists
///
/// Changing the type discards every answer and reloads the items.
#[utoipa::path(
    put,
    path = "/api/checklist-sessions/{id}/checklist-type",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = SetChecklistTypeDto,
    responses(
        (status = 200, description = "Checklist type changed", body = ApiResponse<SessionViewDto>),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Session is being submitted")
    ),
    tag = "checklist-sessions"
)]
pub async fn set_checklist_type(
    State(service): State<Arc<SessionService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<SetChecklistTypeDto>,
) -> Result<Json<ApiResponse<SessionViewDto>>> {
    let view = service.set_checklist_type(id, dto.checklist_type).await?;
    Ok(Json(ApiResponse::success(Some(view), None, None)))
}

/// Retry loading the checklist items
#[utoipa::path(
    post,
    path = "/api/checklist-sessions/{id}/reload",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Items reloaded; check loadError", body = ApiResponse<SessionViewDto>),
        (status = 404, description = "Session not found")
    ),
    tag = "checklist-sessions"
)]
pub async fn reload_definitions(
    State(service): State<Arc<SessionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SessionViewDto>>> {
    let view = service.reload(id).await?;
    Ok(Json(ApiResponse::success(Some(view), None, None)))
}

/// Mark an item OK or PROBLEM
#[utoipa::path(
    put,
    path = "/api/checklist-sessions/{id}/items/{item_id}/status",
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("item_id" = String, Path, description = "Item ID")
    ),
    request_body = SetStatusDto,
    responses(
        (status = 200, description = "Status recorded", body = ApiResponse<ItemAnswerDto>),
        (status = 404, description = "Session or item not found")
    ),
    tag = "checklist-sessions"
)]
pub async fn set_item_status(
    State(service): State<Arc<SessionService>>,
    Path((id, item_id)): Path<(Uuid, String)>,
    AppJson(dto): AppJson<SetStatusDto>,
) -> Result<Json<ApiResponse<ItemAnswerDto>>> {
    let answer = service.set_status(id, &item_id, dto.status).await?;
    Ok(Json(ApiResponse::success(Some(answer), None, None)))
}

/// Set the comment of an item
#[utoipa::path(
    put,
    path = "/api/checklist-sessions/{id}/items/{item_id}/comment",
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("item_id" = String, Path, description = "Item ID")
    ),
    request_body = SetCommentDto,
    responses(
        (status = 200, description = "Comment recorded", body = ApiResponse<ItemAnswerDto>),
        (status = 400, description = "Comment too long"),
        (status = 404, description = "Session or item not found")
    ),
    tag = "checklist-sessions"
)]
pub async fn set_item_comment(
    State(service): State<Arc<SessionService>>,
    Path((id, item_id)): Path<(Uuid, String)>,
    ValidatedJson(dto): ValidatedJson<SetCommentDto>,
) -> Result<Json<ApiResponse<ItemAnswerDto>>> {
    let answer = service.set_comment(id, &item_id, dto.comment).await?;
    Ok(Json(ApiResponse::success(Some(answer), None, None)))
}

/// Attach a photo reference to an item
#[utoipa::path(
    put,
    path = "/api/checklist-sessions/{id}/items/{item_id}/photo",
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("item_id" = String, Path, description = "Item ID")
    ),
    request_body = SetPhotoDto,
    responses(
        (status = 200, description = "Photo attached", body = ApiResponse<ItemAnswerDto>),
        (status = 400, description = "Blank reference"),
        (status = 404, description = "Session or item not found")
    ),
    tag = "checklist-sessions"
)]
pub async fn set_item_photo(
    State(service): State<Arc<SessionService>>,
    Path((id, item_id)): Path<(Uuid, String)>,
    ValidatedJson(dto): ValidatedJson<SetPhotoDto>,
) -> Result<Json<ApiResponse<ItemAnswerDto>>> {
    let answer = service.set_photo(id, &item_id, dto.photo).await?;
    Ok(Json(ApiResponse::success(Some(answer), None, None)))
}

/// Remove the photo of an item
#[utoipa::path(
    delete,
    path = "/api/checklist-sessions/{id}/items/{item_id}/photo",
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("item_id" = String, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Photo removed", body = ApiResponse<ItemAnswerDto>),
        (status = 404, description = "Session or item not found")
    ),
    tag = "checklist-sessions"
)]
pub async fn clear_item_photo(
    State(service): State<Arc<SessionService>>,
    Path((id, item_id)): Path<(Uuid, String)>,
) -> Result<Json<ApiResponse<ItemAnswerDto>>> {
    let answer = service.clear_photo(id, &item_id).await?;
    Ok(Json(ApiResponse::success(Some(answer), None, None)))
}

/// Upload a captured photo and attach it to an item
///
/// Accepts multipart/form-data with a single `photo` field.
#[utoipa::path(
    post,
    path = "/api/checklist-sessions/{id}/items/{item_id}/photo/upload",
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("item_id" = String, Path, description = "Item ID")
    ),
    request_body(
        content = UploadPhotoDto,
        content_type = "multipart/form-data",
        description = "Photo captured for the item",
    ),
    responses(
        (status = 201, description = "Photo stored and attached", body = ApiResponse<ItemAnswerDto>),
        (status = 400, description = "Missing, empty or unsupported photo"),
        (status = 404, description = "Session or item not found")
    ),
    tag = "checklist-sessions"
)]
pub async fn upload_item_photo(
    State(service): State<Arc<SessionService>>,
    Path((id, item_id)): Path<(Uuid, String)>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ItemAnswerDto>>)> {
    let mut upload: Option<PhotoUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();
        if field_name != "photo" {
            debug!("Ignoring unknown field: {}", field_name);
            continue;
        }

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read photo data: {}", e)))?;

        upload = Some(PhotoUpload {
            bytes: bytes.to_vec(),
            content_type,
        });
    }

    let upload = upload.ok_or_else(|| AppError::BadRequest("Photo is required".to_string()))?;
    let answer = service.upload_photo(id, &item_id, upload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(answer), None, None)),
    ))
}

/// Completion of the session
#[utoipa::path(
    get,
    path = "/api/checklist-sessions/{id}/progress",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Answered and total items", body = ApiResponse<Progress>),
        (status = 404, description = "Session not found")
    ),
    tag = "checklist-sessions"
)]
pub async fn get_progress(
    State(service): State<Arc<SessionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Progress>>> {
    let progress = service.progress(id).await?;
    Ok(Json(ApiResponse::success(Some(progress), None, None)))
}

/// Submit the checklist
///
/// Rejected with 422 and the offending item ids when items are unanswered,
/// problems lack a photo or comment, or no vehicle is selected.
#[utoipa::path(
    post,
    path = "/api/checklist-sessions/{id}/submit",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 201, description = "Checklist stored", body = ApiResponse<SubmissionResultDto>),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Already submitting or still loading"),
        (status = 422, description = "Checklist incomplete"),
        (status = 502, description = "Storage failed; answers kept")
    ),
    tag = "checklist-sessions"
)]
pub async fn submit_session(
    State(service): State<Arc<SessionService>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApiResponse<SubmissionResultDto>>)> {
    let result = service.submit(id).await?;
    let message = if result.problem_count > 0 {
        "Checklist submitted; problems await corrective action"
    } else {
        "Checklist submitted"
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(result),
            Some(message.to_string()),
            None,
        )),
    ))
}
