use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::definitions::dtos::{ChecklistDefinitionsDto, DefinitionQuery};
use crate::features::definitions::services::DefinitionService;
use crate::shared::types::{ApiResponse, Meta};

/// Preview the sections of a checklist type
///
/// Stateless; no answers are recorded.
#[utoipa::path(
    get,
    path = "/api/checklists/definitions",
    params(DefinitionQuery),
    responses(
        (status = 200, description = "Filtered sections", body = ApiResponse<ChecklistDefinitionsDto>),
        (status = 400, description = "Invalid query"),
        (status = 502, description = "Definitions could not be loaded")
    ),
    tag = "definitions"
)]
pub async fn get_definitions(
    State(service): State<Arc<DefinitionService>>,
    Query(query): Query<DefinitionQuery>,
) -> Result<Json<ApiResponse<ChecklistDefinitionsDto>>> {
    let sections = service
        .sections(query.checklist_type, query.vehicle_kind)
        .await?;
    let dto = ChecklistDefinitionsDto::new(query.checklist_type, query.vehicle_kind, sections);
    let meta = Meta::total(dto.total_items);

    Ok(Json(ApiResponse::success(Some(dto), None, Some(meta))))
}
