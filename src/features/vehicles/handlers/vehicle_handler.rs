use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::features::vehicles::dtos::VehicleResponseDto;
use crate::features::vehicles::services::VehicleService;
use crate::shared::types::{ApiResponse, Meta};

/// List the vehicles assigned to a driver
#[utoipa::path(
    get,
    path = "/api/drivers/{driver_id}/vehicles",
    params(
        ("driver_id" = String, Path, description = "Driver identifier")
    ),
    responses(
        (status = 200, description = "Candidate vehicles", body = ApiResponse<Vec<VehicleResponseDto>>),
        (status = 502, description = "Vehicles could not be loaded")
    ),
    tag = "vehicles"
)]
pub async fn list_driver_vehicles(
    State(service): State<Arc<VehicleService>>,
    Path(driver_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<VehicleResponseDto>>>> {
    let vehicles: Vec<VehicleResponseDto> = service
        .list_for_driver(&driver_id)
        .await?
        .into_iter()
        .map(VehicleResponseDto::from)
        .collect();
    let meta = Meta::total(vehicles.len());

    Ok(Json(ApiResponse::success(Some(vehicles), None, Some(meta))))
}
