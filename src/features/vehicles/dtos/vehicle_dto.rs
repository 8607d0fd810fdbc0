use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::vehicles::models::{Vehicle, VehicleKind};

/// Response DTO for vehicle
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponseDto {
    pub id: Uuid,
    pub plate: String,
    pub kind: VehicleKind,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub trailer_type: Option<String>,
    pub axle_count: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<&Vehicle> for VehicleResponseDto {
    fn from(v: &Vehicle) -> Self {
        Self {
            id: v.id,
            plate: v.plate.clone(),
            kind: v.kind,
            brand: v.brand.clone(),
            model: v.model.clone(),
            year: v.year,
            trailer_type: v.trailer_type.clone(),
            axle_count: v.axle_count,
            created_at: v.created_at,
        }
    }
}

impl From<Vehicle> for VehicleResponseDto {
    fn from(v: Vehicle) -> Self {
        (&v).into()
    }
}
