use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Vehicle kind enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "vehicle_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleKind {
    Tractor,
    Trailer,
}

impl std::fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleKind::Tractor => write!(f, "TRACTOR"),
            VehicleKind::Trailer => write!(f, "TRAILER"),
        }
    }
}

/// Database model for vehicle
///
/// `brand`, `model` and `year` describe tractors; `trailer_type` and
/// `axle_count` describe trailers. Either group may be empty.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Vehicle {
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
