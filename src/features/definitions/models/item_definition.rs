use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

use crate::features::vehicles::models::VehicleKind;
use crate::shared::constants::DEFAULT_CATEGORY;

/// Checklist type enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "checklist_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChecklistType {
    Maintenance,
    Cargo,
}

impl std::fmt::Display for ChecklistType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChecklistType::Maintenance => write!(f, "MAINTENANCE"),
            ChecklistType::Cargo => write!(f, "CARGO"),
        }
    }
}

/// Eligibility tag restricting a definition to a kind of vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "vehicle_scope", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleScope {
    All,
    Truck,
    Trailer,
}

impl VehicleScope {
    /// Whether an item carrying this scope applies to the given vehicle kind
    pub fn admits(self, kind: VehicleKind) -> bool {
        match self {
            VehicleScope::All => true,
            VehicleScope::Truck => kind == VehicleKind::Tractor,
            VehicleScope::Trailer => kind == VehicleKind::Trailer,
        }
    }
}

/// Catalog entry for one checklist item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItemDefinition {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub vehicle_scope: Option<VehicleScope>,
}

impl ChecklistItemDefinition {
    /// Section label for this item; blank or missing categories fall into "General"
    pub fn category_label(&self) -> &str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    /// Unset scope behaves like `ALL`
    pub fn applies_to(&self, kind: VehicleKind) -> bool {
        match self.vehicle_scope {
            Some(scope) => scope.admits(kind),
            None => true,
        }
    }
}
