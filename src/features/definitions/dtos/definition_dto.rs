use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::definitions::models::{
    ChecklistItemDefinition, ChecklistSection, ChecklistType,
};
use crate::features::vehicles::models::VehicleKind;

/// Query params for previewing a checklist
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DefinitionQuery {
    pub checklist_type: ChecklistType,
    /// Narrows maintenance checklists to items for this kind of vehicle
    pub vehicle_kind: Option<VehicleKind>,
}

/// One category of items
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionDto {
    pub category: String,
    pub items: Vec<ChecklistItemDefinition>,
}

impl From<ChecklistSection> for SectionDto {
    fn from(section: ChecklistSection) -> Self {
        Self {
            category: section.category,
            items: section.items,
        }
    }
}

impl From<&ChecklistSection> for SectionDto {
    fn from(section: &ChecklistSection) -> Self {
        section.clone().into()
    }
}

/// Sections for one checklist type
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistDefinitionsDto {
    pub checklist_type: ChecklistType,
    pub vehicle_kind: Option<VehicleKind>,
    pub total_items: usize,
    pub sections: Vec<SectionDto>,
}

impl ChecklistDefinitionsDto {
    pub fn new(
        checklist_type: ChecklistType,
        vehicle_kind: Option<VehicleKind>,
        sections: Vec<ChecklistSection>,
    ) -> Self {
        Self {
            checklist_type,
            vehicle_kind,
            total_items: sections.iter().map(|s| s.items.len()).sum(),
            sections: sections.into_iter().map(SectionDto::from).collect(),
        }
    }
}
