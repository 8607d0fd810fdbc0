//! Turns a raw definition catalog into the sections shown to a driver.
//!
//! Maintenance checklists are narrowed to the items that apply to the
//! selected vehicle. Cargo checklists always show the whole catalog, whatever
//! scope the definitions carry.

use std::collections::HashMap;

use crate::features::definitions::models::{
    ChecklistItemDefinition, ChecklistSection, ChecklistType,
};
use crate::features::vehicles::models::VehicleKind;

/// Drop definitions whose scope does not match the selected vehicle
///
/// Only applies to maintenance checklists with a vehicle selected; every other
/// combination returns the definitions untouched.
pub fn filter_definitions(
    checklist_type: ChecklistType,
    vehicle_kind: Option<VehicleKind>,
    definitions: Vec<ChecklistItemDefinition>,
) -> Vec<ChecklistItemDefinition> {
    match (checklist_type, vehicle_kind) {
        (ChecklistType::Maintenance, Some(kind)) => definitions
            .into_iter()
            .filter(|definition| definition.applies_to(kind))
            .collect(),
        _ => definitions,
    }
}

/// Group definitions by category label
///
/// Sections appear in the order their category is first seen; items keep
/// their relative order inside a section.
pub fn group_into_sections(definitions: Vec<ChecklistItemDefinition>) -> Vec<ChecklistSection> {
    let mut sections: Vec<ChecklistSection> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for definition in definitions {
        let label = definition.category_label().to_string();
        match positions.get(&label) {
            Some(&index) => sections[index].items.push(definition),
            None => {
                positions.insert(label.clone(), sections.len());
                sections.push(ChecklistSection {
                    category: label,
                    items: vec![definition],
                });
            }
        }
    }

    sections
}

/// Filter then group
pub fn build_sections(
    checklist_type: ChecklistType,
    vehicle_kind: Option<VehicleKind>,
    definitions: Vec<ChecklistItemDefinition>,
) -> Vec<ChecklistSection> {
    group_into_sections(filter_definitions(
        checklist_type,
        vehicle_kind,
        definitions,
    ))
}
