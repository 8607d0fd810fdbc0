use serde::Serialize;

use super::ChecklistItemDefinition;

/// Items sharing one category label, in catalog order. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistSection {
    pub category: String,
    pub items: Vec<ChecklistItemDefinition>,
}

impl ChecklistSection {
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }
}

/// Iterate every item across sections, section order first
pub fn all_items(sections: &[ChecklistSection]) -> impl Iterator<Item = &ChecklistItemDefinition> {
    sections.iter().flat_map(|section| section.items.iter())
}
