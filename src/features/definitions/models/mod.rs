mod item_definition;
mod section;

pub use item_definition::{ChecklistItemDefinition, ChecklistType, VehicleScope};
pub use section::{all_items, ChecklistSection};
