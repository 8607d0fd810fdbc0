pub mod checklists;
pub mod definitions;
pub mod evidence;
pub mod history;
pub mod vehicles;
