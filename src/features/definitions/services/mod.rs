mod definition_filter;
mod definition_service;

pub use definition_filter::{build_sections, filter_definitions, group_into_sections};
pub use definition_service::DefinitionService;
