mod definition_dto;

pub use definition_dto::{ChecklistDefinitionsDto, DefinitionQuery, SectionDto};
