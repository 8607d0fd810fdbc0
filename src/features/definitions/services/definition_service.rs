use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::definitions::models::{
    ChecklistItemDefinition, ChecklistSection, ChecklistType,
};
use crate::features::vehicles::models::VehicleKind;
use crate::modules::persistence::FleetStore;

use super::build_sections;

/// Loads the definition catalog from the store
pub struct DefinitionService {
    store: Arc<dyn FleetStore>,
}

impl DefinitionService {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    /// Raw catalog for one checklist type, unfiltered
    pub async fn fetch(&self, checklist_type: ChecklistType) -> Result<Vec<ChecklistItemDefinition>> {
        self.store
            .load_definitions(checklist_type)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load {} definitions: {:?}", checklist_type, e);
                AppError::LoadFailure("Could not load checklist items".to_string())
            })
    }

    /// Catalog narrowed to the vehicle kind and grouped into sections
    pub async fn sections(
        &self,
        checklist_type: ChecklistType,
        vehicle_kind: Option<VehicleKind>,
    ) -> Result<Vec<ChecklistSection>> {
        let definitions = self.fetch(checklist_type).await?;
        Ok(build_sections(checklist_type, vehicle_kind, definitions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::definitions::models::VehicleScope;
    use crate::shared::test_helpers::{definition, InMemoryFleetStore};
    use std::sync::atomic::Ordering;
    use tokio_test::assert_err;

    fn catalog() -> Vec<ChecklistItemDefinition> {
        vec![
            definition("1", "Tires", Some("Wheels"), Some(VehicleScope::All)),
            definition("2", "Fifth wheel", Some("Coupling"), Some(VehicleScope::Truck)),
            definition("3", "Kingpin", Some("Coupling"), Some(VehicleScope::Trailer)),
            definition("4", "Horn", None, None),
        ]
    }

    #[tokio::test]
    async fn test_sections_for_trailer() {
        let store = InMemoryFleetStore::new().with_definitions(ChecklistType::Maintenance, catalog());
        let service = DefinitionService::new(Arc::new(store));

        let sections = service
            .sections(ChecklistType::Maintenance, Some(VehicleKind::Trailer))
            .await
            .unwrap();

        let labels: Vec<&str> = sections.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(labels, vec!["Wheels", "Coupling", "General"]);
        assert_eq!(sections[1].item_ids().collect::<Vec<_>>(), vec!["3"]);
    }

    #[tokio::test]
    async fn test_cargo_ignores_vehicle_kind() {
        let store = InMemoryFleetStore::new().with_definitions(ChecklistType::Cargo, catalog());
        let service = DefinitionService::new(Arc::new(store));

        let sections = service
            .sections(ChecklistType::Cargo, Some(VehicleKind::Tractor))
            .await
            .unwrap();

        assert_eq!(sections.iter().map(|s| s.items.len()).sum::<usize>(), 4);
    }

    #[tokio::test]
    async fn test_store_failure_is_load_failure() {
        let store = InMemoryFleetStore::new();
        store.fail_definitions.store(true, Ordering::SeqCst);
        let service = DefinitionService::new(Arc::new(store));

        let result = service.fetch(ChecklistType::Maintenance).await;
        assert_err!(&result);
        assert!(matches!(result, Err(AppError::LoadFailure(_))));
    }
}
