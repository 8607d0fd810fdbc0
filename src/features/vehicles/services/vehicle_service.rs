use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::vehicles::models::Vehicle;
use crate::modules::persistence::FleetStore;

/// Service for the vehicles a driver may inspect
pub struct VehicleService {
    store: Arc<dyn FleetStore>,
}

impl VehicleService {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    /// Candidate vehicles for a driver
    pub async fn list_for_driver(&self, driver_id: &str) -> Result<Vec<Vehicle>> {
        let driver_id = driver_id.trim();
        if driver_id.is_empty() {
            return Err(AppError::Validation("Driver id is required".to_string()));
        }

        let vehicles = self
            .store
            .load_vehicles_for_driver(driver_id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load vehicles for driver {}: {:?}", driver_id, e);
                AppError::LoadFailure("Could not load vehicles".to_string())
            })?;

        tracing::debug!("Driver {} has {} vehicles", driver_id, vehicles.len());
        Ok(vehicles)
    }
}
