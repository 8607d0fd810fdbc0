use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::vehicles::handlers;
use crate::features::vehicles::services::VehicleService;

/// Create routes for the vehicles feature
pub fn routes(service: Arc<VehicleService>) -> Router {
    Router::new()
        .route(
            "/api/drivers/{driver_id}/vehicles",
            get(handlers::list_driver_vehicles),
        )
        .with_state(service)
}
