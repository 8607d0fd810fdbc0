use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::history::handlers;
use crate::features::history::services::HistoryService;

/// Create routes for the history feature
pub fn routes(service: Arc<HistoryService>) -> Router {
    Router::new()
        .route(
            "/api/drivers/{driver_id}/checklists",
            get(handlers::list_driver_checklists),
        )
        .route("/api/checklists/{id}", get(handlers::get_checklist))
        .route(
            "/api/checklists/{id}/corrections",
            post(handlers::record_correction),
        )
        .with_state(service)
}
