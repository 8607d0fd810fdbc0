use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::definitions::handlers;
use crate::features::definitions::services::DefinitionService;

/// Create routes for the definitions feature
pub fn routes(service: Arc<DefinitionService>) -> Router {
    Router::new()
        .route("/api/checklists/definitions", get(handlers::get_definitions))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::definitions::models::{ChecklistType, VehicleScope};
    use crate::shared::test_helpers::{definition, InMemoryFleetStore};
    use crate::shared::types::ApiResponse;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;
    use std::sync::atomic::Ordering;

    fn server(store: InMemoryFleetStore) -> TestServer {
        let service = Arc::new(DefinitionService::new(Arc::new(store)));
        TestServer::new(routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_preview_filters_by_vehicle_kind() {
        let store = InMemoryFleetStore::new().with_definitions(
            ChecklistType::Maintenance,
            vec![
                definition("1", "Oil", Some("Engine"), Some(VehicleScope::Truck)),
                definition("2", "Kingpin", Some("Coupling"), Some(VehicleScope::Trailer)),
                definition("3", "Lights", None, Some(VehicleScope::All)),
            ],
        );
        let server = server(store);

        let response = server
            .get("/api/checklists/definitions")
            .add_query_param("checklistType", "MAINTENANCE")
            .add_query_param("vehicleKind", "TRACTOR")
            .await;

        response.assert_status_ok();
        let body: ApiResponse<Value> = response.json();
        let data = body.data.unwrap();
        assert_eq!(data["totalItems"], 2);
        assert_eq!(data["sections"][0]["category"], "Engine");
        assert_eq!(data["sections"][1]["category"], "General");
        assert_eq!(body.meta.unwrap().total, 2);
    }

    #[tokio::test]
    async fn test_preview_reports_load_failure() {
        let store = InMemoryFleetStore::new();
        store.fail_definitions.store(true, Ordering::SeqCst);
        let server = server(store);

        let response = server
            .get("/api/checklists/definitions")
            .add_query_param("checklistType", "CARGO")
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: ApiResponse<Value> = response.json();
        assert!(!body.success);
    }
}
