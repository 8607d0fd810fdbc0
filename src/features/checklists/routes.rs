use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::checklists::handlers;
use crate::features::checklists::services::SessionService;

/// Create routes for the checklist-session feature
pub fn routes(service: Arc<SessionService>) -> Router {
    Router::new()
        .route("/api/checklist-sessions", post(handlers::start_session))
        .route(
            "/api/checklist-sessions/{id}",
            get(handlers::get_session).delete(handlers::discard_session),
        )
        .route(
            "/api/checklist-sessions/{id}/vehicle",
            put(handlers::select_vehicle),
        )
        .route(
            "/api/checklist-sessions/{id}/checklist-type",
            put(handlers::set_checklist_type),
        )
        .route(
            "/api/checklist-sessions/{id}/reload",
            post(handlers::reload_definitions),
        )
        .route(
            "/api/checklist-sessions/{id}/items/{item_id}/status",
            put(handlers::set_item_status),
        )
        .route(
            "/api/checklist-sessions/{id}/items/{item_id}/comment",
            put(handlers::set_item_comment),
        )
        .route(
            "/api/checklist-sessions/{id}/items/{item_id}/photo",
            put(handlers::set_item_photo).delete(handlers::clear_item_photo),
        )
        .route(
            "/api/checklist-sessions/{id}/items/{item_id}/photo/upload",
            post(handlers::upload_item_photo),
        )
        .route(
            "/api/checklist-sessions/{id}/progress",
            get(handlers::get_progress),
        )
        .route(
            "/api/checklist-sessions/{id}/submit",
            post(handlers::submit_session),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::definitions::models::{ChecklistType, VehicleScope};
    use crate::features::definitions::DefinitionService;
    use crate::features::evidence::EvidenceService;
    use crate::features::vehicles::VehicleService;
    use crate::modules::persistence::FleetStore;
    use crate::shared::test_helpers::{
        definition, tractor, InMemoryEvidenceStore, InMemoryFleetStore,
    };
    use crate::shared::types::ApiResponse;
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> (TestServer, Arc<InMemoryFleetStore>) {
        let store = Arc::new(
            InMemoryFleetStore::new()
                .with_definitions(
                    ChecklistType::Maintenance,
                    vec![
                        definition("1", "Brakes", Some("Safety"), Some(VehicleScope::All)),
                        definition("5", "Windshield", Some("Cab"), Some(VehicleScope::Truck)),
                    ],
                )
                .with_vehicles("driver-1", vec![tractor("ABC-1234")]),
        );
        let dyn_store: Arc<dyn FleetStore> = store.clone();
        let service = Arc::new(SessionService::new(
            dyn_store.clone(),
            Arc::new(DefinitionService::new(dyn_store.clone())),
            Arc::new(VehicleService::new(dyn_store)),
            Arc::new(EvidenceService::new(Arc::new(InMemoryEvidenceStore::new()))),
        ));
        (TestServer::new(routes(service)).unwrap(), store)
    }

    async fn start(server: &TestServer) -> Value {
        let response = server
            .post("/api/checklist-sessions")
            .json(&json!({
                "driverId": "driver-1",
                "driverName": "Ana Souza",
                "checklistType": "MAINTENANCE"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<ApiResponse<Value>>().data.unwrap()
    }

    #[tokio::test]
    async fn test_problem_needs_photo_before_submit() {
        let (server, store) = server();
        let session = start(&server).await;
        let id = session["id"].as_str().unwrap().to_string();
        let vehicle_id = session["vehicles"][0]["id"].clone();

        server
            .put(&format!("/api/checklist-sessions/{}/vehicle", id))
            .json(&json!({ "vehicleId": vehicle_id }))
            .await
            .assert_status_ok();
        server
            .put(&format!("/api/checklist-sessions/{}/items/1/status", id))
            .json(&json!({ "status": "OK" }))
            .await
            .assert_status_ok();
        server
            .put(&format!("/api/checklist-sessions/{}/items/5/status", id))
            .json(&json!({ "status": "PROBLEM" }))
            .await
            .assert_status_ok();
        server
            .put(&format!("/api/checklist-sessions/{}/items/5/comment", id))
            .json(&json!({ "comment": "cracked" }))
            .await
            .assert_status_ok();

        let rejected = server
            .post(&format!("/api/checklist-sessions/{}/submit", id))
            .await;
        rejected.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: ApiResponse<Value> = rejected.json();
        assert_eq!(body.errors, Some(vec!["5".to_string()]));
        assert_eq!(store.submit_calls(), 0);

        let form = MultipartForm::new().add_part(
            "photo",
            Part::bytes(vec![0xFF, 0xD8, 0xFF])
                .file_name("windshield.jpg")
                .mime_type("image/jpeg"),
        );
        let uploaded = server
            .post(&format!(
                "/api/checklist-sessions/{}/items/5/photo/upload",
                id
            ))
            .multipart(form)
            .await;
        uploaded.assert_status(StatusCode::CREATED);

        let progress = server
            .get(&format!("/api/checklist-sessions/{}/progress", id))
            .await
            .json::<ApiResponse<Value>>()
            .data
            .unwrap();
        assert_eq!(progress["completed"], 2);
        assert_eq!(progress["total"], 2);

        let submitted = server
            .post(&format!("/api/checklist-sessions/{}/submit", id))
            .await;
        submitted.assert_status(StatusCode::CREATED);
        let result = submitted.json::<ApiResponse<Value>>().data.unwrap();
        assert_eq!(result["problemCount"], 1);
        assert_eq!(store.submit_calls(), 1);

        server
            .get(&format!("/api/checklist-sessions/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_start_validates_driver() {
        let (server, _) = server();

        let response = server
            .post("/api/checklist-sessions")
            .json(&json!({
                "driverId": "",
                "driverName": "Ana",
                "checklistType": "CARGO"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_item_is_not_found() {
        let (server, _) = server();
        let session = start(&server).await;
        let id = session["id"].as_str().unwrap();

        server
            .put(&format!("/api/checklist-sessions/{}/items/999/status", id))
            .json(&json!({ "status": "OK" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
