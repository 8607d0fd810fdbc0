//! Submitted checklists and the corrective actions recorded against their
//! problem items.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/drivers/{driver_id}/checklists` | History, newest first |
//! | GET | `/api/checklists/{id}` | Checklist with corrections |
//! | POST | `/api/checklists/{id}/corrections` | Record a corrective action |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::HistoryService;
