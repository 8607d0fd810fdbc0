//! Checklist filling: per-driver sessions holding sections and answers,
//! progress, and submission.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/checklist-sessions` | Start a session |
//! | GET | `/api/checklist-sessions/{id}` | Sections, answers and progress |
//! | DELETE | `/api/checklist-sessions/{id}` | Discard a session |
//! | PUT | `/api/checklist-sessions/{id}/vehicle` | Select vehicle (resets answers) |
//! | PUT | `/api/checklist-sessions/{id}/checklist-type` | Switch type (resets answers) |
//! | POST | `/api/checklist-sessions/{id}/reload` | Retry loading items |
//! | PUT | `/api/checklist-sessions/{id}/items/{item_id}/status` | Mark OK or PROBLEM |
//! | PUT | `/api/checklist-sessions/{id}/items/{item_id}/comment` | Set comment |
//! | PUT/DELETE | `/api/checklist-sessions/{id}/items/{item_id}/photo` | Attach or remove photo |
//! | POST | `/api/checklist-sessions/{id}/items/{item_id}/photo/upload` | Upload and attach photo |
//! | GET | `/api/checklist-sessions/{id}/progress` | Progress |
//! | POST | `/api/checklist-sessions/{id}/submit` | Submit |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod workers;

pub use services::SessionService;
pub use workers::SessionSweeper;
