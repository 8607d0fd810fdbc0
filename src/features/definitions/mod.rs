//! Checklist item catalog: filtering by vehicle and grouping into sections.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/checklists/definitions` | Preview sections for a checklist type |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::DefinitionService;
