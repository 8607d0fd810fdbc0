//! Vehicles a driver can pick for an inspection.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/drivers/{driver_id}/vehicles` | Candidate vehicles for a driver |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::VehicleService;
