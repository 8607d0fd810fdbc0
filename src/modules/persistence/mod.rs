//! Persistence boundary for definitions, vehicles, checklists and
//! corrective actions.

mod fleet_store;
mod postgres;

pub use fleet_store::FleetStore;
pub use postgres::PgFleetStore;
