mod vehicle;

pub use vehicle::{Vehicle, VehicleKind};
