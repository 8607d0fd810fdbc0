mod vehicle_dto;

pub use vehicle_dto::VehicleResponseDto;
