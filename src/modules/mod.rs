//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the persistence boundary and the object storage client.

pub mod persistence;
pub mod storage;
