//! Storage module for photo evidence
//!
//! Provides the [`EvidenceStore`] boundary and its MinIO/S3-compatible
//! implementation.

mod evidence_store;
mod minio_client;

pub use evidence_store::EvidenceStore;
pub use minio_client::MinIOClient;
