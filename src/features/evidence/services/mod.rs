mod evidence_service;

pub use evidence_service::{EvidenceService, PhotoUpload};
