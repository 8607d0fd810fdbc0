//! Photo evidence captured for problem items.

pub mod services;

pub use services::{EvidenceService, PhotoUpload};
