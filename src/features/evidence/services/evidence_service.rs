use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::checklists::models::PhotoRef;
use crate::modules::storage::EvidenceStore;
use crate::shared::constants::{ALLOWED_PHOTO_MIME_TYPES, MAX_PHOTO_SIZE};

/// A captured photo as received from the client
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Stores captured photos and hands back the reference kept on the answer
pub struct EvidenceService {
    store: Arc<dyn EvidenceStore>,
}

impl EvidenceService {
    pub fn new(store: Arc<dyn EvidenceStore>) -> Self {
        Self { store }
    }

    /// Validate and upload one photo for a session item
    ///
    /// Objects land at `{prefix}/{driver}/{session}/{item}/{uuid}.{ext}`.
    pub async fn store_photo(
        &self,
        upload: PhotoUpload,
        driver_id: &str,
        session_id: Uuid,
        item_id: &str,
    ) -> Result<PhotoRef> {
        let content_type = upload.content_type.trim().to_ascii_lowercase();
        validate_photo(&upload.bytes, &content_type)?;

        let extension = extension_for(&content_type);
        let key = format!(
            "{}/{}/{}/{}/{}.{}",
            self.store.prefix(),
            key_segment(driver_id),
            session_id,
            key_segment(item_id),
            Uuid::now_v7(),
            extension
        );
        let size = upload.bytes.len();

        let reference = self
            .store
            .put(&key, upload.bytes, &content_type)
            .await
            .map_err(|e| {
                tracing::error!("Failed to store photo '{}': {:?}", key, e);
                e
            })?;

        tracing::info!(
            "Photo stored: session={}, item={}, size={} bytes",
            session_id,
            item_id,
            size
        );

        PhotoRef::new(reference)
            .ok_or_else(|| AppError::Internal("Evidence store returned an empty reference".to_string()))
    }
}

fn validate_photo(bytes: &[u8], content_type: &str) -> Result<()> {
    if bytes.is_empty() {
        return Err(AppError::Validation("Photo is empty".to_string()));
    }
    if bytes.len() > MAX_PHOTO_SIZE {
        return Err(AppError::Validation(format!(
            "Photo exceeds the {} MB limit",
            MAX_PHOTO_SIZE / (1024 * 1024)
        )));
    }
    if !ALLOWED_PHOTO_MIME_TYPES.contains(&content_type) {
        return Err(AppError::Validation(format!(
            "Unsupported photo type '{}'. Allowed: {}",
            content_type,
            ALLOWED_PHOTO_MIME_TYPES.join(", ")
        )));
    }
    Ok(())
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/heic" => "heic",
        _ => "jpg",
    }
}

/// Make an identifier safe to use as one object key segment
fn key_segment(value: &str) -> String {
    let segment: String = value
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if segment.is_empty() {
        "_".to_string()
    } else {
        segment
    }
}
