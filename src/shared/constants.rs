/// Section label used for item definitions that carry no category
pub const DEFAULT_CATEGORY: &str = "General";

// =============================================================================
// EVIDENCE CONSTANTS
// =============================================================================

/// Maximum photo size accepted for evidence uploads (10MB)
pub const MAX_PHOTO_SIZE: usize = 10 * 1024 * 1024;

/// MIME types accepted as photo evidence
pub const ALLOWED_PHOTO_MIME_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/webp", "image/heic"];
