use async_trait::async_trait;

use crate::core::error::Result;

/// Object storage for inspection photos
#[async_trait]
pub trait EvidenceStore: Send + Sync {
    /// Key prefix every evidence object is written under
    fn prefix(&self) -> &str;

    /// Store `data` under `key` and return the reference to keep on the answer
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String>;
}
