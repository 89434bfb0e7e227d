//! External service port traits.

use async_trait::async_trait;

use super::error::ImageStoreError;

/// Blob storage holding catalog photos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Remove the blob behind `image_url`. Missing blobs are not an error.
    async fn delete(&self, image_url: &str) -> Result<(), ImageStoreError>;
}
