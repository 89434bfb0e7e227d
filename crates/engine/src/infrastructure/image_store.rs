//! Local-directory image store.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::infrastructure::ports::{ImageStore, ImageStoreError};

/// Stores catalog photos as flat files under one root directory.
///
/// Image references may be full URLs or relative paths; only the final path
/// segment names the file.
pub struct FsImageStore {
    root: PathBuf,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, image_url: &str) -> Result<PathBuf, ImageStoreError> {
        let path = image_url.split(['?', '#']).next().unwrap_or_default();
        let file_name = path.rsplit('/').next().unwrap_or_default().trim();
        if file_name.is_empty() || file_name == "." || file_name == ".." || file_name.contains('\\')
        {
            return Err(ImageStoreError::InvalidReference(image_url.to_string()));
        }
        Ok(self.root.join(file_name))
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn delete(&self, image_url: &str) -> Result<(), ImageStoreError> {
        let path = self.resolve(image_url)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Deleted catalog image");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Catalog image already gone");
                Ok(())
            }
            Err(e) => Err(ImageStoreError::Io(e)),
        }
    }
}
