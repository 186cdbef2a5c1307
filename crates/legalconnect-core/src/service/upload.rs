//! File uploads for profile photos, verification documents and request attachments.

use futures_util::future::try_join_all;

use legalconnect_types::error::MarketplaceError;
use legalconnect_types::integration::{FileUpload, UploadedFile};

use crate::integration::storage::FileStore;

pub struct UploadService<F: FileStore> {
    store: F,
    max_bytes: u64,
}

impl<F: FileStore> UploadService<F> {
    pub fn new(store: F, max_bytes: u64) -> Self {
        Self { store, max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub async fn upload(&self, file: &FileUpload) -> Result<UploadedFile, MarketplaceError> {
        self.check(file)?;
        let uploaded = self.store.upload(file).await?;
        tracing::debug!(filename = %file.filename, size = file.bytes.len(), url = %uploaded.file_url, "file uploaded");
        Ok(uploaded)
    }

    /// Upload several files concurrently. Every file is checked first, so a
    /// bad file stores nothing.
    pub async fn upload_many(&self, files: &[FileUpload]) -> Result<Vec<UploadedFile>, MarketplaceError> {
        for file in files {
            self.check(file)?;
        }
        let stored = try_join_all(files.iter().map(|file| self.store.upload(file))).await?;
        tracing::debug!(count = stored.len(), "files uploaded");
        Ok(stored)
    }

    fn check(&self, file: &FileUpload) -> Result<(), MarketplaceError> {
        if file.bytes.is_empty() {
            return Err(MarketplaceError::invalid(
                "file",
                format!("File '{}' is empty", file.filename),
            ));
        }
        if file.bytes.len() as u64 > self.max_bytes {
            return Err(MarketplaceError::invalid(
                "file",
                format!(
                    "File '{}' exceeds the {} MB limit",
                    file.filename,
                    self.max_bytes / (1024 * 1024)
                ),
            ));
        }
        Ok(())
    }
}
