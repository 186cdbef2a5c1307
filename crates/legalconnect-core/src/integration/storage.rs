//! FileStore trait for user uploads (profile photos, documents).

use legalconnect_types::error::IntegrationError;
use legalconnect_types::integration::{FileUpload, UploadedFile};

/// Stores an uploaded file and returns a URL it can be fetched from.
pub trait FileStore: Send + Sync {
    fn upload(
        &self,
        file: &FileUpload,
    ) -> impl std::future::Future<Output = Result<UploadedFile, IntegrationError>> + Send;
}
