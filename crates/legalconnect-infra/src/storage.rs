//! Local-disk file store. Files are served back under `public_base_url`.

use std::path::{Path, PathBuf};

use legalconnect_core::integration::storage::FileStore;
use legalconnect_types::error::IntegrationError;
use legalconnect_types::integration::{FileUpload, UploadedFile};

#[derive(Debug, Clone)]
pub struct LocalFileStore {
    dir: PathBuf,
    public_base_url: String,
}

impl LocalFileStore {
    pub fn new(dir: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Keep ASCII alphanumerics, `.`, `-` and `_`; anything else becomes `_`.
/// Leading dots are stripped so names cannot be hidden or traverse.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

impl FileStore for LocalFileStore {
    async fn upload(&self, file: &FileUpload) -> Result<UploadedFile, IntegrationError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| IntegrationError::Io(format!("{}: {e}", self.dir.display())))?;

        let stored_name = format!("{}-{}", uuid::Uuid::new_v4(), sanitize_filename(&file.filename));
        let path = self.dir.join(&stored_name);
        tokio::fs::write(&path, &file.bytes)
            .await
            .map_err(|e| IntegrationError::Io(format!("{}: {e}", path.display())))?;

        Ok(UploadedFile {
            file_url: format!("{}/{stored_name}", self.public_base_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("sale deed (1).pdf"), "sale_deed__1_.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\docs\\khata.jpg"), "khata.jpg");
        assert_eq!(sanitize_filename(".env"), "env");
        assert_eq!(sanitize_filename(""), "file");
    }

    #[tokio::test]
    async fn test_upload_writes_file_and_returns_url() {
        let tmp = TempDir::new().unwrap();
        let store = LocalFileStore::new(tmp.path().join("uploads"), "http://localhost:3000/files/");
        let uploaded = store
            .upload(&FileUpload {
                filename: "patta.pdf".into(),
                content_type: Some("application/pdf".into()),
                bytes: b"%PDF-1.4".to_vec(),
            })
            .await
            .unwrap();

        let name = uploaded
            .file_url
            .strip_prefix("http://localhost:3000/files/")
            .unwrap();
        assert!(name.ends_with("-patta.pdf"));
        let written = tokio::fs::read(store.dir().join(name)).await.unwrap();
        assert_eq!(written, b"%PDF-1.4");
    }
}
