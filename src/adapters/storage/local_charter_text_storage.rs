//! Local filesystem storage for charter texts.
//!
//! Every revision of a charter lives in its own file directly under the
//! configured charter directory, named `<charter-name>-<rev>.txt`.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::charter::charter_text_filename;
use crate::domain::document::Revision;
use crate::domain::foundation::DocName;
use crate::ports::{CharterTextStorage, StorageError};

/// Largest charter text accepted (1 MB).
const MAX_TEXT_BYTES: u64 = 1024 * 1024;

/// Charter text files in a single directory.
///
/// Writes go to `<file>.tmp` first, are synced, then renamed into place so a
/// crash never leaves a half-written revision behind.
#[derive(Debug, Clone)]
pub struct LocalCharterTextStorage {
    base_path: PathBuf,
}

impl LocalCharterTextStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn text_path(&self, name: &DocName, rev: Revision) -> PathBuf {
        self.base_path.join(charter_text_filename(name, rev))
    }

    fn temp_path(&self, name: &DocName, rev: Revision) -> PathBuf {
        self.base_path
            .join(format!("{}.tmp", charter_text_filename(name, rev)))
    }

    fn map_io(path: &std::path::Path, action: &str, e: std::io::Error) -> StorageError {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound {
                path: path.display().to_string(),
            },
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => StorageError::io(format!("Failed to {} {}: {}", action, path.display(), e)),
        }
    }
}

#[async_trait]
impl CharterTextStorage for LocalCharterTextStorage {
    async fn write(&self, name: &DocName, rev: Revision, text: &str) -> Result<(), StorageError> {
        let size = text.len() as u64;
        if size > MAX_TEXT_BYTES {
            return Err(StorageError::TooLarge {
                size_bytes: size,
                max_bytes: MAX_TEXT_BYTES,
            });
        }

        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| Self::map_io(&self.base_path, "create directory", e))?;

        let temp_path = self.temp_path(name, rev);
        let final_path = self.text_path(name, rev);

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Self::map_io(&temp_path, "create", e))?;
        file.write_all(text.as_bytes())
            .await
            .map_err(|e| Self::map_io(&temp_path, "write", e))?;
        file.sync_all()
            .await
            .map_err(|e| Self::map_io(&temp_path, "sync", e))?;

        fs::rename(&temp_path, &final_path)
            .await
            .map_err(|e| Self::map_io(&final_path, "rename into", e))?;

        tracing::debug!(path = %final_path.display(), bytes = size, "Wrote charter text");
        Ok(())
    }

    async fn read(&self, name: &DocName, rev: Revision) -> Result<String, StorageError> {
        let path = self.text_path(name, rev);
        fs::read_to_string(&path)
            .await
            .map_err(|e| Self::map_io(&path, "read", e))
    }

    async fn exists(&self, name: &DocName, rev: Revision) -> Result<bool, StorageError> {
        let path = self.text_path(name, rev);
        fs::try_exists(&path)
            .await
            .map_err(|e| Self::map_io(&path, "stat", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn charter() -> DocName {
        DocName::new("charter-ietf-foo").unwrap()
    }

    fn create_storage() -> (LocalCharterTextStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalCharterTextStorage::new(temp_dir.path().join("charter"));
        (storage, temp_dir)
    }

    #[tokio::test]
    async fn write_then_read() {
        let (storage, temp) = create_storage();
        let rev = Revision::parse("00-01").unwrap();

        storage.write(&charter(), rev, "The FOO WG will...").await.unwrap();

        assert!(temp.path().join("charter/charter-ietf-foo-00-01.txt").exists());
        assert_eq!(
            storage.read(&charter(), rev).await.unwrap(),
            "The FOO WG will..."
        );
        assert!(storage.exists(&charter(), rev).await.unwrap());
    }

    #[tokio::test]
    async fn write_leaves_no_temp_file() {
        let (storage, temp) = create_storage();
        let rev = Revision::initial_charter();
        storage.write(&charter(), rev, "text").await.unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(temp.path().join("charter"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn overwrite_replaces_text() {
        let (storage, _temp) = create_storage();
        let rev = Revision::initial_charter();
        storage.write(&charter(), rev, "first").await.unwrap();
        storage.write(&charter(), rev, "second").await.unwrap();
        assert_eq!(storage.read(&charter(), rev).await.unwrap(), "second");
    }

    #[tokio::test]
    async fn read_missing_revision_is_not_found() {
        let (storage, _temp) = create_storage();
        let err = storage
            .read(&charter(), Revision::parse("01").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
        assert!(!storage
            .exists(&charter(), Revision::parse("01").unwrap())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn rejects_oversized_text() {
        let (storage, _temp) = create_storage();
        let text = "x".repeat(MAX_TEXT_BYTES as usize + 1);
        let err = storage
            .write(&charter(), Revision::initial_charter(), &text)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::TooLarge { .. }));
    }
}
