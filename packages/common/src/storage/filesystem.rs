use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::BufReader;

use super::error::StorageError;
use super::traits::{BlobStore, BoxReader};

/// Filesystem-backed path-addressed blob store.
///
/// Blobs live directly under `base_path`; writes go to `.tmp` first and are
/// published with an atomic rename, so a blob path always points at either
/// the previous fully-written content or the new one, never a torn write.
pub struct FilesystemBlobStore {
    base_path: PathBuf,
    max_size: u64,
}

impl FilesystemBlobStore {
    /// Create a new filesystem blob store rooted at `base_path`.
    pub async fn new(base_path: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            max_size,
        })
    }

    /// Resolve a validated blob path to its filesystem location.
    fn blob_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        validate_path(path)?;
        Ok(self.base_path.join(path))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

/// Blob paths are single flat segments: no separators, no traversal, no
/// hidden names.
fn validate_path(path: &str) -> Result<(), StorageError> {
    if path.is_empty() {
        return Err(StorageError::InvalidPath("empty path".into()));
    }
    if path.starts_with('.') {
        return Err(StorageError::InvalidPath(format!(
            "hidden path segment: {path}"
        )));
    }
    if path
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_control())
    {
        return Err(StorageError::InvalidPath(format!(
            "path contains separator or control character: {path}"
        )));
    }
    Ok(())
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn put(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let blob_path = self.blob_path(path)?;
        let temp_path = self.temp_path();

        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        // Atomic publish: overwrites any previous blob at this path.
        if let Err(e) = fs::rename(&temp_path, &blob_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }

    async fn get_stream(&self, path: &str) -> Result<BoxReader, StorageError> {
        let blob_path = self.blob_path(path)?;
        match fs::File::open(&blob_path).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let blob_path = self.blob_path(path)?;
        Ok(fs::try_exists(&blob_path).await?)
    }

    async fn delete(&self, path: &str) -> Result<bool, StorageError> {
        let blob_path = self.blob_path(path)?;
        match fs::remove_file(&blob_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn size(&self, path: &str) -> Result<u64, StorageError> {
        let blob_path = self.blob_path(path)?;
        match fs::metadata(&blob_path).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
