use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Path-addressed durable blob storage.
///
/// Paths are flat, caller-derived keys (e.g. `student-42`). Writing to an
/// existing path overwrites it; implementations must publish writes
/// atomically so concurrent readers never observe a partially written blob.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes at `path`, replacing any previous blob there.
    async fn put(&self, path: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Retrieve all bytes of the blob at `path`.
    async fn get(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.get_stream(path).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Open the blob at `path` as a streaming async reader.
    async fn get_stream(&self, path: &str) -> Result<BoxReader, StorageError>;

    /// Check whether a blob exists at `path`.
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Delete the blob at `path`.
    ///
    /// Returns `true` if a blob was deleted, `false` if none existed.
    async fn delete(&self, path: &str) -> Result<bool, StorageError>;

    /// Get the size of the blob at `path` in bytes.
    async fn size(&self, path: &str) -> Result<u64, StorageError>;
}
