use std::io::Cursor;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// A file persisted by an [`UploadStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Flat name the file was stored under (e.g. `1735689600000.pdf`).
    pub stored_name: String,
    /// Size in bytes.
    pub size: u64,
}

/// Storage for user-uploaded files, keyed by a flat stored name.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Store bytes under a fresh name derived from `original_name`.
    async fn put(&self, original_name: &str, data: &[u8]) -> Result<StoredUpload, StorageError> {
        let reader: BoxReader = Box::new(Cursor::new(data.to_vec()));
        self.put_stream(original_name, reader).await
    }

    /// Store data from an async reader under a fresh name derived from `original_name`.
    async fn put_stream(
        &self,
        original_name: &str,
        reader: BoxReader,
    ) -> Result<StoredUpload, StorageError>;

    /// Retrieve an upload as a streaming async reader.
    async fn get_stream(&self, stored_name: &str) -> Result<BoxReader, StorageError>;

    /// Check whether an upload exists.
    async fn exists(&self, stored_name: &str) -> Result<bool, StorageError>;

    /// Delete an upload by its stored name.
    ///
    /// Returns `true` if the upload was deleted, `false` if it did not exist.
    async fn delete(&self, stored_name: &str) -> Result<bool, StorageError>;

    /// Get the size of an upload in bytes.
    async fn size(&self, stored_name: &str) -> Result<u64, StorageError>;
}
