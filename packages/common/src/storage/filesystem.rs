use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, BufReader};

use super::error::StorageError;
use super::traits::{BoxReader, StoredUpload, UploadStore};

/// Filesystem-backed upload store.
///
/// Files are stored flat under `base_dir` with a millisecond-timestamp name
/// that preserves the original extension, e.g. `uploads/1735689600000.pdf`.
pub struct FilesystemUploadStore {
    base_dir: PathBuf,
    max_size: u64,
}

impl FilesystemUploadStore {
    /// Create a new filesystem upload store.
    pub async fn new(base_dir: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_dir).await?;
        fs::create_dir_all(base_dir.join(".tmp")).await?;
        Ok(Self { base_dir, max_size })
    }

    fn upload_path(&self, stored_name: &str) -> PathBuf {
        self.base_dir.join(stored_name)
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_dir
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }

    /// Pick a timestamp-based name that does not collide with an existing file.
    async fn fresh_name(&self, extension: &str) -> Result<String, StorageError> {
        let millis = chrono::Utc::now().timestamp_millis();
        let candidate = format!("{millis}{extension}");
        if !fs::try_exists(self.upload_path(&candidate)).await? {
            return Ok(candidate);
        }
        // Same-millisecond collision: disambiguate with a UUID.
        Ok(format!("{millis}-{}{extension}", uuid::Uuid::new_v4()))
    }
}

/// Reject stored names that could escape the uploads directory.
fn validate_stored_name(stored_name: &str) -> Result<&str, StorageError> {
    let invalid = |msg: &str| StorageError::InvalidName(format!("{msg}: {stored_name:?}"));

    if stored_name.is_empty() {
        return Err(invalid("empty name"));
    }
    if stored_name.contains('\0') {
        return Err(invalid("null byte"));
    }
    if stored_name.contains('/') || stored_name.contains('\\') {
        return Err(invalid("path separator"));
    }
    if stored_name.starts_with('.') {
        return Err(invalid("hidden file"));
    }
    Ok(stored_name)
}

/// Extract a safe extension (including the leading dot) from an uploaded filename.
///
/// Returns an empty string when the name has no usable extension.
fn safe_extension(original_name: &str) -> String {
    let Some((stem, ext)) = original_name.rsplit_once('.') else {
        return String::new();
    };
    if stem.is_empty()
        || ext.is_empty()
        || ext.len() > 16
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return String::new();
    }
    format!(".{}", ext.to_ascii_lowercase())
}

#[async_trait]
impl UploadStore for FilesystemUploadStore {
    async fn put_stream(
        &self,
        original_name: &str,
        mut reader: BoxReader,
    ) -> Result<StoredUpload, StorageError> {
        let temp_path = self.temp_path();
        let mut total_bytes: u64 = 0;

        let mut buf = vec![0u8; 64 * 1024]; // 64KB read buffer
        let mut temp_file = fs::File::create(&temp_path).await?;

        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }

            total_bytes += n as u64;
            if total_bytes > self.max_size {
                drop(temp_file);
                let _ = fs::remove_file(&temp_path).await;
                return Err(StorageError::SizeLimitExceeded {
                    actual: total_bytes,
                    limit: self.max_size,
                });
            }

            tokio::io::AsyncWriteExt::write_all(&mut temp_file, &buf[..n]).await?;
        }

        tokio::io::AsyncWriteExt::flush(&mut temp_file).await?;
        drop(temp_file);

        let stored_name = match self.fresh_name(&safe_extension(original_name)).await {
            Ok(name) => name,
            Err(e) => {
                let _ = fs::remove_file(&temp_path).await;
                return Err(e);
            }
        };

        if let Err(e) = fs::rename(&temp_path, self.upload_path(&stored_name)).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(StoredUpload {
            stored_name,
            size: total_bytes,
        })
    }

    async fn get_stream(&self, stored_name: &str) -> Result<BoxReader, StorageError> {
        let stored_name = validate_stored_name(stored_name)?;
        match fs::File::open(self.upload_path(stored_name)).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(stored_name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, stored_name: &str) -> Result<bool, StorageError> {
        let stored_name = validate_stored_name(stored_name)?;
        Ok(fs::try_exists(self.upload_path(stored_name)).await?)
    }

    async fn delete(&self, stored_name: &str) -> Result<bool, StorageError> {
        let stored_name = validate_stored_name(stored_name)?;
        match fs::remove_file(self.upload_path(stored_name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn size(&self, stored_name: &str) -> Result<u64, StorageError> {
        let stored_name = validate_stored_name(stored_name)?;
        match fs::metadata(self.upload_path(stored_name)).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(stored_name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
