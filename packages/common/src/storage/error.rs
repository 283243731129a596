/// Errors that can occur during upload storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested upload was not found.
    #[error("upload not found: {0}")]
    NotFound(String),
    /// An I/O error occurred.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The stored name is not a plain filename.
    #[error("invalid stored name: {0}")]
    InvalidName(String),
    /// The upload exceeds the configured size limit.
    #[error("upload exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },
}
