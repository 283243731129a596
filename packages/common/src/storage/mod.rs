mod error;
mod filesystem;
mod traits;

pub use error::StorageError;
pub use filesystem::FilesystemUploadStore;
pub use traits::{BoxReader, StoredUpload, UploadStore};
