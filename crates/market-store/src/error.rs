//! Storage error types.

use thiserror::Error;

/// Errors that can occur when reading or writing the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// The backing file could not be read or written.
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a valid key-value document.
    #[error("Store file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Read operation failed.
    #[error("Read failed for key {key}: {reason}")]
    ReadFailed { key: String, reason: String },

    /// Write operation failed.
    #[error("Write failed for key {key}: {reason}")]
    WriteFailed { key: String, reason: String },
}

impl StoreError {
    /// Whether retrying the same operation may succeed.
    ///
    /// A malformed backing file will not fix itself between attempts.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::Malformed(_) | Self::OpenError(_))
    }
}
