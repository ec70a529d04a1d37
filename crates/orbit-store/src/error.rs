use thiserror::Error;

/// Errors produced by the store layer.
///
/// Only `signup` (and the privileged create-account wrapper above it)
/// surfaces a fault the caller must catch. Every other operation resolves a
/// missing entity as a `bool` / `Option` return so callers check values
/// instead of catching.
#[derive(Error, Debug)]
pub enum StoreError {
    /// An account with the given email already exists.
    #[error("An account with this email already exists")]
    DuplicateEmail,

    /// A lookup expected exactly one record but found none.
    #[error("Record not found")]
    NotFound,

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. reading or writing the snapshot file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization failure.
    #[error("Snapshot error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
