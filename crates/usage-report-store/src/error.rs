//! Error types for snapshot loading.

use std::path::PathBuf;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backup directory exists but contains no backup file.
    #[error("no backup files found in {}", dir.display())]
    NotFound {
        /// The directory that was searched.
        dir: PathBuf,
    },

    /// The backup directory is missing or cannot be listed.
    #[error("backup directory {} is unavailable: {source}", dir.display())]
    DirectoryUnavailable {
        /// The directory that was searched.
        dir: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The selected backup could not be read.
    #[error("failed to read backup {}: {source}", path.display())]
    Io {
        /// The backup file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The selected backup is not a well-formed snapshot.
    #[error("failed to parse backup {}: {source}", path.display())]
    Parse {
        /// The backup file.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}
