//! Error types for report rendering.

use std::path::PathBuf;

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while building or writing reports.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A font or logo asset could not be loaded. Fatal for the whole batch.
    #[error("failed to load asset {}: {reason}", path.display())]
    AssetLoad {
        /// The asset path.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// One administrator's document could not be written.
    #[error("failed to write report for {admin:?} to {}: {source}", path.display())]
    Write {
        /// Display name of the administrator.
        admin: String,
        /// The target document path.
        path: PathBuf,
        /// The engine failure.
        source: EngineError,
    },
}

impl RenderError {
    /// The administrator a write failure belongs to, if any.
    #[must_use]
    pub fn admin(&self) -> Option<&str> {
        match self {
            Self::Write { admin, .. } => Some(admin),
            Self::AssetLoad { .. } => None,
        }
    }
}

/// Errors raised by a document engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The engine rejected the document.
    #[error("document error: {0}")]
    Document(String),
}
