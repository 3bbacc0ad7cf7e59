//! Error types for running a batch.

use usage_report_core::CoreError;
use usage_report_render::RenderError;
use usage_report_store::StoreError;

/// Result type for batch operations.
pub type Result<T> = std::result::Result<T, RunError>;

/// Failures that stop a batch before or instead of writing documents.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// No usable snapshot.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Assets could not be loaded.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Bad scope or date input.
    #[error(transparent)]
    Input(#[from] CoreError),
}
