//! Error types for usage report core operations.

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while resolving report parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// An explicit date did not match `YYYY-MM-DD`.
    #[error("invalid date format: {input:?} (expected YYYY-MM-DD)")]
    InvalidDateFormat {
        /// The rejected input.
        input: String,
    },

    /// A report scope name was not recognized.
    #[error("unknown report scope: {0:?} (expected daily, weekly, monthly or all)")]
    UnknownScope(String),
}
