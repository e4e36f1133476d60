//! Error types for the tagging domain.
//!
//! Uses `thiserror` for ergonomic error definitions.

use thiserror::Error;

/// Errors raised by a [`TagStore`](crate::store::TagStore) backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A precondition on the arguments was violated (empty IDs, empty tag list).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias using our StoreError.
pub type Result<T> = std::result::Result<T, StoreError>;
