//! Error types for entity storage.

use thiserror::Error;

/// Errors that can occur while looking up persisted objects.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// An object without an identifier cannot be stored.
    #[error("{0} object has no identifier")]
    MissingIdentifier(String),

    /// The storage backend failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Convenience type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
