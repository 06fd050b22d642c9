//! Error types for field access.

use hydrant_types::TypeError;
use thiserror::Error;

/// Errors raised while assigning a value to an object member.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// Neither a mutator nor a slot with this name exists on the object.
    #[error("unknown field `{field}` on type {type_name}")]
    UnknownField { type_name: String, field: String },

    /// The member exists but rejected the value.
    #[error("cannot assign `{field}` on type {type_name}: {source}")]
    TypeMismatch {
        type_name: String,
        field: String,
        #[source]
        source: TypeError,
    },
}

/// Convenience type alias for field access.
pub type AccessResult<T> = std::result::Result<T, AccessError>;
