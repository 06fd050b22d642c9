//! Error types for model metadata operations.

use thiserror::Error;

/// Errors raised while building or querying the object model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No metadata is registered for this type.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// Metadata for this type was registered twice.
    #[error("type already registered: {0}")]
    DuplicateType(String),

    /// A field or association name is declared more than once on a type.
    #[error("duplicate member `{member}` on type {type_name}")]
    DuplicateMember { type_name: String, member: String },

    /// An association points at a type that is neither modelled nor foreign.
    #[error("association `{association}` on type {type_name} targets unknown type {target}")]
    UnknownTarget {
        type_name: String,
        association: String,
        target: String,
    },

    /// TOML schema could not be parsed.
    #[error("schema parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON schema could not be parsed.
    #[error("schema parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading a schema file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for model operations.
pub type ModelResult<T> = std::result::Result<T, ModelError>;
