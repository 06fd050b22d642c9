//! Error types for hydration.

use std::fmt;

use hydrant_access::AccessError;
use hydrant_convert::ConvertError;
use hydrant_model::ModelError;
use hydrant_store::StoreError;
use serde_json::Value;
use thiserror::Error;

/// Errors that can abort a hydration call.
///
/// Identifiers that do not resolve are not errors; the association is
/// simply left unset.
#[derive(Debug, Error)]
pub enum HydrateError {
    /// The target type name has no registered factory.
    #[error("invalid hydration target: {0}")]
    InvalidTarget(String),

    /// No metadata is registered for the type being hydrated.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// The input was not a key/value document.
    #[error("invalid input: expected an object, got {0}")]
    InvalidInput(&'static str),

    /// A value could not be assigned to the object.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// A document relationship matches no association and no delegate
    /// accepted it.
    #[error("relation `{name}` association not found")]
    UnknownRelation { name: String },

    /// An association entry that must be an identifier is not one.
    #[error("invalid identifier for association `{association}`: {value}")]
    InvalidIdentifier { association: String, value: Value },

    /// Relationship data has the wrong shape for the association.
    #[error("association `{association}` expects {expected}")]
    CardinalityMismatch {
        association: String,
        expected: &'static str,
    },

    /// The foreign relation delegate declined to attach a relation.
    #[error("foreign relation `{relation}` was not attached: {reason}")]
    ForeignRelationSkipped { relation: String, reason: String },

    /// The type converter rejected a raw value.
    #[error(transparent)]
    Conversion(#[from] ConvertError),

    /// Reference resolution failed in the storage layer.
    #[error("reference resolution failed: {0}")]
    Resolve(#[from] StoreError),

    /// Metadata could not be built or queried.
    #[error("model error: {0}")]
    Model(ModelError),

    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl HydrateError {
    /// Build an [`HydrateError::InvalidIdentifier`].
    pub fn invalid_identifier(association: impl Into<String>, value: &Value) -> Self {
        Self::InvalidIdentifier {
            association: association.into(),
            value: value.clone(),
        }
    }

    /// Build an [`HydrateError::UnknownRelation`].
    pub fn unknown_relation(name: impl Into<String>) -> Self {
        Self::UnknownRelation { name: name.into() }
    }
}

impl From<ModelError> for HydrateError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownType(name) => Self::UnknownType(name),
            other => Self::Model(other),
        }
    }
}

impl PartialEq for HydrateError {
    fn eq(&self, other: &Self) -> bool {
        // Compare by display representation for test convenience.
        fmt::format(format_args!("{self}")) == fmt::format(format_args!("{other}"))
    }
}

/// Convenience type alias for hydration.
pub type HydrateResult<T> = std::result::Result<T, HydrateError>;
