use thiserror::Error;

/// Errors produced by value and entity-member operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// The object has no mutator or slot with this name.
    #[error("no such member: {0}")]
    MissingMember(String),

    /// A value of the wrong kind was supplied for a member.
    #[error("type mismatch: expected {expected}, got {actual}")]
    Mismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// A raw value could not be read as an identifier.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

impl TypeError {
    /// Build a mismatch error for `value` when `expected` was required.
    pub fn mismatch(expected: &'static str, value: &crate::FieldValue) -> Self {
        Self::Mismatch {
            expected,
            actual: value.kind(),
        }
    }
}
