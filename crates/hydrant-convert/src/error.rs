use serde_json::Value;
use thiserror::Error;

/// Errors produced while converting a raw input value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConvertError {
    /// The raw value cannot be represented as the declared type.
    #[error("cannot convert {value} to {type_name}: {reason}")]
    InvalidValue {
        type_name: String,
        value: Value,
        reason: String,
    },
}

impl ConvertError {
    pub fn invalid(type_name: &str, value: &Value, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            type_name: type_name.to_string(),
            value: value.clone(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for conversions.
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;
