use hydrant_types::FieldValue;
use serde_json::Value;

use crate::error::ConvertResult;

/// Converts a raw scalar into the native representation of one declared
/// type.
pub trait Converter: Send + Sync {
    fn convert(&self, raw: &Value) -> ConvertResult<FieldValue>;
}

impl<F> Converter for F
where
    F: Fn(&Value) -> ConvertResult<FieldValue> + Send + Sync,
{
    fn convert(&self, raw: &Value) -> ConvertResult<FieldValue> {
        self(raw)
    }
}

/// Conversion service keyed by declared field type.
///
/// Implementations must pass the value through unchanged (structurally,
/// see [`FieldValue::from_raw`]) when `declared` is `None` or names a type
/// they do not know.
pub trait TypeConverter: Send + Sync {
    fn convert(&self, declared: Option<&str>, raw: &Value) -> ConvertResult<FieldValue>;
}
