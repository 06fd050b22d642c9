use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TypeError;
use crate::value::FieldValue;

/// Identifier of a persisted object.
///
/// Input payloads carry identifiers either as JSON numbers or as strings
/// (JSON:API mandates strings). Integral numbers become [`Identifier::Int`];
/// everything else that is scalar keeps its textual form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Int(i64),
    Str(String),
}

impl Identifier {
    /// Read an identifier from a raw input value.
    ///
    /// Returns `None` for booleans, nulls, arrays, and objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Str(n.to_string()),
            }),
            Value::String(s) => Some(Self::Str(s.clone())),
            _ => None,
        }
    }

    /// Like [`Self::from_value`] but reports what was rejected.
    pub fn try_from_value(value: &Value) -> Result<Self, TypeError> {
        Self::from_value(value).ok_or_else(|| TypeError::InvalidIdentifier(value.to_string()))
    }

    /// Read an identifier back out of a slot value.
    pub fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Int(i) => Some(Self::Int(*i)),
            FieldValue::String(s) => Some(Self::Str(s.clone())),
            _ => None,
        }
    }

    /// The identifier as a raw JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(i) => Value::from(*i),
            Self::Str(s) => Value::String(s.clone()),
        }
    }

    /// The identifier as a slot value.
    pub fn to_field_value(&self) -> FieldValue {
        match self {
            Self::Int(i) => FieldValue::Int(*i),
            Self::Str(s) => FieldValue::String(s.clone()),
        }
    }

    /// Canonical form for keyed lookups: numeric strings become integers,
    /// so `"7"` and `7` name the same object.
    pub fn canonical(&self) -> Self {
        match self {
            Self::Str(s) => s.parse().map_or_else(|_| self.clone(), Self::Int),
            Self::Int(_) => self.clone(),
        }
    }

    /// Integer form, parsing numeric strings.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Str(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Identifier {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for Identifier {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

impl From<String> for Identifier {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_and_strings_are_identifiers() {
        assert_eq!(Identifier::from_value(&json!(7)), Some(Identifier::Int(7)));
        assert_eq!(
            Identifier::from_value(&json!("abc")),
            Some(Identifier::Str("abc".into()))
        );
        assert_eq!(
            Identifier::from_value(&json!(1.5)),
            Some(Identifier::Str("1.5".into()))
        );
    }

    #[test]
    fn composites_are_rejected() {
        assert!(Identifier::from_value(&json!(null)).is_none());
        assert!(Identifier::from_value(&json!(true)).is_none());
        assert!(Identifier::from_value(&json!([1])).is_none());
        assert!(Identifier::from_value(&json!({"id": 1})).is_none());

        let err = Identifier::try_from_value(&json!([1])).unwrap_err();
        assert_eq!(err, TypeError::InvalidIdentifier("[1]".into()));
    }

    #[test]
    fn numeric_strings_parse_as_integers() {
        assert_eq!(Identifier::from("42").as_i64(), Some(42));
        assert_eq!(Identifier::from("x").as_i64(), None);
        assert_eq!(Identifier::from("42").canonical(), Identifier::Int(42));
        assert_eq!(Identifier::from("x").canonical(), Identifier::from("x"));
    }

    #[test]
    fn display_is_bare() {
        assert_eq!(Identifier::Int(3).to_string(), "3");
        assert_eq!(Identifier::from("u-1").to_string(), "u-1");
    }

    #[test]
    fn serde_is_untagged() {
        let json = serde_json::to_string(&Identifier::Int(5)).unwrap();
        assert_eq!(json, "5");
        let parsed: Identifier = serde_json::from_str("\"a\"").unwrap();
        assert_eq!(parsed, Identifier::Str("a".into()));
    }
}
