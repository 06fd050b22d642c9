//! Native values written into entity slots.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::TypeError;
use crate::related::Related;

/// Canonical text form of [`FieldValue::DateTime`].
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Canonical text form of [`FieldValue::Date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Canonical text form of [`FieldValue::Time`].
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// A value after type conversion, ready to be assigned to an entity member.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
    /// Structured data kept as-is.
    Json(Value),
    /// A single related object (to-one association).
    Related(Related),
    /// An ordered collection of related objects (to-many association).
    Collection(Vec<Related>),
}

impl FieldValue {
    /// Structural mapping of a raw input value, used when no conversion
    /// type applies.
    pub fn from_raw(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::String(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::Json(value.clone()),
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::DateTime(_) => "datetime",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::Json(_) => "json",
            Self::Related(_) => "related",
            Self::Collection(_) => "collection",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert into a concrete member type.
    pub fn extract<T: FromFieldValue>(self) -> Result<T, TypeError> {
        T::from_field_value(self)
    }

    /// Render as JSON. Related objects render as `{"type", "id"}` pairs.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => Value::from(*f),
            Self::String(s) => Value::String(s.clone()),
            Self::DateTime(dt) => Value::String(dt.format(DATETIME_FORMAT).to_string()),
            Self::Date(d) => Value::String(d.format(DATE_FORMAT).to_string()),
            Self::Time(t) => Value::String(t.format(TIME_FORMAT).to_string()),
            Self::Json(v) => v.clone(),
            Self::Related(r) => r.to_json(),
            Self::Collection(items) => Value::Array(items.iter().map(Related::to_json).collect()),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Conversion from a [`FieldValue`] into a concrete member type.
///
/// Entity implementations use this in their mutators and slot writers.
pub trait FromFieldValue: Sized {
    fn from_field_value(value: FieldValue) -> Result<Self, TypeError>;
}

impl FromFieldValue for FieldValue {
    fn from_field_value(value: FieldValue) -> Result<Self, TypeError> {
        Ok(value)
    }
}

impl<T: FromFieldValue> FromFieldValue for Option<T> {
    fn from_field_value(value: FieldValue) -> Result<Self, TypeError> {
        match value {
            FieldValue::Null => Ok(None),
            other => T::from_field_value(other).map(Some),
        }
    }
}

impl FromFieldValue for bool {
    fn from_field_value(value: FieldValue) -> Result<Self, TypeError> {
        match value {
            FieldValue::Bool(b) => Ok(b),
            other => Err(TypeError::mismatch("bool", &other)),
        }
    }
}

impl FromFieldValue for i64 {
    fn from_field_value(value: FieldValue) -> Result<Self, TypeError> {
        match value {
            FieldValue::Int(i) => Ok(i),
            other => Err(TypeError::mismatch("int", &other)),
        }
    }
}

impl FromFieldValue for i32 {
    fn from_field_value(value: FieldValue) -> Result<Self, TypeError> {
        match value {
            FieldValue::Int(i) => i32::try_from(i).map_err(|_| TypeError::Mismatch {
                expected: "i32",
                actual: "int",
            }),
            other => Err(TypeError::mismatch("int", &other)),
        }
    }
}

impl FromFieldValue for f64 {
    fn from_field_value(value: FieldValue) -> Result<Self, TypeError> {
        match value {
            FieldValue::Float(f) => Ok(f),
            FieldValue::Int(i) => Ok(i as f64),
            other => Err(TypeError::mismatch("float", &other)),
        }
    }
}

impl FromFieldValue for String {
    fn from_field_value(value: FieldValue) -> Result<Self, TypeError> {
        match value {
            FieldValue::String(s) => Ok(s),
            other => Err(TypeError::mismatch("string", &other)),
        }
    }
}

impl FromFieldValue for NaiveDateTime {
    fn from_field_value(value: FieldValue) -> Result<Self, TypeError> {
        match value {
            FieldValue::DateTime(dt) => Ok(dt),
            other => Err(TypeError::mismatch("datetime", &other)),
        }
    }
}

impl FromFieldValue for NaiveDate {
    fn from_field_value(value: FieldValue) -> Result<Self, TypeError> {
        match value {
            FieldValue::Date(d) => Ok(d),
            other => Err(TypeError::mismatch("date", &other)),
        }
    }
}

impl FromFieldValue for NaiveTime {
    fn from_field_value(value: FieldValue) -> Result<Self, TypeError> {
        match value {
            FieldValue::Time(t) => Ok(t),
            other => Err(TypeError::mismatch("time", &other)),
        }
    }
}

impl FromFieldValue for Value {
    fn from_field_value(value: FieldValue) -> Result<Self, TypeError> {
        match value {
            FieldValue::Json(v) => Ok(v),
            other => Ok(other.to_json()),
        }
    }
}

impl FromFieldValue for Related {
    fn from_field_value(value: FieldValue) -> Result<Self, TypeError> {
        match value {
            FieldValue::Related(r) => Ok(r),
            other => Err(TypeError::mismatch("related", &other)),
        }
    }
}

impl FromFieldValue for Vec<Related> {
    fn from_field_value(value: FieldValue) -> Result<Self, TypeError> {
        match value {
            FieldValue::Collection(items) => Ok(items),
            other => Err(TypeError::mismatch("collection", &other)),
        }
    }
}

macro_rules! impl_from_for_field_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for_field_value! {
    bool => Bool,
    i64 => Int,
    i32 => Int,
    f64 => Float,
    String => String,
    &str => String,
    NaiveDateTime => DateTime,
    NaiveDate => Date,
    NaiveTime => Time,
    Related => Related,
    Vec<Related> => Collection,
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
