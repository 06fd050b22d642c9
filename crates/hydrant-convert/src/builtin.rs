//! Built-in converters for the common declared field types.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use hydrant_types::value::{DATETIME_FORMAT, DATE_FORMAT, TIME_FORMAT};
use hydrant_types::FieldValue;
use serde_json::Value;

use crate::error::{ConvertError, ConvertResult};
use crate::traits::Converter;

/// Extra datetime layouts accepted besides [`DATETIME_FORMAT`].
const DATETIME_FALLBACK_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// The built-in conversion types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Integer,
    Boolean,
    Float,
    Decimal,
    Text,
    DateTime,
    Date,
    Time,
    Json,
    SimpleArray,
}

impl Builtin {
    /// Declared type names served by each built-in, as registered by
    /// [`crate::ConverterRegistry::with_builtins`].
    pub const NAMES: &'static [(&'static str, Builtin)] = &[
        ("integer", Builtin::Integer),
        ("smallint", Builtin::Integer),
        ("bigint", Builtin::Integer),
        ("boolean", Builtin::Boolean),
        ("float", Builtin::Float),
        ("decimal", Builtin::Decimal),
        ("string", Builtin::Text),
        ("text", Builtin::Text),
        ("guid", Builtin::Text),
        ("datetime", Builtin::DateTime),
        ("datetime_immutable", Builtin::DateTime),
        ("date", Builtin::Date),
        ("time", Builtin::Time),
        ("json", Builtin::Json),
        ("simple_array", Builtin::SimpleArray),
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Text => "string",
            Self::DateTime => "datetime",
            Self::Date => "date",
            Self::Time => "time",
            Self::Json => "json",
            Self::SimpleArray => "simple_array",
        }
    }

    fn invalid(self, raw: &Value, reason: impl Into<String>) -> ConvertError {
        ConvertError::invalid(self.name(), raw, reason)
    }

    fn to_int(self, raw: &Value) -> ConvertResult<FieldValue> {
        match raw {
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Ok(FieldValue::Int(i)),
                (None, Some(f)) if f.fract() != 0.0 => Err(self.invalid(raw, "not an integer")),
                // `i64::MAX as f64` is 2^63, one past the largest i64.
                (None, Some(f)) if f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(FieldValue::Int(f as i64))
                }
                _ => Err(self.invalid(raw, "out of range")),
            },
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(FieldValue::Int)
                .map_err(|e| self.invalid(raw, e.to_string())),
            Value::Bool(b) => Ok(FieldValue::Int(i64::from(*b))),
            _ => Err(self.invalid(raw, "expected a number")),
        }
    }

    fn to_bool(self, raw: &Value) -> ConvertResult<FieldValue> {
        match raw {
            Value::Bool(b) => Ok(FieldValue::Bool(*b)),
            Value::Number(n) => Ok(FieldValue::Bool(n.as_f64().is_some_and(|f| f != 0.0))),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(FieldValue::Bool(true)),
                "false" | "0" | "no" | "off" | "" => Ok(FieldValue::Bool(false)),
                _ => Err(self.invalid(raw, "not a boolean literal")),
            },
            _ => Err(self.invalid(raw, "expected a boolean")),
        }
    }

    fn to_float(self, raw: &Value) -> ConvertResult<FieldValue> {
        match raw {
            Value::Number(n) => n
                .as_f64()
                .map(FieldValue::Float)
                .ok_or_else(|| self.invalid(raw, "out of range")),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(FieldValue::Float)
                .map_err(|e| self.invalid(raw, e.to_string())),
            _ => Err(self.invalid(raw, "expected a number")),
        }
    }

    fn to_text(self, raw: &Value) -> ConvertResult<FieldValue> {
        match raw {
            Value::String(s) => Ok(FieldValue::String(s.clone())),
            Value::Number(n) => Ok(FieldValue::String(n.to_string())),
            Value::Bool(b) => Ok(FieldValue::String(b.to_string())),
            _ => Err(self.invalid(raw, "expected a scalar")),
        }
    }

    fn to_datetime(self, raw: &Value) -> ConvertResult<FieldValue> {
        match raw {
            Value::String(s) => parse_datetime(s.trim())
                .map(FieldValue::DateTime)
                .ok_or_else(|| self.invalid(raw, "unrecognized datetime layout")),
            Value::Number(n) => n
                .as_i64()
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .map(|dt| FieldValue::DateTime(dt.naive_utc()))
                .ok_or_else(|| self.invalid(raw, "timestamp out of range")),
            _ => Err(self.invalid(raw, "expected a string or timestamp")),
        }
    }

    fn to_date(self, raw: &Value) -> ConvertResult<FieldValue> {
        let s = raw
            .as_str()
            .ok_or_else(|| self.invalid(raw, "expected a string"))?;
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(FieldValue::Date)
            .map_err(|e| self.invalid(raw, e.to_string()))
    }

    fn to_time(self, raw: &Value) -> ConvertResult<FieldValue> {
        let s = raw
            .as_str()
            .ok_or_else(|| self.invalid(raw, "expected a string"))?;
        NaiveTime::parse_from_str(s.trim(), TIME_FORMAT)
            .map(FieldValue::Time)
            .map_err(|e| self.invalid(raw, e.to_string()))
    }

    fn to_json(self, raw: &Value) -> ConvertResult<FieldValue> {
        match raw {
            Value::String(s) => serde_json::from_str(s)
                .map(FieldValue::Json)
                .map_err(|e| self.invalid(raw, e.to_string())),
            other => Ok(FieldValue::Json(other.clone())),
        }
    }

    fn to_simple_array(self, raw: &Value) -> ConvertResult<FieldValue> {
        match raw {
            Value::String(s) if s.is_empty() => Ok(FieldValue::Json(Value::Array(Vec::new()))),
            Value::String(s) => Ok(FieldValue::Json(Value::Array(
                s.split(',').map(|part| Value::String(part.to_string())).collect(),
            ))),
            Value::Array(_) => Ok(FieldValue::Json(raw.clone())),
            _ => Err(self.invalid(raw, "expected a comma separated string or array")),
        }
    }
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATETIME_FORMAT) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    DATETIME_FALLBACK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

impl Converter for Builtin {
    fn convert(&self, raw: &Value) -> ConvertResult<FieldValue> {
        match self {
            Self::Integer => self.to_int(raw),
            Self::Boolean => self.to_bool(raw),
            Self::Float => self.to_float(raw),
            Self::Decimal => match raw {
                Value::Number(n) => Ok(FieldValue::String(n.to_string())),
                _ => self.to_text(raw),
            },
            Self::Text => self.to_text(raw),
            Self::DateTime => self.to_datetime(raw),
            Self::Date => self.to_date(raw),
            Self::Time => self.to_time(raw),
            Self::Json => self.to_json(raw),
            Self::SimpleArray => self.to_simple_array(raw),
        }
    }
}
