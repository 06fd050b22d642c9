use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use hydrant_types::FieldValue;
use serde_json::Value;

use crate::builtin::Builtin;
use crate::error::ConvertResult;
use crate::traits::{Converter, TypeConverter};

/// [`TypeConverter`] backed by a table of named [`Converter`]s.
///
/// Null raw values convert to [`FieldValue::Null`] for every type.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn Converter>>,
}

impl ConverterRegistry {
    /// An empty registry: every value passes through.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with every [`Builtin`] type name.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, builtin) in Builtin::NAMES {
            registry.register(*name, *builtin);
        }
        registry
    }

    /// Register (or replace) the converter for `type_name`.
    pub fn register(&mut self, type_name: impl Into<String>, converter: impl Converter + 'static) {
        self.converters.insert(type_name.into(), Arc::new(converter));
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.converters.contains_key(type_name)
    }

    pub fn get(&self, type_name: &str) -> Option<&Arc<dyn Converter>> {
        self.converters.get(type_name)
    }
}

impl TypeConverter for ConverterRegistry {
    fn convert(&self, declared: Option<&str>, raw: &Value) -> ConvertResult<FieldValue> {
        if raw.is_null() {
            return Ok(FieldValue::Null);
        }
        match declared.and_then(|name| self.converters.get(name)) {
            Some(converter) => converter.convert(raw),
            None => Ok(FieldValue::from_raw(raw)),
        }
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.converters.keys().collect();
        names.sort();
        f.debug_struct("ConverterRegistry")
            .field("types", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use serde_json::json;

    #[test]
    fn registered_types_are_converted() {
        let registry = ConverterRegistry::with_builtins();
        assert_eq!(
            registry.convert(Some("integer"), &json!("1")).unwrap(),
            FieldValue::Int(1)
        );
        assert_eq!(
            registry.convert(Some("boolean"), &json!("true")).unwrap(),
            FieldValue::Bool(true)
        );
    }

    #[test]
    fn unregistered_and_undeclared_pass_through() {
        let registry = ConverterRegistry::with_builtins();
        assert_eq!(
            registry.convert(Some("money"), &json!("1")).unwrap(),
            FieldValue::from("1")
        );
        assert_eq!(registry.convert(None, &json!(3)).unwrap(), FieldValue::Int(3));
    }

    #[test]
    fn nulls_stay_null() {
        let registry = ConverterRegistry::with_builtins();
        assert_eq!(
            registry.convert(Some("datetime"), &Value::Null).unwrap(),
            FieldValue::Null
        );
    }

    #[test]
    fn custom_converters_override_builtins() {
        let mut registry = ConverterRegistry::with_builtins();
        registry.register("string", |raw: &Value| {
            raw.as_str()
                .map(|s| FieldValue::String(s.to_uppercase()))
                .ok_or_else(|| ConvertError::invalid("string", raw, "not text"))
        });
        assert_eq!(
            registry.convert(Some("string"), &json!("fred")).unwrap(),
            FieldValue::from("FRED")
        );
        assert!(registry.convert(Some("string"), &json!(1)).is_err());
    }

    #[test]
    fn conversion_errors_carry_the_type() {
        let registry = ConverterRegistry::with_builtins();
        let err = registry.convert(Some("integer"), &json!("x")).unwrap_err();
        let ConvertError::InvalidValue { type_name, .. } = err;
        assert_eq!(type_name, "integer");
    }
}
