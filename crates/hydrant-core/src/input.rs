//! Input bag helpers: key normalization, emptiness, relation items.

use hydrant_types::{camelize, Identifier, InputBag};
use serde_json::Value;
use tracing::debug;

use crate::error::{HydrateError, HydrateResult};

/// Borrow `value` as an input bag.
pub fn as_input_bag(value: &Value) -> HydrateResult<&InputBag> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(HydrateError::InvalidInput("null")),
        Value::Bool(_) => Err(HydrateError::InvalidInput("bool")),
        Value::Number(_) => Err(HydrateError::InvalidInput("number")),
        Value::String(_) => Err(HydrateError::InvalidInput("string")),
        Value::Array(_) => Err(HydrateError::InvalidInput("array")),
    }
}

/// Camelize every key of `input`, keeping input order.
///
/// Two keys that normalize to the same name collide. Which one survives is
/// unspecified; currently the later key wins.
pub fn normalize_keys(input: &InputBag) -> InputBag {
    let mut normalized = InputBag::new();
    for (key, value) in input {
        let name = camelize(key);
        if normalized.insert(name.clone(), value.clone()).is_some() {
            debug!(key = key.as_str(), normalized = name.as_str(), "input keys collide after normalization");
        }
    }
    normalized
}

/// Whether an association entry counts as absent.
///
/// `null`, `false`, `""`, `[]` and `{}` are empty. Zero is not.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(_) => false,
    }
}

/// One element of a relation: an identifier to resolve, or the input for a
/// new nested object.
#[derive(Clone, Debug, PartialEq)]
pub enum RelationItem {
    Id(Identifier),
    Nested(InputBag),
}

impl RelationItem {
    /// Objects become nested input; anything else must be an identifier.
    pub fn from_value(association: &str, value: &Value) -> HydrateResult<Self> {
        match value {
            Value::Object(map) => Ok(Self::Nested(map.clone())),
            other => Identifier::from_value(other)
                .map(Self::Id)
                .ok_or_else(|| HydrateError::invalid_identifier(association, other)),
        }
    }

    /// Read a to-many entry. A bare value is a one-element sequence.
    pub fn sequence(association: &str, value: &Value) -> HydrateResult<Vec<Self>> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| Self::from_value(association, item))
                .collect(),
            single => Ok(vec![Self::from_value(association, single)?]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> InputBag {
        as_input_bag(&value).unwrap().clone()
    }

    #[test]
    fn keys_are_camelized_in_order() {
        let normalized = normalize_keys(&bag(json!({
            "street_address": "Road",
            "start-time": "x",
            "id": 1,
        })));
        let keys: Vec<_> = normalized.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["streetAddress", "startTime", "id"]);
    }

    #[test]
    fn colliding_keys_keep_the_last_value() {
        let normalized = normalize_keys(&bag(json!({
            "street_address": "first",
            "streetAddress": "second",
        })));
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized["streetAddress"], json!("second"));
    }

    #[test]
    fn emptiness() {
        for empty in [json!(null), json!(false), json!(""), json!([]), json!({})] {
            assert!(is_empty_value(&empty), "{empty} should be empty");
        }
        for present in [json!(0), json!("0"), json!(true), json!([0]), json!({"id": 1})] {
            assert!(!is_empty_value(&present), "{present} should not be empty");
        }
    }

    #[test]
    fn relation_items_from_values() {
        assert_eq!(
            RelationItem::from_value("company", &json!(1)).unwrap(),
            RelationItem::Id(Identifier::Int(1))
        );
        assert_eq!(
            RelationItem::from_value("company", &json!("abc")).unwrap(),
            RelationItem::Id(Identifier::Str("abc".into()))
        );
        assert!(matches!(
            RelationItem::from_value("company", &json!({"name": "P1"})).unwrap(),
            RelationItem::Nested(_)
        ));
        let err = RelationItem::from_value("company", &json!(true)).unwrap_err();
        assert!(matches!(err, HydrateError::InvalidIdentifier { ref association, .. } if association == "company"));
    }

    #[test]
    fn bare_values_are_one_element_sequences() {
        let items = RelationItem::sequence("permissions", &json!(4)).unwrap();
        assert_eq!(items, vec![RelationItem::Id(Identifier::Int(4))]);
        let items = RelationItem::sequence("permissions", &json!([1, 2, 2])).unwrap();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn non_objects_are_not_input_bags() {
        assert_eq!(
            as_input_bag(&json!([1])).unwrap_err(),
            HydrateError::InvalidInput("array")
        );
    }
}
