//! Reading the parts of a JSON:API document.
//!
//! ```json
//! {
//!   "data": {
//!     "id": 1,
//!     "attributes": { "name": "Fred Jones" },
//!     "relationships": {
//!       "company": { "data": { "id": 1, "type": "company" } },
//!       "permissions": { "data": [{ "name": "New Permission" }] }
//!     }
//!   }
//! }
//! ```

use hydrant_core::{as_input_bag, HydrateError, HydrateResult, RelationItem};
use hydrant_types::{Identifier, InputBag};
use serde_json::Value;

/// The resource object: the `data` member when it is an object, the
/// document itself otherwise.
pub fn unwrap_data(document: &InputBag) -> &InputBag {
    match document.get("data") {
        Some(Value::Object(data)) => data,
        _ => document,
    }
}

/// The resource's `attributes` with its `id` folded in.
pub fn attributes(resource: &InputBag) -> InputBag {
    let mut attributes = match resource.get("attributes") {
        Some(Value::Object(map)) => map.clone(),
        _ => InputBag::new(),
    };
    if let Some(id) = resource.get("id") {
        attributes.insert("id".to_string(), id.clone());
    }
    attributes
}

/// The resource's `relationships` member, if any.
pub fn relationships(resource: &InputBag) -> HydrateResult<Option<&InputBag>> {
    match resource.get("relationships") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => as_input_bag(value).map(Some),
    }
}

/// Input for a new object built from inline attributes.
pub fn inline_resource(attributes: InputBag) -> InputBag {
    let mut resource = InputBag::new();
    resource.insert("attributes".to_string(), Value::Object(attributes));
    resource
}

/// A `{ "type", "id" }` pair naming an existing resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceIdentifier {
    pub resource_type: String,
    pub id: Identifier,
}

impl ResourceIdentifier {
    /// Read a resource identifier. Both members must be present; objects
    /// lacking either one are inline attributes, not identifiers.
    pub fn from_object(relation: &str, object: &InputBag) -> HydrateResult<Option<Self>> {
        let (Some(id), Some(Value::String(resource_type))) = (object.get("id"), object.get("type"))
        else {
            return Ok(None);
        };
        if id.is_null() {
            return Ok(None);
        }
        let id = Identifier::from_value(id)
            .ok_or_else(|| HydrateError::invalid_identifier(relation, id))?;
        Ok(Some(Self {
            resource_type: resource_type.clone(),
            id,
        }))
    }
}

/// One element of relationship data.
#[derive(Clone, Debug, PartialEq)]
pub enum ResourceLinkage {
    /// An existing resource to resolve.
    Identifier(ResourceIdentifier),
    /// Attributes of a new resource to build.
    Inline(InputBag),
}

impl ResourceLinkage {
    fn from_value(relation: &str, value: &Value) -> HydrateResult<Self> {
        let Value::Object(object) = value else {
            return Err(HydrateError::invalid_identifier(relation, value));
        };
        Ok(match ResourceIdentifier::from_object(relation, object)? {
            Some(identifier) => Self::Identifier(identifier),
            None => Self::Inline(object.clone()),
        })
    }

    /// The core relation item: identifiers resolve, inline attributes are
    /// wrapped as a resource object for nested hydration.
    pub fn into_relation_item(self) -> RelationItem {
        match self {
            Self::Identifier(identifier) => RelationItem::Id(identifier.id),
            Self::Inline(attributes) => RelationItem::Nested(inline_resource(attributes)),
        }
    }
}

/// The `data` member of a relationship object.
#[derive(Clone, Debug, PartialEq)]
pub enum RelationshipData {
    /// `data` is `null` or absent.
    Empty,
    One(ResourceLinkage),
    Many(Vec<ResourceLinkage>),
}

impl RelationshipData {
    pub fn parse(relation: &str, relationship: &Value) -> HydrateResult<Self> {
        let relationship = as_input_bag(relationship)?;
        match relationship.get("data") {
            None | Some(Value::Null) => Ok(Self::Empty),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| ResourceLinkage::from_value(relation, item))
                .collect::<HydrateResult<Vec<_>>>()
                .map(Self::Many),
            Some(single) => ResourceLinkage::from_value(relation, single).map(Self::One),
        }
    }
}

/// Resource type named by a relationship: `data.type`, or the `type` of
/// the first element when `data` is an array.
pub fn relationship_type(relationship: &Value) -> Option<&str> {
    let data = relationship.get("data")?;
    let resource = match data {
        Value::Array(items) => items.first()?,
        other => other,
    };
    resource.get("type")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> InputBag {
        as_input_bag(&value).unwrap().clone()
    }

    #[test]
    fn data_envelope_is_optional() {
        let enveloped = bag(json!({"data": {"id": 1}}));
        assert_eq!(unwrap_data(&enveloped), &bag(json!({"id": 1})));
        let bare = bag(json!({"id": 1}));
        assert_eq!(unwrap_data(&bare), &bare);
        let listed = bag(json!({"data": [1]}));
        assert_eq!(unwrap_data(&listed), &listed);
    }

    #[test]
    fn id_is_folded_into_attributes() {
        let resource = bag(json!({"id": 1, "attributes": {"name": "Fred"}}));
        assert_eq!(attributes(&resource), bag(json!({"name": "Fred", "id": 1})));
        assert_eq!(attributes(&bag(json!({}))), InputBag::new());
    }

    #[test]
    fn identifiers_need_both_id_and_type() {
        let parse = |v: Value| ResourceIdentifier::from_object("company", &bag(v)).unwrap();
        assert_eq!(
            parse(json!({"id": 1, "type": "company"})),
            Some(ResourceIdentifier {
                resource_type: "company".into(),
                id: Identifier::Int(1)
            })
        );
        assert_eq!(parse(json!({"id": 1})), None);
        assert_eq!(parse(json!({"type": "company", "name": "x"})), None);
        assert_eq!(parse(json!({"id": null, "type": "company"})), None);
    }

    #[test]
    fn malformed_identifiers_are_rejected() {
        let object = bag(json!({"id": [1], "type": "company"}));
        let err = ResourceIdentifier::from_object("company", &object).unwrap_err();
        assert!(matches!(err, HydrateError::InvalidIdentifier { .. }));
    }

    #[test]
    fn relationship_data_shapes() {
        assert_eq!(
            RelationshipData::parse("company", &json!({"data": null})).unwrap(),
            RelationshipData::Empty
        );
        assert_eq!(
            RelationshipData::parse("company", &json!({})).unwrap(),
            RelationshipData::Empty
        );
        assert!(matches!(
            RelationshipData::parse("company", &json!({"data": {"id": 1, "type": "company"}})).unwrap(),
            RelationshipData::One(ResourceLinkage::Identifier(_))
        ));
        let relationship = json!({"data": [{"id": 1, "type": "permission"}, {"name": "P2"}]});
        let RelationshipData::Many(items) = RelationshipData::parse("permissions", &relationship).unwrap()
        else {
            panic!("expected many");
        };
        assert!(matches!(items[0], ResourceLinkage::Identifier(_)));
        assert!(matches!(items[1], ResourceLinkage::Inline(_)));
    }

    #[test]
    fn scalar_linkage_is_rejected() {
        let err = RelationshipData::parse("permissions", &json!({"data": [1]})).unwrap_err();
        assert!(matches!(err, HydrateError::InvalidIdentifier { ref association, .. } if association == "permissions"));
    }

    #[test]
    fn inline_items_become_resource_objects() {
        let item = ResourceLinkage::Inline(bag(json!({"name": "P1"}))).into_relation_item();
        assert_eq!(
            item,
            RelationItem::Nested(bag(json!({"attributes": {"name": "P1"}})))
        );
    }

    #[test]
    fn relationship_type_from_single_or_first() {
        assert_eq!(relationship_type(&json!({"data": {"id": 1, "type": "user"}})), Some("user"));
        assert_eq!(relationship_type(&json!({"data": [{"id": 1, "type": "tag"}]})), Some("tag"));
        assert_eq!(relationship_type(&json!({"data": []})), None);
        assert_eq!(relationship_type(&json!({"data": null})), None);
    }
}
