//! Field, association, and per-type metadata descriptors.

use hydrant_types::camelize;
use serde::{Deserialize, Serialize};

/// One scalar attribute of a type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Logical field name.
    pub name: String,
    /// Declared conversion type (`integer`, `datetime`, ...). `None` means
    /// the raw value is passed through.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: Some(field_type.into()),
        }
    }

    /// A field with no declared conversion type.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: None,
        }
    }
}

/// Relationship cardinality.
///
/// Schema files may also use the four classic mapping kinds; they collapse
/// onto the two cardinalities the hydrator distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    #[serde(alias = "one_to_one", alias = "many_to_one")]
    ToOne,
    #[serde(alias = "one_to_many", alias = "many_to_many")]
    ToMany,
}

/// One relationship of a type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationDescriptor {
    pub name: String,
    #[serde(rename = "kind")]
    pub cardinality: Cardinality,
    /// Type identifier of the related objects.
    #[serde(rename = "target")]
    pub target_type: String,
}

impl AssociationDescriptor {
    pub fn to_one(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cardinality: Cardinality::ToOne,
            target_type: target_type.into(),
        }
    }

    pub fn to_many(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cardinality: Cardinality::ToMany,
            target_type: target_type.into(),
        }
    }

    pub fn is_to_many(&self) -> bool {
        self.cardinality == Cardinality::ToMany
    }
}

fn default_identifier() -> String {
    "id".into()
}

/// Everything the hydrator needs to know about one type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    #[serde(rename = "name")]
    pub type_name: String,
    /// Name of the identifier field.
    #[serde(default = "default_identifier")]
    pub identifier: String,
    #[serde(rename = "field", default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(rename = "association", default)]
    pub associations: Vec<AssociationDescriptor>,
}

impl EntityMetadata {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            identifier: default_identifier(),
            fields: Vec::new(),
            associations: Vec::new(),
        }
    }

    /// Rename the identifier field.
    pub fn with_identifier(mut self, field: impl Into<String>) -> Self {
        self.identifier = field.into();
        self
    }

    /// Declare a typed scalar field.
    pub fn field(mut self, name: impl Into<String>, field_type: impl Into<String>) -> Self {
        self.fields.push(FieldDescriptor::new(name, field_type));
        self
    }

    /// Declare a scalar field with no conversion type.
    pub fn untyped_field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(FieldDescriptor::untyped(name));
        self
    }

    pub fn to_one(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.associations.push(AssociationDescriptor::to_one(name, target));
        self
    }

    pub fn to_many(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.associations.push(AssociationDescriptor::to_many(name, target));
        self
    }

    /// Find a field descriptor by logical name.
    pub fn field_named(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Find an association descriptor by logical name.
    pub fn association(&self, name: &str) -> Option<&AssociationDescriptor> {
        self.associations.iter().find(|a| a.name == name)
    }

    /// Find an association by input key, comparing camelized forms, so
    /// `desk_items`, `desk-items` and `deskItems` all name the same one.
    pub fn association_for_key(&self, key: &str) -> Option<&AssociationDescriptor> {
        let key = camelize(key);
        self.associations.iter().find(|a| camelize(&a.name) == key)
    }

    /// All member names: fields first, then associations, in declaration order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .map(|f| f.name.as_str())
            .chain(self.associations.iter().map(|a| a.name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> EntityMetadata {
        EntityMetadata::new("user")
            .field("id", "integer")
            .field("name", "string")
            .to_one("company", "company")
            .to_many("permissions", "permission")
    }

    #[test]
    fn lookups_by_name() {
        let meta = user();
        assert_eq!(meta.field_named("name").unwrap().field_type.as_deref(), Some("string"));
        assert!(meta.field_named("company").is_none());
        assert!(meta.association("permissions").unwrap().is_to_many());
        assert!(!meta.association("company").unwrap().is_to_many());
    }

    #[test]
    fn association_keys_compare_camelized() {
        let meta = EntityMetadata::new("office").to_many("desk_items", "desk");
        for key in ["desk_items", "desk-items", "deskItems"] {
            assert_eq!(meta.association_for_key(key).unwrap().name, "desk_items", "{key}");
        }
        assert!(meta.association_for_key("desks").is_none());
        assert!(user().association_for_key("permissions").is_some());
    }

    #[test]
    fn member_names_keep_declaration_order() {
        let user = user();
        let names: Vec<_> = user.member_names().collect();
        assert_eq!(names, vec!["id", "name", "company", "permissions"]);
    }

    #[test]
    fn classic_mapping_kinds_collapse() {
        for (kind, expected) in [
            ("\"one_to_one\"", Cardinality::ToOne),
            ("\"many_to_one\"", Cardinality::ToOne),
            ("\"to_one\"", Cardinality::ToOne),
            ("\"one_to_many\"", Cardinality::ToMany),
            ("\"many_to_many\"", Cardinality::ToMany),
            ("\"to_many\"", Cardinality::ToMany),
        ] {
            let parsed: Cardinality = serde_json::from_str(kind).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn identifier_defaults_to_id() {
        let meta: EntityMetadata = serde_json::from_str(r#"{"name": "tag"}"#).unwrap();
        assert_eq!(meta.identifier, "id");
        assert!(meta.fields.is_empty());
    }
}
