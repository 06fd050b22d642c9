//! The accessor surface every hydratable object exposes.
//!
//! Rust has no runtime reflection, so an entity publishes its members
//! through two name-keyed entry points: conventional mutators
//! (`set_<field>`) and raw slots. Hydration picks between them; see the
//! `hydrant-access` crate.

use std::any::Any;
use std::fmt;

use crate::error::TypeError;
use crate::identifier::Identifier;
use crate::value::FieldValue;

/// Object-safe plumbing shared by all entities.
///
/// Implemented automatically for every `Entity + Clone`.
pub trait EntityBase: Any {
    fn clone_entity(&self) -> Box<dyn Entity>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Entity + Clone> EntityBase for T {
    fn clone_entity(&self) -> Box<dyn Entity> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A domain object that can be populated by a hydrator.
pub trait Entity: EntityBase + fmt::Debug + Send + Sync {
    /// Type identifier used for metadata and registry lookups.
    fn type_name(&self) -> &str;

    /// Invoke the mutator named `setter` (e.g. `set_street_address`).
    ///
    /// Returns [`TypeError::MissingMember`] when the type has no such
    /// mutator. Types without mutators can rely on the default.
    fn invoke_setter(&mut self, setter: &str, value: FieldValue) -> Result<(), TypeError> {
        let _ = value;
        Err(TypeError::MissingMember(setter.to_string()))
    }

    /// Write `field` directly, bypassing any mutator.
    ///
    /// Returns [`TypeError::MissingMember`] when no such slot exists.
    fn write_slot(&mut self, field: &str, value: FieldValue) -> Result<(), TypeError>;

    /// Read the current value of `field`.
    fn read_slot(&self, field: &str) -> Option<FieldValue>;

    /// Identifier of this object, read from the `id` slot by default.
    fn identifier(&self) -> Option<Identifier> {
        self.read_slot("id")
            .and_then(|v| Identifier::from_field_value(&v))
    }
}

impl dyn Entity {
    pub fn downcast_ref<T: Entity>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Entity>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    pub fn is<T: Entity>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl Clone for Box<dyn Entity> {
    fn clone(&self) -> Self {
        self.clone_entity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default)]
    struct Tag {
        id: Option<i64>,
        label: String,
    }

    impl Entity for Tag {
        fn type_name(&self) -> &str {
            "tag"
        }

        fn write_slot(&mut self, field: &str, value: FieldValue) -> Result<(), TypeError> {
            match field {
                "id" => self.id = value.extract()?,
                "label" => self.label = value.extract()?,
                _ => return Err(TypeError::MissingMember(field.into())),
            }
            Ok(())
        }

        fn read_slot(&self, field: &str) -> Option<FieldValue> {
            match field {
                "id" => Some(self.id.into()),
                "label" => Some(self.label.clone().into()),
                _ => None,
            }
        }
    }

    #[test]
    fn boxed_entities_clone_and_downcast() {
        let mut tag: Box<dyn Entity> = Box::new(Tag::default());
        tag.write_slot("label", "rust".into()).unwrap();
        let copy = tag.clone();
        assert!(copy.is::<Tag>());
        assert_eq!(copy.downcast_ref::<Tag>().unwrap().label, "rust");
    }

    #[test]
    fn default_setter_reports_missing_member() {
        let mut tag = Tag::default();
        let err = tag.invoke_setter("set_label", "x".into()).unwrap_err();
        assert_eq!(err, TypeError::MissingMember("set_label".into()));
    }

    #[test]
    fn identifier_reads_id_slot() {
        let mut tag = Tag::default();
        assert_eq!(tag.identifier(), None);
        tag.write_slot("id", FieldValue::Int(9)).unwrap();
        assert_eq!(tag.identifier(), Some(Identifier::Int(9)));
    }
}
