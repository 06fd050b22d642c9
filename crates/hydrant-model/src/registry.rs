//! Type registry: type identifier to zero-argument factory.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use hydrant_types::{DynamicEntity, Entity};

use crate::descriptor::EntityMetadata;

/// Builds a fresh, default-valued instance of one type.
pub type EntityFactory = Arc<dyn Fn() -> Box<dyn Entity> + Send + Sync>;

/// Maps type identifiers to factories so hydration targets and nested
/// related objects can be created by name.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    factories: HashMap<String, EntityFactory>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `type_name`, replacing any previous one.
    pub fn register<F>(&mut self, type_name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Entity> + Send + Sync + 'static,
    {
        self.factories.insert(type_name.into(), Arc::new(factory));
    }

    /// Register `T::default()` under the type name it reports.
    pub fn register_default<T>(&mut self)
    where
        T: Entity + Clone + Default,
    {
        let name = T::default().type_name().to_string();
        self.register(name, || Box::new(T::default()));
    }

    /// Builder-style [`Self::register_default`].
    pub fn with_default<T>(mut self) -> Self
    where
        T: Entity + Clone + Default,
    {
        self.register_default::<T>();
        self
    }

    /// Register a [`DynamicEntity`] factory whose slots are the type's
    /// declared fields and associations.
    pub fn register_dynamic(&mut self, metadata: &EntityMetadata) {
        let type_name = metadata.type_name.clone();
        let slots: Vec<String> = metadata.member_names().map(str::to_string).collect();
        self.register(metadata.type_name.clone(), move || {
            Box::new(DynamicEntity::new(type_name.clone(), slots.iter().cloned()))
        });
    }

    /// Create a new instance of `type_name`, if registered.
    pub fn instantiate(&self, type_name: &str) -> Option<Box<dyn Entity>> {
        self.factories.get(type_name).map(|factory| factory())
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("TypeRegistry").field("types", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrant_types::{FieldValue, TypeError};

    #[derive(Clone, Debug, Default)]
    struct Company {
        name: String,
    }

    impl Entity for Company {
        fn type_name(&self) -> &str {
            "company"
        }

        fn write_slot(&mut self, field: &str, value: FieldValue) -> Result<(), TypeError> {
            match field {
                "name" => self.name = value.extract()?,
                _ => return Err(TypeError::MissingMember(field.into())),
            }
            Ok(())
        }

        fn read_slot(&self, field: &str) -> Option<FieldValue> {
            (field == "name").then(|| self.name.clone().into())
        }
    }

    #[test]
    fn instantiate_registered_default() {
        let registry = TypeRegistry::new().with_default::<Company>();
        let e = registry.instantiate("company").unwrap();
        assert!(e.is::<Company>());
        assert!(registry.instantiate("user").is_none());
    }

    #[test]
    fn each_instantiation_is_fresh() {
        let registry = TypeRegistry::new().with_default::<Company>();
        let mut a = registry.instantiate("company").unwrap();
        a.write_slot("name", "Acme".into()).unwrap();
        let b = registry.instantiate("company").unwrap();
        assert_eq!(b.read_slot("name"), Some(FieldValue::from("")));
    }

    #[test]
    fn dynamic_factories_expose_all_members() {
        let meta = EntityMetadata::new("user")
            .field("id", "integer")
            .to_one("company", "company");
        let mut registry = TypeRegistry::new();
        registry.register_dynamic(&meta);

        let e = registry.instantiate("user").unwrap();
        assert_eq!(e.type_name(), "user");
        assert_eq!(e.read_slot("company"), Some(FieldValue::Null));
        assert_eq!(e.read_slot("email"), None);
    }
}
