//! Hydration targets: an existing object or a type to instantiate.

use hydrant_model::TypeRegistry;
use hydrant_types::Entity;

use crate::error::{HydrateError, HydrateResult};

/// What a hydration call populates.
#[derive(Debug)]
pub enum Target {
    /// Populate this object in place.
    Instance(Box<dyn Entity>),
    /// Create a default-valued object of this type first.
    TypeName(String),
}

impl Target {
    pub fn instance(entity: impl Entity) -> Self {
        Self::Instance(Box::new(entity))
    }

    /// Produce the object to populate, instantiating through `registry`
    /// when the target is a type name.
    pub fn resolve(self, registry: &TypeRegistry) -> HydrateResult<Box<dyn Entity>> {
        match self {
            Self::Instance(entity) => Ok(entity),
            Self::TypeName(name) => registry
                .instantiate(&name)
                .ok_or(HydrateError::InvalidTarget(name)),
        }
    }
}

impl From<Box<dyn Entity>> for Target {
    fn from(entity: Box<dyn Entity>) -> Self {
        Self::Instance(entity)
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Self::TypeName(name.to_string())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Self::TypeName(name)
    }
}
