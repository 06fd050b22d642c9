//! Reference resolution: turning an identifier into a related object.

use std::fmt;
use std::sync::Arc;

use hydrant_types::{Identifier, Related};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreResult;
use crate::traits::EntityStore;

/// How identifiers are turned into related objects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// Bind a placeholder to the identifier without checking existence.
    ///
    /// Fast, and suited to write-heavy flows. A dangling identifier is not
    /// detected here; it surfaces later as an integrity violation in the
    /// storage layer.
    #[default]
    Lightweight,
    /// Load the object; unknown identifiers resolve to nothing.
    Verified,
}

impl ResolutionMode {
    /// Mode selected by the `prefer_lightweight_references` flag.
    pub fn from_preference(prefer_lightweight_references: bool) -> Self {
        if prefer_lightweight_references {
            Self::Lightweight
        } else {
            Self::Verified
        }
    }
}

/// Resolves identifiers through an [`EntityStore`] in a fixed
/// [`ResolutionMode`].
#[derive(Clone)]
pub struct ReferenceResolver {
    store: Arc<dyn EntityStore>,
    mode: ResolutionMode,
}

impl ReferenceResolver {
    pub fn new(store: Arc<dyn EntityStore>, mode: ResolutionMode) -> Self {
        Self { store, mode }
    }

    pub fn mode(&self) -> ResolutionMode {
        self.mode
    }

    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }

    /// Resolve `id` to an object of `target_type`.
    ///
    /// `Ok(None)` means the identifier did not resolve; callers treat that
    /// as "leave unset", not as an error.
    pub fn resolve(&self, target_type: &str, id: &Identifier) -> StoreResult<Option<Related>> {
        match self.mode {
            ResolutionMode::Lightweight => self.store.reference(target_type, id).map(Some),
            ResolutionMode::Verified => {
                let found = self.store.find(target_type, id)?;
                if found.is_none() {
                    debug!(target_type, %id, "reference did not resolve");
                }
                Ok(found.map(Related::Entity))
            }
        }
    }
}

impl fmt::Debug for ReferenceResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceResolver")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryEntityStore;
    use hydrant_types::{DynamicEntity, Entity, FieldValue, Reference};

    fn store() -> Arc<InMemoryEntityStore> {
        let mut company = DynamicEntity::new("company", ["id", "name"]);
        company.write_slot("id", FieldValue::Int(1)).unwrap();
        company.write_slot("name", "testing".into()).unwrap();
        Arc::new(InMemoryEntityStore::new().with(company).unwrap())
    }

    #[test]
    fn lightweight_mode_never_touches_storage() {
        let store = store();
        let resolver = ReferenceResolver::new(store.clone(), ResolutionMode::Lightweight);

        let related = resolver.resolve("company", &Identifier::Int(99)).unwrap().unwrap();
        assert_eq!(related, Related::Reference(Reference::new("company", 99i64)));
        assert_eq!(store.lookups(), 0);
    }

    #[test]
    fn verified_mode_loads_objects() {
        let resolver = ReferenceResolver::new(store(), ResolutionMode::Verified);
        let related = resolver.resolve("company", &Identifier::Int(1)).unwrap().unwrap();
        let entity = related.as_entity().unwrap();
        assert_eq!(entity.read_slot("name"), Some(FieldValue::from("testing")));
    }

    #[test]
    fn verified_mode_misses_are_none() {
        let resolver = ReferenceResolver::new(store(), ResolutionMode::Verified);
        assert!(resolver.resolve("company", &Identifier::Int(2)).unwrap().is_none());
    }

    #[test]
    fn mode_from_preference_flag() {
        assert_eq!(ResolutionMode::from_preference(true), ResolutionMode::Lightweight);
        assert_eq!(ResolutionMode::from_preference(false), ResolutionMode::Verified);
        assert_eq!(ResolutionMode::default(), ResolutionMode::Lightweight);
    }

    #[test]
    fn mode_serializes_snake_case() {
        let json = serde_json::to_string(&ResolutionMode::Verified).unwrap();
        assert_eq!(json, "\"verified\"");
    }
}
