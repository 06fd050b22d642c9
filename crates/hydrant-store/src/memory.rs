//! In-memory entity store for tests and embedding.
//!
//! [`InMemoryEntityStore`] keeps objects in a `HashMap` keyed by type name
//! and canonical identifier, behind a `RwLock`. Lookups return clones.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use hydrant_types::{Entity, Identifier};

use crate::error::{StoreError, StoreResult};
use crate::traits::EntityStore;

type Key = (String, Identifier);

/// An in-memory implementation of [`EntityStore`].
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    objects: RwLock<HashMap<Key, Box<dyn Entity>>>,
    lookups: AtomicUsize,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `entity` under its own type name and identifier, returning the
    /// object it replaced.
    pub fn insert(&self, entity: Box<dyn Entity>) -> StoreResult<Option<Box<dyn Entity>>> {
        let id = entity
            .identifier()
            .ok_or_else(|| StoreError::MissingIdentifier(entity.type_name().to_string()))?;
        let key = (entity.type_name().to_string(), id.canonical());
        let mut objects = self
            .objects
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(objects.insert(key, entity))
    }

    /// Builder-style [`Self::insert`].
    pub fn with(self, entity: impl Entity) -> StoreResult<Self> {
        self.insert(Box::new(entity))?;
        Ok(self)
    }

    /// Remove an object. Returns `true` if it existed.
    pub fn remove(&self, type_name: &str, id: &Identifier) -> StoreResult<bool> {
        let mut objects = self
            .objects
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(objects.remove(&(type_name.to_string(), id.canonical())).is_some())
    }

    pub fn len(&self) -> usize {
        self.objects.read().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of [`EntityStore::find`] calls served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl EntityStore for InMemoryEntityStore {
    fn find(&self, type_name: &str, id: &Identifier) -> StoreResult<Option<Box<dyn Entity>>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let objects = self
            .objects
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(objects.get(&(type_name.to_string(), id.canonical())).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrant_types::{DynamicEntity, FieldValue};

    fn company(id: i64, name: &str) -> DynamicEntity {
        let mut e = DynamicEntity::new("company", ["id", "name"]);
        e.write_slot("id", FieldValue::Int(id)).unwrap();
        e.write_slot("name", name.into()).unwrap();
        e
    }

    #[test]
    fn insert_and_find() {
        let store = InMemoryEntityStore::new().with(company(1, "Acme")).unwrap();
        let found = store.find("company", &Identifier::Int(1)).unwrap().unwrap();
        assert_eq!(found.read_slot("name"), Some(FieldValue::from("Acme")));
        assert!(store.find("company", &Identifier::Int(2)).unwrap().is_none());
        assert!(store.find("user", &Identifier::Int(1)).unwrap().is_none());
        assert_eq!(store.lookups(), 3);
    }

    #[test]
    fn numeric_string_identifiers_match_integers() {
        let store = InMemoryEntityStore::new().with(company(7, "Acme")).unwrap();
        assert!(store.contains("company", &Identifier::Str("7".into())).unwrap());
        assert!(!store.contains("company", &Identifier::Str("07a".into())).unwrap());
    }

    #[test]
    fn insert_replaces_existing() {
        let store = InMemoryEntityStore::new();
        assert!(store.insert(Box::new(company(1, "Old"))).unwrap().is_none());
        let replaced = store.insert(Box::new(company(1, "New"))).unwrap();
        assert!(replaced.is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn objects_without_identifier_are_rejected() {
        let store = InMemoryEntityStore::new();
        let err = store
            .insert(Box::new(DynamicEntity::new("company", ["id"])))
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingIdentifier(ref t) if t == "company"));
        assert!(store.is_empty());
    }

    #[test]
    fn remove_and_contains() {
        let store = InMemoryEntityStore::new().with(company(4, "Acme")).unwrap();
        let id = Identifier::Int(4);
        assert!(store.contains("company", &id).unwrap());
        assert!(store.remove("company", &id).unwrap());
        assert!(!store.remove("company", &id).unwrap());
        assert!(!store.contains("company", &id).unwrap());
    }
}
