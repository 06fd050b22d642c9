//! The [`MetadataProvider`] trait and its in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::descriptor::{AssociationDescriptor, EntityMetadata, FieldDescriptor};
use crate::error::{ModelError, ModelResult};

/// Read-only lookup service describing the object model.
///
/// Implementations must be safe for concurrent reads; the hydrator never
/// mutates metadata.
pub trait MetadataProvider: Send + Sync {
    /// Metadata for `type_name`, or [`ModelError::UnknownType`].
    fn metadata(&self, type_name: &str) -> ModelResult<Arc<EntityMetadata>>;

    /// Whether `type_name` is part of the object model.
    fn is_known(&self, type_name: &str) -> bool {
        self.metadata(type_name).is_ok()
    }

    /// Scalar fields of `type_name` in declaration order.
    fn fields_of(&self, type_name: &str) -> ModelResult<Vec<FieldDescriptor>> {
        Ok(self.metadata(type_name)?.fields.clone())
    }

    /// Associations of `type_name` in declaration order.
    fn associations_of(&self, type_name: &str) -> ModelResult<Vec<AssociationDescriptor>> {
        Ok(self.metadata(type_name)?.associations.clone())
    }
}

/// `HashMap`-backed metadata, populated once at startup.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMetadata {
    types: HashMap<String, Arc<EntityMetadata>>,
}

impl InMemoryMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register metadata for one type.
    pub fn register(&mut self, metadata: EntityMetadata) -> ModelResult<()> {
        if self.types.contains_key(&metadata.type_name) {
            return Err(ModelError::DuplicateType(metadata.type_name));
        }
        tracing::debug!(
            type_name = %metadata.type_name,
            fields = metadata.fields.len(),
            associations = metadata.associations.len(),
            "registered type metadata"
        );
        self.types
            .insert(metadata.type_name.clone(), Arc::new(metadata));
        Ok(())
    }

    /// Builder-style [`Self::register`].
    pub fn with(mut self, metadata: EntityMetadata) -> ModelResult<Self> {
        self.register(metadata)?;
        Ok(self)
    }

    /// Iterate all registered types, sorted by name.
    pub fn types(&self) -> Vec<Arc<EntityMetadata>> {
        let mut all: Vec<_> = self.types.values().cloned().collect();
        all.sort_by(|a, b| a.type_name.cmp(&b.type_name));
        all
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl MetadataProvider for InMemoryMetadata {
    fn metadata(&self, type_name: &str) -> ModelResult<Arc<EntityMetadata>> {
        self.types
            .get(type_name)
            .cloned()
            .ok_or_else(|| ModelError::UnknownType(type_name.to_string()))
    }

    fn is_known(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }
}
