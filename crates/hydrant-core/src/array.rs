use std::fmt;
use std::sync::Arc;

use hydrant_access::{FieldAccess, PropertySetter};
use hydrant_convert::{ConverterRegistry, TypeConverter};
use hydrant_model::{AssociationDescriptor, Cardinality, MetadataProvider, TypeRegistry};
use hydrant_store::{EntityStore, ReferenceResolver};
use hydrant_types::{camelize, Entity, FieldValue, InputBag, Related};
use tracing::debug;

use crate::config::HydratorConfig;
use crate::error::{HydrateError, HydrateResult};
use crate::hydrator::Hydrator;
use crate::input::{is_empty_value, normalize_keys, RelationItem};
use crate::target::Target;

// ---------------------------------------------------------------------------
// ArrayHydrator
// ---------------------------------------------------------------------------

/// Hydrates objects from flat input bags.
///
/// Scalar fields are converted by declared type and assigned through the
/// field access strategy. Associations are read as identifiers, resolved
/// through the [`ReferenceResolver`], or as nested input bags that build
/// new related objects.
#[derive(Clone)]
pub struct ArrayHydrator {
    metadata: Arc<dyn MetadataProvider>,
    registry: Arc<TypeRegistry>,
    resolver: ReferenceResolver,
    converter: Arc<dyn TypeConverter>,
    access: Arc<dyn FieldAccess>,
    config: HydratorConfig,
}

impl ArrayHydrator {
    /// Create a hydrator with the default configuration, the built-in
    /// converters, and [`PropertySetter`] access.
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        registry: Arc<TypeRegistry>,
        store: Arc<dyn EntityStore>,
    ) -> Self {
        let config = HydratorConfig::default();
        Self {
            metadata,
            registry,
            resolver: ReferenceResolver::new(store, config.resolution_mode()),
            converter: Arc::new(ConverterRegistry::with_builtins()),
            access: Arc::new(PropertySetter),
            config,
        }
    }

    /// Replace the configuration. The resolution mode follows it.
    pub fn with_config(mut self, config: HydratorConfig) -> Self {
        let store = self.resolver.store().clone();
        self.resolver = ReferenceResolver::new(store, config.resolution_mode());
        self.config = config;
        self
    }

    pub fn with_converter(mut self, converter: impl TypeConverter + 'static) -> Self {
        self.converter = Arc::new(converter);
        self
    }

    pub fn with_field_access(mut self, access: impl FieldAccess + 'static) -> Self {
        self.access = Arc::new(access);
        self
    }

    pub fn config(&self) -> &HydratorConfig {
        &self.config
    }

    pub fn metadata(&self) -> &Arc<dyn MetadataProvider> {
        &self.metadata
    }

    pub fn resolver(&self) -> &ReferenceResolver {
        &self.resolver
    }

    pub fn field_access(&self) -> &dyn FieldAccess {
        self.access.as_ref()
    }

    /// Scalar phase: convert and assign every declared field present in
    /// `normalized`. Keys must already be normalized.
    pub fn hydrate_properties(
        &self,
        entity: &mut dyn Entity,
        normalized: &InputBag,
    ) -> HydrateResult<()> {
        let metadata = self.metadata.metadata(entity.type_name())?;
        debug!(
            type_name = entity.type_name(),
            fields = metadata.fields.len(),
            "hydrating properties"
        );

        for field in &metadata.fields {
            let Some(raw) = normalized.get(&camelize(&field.name)) else {
                continue;
            };
            let value = self.converter.convert(field.field_type.as_deref(), raw)?;
            self.access.set_field(entity, &field.name, value)?;
        }
        Ok(())
    }

    /// Association phase over a flat input bag.
    ///
    /// Entries are looked up by association name. Empty entries leave the
    /// association untouched. Nested objects are built through `nested`.
    pub fn hydrate_associations(
        &self,
        nested: &dyn Hydrator,
        entity: &mut dyn Entity,
        normalized: &InputBag,
    ) -> HydrateResult<()> {
        let metadata = self.metadata.metadata(entity.type_name())?;
        debug!(
            type_name = entity.type_name(),
            associations = metadata.associations.len(),
            "hydrating associations"
        );

        for association in &metadata.associations {
            let Some(entry) = normalized.get(&camelize(&association.name)) else {
                continue;
            };
            if is_empty_value(entry) {
                continue;
            }
            match association.cardinality {
                Cardinality::ToOne => {
                    if entry.is_object() || entry.is_array() {
                        return Err(HydrateError::invalid_identifier(&association.name, entry));
                    }
                    let item = RelationItem::from_value(&association.name, entry)?;
                    self.hydrate_to_one(nested, entity, association, item)?;
                }
                Cardinality::ToMany => {
                    let items = RelationItem::sequence(&association.name, entry)?;
                    self.hydrate_to_many(nested, entity, association, items)?;
                }
            }
        }
        Ok(())
    }

    /// Assign a single related object. Returns `false` when the identifier
    /// did not resolve and the association was left unset.
    pub fn hydrate_to_one(
        &self,
        nested: &dyn Hydrator,
        entity: &mut dyn Entity,
        association: &AssociationDescriptor,
        item: RelationItem,
    ) -> HydrateResult<bool> {
        match self.materialize(nested, association, item)? {
            Some(related) => {
                self.access
                    .set_field(entity, &association.name, FieldValue::Related(related))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace a collection with the related objects built from `items`.
    ///
    /// Input order and duplicates are kept; identifiers that do not
    /// resolve are skipped. Returns the size of the new collection.
    pub fn hydrate_to_many(
        &self,
        nested: &dyn Hydrator,
        entity: &mut dyn Entity,
        association: &AssociationDescriptor,
        items: Vec<RelationItem>,
    ) -> HydrateResult<usize> {
        let mut collection = Vec::with_capacity(items.len());
        for item in items {
            if let Some(related) = self.materialize(nested, association, item)? {
                collection.push(related);
            }
        }
        let len = collection.len();
        self.access
            .set_field(entity, &association.name, FieldValue::Collection(collection))?;
        Ok(len)
    }

    fn materialize(
        &self,
        nested: &dyn Hydrator,
        association: &AssociationDescriptor,
        item: RelationItem,
    ) -> HydrateResult<Option<Related>> {
        match item {
            RelationItem::Id(id) => {
                let related = self.resolver.resolve(&association.target_type, &id)?;
                if related.is_none() {
                    debug!(
                        association = association.name.as_str(),
                        target_type = association.target_type.as_str(),
                        %id,
                        "leaving unresolved reference unset"
                    );
                }
                Ok(related)
            }
            RelationItem::Nested(input) => {
                debug!(
                    association = association.name.as_str(),
                    target_type = association.target_type.as_str(),
                    "building nested object"
                );
                let target = Target::TypeName(association.target_type.clone());
                Ok(Some(Related::Entity(nested.hydrate(target, &input)?)))
            }
        }
    }
}

impl Hydrator for ArrayHydrator {
    fn hydrate_entity(&self, entity: &mut dyn Entity, input: &InputBag) -> HydrateResult<()> {
        let normalized = normalize_keys(input);
        self.hydrate_properties(entity, &normalized)?;
        self.hydrate_associations(self, entity, &normalized)
    }

    fn registry(&self) -> &TypeRegistry {
        &self.registry
    }
}

impl fmt::Debug for ArrayHydrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayHydrator")
            .field("registry", &self.registry)
            .field("resolver", &self.resolver)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
