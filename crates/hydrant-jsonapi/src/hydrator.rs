use std::fmt;
use std::sync::Arc;

use hydrant_core::{
    normalize_keys, ArrayHydrator, HydrateError, HydrateResult, Hydrator, RelationItem,
};
use hydrant_model::{AssociationDescriptor, Cardinality, TypeRegistry};
use hydrant_types::{Entity, InputBag};
use serde_json::Value;
use tracing::{debug, warn};

use crate::delegate::{AttachOutcome, ForeignRelationDelegate};
use crate::document::{
    attributes, relationship_type, relationships, unwrap_data, RelationshipData, ResourceLinkage,
};

// ---------------------------------------------------------------------------
// JsonApiHydrator
// ---------------------------------------------------------------------------

/// Hydrates objects from JSON:API documents.
///
/// Attributes and relationships are mapped onto the flat hydrator's phase
/// primitives. Relationships that match no association go to the foreign
/// relation delegate when it claims their resource type; otherwise they
/// are an error.
#[derive(Clone)]
pub struct JsonApiHydrator {
    inner: ArrayHydrator,
    delegate: Option<Arc<dyn ForeignRelationDelegate>>,
}

impl JsonApiHydrator {
    pub fn new(inner: ArrayHydrator) -> Self {
        Self {
            inner,
            delegate: None,
        }
    }

    pub fn with_delegate(mut self, delegate: Arc<dyn ForeignRelationDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// The flat hydrator this one is built on.
    pub fn inner(&self) -> &ArrayHydrator {
        &self.inner
    }

    /// Property phase: `id` and `attributes` of the resource object.
    pub fn hydrate_attributes(
        &self,
        entity: &mut dyn Entity,
        document: &InputBag,
    ) -> HydrateResult<()> {
        let resource = unwrap_data(document);
        let normalized = normalize_keys(&attributes(resource));
        self.inner.hydrate_properties(entity, &normalized)
    }

    /// Association phase: every member of `relationships`.
    pub fn hydrate_relationships(
        &self,
        entity: &mut dyn Entity,
        document: &InputBag,
    ) -> HydrateResult<()> {
        let Some(relationships) = relationships(unwrap_data(document))? else {
            return Ok(());
        };
        let metadata = self.inner.metadata().metadata(entity.type_name())?;
        debug!(
            type_name = entity.type_name(),
            relationships = relationships.len(),
            "hydrating relationships"
        );

        for (name, relationship) in relationships {
            match metadata.association_for_key(name) {
                Some(association) => {
                    let data = RelationshipData::parse(name, relationship)?;
                    self.hydrate_relationship(entity, association, data)?;
                }
                None => self.hydrate_foreign(entity, name, relationship)?,
            }
        }
        Ok(())
    }

    fn hydrate_relationship(
        &self,
        entity: &mut dyn Entity,
        association: &AssociationDescriptor,
        data: RelationshipData,
    ) -> HydrateResult<()> {
        match (association.cardinality, data) {
            (_, RelationshipData::Empty) => {}
            (Cardinality::ToOne, RelationshipData::One(linkage)) => {
                self.inner
                    .hydrate_to_one(self, entity, association, linkage.into_relation_item())?;
            }
            (Cardinality::ToOne, RelationshipData::Many(_)) => {
                return Err(HydrateError::CardinalityMismatch {
                    association: association.name.clone(),
                    expected: "a single resource",
                });
            }
            (Cardinality::ToMany, RelationshipData::One(linkage)) => {
                let items = vec![linkage.into_relation_item()];
                self.inner.hydrate_to_many(self, entity, association, items)?;
            }
            (Cardinality::ToMany, RelationshipData::Many(linkages)) => {
                let items: Vec<RelationItem> = linkages
                    .into_iter()
                    .map(ResourceLinkage::into_relation_item)
                    .collect();
                self.inner.hydrate_to_many(self, entity, association, items)?;
            }
        }
        Ok(())
    }

    fn hydrate_foreign(
        &self,
        entity: &mut dyn Entity,
        name: &str,
        relationship: &Value,
    ) -> HydrateResult<()> {
        let delegate = match (&self.delegate, relationship_type(relationship)) {
            (Some(delegate), Some(resource_type)) if delegate.is_foreign(resource_type) => delegate,
            _ => return Err(HydrateError::unknown_relation(name)),
        };

        match delegate.attach(entity, name, relationship)? {
            AttachOutcome::Attached => {
                debug!(relation = name, "foreign relation attached");
                Ok(())
            }
            AttachOutcome::Skipped { reason } if self.inner.config().strict_foreign_relations => {
                Err(HydrateError::ForeignRelationSkipped {
                    relation: name.to_string(),
                    reason,
                })
            }
            AttachOutcome::Skipped { reason } => {
                warn!(relation = name, %reason, "foreign relation skipped");
                Ok(())
            }
        }
    }
}

impl Hydrator for JsonApiHydrator {
    fn hydrate_entity(&self, entity: &mut dyn Entity, input: &InputBag) -> HydrateResult<()> {
        self.hydrate_attributes(entity, input)?;
        self.hydrate_relationships(entity, input)
    }

    fn registry(&self) -> &TypeRegistry {
        self.inner.registry()
    }
}

impl fmt::Debug for JsonApiHydrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonApiHydrator")
            .field("inner", &self.inner)
            .field("has_delegate", &self.delegate.is_some())
            .finish()
    }
}
