//! Seeding in-memory stores from a JSON file of existing objects.
//!
//! ```json
//! { "company": [{ "id": 1, "name": "Acme" }], "user": [{ "id": 7, "name": "Ada" }] }
//! ```
//!
//! Modelled types are hydrated like any other input. Foreign types are
//! kept as-is and served by a [`ForeignDirectory`]. A foreign relation
//! `user` attaches to a member of the same name, so the schema declares it
//! as an untyped field.

use std::sync::Arc;

use anyhow::{bail, Context};
use hydrant_access::PropertySetter;
use hydrant_core::{as_input_bag, ArrayHydrator, HydrateResult, Hydrator, Target};
use hydrant_jsonapi::document::relationship_type;
use hydrant_jsonapi::{AttachOutcome, ForeignRelationDelegate, StoreBackedDelegate};
use hydrant_model::ModelSchema;
use hydrant_store::InMemoryEntityStore;
use hydrant_types::{DynamicEntity, Entity, FieldValue, InputBag};
use serde_json::Value;
use tracing::info;

/// Insert every seeded object into `store` (modelled types) or `foreign`
/// (foreign types).
pub fn seed(
    schema: &ModelSchema,
    hydrator: &ArrayHydrator,
    store: &InMemoryEntityStore,
    foreign: &InMemoryEntityStore,
    objects: &InputBag,
) -> anyhow::Result<()> {
    for (type_name, list) in objects {
        let Value::Array(items) = list else {
            bail!("seed entry `{type_name}` must be a list of objects");
        };
        for item in items {
            let input = as_input_bag(item).with_context(|| format!("seeding {type_name}"))?;
            if schema.is_foreign(type_name) {
                foreign.insert(Box::new(foreign_object(type_name, input)?))?;
            } else {
                let entity = hydrator
                    .hydrate(Target::TypeName(type_name.clone()), input)
                    .with_context(|| format!("seeding {type_name}"))?;
                store.insert(entity)?;
            }
        }
        info!(type_name = type_name.as_str(), count = items.len(), "seeded objects");
    }
    Ok(())
}

fn foreign_object(type_name: &str, input: &InputBag) -> anyhow::Result<DynamicEntity> {
    let mut entity = DynamicEntity::new(type_name, input.keys().cloned());
    for (key, value) in input {
        entity.write_slot(key, FieldValue::from_raw(value))?;
    }
    Ok(entity)
}

/// One [`StoreBackedDelegate`] per foreign type, sharing a store.
///
/// Schema-built objects have slots but no mutators, so the delegates assign
/// through [`PropertySetter`].
#[derive(Debug)]
pub struct ForeignDirectory {
    delegates: Vec<StoreBackedDelegate>,
}

impl ForeignDirectory {
    pub fn new(schema: &ModelSchema, store: Arc<InMemoryEntityStore>) -> Self {
        let delegates = schema
            .foreign_types
            .iter()
            .map(|t| {
                StoreBackedDelegate::new(t.clone(), store.clone())
                    .with_field_access(PropertySetter)
            })
            .collect();
        Self { delegates }
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }
}

impl ForeignRelationDelegate for ForeignDirectory {
    fn is_foreign(&self, resource_type: &str) -> bool {
        self.delegates.iter().any(|d| d.is_foreign(resource_type))
    }

    fn attach(
        &self,
        entity: &mut dyn Entity,
        relation: &str,
        payload: &Value,
    ) -> HydrateResult<AttachOutcome> {
        let resource_type = relationship_type(payload).unwrap_or_default();
        match self.delegates.iter().find(|d| d.is_foreign(resource_type)) {
            Some(delegate) => delegate.attach(entity, relation, payload),
            None => Ok(AttachOutcome::skipped(format!(
                "no foreign directory for type {resource_type}"
            ))),
        }
    }
}
