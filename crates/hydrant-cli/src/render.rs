//! JSON rendering of hydrated objects.

use hydrant_model::MetadataProvider;
use hydrant_types::{DynamicEntity, Entity, FieldValue, Related};
use serde_json::{Map, Value};

/// Render `entity` with its declared members in declaration order.
///
/// Materialized related objects are rendered in full; placeholders as
/// `{"type", "id"}`.
pub fn render_entity(entity: &dyn Entity, metadata: &dyn MetadataProvider) -> Value {
    let Ok(meta) = metadata.metadata(entity.type_name()) else {
        return render_foreign(entity);
    };
    let mut out = Map::new();
    for member in meta.member_names() {
        let value = entity.read_slot(member).unwrap_or(FieldValue::Null);
        out.insert(member.to_string(), render_value(&value, metadata));
    }
    Value::Object(out)
}

fn render_value(value: &FieldValue, metadata: &dyn MetadataProvider) -> Value {
    match value {
        FieldValue::Related(related) => render_related(related, metadata),
        FieldValue::Collection(items) => {
            Value::Array(items.iter().map(|r| render_related(r, metadata)).collect())
        }
        other => other.to_json(),
    }
}

fn render_related(related: &Related, metadata: &dyn MetadataProvider) -> Value {
    match related {
        Related::Reference(_) => related.to_json(),
        Related::Entity(entity) => render_entity(entity.as_ref(), metadata),
    }
}

fn render_foreign(entity: &dyn Entity) -> Value {
    match entity.downcast_ref::<DynamicEntity>() {
        Some(dynamic) => Value::Object(
            dynamic
                .slots()
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect(),
        ),
        None => Related::Entity(entity.clone_entity()).to_json(),
    }
}
