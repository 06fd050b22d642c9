//! Delegation of relationships the object model does not know.
//!
//! A document may link resources that live outside the model, for example
//! users owned by another service. A [`ForeignRelationDelegate`] injected
//! into the [`JsonApiHydrator`](crate::JsonApiHydrator) claims such
//! resource types and attaches them itself.

use std::fmt;
use std::sync::Arc;

use hydrant_access::{AccessError, FieldAccess, MutatorAccess};
use hydrant_core::HydrateResult;
use hydrant_store::EntityStore;
use hydrant_types::{Entity, FieldValue, Identifier, Related};
use serde_json::Value;
use tracing::debug;

/// Result of [`ForeignRelationDelegate::attach`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttachOutcome {
    Attached,
    /// The delegate claimed the type but could not attach this payload.
    Skipped { reason: String },
}

impl AttachOutcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self, Self::Attached)
    }
}

/// Attaches resources of types outside the object model.
pub trait ForeignRelationDelegate: Send + Sync {
    /// Whether this delegate handles resources of `resource_type`.
    fn is_foreign(&self, resource_type: &str) -> bool;

    /// Attach the resource described by `payload` (the relationship object,
    /// `data` member included) to `entity` under `relation`.
    fn attach(
        &self,
        entity: &mut dyn Entity,
        relation: &str,
        payload: &Value,
    ) -> HydrateResult<AttachOutcome>;
}

// ---------------------------------------------------------------------------
// StoreBackedDelegate
// ---------------------------------------------------------------------------

/// Serves one foreign resource type from its own [`EntityStore`].
///
/// The related object is loaded (never a placeholder) and passed to the
/// target's `set_<relation>` mutator; an unknown identifier passes
/// [`FieldValue::Null`]. Payloads of another type, payloads without an
/// identifier, and targets without the mutator are skipped.
///
/// [`with_field_access`](Self::with_field_access) widens what counts as
/// "having the member", for example to slot-only dynamic objects.
pub struct StoreBackedDelegate {
    resource_type: String,
    store: Arc<dyn EntityStore>,
    access: Arc<dyn FieldAccess>,
}

impl StoreBackedDelegate {
    pub fn new(resource_type: impl Into<String>, store: Arc<dyn EntityStore>) -> Self {
        Self {
            resource_type: resource_type.into(),
            store,
            access: Arc::new(MutatorAccess),
        }
    }

    /// Assign through `access` instead of the mutator alone.
    pub fn with_field_access(mut self, access: impl FieldAccess + 'static) -> Self {
        self.access = Arc::new(access);
        self
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }
}

impl ForeignRelationDelegate for StoreBackedDelegate {
    fn is_foreign(&self, resource_type: &str) -> bool {
        resource_type == self.resource_type
    }

    fn attach(
        &self,
        entity: &mut dyn Entity,
        relation: &str,
        payload: &Value,
    ) -> HydrateResult<AttachOutcome> {
        let Some(data) = payload.get("data").filter(|d| d.is_object()) else {
            return Ok(AttachOutcome::skipped("relationship data is not a single resource"));
        };
        match data.get("type").and_then(Value::as_str) {
            Some(t) if t == self.resource_type => {}
            other => {
                return Ok(AttachOutcome::skipped(format!(
                    "resource type {} is not {}",
                    other.unwrap_or("(none)"),
                    self.resource_type
                )))
            }
        }
        let Some(id) = data.get("id").and_then(Identifier::from_value) else {
            return Ok(AttachOutcome::skipped("resource has no identifier"));
        };

        let value = match self.store.find(&self.resource_type, &id)? {
            Some(found) => FieldValue::Related(Related::Entity(found)),
            None => {
                debug!(resource_type = self.resource_type.as_str(), %id, "foreign resource not found");
                FieldValue::Null
            }
        };
        match self.access.set_field(entity, relation, value) {
            Ok(()) => Ok(AttachOutcome::Attached),
            Err(AccessError::UnknownField { type_name, field }) => Ok(AttachOutcome::skipped(
                format!("{type_name} cannot accept {field}"),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

impl fmt::Debug for StoreBackedDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreBackedDelegate")
            .field("resource_type", &self.resource_type)
            .finish_non_exhaustive()
    }
}
