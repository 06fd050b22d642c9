use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::entity::Entity;
use crate::identifier::Identifier;

/// Unverified placeholder for a persisted object.
///
/// Produced by lightweight reference resolution: it is bound to an
/// identifier without checking that the object exists.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "type")]
    pub type_name: String,
    pub id: Identifier,
}

impl Reference {
    pub fn new(type_name: impl Into<String>, id: impl Into<Identifier>) -> Self {
        Self {
            type_name: type_name.into(),
            id: id.into(),
        }
    }
}

/// A related object held by an association.
#[derive(Clone, Debug)]
pub enum Related {
    /// Lightweight placeholder bound to an identifier.
    Reference(Reference),
    /// A materialized object: loaded from storage or built during hydration.
    Entity(Box<dyn Entity>),
}

impl Related {
    /// Type name of the related object.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Reference(r) => &r.type_name,
            Self::Entity(e) => e.type_name(),
        }
    }

    /// Identifier of the related object, if it has one yet.
    pub fn id(&self) -> Option<Identifier> {
        match self {
            Self::Reference(r) => Some(r.id.clone()),
            Self::Entity(e) => e.identifier(),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    pub fn as_entity(&self) -> Option<&dyn Entity> {
        match self {
            Self::Entity(e) => Some(e.as_ref()),
            Self::Reference(_) => None,
        }
    }

    /// Borrow the materialized object as a concrete type.
    pub fn downcast_ref<T: Entity>(&self) -> Option<&T> {
        self.as_entity().and_then(|e| e.downcast_ref::<T>())
    }

    pub fn to_json(&self) -> Value {
        let id = self.id().map_or(Value::Null, |id| id.to_value());
        json!({ "type": self.type_name(), "id": id })
    }
}

impl From<Reference> for Related {
    fn from(r: Reference) -> Self {
        Self::Reference(r)
    }
}

impl From<Box<dyn Entity>> for Related {
    fn from(e: Box<dyn Entity>) -> Self {
        Self::Entity(e)
    }
}

impl PartialEq for Related {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Reference(a), Self::Reference(b)) => a == b,
            // Compare by debug representation for test convenience.
            (Self::Entity(a), Self::Entity(b)) => {
                a.type_name() == b.type_name() && format!("{a:?}") == format!("{b:?}")
            }
            _ => false,
        }
    }
}
