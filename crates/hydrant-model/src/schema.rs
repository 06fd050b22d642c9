//! Declarative object-model schema, loaded from TOML or JSON.
//!
//! ```toml
//! foreign_types = ["user"]
//!
//! [[entity]]
//! name = "desk"
//!
//! [[entity.field]]
//! name = "id"
//! type = "integer"
//!
//! [[entity.association]]
//! name = "owner"
//! kind = "many_to_one"
//! target = "user"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::descriptor::EntityMetadata;
use crate::error::{ModelError, ModelResult};
use crate::provider::InMemoryMetadata;
use crate::registry::TypeRegistry;

/// A whole object model.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Types outside the model that associations may still target; they
    /// are served by a foreign relation delegate.
    #[serde(default)]
    pub foreign_types: Vec<String>,
    #[serde(rename = "entity", default)]
    pub entities: Vec<EntityMetadata>,
}

impl ModelSchema {
    pub fn from_toml_str(s: &str) -> ModelResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a schema file; `.json` files are parsed as JSON, anything else
    /// as TOML.
    pub fn load(path: impl AsRef<Path>) -> ModelResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        }
    }

    /// Check the schema for duplicate types, duplicate members, and
    /// associations that target nothing.
    pub fn validate(&self) -> ModelResult<()> {
        let mut types = HashSet::new();
        for entity in &self.entities {
            if !types.insert(entity.type_name.as_str()) {
                return Err(ModelError::DuplicateType(entity.type_name.clone()));
            }
        }

        for entity in &self.entities {
            let mut members = HashSet::new();
            for member in entity.member_names() {
                if !members.insert(member) {
                    return Err(ModelError::DuplicateMember {
                        type_name: entity.type_name.clone(),
                        member: member.to_string(),
                    });
                }
            }
            for assoc in &entity.associations {
                let target = assoc.target_type.as_str();
                if !types.contains(target) && !self.foreign_types.iter().any(|t| t == target) {
                    return Err(ModelError::UnknownTarget {
                        type_name: entity.type_name.clone(),
                        association: assoc.name.clone(),
                        target: assoc.target_type.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate and build an [`InMemoryMetadata`].
    pub fn to_metadata(&self) -> ModelResult<InMemoryMetadata> {
        self.validate()?;
        let mut metadata = InMemoryMetadata::new();
        for entity in &self.entities {
            metadata.register(entity.clone())?;
        }
        Ok(metadata)
    }

    /// A registry with a dynamic factory for every modelled type.
    pub fn dynamic_registry(&self) -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        for entity in &self.entities {
            registry.register_dynamic(entity);
        }
        registry
    }

    pub fn is_foreign(&self, type_name: &str) -> bool {
        self.foreign_types.iter().any(|t| t == type_name)
    }
}
