//! Office model with a foreign `user` resource, for delegate tests.

use std::sync::Arc;

use hydrant_core::ArrayHydrator;
use hydrant_model::{EntityMetadata, InMemoryMetadata, TypeRegistry};
use hydrant_store::InMemoryEntityStore;
use hydrant_types::{DynamicEntity, Entity, FieldValue, Related, TypeError};

/// `user` is not part of the model; it only has a mutator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Desk {
    pub id: Option<i64>,
    pub inventory_id: Option<String>,
    pub office: Option<Related>,
    pub user: Option<Related>,
}

impl Entity for Desk {
    fn type_name(&self) -> &str {
        "desk"
    }

    fn invoke_setter(&mut self, setter: &str, value: FieldValue) -> Result<(), TypeError> {
        match setter {
            "set_office" => self.office = value.extract()?,
            "set_user" => self.user = value.extract()?,
            _ => return Err(TypeError::MissingMember(setter.into())),
        }
        Ok(())
    }

    fn write_slot(&mut self, field: &str, value: FieldValue) -> Result<(), TypeError> {
        match field {
            "id" => self.id = value.extract()?,
            "inventoryId" => self.inventory_id = value.extract()?,
            "office" => self.office = value.extract()?,
            _ => return Err(TypeError::MissingMember(field.into())),
        }
        Ok(())
    }

    fn read_slot(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "inventoryId" => Some(self.inventory_id.clone().into()),
            "office" => Some(self.office.clone().into()),
            _ => None,
        }
    }
}

fn named(type_name: &str, id: i64, name: &str) -> DynamicEntity {
    let mut entity = DynamicEntity::new(type_name, ["id", "name"]);
    entity.write_slot("id", FieldValue::Int(id)).unwrap();
    entity.write_slot("name", name.into()).unwrap();
    entity
}

/// The foreign user directory: user 7 is "Ada".
pub fn people() -> InMemoryEntityStore {
    InMemoryEntityStore::new().with(named("user", 7, "Ada")).unwrap()
}

/// Flat hydrator over desks and offices; office 3 is "HQ".
pub fn office_hydrator() -> ArrayHydrator {
    let office = EntityMetadata::new("office")
        .field("id", "integer")
        .field("name", "string");
    let desk = EntityMetadata::new("desk")
        .field("id", "integer")
        .field("inventoryId", "string")
        .to_one("office", "office");
    let metadata = InMemoryMetadata::new()
        .with(office.clone())
        .unwrap()
        .with(desk)
        .unwrap();

    let mut registry = TypeRegistry::new().with_default::<Desk>();
    registry.register_dynamic(&office);

    let store = InMemoryEntityStore::new().with(named("office", 3, "HQ")).unwrap();
    ArrayHydrator::new(Arc::new(metadata), Arc::new(registry), Arc::new(store))
}
