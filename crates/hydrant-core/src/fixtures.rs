//! Sample object model shared by the Hydrant test suites.
//!
//! Users belong to a company, live at an address, and hold a collection of
//! permissions. Calls carry typed scalars for conversion tests.
//!
//! Only compiled for tests and with the `fixtures` feature.

use std::sync::Arc;

use chrono::NaiveDateTime;
use hydrant_model::{EntityMetadata, InMemoryMetadata, ModelResult, TypeRegistry};
use hydrant_store::{EntityStore, InMemoryEntityStore, StoreResult};
use hydrant_types::{Entity, FieldValue, Related, TypeError};

use crate::array::ArrayHydrator;

fn missing(member: &str) -> TypeError {
    TypeError::MissingMember(member.to_string())
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// Has mutators for everything except `id`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct User {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<Related>,
    pub address: Option<Related>,
    pub permissions: Vec<Related>,
}

impl User {
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn set_email(&mut self, email: Option<String>) {
        self.email = email;
    }

    pub fn set_company(&mut self, company: Option<Related>) {
        self.company = company;
    }

    pub fn set_address(&mut self, address: Option<Related>) {
        self.address = address;
    }

    pub fn set_permissions(&mut self, permissions: Vec<Related>) {
        self.permissions = permissions;
    }
}

impl Entity for User {
    fn type_name(&self) -> &str {
        "user"
    }

    fn invoke_setter(&mut self, setter: &str, value: FieldValue) -> Result<(), TypeError> {
        match setter {
            "set_name" => self.set_name(value.extract()?),
            "set_email" => self.set_email(value.extract()?),
            "set_company" => self.set_company(value.extract()?),
            "set_address" => self.set_address(value.extract()?),
            "set_permissions" => self.set_permissions(value.extract()?),
            _ => return Err(missing(setter)),
        }
        Ok(())
    }

    fn write_slot(&mut self, field: &str, value: FieldValue) -> Result<(), TypeError> {
        match field {
            "id" => self.id = value.extract()?,
            "name" => self.name = value.extract()?,
            "email" => self.email = value.extract()?,
            "company" => self.company = value.extract()?,
            "address" => self.address = value.extract()?,
            "permissions" => self.permissions = value.extract()?,
            _ => return Err(missing(field)),
        }
        Ok(())
    }

    fn read_slot(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.clone().into()),
            "email" => Some(self.email.clone().into()),
            "company" => Some(self.company.clone().into()),
            "address" => Some(self.address.clone().into()),
            "permissions" => Some(FieldValue::Collection(self.permissions.clone())),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Permission, Company, Address
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Permission {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl Entity for Permission {
    fn type_name(&self) -> &str {
        "permission"
    }

    fn write_slot(&mut self, field: &str, value: FieldValue) -> Result<(), TypeError> {
        match field {
            "id" => self.id = value.extract()?,
            "name" => self.name = value.extract()?,
            _ => return Err(missing(field)),
        }
        Ok(())
    }

    fn read_slot(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.clone().into()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Company {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl Company {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id: Some(id),
            name: Some(name.to_string()),
        }
    }
}

impl Entity for Company {
    fn type_name(&self) -> &str {
        "company"
    }

    fn write_slot(&mut self, field: &str, value: FieldValue) -> Result<(), TypeError> {
        match field {
            "id" => self.id = value.extract()?,
            "name" => self.name = value.extract()?,
            _ => return Err(missing(field)),
        }
        Ok(())
    }

    fn read_slot(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.clone().into()),
            _ => None,
        }
    }
}

/// `streetAddress` is written through `set_street_address`, which records
/// that it ran.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Address {
    pub id: Option<i64>,
    pub street_address: Option<String>,
    pub via_setter: bool,
}

impl Address {
    pub fn set_street_address(&mut self, street_address: Option<String>) {
        self.street_address = street_address;
        self.via_setter = true;
    }
}

impl Entity for Address {
    fn type_name(&self) -> &str {
        "address"
    }

    fn invoke_setter(&mut self, setter: &str, value: FieldValue) -> Result<(), TypeError> {
        match setter {
            "set_street_address" => self.set_street_address(value.extract()?),
            _ => return Err(missing(setter)),
        }
        Ok(())
    }

    fn write_slot(&mut self, field: &str, value: FieldValue) -> Result<(), TypeError> {
        match field {
            "id" => self.id = value.extract()?,
            "streetAddress" => self.street_address = value.extract()?,
            _ => return Err(missing(field)),
        }
        Ok(())
    }

    fn read_slot(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "streetAddress" => Some(self.street_address.clone().into()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Call
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Call {
    pub id: Option<i64>,
    pub duration: Option<i32>,
    pub start_time: Option<NaiveDateTime>,
    pub status: Option<bool>,
}

impl Entity for Call {
    fn type_name(&self) -> &str {
        "call"
    }

    fn write_slot(&mut self, field: &str, value: FieldValue) -> Result<(), TypeError> {
        match field {
            "id" => self.id = value.extract()?,
            "duration" => self.duration = value.extract()?,
            "startTime" => self.start_time = value.extract()?,
            "status" => self.status = value.extract()?,
            _ => return Err(missing(field)),
        }
        Ok(())
    }

    fn read_slot(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "duration" => Some(self.duration.into()),
            "startTime" => Some(self.start_time.into()),
            "status" => Some(self.status.into()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Metadata for every fixture type.
pub fn metadata() -> ModelResult<InMemoryMetadata> {
    let types = [
        EntityMetadata::new("user")
            .field("id", "integer")
            .field("name", "string")
            .field("email", "string")
            .to_one("company", "company")
            .to_one("address", "address")
            .to_many("permissions", "permission"),
        EntityMetadata::new("permission")
            .field("id", "integer")
            .field("name", "string"),
        EntityMetadata::new("company")
            .field("id", "integer")
            .field("name", "string"),
        EntityMetadata::new("address")
            .field("id", "integer")
            .field("streetAddress", "string"),
        EntityMetadata::new("call")
            .field("id", "integer")
            .field("duration", "integer")
            .field("startTime", "datetime")
            .field("status", "boolean"),
    ];

    let mut metadata = InMemoryMetadata::new();
    for entity in types {
        metadata.register(entity)?;
    }
    Ok(metadata)
}

/// Factories for every fixture type.
pub fn registry() -> TypeRegistry {
    TypeRegistry::new()
        .with_default::<User>()
        .with_default::<Permission>()
        .with_default::<Company>()
        .with_default::<Address>()
        .with_default::<Call>()
}

/// Company 1 ("testing"), permissions 1 to 5, and address 103.
pub fn store() -> StoreResult<InMemoryEntityStore> {
    let store = InMemoryEntityStore::new().with(Company::new(1, "testing"))?;
    for id in 1..=5 {
        store.insert(Box::new(Permission {
            id: Some(id),
            name: Some(format!("Permission {id}")),
        }))?;
    }
    store.with(Address {
        id: Some(103),
        street_address: Some("Main Street".into()),
        via_setter: false,
    })
}

/// Dynamic `office` and `desk` types whose members are declared in
/// snake_case.
pub fn snake_case_metadata() -> ModelResult<InMemoryMetadata> {
    let mut metadata = InMemoryMetadata::new();
    metadata.register(
        EntityMetadata::new("office")
            .field("id", "integer")
            .field("street_address", "string")
            .to_one("head_office", "office")
            .to_many("desk_items", "desk"),
    )?;
    metadata.register(
        EntityMetadata::new("desk")
            .field("id", "integer")
            .field("inventory_id", "string"),
    )?;
    Ok(metadata)
}

/// A flat hydrator over [`snake_case_metadata`], instantiating
/// [`DynamicEntity`](hydrant_types::DynamicEntity) targets.
pub fn snake_case_hydrator(store: Arc<dyn EntityStore>) -> ModelResult<ArrayHydrator> {
    let metadata = snake_case_metadata()?;
    let mut registry = TypeRegistry::new();
    for entity in metadata.types() {
        registry.register_dynamic(&entity);
    }
    Ok(ArrayHydrator::new(Arc::new(metadata), Arc::new(registry), store))
}

/// A flat hydrator over the fixture model, backed by `store`.
pub fn hydrator(store: Arc<dyn EntityStore>) -> ModelResult<ArrayHydrator> {
    Ok(ArrayHydrator::new(
        Arc::new(metadata()?),
        Arc::new(registry()),
        store,
    ))
}
