//! Foundation types for Hydrant.
//!
//! Every other Hydrant crate depends on `hydrant-types`. It defines what a
//! hydrated value looks like and how an object exposes its members to the
//! hydration engine.
//!
//! # Key Types
//!
//! - [`Entity`]: name-keyed accessor surface (mutators and slots) of a domain object
//! - [`FieldValue`]: converted value ready to be assigned to a member
//! - [`Identifier`]: identifier of a persisted object
//! - [`Related`]: an associated object: lightweight [`Reference`] or materialized entity
//! - [`DynamicEntity`]: map-backed entity for runtime-defined types

pub mod dynamic;
pub mod entity;
pub mod error;
pub mod identifier;
pub mod inflect;
pub mod related;
pub mod value;

pub use dynamic::DynamicEntity;
pub use entity::{Entity, EntityBase};
pub use error::TypeError;
pub use identifier::Identifier;
pub use inflect::{camelize, setter_name, snake_case};
pub use related::{Reference, Related};
pub use value::{FieldValue, FromFieldValue};

/// Untyped input for one hydration call, in input order.
pub type InputBag = serde_json::Map<String, serde_json::Value>;
