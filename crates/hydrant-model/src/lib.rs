//! Object-model metadata for Hydrant.
//!
//! The hydrator never inspects Rust types directly. Everything it knows
//! about a type comes from this crate:
//!
//! - [`EntityMetadata`]: identifier, scalar fields, and associations of one type
//! - [`MetadataProvider`]: read-only lookup service over all types
//! - [`TypeRegistry`]: zero-argument factories, so targets can be created by name
//! - [`ModelSchema`]: declarative TOML/JSON model description
//!
//! # Modules
//!
//! - [`descriptor`]: Field and association descriptors
//! - [`provider`]: The [`MetadataProvider`] trait and [`InMemoryMetadata`]
//! - [`registry`]: [`TypeRegistry`]
//! - [`schema`]: Schema files
//! - [`error`]: Error types

pub mod descriptor;
pub mod error;
pub mod provider;
pub mod registry;
pub mod schema;

pub use descriptor::{AssociationDescriptor, Cardinality, EntityMetadata, FieldDescriptor};
pub use error::{ModelError, ModelResult};
pub use provider::{InMemoryMetadata, MetadataProvider};
pub use registry::{EntityFactory, TypeRegistry};
pub use schema::ModelSchema;
