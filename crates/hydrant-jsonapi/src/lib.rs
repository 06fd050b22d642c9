//! JSON:API document hydration for Hydrant.
//!
//! [`JsonApiHydrator`] reads a resource object (optionally wrapped in a
//! top-level `data` member), assigns its `id` and `attributes`, and maps
//! its `relationships` onto the associations of the object model.
//! Relationships outside the model are handed to an injected
//! [`ForeignRelationDelegate`].

pub mod delegate;
pub mod document;
pub mod hydrator;

#[cfg(test)]
mod testing;

pub use delegate::{AttachOutcome, ForeignRelationDelegate, StoreBackedDelegate};
pub use document::{RelationshipData, ResourceIdentifier, ResourceLinkage};
pub use hydrator::JsonApiHydrator;
