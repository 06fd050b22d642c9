//! The [`EntityStore`] trait defining the persistence seam.

use hydrant_types::{Entity, Identifier, Reference, Related};

use crate::error::StoreResult;

/// Persistence layer used to resolve relationship references.
///
/// Implementations must be thread-safe (`Send + Sync`). The hydrator only
/// reads through this trait; it never writes.
pub trait EntityStore: Send + Sync {
    /// Load the object of `type_name` with identifier `id`.
    ///
    /// Returns `Ok(None)` if no such object exists.
    fn find(&self, type_name: &str, id: &Identifier) -> StoreResult<Option<Box<dyn Entity>>>;

    /// A handle bound to `id` without verifying that the object exists.
    ///
    /// The default returns a [`Related::Reference`] placeholder. Backends
    /// with an identity map may return an already loaded object instead.
    fn reference(&self, type_name: &str, id: &Identifier) -> StoreResult<Related> {
        Ok(Related::Reference(Reference::new(type_name, id.clone())))
    }

    /// Whether an object with this identifier exists.
    fn contains(&self, type_name: &str, id: &Identifier) -> StoreResult<bool> {
        Ok(self.find(type_name, id)?.is_some())
    }
}
