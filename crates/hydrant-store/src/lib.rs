//! Entity storage seam for Hydrant.
//!
//! Hydration never persists anything. It only needs to turn identifiers
//! found in input data into related objects, and that is all this crate
//! covers.
//!
//! # Resolution modes
//!
//! [`ReferenceResolver`] is constructed with an explicit [`ResolutionMode`]:
//!
//! - [`ResolutionMode::Lightweight`] (default) binds a placeholder to the
//!   identifier without a lookup.
//! - [`ResolutionMode::Verified`] loads the object and reports unknown
//!   identifiers as unresolved.
//!
//! # Backends
//!
//! All backends implement [`EntityStore`]:
//!
//! - [`InMemoryEntityStore`]: `HashMap`-based store for tests and embedding

pub mod error;
pub mod memory;
pub mod resolver;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryEntityStore;
pub use resolver::{ReferenceResolver, ResolutionMode};
pub use traits::EntityStore;
