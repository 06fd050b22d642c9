//! Metadata-driven object hydration.
//!
//! A hydrator populates a domain object from untyped input, using the
//! object model to decide which keys are scalar fields and which are
//! associations. One call can build an entire object graph: association
//! entries may carry identifiers of existing objects or the input for new
//! nested ones.
//!
//! # Key Types
//!
//! - [`Hydrator`]: the hydration capability shared by all input shapes
//! - [`ArrayHydrator`]: hydration from flat input bags
//! - [`Target`]: an existing object or a type name to instantiate
//! - [`HydratorConfig`]: reference resolution and delegate strictness
//!
//! # Modules
//!
//! - [`array`]: The flat hydrator and its phase primitives
//! - [`input`]: Key normalization and relation items
//! - [`config`]: Hydrator configuration
//! - [`error`]: Error types

pub mod array;
pub mod config;
pub mod error;
pub mod hydrator;
pub mod input;
pub mod target;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use array::ArrayHydrator;
pub use config::HydratorConfig;
pub use error::{HydrateError, HydrateResult};
pub use hydrator::Hydrator;
pub use input::{as_input_bag, is_empty_value, normalize_keys, RelationItem};
pub use target::Target;
