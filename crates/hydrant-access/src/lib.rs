//! Field access for Hydrant.
//!
//! Assigning a value to a named member goes through the [`FieldAccess`]
//! capability. [`PropertySetter`] is the standard strategy: it invokes the
//! conventional mutator (`set_<field>`) when the object has one and writes
//! the slot directly otherwise. [`MutatorAccess`] and [`SlotAccess`] are
//! the two halves on their own.

pub mod access;
pub mod error;

pub use access::{FieldAccess, MutatorAccess, PropertySetter, SlotAccess};
pub use error::{AccessError, AccessResult};
