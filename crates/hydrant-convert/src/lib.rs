//! Scalar type conversion for Hydrant.
//!
//! A raw input value is converted according to the declared type of the
//! field it is written to. Conversion is a pluggable service: the hydrator
//! only sees the [`TypeConverter`] trait, and [`ConverterRegistry`] is the
//! standard table-driven implementation.
//!
//! Declared types without a registered converter pass through unchanged.
//! Conversion failures are returned as-is; the hydrator never reinterprets
//! them.

pub mod builtin;
pub mod error;
pub mod registry;
pub mod traits;

pub use builtin::Builtin;
pub use error::{ConvertError, ConvertResult};
pub use registry::ConverterRegistry;
pub use traits::{Converter, TypeConverter};
