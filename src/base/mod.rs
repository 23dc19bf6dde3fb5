//! Foundation types for the reflection pipeline.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Fqsen`] - Validated fully-qualified element identifiers
//! - [`Location`] - Line ranges for model elements
//! - [`ReflectionError`] - The error taxonomy of model assembly
//!
//! Apart from the node kind carried in errors, this module has no
//! dependencies on other modules of the crate.

mod error;
mod fqsen;
mod location;

pub use error::{ReflectionError, ReflectionResult};
pub use fqsen::Fqsen;
pub use location::Location;
