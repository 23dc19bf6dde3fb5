//! Context threaded through assembly.
//!
//! - [`TypeContext`] - current namespace and `use` aliases
//! - [`ContextStack`] - entities under construction, innermost on top

mod stack;
mod type_context;

#[cfg(test)]
mod tests;

pub use stack::ContextStack;
pub use type_context::TypeContext;
