//! Identifier resolution - the first pass over a syntax tree.
//!
//! A single depth-first walk assigns an [`Fqsen`](crate::base::Fqsen) to
//! every node that introduces a named, referenceable declaration and stores
//! it in the node's `fqsen` slot.
//!
//! # Module structure
//!
//! - [`segments`] - the name-segment stack (push/pop of identifier parts)
//! - [`walker`] - the traversal and the per-node segment rules

mod segments;
mod walker;


pub use walker::resolve_names;

pub(crate) use walker::define_name;
