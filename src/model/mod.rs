//! The semantic model produced by assembly.
//!
//! - [`elements`] - class-likes, functions and members
//! - [`element`] - [`Element`], the union strategies hand around
//! - [`file`] - [`File`] and [`Namespace`] aggregates
//! - [`types`] - [`Type`]
//! - [`docblock`] - [`DocBlock`] and the [`DocBlockFactory`] collaborator
//! - [`metadata`] - extension data attached to elements

pub mod docblock;
pub mod element;
pub mod elements;
pub mod file;
pub mod metadata;
pub mod types;

pub use docblock::{DocBlock, DocBlockFactory, StandardDocBlockFactory, Tag};
pub use element::Element;
pub use elements::{
    Argument, Attribute, CallArgument, Class, Constant, Enum, EnumCase, Function, Interface,
    Method, Property, Trait, Visibility,
};
pub use file::{File, Namespace};
pub use metadata::{Metadata, MetadataBag};
pub use types::Type;

#[cfg(test)]
mod tests;
