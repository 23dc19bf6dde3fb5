//! # php-reflect-base
//!
//! Builds a reflection model (files, namespaces, classes, functions and their
//! members) from already-parsed PHP syntax trees.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → Multi-file assembly, options, parallel batch
//!   ↓
//! factory   → Strategy registry, reducers, middleware, constant evaluation
//!   ↓
//! model     → Reflection elements, docblocks, types, metadata
//!   ↓
//! context   → TypeContext (namespace + aliases), ContextStack
//!   ↓
//! resolve   → Name resolution pass over the syntax tree
//!   ↓
//! syntax    → PHP AST, Node views, expression printer
//!   ↓
//! base      → Fqsen, Location, ReflectionError
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → resolve → context → model → factory → project)
// ============================================================================

/// Foundation types: Fqsen, Location, errors
pub mod base;

/// Syntax: PHP AST input and the expression printer
pub mod syntax;

/// Name resolution: annotates declarations with their Fqsen
pub mod resolve;

/// Context: type context and the element stack
pub mod context;

/// Reflection model elements
pub mod model;

/// Conversion engine: strategies, reducers, middleware
pub mod factory;

/// Project assembly
pub mod project;

// Re-export foundation types
pub use base::{Fqsen, Location, ReflectionError, ReflectionResult};

// Re-export the assembly entry points
pub use factory::{Strategy, StrategyRegistry};
pub use model::{Element, File, Namespace};
pub use project::{AssemblyOptions, Project, ProjectFactory};
pub use syntax::SourceFile;
