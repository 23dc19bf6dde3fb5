//! File and namespace aggregates.

use indexmap::IndexMap;

use crate::base::{Fqsen, ReflectionError, ReflectionResult};

use super::docblock::DocBlock;
use super::element::Element;
use super::elements::{Class, Constant, Enum, Function, Interface, Trait};

/// A namespace and the identifiers of everything declared directly in it.
///
/// Namespaces hold identifiers, not entities: the same namespace spans any
/// number of files.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Namespace {
    pub fqsen: Fqsen,
    pub classes: Vec<Fqsen>,
    pub interfaces: Vec<Fqsen>,
    pub traits: Vec<Fqsen>,
    pub enums: Vec<Fqsen>,
    pub functions: Vec<Fqsen>,
    pub constants: Vec<Fqsen>,
}

impl Namespace {
    pub fn new(fqsen: Fqsen) -> Self {
        Self {
            fqsen,
            classes: Vec::new(),
            interfaces: Vec::new(),
            traits: Vec::new(),
            enums: Vec::new(),
            functions: Vec::new(),
            constants: Vec::new(),
        }
    }

    /// Fold another view of the same namespace into this one.
    pub fn merge(&mut self, other: &Namespace) {
        extend_unique(&mut self.classes, &other.classes);
        extend_unique(&mut self.interfaces, &other.interfaces);
        extend_unique(&mut self.traits, &other.traits);
        extend_unique(&mut self.enums, &other.enums);
        extend_unique(&mut self.functions, &other.functions);
        extend_unique(&mut self.constants, &other.constants);
    }

    pub fn len(&self) -> usize {
        self.classes.len()
            + self.interfaces.len()
            + self.traits.len()
            + self.enums.len()
            + self.functions.len()
            + self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn extend_unique(into: &mut Vec<Fqsen>, from: &[Fqsen]) {
    for fqsen in from {
        if !into.contains(fqsen) {
            into.push(fqsen.clone());
        }
    }
}

/// Everything declared at the top level of one source file.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct File {
    pub path: String,
    pub docblock: Option<DocBlock>,
    pub namespaces: IndexMap<String, Namespace>,
    pub classes: IndexMap<String, Class>,
    pub interfaces: IndexMap<String, Interface>,
    pub traits: IndexMap<String, Trait>,
    pub enums: IndexMap<String, Enum>,
    pub functions: IndexMap<String, Function>,
    pub constants: IndexMap<String, Constant>,
}

impl File {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Make sure a namespace entry exists, even if nothing is declared in it.
    pub fn add_namespace(&mut self, fqsen: Fqsen) -> &mut Namespace {
        self.namespaces
            .entry(fqsen.to_string())
            .or_insert_with(|| Namespace::new(fqsen))
    }

    /// Attach a top-level element and list it under its namespace.
    pub fn add_element(&mut self, element: Element) -> ReflectionResult<()> {
        let Some(fqsen) = element.fqsen().cloned() else {
            return Err(ReflectionError::UnexpectedParent {
                parent: "file",
                child: element.type_name(),
            });
        };
        let namespace = fqsen.parent().unwrap_or_else(Fqsen::root);
        let key = fqsen.to_string();
        match element {
            Element::Class(e) => {
                self.classes.insert(key, e);
                self.add_namespace(namespace).classes.push(fqsen);
            }
            Element::Interface(e) => {
                self.interfaces.insert(key, e);
                self.add_namespace(namespace).interfaces.push(fqsen);
            }
            Element::Trait(e) => {
                self.traits.insert(key, e);
                self.add_namespace(namespace).traits.push(fqsen);
            }
            Element::Enum(e) => {
                self.enums.insert(key, e);
                self.add_namespace(namespace).enums.push(fqsen);
            }
            Element::Function(e) => {
                self.functions.insert(key, e);
                self.add_namespace(namespace).functions.push(fqsen);
            }
            Element::Constant(e) => {
                self.constants.insert(key, e);
                self.add_namespace(namespace).constants.push(fqsen);
            }
            other => {
                return Err(ReflectionError::UnexpectedParent {
                    parent: "file",
                    child: other.type_name(),
                });
            }
        }
        Ok(())
    }

    pub fn class(&self, fqsen: &str) -> Option<&Class> {
        self.classes.get(fqsen)
    }

    pub fn function(&self, fqsen: &str) -> Option<&Function> {
        self.functions.get(fqsen)
    }

    pub fn constant(&self, fqsen: &str) -> Option<&Constant> {
        self.constants.get(fqsen)
    }
}
