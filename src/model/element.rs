//! [`Element`] - the closed union of everything a strategy can build.

use crate::base::{Fqsen, ReflectionError, ReflectionResult};

use super::elements::{
    Argument, Attribute, Class, Constant, Enum, EnumCase, Function, Interface, Method, Property,
    Trait,
};
use super::file::File;
use super::metadata::MetadataBag;

#[derive(Debug, Clone)]
pub enum Element {
    File(File),
    Class(Class),
    Interface(Interface),
    Trait(Trait),
    Enum(Enum),
    Function(Function),
    Method(Method),
    Property(Property),
    Constant(Constant),
    EnumCase(EnumCase),
}

impl Element {
    /// Lowercase kind name used in logs and errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Element::File(_) => "file",
            Element::Class(_) => "class",
            Element::Interface(_) => "interface",
            Element::Trait(_) => "trait",
            Element::Enum(_) => "enum",
            Element::Function(_) => "function",
            Element::Method(_) => "method",
            Element::Property(_) => "property",
            Element::Constant(_) => "constant",
            Element::EnumCase(_) => "enum case",
        }
    }

    /// Files are keyed by path and have no identifier.
    pub fn fqsen(&self) -> Option<&Fqsen> {
        match self {
            Element::File(_) => None,
            Element::Class(e) => Some(&e.fqsen),
            Element::Interface(e) => Some(&e.fqsen),
            Element::Trait(e) => Some(&e.fqsen),
            Element::Enum(e) => Some(&e.fqsen),
            Element::Function(e) => Some(&e.fqsen),
            Element::Method(e) => Some(&e.fqsen),
            Element::Property(e) => Some(&e.fqsen),
            Element::Constant(e) => Some(&e.fqsen),
            Element::EnumCase(e) => Some(&e.fqsen),
        }
    }

    /// Attribute list, for elements that can be annotated.
    pub fn attributes_mut(&mut self) -> Option<&mut Vec<Attribute>> {
        match self {
            Element::File(_) => None,
            Element::Class(e) => Some(&mut e.attributes),
            Element::Interface(e) => Some(&mut e.attributes),
            Element::Trait(e) => Some(&mut e.attributes),
            Element::Enum(e) => Some(&mut e.attributes),
            Element::Function(e) => Some(&mut e.attributes),
            Element::Method(e) => Some(&mut e.attributes),
            Element::Property(e) => Some(&mut e.attributes),
            Element::Constant(e) => Some(&mut e.attributes),
            Element::EnumCase(e) => Some(&mut e.attributes),
        }
    }

    /// Argument list of functions and methods.
    pub fn arguments_mut(&mut self) -> Option<&mut Vec<Argument>> {
        match self {
            Element::Function(e) => Some(&mut e.arguments),
            Element::Method(e) => Some(&mut e.arguments),
            _ => None,
        }
    }

    pub fn metadata(&self) -> Option<&MetadataBag> {
        match self {
            Element::File(_) => None,
            Element::Class(e) => Some(&e.metadata),
            Element::Interface(e) => Some(&e.metadata),
            Element::Trait(e) => Some(&e.metadata),
            Element::Enum(e) => Some(&e.metadata),
            Element::Function(e) => Some(&e.metadata),
            Element::Method(e) => Some(&e.metadata),
            Element::Property(e) => Some(&e.metadata),
            Element::Constant(e) => Some(&e.metadata),
            Element::EnumCase(e) => Some(&e.metadata),
        }
    }

    pub fn metadata_mut(&mut self) -> Option<&mut MetadataBag> {
        match self {
            Element::File(_) => None,
            Element::Class(e) => Some(&mut e.metadata),
            Element::Interface(e) => Some(&mut e.metadata),
            Element::Trait(e) => Some(&mut e.metadata),
            Element::Enum(e) => Some(&mut e.metadata),
            Element::Function(e) => Some(&mut e.metadata),
            Element::Method(e) => Some(&mut e.metadata),
            Element::Property(e) => Some(&mut e.metadata),
            Element::Constant(e) => Some(&mut e.metadata),
            Element::EnumCase(e) => Some(&mut e.metadata),
        }
    }

    /// Attach a built child to this element, keyed by its identifier.
    pub fn add_member(&mut self, child: Element) -> ReflectionResult<()> {
        let parent = self.type_name();
        let unexpected = |child: &Element| ReflectionError::UnexpectedParent {
            parent,
            child: child.type_name(),
        };
        match (self, child) {
            (Element::File(file), child) => file.add_element(child),
            (Element::Class(class), Element::Method(m)) => {
                class.methods.insert(m.fqsen.to_string(), m);
                Ok(())
            }
            (Element::Class(class), Element::Property(p)) => {
                class.properties.insert(p.fqsen.to_string(), p);
                Ok(())
            }
            (Element::Class(class), Element::Constant(c)) => {
                class.constants.insert(c.fqsen.to_string(), c);
                Ok(())
            }
            (Element::Interface(interface), Element::Method(m)) => {
                interface.methods.insert(m.fqsen.to_string(), m);
                Ok(())
            }
            (Element::Interface(interface), Element::Constant(c)) => {
                interface.constants.insert(c.fqsen.to_string(), c);
                Ok(())
            }
            (Element::Trait(decl), Element::Method(m)) => {
                decl.methods.insert(m.fqsen.to_string(), m);
                Ok(())
            }
            (Element::Trait(decl), Element::Property(p)) => {
                decl.properties.insert(p.fqsen.to_string(), p);
                Ok(())
            }
            (Element::Trait(decl), Element::Constant(c)) => {
                decl.constants.insert(c.fqsen.to_string(), c);
                Ok(())
            }
            (Element::Enum(decl), Element::Method(m)) => {
                decl.methods.insert(m.fqsen.to_string(), m);
                Ok(())
            }
            (Element::Enum(decl), Element::Constant(c)) => {
                decl.constants.insert(c.fqsen.to_string(), c);
                Ok(())
            }
            (Element::Enum(decl), Element::EnumCase(case)) => {
                decl.cases.insert(case.fqsen.to_string(), case);
                Ok(())
            }
            (_, child) => Err(unexpected(&child)),
        }
    }

    /// Record an implemented (class, enum) or extended (interface) interface.
    pub fn add_interface(&mut self, interface: Fqsen) -> ReflectionResult<()> {
        match self {
            Element::Class(e) => e.interfaces.push(interface),
            Element::Enum(e) => e.interfaces.push(interface),
            Element::Interface(e) => e.parents.push(interface),
            other => {
                return Err(ReflectionError::UnexpectedParent {
                    parent: other.type_name(),
                    child: "interface reference",
                });
            }
        }
        Ok(())
    }

    pub fn add_used_trait(&mut self, used: Fqsen) -> ReflectionResult<()> {
        match self {
            Element::Class(e) => e.used_traits.push(used),
            Element::Trait(e) => e.used_traits.push(used),
            Element::Enum(e) => e.used_traits.push(used),
            other => {
                return Err(ReflectionError::UnexpectedParent {
                    parent: other.type_name(),
                    child: "trait reference",
                });
            }
        }
        Ok(())
    }
}
