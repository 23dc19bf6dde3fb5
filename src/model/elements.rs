//! Model entities: class-likes, functions and their members.

use std::fmt;

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{Fqsen, Location};

use super::docblock::DocBlock;
use super::metadata::MetadataBag;
use super::types::Type;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `#[Name(args)]` with its arguments in call order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attribute {
    pub fqsen: Fqsen,
    pub arguments: Vec<CallArgument>,
}

/// An attribute argument: its value as source text, and the name for
/// named arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CallArgument {
    pub name: Option<SmolStr>,
    pub value: String,
}

/// A function or method parameter.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Argument {
    pub name: SmolStr,
    pub ty: Option<Type>,
    /// Default value as source text.
    pub default: Option<String>,
    pub by_reference: bool,
    pub is_variadic: bool,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Class {
    pub fqsen: Fqsen,
    pub docblock: Option<DocBlock>,
    pub location: Location,
    pub parent: Option<Fqsen>,
    pub interfaces: Vec<Fqsen>,
    pub used_traits: Vec<Fqsen>,
    pub constants: IndexMap<String, Constant>,
    pub properties: IndexMap<String, Property>,
    pub methods: IndexMap<String, Method>,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_readonly: bool,
    pub attributes: Vec<Attribute>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub metadata: MetadataBag,
}

impl Class {
    pub fn new(fqsen: Fqsen, location: Location) -> Self {
        Self {
            fqsen,
            docblock: None,
            location,
            parent: None,
            interfaces: Vec::new(),
            used_traits: Vec::new(),
            constants: IndexMap::new(),
            properties: IndexMap::new(),
            methods: IndexMap::new(),
            is_abstract: false,
            is_final: false,
            is_readonly: false,
            attributes: Vec::new(),
            metadata: MetadataBag::default(),
        }
    }

    pub fn method(&self, fqsen: &str) -> Option<&Method> {
        self.methods.get(fqsen)
    }

    pub fn property(&self, fqsen: &str) -> Option<&Property> {
        self.properties.get(fqsen)
    }

    pub fn constant(&self, fqsen: &str) -> Option<&Constant> {
        self.constants.get(fqsen)
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Interface {
    pub fqsen: Fqsen,
    pub docblock: Option<DocBlock>,
    pub location: Location,
    /// Interfaces this one extends.
    pub parents: Vec<Fqsen>,
    pub constants: IndexMap<String, Constant>,
    pub methods: IndexMap<String, Method>,
    pub attributes: Vec<Attribute>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub metadata: MetadataBag,
}

impl Interface {
    pub fn new(fqsen: Fqsen, location: Location) -> Self {
        Self {
            fqsen,
            docblock: None,
            location,
            parents: Vec::new(),
            constants: IndexMap::new(),
            methods: IndexMap::new(),
            attributes: Vec::new(),
            metadata: MetadataBag::default(),
        }
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Trait {
    pub fqsen: Fqsen,
    pub docblock: Option<DocBlock>,
    pub location: Location,
    pub used_traits: Vec<Fqsen>,
    pub constants: IndexMap<String, Constant>,
    pub properties: IndexMap<String, Property>,
    pub methods: IndexMap<String, Method>,
    pub attributes: Vec<Attribute>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub metadata: MetadataBag,
}

impl Trait {
    pub fn new(fqsen: Fqsen, location: Location) -> Self {
        Self {
            fqsen,
            docblock: None,
            location,
            used_traits: Vec::new(),
            constants: IndexMap::new(),
            properties: IndexMap::new(),
            methods: IndexMap::new(),
            attributes: Vec::new(),
            metadata: MetadataBag::default(),
        }
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Enum {
    pub fqsen: Fqsen,
    pub docblock: Option<DocBlock>,
    pub location: Location,
    /// `string` or `int` for backed enums.
    pub backing_type: Option<Type>,
    pub interfaces: Vec<Fqsen>,
    pub used_traits: Vec<Fqsen>,
    pub cases: IndexMap<String, EnumCase>,
    pub constants: IndexMap<String, Constant>,
    pub methods: IndexMap<String, Method>,
    pub attributes: Vec<Attribute>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub metadata: MetadataBag,
}

impl Enum {
    pub fn new(fqsen: Fqsen, location: Location, backing_type: Option<Type>) -> Self {
        Self {
            fqsen,
            docblock: None,
            location,
            backing_type,
            interfaces: Vec::new(),
            used_traits: Vec::new(),
            cases: IndexMap::new(),
            constants: IndexMap::new(),
            methods: IndexMap::new(),
            attributes: Vec::new(),
            metadata: MetadataBag::default(),
        }
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnumCase {
    pub fqsen: Fqsen,
    pub docblock: Option<DocBlock>,
    pub location: Location,
    /// Backing value as source text.
    pub value: Option<String>,
    pub attributes: Vec<Attribute>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub metadata: MetadataBag,
}

impl EnumCase {
    pub fn new(fqsen: Fqsen, location: Location, value: Option<String>) -> Self {
        Self {
            fqsen,
            docblock: None,
            location,
            value,
            attributes: Vec::new(),
            metadata: MetadataBag::default(),
        }
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Function {
    pub fqsen: Fqsen,
    pub docblock: Option<DocBlock>,
    pub location: Location,
    pub arguments: Vec<Argument>,
    pub return_type: Option<Type>,
    pub returns_by_reference: bool,
    pub attributes: Vec<Attribute>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub metadata: MetadataBag,
}

impl Function {
    pub fn new(fqsen: Fqsen, location: Location) -> Self {
        Self {
            fqsen,
            docblock: None,
            location,
            arguments: Vec::new(),
            return_type: None,
            returns_by_reference: false,
            attributes: Vec::new(),
            metadata: MetadataBag::default(),
        }
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Method {
    pub fqsen: Fqsen,
    pub docblock: Option<DocBlock>,
    pub location: Location,
    pub visibility: Visibility,
    pub arguments: Vec<Argument>,
    pub return_type: Option<Type>,
    pub returns_by_reference: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_static: bool,
    pub attributes: Vec<Attribute>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub metadata: MetadataBag,
}

impl Method {
    pub fn new(fqsen: Fqsen, location: Location) -> Self {
        Self {
            fqsen,
            docblock: None,
            location,
            visibility: Visibility::Public,
            arguments: Vec::new(),
            return_type: None,
            returns_by_reference: false,
            is_abstract: false,
            is_final: false,
            is_static: false,
            attributes: Vec::new(),
            metadata: MetadataBag::default(),
        }
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Property {
    pub fqsen: Fqsen,
    pub docblock: Option<DocBlock>,
    pub location: Location,
    pub visibility: Visibility,
    pub ty: Option<Type>,
    /// Default value as source text.
    pub default: Option<String>,
    pub is_static: bool,
    pub is_readonly: bool,
    /// Declared through a constructor parameter.
    pub is_promoted: bool,
    pub attributes: Vec<Attribute>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub metadata: MetadataBag,
}

impl Property {
    pub fn new(fqsen: Fqsen, location: Location) -> Self {
        Self {
            fqsen,
            docblock: None,
            location,
            visibility: Visibility::Public,
            ty: None,
            default: None,
            is_static: false,
            is_readonly: false,
            is_promoted: false,
            attributes: Vec::new(),
            metadata: MetadataBag::default(),
        }
    }
}

/// A class constant, or a global one when `visibility` is `None`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Constant {
    pub fqsen: Fqsen,
    pub docblock: Option<DocBlock>,
    pub location: Location,
    pub visibility: Option<Visibility>,
    pub ty: Option<Type>,
    /// Value as source text.
    pub value: Option<String>,
    pub is_final: bool,
    pub attributes: Vec<Attribute>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub metadata: MetadataBag,
}

impl Constant {
    pub fn new(fqsen: Fqsen, location: Location) -> Self {
        Self {
            fqsen,
            docblock: None,
            location,
            visibility: None,
            ty: None,
            value: None,
            is_final: false,
            attributes: Vec::new(),
            metadata: MetadataBag::default(),
        }
    }
}
