//! Borrowed view over any node a strategy can be asked to convert.

use std::fmt;

use crate::base::{Fqsen, Location};

use super::ast::*;

/// The closed set of node kinds the pipeline dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    File,
    Namespace,
    Use,
    Class,
    Interface,
    Trait,
    Enum,
    Function,
    Const,
    Expression,
    If,
    Other,
    TraitUse,
    ClassConstant,
    Property,
    Method,
    EnumCase,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Namespace => "namespace",
            Self::Use => "use statement",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Trait => "trait",
            Self::Enum => "enum",
            Self::Function => "function",
            Self::Const => "constant",
            Self::Expression => "expression statement",
            Self::If => "if statement",
            Self::Other => "statement",
            Self::TraitUse => "trait use",
            Self::ClassConstant => "class constant",
            Self::Property => "property",
            Self::Method => "method",
            Self::EnumCase => "enum case",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed node of any kind.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    File(&'a SourceFile),
    Namespace(&'a NamespaceBlock),
    Use(&'a UseStmt),
    Class(&'a ClassDecl),
    Interface(&'a InterfaceDecl),
    Trait(&'a TraitDecl),
    Enum(&'a EnumDecl),
    Function(&'a FunctionDecl),
    Const(&'a ConstGroup),
    Expression(&'a ExpressionStmt),
    If(&'a IfStmt),
    Other(&'a OtherStmt),
    TraitUse(&'a TraitUse),
    ClassConstant(&'a ClassConstGroup),
    Property(&'a PropertyGroup),
    Method(&'a MethodDecl),
    EnumCase(&'a EnumCaseDecl),
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File(_) => NodeKind::File,
            Node::Namespace(_) => NodeKind::Namespace,
            Node::Use(_) => NodeKind::Use,
            Node::Class(_) => NodeKind::Class,
            Node::Interface(_) => NodeKind::Interface,
            Node::Trait(_) => NodeKind::Trait,
            Node::Enum(_) => NodeKind::Enum,
            Node::Function(_) => NodeKind::Function,
            Node::Const(_) => NodeKind::Const,
            Node::Expression(_) => NodeKind::Expression,
            Node::If(_) => NodeKind::If,
            Node::Other(_) => NodeKind::Other,
            Node::TraitUse(_) => NodeKind::TraitUse,
            Node::ClassConstant(_) => NodeKind::ClassConstant,
            Node::Property(_) => NodeKind::Property,
            Node::Method(_) => NodeKind::Method,
            Node::EnumCase(_) => NodeKind::EnumCase,
        }
    }

    pub fn location(&self) -> Location {
        match self {
            Node::File(file) => Location::new(
                1,
                file.statements
                    .last()
                    .map(|s| Node::from(s).location().end_line)
                    .unwrap_or(1),
            ),
            Node::Namespace(n) => n.location,
            Node::Use(n) => n.location,
            Node::Class(n) => n.location,
            Node::Interface(n) => n.location,
            Node::Trait(n) => n.location,
            Node::Enum(n) => n.location,
            Node::Function(n) => n.location,
            Node::Const(n) => n.location,
            Node::Expression(n) => n.location,
            Node::If(n) => n.location,
            Node::Other(n) => n.location,
            Node::TraitUse(n) => n.location,
            Node::ClassConstant(n) => n.location,
            Node::Property(n) => n.location,
            Node::Method(n) => n.location,
            Node::EnumCase(n) => n.location,
        }
    }

    pub fn line(&self) -> usize {
        self.location().start_line
    }

    /// Comments the parser attached in front of this node.
    pub fn comments(&self) -> &'a [Comment] {
        match *self {
            Node::File(_) | Node::Use(_) => &[],
            Node::Namespace(n) => &n.docs,
            Node::Class(n) => &n.docs,
            Node::Interface(n) => &n.docs,
            Node::Trait(n) => &n.docs,
            Node::Enum(n) => &n.docs,
            Node::Function(n) => &n.docs,
            Node::Const(n) => &n.docs,
            Node::Expression(n) => &n.docs,
            Node::If(n) => &n.docs,
            Node::Other(n) => &n.docs,
            Node::TraitUse(n) => &n.docs,
            Node::ClassConstant(n) => &n.docs,
            Node::Property(n) => &n.docs,
            Node::Method(n) => &n.docs,
            Node::EnumCase(n) => &n.docs,
        }
    }

    /// The documentation comment closest to this node.
    pub fn doc_comment(&self) -> Option<&'a Comment> {
        doc_comment(self.comments())
    }

    /// Attribute groups, for nodes that can carry them.
    pub fn attribute_groups(&self) -> Option<&'a [AttributeGroup]> {
        match *self {
            Node::Class(n) => Some(&n.attributes),
            Node::Interface(n) => Some(&n.attributes),
            Node::Trait(n) => Some(&n.attributes),
            Node::Enum(n) => Some(&n.attributes),
            Node::Function(n) => Some(&n.attributes),
            Node::Const(n) => Some(&n.attributes),
            Node::ClassConstant(n) => Some(&n.attributes),
            Node::Property(n) => Some(&n.attributes),
            Node::Method(n) => Some(&n.attributes),
            Node::EnumCase(n) => Some(&n.attributes),
            _ => None,
        }
    }

    /// Parameters, for function-like nodes.
    pub fn params(&self) -> Option<&'a [Param]> {
        match *self {
            Node::Function(n) => Some(&n.params),
            Node::Method(n) => Some(&n.params),
            _ => None,
        }
    }

    /// The identifier the name walker stored on this node, if any.
    pub fn fqsen(&self) -> Option<&'a Fqsen> {
        match *self {
            Node::Class(n) => n.fqsen.as_ref(),
            Node::Interface(n) => n.fqsen.as_ref(),
            Node::Trait(n) => n.fqsen.as_ref(),
            Node::Enum(n) => n.fqsen.as_ref(),
            Node::Function(n) => n.fqsen.as_ref(),
            Node::Method(n) => n.fqsen.as_ref(),
            Node::EnumCase(n) => n.fqsen.as_ref(),
            Node::Expression(n) => n.fqsen.as_ref(),
            _ => None,
        }
    }

    /// Class-like body members.
    pub fn members(&self) -> Option<&'a [ClassMember]> {
        match *self {
            Node::Class(n) => Some(&n.members),
            Node::Interface(n) => Some(&n.members),
            Node::Trait(n) => Some(&n.members),
            Node::Enum(n) => Some(&n.members),
            _ => None,
        }
    }
}

impl<'a> From<&'a Stmt> for Node<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        match stmt {
            Stmt::Namespace(n) => Node::Namespace(n),
            Stmt::Use(n) => Node::Use(n),
            Stmt::Class(n) => Node::Class(n),
            Stmt::Interface(n) => Node::Interface(n),
            Stmt::Trait(n) => Node::Trait(n),
            Stmt::Enum(n) => Node::Enum(n),
            Stmt::Function(n) => Node::Function(n),
            Stmt::Const(n) => Node::Const(n),
            Stmt::Expression(n) => Node::Expression(n),
            Stmt::If(n) => Node::If(n),
            Stmt::Other(n) => Node::Other(n),
        }
    }
}

impl<'a> From<&'a ClassMember> for Node<'a> {
    fn from(member: &'a ClassMember) -> Self {
        match member {
            ClassMember::TraitUse(n) => Node::TraitUse(n),
            ClassMember::Constant(n) => Node::ClassConstant(n),
            ClassMember::Property(n) => Node::Property(n),
            ClassMember::Method(n) => Node::Method(n),
            ClassMember::EnumCase(n) => Node::EnumCase(n),
        }
    }
}

impl<'a> From<&'a SourceFile> for Node<'a> {
    fn from(file: &'a SourceFile) -> Self {
        Node::File(file)
    }
}
