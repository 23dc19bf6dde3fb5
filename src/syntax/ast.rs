//! Statement and declaration nodes.
//!
//! Declaring nodes carry an `fqsen` slot that starts out `None` and is filled
//! in by [`crate::resolve::resolve_names`] before assembly.

use smol_str::SmolStr;

use crate::base::{Fqsen, Location};

use super::expr::{Arg, Expr};

/// A parsed source file: the root of the tree.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    pub path: String,
    pub statements: Vec<Stmt>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, statements: Vec<Stmt>) -> Self {
        Self {
            path: path.into(),
            statements,
        }
    }
}

/// A name as written in source: `Foo`, `Foo\Bar`, `\Foo` or `namespace\Foo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name(SmolStr);

impl Name {
    pub fn new(text: impl Into<SmolStr>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `\Foo\Bar`
    pub fn is_fully_qualified(&self) -> bool {
        self.0.starts_with('\\')
    }

    /// `namespace\Foo`
    pub fn is_relative(&self) -> bool {
        self.0
            .get(..10)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("namespace\\"))
    }

    /// `Foo` with no separator at all.
    pub fn is_unqualified(&self) -> bool {
        !self.0.contains('\\')
    }

    /// The segment before the first separator.
    pub fn first_segment(&self) -> &str {
        self.0.split('\\').next().unwrap_or_default()
    }

    /// The segment after the last separator.
    pub fn last_segment(&self) -> &str {
        self.0.rsplit('\\').next().unwrap_or_default()
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// A raw comment attached to a node by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub line: usize,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            line: 0,
        }
    }

    /// Whether this is a `/** ... */` documentation comment.
    pub fn is_doc(&self) -> bool {
        self.text.starts_with("/**")
    }
}

/// The last documentation comment in a list, the one closest to the node.
pub fn doc_comment(comments: &[Comment]) -> Option<&Comment> {
    comments.iter().rev().find(|c| c.is_doc())
}

/// Modifier keywords on a declaration or promoted parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub public: bool,
    pub protected: bool,
    pub private: bool,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_readonly: bool,
}

impl Modifiers {
    pub fn public() -> Self {
        Self {
            public: true,
            ..Self::default()
        }
    }

    pub fn protected() -> Self {
        Self {
            protected: true,
            ..Self::default()
        }
    }

    pub fn private() -> Self {
        Self {
            private: true,
            ..Self::default()
        }
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn with_readonly(mut self) -> Self {
        self.is_readonly = true;
        self
    }

    pub fn has_visibility(&self) -> bool {
        self.public || self.protected || self.private
    }
}

/// A type declaration as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
    /// A keyword (`int`, `self`, ...) or a class name.
    Named(Name),
    /// `?T`
    Nullable(Box<TypeHint>),
    /// `A|B`
    Union(Vec<TypeHint>),
    /// `A&B`
    Intersection(Vec<TypeHint>),
}

impl TypeHint {
    pub fn named(name: &str) -> Self {
        Self::Named(Name::new(name))
    }

    pub fn nullable(inner: TypeHint) -> Self {
        Self::Nullable(Box::new(inner))
    }
}

/// `#[A, B(1)]`
#[derive(Debug, Clone, Default)]
pub struct AttributeGroup {
    pub attributes: Vec<AttributeNode>,
    pub location: Location,
}

/// A single attribute inside a group.
#[derive(Debug, Clone, Default)]
pub struct AttributeNode {
    pub name: Name,
    pub args: Vec<Arg>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Namespace(NamespaceBlock),
    Use(UseStmt),
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Trait(TraitDecl),
    Enum(EnumDecl),
    Function(FunctionDecl),
    Const(ConstGroup),
    Expression(ExpressionStmt),
    If(IfStmt),
    /// Any statement that declares nothing (echo, return, loops, ...).
    Other(OtherStmt),
}

/// `namespace Foo;` or `namespace Foo { ... }`; `name` is `None` for the
/// global `namespace { ... }` block.
#[derive(Debug, Clone, Default)]
pub struct NamespaceBlock {
    pub name: Option<Name>,
    pub statements: Vec<Stmt>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UseKind {
    #[default]
    Class,
    Function,
    Constant,
}

/// `use Foo\Bar as Baz, Foo\Qux;`
#[derive(Debug, Clone, Default)]
pub struct UseStmt {
    pub kind: UseKind,
    pub items: Vec<UseItem>,
    pub location: Location,
}

#[derive(Debug, Clone, Default)]
pub struct UseItem {
    pub name: Name,
    pub alias: Option<SmolStr>,
}

impl UseItem {
    /// The short name this import binds.
    pub fn local_name(&self) -> &str {
        self.alias
            .as_deref()
            .unwrap_or_else(|| self.name.last_segment())
    }
}

/// A class declaration; `name` is `None` for `new class { ... }`.
#[derive(Debug, Clone, Default)]
pub struct ClassDecl {
    pub name: Option<SmolStr>,
    pub fqsen: Option<Fqsen>,
    pub modifiers: Modifiers,
    pub extends: Option<Name>,
    pub implements: Vec<Name>,
    pub members: Vec<ClassMember>,
    pub attributes: Vec<AttributeGroup>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

#[derive(Debug, Clone, Default)]
pub struct InterfaceDecl {
    pub name: SmolStr,
    pub fqsen: Option<Fqsen>,
    pub extends: Vec<Name>,
    pub members: Vec<ClassMember>,
    pub attributes: Vec<AttributeGroup>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

#[derive(Debug, Clone, Default)]
pub struct TraitDecl {
    pub name: SmolStr,
    pub fqsen: Option<Fqsen>,
    pub members: Vec<ClassMember>,
    pub attributes: Vec<AttributeGroup>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

#[derive(Debug, Clone, Default)]
pub struct EnumDecl {
    pub name: SmolStr,
    pub fqsen: Option<Fqsen>,
    pub backing_type: Option<TypeHint>,
    pub implements: Vec<Name>,
    pub members: Vec<ClassMember>,
    pub attributes: Vec<AttributeGroup>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

/// A statement inside a class-like body.
#[derive(Debug, Clone)]
pub enum ClassMember {
    TraitUse(TraitUse),
    Constant(ClassConstGroup),
    Property(PropertyGroup),
    Method(MethodDecl),
    EnumCase(EnumCaseDecl),
}

/// `use A, B;` inside a class body.
#[derive(Debug, Clone, Default)]
pub struct TraitUse {
    pub traits: Vec<Name>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

/// `const A = 1, B = 2;` inside a class body.
#[derive(Debug, Clone, Default)]
pub struct ClassConstGroup {
    pub modifiers: Modifiers,
    pub type_hint: Option<TypeHint>,
    pub constants: Vec<ConstDeclarator>,
    pub attributes: Vec<AttributeGroup>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

/// One `NAME = value` of a constant group.
#[derive(Debug, Clone, Default)]
pub struct ConstDeclarator {
    pub name: SmolStr,
    pub value: Expr,
    pub fqsen: Option<Fqsen>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

impl ConstDeclarator {
    pub fn new(name: impl Into<SmolStr>, value: Expr) -> Self {
        Self {
            name: name.into(),
            value,
            ..Self::default()
        }
    }
}

/// `public int $a = 1, $b;`
#[derive(Debug, Clone, Default)]
pub struct PropertyGroup {
    pub modifiers: Modifiers,
    pub type_hint: Option<TypeHint>,
    pub properties: Vec<PropertyDeclarator>,
    pub attributes: Vec<AttributeGroup>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

#[derive(Debug, Clone, Default)]
pub struct PropertyDeclarator {
    pub name: SmolStr,
    pub default: Option<Expr>,
    pub fqsen: Option<Fqsen>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

impl PropertyDeclarator {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MethodDecl {
    pub name: SmolStr,
    pub fqsen: Option<Fqsen>,
    pub modifiers: Modifiers,
    pub by_ref: bool,
    pub params: Vec<Param>,
    pub return_type: Option<TypeHint>,
    /// `None` for abstract and interface methods.
    pub body: Option<Vec<Stmt>>,
    pub attributes: Vec<AttributeGroup>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

#[derive(Debug, Clone, Default)]
pub struct FunctionDecl {
    pub name: SmolStr,
    pub fqsen: Option<Fqsen>,
    pub by_ref: bool,
    pub params: Vec<Param>,
    pub return_type: Option<TypeHint>,
    pub body: Vec<Stmt>,
    pub attributes: Vec<AttributeGroup>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

/// A function or method parameter. Visibility or `readonly` modifiers make
/// it a promoted constructor property.
#[derive(Debug, Clone, Default)]
pub struct Param {
    pub name: SmolStr,
    pub type_hint: Option<TypeHint>,
    pub default: Option<Expr>,
    pub by_ref: bool,
    pub variadic: bool,
    pub modifiers: Modifiers,
    pub attributes: Vec<AttributeGroup>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

impl Param {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_promoted(&self) -> bool {
        self.modifiers.has_visibility() || self.modifiers.is_readonly
    }
}

#[derive(Debug, Clone, Default)]
pub struct EnumCaseDecl {
    pub name: SmolStr,
    pub value: Option<Expr>,
    pub fqsen: Option<Fqsen>,
    pub attributes: Vec<AttributeGroup>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

/// `const A = 1;` outside a class.
#[derive(Debug, Clone, Default)]
pub struct ConstGroup {
    pub constants: Vec<ConstDeclarator>,
    pub attributes: Vec<AttributeGroup>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

/// An expression used as a statement; `fqsen` is set for `define()` calls.
#[derive(Debug, Clone, Default)]
pub struct ExpressionStmt {
    pub expr: Expr,
    pub fqsen: Option<Fqsen>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

/// `if (...) { ... } else { ... }`; `elseif` is a nested `If` in `otherwise`.
#[derive(Debug, Clone, Default)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Vec<Stmt>,
    pub otherwise: Option<Vec<Stmt>>,
    pub docs: Vec<Comment>,
    pub location: Location,
}

#[derive(Debug, Clone, Default)]
pub struct OtherStmt {
    pub docs: Vec<Comment>,
    pub location: Location,
}
