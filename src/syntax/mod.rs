//! Syntax tree input.
//!
//! The types here are what a PHP parser adapter produces and what the
//! pipeline consumes. Tokenizing and parsing happen elsewhere; this module
//! only fixes the shape of the tree:
//!
//! - [`ast`] - statements and declarations, each with its [`Location`](crate::base::Location)
//!   and attached raw comments
//! - [`expr`] - expressions, with string literals keeping their raw spelling
//! - [`node`] - [`Node`], a borrowed view of any node, and its [`NodeKind`]
//! - [`printer`] - the [`ExpressionPrinter`] collaborator and its default

pub mod ast;
pub mod expr;
pub mod node;
pub mod printer;

pub use ast::{
    AttributeGroup, AttributeNode, ClassConstGroup, ClassDecl, ClassMember, Comment,
    ConstDeclarator, ConstGroup, EnumCaseDecl, EnumDecl, ExpressionStmt, FunctionDecl, IfStmt,
    InterfaceDecl, MethodDecl, Modifiers, Name, NamespaceBlock, OtherStmt, Param,
    PropertyDeclarator, PropertyGroup, SourceFile, Stmt, TraitDecl, TraitUse, TypeHint, UseItem,
    UseKind, UseStmt, doc_comment,
};
pub use expr::{Arg, ArrayItem, BinaryOp, Expr, NewClass, UnaryOp};
pub use node::{Node, NodeKind};
pub use printer::{ExpressionPrinter, StandardPrinter};
