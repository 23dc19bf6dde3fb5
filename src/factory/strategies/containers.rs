//! Strategies for nodes that only hold other statements.

use crate::base::{ReflectionError, ReflectionResult};
use crate::context::{ContextStack, TypeContext};
use crate::model::{DocBlock, Element, File};
use crate::syntax::{Comment, Node, NodeKind, Stmt};

use super::super::registry::{Strategy, StrategyRegistry};
use super::super::services::Services;

fn build_statements(
    context: &mut ContextStack,
    statements: &[Stmt],
    registry: &StrategyRegistry,
) -> ReflectionResult<()> {
    statements
        .iter()
        .try_for_each(|stmt| registry.build_into_parent(context, Node::from(stmt)))
}

/// Builds a [`File`] from a whole source file.
#[derive(Debug, Clone, Default)]
pub struct FileStrategy {
    services: Services,
}

impl FileStrategy {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    /// The first docblock of the file belongs to the file, rather than to the
    /// first statement, when that statement has a second docblock, is not a
    /// declaration, or the docblock carries `@package`.
    fn file_docblock(&self, statements: &[Stmt], context: &TypeContext) -> Option<DocBlock> {
        let first = statements.first()?;
        let docs: Vec<&Comment> = Node::from(first)
            .comments()
            .iter()
            .filter(|c| c.is_doc())
            .collect();
        let Some(candidate) = docs.first() else {
            return match first {
                Stmt::Namespace(block) => self.file_docblock(&block.statements, context),
                _ => None,
            };
        };
        let docblock = self.services.parse_docblock(&candidate.text, context);
        if docs.len() > 1 || !is_declaration(first) || docblock.has_tag("package") {
            Some(docblock)
        } else {
            None
        }
    }
}

fn is_declaration(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Class(_)
        | Stmt::Interface(_)
        | Stmt::Trait(_)
        | Stmt::Enum(_)
        | Stmt::Function(_)
        | Stmt::Const(_) => true,
        Stmt::Expression(expr) => expr.fqsen.is_some(),
        Stmt::Namespace(_) | Stmt::Use(_) | Stmt::If(_) | Stmt::Other(_) => false,
    }
}

impl Strategy for FileStrategy {
    fn matches(&self, _context: &ContextStack, node: Node<'_>) -> bool {
        matches!(node, Node::File(_))
    }

    fn create(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        registry: &StrategyRegistry,
    ) -> ReflectionResult<Option<Element>> {
        let Node::File(source) = node else {
            return Ok(None);
        };
        let previous =
            context.set_type_context(TypeContext::from_statements(None, &source.statements));

        let mut file = File::new(source.path.as_str());
        file.docblock = self.file_docblock(&source.statements, context.type_context());

        let depth = context.depth();
        context.push(Element::File(file));
        let result = build_statements(context, &source.statements, registry);
        let built = context.pop_to(depth);
        context.set_type_context(previous);
        result?;
        Ok(built)
    }
}

/// Enters a namespace block: swaps in its lexical context and builds its
/// statements into the enclosing file.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamespaceStrategy;

impl Strategy for NamespaceStrategy {
    fn matches(&self, _context: &ContextStack, node: Node<'_>) -> bool {
        matches!(node, Node::Namespace(_))
    }

    fn create(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        registry: &StrategyRegistry,
    ) -> ReflectionResult<Option<Element>> {
        let Node::Namespace(block) = node else {
            return Ok(None);
        };
        let type_context = TypeContext::from_statements(block.name.as_ref(), &block.statements);
        let namespace = type_context.namespace_fqsen()?;
        match context.parent_mut(NodeKind::Namespace)? {
            Element::File(file) => {
                file.add_namespace(namespace);
            }
            other => {
                return Err(ReflectionError::UnexpectedParent {
                    parent: other.type_name(),
                    child: "namespace",
                });
            }
        }

        let previous = context.set_type_context(type_context);
        let result = build_statements(context, &block.statements, registry);
        context.set_type_context(previous);
        result.map(|_| None)
    }
}

/// Descends into both branches of an `if`, so guarded declarations
/// (`if (!function_exists('f')) { function f() {} }`) are reflected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionalStrategy;

impl Strategy for ConditionalStrategy {
    fn matches(&self, _context: &ContextStack, node: Node<'_>) -> bool {
        matches!(node, Node::If(_))
    }

    fn create(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        registry: &StrategyRegistry,
    ) -> ReflectionResult<Option<Element>> {
        let Node::If(stmt) = node else {
            return Ok(None);
        };
        build_statements(context, &stmt.then_branch, registry)?;
        if let Some(otherwise) = &stmt.otherwise {
            build_statements(context, otherwise, registry)?;
        }
        Ok(None)
    }
}
