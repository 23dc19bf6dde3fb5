//! Functions and global constants.

use crate::base::{ReflectionError, ReflectionResult};
use crate::context::ContextStack;
use crate::model::{Constant, Element, Function, Type};
use crate::resolve::define_name;
use crate::syntax::{Expr, Node, NodeKind};

use super::super::reducer::{AttributeReducer, ParameterReducer, ReducerPipeline};
use super::super::registry::{Strategy, StrategyRegistry};
use super::super::services::Services;
use super::identifier;

#[derive(Debug, Clone)]
pub struct FunctionStrategy {
    services: Services,
    reducers: ReducerPipeline,
}

impl FunctionStrategy {
    pub fn new(services: Services) -> Self {
        let reducers = ReducerPipeline::new()
            .with(AttributeReducer::new(services.clone()))
            .with(ParameterReducer::new(services.clone()));
        Self { services, reducers }
    }
}

impl Strategy for FunctionStrategy {
    fn matches(&self, _context: &ContextStack, node: Node<'_>) -> bool {
        matches!(node, Node::Function(_))
    }

    fn create(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        registry: &StrategyRegistry,
    ) -> ReflectionResult<Option<Element>> {
        let Node::Function(decl) = node else {
            return Ok(None);
        };
        let types = context.type_context();
        let mut function = Function::new(identifier(node)?, decl.location);
        function.docblock = self.services.docblock(&decl.docs, types);
        function.returns_by_reference = decl.by_ref;
        function.return_type = decl
            .return_type
            .as_ref()
            .map(|hint| Type::from_hint(hint, types))
            .transpose()?;

        self.reducers
            .run(context, node, registry, Some(Element::Function(function)))
    }
}

/// `const A = 1, B = 2;` outside a class; each constant is attached to the
/// enclosing file.
#[derive(Debug, Clone)]
pub struct GlobalConstantStrategy {
    services: Services,
    reducers: ReducerPipeline,
}

impl GlobalConstantStrategy {
    pub fn new(services: Services) -> Self {
        let reducers = ReducerPipeline::new().with(AttributeReducer::new(services.clone()));
        Self { services, reducers }
    }
}

impl Strategy for GlobalConstantStrategy {
    fn matches(&self, _context: &ContextStack, node: Node<'_>) -> bool {
        matches!(node, Node::Const(_))
    }

    fn create(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        registry: &StrategyRegistry,
    ) -> ReflectionResult<Option<Element>> {
        let Node::Const(group) = node else {
            return Ok(None);
        };
        for declarator in &group.constants {
            let fqsen = declarator
                .fqsen
                .clone()
                .ok_or(ReflectionError::MissingIdentifier {
                    kind: NodeKind::Const,
                })?;
            let types = context.type_context();
            let mut constant = Constant::new(fqsen, declarator.location);
            constant.docblock = self.services.docblock_or(&declarator.docs, &group.docs, types);
            constant.value = Some(self.services.value(&declarator.value));

            let built = self
                .reducers
                .run(context, node, registry, Some(Element::Constant(constant)))?;
            if let Some(built) = built {
                context.parent_mut(NodeKind::Const)?.add_member(built)?;
            }
        }
        Ok(None)
    }
}

/// `define('NAME', value);` at the top level of a file.
#[derive(Debug, Clone, Default)]
pub struct DefineStrategy {
    services: Services,
}

impl DefineStrategy {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}

impl Strategy for DefineStrategy {
    fn matches(&self, _context: &ContextStack, node: Node<'_>) -> bool {
        match node {
            Node::Expression(stmt) => stmt.fqsen.is_some() && define_name(&stmt.expr).is_some(),
            _ => false,
        }
    }

    fn create(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        _registry: &StrategyRegistry,
    ) -> ReflectionResult<Option<Element>> {
        let Node::Expression(stmt) = node else {
            return Ok(None);
        };
        let Expr::Call { args, .. } = &stmt.expr else {
            return Ok(None);
        };
        let mut constant = Constant::new(identifier(node)?, stmt.location);
        constant.docblock = self.services.docblock(&stmt.docs, context.type_context());
        constant.value = args.get(1).map(|arg| self.services.value(&arg.value));
        Ok(Some(Element::Constant(constant)))
    }
}
