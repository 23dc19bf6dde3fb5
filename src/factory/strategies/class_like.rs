//! Classes, interfaces, traits and enums.

use crate::base::{ReflectionError, ReflectionResult};
use crate::context::{ContextStack, TypeContext};
use crate::model::{Class, Element, Enum, Interface, Trait, Type};
use crate::syntax::{Node, NodeKind};

use super::super::middleware::{CreateCommand, MiddlewareChain};
use super::super::reducer::{AttributeReducer, ReducerPipeline};
use super::super::registry::{Strategy, StrategyRegistry};
use super::super::services::Services;
use super::identifier;

/// Builds one kind of class-like.
///
/// The bare element is built by the innermost step of the middleware chain
/// and pushed on the context stack, where the middlewares fill in members
/// and relations. Once the chain unwinds the element is popped, run
/// through the reducers and handed back to the caller.
#[derive(Debug, Clone)]
pub struct ClassLikeStrategy {
    kind: NodeKind,
    services: Services,
    chain: MiddlewareChain,
    reducers: ReducerPipeline,
}

impl ClassLikeStrategy {
    pub fn new(kind: NodeKind, services: Services, chain: MiddlewareChain) -> Self {
        let reducers = ReducerPipeline::new().with(AttributeReducer::new(services.clone()));
        Self {
            kind,
            services,
            chain,
            reducers,
        }
    }

    fn bare(&self, node: Node<'_>, types: &TypeContext) -> ReflectionResult<Element> {
        let fqsen = identifier(node)?;
        let docblock = self.services.docblock(node.comments(), types);
        let element = match node {
            Node::Class(decl) => {
                let mut class = Class::new(fqsen, decl.location);
                class.docblock = docblock;
                class.parent = decl
                    .extends
                    .as_ref()
                    .map(|name| types.resolve_class(name))
                    .transpose()?;
                class.is_abstract = decl.modifiers.is_abstract;
                class.is_final = decl.modifiers.is_final;
                class.is_readonly = decl.modifiers.is_readonly;
                Element::Class(class)
            }
            Node::Interface(decl) => {
                let mut interface = Interface::new(fqsen, decl.location);
                interface.docblock = docblock;
                Element::Interface(interface)
            }
            Node::Trait(decl) => {
                let mut declared = Trait::new(fqsen, decl.location);
                declared.docblock = docblock;
                Element::Trait(declared)
            }
            Node::Enum(decl) => {
                let backing_type = decl
                    .backing_type
                    .as_ref()
                    .map(|hint| Type::from_hint(hint, types))
                    .transpose()?;
                let mut declared = Enum::new(fqsen, decl.location, backing_type);
                declared.docblock = docblock;
                Element::Enum(declared)
            }
            _ => {
                return Err(ReflectionError::unsupported_carrier(
                    "class-like",
                    node.kind().as_str(),
                ));
            }
        };
        Ok(element)
    }
}

impl Strategy for ClassLikeStrategy {
    fn matches(&self, _context: &ContextStack, node: Node<'_>) -> bool {
        node.kind() == self.kind
    }

    fn create(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        registry: &StrategyRegistry,
    ) -> ReflectionResult<Option<Element>> {
        let depth = context.depth();
        let mut command = CreateCommand {
            context: &mut *context,
            node,
            registry,
        };
        let result = self.chain.run(&mut command, &|command| {
            let element = self.bare(command.node, command.context.type_context())?;
            command.context.push(element);
            Ok(())
        });
        let built = context.pop_to(depth);
        result?;
        self.reducers.run(context, node, registry, built)
    }
}
