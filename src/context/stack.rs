//! Build context - the stack of entities under construction.

use tracing::trace;

use crate::base::{ReflectionError, ReflectionResult};
use crate::model::Element;
use crate::syntax::NodeKind;

use super::type_context::TypeContext;

/// Entities being populated, innermost last, plus the lexical context.
///
/// The strategy that opens a scope owns the push and the matching pop;
/// nested construction only peeks at the top.
#[derive(Debug, Default)]
pub struct ContextStack {
    type_context: TypeContext,
    elements: Vec<Element>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_context(&self) -> &TypeContext {
        &self.type_context
    }

    /// Replace the lexical context; namespace blocks do not stack.
    pub fn set_type_context(&mut self, context: TypeContext) -> TypeContext {
        std::mem::replace(&mut self.type_context, context)
    }

    pub fn push(&mut self, element: Element) {
        trace!(
            "[CONTEXT] push {} (depth {})",
            element.type_name(),
            self.elements.len() + 1
        );
        self.elements.push(element);
    }

    pub fn pop(&mut self) -> Option<Element> {
        let element = self.elements.pop();
        if let Some(element) = &element {
            trace!(
                "[CONTEXT] pop {} (depth {})",
                element.type_name(),
                self.elements.len()
            );
        }
        element
    }

    /// Pop back down to `depth`, returning the element that sat at `depth`.
    ///
    /// Used by composite strategies to close exactly the scope they opened,
    /// even when a middleware short-circuited and nothing was pushed.
    pub fn pop_to(&mut self, depth: usize) -> Option<Element> {
        let mut opened = None;
        while self.elements.len() > depth {
            opened = self.pop();
        }
        opened
    }

    pub fn peek(&self) -> Option<&Element> {
        self.elements.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut Element> {
        self.elements.last_mut()
    }

    /// The top element, or an error naming the node that needed it.
    pub fn parent_mut(&mut self, kind: NodeKind) -> ReflectionResult<&mut Element> {
        self.elements
            .last_mut()
            .ok_or(ReflectionError::NoBuildContext { kind })
    }

    pub fn depth(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
