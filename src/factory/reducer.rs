//! Enrichment steps applied to a built element.

use std::fmt;
use std::sync::Arc;

use crate::base::{ReflectionError, ReflectionResult};
use crate::context::ContextStack;
use crate::model::{Argument, Element, Type};
use crate::syntax::Node;

use super::registry::StrategyRegistry;
use super::services::Services;

/// One enrichment step.
///
/// A `None` carry means an earlier step vetoed the element; implementations
/// return `None` straight away without touching anything.
pub trait Reducer: Send + Sync {
    fn reduce(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        registry: &StrategyRegistry,
        carry: Option<Element>,
    ) -> ReflectionResult<Option<Element>>;
}

/// Reducers in order; the output of each is the carry of the next.
#[derive(Clone, Default)]
pub struct ReducerPipeline {
    reducers: Vec<Arc<dyn Reducer>>,
}

impl fmt::Debug for ReducerPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerPipeline")
            .field("len", &self.reducers.len())
            .finish()
    }
}

impl ReducerPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reducer: impl Reducer + 'static) -> Self {
        self.reducers.push(Arc::new(reducer));
        self
    }

    pub fn push(&mut self, reducer: Arc<dyn Reducer>) {
        self.reducers.push(reducer);
    }

    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }

    pub fn run(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        registry: &StrategyRegistry,
        carry: Option<Element>,
    ) -> ReflectionResult<Option<Element>> {
        let mut carry = carry;
        for reducer in &self.reducers {
            carry = reducer.reduce(context, node, registry, carry)?;
        }
        Ok(carry)
    }
}

/// Resolves the node's attribute groups onto the element.
#[derive(Debug, Clone, Default)]
pub struct AttributeReducer {
    services: Services,
}

impl AttributeReducer {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}

impl Reducer for AttributeReducer {
    fn reduce(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        _registry: &StrategyRegistry,
        carry: Option<Element>,
    ) -> ReflectionResult<Option<Element>> {
        let Some(mut element) = carry else {
            return Ok(None);
        };
        let carrier = element.type_name();
        let Some(attributes) = element.attributes_mut() else {
            return Err(ReflectionError::unsupported_carrier("attributes", carrier));
        };
        let groups = node.attribute_groups().unwrap_or_default();
        attributes.extend(self.services.attributes(groups, context.type_context())?);
        Ok(Some(element))
    }
}

/// Turns the parameters of a function-like node into [`Argument`]s.
#[derive(Debug, Clone, Default)]
pub struct ParameterReducer {
    services: Services,
}

impl ParameterReducer {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}

impl Reducer for ParameterReducer {
    fn reduce(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        _registry: &StrategyRegistry,
        carry: Option<Element>,
    ) -> ReflectionResult<Option<Element>> {
        let Some(mut element) = carry else {
            return Ok(None);
        };
        let carrier = element.type_name();
        let Some(arguments) = element.arguments_mut() else {
            return Err(ReflectionError::unsupported_carrier("parameters", carrier));
        };
        let types = context.type_context();
        for param in node.params().unwrap_or_default() {
            arguments.push(Argument {
                name: param.name.clone(),
                ty: param
                    .type_hint
                    .as_ref()
                    .map(|hint| Type::from_hint(hint, types))
                    .transpose()?,
                default: param.default.as_ref().map(|expr| self.services.render(expr)),
                by_reference: param.by_ref,
                is_variadic: param.variadic,
                attributes: self.services.attributes(&param.attributes, types)?,
            });
        }
        Ok(Some(element))
    }
}
