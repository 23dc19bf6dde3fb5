//! Strategy selection by node.

use std::sync::Arc;

use tracing::trace;

use crate::base::ReflectionResult;
use crate::context::ContextStack;
use crate::model::Element;
use crate::syntax::Node;

use super::middleware::MiddlewareChain;
use super::services::Services;
use super::strategies::register_defaults;

/// Priority given to strategies registered without one.
pub const DEFAULT_PRIORITY: i32 = 1000;

/// Converts one kind of node into an element.
///
/// Composite strategies return the element they built and leave attaching
/// it to the caller. Member strategies attach what they build to the
/// element on top of the context stack and return `None`.
pub trait Strategy: Send + Sync {
    fn matches(&self, context: &ContextStack, node: Node<'_>) -> bool;

    fn create(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        registry: &StrategyRegistry,
    ) -> ReflectionResult<Option<Element>>;
}

struct Registered {
    priority: i32,
    strategy: Arc<dyn Strategy>,
}

/// Ordered strategies; the first that matches a node handles it.
///
/// Higher priorities are tried first, equal priorities in registration
/// order.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: Vec<Registered>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in strategy; class-likes are built
    /// through `chain`.
    pub fn with_defaults(services: &Services, chain: &MiddlewareChain) -> Self {
        let mut registry = Self::new();
        register_defaults(&mut registry, services, chain);
        registry
    }

    /// Register a strategy. It is tried before every strategy of lower
    /// priority and after those already registered at the same priority.
    pub fn add_strategy(&mut self, strategy: impl Strategy + 'static, priority: i32) {
        self.add_shared(Arc::new(strategy), priority);
    }

    pub fn add_shared(&mut self, strategy: Arc<dyn Strategy>, priority: i32) {
        let idx = self
            .strategies
            .iter()
            .position(|r| r.priority < priority)
            .unwrap_or(self.strategies.len());
        self.strategies.insert(idx, Registered { priority, strategy });
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn find_matching(&self, context: &ContextStack, node: Node<'_>) -> Option<&dyn Strategy> {
        self.strategies
            .iter()
            .find(|r| r.strategy.matches(context, node))
            .map(|r| r.strategy.as_ref())
    }

    /// Run the matching strategy, if any. Errors are tagged with the node's
    /// kind and line.
    pub fn build(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
    ) -> ReflectionResult<Option<Element>> {
        let Some(strategy) = self.find_matching(context, node) else {
            trace!("[FACTORY] no strategy for {} at line {}", node.kind(), node.line());
            return Ok(None);
        };
        trace!("[FACTORY] {} at line {}", node.kind(), node.line());
        strategy
            .create(context, node, self)
            .map_err(|err| err.at(node.kind(), node.line()))
    }

    /// Build a node and attach the result to the element on top of the
    /// context stack.
    pub fn build_into_parent(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
    ) -> ReflectionResult<()> {
        if let Some(element) = self.build(context, node)? {
            context
                .parent_mut(node.kind())
                .and_then(|parent| parent.add_member(element))
                .map_err(|err| err.at(node.kind(), node.line()))?;
        }
        Ok(())
    }
}
