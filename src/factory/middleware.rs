//! Middleware around the construction of composite elements.
//!
//! A chain `[a, b]` around a terminal `t` runs as
//! `a-before, b-before, t, b-after, a-after`: the head of the list is the
//! outermost layer. The chain is assembled by folding from the tail, each
//! layer boxing the one inside it.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::base::{ReflectionError, ReflectionResult};
use crate::context::ContextStack;
use crate::syntax::{Node, NodeKind};

use super::registry::StrategyRegistry;

/// What a middleware layer receives: the build context, the node being
/// converted and the registry for nested construction.
pub struct CreateCommand<'a> {
    pub context: &'a mut ContextStack,
    pub node: Node<'a>,
    pub registry: &'a StrategyRegistry,
}

impl fmt::Debug for CreateCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateCommand")
            .field("node", &self.node.kind())
            .field("depth", &self.context.depth())
            .finish()
    }
}

/// The rest of the chain, as seen from one layer.
pub trait Next {
    fn run(&self, command: &mut CreateCommand<'_>) -> ReflectionResult<()>;
}

/// A layer around element construction. Calling `next.run` continues
/// inward; not calling it short-circuits everything inside.
pub trait Middleware: Send + Sync {
    fn execute(&self, command: &mut CreateCommand<'_>, next: &dyn Next) -> ReflectionResult<()>;
}

/// The innermost step: builds the bare element and pushes it.
pub type Terminal<'t> = dyn Fn(&mut CreateCommand<'_>) -> ReflectionResult<()> + 't;

struct TerminalStep<'t>(&'t Terminal<'t>);

impl Next for TerminalStep<'_> {
    fn run(&self, command: &mut CreateCommand<'_>) -> ReflectionResult<()> {
        (self.0)(command)
    }
}

struct Layer<'h> {
    middleware: &'h dyn Middleware,
    next: Box<dyn Next + 'h>,
}

impl Next for Layer<'_> {
    fn run(&self, command: &mut CreateCommand<'_>) -> ReflectionResult<()> {
        self.middleware.execute(command, self.next.as_ref())
    }
}

/// An ordered list of middlewares, fixed once built.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareChain")
            .field("len", &self.middlewares.len())
            .finish()
    }
}

impl MiddlewareChain {
    pub fn new(middlewares: Vec<Arc<dyn Middleware>>) -> Self {
        Self { middlewares }
    }

    /// Look every name up in `catalog`; the first unknown name fails the
    /// whole chain.
    pub fn from_names<S: AsRef<str>>(
        names: &[S],
        catalog: &MiddlewareCatalog,
    ) -> ReflectionResult<Self> {
        let middlewares = names
            .iter()
            .map(|name| catalog.get(name.as_ref()))
            .collect::<ReflectionResult<_>>()?;
        Ok(Self { middlewares })
    }

    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Run `terminal` wrapped in every layer of the chain.
    pub fn run(
        &self,
        command: &mut CreateCommand<'_>,
        terminal: &Terminal<'_>,
    ) -> ReflectionResult<()> {
        let innermost: Box<dyn Next + '_> = Box::new(TerminalStep(terminal));
        let composed = self
            .middlewares
            .iter()
            .rev()
            .fold(innermost, |next, middleware| {
                Box::new(Layer {
                    middleware: middleware.as_ref(),
                    next,
                })
            });
        composed.run(command)
    }
}

type Constructor = Arc<dyn Fn() -> Arc<dyn Middleware> + Send + Sync>;

/// Middlewares available to configuration by name.
#[derive(Clone)]
pub struct MiddlewareCatalog {
    entries: IndexMap<String, Constructor>,
}

impl fmt::Debug for MiddlewareCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}

impl Default for MiddlewareCatalog {
    /// `implements` and `statements`.
    fn default() -> Self {
        let mut catalog = Self::empty();
        catalog.register("implements", || Arc::new(ImplementsMiddleware));
        catalog.register("statements", || Arc::new(StatementsMiddleware::default()));
        catalog
    }
}

impl MiddlewareCatalog {
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn register(
        &mut self,
        name: &str,
        constructor: impl Fn() -> Arc<dyn Middleware> + Send + Sync + 'static,
    ) {
        self.entries.insert(name.to_string(), Arc::new(constructor));
    }

    pub fn get(&self, name: &str) -> ReflectionResult<Arc<dyn Middleware>> {
        self.entries
            .get(name)
            .map(|constructor| constructor())
            .ok_or_else(|| ReflectionError::MiddlewareConfiguration {
                value: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }
}

/// Records the interfaces a class or enum implements, or an interface
/// extends.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImplementsMiddleware;

impl Middleware for ImplementsMiddleware {
    fn execute(&self, command: &mut CreateCommand<'_>, next: &dyn Next) -> ReflectionResult<()> {
        let depth = command.context.depth();
        next.run(command)?;
        if command.context.depth() <= depth {
            return Ok(());
        }

        let names = match command.node {
            Node::Class(decl) => decl.implements.as_slice(),
            Node::Enum(decl) => decl.implements.as_slice(),
            Node::Interface(decl) => decl.extends.as_slice(),
            _ => &[],
        };
        for name in names {
            let fqsen = command.context.type_context().resolve_class(name)?;
            trace!("[IMPLEMENTS] {fqsen}");
            command
                .context
                .parent_mut(command.node.kind())?
                .add_interface(fqsen)?;
        }
        Ok(())
    }
}

/// Converts a single class-body member.
pub type MemberHandler =
    Arc<dyn Fn(&mut ContextStack, Node<'_>, &StrategyRegistry) -> ReflectionResult<()> + Send + Sync>;

/// Dispatches every member of a class-like body to the handler registered
/// for its kind.
///
/// The default handlers hand the member to the registry; the matching
/// member strategy attaches what it builds to the element being built.
#[derive(Clone)]
pub struct StatementsMiddleware {
    handlers: FxHashMap<NodeKind, MemberHandler>,
}

impl fmt::Debug for StatementsMiddleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.handlers.keys().collect();
        kinds.sort();
        f.debug_struct("StatementsMiddleware")
            .field("handlers", &kinds)
            .finish()
    }
}

impl Default for StatementsMiddleware {
    fn default() -> Self {
        let delegate: MemberHandler = Arc::new(delegate_to_registry);
        let handlers = [
            NodeKind::TraitUse,
            NodeKind::ClassConstant,
            NodeKind::Property,
            NodeKind::Method,
            NodeKind::EnumCase,
        ]
        .into_iter()
        .map(|kind| (kind, delegate.clone()))
        .collect();
        Self { handlers }
    }
}

fn delegate_to_registry(
    context: &mut ContextStack,
    node: Node<'_>,
    registry: &StrategyRegistry,
) -> ReflectionResult<()> {
    registry.build_into_parent(context, node)
}

impl StatementsMiddleware {
    /// Replace the handler for one member kind.
    pub fn with_handler(mut self, kind: NodeKind, handler: MemberHandler) -> Self {
        self.handlers.insert(kind, handler);
        self
    }
}

impl Middleware for StatementsMiddleware {
    fn execute(&self, command: &mut CreateCommand<'_>, next: &dyn Next) -> ReflectionResult<()> {
        let depth = command.context.depth();
        next.run(command)?;
        if command.context.depth() <= depth {
            return Ok(());
        }

        for member in command.node.members().unwrap_or_default() {
            let node = Node::from(member);
            match self.handlers.get(&node.kind()) {
                Some(handler) => handler(command.context, node, command.registry)?,
                None => trace!("[STATEMENTS] no handler for {}", node.kind()),
            }
        }
        Ok(())
    }
}
