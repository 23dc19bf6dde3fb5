//! Built-in strategies, one per node kind.

mod class_like;
mod containers;
mod functions;
mod members;

pub use class_like::ClassLikeStrategy;
pub use containers::{ConditionalStrategy, FileStrategy, NamespaceStrategy};
pub use functions::{DefineStrategy, FunctionStrategy, GlobalConstantStrategy};
pub use members::{
    ClassConstantStrategy, ConstructorPromotionStrategy, EnumCaseStrategy, MethodStrategy,
    PropertyStrategy, TraitUseStrategy,
};

use crate::base::{Fqsen, ReflectionError, ReflectionResult};
use crate::syntax::{Node, NodeKind};

use super::middleware::MiddlewareChain;
use super::registry::{DEFAULT_PRIORITY, StrategyRegistry};
use super::services::Services;

/// Promoted constructors must be tried before plain methods.
pub const CONSTRUCTOR_PROMOTION_PRIORITY: i32 = DEFAULT_PRIORITY + 100;

/// The identifier the name walker stored on `node`.
fn identifier(node: Node<'_>) -> ReflectionResult<Fqsen> {
    node.fqsen()
        .cloned()
        .ok_or(ReflectionError::MissingIdentifier { kind: node.kind() })
}

/// Register every built-in strategy. Class-likes are built through `chain`.
pub fn register_defaults(
    registry: &mut StrategyRegistry,
    services: &Services,
    chain: &MiddlewareChain,
) {
    registry.add_strategy(FileStrategy::new(services.clone()), DEFAULT_PRIORITY);
    registry.add_strategy(NamespaceStrategy, DEFAULT_PRIORITY);
    registry.add_strategy(ConditionalStrategy, DEFAULT_PRIORITY);
    for kind in [
        NodeKind::Class,
        NodeKind::Interface,
        NodeKind::Trait,
        NodeKind::Enum,
    ] {
        registry.add_strategy(
            ClassLikeStrategy::new(kind, services.clone(), chain.clone()),
            DEFAULT_PRIORITY,
        );
    }
    registry.add_strategy(FunctionStrategy::new(services.clone()), DEFAULT_PRIORITY);
    registry.add_strategy(GlobalConstantStrategy::new(services.clone()), DEFAULT_PRIORITY);
    registry.add_strategy(DefineStrategy::new(services.clone()), DEFAULT_PRIORITY);
    registry.add_strategy(
        ConstructorPromotionStrategy::new(services.clone()),
        CONSTRUCTOR_PROMOTION_PRIORITY,
    );
    registry.add_strategy(MethodStrategy::new(services.clone()), DEFAULT_PRIORITY);
    registry.add_strategy(PropertyStrategy::new(services.clone()), DEFAULT_PRIORITY);
    registry.add_strategy(ClassConstantStrategy::new(services.clone()), DEFAULT_PRIORITY);
    registry.add_strategy(EnumCaseStrategy::new(services.clone()), DEFAULT_PRIORITY);
    registry.add_strategy(TraitUseStrategy, DEFAULT_PRIORITY);
}
