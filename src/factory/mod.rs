//! The conversion engine: strategies, reducers and middleware.
//!
//! [`StrategyRegistry::build`] picks the first matching [`Strategy`] for a
//! node. Composite strategies push the bare element on the
//! [`ContextStack`](crate::context::ContextStack), let a [`MiddlewareChain`]
//! populate it, pop it and run it through a [`ReducerPipeline`]. Member
//! strategies attach to whatever sits on top of the stack.

pub mod evaluator;
mod middleware;
mod reducer;
mod registry;
mod services;
pub mod strategies;


pub use evaluator::{ConstantEvaluator, ConstantValue};
pub use middleware::{
    CreateCommand, ImplementsMiddleware, MemberHandler, Middleware, MiddlewareCatalog,
    MiddlewareChain, Next, StatementsMiddleware, Terminal,
};
pub use reducer::{AttributeReducer, ParameterReducer, Reducer, ReducerPipeline};
pub use registry::{DEFAULT_PRIORITY, Strategy, StrategyRegistry};
pub use services::Services;
