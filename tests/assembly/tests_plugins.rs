//! Extending the default registry and middleware configuration.

use std::sync::Arc;

use reflect::context::ContextStack;
use reflect::factory::strategies::ClassLikeStrategy;
use reflect::factory::{MiddlewareCatalog, MiddlewareChain, Services, Strategy, StrategyRegistry};
use reflect::model::{Element, Metadata};
use reflect::syntax::{Node, NodeKind};
use reflect::{AssemblyOptions, ProjectFactory, ReflectionError, ReflectionResult};

use crate::helpers::model_assertions::class;
use crate::helpers::source_fixtures::pizza_file;

#[derive(Debug, PartialEq)]
struct Hooks(Vec<String>);

impl Metadata for Hooks {
    fn key(&self) -> &str {
        "hooks"
    }
}

/// Builds classes as usual and records their method names as hooks.
struct HooksStrategy {
    inner: ClassLikeStrategy,
}

impl Strategy for HooksStrategy {
    fn matches(&self, context: &ContextStack, node: Node<'_>) -> bool {
        self.inner.matches(context, node)
    }

    fn create(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        registry: &StrategyRegistry,
    ) -> ReflectionResult<Option<Element>> {
        let Some(mut element) = self.inner.create(context, node, registry)? else {
            return Ok(None);
        };
        if let Element::Class(class) = &element {
            let hooks = Hooks(
                class
                    .methods
                    .values()
                    .map(|method| method.fqsen.name().to_string())
                    .collect(),
            );
            let owner = class.fqsen.to_string();
            if let Some(bag) = element.metadata_mut() {
                bag.add(hooks, &owner)?;
            }
        }
        Ok(Some(element))
    }
}

#[test]
fn test_plugin_strategy_adds_metadata() {
    let options = AssemblyOptions::sequential();
    let catalog = MiddlewareCatalog::default();
    let services = Services::default();
    let mut registry =
        ProjectFactory::default_registry(&options, &catalog, services.clone()).unwrap();
    let chain = MiddlewareChain::from_names(&options.middlewares, &catalog).unwrap();
    registry.add_strategy(
        HooksStrategy {
            inner: ClassLikeStrategy::new(NodeKind::Class, services, chain),
        },
        2000,
    );

    let factory = ProjectFactory::from_registry(registry, &options);
    let file = factory.create_file(pizza_file()).unwrap();
    let pizza = class(&file, "\\Luigi\\Pizza");

    assert_eq!(
        pizza.metadata.get::<Hooks>("hooks"),
        Some(&Hooks(vec!["__construct".to_string(), "bake".to_string()]))
    );
    // Members are still built by the default strategies.
    assert!(pizza.property("\\Luigi\\Pizza::$name").is_some());
}

#[test]
fn test_without_statements_middleware_members_are_skipped() {
    let options = AssemblyOptions {
        middlewares: vec!["implements".to_string()],
        ..AssemblyOptions::sequential()
    };
    let file = ProjectFactory::new(&options)
        .unwrap()
        .create_file(pizza_file())
        .unwrap();
    let pizza = class(&file, "\\Luigi\\Pizza");

    assert!(pizza.methods.is_empty());
    assert!(pizza.constants.is_empty());
    assert_eq!(pizza.interfaces.len(), 1);
}

#[test]
fn test_unknown_middleware_is_rejected() {
    let options = AssemblyOptions {
        middlewares: vec!["implements".to_string(), "toppings".to_string()],
        ..AssemblyOptions::default()
    };
    let err = ProjectFactory::new(&options).unwrap_err();
    assert!(matches!(
        err,
        ReflectionError::MiddlewareConfiguration { ref value } if value == "toppings"
    ));
}

#[test]
fn test_custom_catalog_middleware() {
    struct Halt;

    impl reflect::factory::Middleware for Halt {
        fn execute(
            &self,
            _command: &mut reflect::factory::CreateCommand<'_>,
            _next: &dyn reflect::factory::Next,
        ) -> ReflectionResult<()> {
            Ok(())
        }
    }

    let mut catalog = MiddlewareCatalog::default();
    catalog.register("halt", || Arc::new(Halt));
    let options = AssemblyOptions {
        middlewares: vec!["halt".to_string(), "statements".to_string()],
        ..AssemblyOptions::sequential()
    };
    let registry =
        ProjectFactory::default_registry(&options, &catalog, Services::default()).unwrap();
    let file = ProjectFactory::from_registry(registry, &options)
        .create_file(pizza_file())
        .unwrap();

    // The outermost middleware stopped construction: no class, but the
    // namespace was still entered.
    assert!(file.classes.is_empty());
    assert!(file.namespaces.contains_key("\\Luigi"));
}
