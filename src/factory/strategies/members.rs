//! Member strategies.
//!
//! Each builds from a class-body node and attaches the result to the
//! class-like on top of the context stack, returning nothing.

use crate::base::{Fqsen, ReflectionError, ReflectionResult};
use crate::context::{ContextStack, TypeContext};
use crate::model::{Constant, Element, EnumCase, Method, Property, Type, Visibility};
use crate::syntax::{MethodDecl, Modifiers, Node, NodeKind, Param, TypeHint};

use super::super::reducer::{AttributeReducer, ParameterReducer, ReducerPipeline};
use super::super::registry::{Strategy, StrategyRegistry};
use super::super::services::Services;
use super::identifier;

fn visibility(modifiers: &Modifiers) -> Visibility {
    if modifiers.private {
        Visibility::Private
    } else if modifiers.protected {
        Visibility::Protected
    } else {
        Visibility::Public
    }
}

/// Properties of a `readonly class` are readonly without the keyword.
fn in_readonly_class(context: &ContextStack) -> bool {
    matches!(context.peek(), Some(Element::Class(class)) if class.is_readonly)
}

fn resolve_type(hint: Option<&TypeHint>, types: &TypeContext) -> ReflectionResult<Option<Type>> {
    hint.map(|hint| Type::from_hint(hint, types)).transpose()
}

/// Run `reducers` over `element` and attach whatever survives to the top
/// of the stack.
fn attach(
    context: &mut ContextStack,
    node: Node<'_>,
    registry: &StrategyRegistry,
    reducers: &ReducerPipeline,
    element: Element,
) -> ReflectionResult<()> {
    if let Some(built) = reducers.run(context, node, registry, Some(element))? {
        context.parent_mut(node.kind())?.add_member(built)?;
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct MethodStrategy {
    services: Services,
    reducers: ReducerPipeline,
}

impl MethodStrategy {
    pub fn new(services: Services) -> Self {
        let reducers = ReducerPipeline::new()
            .with(AttributeReducer::new(services.clone()))
            .with(ParameterReducer::new(services.clone()));
        Self { services, reducers }
    }

    fn method(
        &self,
        node: Node<'_>,
        decl: &MethodDecl,
        types: &TypeContext,
    ) -> ReflectionResult<Method> {
        let mut method = Method::new(identifier(node)?, decl.location);
        method.docblock = self.services.docblock(&decl.docs, types);
        method.visibility = visibility(&decl.modifiers);
        method.is_abstract = decl.modifiers.is_abstract;
        method.is_final = decl.modifiers.is_final;
        method.is_static = decl.modifiers.is_static;
        method.returns_by_reference = decl.by_ref;
        method.return_type = resolve_type(decl.return_type.as_ref(), types)?;
        Ok(method)
    }
}

impl Strategy for MethodStrategy {
    fn matches(&self, _context: &ContextStack, node: Node<'_>) -> bool {
        matches!(node, Node::Method(_))
    }

    fn create(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        registry: &StrategyRegistry,
    ) -> ReflectionResult<Option<Element>> {
        let Node::Method(decl) = node else {
            return Ok(None);
        };
        let method = self.method(node, decl, context.type_context())?;
        attach(context, node, registry, &self.reducers, Element::Method(method))?;
        Ok(None)
    }
}

/// A constructor whose parameters carry visibility or `readonly`: builds
/// the method as usual, then one promoted property per such parameter.
#[derive(Debug, Clone)]
pub struct ConstructorPromotionStrategy {
    services: Services,
    methods: MethodStrategy,
}

impl ConstructorPromotionStrategy {
    pub fn new(services: Services) -> Self {
        Self {
            methods: MethodStrategy::new(services.clone()),
            services,
        }
    }

    fn property(
        &self,
        owner: &Fqsen,
        param: &Param,
        types: &TypeContext,
        readonly_class: bool,
    ) -> ReflectionResult<Property> {
        let fqsen = owner.member(&format!("${}", param.name))?;
        let mut property = Property::new(fqsen, param.location);
        property.docblock = self.services.docblock(&param.docs, types);
        property.visibility = visibility(&param.modifiers);
        property.is_readonly = readonly_class || param.modifiers.is_readonly;
        property.is_promoted = true;
        property.ty = resolve_type(param.type_hint.as_ref(), types)?;
        property.default = param.default.as_ref().map(|expr| self.services.render(expr));
        property.attributes = self.services.attributes(&param.attributes, types)?;
        Ok(property)
    }
}

impl Strategy for ConstructorPromotionStrategy {
    fn matches(&self, context: &ContextStack, node: Node<'_>) -> bool {
        let Node::Method(decl) = node else {
            return false;
        };
        decl.name.eq_ignore_ascii_case("__construct")
            && decl.params.iter().any(Param::is_promoted)
            && matches!(context.peek(), Some(Element::Class(_) | Element::Trait(_)))
    }

    fn create(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        registry: &StrategyRegistry,
    ) -> ReflectionResult<Option<Element>> {
        let Node::Method(decl) = node else {
            return Ok(None);
        };
        self.methods.create(context, node, registry)?;

        let owner = context
            .peek()
            .and_then(Element::fqsen)
            .cloned()
            .ok_or(ReflectionError::NoBuildContext { kind: NodeKind::Method })?;
        let readonly_class = in_readonly_class(context);
        for param in decl.params.iter().filter(|p| p.is_promoted()) {
            let property =
                self.property(&owner, param, context.type_context(), readonly_class)?;
            context
                .parent_mut(NodeKind::Method)?
                .add_member(Element::Property(property))?;
        }
        Ok(None)
    }
}

/// `public int $a = 1, $b;` expands into one property per declarator.
#[derive(Debug, Clone)]
pub struct PropertyStrategy {
    services: Services,
    reducers: ReducerPipeline,
}

impl PropertyStrategy {
    pub fn new(services: Services) -> Self {
        let reducers = ReducerPipeline::new().with(AttributeReducer::new(services.clone()));
        Self { services, reducers }
    }
}

impl Strategy for PropertyStrategy {
    fn matches(&self, _context: &ContextStack, node: Node<'_>) -> bool {
        matches!(node, Node::Property(_))
    }

    fn create(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        registry: &StrategyRegistry,
    ) -> ReflectionResult<Option<Element>> {
        let Node::Property(group) = node else {
            return Ok(None);
        };
        let readonly_class = in_readonly_class(context);
        for declarator in &group.properties {
            let fqsen = declarator.fqsen.clone().ok_or(ReflectionError::MissingIdentifier {
                kind: NodeKind::Property,
            })?;
            let types = context.type_context();
            let mut property = Property::new(fqsen, declarator.location);
            property.docblock = self.services.docblock_or(&declarator.docs, &group.docs, types);
            property.visibility = visibility(&group.modifiers);
            property.is_static = group.modifiers.is_static;
            property.is_readonly = readonly_class || group.modifiers.is_readonly;
            property.ty = resolve_type(group.type_hint.as_ref(), types)?;
            property.default = declarator
                .default
                .as_ref()
                .map(|expr| self.services.render(expr));

            attach(context, node, registry, &self.reducers, Element::Property(property))?;
        }
        Ok(None)
    }
}

/// `const A = 1, B = 2;` in a class body expands into one constant per
/// declarator. A declarator's own docblock wins over the group's.
#[derive(Debug, Clone)]
pub struct ClassConstantStrategy {
    services: Services,
    reducers: ReducerPipeline,
}

impl ClassConstantStrategy {
    pub fn new(services: Services) -> Self {
        let reducers = ReducerPipeline::new().with(AttributeReducer::new(services.clone()));
        Self { services, reducers }
    }
}

impl Strategy for ClassConstantStrategy {
    fn matches(&self, _context: &ContextStack, node: Node<'_>) -> bool {
        matches!(node, Node::ClassConstant(_))
    }

    fn create(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        registry: &StrategyRegistry,
    ) -> ReflectionResult<Option<Element>> {
        let Node::ClassConstant(group) = node else {
            return Ok(None);
        };
        for declarator in &group.constants {
            let fqsen = declarator.fqsen.clone().ok_or(ReflectionError::MissingIdentifier {
                kind: NodeKind::ClassConstant,
            })?;
            let types = context.type_context();
            let mut constant = Constant::new(fqsen, declarator.location);
            constant.docblock = self.services.docblock_or(&declarator.docs, &group.docs, types);
            constant.visibility = Some(visibility(&group.modifiers));
            constant.is_final = group.modifiers.is_final;
            constant.ty = resolve_type(group.type_hint.as_ref(), types)?;
            constant.value = Some(self.services.value(&declarator.value));

            attach(context, node, registry, &self.reducers, Element::Constant(constant))?;
        }
        Ok(None)
    }
}

#[derive(Debug, Clone)]
pub struct EnumCaseStrategy {
    services: Services,
    reducers: ReducerPipeline,
}

impl EnumCaseStrategy {
    pub fn new(services: Services) -> Self {
        let reducers = ReducerPipeline::new().with(AttributeReducer::new(services.clone()));
        Self { services, reducers }
    }
}

impl Strategy for EnumCaseStrategy {
    fn matches(&self, _context: &ContextStack, node: Node<'_>) -> bool {
        matches!(node, Node::EnumCase(_))
    }

    fn create(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        registry: &StrategyRegistry,
    ) -> ReflectionResult<Option<Element>> {
        let Node::EnumCase(decl) = node else {
            return Ok(None);
        };
        let value = decl.value.as_ref().map(|expr| self.services.value(expr));
        let mut case = EnumCase::new(identifier(node)?, decl.location, value);
        case.docblock = self.services.docblock(&decl.docs, context.type_context());

        attach(context, node, registry, &self.reducers, Element::EnumCase(case))?;
        Ok(None)
    }
}

/// `use A, B;` in a class body.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraitUseStrategy;

impl Strategy for TraitUseStrategy {
    fn matches(&self, _context: &ContextStack, node: Node<'_>) -> bool {
        matches!(node, Node::TraitUse(_))
    }

    fn create(
        &self,
        context: &mut ContextStack,
        node: Node<'_>,
        _registry: &StrategyRegistry,
    ) -> ReflectionResult<Option<Element>> {
        let Node::TraitUse(clause) = node else {
            return Ok(None);
        };
        for name in &clause.traits {
            let used = context.type_context().resolve_class(name)?;
            context.parent_mut(NodeKind::TraitUse)?.add_used_trait(used)?;
        }
        Ok(None)
    }
}
