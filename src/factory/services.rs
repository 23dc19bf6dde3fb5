//! Collaborators shared by every strategy and reducer.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::base::ReflectionResult;
use crate::context::TypeContext;
use crate::model::{Attribute, CallArgument, DocBlock, DocBlockFactory, StandardDocBlockFactory};
use crate::syntax::{AttributeGroup, Comment, Expr, ExpressionPrinter, StandardPrinter, doc_comment};

use super::evaluator::ConstantEvaluator;

/// Docblock parser, expression printer and the constant evaluation switch.
#[derive(Clone)]
pub struct Services {
    docblocks: Arc<dyn DocBlockFactory>,
    printer: Arc<dyn ExpressionPrinter>,
    evaluate_constants: bool,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            docblocks: Arc::new(StandardDocBlockFactory),
            printer: Arc::new(StandardPrinter),
            evaluate_constants: true,
        }
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("evaluate_constants", &self.evaluate_constants)
            .finish_non_exhaustive()
    }
}

impl Services {
    pub fn new(docblocks: Arc<dyn DocBlockFactory>, printer: Arc<dyn ExpressionPrinter>) -> Self {
        Self {
            docblocks,
            printer,
            evaluate_constants: true,
        }
    }

    pub fn with_constant_evaluation(mut self, enabled: bool) -> Self {
        self.evaluate_constants = enabled;
        self
    }

    /// Parse the documentation comment closest to a node.
    pub fn docblock(&self, comments: &[Comment], context: &TypeContext) -> Option<DocBlock> {
        doc_comment(comments).map(|comment| self.docblocks.create(&comment.text, context))
    }

    /// Parse the first of `own`, falling back to `shared` when `own` has none.
    pub fn docblock_or(
        &self,
        own: &[Comment],
        shared: &[Comment],
        context: &TypeContext,
    ) -> Option<DocBlock> {
        self.docblock(own, context)
            .or_else(|| self.docblock(shared, context))
    }

    pub fn parse_docblock(&self, text: &str, context: &TypeContext) -> DocBlock {
        self.docblocks.create(text, context)
    }

    /// Source text of an expression.
    pub fn render(&self, expr: &Expr) -> String {
        self.printer.render(expr)
    }

    /// Source text of a constant value: evaluated when possible, otherwise
    /// as written.
    pub fn value(&self, expr: &Expr) -> String {
        if !self.evaluate_constants || matches!(expr, Expr::String { .. }) {
            return self.render(expr);
        }
        match ConstantEvaluator.evaluate(expr) {
            Ok(value) => value.to_source(),
            Err(err) => {
                debug!("[EVAL] {err}; keeping source text");
                self.render(expr)
            }
        }
    }

    /// Resolve the attributes of a node's attribute groups.
    pub fn attributes(
        &self,
        groups: &[AttributeGroup],
        context: &TypeContext,
    ) -> ReflectionResult<Vec<Attribute>> {
        let mut attributes = Vec::new();
        for attribute in groups.iter().flat_map(|group| &group.attributes) {
            attributes.push(Attribute {
                fqsen: context.resolve_class(&attribute.name)?,
                arguments: attribute
                    .args
                    .iter()
                    .map(|arg| CallArgument {
                        name: arg.name.clone(),
                        value: if arg.unpack {
                            format!("...{}", self.render(&arg.value))
                        } else {
                            self.value(&arg.value)
                        },
                    })
                    .collect(),
            });
        }
        Ok(attributes)
    }
}
