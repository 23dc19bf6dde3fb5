//! Error types for model assembly.

use thiserror::Error;

use crate::syntax::NodeKind;

/// Errors that can occur while assembling the semantic model.
#[derive(Debug, Error)]
pub enum ReflectionError {
    /// An identifier failed its grammar check.
    #[error("Malformed identifier `{value}`: {reason}")]
    MalformedIdentifier { value: String, reason: &'static str },

    /// A reducer or middleware was handed a carry it cannot act on.
    #[error("{stage} cannot act on a carry of type {carrier}")]
    UnsupportedCarrierType {
        stage: &'static str,
        carrier: &'static str,
    },

    /// A middleware chain was configured with something that is not a middleware.
    #[error("Not a middleware: `{value}`")]
    MiddlewareConfiguration { value: String },

    /// An expression could not be statically evaluated.
    #[error("Cannot evaluate constant expression: {expression}")]
    ConstantEvaluation { expression: String },

    /// A declaring node reached a strategy without a resolved identifier.
    #[error("No identifier resolved for {kind}")]
    MissingIdentifier { kind: NodeKind },

    /// A member strategy ran with nothing on the build context stack.
    #[error("No entity under construction for {kind}")]
    NoBuildContext { kind: NodeKind },

    /// The entity on top of the build context cannot hold this child.
    #[error("{parent} cannot hold a {child}")]
    UnexpectedParent {
        parent: &'static str,
        child: &'static str,
    },

    /// A metadata key was registered twice on the same element.
    #[error("Metadata key `{key}` already set on {element}")]
    DuplicateMetadata { key: String, element: String },

    /// Two files of one batch share a path; the first one is kept.
    #[error("Duplicate file path `{path}`")]
    DuplicateFile { path: String },

    /// Any of the above, located at the node that triggered it.
    #[error("{kind} at line {line}: {source}")]
    AtNode {
        kind: NodeKind,
        line: usize,
        #[source]
        source: Box<ReflectionError>,
    },
}

/// Result alias used throughout the assembly pipeline.
pub type ReflectionResult<T> = Result<T, ReflectionError>;

impl ReflectionError {
    /// Create a malformed identifier error.
    pub fn malformed(value: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedIdentifier {
            value: value.into(),
            reason,
        }
    }

    /// Create an unsupported carrier error.
    pub fn unsupported_carrier(stage: &'static str, carrier: &'static str) -> Self {
        Self::UnsupportedCarrierType { stage, carrier }
    }

    /// Create a constant evaluation error.
    pub fn constant_evaluation(expression: impl Into<String>) -> Self {
        Self::ConstantEvaluation {
            expression: expression.into(),
        }
    }

    /// Attach node context, unless the error already carries some.
    pub fn at(self, kind: NodeKind, line: usize) -> Self {
        match self {
            located @ Self::AtNode { .. } => located,
            other => Self::AtNode {
                kind,
                line,
                source: Box::new(other),
            },
        }
    }

    /// The error with any node context stripped.
    pub fn root(&self) -> &ReflectionError {
        match self {
            Self::AtNode { source, .. } => source.root(),
            other => other,
        }
    }
}
