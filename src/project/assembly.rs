//! Multi-file assembly into a [`Project`].

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::base::{ReflectionError, ReflectionResult};
use crate::context::ContextStack;
use crate::factory::{MiddlewareCatalog, MiddlewareChain, Services, StrategyRegistry};
use crate::model::{DocBlockFactory, Element, File, Namespace};
use crate::resolve::resolve_names;
use crate::syntax::{ExpressionPrinter, Node, SourceFile};

use super::options::AssemblyOptions;

/// A file that could not be assembled.
#[derive(Debug)]
pub struct FileError {
    pub path: String,
    pub error: ReflectionError,
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.error)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FileError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("FileError", 2)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("error", &self.error.to_string())?;
        state.end()
    }
}

/// The assembled model of a set of files.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Project {
    pub name: String,
    /// Files by path, in input order.
    pub files: IndexMap<String, File>,
    /// Namespaces merged across all files.
    pub namespaces: IndexMap<String, Namespace>,
    /// Files that failed, in input order.
    pub errors: Vec<FileError>,
}

impl Project {
    pub fn file(&self, path: &str) -> Option<&File> {
        self.files.get(path)
    }

    pub fn namespace(&self, fqsen: &str) -> Option<&Namespace> {
        self.namespaces.get(fqsen)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Builds [`Project`]s with a frozen strategy registry.
#[derive(Clone)]
pub struct ProjectFactory {
    registry: Arc<StrategyRegistry>,
    parallel: bool,
}

impl fmt::Debug for ProjectFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectFactory")
            .field("strategies", &self.registry.len())
            .field("parallel", &self.parallel)
            .finish()
    }
}

impl ProjectFactory {
    /// A factory with the built-in strategies and collaborators.
    ///
    /// Fails if `options` names a middleware the default catalog lacks.
    pub fn new(options: &AssemblyOptions) -> ReflectionResult<Self> {
        let registry =
            Self::default_registry(options, &MiddlewareCatalog::default(), Services::default())?;
        Ok(Self::from_registry(registry, options))
    }

    /// The built-in registry, with middlewares looked up in `catalog`.
    /// Add plugin strategies to it before handing it to
    /// [`from_registry`](Self::from_registry).
    pub fn default_registry(
        options: &AssemblyOptions,
        catalog: &MiddlewareCatalog,
        services: Services,
    ) -> ReflectionResult<StrategyRegistry> {
        let chain = MiddlewareChain::from_names(&options.middlewares, catalog)?;
        let services = services.with_constant_evaluation(options.evaluate_constants);
        Ok(StrategyRegistry::with_defaults(&services, &chain))
    }

    /// Built-in strategies with custom docblock and printer collaborators.
    pub fn with_collaborators(
        options: &AssemblyOptions,
        docblocks: Arc<dyn DocBlockFactory>,
        printer: Arc<dyn ExpressionPrinter>,
    ) -> ReflectionResult<Self> {
        let registry = Self::default_registry(
            options,
            &MiddlewareCatalog::default(),
            Services::new(docblocks, printer),
        )?;
        Ok(Self::from_registry(registry, options))
    }

    pub fn from_registry(registry: StrategyRegistry, options: &AssemblyOptions) -> Self {
        Self {
            registry: Arc::new(registry),
            parallel: options.parallel,
        }
    }

    /// Assemble every file. A file that fails is reported in
    /// [`Project::errors`] and leaves the others untouched. So is a file
    /// whose path was already assembled earlier in the batch.
    pub fn create(&self, name: &str, files: Vec<SourceFile>) -> Project {
        let results: Vec<(String, ReflectionResult<File>)> = if self.parallel {
            files
                .into_par_iter()
                .map(|file| (file.path.clone(), self.create_file(file)))
                .collect()
        } else {
            files
                .into_iter()
                .map(|file| (file.path.clone(), self.create_file(file)))
                .collect()
        };

        let mut project = Project {
            name: name.to_string(),
            ..Project::default()
        };
        for (path, result) in results {
            match result {
                Ok(_) if project.files.contains_key(&path) => {
                    warn!("[PROJECT] {path}: duplicate path, keeping the first file");
                    let error = ReflectionError::DuplicateFile { path: path.clone() };
                    project.errors.push(FileError { path, error });
                }
                Ok(file) => {
                    for (key, namespace) in &file.namespaces {
                        project
                            .namespaces
                            .entry(key.clone())
                            .or_insert_with(|| Namespace::new(namespace.fqsen.clone()))
                            .merge(namespace);
                    }
                    project.files.insert(path, file);
                }
                Err(error) => {
                    warn!("[PROJECT] {path}: {error}");
                    project.errors.push(FileError { path, error });
                }
            }
        }
        debug!(
            "[PROJECT] {}: {} files, {} namespaces, {} errors",
            project.name,
            project.files.len(),
            project.namespaces.len(),
            project.errors.len()
        );
        project
    }

    /// Resolve names in one file and build its [`File`].
    pub fn create_file(&self, mut source: SourceFile) -> ReflectionResult<File> {
        resolve_names(&mut source)?;
        let mut context = ContextStack::new();
        match self.registry.build(&mut context, Node::File(&source))? {
            Some(Element::File(file)) => Ok(file),
            Some(other) => Err(ReflectionError::UnexpectedParent {
                parent: "project",
                child: other.type_name(),
            }),
            // A plugin vetoed the whole file.
            None => Ok(File::new(source.path.as_str())),
        }
    }
}
