//! Lexical context - the current namespace and its `use` imports.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{Fqsen, ReflectionResult};
use crate::syntax::{Name, Stmt, UseKind};

/// Namespace name plus the alias maps established by `use` imports.
///
/// A new context replaces the previous one on every namespace block, since
/// namespaces do not nest. Class aliases are matched case-insensitively,
/// like PHP class names; constant aliases are case-sensitive.
///
/// Assembly itself only resolves class names. [`TypeContext::resolve_function`]
/// and [`TypeContext::resolve_constant`] are for consumers that link call
/// sites and constant fetches against the model, with a context built by
/// [`TypeContext::from_statements`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeContext {
    /// Namespace without leading or trailing separators; empty for global.
    namespace: SmolStr,
    class_aliases: FxHashMap<SmolStr, SmolStr>,
    function_aliases: FxHashMap<SmolStr, SmolStr>,
    constant_aliases: FxHashMap<SmolStr, SmolStr>,
}

impl TypeContext {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: SmolStr::new(namespace.trim_matches('\\')),
            ..Self::default()
        }
    }

    pub fn global() -> Self {
        Self::default()
    }

    /// Build the context of a namespace block from its `use` statements.
    pub fn from_statements(namespace: Option<&Name>, statements: &[Stmt]) -> Self {
        let mut context = Self::new(namespace.map(|n| n.as_str()).unwrap_or_default());
        for stmt in statements {
            let Stmt::Use(import) = stmt else {
                continue;
            };
            for item in &import.items {
                context.add_alias(import.kind, item.local_name(), item.name.as_str());
            }
        }
        context
    }

    pub fn with_class_alias(mut self, alias: &str, target: &str) -> Self {
        self.add_alias(UseKind::Class, alias, target);
        self
    }

    pub fn add_alias(&mut self, kind: UseKind, alias: &str, target: &str) {
        let target = SmolStr::new(format!("\\{}", target.trim_start_matches('\\')));
        match kind {
            UseKind::Class => {
                self.class_aliases
                    .insert(SmolStr::new(alias.to_ascii_lowercase()), target);
            }
            UseKind::Function => {
                self.function_aliases
                    .insert(SmolStr::new(alias.to_ascii_lowercase()), target);
            }
            UseKind::Constant => {
                self.constant_aliases.insert(SmolStr::new(alias), target);
            }
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn namespace_fqsen(&self) -> ReflectionResult<Fqsen> {
        if self.namespace.is_empty() {
            Ok(Fqsen::root())
        } else {
            Fqsen::new(&format!("\\{}", self.namespace))
        }
    }

    /// Short name → fully-qualified name for class imports.
    pub fn class_alias(&self, alias: &str) -> Option<&str> {
        self.class_aliases
            .get(alias.to_ascii_lowercase().as_str())
            .map(|s| s.as_str())
    }

    /// Resolve a class-like name as written in source.
    pub fn resolve_class(&self, name: &Name) -> ReflectionResult<Fqsen> {
        self.resolve_class_str(name.as_str())
    }

    pub fn resolve_class_str(&self, name: &str) -> ReflectionResult<Fqsen> {
        if name.starts_with('\\') {
            return Fqsen::new(name);
        }
        if let Some(rest) = strip_relative(name) {
            return self.prefixed(rest);
        }
        let (first, rest) = match name.split_once('\\') {
            Some((first, rest)) => (first, Some(rest)),
            None => (name, None),
        };
        match (self.class_alias(first), rest) {
            (Some(target), Some(rest)) => Fqsen::new(&format!("{target}\\{rest}")),
            (Some(target), None) => Fqsen::new(target),
            (None, _) => self.prefixed(name),
        }
    }

    /// Resolve a function name; imported functions win over the namespace.
    pub fn resolve_function(&self, name: &Name) -> ReflectionResult<Fqsen> {
        let resolved = if name.is_unqualified() {
            match self
                .function_aliases
                .get(name.as_str().to_ascii_lowercase().as_str())
            {
                Some(target) => Fqsen::new(target)?,
                None => self.prefixed(name.as_str())?,
            }
        } else {
            self.resolve_class(name)?
        };
        Fqsen::new(&format!("{resolved}()"))
    }

    /// Resolve a constant name; imported constants win over the namespace.
    pub fn resolve_constant(&self, name: &Name) -> ReflectionResult<Fqsen> {
        if name.is_unqualified() {
            if let Some(target) = self.constant_aliases.get(name.as_str()) {
                return Fqsen::new(target);
            }
            return self.prefixed(name.as_str());
        }
        self.resolve_class(name)
    }

    fn prefixed(&self, name: &str) -> ReflectionResult<Fqsen> {
        if self.namespace.is_empty() {
            Fqsen::new(&format!("\\{name}"))
        } else {
            Fqsen::new(&format!("\\{}\\{name}", self.namespace))
        }
    }
}

fn strip_relative(name: &str) -> Option<&str> {
    let prefix = name.get(..10)?;
    if prefix.eq_ignore_ascii_case("namespace\\") {
        Some(&name[10..])
    } else {
        None
    }
}
