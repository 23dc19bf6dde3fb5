//! Depth-first identifier assignment over the syntax tree.

use tracing::trace;

use crate::base::{Fqsen, ReflectionResult};
use crate::syntax::{
    Arg, ClassDecl, ClassMember, Expr, ExpressionStmt, NewClass, NodeKind, SourceFile, Stmt,
};

use super::segments::NameStack;

/// Assign an identifier to every declaring node of a file.
///
/// Running this twice over the same tree yields identical identifiers.
pub fn resolve_names(file: &mut SourceFile) -> ReflectionResult<()> {
    let mut walker = NameWalker::new();
    walker.walk_statements(&mut file.statements)
}

pub(super) struct NameWalker {
    pub(super) names: NameStack,
}

impl NameWalker {
    pub fn new() -> Self {
        Self {
            names: NameStack::new(),
        }
    }

    pub fn walk_statements(&mut self, statements: &mut [Stmt]) -> ReflectionResult<()> {
        for stmt in statements {
            self.walk_stmt(stmt)?;
        }
        Ok(())
    }

    fn walk_stmt(&mut self, stmt: &mut Stmt) -> ReflectionResult<()> {
        match stmt {
            Stmt::Namespace(ns) => {
                self.names
                    .reset_namespace(ns.name.as_ref().map(|n| n.as_str()));
                let result = self.walk_statements(&mut ns.statements);
                self.names.reset_namespace(None);
                result
            }
            Stmt::Class(class) => self.walk_class(class),
            Stmt::Interface(interface) => {
                let depth = self.names.depth();
                self.names.push_root(interface.name.as_str());
                let line = interface.location.start_line;
                let result = self
                    .assign(&mut interface.fqsen, NodeKind::Interface, line)
                    .and_then(|_| self.walk_members(&mut interface.members));
                self.names.truncate(depth);
                result
            }
            Stmt::Trait(decl) => {
                let depth = self.names.depth();
                self.names.push_root(decl.name.as_str());
                let line = decl.location.start_line;
                let result = self
                    .assign(&mut decl.fqsen, NodeKind::Trait, line)
                    .and_then(|_| self.walk_members(&mut decl.members));
                self.names.truncate(depth);
                result
            }
            Stmt::Enum(decl) => {
                let depth = self.names.depth();
                self.names.push_root(decl.name.as_str());
                let line = decl.location.start_line;
                let result = self
                    .assign(&mut decl.fqsen, NodeKind::Enum, line)
                    .and_then(|_| self.walk_members(&mut decl.members));
                self.names.truncate(depth);
                result
            }
            Stmt::Function(function) => {
                let depth = self.names.depth();
                self.names.push_root(format!("{}()", function.name));
                let line = function.location.start_line;
                let result = self
                    .assign(&mut function.fqsen, NodeKind::Function, line)
                    .and_then(|_| self.walk_statements(&mut function.body));
                self.names.truncate(depth);
                result
            }
            Stmt::Const(group) => {
                for constant in &mut group.constants {
                    let depth = self.names.depth();
                    self.names.push_root(constant.name.as_str());
                    let line = constant.location.start_line;
                    let result = self.assign(&mut constant.fqsen, NodeKind::Const, line);
                    self.names.truncate(depth);
                    result?;
                }
                Ok(())
            }
            Stmt::Expression(expr) => {
                assign_define(expr)?;
                self.walk_expr(&mut expr.expr)
            }
            Stmt::If(block) => {
                self.walk_expr(&mut block.condition)?;
                self.walk_statements(&mut block.then_branch)?;
                match &mut block.otherwise {
                    Some(otherwise) => self.walk_statements(otherwise),
                    None => Ok(()),
                }
            }
            Stmt::Use(_) | Stmt::Other(_) => Ok(()),
        }
    }

    /// Anonymous classes push nothing and are not descended into.
    pub(super) fn walk_class(&mut self, class: &mut ClassDecl) -> ReflectionResult<()> {
        let Some(name) = class.name.as_deref() else {
            trace!(
                "[NAMES] skipping anonymous class at line {}",
                class.location.start_line
            );
            return Ok(());
        };
        let depth = self.names.depth();
        self.names.push_root(name);
        let line = class.location.start_line;
        let result = self
            .assign(&mut class.fqsen, NodeKind::Class, line)
            .and_then(|_| self.walk_members(&mut class.members));
        self.names.truncate(depth);
        result
    }

    fn walk_members(&mut self, members: &mut [ClassMember]) -> ReflectionResult<()> {
        for member in members {
            let depth = self.names.depth();
            let result = match member {
                ClassMember::Method(method) => {
                    self.names.push(format!("::{}()", method.name));
                    let line = method.location.start_line;
                    self.assign(&mut method.fqsen, NodeKind::Method, line)
                        .and_then(|_| match &mut method.body {
                            Some(body) => self.walk_statements(body),
                            None => Ok(()),
                        })
                }
                ClassMember::Property(group) => {
                    group.properties.iter_mut().try_for_each(|property| {
                        self.names.push(format!("::${}", property.name));
                        let line = property.location.start_line;
                        let result = self.assign(&mut property.fqsen, NodeKind::Property, line);
                        self.names.truncate(depth);
                        result
                    })
                }
                ClassMember::Constant(group) => {
                    self.names.push("::");
                    group.constants.iter_mut().try_for_each(|constant| {
                        self.names.push(constant.name.as_str());
                        let line = constant.location.start_line;
                        let result =
                            self.assign(&mut constant.fqsen, NodeKind::ClassConstant, line);
                        self.names.truncate(depth + 1);
                        result
                    })
                }
                ClassMember::EnumCase(case) => {
                    self.names.push(format!("::{}", case.name));
                    let line = case.location.start_line;
                    self.assign(&mut case.fqsen, NodeKind::EnumCase, line)
                }
                ClassMember::TraitUse(_) => Ok(()),
            };
            self.names.truncate(depth);
            result?;
        }
        Ok(())
    }

    fn walk_expr(&mut self, expr: &mut Expr) -> ReflectionResult<()> {
        match expr {
            Expr::New { class, args } => {
                if let NewClass::Anonymous(decl) = class {
                    self.walk_class(decl)?;
                }
                self.walk_args(args)
            }
            Expr::Call { args, .. } => self.walk_args(args),
            Expr::Array { items, .. } => items.iter_mut().try_for_each(|item| {
                if let Some(key) = &mut item.key {
                    self.walk_expr(key)?;
                }
                self.walk_expr(&mut item.value)
            }),
            Expr::Unary { expr, .. } => self.walk_expr(expr),
            Expr::Binary { left, right, .. } => {
                self.walk_expr(left)?;
                self.walk_expr(right)
            }
            _ => Ok(()),
        }
    }

    fn walk_args(&mut self, args: &mut [Arg]) -> ReflectionResult<()> {
        args.iter_mut()
            .try_for_each(|arg| self.walk_expr(&mut arg.value))
    }

    /// Failures are located at the declaring node.
    fn assign(
        &self,
        slot: &mut Option<Fqsen>,
        kind: NodeKind,
        line: usize,
    ) -> ReflectionResult<()> {
        let fqsen = self.names.fqsen().map_err(|err| err.at(kind, line))?;
        trace!("[NAMES] {}", fqsen);
        *slot = Some(fqsen);
        Ok(())
    }
}

/// `define('NAME', value)` declares a constant in the global namespace
/// unless the name itself is qualified.
fn assign_define(stmt: &mut ExpressionStmt) -> ReflectionResult<()> {
    let Some(name) = define_name(&stmt.expr) else {
        return Ok(());
    };
    let fqsen = Fqsen::new(&format!("\\{}", name.trim_start_matches('\\')))
        .map_err(|err| err.at(NodeKind::Expression, stmt.location.start_line))?;
    trace!("[NAMES] {} (define)", fqsen);
    stmt.fqsen = Some(fqsen);
    Ok(())
}

/// The constant name of a `define()` call with a literal first argument.
pub(crate) fn define_name(expr: &Expr) -> Option<&str> {
    let Expr::Call { name, args } = expr else {
        return None;
    };
    let callee = name.as_str().trim_start_matches('\\');
    if !callee.eq_ignore_ascii_case("define") {
        return None;
    }
    match args.first().map(|arg| &arg.value) {
        Some(Expr::String { value, .. }) => Some(value.as_str()),
        _ => None,
    }
}
