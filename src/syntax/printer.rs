//! Rendering expressions back to source text.
//!
//! Used for default values, constant values and attribute arguments. String
//! literals are always rendered from their raw source spelling so that
//! documentation shows exactly what the author wrote.

use super::ast::ClassDecl;
use super::expr::{Arg, ArrayItem, BinaryOp, Expr, NewClass, UnaryOp, UNARY_PRECEDENCE};

/// Turns an expression node into source text.
pub trait ExpressionPrinter: Send + Sync {
    fn render(&self, expr: &Expr) -> String;
}

/// Default printer producing PHP source close to what was written.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPrinter;

impl ExpressionPrinter for StandardPrinter {
    fn render(&self, expr: &Expr) -> String {
        let mut out = String::new();
        write_expr(&mut out, expr);
        out
    }
}

fn write_expr(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Null => out.push_str("null"),
        Expr::Bool(true) => out.push_str("true"),
        Expr::Bool(false) => out.push_str("false"),
        Expr::Int(value) => out.push_str(&value.to_string()),
        Expr::Float(value) => out.push_str(&format_float(*value)),
        Expr::String { raw, .. } => out.push_str(raw),
        Expr::Array { items, short } => {
            out.push_str(if *short { "[" } else { "array(" });
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                write_array_item(out, item);
            }
            out.push_str(if *short { "]" } else { ")" });
        }
        Expr::ConstFetch(name) => out.push_str(name.as_str()),
        Expr::ClassConstFetch { class, constant } => {
            out.push_str(class.as_str());
            out.push_str("::");
            out.push_str(constant);
        }
        Expr::Variable(name) => {
            out.push('$');
            out.push_str(name);
        }
        Expr::Call { name, args } => {
            out.push_str(name.as_str());
            write_args(out, args);
        }
        Expr::New { class, args } => {
            out.push_str("new ");
            match class {
                NewClass::Named(name) => {
                    out.push_str(name.as_str());
                    write_args(out, args);
                }
                NewClass::Anonymous(decl) => {
                    out.push_str("class");
                    if !args.is_empty() {
                        write_args(out, args);
                    }
                    write_anonymous_header(out, decl);
                    out.push_str(" { ... }");
                }
            }
        }
        Expr::Unary { op, expr } => {
            out.push_str(op.as_str());
            write_grouped(out, expr, unary_operand_needs_parens(*op, expr));
        }
        Expr::Binary { op, left, right } => {
            write_grouped(out, left, binary_operand_needs_parens(*op, left, true));
            out.push(' ');
            out.push_str(op.as_str());
            out.push(' ');
            write_grouped(out, right, binary_operand_needs_parens(*op, right, false));
        }
        Expr::Raw(text) => out.push_str(text),
    }
}

fn write_grouped(out: &mut String, expr: &Expr, parens: bool) {
    if parens {
        out.push('(');
        write_expr(out, expr);
        out.push(')');
    } else {
        write_expr(out, expr);
    }
}

fn is_negative_literal(expr: &Expr) -> bool {
    match expr {
        Expr::Int(value) => *value < 0,
        Expr::Float(value) => value.is_sign_negative(),
        _ => false,
    }
}

fn unary_operand_needs_parens(op: UnaryOp, operand: &Expr) -> bool {
    match operand {
        Expr::Binary { op: inner, .. } => inner.precedence() < UNARY_PRECEDENCE,
        Expr::Unary { op: inner, .. } => op.is_sign() && inner.is_sign(),
        literal => op.is_sign() && is_negative_literal(literal),
    }
}

/// Parentheses the parser must have seen for `operand` to end up under `op`.
fn binary_operand_needs_parens(op: BinaryOp, operand: &Expr, is_left: bool) -> bool {
    match operand {
        Expr::Binary { op: inner, .. } => {
            let (outer, inner) = (op.precedence(), inner.precedence());
            inner < outer || (inner == outer && is_left == op.is_right_associative())
        }
        // `-2 ** 2` is `-(2 ** 2)`.
        Expr::Unary { .. } => is_left && op == BinaryOp::Pow,
        literal => is_left && op == BinaryOp::Pow && is_negative_literal(literal),
    }
}

fn write_array_item(out: &mut String, item: &ArrayItem) {
    if item.unpack {
        out.push_str("...");
    }
    if let Some(key) = &item.key {
        write_expr(out, key);
        out.push_str(" => ");
    }
    if item.by_ref {
        out.push('&');
    }
    write_expr(out, &item.value);
}

fn write_args(out: &mut String, args: &[Arg]) {
    out.push('(');
    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        if let Some(name) = &arg.name {
            out.push_str(name);
            out.push_str(": ");
        }
        if arg.unpack {
            out.push_str("...");
        }
        write_expr(out, &arg.value);
    }
    out.push(')');
}

fn write_anonymous_header(out: &mut String, decl: &ClassDecl) {
    if let Some(parent) = &decl.extends {
        out.push_str(" extends ");
        out.push_str(parent.as_str());
    }
    if !decl.implements.is_empty() {
        out.push_str(" implements ");
        let names: Vec<&str> = decl.implements.iter().map(|n| n.as_str()).collect();
        out.push_str(&names.join(", "));
    }
}

/// PHP prints whole floats with a trailing `.0`.
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
