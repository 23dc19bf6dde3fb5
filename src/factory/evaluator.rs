//! Static evaluation of constant expressions.
//!
//! Covers literals, arrays and the arithmetic, bitwise, logical and
//! concatenation operators over them. Anything that needs runtime state
//! (constants, calls, variables, `new`) is a
//! [`ReflectionError::ConstantEvaluation`].

use crate::base::{ReflectionError, ReflectionResult};
use crate::syntax::{BinaryOp, Expr, ExpressionPrinter, StandardPrinter, UnaryOp};

/// A statically known PHP value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// `raw` keeps the source spelling of a literal that was not computed.
    String { value: String, raw: Option<String> },
    Array(Vec<(Option<ConstantValue>, ConstantValue)>),
}

impl ConstantValue {
    fn string(value: String) -> Self {
        Self::String { value, raw: None }
    }

    fn truthy(&self) -> bool {
        match self {
            ConstantValue::Null => false,
            ConstantValue::Bool(b) => *b,
            ConstantValue::Int(i) => *i != 0,
            ConstantValue::Float(f) => *f != 0.0,
            ConstantValue::String { value, .. } => !value.is_empty() && value != "0",
            ConstantValue::Array(items) => !items.is_empty(),
        }
    }

    /// PHP's string conversion, for concatenation.
    fn to_php_string(&self) -> Option<String> {
        match self {
            ConstantValue::Null | ConstantValue::Bool(false) => Some(String::new()),
            ConstantValue::Bool(true) => Some("1".to_string()),
            ConstantValue::Int(i) => Some(i.to_string()),
            ConstantValue::Float(f) => Some(php_float_string(*f)),
            ConstantValue::String { value, .. } => Some(value.clone()),
            ConstantValue::Array(_) => None,
        }
    }

    /// Render as a PHP literal.
    pub fn to_source(&self) -> String {
        match self {
            ConstantValue::String {
                raw: Some(raw), ..
            } => raw.clone(),
            ConstantValue::String { value, raw: None } => {
                StandardPrinter.render(&Expr::string(value))
            }
            ConstantValue::Null => "null".to_string(),
            ConstantValue::Bool(b) => b.to_string(),
            ConstantValue::Int(i) => i.to_string(),
            ConstantValue::Float(f) => StandardPrinter.render(&Expr::Float(*f)),
            ConstantValue::Array(items) => {
                let items: Vec<String> = items
                    .iter()
                    .map(|(key, value)| match key {
                        Some(key) => format!("{} => {}", key.to_source(), value.to_source()),
                        None => value.to_source(),
                    })
                    .collect();
                format!("[{}]", items.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantEvaluator;

impl ConstantEvaluator {
    pub fn evaluate(&self, expr: &Expr) -> ReflectionResult<ConstantValue> {
        match expr {
            Expr::Null => Ok(ConstantValue::Null),
            Expr::Bool(b) => Ok(ConstantValue::Bool(*b)),
            Expr::Int(i) => Ok(ConstantValue::Int(*i)),
            Expr::Float(f) => Ok(ConstantValue::Float(*f)),
            Expr::String { raw, value } => Ok(ConstantValue::String {
                value: value.clone(),
                raw: Some(raw.clone()),
            }),
            Expr::ConstFetch(name) => {
                match name.as_str().trim_start_matches('\\').to_ascii_lowercase().as_str() {
                    "null" => Ok(ConstantValue::Null),
                    "true" => Ok(ConstantValue::Bool(true)),
                    "false" => Ok(ConstantValue::Bool(false)),
                    _ => Err(unevaluable(expr)),
                }
            }
            Expr::Array { items, .. } => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    if item.by_ref || item.unpack {
                        return Err(unevaluable(expr));
                    }
                    let key = item.key.as_ref().map(|k| self.evaluate(k)).transpose()?;
                    values.push((key, self.evaluate(&item.value)?));
                }
                Ok(ConstantValue::Array(values))
            }
            Expr::Unary { op, expr: inner } => {
                let value = self.evaluate(inner)?;
                unary(*op, value).ok_or_else(|| unevaluable(expr))
            }
            Expr::Binary { op, left, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                binary(*op, left, right).ok_or_else(|| unevaluable(expr))
            }
            Expr::ClassConstFetch { .. }
            | Expr::Variable(_)
            | Expr::Call { .. }
            | Expr::New { .. }
            | Expr::Raw(_) => Err(unevaluable(expr)),
        }
    }
}

/// Number of significant digits PHP uses when converting a float to string.
const FLOAT_PRECISION: usize = 14;

/// PHP's float to string conversion: 14 significant digits, trailing zeros
/// dropped, scientific notation outside `1e-4 <= |f| < 1e14`.
fn php_float_string(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{:.*e}", FLOAT_PRECISION - 1, value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let sign = if value < 0.0 { "-" } else { "" };

    if exponent < -4 || exponent >= FLOAT_PRECISION as i32 {
        let (first, rest) = digits.split_at(1);
        let rest = rest.trim_end_matches('0');
        let rest = if rest.is_empty() { "0" } else { rest };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{sign}{first}.{rest}E{exp_sign}{}", exponent.unsigned_abs());
    }

    let (whole, fraction) = if exponent >= 0 {
        let split = exponent as usize + 1;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        let zeros = "0".repeat(exponent.unsigned_abs() as usize - 1);
        ("0".to_string(), format!("{zeros}{digits}"))
    };
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    }
}

fn unevaluable(expr: &Expr) -> ReflectionError {
    ReflectionError::constant_evaluation(StandardPrinter.render(expr))
}

fn unary(op: UnaryOp, value: ConstantValue) -> Option<ConstantValue> {
    match (op, value) {
        (UnaryOp::Not, value) => Some(ConstantValue::Bool(!value.truthy())),
        (UnaryOp::Plus, v @ (ConstantValue::Int(_) | ConstantValue::Float(_))) => Some(v),
        (UnaryOp::Minus, ConstantValue::Int(i)) => i.checked_neg().map(ConstantValue::Int),
        (UnaryOp::Minus, ConstantValue::Float(f)) => Some(ConstantValue::Float(-f)),
        (UnaryOp::BitNot, ConstantValue::Int(i)) => Some(ConstantValue::Int(!i)),
        _ => None,
    }
}

fn binary(op: BinaryOp, left: ConstantValue, right: ConstantValue) -> Option<ConstantValue> {
    use ConstantValue::{Bool, Float, Int};

    match op {
        BinaryOp::Concat => {
            let mut out = left.to_php_string()?;
            out.push_str(&right.to_php_string()?);
            Some(ConstantValue::string(out))
        }
        BinaryOp::And => Some(Bool(left.truthy() && right.truthy())),
        BinaryOp::Or => Some(Bool(left.truthy() || right.truthy())),
        BinaryOp::Coalesce => Some(if left == ConstantValue::Null { right } else { left }),
        _ => match (left, right) {
            (Int(a), Int(b)) => int_op(op, a, b),
            (Int(a), Float(b)) => float_op(op, a as f64, b),
            (Float(a), Int(b)) => float_op(op, a, b as f64),
            (Float(a), Float(b)) => float_op(op, a, b),
            _ => None,
        },
    }
}

fn int_op(op: BinaryOp, a: i64, b: i64) -> Option<ConstantValue> {
    use ConstantValue::{Float, Int};

    match op {
        BinaryOp::Add => a.checked_add(b).map(Int),
        BinaryOp::Sub => a.checked_sub(b).map(Int),
        BinaryOp::Mul => a.checked_mul(b).map(Int),
        // Integer division only stays an int when exact.
        BinaryOp::Div if b != 0 && a.checked_rem(b) == Some(0) => a.checked_div(b).map(Int),
        BinaryOp::Div if b != 0 => Some(Float(a as f64 / b as f64)),
        BinaryOp::Mod if b != 0 => a.checked_rem(b).map(Int),
        BinaryOp::Pow => u32::try_from(b).ok().and_then(|b| a.checked_pow(b)).map(Int),
        BinaryOp::BitAnd => Some(Int(a & b)),
        BinaryOp::BitOr => Some(Int(a | b)),
        BinaryOp::BitXor => Some(Int(a ^ b)),
        BinaryOp::ShiftLeft => u32::try_from(b).ok().and_then(|b| a.checked_shl(b)).map(Int),
        BinaryOp::ShiftRight => u32::try_from(b).ok().and_then(|b| a.checked_shr(b)).map(Int),
        _ => None,
    }
}

fn float_op(op: BinaryOp, a: f64, b: f64) -> Option<ConstantValue> {
    use ConstantValue::Float;

    match op {
        BinaryOp::Add => Some(Float(a + b)),
        BinaryOp::Sub => Some(Float(a - b)),
        BinaryOp::Mul => Some(Float(a * b)),
        BinaryOp::Div if b != 0.0 => Some(Float(a / b)),
        BinaryOp::Pow => Some(Float(a.powf(b))),
        _ => None,
    }
}
