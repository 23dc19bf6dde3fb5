//! Expression nodes.
//!
//! Only the shapes the model cares about are spelled out; anything else the
//! parser adapter hands over as [`Expr::Raw`] with its source text.

use smol_str::SmolStr;

use super::ast::{ClassDecl, Name};

#[derive(Debug, Clone, Default)]
pub enum Expr {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// A string literal. `raw` is the exact source text including quotes,
    /// `value` the unescaped contents.
    String { raw: String, value: String },
    Array { items: Vec<ArrayItem>, short: bool },
    /// `FOO`, `\Ns\FOO`
    ConstFetch(Name),
    /// `Foo::BAR`, `Foo::class`
    ClassConstFetch { class: Name, constant: SmolStr },
    /// `$name`, without the `$`.
    Variable(SmolStr),
    /// `foo(...)`
    Call { name: Name, args: Vec<Arg> },
    /// `new Foo(...)` or `new class(...) { ... }`
    New { class: NewClass, args: Vec<Arg> },
    Unary { op: UnaryOp, expr: Box<Expr> },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Source text of an expression with no dedicated node.
    Raw(String),
}

impl Expr {
    /// A single-quoted string literal.
    pub fn string(value: &str) -> Self {
        Self::String {
            raw: format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'")),
            value: value.to_string(),
        }
    }

    /// A string literal with its exact source spelling.
    pub fn string_raw(raw: &str, value: &str) -> Self {
        Self::String {
            raw: raw.to_string(),
            value: value.to_string(),
        }
    }

    pub fn call(name: &str, args: Vec<Expr>) -> Self {
        Self::Call {
            name: Name::new(name),
            args: args.into_iter().map(Arg::positional).collect(),
        }
    }

    pub fn new_anonymous(class: ClassDecl) -> Self {
        Self::New {
            class: NewClass::Anonymous(Box::new(class)),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum NewClass {
    Named(Name),
    Anonymous(Box<ClassDecl>),
}

#[derive(Debug, Clone, Default)]
pub struct ArrayItem {
    pub key: Option<Expr>,
    pub value: Expr,
    pub by_ref: bool,
    pub unpack: bool,
}

impl ArrayItem {
    pub fn value(value: Expr) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn keyed(key: Expr, value: Expr) -> Self {
        Self {
            key: Some(key),
            value,
            ..Self::default()
        }
    }
}

/// A call argument: `expr`, `name: expr` or `...expr`.
#[derive(Debug, Clone, Default)]
pub struct Arg {
    pub name: Option<SmolStr>,
    pub value: Expr,
    pub unpack: bool,
}

impl Arg {
    pub fn positional(value: Expr) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn named(name: &str, value: Expr) -> Self {
        Self {
            name: Some(name.into()),
            value,
            unpack: false,
        }
    }
}

/// Binding strength of every [`UnaryOp`].
pub const UNARY_PRECEDENCE: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    BitNot,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "!",
            Self::BitNot => "~",
        }
    }

    /// `+` and `-`, which read as `++`/`--` when doubled.
    pub fn is_sign(self) -> bool {
        matches!(self, Self::Plus | Self::Minus)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Concat,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    And,
    Or,
    Coalesce,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::Concat => ".",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::And => "&&",
            Self::Or => "||",
            Self::Coalesce => "??",
        }
    }

    /// Binding strength, higher binds tighter. Unary operators sit between
    /// `**` and `*`, see [`UNARY_PRECEDENCE`].
    pub fn precedence(self) -> u8 {
        match self {
            Self::Pow => 11,
            Self::Mul | Self::Div | Self::Mod => 9,
            Self::Add | Self::Sub => 8,
            Self::ShiftLeft | Self::ShiftRight => 7,
            Self::Concat => 6,
            Self::BitAnd => 5,
            Self::BitXor => 4,
            Self::BitOr => 3,
            Self::And => 2,
            Self::Or => 1,
            Self::Coalesce => 0,
        }
    }

    pub fn is_right_associative(self) -> bool {
        matches!(self, Self::Pow | Self::Coalesce)
    }
}
