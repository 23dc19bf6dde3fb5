//! Declared types.
//!
//! [`Type`] is a closed set of variants. Type hints from the syntax tree are
//! resolved against the current [`TypeContext`] so class references become
//! fully-qualified identifiers; docblock type strings go through
//! [`Type::parse`].

use std::fmt;

use crate::base::{Fqsen, ReflectionResult};
use crate::context::TypeContext;
use crate::syntax::TypeHint;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    String,
    Integer,
    Float,
    Boolean,
    False,
    True,
    Array,
    Iterable,
    Callable,
    /// `object` when `None`, otherwise a resolved class reference.
    Object(Option<Fqsen>),
    Nullable(Box<Type>),
    /// `A|B`, member order as written.
    Compound(Vec<Type>),
    /// `A&B`, member order as written.
    Intersection(Vec<Type>),
    Mixed,
    Null,
    Static,
    SelfType,
    Parent,
    Void,
    Never,
}

impl Type {
    /// Resolve a type hint from the syntax tree.
    pub fn from_hint(hint: &TypeHint, context: &TypeContext) -> ReflectionResult<Self> {
        match hint {
            TypeHint::Named(name) => {
                if name.is_unqualified() {
                    if let Some(keyword) = Self::keyword(name.as_str()) {
                        return Ok(keyword);
                    }
                }
                Ok(Type::Object(Some(context.resolve_class(name)?)))
            }
            TypeHint::Nullable(inner) => Ok(Type::Nullable(Box::new(Self::from_hint(
                inner, context,
            )?))),
            TypeHint::Union(members) => Ok(Type::Compound(
                members
                    .iter()
                    .map(|m| Self::from_hint(m, context))
                    .collect::<ReflectionResult<_>>()?,
            )),
            TypeHint::Intersection(members) => Ok(Type::Intersection(
                members
                    .iter()
                    .map(|m| Self::from_hint(m, context))
                    .collect::<ReflectionResult<_>>()?,
            )),
        }
    }

    /// Parse a docblock type expression such as `?Foo`, `int|string`,
    /// `A&B` or `Foo[]`.
    pub fn parse(text: &str, context: &TypeContext) -> ReflectionResult<Self> {
        let text = text.trim();
        let unions = split_top_level(text, '|');
        if unions.len() > 1 {
            return Ok(Type::Compound(
                unions
                    .iter()
                    .map(|part| Self::parse(part, context))
                    .collect::<ReflectionResult<_>>()?,
            ));
        }
        let intersections = split_top_level(text, '&');
        if intersections.len() > 1 {
            return Ok(Type::Intersection(
                intersections
                    .iter()
                    .map(|part| Self::parse(part, context))
                    .collect::<ReflectionResult<_>>()?,
            ));
        }
        if let Some(inner) = text.strip_prefix('?') {
            return Ok(Type::Nullable(Box::new(Self::parse(inner, context)?)));
        }
        if text.ends_with("[]") {
            return Ok(Type::Array);
        }
        // Generic arguments (`array<int, Foo>`) do not change the outer type.
        let base = text.split('<').next().unwrap_or(text).trim();
        if !base.contains('\\') {
            if let Some(keyword) = Self::keyword(base) {
                return Ok(keyword);
            }
        }
        Ok(Type::Object(Some(context.resolve_class_str(base)?)))
    }

    /// Built-in type keywords, matched case-insensitively.
    fn keyword(name: &str) -> Option<Self> {
        let ty = match name.to_ascii_lowercase().as_str() {
            "string" => Type::String,
            "int" | "integer" => Type::Integer,
            "float" | "double" => Type::Float,
            "bool" | "boolean" => Type::Boolean,
            "false" => Type::False,
            "true" => Type::True,
            "array" => Type::Array,
            "iterable" => Type::Iterable,
            "callable" => Type::Callable,
            "object" => Type::Object(None),
            "mixed" => Type::Mixed,
            "null" => Type::Null,
            "static" => Type::Static,
            "self" => Type::SelfType,
            "parent" => Type::Parent,
            "void" => Type::Void,
            "never" => Type::Never,
            _ => return None,
        };
        Some(ty)
    }
}

/// Split on `sep` outside of `<...>` and `(...)`.
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        match c {
            '<' | '(' => depth += 1,
            '>' | ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(text[start..idx].trim());
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::String => f.write_str("string"),
            Type::Integer => f.write_str("int"),
            Type::Float => f.write_str("float"),
            Type::Boolean => f.write_str("bool"),
            Type::False => f.write_str("false"),
            Type::True => f.write_str("true"),
            Type::Array => f.write_str("array"),
            Type::Iterable => f.write_str("iterable"),
            Type::Callable => f.write_str("callable"),
            Type::Object(None) => f.write_str("object"),
            Type::Object(Some(fqsen)) => write!(f, "{fqsen}"),
            Type::Nullable(inner) => write!(f, "?{inner}"),
            Type::Compound(members) => write_joined(f, members, "|"),
            Type::Intersection(members) => write_joined(f, members, "&"),
            Type::Mixed => f.write_str("mixed"),
            Type::Null => f.write_str("null"),
            Type::Static => f.write_str("static"),
            Type::SelfType => f.write_str("self"),
            Type::Parent => f.write_str("parent"),
            Type::Void => f.write_str("void"),
            Type::Never => f.write_str("never"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, members: &[Type], sep: &str) -> fmt::Result {
    for (idx, member) in members.iter().enumerate() {
        if idx > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{member}")?;
    }
    Ok(())
}

#[cfg(feature = "serde")]
impl serde::Serialize for Type {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Name, TypeHint};
    use rstest::rstest;

    fn context() -> TypeContext {
        TypeContext::new("Luigi").with_class_alias("Oven", "\\Kitchen\\Appliances\\Oven")
    }

    #[rstest]
    #[case("string", Type::String)]
    #[case("INT", Type::Integer)]
    #[case("?bool", Type::Nullable(Box::new(Type::Boolean)))]
    #[case("Foo[]", Type::Array)]
    #[case("array<int, Foo>", Type::Array)]
    #[case("never", Type::Never)]
    fn test_parse_keywords(#[case] text: &str, #[case] expected: Type) {
        assert_eq!(Type::parse(text, &context()).unwrap(), expected);
    }

    #[test]
    fn test_parse_resolves_class_names() {
        let ty = Type::parse("Oven|Dough|null", &context()).unwrap();
        assert_eq!(
            ty,
            Type::Compound(vec![
                Type::Object(Some(Fqsen::new("\\Kitchen\\Appliances\\Oven").unwrap())),
                Type::Object(Some(Fqsen::new("\\Luigi\\Dough").unwrap())),
                Type::Null,
            ])
        );
        assert_eq!(ty.to_string(), "\\Kitchen\\Appliances\\Oven|\\Luigi\\Dough|null");
    }

    #[test]
    fn test_from_hint_preserves_union_order() {
        let hint = TypeHint::Union(vec![
            TypeHint::named("int"),
            TypeHint::named("string"),
            TypeHint::Named(Name::new("\\Stringable")),
        ]);
        let ty = Type::from_hint(&hint, &context()).unwrap();
        assert_eq!(ty.to_string(), "int|string|\\Stringable");
    }

    #[test]
    fn test_from_hint_nullable_and_intersection() {
        let nullable = TypeHint::nullable(TypeHint::named("self"));
        assert_eq!(
            Type::from_hint(&nullable, &context()).unwrap(),
            Type::Nullable(Box::new(Type::SelfType))
        );

        let both = TypeHint::Intersection(vec![TypeHint::named("Countable"), TypeHint::named("Oven")]);
        assert_eq!(
            Type::from_hint(&both, &context()).unwrap().to_string(),
            "\\Luigi\\Countable&\\Kitchen\\Appliances\\Oven"
        );
    }

    #[test]
    fn test_qualified_keyword_lookalike_is_a_class() {
        let hint = TypeHint::named("Types\\String");
        assert_eq!(
            Type::from_hint(&hint, &context()).unwrap(),
            Type::Object(Some(Fqsen::new("\\Luigi\\Types\\String").unwrap()))
        );
    }
}
