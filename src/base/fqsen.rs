//! Fully qualified structural element names.
//!
//! An [`Fqsen`] is the unique key for a declaration: `\Ns\Name`,
//! `\Ns\Name::$prop`, `\Ns\Name::method()`, `\Ns\Name::CONST` or
//! `\Ns\func()`. The root namespace is the bare `\`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use smol_str::SmolStr;

use super::error::{ReflectionError, ReflectionResult};

const MEMBER_SEPARATOR: &str = "::";

/// Immutable, case-sensitive identifier of a structural element.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fqsen {
    fqsen: Arc<str>,
    name: SmolStr,
}

impl Fqsen {
    /// Parse and validate an identifier.
    pub fn new(fqsen: &str) -> ReflectionResult<Self> {
        let name = validate(fqsen)?;
        Ok(Self {
            fqsen: Arc::from(fqsen),
            name,
        })
    }

    /// The root namespace `\`.
    pub fn root() -> Self {
        Self {
            fqsen: Arc::from("\\"),
            name: SmolStr::default(),
        }
    }

    /// Build the identifier of a member of this element, e.g. `$name` or `run()`.
    pub fn member(&self, member: &str) -> ReflectionResult<Self> {
        Self::new(&format!("{}{MEMBER_SEPARATOR}{member}", self.fqsen))
    }

    pub fn as_str(&self) -> &str {
        &self.fqsen
    }

    /// The short name: last namespace segment, or the member name without
    /// its `$` prefix or `()` suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_root(&self) -> bool {
        &*self.fqsen == "\\"
    }

    /// Whether this identifies a class member (`::` form).
    pub fn is_member(&self) -> bool {
        self.fqsen.contains(MEMBER_SEPARATOR)
    }

    /// The identifier of the enclosing namespace, or of the owning
    /// class-like for members.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        if let Some((owner, _)) = self.fqsen.split_once(MEMBER_SEPARATOR) {
            return Self::new(owner).ok();
        }
        match self.fqsen.rfind('\\') {
            Some(0) => Some(Self::root()),
            Some(idx) => Self::new(&self.fqsen[..idx]).ok(),
            None => None,
        }
    }
}

impl fmt::Display for Fqsen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fqsen)
    }
}

impl fmt::Debug for Fqsen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fqsen({})", self.fqsen)
    }
}

impl FromStr for Fqsen {
    type Err = ReflectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Fqsen {
    fn as_ref(&self) -> &str {
        &self.fqsen
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fqsen {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.fqsen)
    }
}

/// Check the identifier grammar, returning the short name on success.
fn validate(fqsen: &str) -> ReflectionResult<SmolStr> {
    let Some(rest) = fqsen.strip_prefix('\\') else {
        return Err(ReflectionError::malformed(fqsen, "must begin with `\\`"));
    };
    if rest.is_empty() {
        return Ok(SmolStr::default());
    }

    let (path, member) = match rest.split_once(MEMBER_SEPARATOR) {
        Some((path, member)) => (path, Some(member)),
        None => (rest, None),
    };

    if member.is_some() && path.is_empty() {
        return Err(ReflectionError::malformed(
            fqsen,
            "`::` must follow a class-like name",
        ));
    }

    let segments: Vec<&str> = path.split('\\').collect();
    let last = segments.len() - 1;
    let mut short_name = "";
    for (idx, segment) in segments.iter().enumerate() {
        let segment = match segment.strip_suffix("()") {
            Some(function) if idx == last && member.is_none() => function,
            Some(_) => {
                return Err(ReflectionError::malformed(
                    fqsen,
                    "`()` is only valid on the final name",
                ));
            }
            None => segment,
        };
        if !is_identifier(segment) {
            return Err(ReflectionError::malformed(fqsen, "invalid namespace segment"));
        }
        short_name = segment;
    }

    let Some(member) = member else {
        return Ok(SmolStr::new(short_name));
    };

    let member_name = if let Some(property) = member.strip_prefix('$') {
        property
    } else if let Some(method) = member.strip_suffix("()") {
        method
    } else {
        member
    };
    if !is_identifier(member_name) {
        return Err(ReflectionError::malformed(fqsen, "invalid member name"));
    }
    Ok(SmolStr::new(member_name))
}

/// PHP label: a letter or underscore, then letters, digits or underscores.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || unicode_ident::is_xid_start(c) => {}
        _ => return false,
    }
    chars.all(unicode_ident::is_xid_continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("\\", "")]
    #[case("\\Pizza", "Pizza")]
    #[case("\\Luigi\\Pizza", "Pizza")]
    #[case("\\Luigi\\Pizza::DELIVERY", "DELIVERY")]
    #[case("\\Luigi\\Pizza::$size", "size")]
    #[case("\\Luigi\\Pizza::bake()", "bake")]
    #[case("\\Luigi\\order()", "order")]
    #[case("\\_private\\Émile", "Émile")]
    fn test_valid_fqsen_short_name(#[case] input: &str, #[case] name: &str) {
        let fqsen = Fqsen::new(input).unwrap();
        assert_eq!(fqsen.as_str(), input);
        assert_eq!(fqsen.name(), name);
    }

    #[rstest]
    #[case("Pizza")]
    #[case("\\Luigi\\")]
    #[case("\\Luigi\\\\Pizza")]
    #[case("\\::DELIVERY")]
    #[case("\\Pizza::")]
    #[case("\\Pizza::$")]
    #[case("\\1Pizza")]
    #[case("\\order()\\Pizza")]
    #[case("\\Pizza::bake()::x")]
    fn test_malformed_fqsen(#[case] input: &str) {
        let err = Fqsen::new(input).unwrap_err();
        assert!(matches!(err, ReflectionError::MalformedIdentifier { .. }));
    }

    #[test]
    fn test_member_and_parent() {
        let class = Fqsen::new("\\Luigi\\Pizza").unwrap();
        let prop = class.member("$name").unwrap();
        assert_eq!(prop.as_str(), "\\Luigi\\Pizza::$name");
        assert!(prop.is_member());
        assert_eq!(prop.parent(), Some(class.clone()));
        assert_eq!(class.parent().unwrap().as_str(), "\\Luigi");
        assert_eq!(Fqsen::new("\\Pizza").unwrap().parent(), Some(Fqsen::root()));
        assert_eq!(Fqsen::root().parent(), None);
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        assert_ne!(Fqsen::new("\\Pizza").unwrap(), Fqsen::new("\\pizza").unwrap());
    }
}
