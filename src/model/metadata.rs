//! Open-ended metadata attached to elements by extensions.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{ReflectionError, ReflectionResult};

/// A piece of extension data stored under a unique key.
pub trait Metadata: fmt::Debug + Send + Sync + 'static {
    fn key(&self) -> &str;
}

trait StoredMetadata: fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Metadata> StoredMetadata for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Key → metadata map; each key can be set once per element.
#[derive(Debug, Clone, Default)]
pub struct MetadataBag {
    entries: IndexMap<SmolStr, Arc<dyn StoredMetadata>>,
}

impl MetadataBag {
    /// Store `metadata`; `owner` names the element in the error on a
    /// duplicate key.
    pub fn add<M: Metadata>(&mut self, metadata: M, owner: &str) -> ReflectionResult<()> {
        let key = SmolStr::new(metadata.key());
        if self.entries.contains_key(&key) {
            return Err(ReflectionError::DuplicateMetadata {
                key: key.to_string(),
                element: owner.to_string(),
            });
        }
        self.entries.insert(key, Arc::new(metadata));
        Ok(())
    }

    /// Typed access to the metadata stored under `key`.
    pub fn get<M: Metadata>(&self, key: &str) -> Option<&M> {
        self.entries.get(key)?.as_any().downcast_ref::<M>()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Hooks(Vec<&'static str>);

    impl Metadata for Hooks {
        fn key(&self) -> &str {
            "hooks"
        }
    }

    #[test]
    fn test_add_and_get_typed() {
        let mut bag = MetadataBag::default();
        bag.add(Hooks(vec!["init"]), "\\Luigi\\Pizza").unwrap();

        assert!(bag.contains("hooks"));
        assert_eq!(bag.get::<Hooks>("hooks"), Some(&Hooks(vec!["init"])));
        assert_eq!(bag.keys().collect::<Vec<_>>(), vec!["hooks"]);
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let mut bag = MetadataBag::default();
        bag.add(Hooks(vec![]), "\\Luigi\\Pizza").unwrap();
        let err = bag.add(Hooks(vec!["again"]), "\\Luigi\\Pizza").unwrap_err();
        assert!(matches!(err, ReflectionError::DuplicateMetadata { .. }));
        assert_eq!(bag.len(), 1);
    }
}
