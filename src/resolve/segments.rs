//! Name-segment stack - tracks the identifier prefix during the walk.

use crate::base::{Fqsen, ReflectionResult};

/// Segments of the identifier being built, seeded with the namespace.
///
/// `roots` records where each open top-level declaration (class-like,
/// function, free constant) starts, so a declaration nested in a function
/// body resolves against the namespace segment alone.
pub(super) struct NameStack {
    segments: Vec<String>,
    roots: Vec<usize>,
}

impl NameStack {
    pub fn new() -> Self {
        Self {
            segments: vec!["\\".to_string()],
            roots: Vec::new(),
        }
    }

    /// Replace the whole stack with a namespace segment; namespaces do not nest.
    pub fn reset_namespace(&mut self, namespace: Option<&str>) {
        let segment = match namespace.map(|ns| ns.trim_matches('\\')) {
            Some(ns) if !ns.is_empty() => format!("\\{ns}\\"),
            _ => "\\".to_string(),
        };
        self.segments.clear();
        self.segments.push(segment);
        self.roots.clear();
    }

    /// Push the segment of a declaration that starts a new identifier root.
    pub fn push_root(&mut self, segment: impl Into<String>) {
        self.roots.push(self.segments.len());
        self.segments.push(segment.into());
    }

    /// Push a member segment below the current root.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Pop everything above `depth`. The namespace segment always survives.
    pub fn truncate(&mut self, depth: usize) {
        let depth = depth.max(1);
        self.segments.truncate(depth);
        self.roots.retain(|&root| root < depth);
    }

    /// The identifier for the innermost segment, with the trailing
    /// namespace separator trimmed.
    pub fn current_name(&self) -> String {
        let start = self.roots.last().copied().unwrap_or(1);
        let mut name = self.segments[0].clone();
        for segment in &self.segments[start..] {
            name.push_str(segment);
        }
        let trimmed = name.trim_end_matches('\\');
        if trimmed.is_empty() {
            "\\".to_string()
        } else {
            trimmed.to_string()
        }
    }

    pub fn fqsen(&self) -> ReflectionResult<Fqsen> {
        Fqsen::new(&self.current_name())
    }
}
