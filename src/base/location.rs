/// Source location tracking for model elements
///
/// Stores the line range a declaration occupies so documentation renderers
/// can link back to the source.
/// Lines are 1-indexed, as reported by the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Location {
    pub start_line: usize,
    pub end_line: usize,
}

impl Location {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    /// Check if a line falls within this location
    pub fn contains(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }
}
