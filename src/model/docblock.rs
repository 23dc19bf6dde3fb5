//! Structured documentation comments.
//!
//! Parsing a raw `/** ... */` comment is the job of a [`DocBlockFactory`];
//! the pipeline only attaches the result. [`StandardDocBlockFactory`] covers
//! the common layout: a summary, a free-form description and `@tag` lines.

use smol_str::SmolStr;

use crate::context::TypeContext;

use super::types::Type;

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DocBlock {
    pub summary: String,
    pub description: String,
    pub tags: Vec<Tag>,
}

impl DocBlock {
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.description.is_empty() && self.tags.is_empty()
    }

    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags.iter().filter(move |tag| tag.name == name)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags_named(name).next().is_some()
    }
}

/// `@name body`
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tag {
    pub name: SmolStr,
    pub body: String,
    /// Resolved type of `@param`, `@var`, `@return`, `@throws` and `@property` tags.
    pub ty: Option<Type>,
    /// Variable of `@param`, `@var` and `@property` tags, without `$`.
    pub variable: Option<SmolStr>,
}

/// Turns raw comment text into a [`DocBlock`].
///
/// Implementations must not fail: a comment they cannot make sense of
/// yields an empty docblock.
pub trait DocBlockFactory: Send + Sync {
    fn create(&self, text: &str, context: &TypeContext) -> DocBlock;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDocBlockFactory;

const TYPED_TAGS: &[&str] = &[
    "param",
    "var",
    "return",
    "throws",
    "property",
    "property-read",
    "property-write",
];

impl DocBlockFactory for StandardDocBlockFactory {
    fn create(&self, text: &str, context: &TypeContext) -> DocBlock {
        let lines = strip_comment(text);

        let tag_start = lines
            .iter()
            .position(|line| line.starts_with('@'))
            .unwrap_or(lines.len());
        let (summary, description) = split_summary(&lines[..tag_start]);

        let mut raw_tags: Vec<String> = Vec::new();
        for line in &lines[tag_start..] {
            if line.starts_with('@') {
                raw_tags.push(line.to_string());
            } else if let Some(last) = raw_tags.last_mut() {
                last.push('\n');
                last.push_str(line);
            }
        }

        DocBlock {
            summary,
            description,
            tags: raw_tags
                .iter()
                .map(|raw| parse_tag(raw.trim_end(), context))
                .collect(),
        }
    }
}

/// Comment body lines with delimiters and leading `*` removed.
fn strip_comment(text: &str) -> Vec<&str> {
    let body = text.trim();
    let body = body.strip_prefix("/**").unwrap_or(body);
    let body = body.strip_suffix("*/").unwrap_or(body);
    body.lines()
        .map(|line| {
            let line = line.trim_start();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line).trim_end()
        })
        .collect()
}

/// The summary ends at the first blank line or at a line ending with `.`.
fn split_summary(lines: &[&str]) -> (String, String) {
    let lines: Vec<&str> = lines
        .iter()
        .copied()
        .skip_while(|line| line.is_empty())
        .collect();
    let mut end = lines.len();
    for (idx, line) in lines.iter().enumerate() {
        if line.is_empty() {
            end = idx;
            break;
        }
        if line.ends_with('.') {
            end = idx + 1;
            break;
        }
    }
    let summary = lines[..end].join("\n").trim().to_string();
    let description = lines[end..].join("\n").trim().to_string();
    (summary, description)
}

fn parse_tag(raw: &str, context: &TypeContext) -> Tag {
    let raw = raw.trim_start_matches('@');
    let (name, body) = match raw.find(char::is_whitespace) {
        Some(idx) => (&raw[..idx], raw[idx..].trim()),
        None => (raw, ""),
    };
    let mut tag = Tag {
        name: SmolStr::new(name),
        body: body.to_string(),
        ty: None,
        variable: None,
    };
    if !TYPED_TAGS.contains(&name) {
        return tag;
    }

    let mut words = body.split_whitespace();
    let first = words.next();
    match first {
        Some(word) if word.starts_with('$') => {
            tag.variable = Some(SmolStr::new(word.trim_start_matches('$')));
        }
        Some(word) => {
            tag.ty = Type::parse(word, context).ok();
            if let Some(var) = words.next().filter(|w| w.starts_with('$')) {
                tag.variable = Some(SmolStr::new(var.trim_start_matches('$')));
            }
        }
        None => {}
    }
    tag
}
