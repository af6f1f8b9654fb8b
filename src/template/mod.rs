//! Template grammar: literal text interleaved with `{name}` and
//! `{custom:KEY}` placeholders.

mod parser;

use std::{fmt::Display, ops::Range};

pub use parser::{CUSTOM_PREFIX, ParseError, ParseResult, Parser};

/// Bare placeholder names that refer to document metadata instead of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedToken {
    BaseCommand,
}

impl ReservedToken {
    pub const ALL: [ReservedToken; 1] = [ReservedToken::BaseCommand];

    pub fn name(&self) -> &'static str {
        match self {
            ReservedToken::BaseCommand => "baseCommand",
        }
    }

    pub fn from_name(name: &str) -> Option<ReservedToken> {
        ReservedToken::ALL.into_iter().find(|t| t.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    Reserved(ReservedToken),
    Argument(String),
    Custom(String),
}

impl PlaceholderKind {
    pub(crate) fn bare(name: String) -> Self {
        match ReservedToken::from_name(&name) {
            Some(token) => PlaceholderKind::Reserved(token),
            None => PlaceholderKind::Argument(name),
        }
    }
}

impl Display for PlaceholderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceholderKind::Reserved(token) => write!(f, "{{{}}}", token.name()),
            PlaceholderKind::Argument(name) => write!(f, "{{{name}}}"),
            PlaceholderKind::Custom(key) => write!(f, "{{{CUSTOM_PREFIX}{key}}}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub kind: PlaceholderKind,
    /// Byte range in the source template, braces included.
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A parsed template. Displaying it reproduces the source text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    pub fn parse(input: &str) -> ParseResult<Template> {
        Parser::new(input).parse_all()
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(p) => Some(p),
            Segment::Literal(_) => None,
        })
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Placeholder(p) => write!(f, "{}", p.kind)?,
            }
        }
        Ok(())
    }
}
