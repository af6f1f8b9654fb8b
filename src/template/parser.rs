/// Parser for command templates
///
/// Parses templates like:
/// - Literal text: give @p minecraft:diamond
/// - Bare placeholders: {baseCommand} {player}
/// - Custom logic placeholders: {custom:randomamount}
use super::{Placeholder, PlaceholderKind, Segment, Template};

pub const CUSTOM_PREFIX: &str = "custom:";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unmatched `{{` at byte {offset}")]
    UnmatchedBrace { offset: usize },
    #[error("empty placeholder at byte {offset}")]
    EmptyPlaceholder { offset: usize },
    #[error("placeholder at byte {offset} contains a nested `{{`")]
    NestedBrace { offset: usize },
    #[error("custom placeholder at byte {offset} has no key")]
    EmptyCustomKey { offset: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnmatchedBrace { offset }
            | ParseError::EmptyPlaceholder { offset }
            | ParseError::NestedBrace { offset }
            | ParseError::EmptyCustomKey { offset } => *offset,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser {
    input: Vec<char>,
    pos: usize,
    byte_pos: usize,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            byte_pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            self.byte_pos += c.len_utf8();
        }
        ch
    }

    /// Scan left to right, splitting literal runs from `{...}` placeholders.
    pub fn parse_all(&mut self) -> ParseResult<Template> {
        let mut segments = Vec::new();
        let mut literal = String::new();

        while let Some(ch) = self.peek() {
            if ch == '{' {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                let placeholder = self.parse_placeholder()?;
                tracing::trace!(?placeholder, "parsed placeholder");
                segments.push(Segment::Placeholder(placeholder));
            } else {
                literal.push(ch);
                self.advance();
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Template { segments })
    }

    fn parse_placeholder(&mut self) -> ParseResult<Placeholder> {
        let start = self.byte_pos;
        self.advance();

        let mut content = String::new();
        loop {
            match self.advance() {
                None => return Err(ParseError::UnmatchedBrace { offset: start }),
                Some('}') => break,
                Some('{') => return Err(ParseError::NestedBrace { offset: start }),
                Some(ch) => content.push(ch),
            }
        }

        if content.is_empty() {
            return Err(ParseError::EmptyPlaceholder { offset: start });
        }

        let kind = match content.strip_prefix(CUSTOM_PREFIX) {
            Some("") => return Err(ParseError::EmptyCustomKey { offset: start }),
            Some(key) => PlaceholderKind::Custom(key.to_string()),
            None => PlaceholderKind::bare(content),
        };

        Ok(Placeholder {
            kind,
            span: start..self.byte_pos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ReservedToken;

    fn parse(input: &str) -> ParseResult<Template> {
        Parser::new(input).parse_all()
    }

    #[test]
    fn golden_template() {
        let t = parse("{baseCommand} {player} minecraft:diamond {custom:randomamount}").unwrap();
        assert_eq!(
            t.segments,
            vec![
                Segment::Placeholder(Placeholder {
                    kind: PlaceholderKind::Reserved(ReservedToken::BaseCommand),
                    span: 0..13,
                }),
                Segment::Literal(" ".into()),
                Segment::Placeholder(Placeholder {
                    kind: PlaceholderKind::Argument("player".into()),
                    span: 14..22,
                }),
                Segment::Literal(" minecraft:diamond ".into()),
                Segment::Placeholder(Placeholder {
                    kind: PlaceholderKind::Custom("randomamount".into()),
                    span: 41..62,
                }),
            ]
        );
    }

    #[test]
    fn literal_only() {
        let t = parse("say hello").unwrap();
        assert_eq!(t.segments, vec![Segment::Literal("say hello".into())]);
        assert!(parse("").unwrap().segments.is_empty());
    }

    #[test]
    fn stray_closing_brace_is_literal() {
        let t = parse("a } b").unwrap();
        assert_eq!(t.segments, vec![Segment::Literal("a } b".into())]);
    }

    #[test]
    fn unmatched_brace_reports_offset() {
        assert_eq!(
            parse("give {player"),
            Err(ParseError::UnmatchedBrace { offset: 5 })
        );
    }

    #[test]
    fn empty_placeholder_reports_offset() {
        assert_eq!(parse("x {}"), Err(ParseError::EmptyPlaceholder { offset: 2 }));
        assert_eq!(
            parse("{custom:}"),
            Err(ParseError::EmptyCustomKey { offset: 0 })
        );
    }

    #[test]
    fn nested_brace_is_malformed() {
        assert_eq!(parse("{a{b}"), Err(ParseError::NestedBrace { offset: 0 }));
    }

    #[test]
    fn offsets_are_bytes() {
        // "é" is two bytes
        assert_eq!(parse("é {"), Err(ParseError::UnmatchedBrace { offset: 3 }));
        let t = parse("é{x}").unwrap();
        match &t.segments[1] {
            Segment::Placeholder(p) => assert_eq!(p.span, 2..5),
            other => panic!("expected placeholder, got {other:?}"),
        }
    }
}
