use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parser::{ClauseText, ParseError, ParseErrorKind, QueryParser};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinKind {
    Inner,
    Left,
    Right,
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinKind::Inner => write!(f, "INNER"),
            JoinKind::Left => write!(f, "LEFT"),
            JoinKind::Right => write!(f, "RIGHT"),
        }
    }
}

/// `<kind> JOIN <table> ON <left> = <right>`. The column references are kept
/// as written; resolving them against a schema happens at execution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSpec {
    pub kind: JoinKind,
    pub table: String,
    pub left: String,
    pub right: String,
}

impl JoinSpec {
    pub fn is_reference_char(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_' || ch == '.'
    }

    /// Parses what follows the join keyword: `<table> ON <left> = <right>`.
    pub fn parse(kind: JoinKind, body: &ClauseText) -> Result<Self, ParseError> {
        let mut parser = body.parser();

        let Some((on_start, on_length)) = Self::find_on(&mut parser)? else {
            return ParseError::whole(ParseErrorKind::MalformedJoin, "Expected '<table> ON <left> = <right>'", &parser).err();
        };

        let table = parser.clause(0, on_start);
        if table.is_empty() {
            return ParseError::span(ParseErrorKind::MalformedJoin, "Expected a table name before ON", 0, on_start + on_length, &parser).err();
        }

        parser.position = on_start + on_length;
        parser.next_non_whitespace();
        let left = Self::parse_reference(&mut parser)?;

        parser.next_non_whitespace();
        if parser.current() != '=' {
            return ParseError::new(ParseErrorKind::MalformedJoin, "Expected '=' between the join columns", parser.position, &parser).err();
        }
        parser.next();
        parser.next_non_whitespace();
        let right = Self::parse_reference(&mut parser)?;

        parser.next_non_whitespace();
        if !parser.eof() {
            return ParseError::span(
                ParseErrorKind::MalformedJoin,
                "Only a single equality join condition is supported",
                parser.position,
                parser.length,
                &parser,
            ).err();
        }

        Ok(Self { kind, table: table.text, left, right })
    }

    fn find_on(parser: &mut QueryParser) -> Result<Option<(usize, usize)>, ParseError> {
        while !parser.eof() {
            if QueryParser::is_quote(parser.current()) {
                parser.skip_quoted()?;
                continue;
            }
            if parser.follows_whitespace() {
                if let Some(length) = parser.comparers.on.matched_length(parser) {
                    return Ok(Some((parser.position, length)));
                }
            }
            parser.next();
        }

        Ok(None)
    }

    fn parse_reference(parser: &mut QueryParser) -> Result<String, ParseError> {
        let pivot = parser.position;
        while !parser.eof() && Self::is_reference_char(parser.current()) {
            parser.next();
        }

        if parser.position == pivot {
            return ParseError::new(ParseErrorKind::MalformedJoin, "Expected a column reference", pivot, parser).err();
        }

        Ok(parser.text_from_pivot(pivot))
    }
}

impl fmt::Display for JoinSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} JOIN {} ON {} = {}", self.kind, self.table, self.left, self.right)
    }
}
