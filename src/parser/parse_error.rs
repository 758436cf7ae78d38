use std::fmt;

use thiserror::Error;

use crate::parser::QueryParser;

/// What went wrong while parsing a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    MalformedSelect,
    EmptyFieldList,
    MalformedCondition,
    MalformedJoin,
    MalformedInsert,
    InvalidLimit,
    MalformedOrderBy,
    MalformedGroupBy,
    DuplicateClause,
    UnbalancedDelimiter,
    ArityMismatch,
    InputTooLong,
    UnsupportedStatement,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseErrorKind::MalformedSelect => "MalformedSelect",
            ParseErrorKind::EmptyFieldList => "EmptyFieldList",
            ParseErrorKind::MalformedCondition => "MalformedCondition",
            ParseErrorKind::MalformedJoin => "MalformedJoin",
            ParseErrorKind::MalformedInsert => "MalformedInsert",
            ParseErrorKind::InvalidLimit => "InvalidLimit",
            ParseErrorKind::MalformedOrderBy => "MalformedOrderBy",
            ParseErrorKind::MalformedGroupBy => "MalformedGroupBy",
            ParseErrorKind::DuplicateClause => "DuplicateClause",
            ParseErrorKind::UnbalancedDelimiter => "UnbalancedDelimiter",
            ParseErrorKind::ArityMismatch => "ArityMismatch",
            ParseErrorKind::InputTooLong => "InputTooLong",
            ParseErrorKind::UnsupportedStatement => "UnsupportedStatement",
        };
        write!(f, "{}", name)
    }
}

/// A parse failure. `start` and `end` are byte offsets into the statement
/// handed to the entry point, `text` is the offending piece of it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ParseError({kind}): {message}\n  at [{start}:{end}] -> '{text}'")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl ParseError {
    /// Error covering the text from `pivot` up to the parser's current position.
    pub fn new(kind: ParseErrorKind, message: &str, pivot: usize, parser: &QueryParser) -> Self {
        let end = parser.position.max(pivot);
        Self {
            kind,
            message: message.to_string(),
            text: parser.text_from_range(pivot, end + 1),
            start: parser.byte_offset(pivot),
            end: parser.byte_offset(end),
        }
    }

    /// Error covering the characters `start..end`.
    pub fn span(kind: ParseErrorKind, message: &str, start: usize, end: usize, parser: &QueryParser) -> Self {
        Self {
            kind,
            message: message.to_string(),
            text: parser.text_from_range(start, end),
            start: parser.byte_offset(start),
            end: parser.byte_offset(end),
        }
    }

    /// Error covering everything the parser holds.
    pub fn whole(kind: ParseErrorKind, message: &str, parser: &QueryParser) -> Self {
        Self {
            kind,
            message: message.to_string(),
            text: parser.text.clone(),
            start: parser.byte_offset(0),
            end: parser.byte_offset(parser.length),
        }
    }

    pub fn err<T>(self) -> Result<T, ParseError> {
        Err(self)
    }
}
