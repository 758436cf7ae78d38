use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parser::{ast::Literal, ClauseText, ParseError, ParseErrorKind, QueryParser};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionOperator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "LIKE")]
    Like,
}

impl ConditionOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            ConditionOperator::Eq => "=",
            ConditionOperator::Ne => "!=",
            ConditionOperator::Ge => ">=",
            ConditionOperator::Le => "<=",
            ConditionOperator::Gt => ">",
            ConditionOperator::Lt => "<",
            ConditionOperator::Like => "LIKE",
        }
    }

    /// Comparison operator spelled at the parser's position, with its length.
    /// Two-character operators win over the one-character operators they start with.
    pub fn check(parser: &QueryParser) -> Option<(ConditionOperator, usize)> {
        match (parser.current(), parser.peek(1)) {
            ('!', '=') | ('<', '>') => Some((ConditionOperator::Ne, 2)),
            ('>', '=') => Some((ConditionOperator::Ge, 2)),
            ('<', '=') => Some((ConditionOperator::Le, 2)),
            ('=', _) => Some((ConditionOperator::Eq, 1)),
            ('>', _) => Some((ConditionOperator::Gt, 1)),
            ('<', _) => Some((ConditionOperator::Lt, 1)),
            _ => None,
        }
    }
}

impl TryFrom<&str> for ConditionOperator {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_uppercase().as_str() {
            "=" => Ok(ConditionOperator::Eq),
            "!=" | "<>" => Ok(ConditionOperator::Ne),
            ">=" => Ok(ConditionOperator::Ge),
            "<=" => Ok(ConditionOperator::Le),
            ">" => Ok(ConditionOperator::Gt),
            "<" => Ok(ConditionOperator::Lt),
            "LIKE" => Ok(ConditionOperator::Like),
            _ => Err(format!("Invalid condition operator: '{}'", value)),
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One `field operator value` comparison. `value` has its quotes removed; a
/// LIKE pattern keeps its wildcards untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub field: String,
    pub operator: ConditionOperator,
    pub value: String,
}

impl Condition {
    pub fn parse(fragment: &ClauseText) -> Result<Self, ParseError> {
        let mut parser = fragment.parser();

        if let Some(condition) = Self::parse_like(&mut parser)? {
            return Ok(condition);
        }

        parser.position = 0;
        Self::parse_comparison(&mut parser)
    }

    fn parse_like(parser: &mut QueryParser) -> Result<Option<Self>, ParseError> {
        while !parser.eof() {
            if QueryParser::is_quote(parser.current()) {
                parser.skip_quoted()?;
                continue;
            }

            if parser.follows_whitespace() {
                if let Some(length) = parser.comparers.like.matched_length(parser) {
                    let like_start = parser.position;
                    return Self::from_parts(parser, like_start, length, ConditionOperator::Like).map(Some);
                }
            }
            parser.next();
        }

        Ok(None)
    }

    fn parse_comparison(parser: &mut QueryParser) -> Result<Self, ParseError> {
        while !parser.eof() {
            if QueryParser::is_quote(parser.current()) {
                parser.skip_quoted()?;
                continue;
            }

            if let Some((operator, length)) = ConditionOperator::check(parser) {
                let operator_start = parser.position;
                return Self::from_parts(parser, operator_start, length, operator);
            }
            parser.next();
        }

        ParseError::whole(
            ParseErrorKind::MalformedCondition,
            "Expected '<field> <operator> <value>' with one of =, !=, <>, >=, <=, >, < or LIKE",
            parser,
        ).err()
    }

    fn from_parts(parser: &QueryParser, operator_start: usize, length: usize, operator: ConditionOperator) -> Result<Self, ParseError> {
        let field = parser.clause(0, operator_start);
        let value = parser.rest(operator_start + length);

        if field.is_empty() {
            return ParseError::whole(
                ParseErrorKind::MalformedCondition,
                &format!("Expected a field before '{}'", operator),
                parser,
            ).err();
        }

        if value.is_empty() {
            return ParseError::whole(
                ParseErrorKind::MalformedCondition,
                &format!("Expected a value after '{}'", operator),
                parser,
            ).err();
        }

        Ok(Self {
            field: field.text,
            operator,
            value: Literal::unquote(&value.text),
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, Literal::quote(&self.value))
    }
}
