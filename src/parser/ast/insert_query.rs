use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parser::{
    ast::{FieldListParser, ListContext, Literal},
    parse_insert, ClauseText, ParseError, ParseErrorKind, ParserConfig, QueryParser,
};

/// `INSERT INTO <table> (<columns>) VALUES (<values>) [RETURNING <columns>]`.
///
/// `columns[i]` pairs with `values[i]`. Values are text with one layer of
/// quoting removed; typing them is left to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertQuery {
    pub table: String,
    pub columns: Vec<String>,
    pub values: Vec<String>,
    #[serde(default)]
    pub returning_columns: Vec<String>,
}

impl InsertQuery {
    /// Parses a statement that has already been trimmed and length-checked.
    pub fn parse(statement: &ClauseText, config: &ParserConfig) -> Result<Self, ParseError> {
        let mut parser = statement.parser();

        if !parser.consume(|comparers| &comparers.insert_into) {
            return ParseError::whole(
                ParseErrorKind::MalformedInsert,
                "Expected 'INSERT INTO <table> (<columns>) VALUES (<values>)'",
                &parser,
            ).err();
        }
        parser.next_non_whitespace();
        let table = Self::parse_table(&mut parser)?;

        parser.next_non_whitespace();
        let column_list = Self::parenthesized(&mut parser, ListContext::InsertColumns)?;

        parser.next_non_whitespace();
        if !parser.consume(|comparers| &comparers.values) {
            return ParseError::span(
                ParseErrorKind::MalformedInsert,
                "Expected VALUES after the column list",
                parser.position,
                parser.length,
                &parser,
            ).err();
        }

        parser.next_non_whitespace();
        let value_list = Self::parenthesized(&mut parser, ListContext::InsertValues)?;

        parser.next_non_whitespace();
        let returning_columns = Self::parse_returning(&mut parser)?;

        let columns: Vec<String> = FieldListParser::parse(&column_list, ListContext::InsertColumns)?
            .iter()
            .map(|column| Literal::strip_qualifier(column))
            .collect();

        let values: Vec<String> = FieldListParser::parse(&value_list, ListContext::InsertValues)?
            .iter()
            .map(|value| Literal::unquote(value))
            .collect();

        if config.enforce_insert_arity && columns.len() != values.len() {
            return ParseError::whole(
                ParseErrorKind::ArityMismatch,
                &format!("{} columns but {} values", columns.len(), values.len()),
                &value_list.parser(),
            ).err();
        }

        Ok(Self { table, columns, values, returning_columns })
    }

    fn parse_table(parser: &mut QueryParser) -> Result<String, ParseError> {
        let pivot = parser.position;
        while !parser.eof() && !parser.current().is_whitespace() && parser.current() != '(' {
            if QueryParser::is_quote(parser.current()) {
                parser.skip_quoted()?;
                continue;
            }
            if parser.current() == ')' {
                return Self::unexpected_close(parser);
            }
            parser.next();
        }

        if parser.position == pivot {
            return ParseError::new(ParseErrorKind::MalformedInsert, "Expected a table name after INSERT INTO", pivot, parser).err();
        }

        Ok(Literal::normalize_identifier(&parser.text_from_pivot(pivot)))
    }

    /// The trimmed inside of the parenthesized list at the cursor; the cursor
    /// ends right after the closing parenthesis.
    fn parenthesized(parser: &mut QueryParser, context: ListContext) -> Result<ClauseText, ParseError> {
        let open = parser.position;
        if parser.current() != '(' {
            return ParseError::span(
                ParseErrorKind::MalformedInsert,
                &format!("Expected '(' to open the {} list", context.item_name()),
                open,
                parser.length,
                parser,
            ).err();
        }

        let mut depth = 0usize;
        while !parser.eof() {
            let current = parser.current();
            if QueryParser::is_quote(current) {
                parser.skip_quoted()?;
                continue;
            }

            if current == '(' {
                depth += 1;
            } else if current == ')' {
                depth -= 1;
                if depth == 0 {
                    let inner = parser.clause(open + 1, parser.position);
                    parser.next();
                    return Ok(inner);
                }
            }
            parser.next();
        }

        ParseError::span(ParseErrorKind::UnbalancedDelimiter, "Unclosed '('", open, parser.length, parser).err()
    }

    fn unexpected_close<T>(parser: &QueryParser) -> Result<T, ParseError> {
        ParseError::new(ParseErrorKind::UnbalancedDelimiter, "Unexpected ')'", parser.position, parser).err()
    }

    fn parse_returning(parser: &mut QueryParser) -> Result<Vec<String>, ParseError> {
        if parser.eof() {
            return Ok(vec![]);
        }

        if parser.current() == ')' {
            return Self::unexpected_close(parser);
        }

        if !parser.consume(|comparers| &comparers.returning) {
            return ParseError::span(
                ParseErrorKind::MalformedInsert,
                "Expected RETURNING or the end of the statement after the VALUES list",
                parser.position,
                parser.length,
                parser,
            ).err();
        }

        let list = parser.rest(parser.position);
        Ok(FieldListParser::parse(&list, ListContext::Returning)?
            .iter()
            .map(|column| Literal::strip_qualifier(column))
            .collect())
    }
}

impl TryFrom<&str> for InsertQuery {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_insert(value)
    }
}

impl fmt::Display for InsertQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.values.iter().map(|value| Literal::quote(value)).collect::<Vec<_>>().join(", ");
        write!(f, "INSERT INTO {} ({}) VALUES ({})", self.table, self.columns.join(", "), values)?;

        if !self.returning_columns.is_empty() {
            write!(f, " RETURNING {}", self.returning_columns.join(", "))?;
        }

        Ok(())
    }
}
