use crate::parser::{ClauseText, ParseError, ParseErrorKind, QueryParser};

/// Where a comma separated list comes from; decides the error kind and wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListContext {
    Projection,
    GroupBy,
    OrderBy,
    InsertColumns,
    InsertValues,
    Returning,
}

impl ListContext {
    pub fn empty_kind(&self) -> ParseErrorKind {
        match self {
            ListContext::Projection => ParseErrorKind::EmptyFieldList,
            ListContext::GroupBy => ParseErrorKind::MalformedGroupBy,
            ListContext::OrderBy => ParseErrorKind::MalformedOrderBy,
            ListContext::InsertColumns | ListContext::InsertValues | ListContext::Returning => ParseErrorKind::MalformedInsert,
        }
    }

    pub fn item_name(&self) -> &'static str {
        match self {
            ListContext::Projection => "field",
            ListContext::GroupBy => "GROUP BY field",
            ListContext::OrderBy => "ORDER BY field",
            ListContext::InsertColumns => "column",
            ListContext::InsertValues => "value",
            ListContext::Returning => "RETURNING column",
        }
    }
}

/// Splits on top-level commas: commas inside parentheses (`COUNT(a, b)`) or
/// inside quoted literals do not separate items. Items are trimmed and kept
/// as written.
pub struct FieldListParser;

impl FieldListParser {
    pub fn parse(list: &ClauseText, context: ListContext) -> Result<Vec<String>, ParseError> {
        Ok(Self::split(list, context)?.into_iter().map(|item| item.text).collect())
    }

    pub fn split(list: &ClauseText, context: ListContext) -> Result<Vec<ClauseText>, ParseError> {
        let mut parser = list.parser();
        if list.is_empty() {
            return ParseError::whole(context.empty_kind(), &format!("Expected at least one {}", context.item_name()), &parser).err();
        }

        let mut items: Vec<ClauseText> = vec![];
        let mut pivot = 0;
        let mut depth = 0usize;
        let mut open = 0;

        while !parser.eof() {
            let current = parser.current();
            if QueryParser::is_quote(current) {
                parser.skip_quoted()?;
                continue;
            }

            match current {
                '(' => {
                    if depth == 0 {
                        open = parser.position;
                    }
                    depth += 1;
                },
                ')' => {
                    if depth == 0 {
                        return ParseError::new(ParseErrorKind::UnbalancedDelimiter, "Unexpected ')'", parser.position, &parser).err();
                    }
                    depth -= 1;
                },
                ',' if depth == 0 => {
                    items.push(Self::item(&parser, pivot, parser.position, context)?);
                    pivot = parser.position + 1;
                },
                _ => {},
            }

            parser.next();
        }

        if depth > 0 {
            return ParseError::span(ParseErrorKind::UnbalancedDelimiter, "Unclosed '('", open, parser.length, &parser).err();
        }

        items.push(Self::item(&parser, pivot, parser.length, context)?);
        Ok(items)
    }

    fn item(parser: &QueryParser, start: usize, end: usize, context: ListContext) -> Result<ClauseText, ParseError> {
        let item = parser.clause(start, end);
        if item.is_empty() {
            return ParseError::span(
                context.empty_kind(),
                &format!("Expected a {} between commas", context.item_name()),
                start.saturating_sub(1),
                (end + 1).min(parser.length),
                parser,
            ).err();
        }

        Ok(item)
    }
}
