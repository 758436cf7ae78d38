use crate::parser::{ast::Condition, ClauseText, ParseError, ParseErrorKind, QueryParser};

/// Splits a WHERE body on `AND`/`OR` into a flat list of conditions.
///
/// Connectors are not modelled: `a = 1 OR b = 2` yields the same two conditions
/// as `a = 1 AND b = 2`, and the caller treats the list as a conjunction.
pub struct WhereParser;

impl WhereParser {
    pub fn parse(body: &ClauseText) -> Result<Vec<Condition>, ParseError> {
        Self::split(body)?.iter().map(Condition::parse).collect()
    }

    pub fn split(body: &ClauseText) -> Result<Vec<ClauseText>, ParseError> {
        let mut parser = body.parser();
        if body.is_empty() {
            return ParseError::whole(ParseErrorKind::MalformedCondition, "Expected at least one condition after WHERE", &parser).err();
        }

        let mut fragments: Vec<ClauseText> = vec![];
        let mut pivot = 0;
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
                depth = depth.saturating_sub(1);
            } else if depth == 0 && parser.follows_whitespace() {
                let connector = parser.comparers.and.matched_length(&parser)
                    .or_else(|| parser.comparers.or.matched_length(&parser));

                if let Some(length) = connector {
                    fragments.push(Self::fragment(&parser, pivot, parser.position, parser.position + length)?);
                    parser.jump(length);
                    pivot = parser.position;
                    continue;
                }
            }

            parser.next();
        }

        fragments.push(Self::fragment(&parser, pivot, parser.length, parser.length)?);
        Ok(fragments)
    }

    /// The condition in `start..end`; an empty one is reported over `start..connector_end`.
    fn fragment(parser: &QueryParser, start: usize, end: usize, connector_end: usize) -> Result<ClauseText, ParseError> {
        let fragment = parser.clause(start, end);

        if fragment.is_empty() {
            return ParseError::span(
                ParseErrorKind::MalformedCondition,
                "Expected a condition around AND/OR",
                start,
                connector_end,
                parser,
            ).err();
        }

        Ok(fragment)
    }
}
