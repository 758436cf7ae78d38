use tracing::trace;

use crate::parser::{ast::JoinKind, ClauseText, ParseError, ParseErrorKind, QueryParser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    OrderBy,
    GroupBy,
    Limit,
    Where,
    Join(JoinKind),
}

impl ClauseKind {
    pub fn name(&self) -> &'static str {
        match self {
            ClauseKind::OrderBy => "ORDER BY",
            ClauseKind::GroupBy => "GROUP BY",
            ClauseKind::Limit => "LIMIT",
            ClauseKind::Where => "WHERE",
            ClauseKind::Join(JoinKind::Inner) => "INNER JOIN",
            ClauseKind::Join(JoinKind::Left) => "LEFT JOIN",
            ClauseKind::Join(JoinKind::Right) => "RIGHT JOIN",
        }
    }

    /// Clause keyword at the parser's position, with the characters it spans.
    pub fn detect(parser: &QueryParser) -> Option<(ClauseKind, usize)> {
        let comparers = &parser.comparers;
        [
            (ClauseKind::OrderBy, &comparers.order_by),
            (ClauseKind::GroupBy, &comparers.group_by),
            (ClauseKind::Limit, &comparers.limit),
            (ClauseKind::Where, &comparers.r#where),
            (ClauseKind::Join(JoinKind::Inner), &comparers.inner_join),
            (ClauseKind::Join(JoinKind::Left), &comparers.left_join),
            (ClauseKind::Join(JoinKind::Right), &comparers.right_join),
        ]
        .into_iter()
        .find_map(|(kind, comparer)| comparer.matched_length(parser).map(|length| (kind, length)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinClause {
    pub kind: JoinKind,
    pub body: ClauseText,
}

/// A SELECT statement cut into its core (`SELECT .. FROM ..`) and the raw
/// payload of every optional clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedClauses {
    pub core: ClauseText,
    pub order_by: Option<ClauseText>,
    pub group_by: Option<ClauseText>,
    pub limit: Option<ClauseText>,
    pub r#where: Option<ClauseText>,
    pub join: Option<JoinClause>,
}

#[derive(Debug)]
struct ClauseMark {
    kind: ClauseKind,
    keyword_start: usize,
    payload_start: usize,
}

pub struct ClauseExtractor;

impl ClauseExtractor {
    /// Clause keywords count only outside quoted literals and parentheses, and
    /// only right after whitespace. A payload runs up to the next clause
    /// keyword, whatever the order the clauses come in.
    pub fn extract(parser: &mut QueryParser) -> Result<ExtractedClauses, ParseError> {
        let marks = Self::scan(parser)?;

        let core_end = marks.first().map_or(parser.length, |mark| mark.keyword_start);
        let mut clauses = ExtractedClauses {
            core: parser.clause(0, core_end),
            ..Default::default()
        };

        for (index, mark) in marks.iter().enumerate() {
            let end = marks.get(index + 1).map_or(parser.length, |next| next.keyword_start);
            let payload = parser.clause(mark.payload_start, end);
            trace!(clause = mark.kind.name(), payload = %payload.text, start = payload.start, "clause detected");

            let slot = match mark.kind {
                ClauseKind::OrderBy => &mut clauses.order_by,
                ClauseKind::GroupBy => &mut clauses.group_by,
                ClauseKind::Limit => &mut clauses.limit,
                ClauseKind::Where => &mut clauses.r#where,
                ClauseKind::Join(kind) => {
                    if clauses.join.is_some() {
                        return ParseError::span(
                            ParseErrorKind::MalformedJoin,
                            "Only one join clause is supported",
                            mark.keyword_start,
                            end,
                            parser,
                        ).err();
                    }
                    clauses.join = Some(JoinClause { kind, body: payload });
                    continue;
                },
            };

            if slot.is_some() {
                return ParseError::span(
                    ParseErrorKind::DuplicateClause,
                    &format!("{} clause appears more than once", mark.kind.name()),
                    mark.keyword_start,
                    mark.payload_start,
                    parser,
                ).err();
            }
            *slot = Some(payload);
        }

        Ok(clauses)
    }

    fn scan(parser: &mut QueryParser) -> Result<Vec<ClauseMark>, ParseError> {
        let mut marks: Vec<ClauseMark> = vec![];
        let mut depth = 0usize;
        let mut open = 0;

        while !parser.eof() {
            let current = parser.current();
            if QueryParser::is_quote(current) {
                parser.skip_quoted()?;
                continue;
            }

            if current == '(' {
                if depth == 0 {
                    open = parser.position;
                }
                depth += 1;
            } else if current == ')' {
                if depth == 0 {
                    return ParseError::new(ParseErrorKind::UnbalancedDelimiter, "Unexpected ')'", parser.position, parser).err();
                }
                depth -= 1;
            } else if depth == 0 && parser.follows_whitespace() {
                if let Some((kind, length)) = ClauseKind::detect(parser) {
                    marks.push(ClauseMark {
                        kind,
                        keyword_start: parser.position,
                        payload_start: parser.position + length,
                    });
                    parser.jump(length);
                    continue;
                }
            }

            parser.next();
        }

        if depth > 0 {
            return ParseError::span(ParseErrorKind::UnbalancedDelimiter, "Unclosed '('", open, parser.length, parser).err();
        }

        Ok(marks)
    }
}
