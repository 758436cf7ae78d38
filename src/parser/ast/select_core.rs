use crate::parser::{ClauseText, ParseError, ParseErrorKind, QueryParser};

/// `SELECT [DISTINCT] <fields> FROM <table>`, what is left of a SELECT once the
/// optional clauses are cut away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectCore {
    pub distinct: bool,
    pub fields: ClauseText,
    pub table: String,
}

impl SelectCore {
    pub fn parse(core: &ClauseText) -> Result<Self, ParseError> {
        let mut parser = core.parser();

        if !parser.consume(|comparers| &comparers.select) {
            return Self::malformed(&parser);
        }
        parser.next_non_whitespace();
        let distinct = parser.consume(|comparers| &comparers.distinct);
        let fields_start = parser.position;

        let Some((from_start, from_length)) = Self::find_from(&mut parser)? else {
            return Self::malformed(&parser);
        };

        let fields = parser.clause(fields_start, from_start);
        let table = parser.rest(from_start + from_length);
        if table.is_empty() {
            return ParseError::span(
                ParseErrorKind::MalformedSelect,
                "Expected a table name after FROM",
                from_start,
                parser.length,
                &parser,
            ).err();
        }

        Ok(Self { distinct, fields, table: table.text })
    }

    fn malformed<T>(parser: &QueryParser) -> Result<T, ParseError> {
        ParseError::whole(ParseErrorKind::MalformedSelect, "Expected 'SELECT <fields> FROM <table>'", parser).err()
    }

    fn find_from(parser: &mut QueryParser) -> Result<Option<(usize, usize)>, ParseError> {
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
                if let Some(length) = parser.comparers.from.matched_length(parser) {
                    return Ok(Some((parser.position, length)));
                }
            }
            parser.next();
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{ast::SelectCore, ClauseText, ParseErrorKind};

    fn parse(text: &str) -> SelectCore {
        SelectCore::parse(&ClauseText::new(text, 0)).expect("Failed to parse select core")
    }

    #[test]
    pub fn test_select_core() {
        let core = parse("SELECT id, name FROM sample");

        assert!(!core.distinct);
        assert_eq!(core.fields, ClauseText::new("id, name", 7));
        assert_eq!(core.table, "sample");
    }

    #[test]
    pub fn test_select_core_distinct() {
        let core = parse("select   DISTINCT city from  people ");

        assert!(core.distinct);
        assert_eq!(core.fields.text, "city");
        assert_eq!(core.table, "people");
    }

    #[test]
    pub fn test_select_core_distinct_prefix_is_a_field() {
        let core = parse("SELECT distinct_city FROM people");

        assert!(!core.distinct);
        assert_eq!(core.fields.text, "distinct_city");
    }

    #[test]
    pub fn test_select_core_from_inside_call_or_literal() {
        let core = parse("SELECT EXTRACT(YEAR FROM born), 'x FROM y' FROM people");

        assert_eq!(core.fields.text, "EXTRACT(YEAR FROM born), 'x FROM y'");
        assert_eq!(core.table, "people");
    }

    #[test]
    pub fn test_select_core_empty_fields() {
        let core = parse("SELECT FROM t");

        assert!(core.fields.is_empty());
        assert_eq!(core.table, "t");
    }

    #[test]
    pub fn test_select_core_malformed() {
        for text in ["SELECT id name", "UPDATE t SET a = 1", "SELECTid FROM t", ""] {
            let result = SelectCore::parse(&ClauseText::new(text, 0));

            match result {
                Ok(_) => panic!("{text}"),
                Err(err) => assert_eq!(err.kind, ParseErrorKind::MalformedSelect),
            }
        }
    }

    #[test]
    pub fn test_select_core_missing_table() {
        let result = SelectCore::parse(&ClauseText::new("SELECT * FROM", 0));

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.kind, ParseErrorKind::MalformedSelect);
                assert_eq!(err.text, "FROM");
                assert_eq!(err.start, 9);
            },
        }
    }
}
