use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parser::{
    ast::{ClauseExtractor, InsertQuery, JoinSpec, SelectQuery},
    ClauseText, ParseError, ParseErrorKind, ParserConfig, QueryParser,
};

/// One parsed statement, picked by its leading keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Statement {
    Select(SelectQuery),
    Insert(InsertQuery),
}

impl Statement {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Select(query) => write!(f, "{}", query),
            Statement::Insert(query) => write!(f, "{}", query),
        }
    }
}

impl TryFrom<&str> for Statement {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_statement(value)
    }
}

/// Length check, then trim and drop one trailing `;`. The result keeps the
/// byte offset of the trimmed text inside `text`.
pub fn normalize(text: &str, config: &ParserConfig) -> Result<ClauseText, ParseError> {
    if text.len() > config.max_input_length {
        return ParseError {
            kind: ParseErrorKind::InputTooLong,
            message: format!("Statement is {} bytes, the limit is {}", text.len(), config.max_input_length),
            text: String::new(),
            start: config.max_input_length,
            end: text.len(),
        }.err();
    }

    let parser = QueryParser::new(text);
    let statement = parser.rest(0);
    match statement.text.strip_suffix(';') {
        Some(stripped) => Ok(ClauseText::new(stripped.trim_end(), statement.start)),
        None => Ok(statement),
    }
}

pub fn parse_select(text: &str) -> Result<SelectQuery, ParseError> {
    parse_select_with_config(text, &ParserConfig::default())
}

pub fn parse_select_with_config(text: &str, config: &ParserConfig) -> Result<SelectQuery, ParseError> {
    debug!(length = text.len(), "parsing select");
    let result = normalize(text, config).and_then(|statement| SelectQuery::parse(&statement));
    log_outcome("select", result)
}

pub fn parse_insert(text: &str) -> Result<InsertQuery, ParseError> {
    parse_insert_with_config(text, &ParserConfig::default())
}

pub fn parse_insert_with_config(text: &str, config: &ParserConfig) -> Result<InsertQuery, ParseError> {
    debug!(length = text.len(), "parsing insert");
    let result = normalize(text, config).and_then(|statement| InsertQuery::parse(&statement, config));
    log_outcome("insert", result)
}

/// The join clause of a statement, if it has one.
pub fn parse_join(text: &str) -> Result<Option<JoinSpec>, ParseError> {
    parse_join_with_config(text, &ParserConfig::default())
}

pub fn parse_join_with_config(text: &str, config: &ParserConfig) -> Result<Option<JoinSpec>, ParseError> {
    debug!(length = text.len(), "parsing join");
    let result = normalize(text, config).and_then(|statement| {
        let clauses = ClauseExtractor::extract(&mut statement.parser())?;
        clauses.join
            .map(|join| JoinSpec::parse(join.kind, &join.body))
            .transpose()
    });
    log_outcome("join", result)
}

pub fn parse_statement(text: &str) -> Result<Statement, ParseError> {
    parse_statement_with_config(text, &ParserConfig::default())
}

pub fn parse_statement_with_config(text: &str, config: &ParserConfig) -> Result<Statement, ParseError> {
    debug!(length = text.len(), "parsing statement");
    let result = normalize(text, config).and_then(|statement| {
        let parser = statement.parser();
        let word_end = parser.text_v
            .iter()
            .position(|ch| !ch.is_alphanumeric() && *ch != '_')
            .unwrap_or(parser.length);
        let leading_word = parser.text_from_range(0, word_end);

        if leading_word.eq_ignore_ascii_case("SELECT") {
            SelectQuery::parse(&statement).map(Statement::Select)
        } else if leading_word.eq_ignore_ascii_case("INSERT") {
            InsertQuery::parse(&statement, config).map(Statement::Insert)
        } else {
            let word_end = match word_end {
                0 => parser.text_v.iter().position(|ch| ch.is_whitespace()).unwrap_or(parser.length),
                _ => word_end,
            };
            ParseError::span(
                ParseErrorKind::UnsupportedStatement,
                "Only SELECT and INSERT INTO statements are supported",
                0,
                word_end,
                &parser,
            ).err()
        }
    });
    log_outcome("statement", result)
}

fn log_outcome<T>(statement: &str, result: Result<T, ParseError>) -> Result<T, ParseError> {
    match &result {
        Ok(_) => debug!(statement = statement, "parsed"),
        Err(err) => debug!(statement = statement, kind = %err.kind, start = err.start, end = err.end, "rejected"),
    }
    result
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::parser::{
        ast::JoinKind, normalize, parse_insert_with_config, parse_join, parse_select, parse_select_with_config,
        parse_statement, ParseErrorKind, ParserConfig, Statement,
    };

    #[test]
    pub fn test_normalize() {
        let statement = normalize("  SELECT * FROM t ;  ", &ParserConfig::new()).expect("Failed to normalize");

        assert_eq!(statement.text, "SELECT * FROM t");
        assert_eq!(statement.start, 2);
    }

    #[test]
    pub fn test_normalize_strips_one_semicolon() {
        let statement = normalize("SELECT * FROM t;;", &ParserConfig::new()).expect("Failed to normalize");

        assert_eq!(statement.text, "SELECT * FROM t;");
    }

    #[test]
    pub fn test_offsets_account_for_leading_whitespace() {
        let result = parse_select("   SELECT * FROM t LIMIT -1");

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.kind, ParseErrorKind::InvalidLimit);
                assert_eq!(err.text, "-1");
                assert_eq!(err.start, 25);
            },
        }
    }

    #[test]
    pub fn test_input_too_long() {
        let config = ParserConfig::new().with_max_input_length(10);

        let result = parse_select_with_config("SELECT * FROM people", &config);

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.kind, ParseErrorKind::InputTooLong);
                assert_eq!(err.start, 10);
                assert_eq!(err.end, 20);
            },
        }

        let result = parse_insert_with_config("INSERT INTO t (a) VALUES (1)", &config);
        assert!(matches!(result, Err(err) if err.kind == ParseErrorKind::InputTooLong));
    }

    #[test]
    pub fn test_empty_input() {
        let result = parse_select("   ");

        match result {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.kind, ParseErrorKind::MalformedSelect),
        }
    }

    #[test]
    pub fn test_parse_join() {
        let join = parse_join("SELECT * FROM a LEFT JOIN b ON a.id = b.a_id WHERE a.x = 1")
            .expect("Failed to parse join")
            .expect("Missing join");

        assert_eq!(join.kind, JoinKind::Left);
        assert_eq!(join.table, "b");
        assert_eq!(join.left, "a.id");
        assert_eq!(join.right, "b.a_id");
    }

    #[test]
    pub fn test_parse_join_absent() {
        let join = parse_join("SELECT * FROM a WHERE a.x = 'LEFT JOIN b ON a.id = b.id'").expect("Failed to parse join");

        assert!(join.is_none());
    }

    #[test]
    pub fn test_parse_join_second_join() {
        let result = parse_join("SELECT * FROM a INNER JOIN b ON a.id = b.id RIGHT JOIN c ON b.id = c.id");

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.kind, ParseErrorKind::MalformedJoin);
                assert_eq!(err.start, 44);
            },
        }
    }

    #[test]
    pub fn test_parse_join_unclosed_parenthesis() {
        let result = parse_join("SELECT * FROM a LEFT JOIN (b ON a.id = b.id");

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.kind, ParseErrorKind::UnbalancedDelimiter);
                assert_eq!(err.start, 26);
            },
        }
    }

    #[test]
    pub fn test_parse_statement_dispatch() {
        let select = parse_statement("select id from t").expect("Failed to parse statement");
        assert!(matches!(select, Statement::Select(query) if query.fields == ["id"]));

        let insert = parse_statement("INSERT INTO t (id) VALUES (1);").expect("Failed to parse statement");
        assert_eq!(insert.to_string(), "INSERT INTO t (id) VALUES ('1')");
        assert!(matches!(insert, Statement::Insert(query) if query.values == ["1"]));
    }

    #[test]
    pub fn test_parse_statement_malformed_supported_keyword() {
        let texts = [
            ("SELECT", ParseErrorKind::MalformedSelect),
            ("select* from t", ParseErrorKind::MalformedSelect),
            ("INSERT", ParseErrorKind::MalformedInsert),
            ("insert t (a) VALUES (1)", ParseErrorKind::MalformedInsert),
        ];

        for (text, kind) in texts {
            match parse_statement(text) {
                Ok(_) => panic!("{text}"),
                Err(err) => assert_eq!(err.kind, kind, "{text}"),
            }
        }
    }

    #[test]
    pub fn test_parse_statement_unsupported() {
        let result = Statement::try_from("  DELETE FROM t");

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.kind, ParseErrorKind::UnsupportedStatement);
                assert_eq!(err.text, "DELETE");
                assert_eq!(err.start, 2);
                assert_eq!(err.end, 8);
            },
        }
    }

    #[test]
    pub fn test_statement_json() {
        let statement = parse_statement("INSERT INTO t (id, name) VALUES (1, 'Bob') RETURNING id").expect("Failed to parse statement");

        let value: serde_json::Value = serde_json::from_str(&statement.to_json().expect("Failed to serialize statement"))
            .expect("Failed to read json");

        assert_eq!(value, json!({
            "insert": {
                "table": "t",
                "columns": ["id", "name"],
                "values": ["1", "Bob"],
                "returningColumns": ["id"]
            }
        }));

        let back: Statement = serde_json::from_value(value).expect("Failed to deserialize statement");
        assert_eq!(back, statement);
    }

    #[test]
    pub fn test_error_display() {
        let result = parse_select("SELECT a FROM t WHERE a ~ 1");

        match result {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(
                err.to_string(),
                format!("ParseError(MalformedCondition): {}\n  at [22:27] -> 'a ~ 1'", err.message)
            ),
        }
    }
}
