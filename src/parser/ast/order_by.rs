use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parser::{ast::{FieldListParser, ListContext}, ClauseText, ParseError, ParseErrorKind, QueryParser};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn from_keyword(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("ASC") {
            Some(OrderDirection::Asc)
        } else if word.eq_ignore_ascii_case("DESC") {
            Some(OrderDirection::Desc)
        } else {
            None
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Asc => write!(f, "ASC"),
            OrderDirection::Desc => write!(f, "DESC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSpec {
    pub field_name: String,
    pub direction: OrderDirection,
}

impl OrderSpec {
    /// `<field> [ASC|DESC]`; each entry defaults to ascending on its own.
    pub fn parse_single(item: &ClauseText) -> Result<Self, ParseError> {
        let (field, direction) = match item.text.rsplit_once(char::is_whitespace) {
            Some((field, word)) => match OrderDirection::from_keyword(word) {
                Some(direction) => (field.trim_end(), direction),
                None => (item.text.as_str(), OrderDirection::Asc),
            },
            None => (item.text.as_str(), OrderDirection::Asc),
        };

        if Self::has_top_level_whitespace(ClauseText::new(field, item.start).parser())? {
            return ParseError::whole(
                ParseErrorKind::MalformedOrderBy,
                "Expected '<field> [ASC|DESC]'",
                &item.parser(),
            ).err();
        }

        Ok(Self { field_name: field.to_string(), direction })
    }

    pub fn parse(body: &ClauseText) -> Result<Vec<Self>, ParseError> {
        FieldListParser::split(body, ListContext::OrderBy)?
            .iter()
            .map(Self::parse_single)
            .collect()
    }

    fn has_top_level_whitespace(mut parser: QueryParser) -> Result<bool, ParseError> {
        let mut depth = 0usize;
        while !parser.eof() {
            let current = parser.current();
            if QueryParser::is_quote(current) {
                parser.skip_quoted()?;
                continue;
            }

            match current {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                ch if depth == 0 && ch.is_whitespace() => return Ok(true),
                _ => {},
            }
            parser.next();
        }

        Ok(false)
    }
}

impl fmt::Display for OrderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field_name, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{ast::{OrderDirection, OrderSpec}, ClauseText, ParseErrorKind};

    fn parse(text: &str) -> Vec<OrderSpec> {
        OrderSpec::parse(&ClauseText::new(text, 0)).expect("Failed to parse order by")
    }

    fn spec(field_name: &str, direction: OrderDirection) -> OrderSpec {
        OrderSpec { field_name: field_name.to_string(), direction }
    }

    #[test]
    pub fn test_order_by_single() {
        assert_eq!(parse("tableA.columnA"), [spec("tableA.columnA", OrderDirection::Asc)]);
        assert_eq!(parse("columnA desc"), [spec("columnA", OrderDirection::Desc)]);
    }

    #[test]
    pub fn test_order_by_default_is_per_field() {
        assert_eq!(
            parse("age DESC, name"),
            [spec("age", OrderDirection::Desc), spec("name", OrderDirection::Asc)]
        );
    }

    #[test]
    pub fn test_order_by_four_with_spaces() {
        assert_eq!(
            parse("columnA DESC , columnB ASC , columnC , columnD"),
            [
                spec("columnA", OrderDirection::Desc),
                spec("columnB", OrderDirection::Asc),
                spec("columnC", OrderDirection::Asc),
                spec("columnD", OrderDirection::Asc),
            ]
        );
    }

    #[test]
    pub fn test_order_by_expression() {
        assert_eq!(parse("COUNT(a, b)  DESC"), [spec("COUNT(a, b)", OrderDirection::Desc)]);
        assert_eq!(parse("SUM( price )"), [spec("SUM( price )", OrderDirection::Asc)]);
    }

    #[test]
    pub fn test_order_by_wrong_direction() {
        let result = OrderSpec::parse(&ClauseText::new("name, age DOWN", 9));

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.kind, ParseErrorKind::MalformedOrderBy);
                assert_eq!(err.text, "age DOWN");
                assert_eq!(err.start, 15);
            },
        }
    }

    #[test]
    pub fn test_order_by_two_words_before_direction() {
        let result = OrderSpec::parse(&ClauseText::new("a b DESC", 9));

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.kind, ParseErrorKind::MalformedOrderBy);
                assert_eq!(err.text, "a b DESC");
                assert_eq!(err.start, 9);
            },
        }
    }

    #[test]
    pub fn test_order_by_trailing_comma() {
        let result = OrderSpec::parse(&ClauseText::new("name,", 0));

        match result {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.kind, ParseErrorKind::MalformedOrderBy),
        }
    }

    #[test]
    pub fn test_display() {
        assert_eq!(spec("age", OrderDirection::Desc).to_string(), "age DESC");
    }
}
