use crate::parser::{ast::{FieldListParser, ListContext}, ClauseText, ParseError};

pub struct GroupBy;

impl GroupBy {
    pub fn parse(body: &ClauseText) -> Result<Vec<String>, ParseError> {
        FieldListParser::parse(body, ListContext::GroupBy)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{ast::GroupBy, ClauseText, ParseErrorKind};

    #[test]
    pub fn test_group_by() {
        let result = GroupBy::parse(&ClauseText::new("columnA", 0)).expect("Failed to parse group by");

        assert_eq!(result, ["columnA"]);
    }

    #[test]
    pub fn test_group_by_four_with_spaces() {
        let result = GroupBy::parse(&ClauseText::new("columnA , t.columnB , columnC , columnD", 0))
            .expect("Failed to parse group by");

        assert_eq!(result, ["columnA", "t.columnB", "columnC", "columnD"]);
    }

    #[test]
    pub fn test_group_by_trailing_comma() {
        let result = GroupBy::parse(&ClauseText::new("columnA,", 50));

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.kind, ParseErrorKind::MalformedGroupBy);
                assert_eq!(err.start, 57);
            },
        }
    }
}
