use crate::parser::{ClauseText, ParseError, ParseErrorKind};

pub struct LimitParser;

impl LimitParser {
    /// A LIMIT payload must be a plain non-negative integer; anything else is
    /// an error rather than "no limit".
    pub fn parse(body: &ClauseText) -> Result<u64, ParseError> {
        let digits_only = !body.is_empty() && body.text.chars().all(|ch| ch.is_ascii_digit());

        match body.text.parse::<u64>() {
            Ok(limit) if digits_only => Ok(limit),
            _ => ParseError::whole(
                ParseErrorKind::InvalidLimit,
                "Expected a non-negative integer after LIMIT",
                &body.parser(),
            ).err(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{ast::LimitParser, ClauseText, ParseErrorKind};

    #[test]
    pub fn test_limit() {
        assert_eq!(LimitParser::parse(&ClauseText::new("10", 0)), Ok(10));
        assert_eq!(LimitParser::parse(&ClauseText::new("0", 0)), Ok(0));
    }

    #[test]
    pub fn test_limit_wrong() {
        for text in ["AB", "-1", "+3", "1.5", "10 20", "", "99999999999999999999999"] {
            let result = LimitParser::parse(&ClauseText::new(text, 16));

            match result {
                Ok(_) => panic!("{text}"),
                Err(err) => {
                    assert_eq!(err.kind, ParseErrorKind::InvalidLimit);
                    assert_eq!(err.text, text);
                    assert_eq!(err.start, 16);
                },
            }
        }
    }
}
