use crate::parser::QueryParser;

/// Case-insensitive keyword matcher. Multi-word keywords (`ORDER BY`) accept
/// any run of whitespace between their words.
#[derive(Debug, Default)]
pub struct WordComparer {
    words: Vec<Vec<char>>,
    whitespace_postfix: bool,
    eof: bool,
    delimiter: Option<char>,
}

impl WordComparer {
    pub fn new(word: &str) -> Self {
        Self {
            words: word
                .split_whitespace()
                .map(|part| part.to_uppercase().chars().collect())
                .collect(),
            whitespace_postfix: false,
            eof: false,
            delimiter: None,
        }
    }

    pub fn is_block_delimiter(ch: char) -> bool {
        ch.is_whitespace()
    }

    /// Number of characters the keyword spans at `start`, if it matches there.
    pub fn matched_length_at(&self, parser: &QueryParser, start: usize) -> Option<usize> {
        let mut position = start;

        for (index, word) in self.words.iter().enumerate() {
            if index > 0 {
                let gap = position;
                while parser.char_at(position).is_some_and(Self::is_block_delimiter) {
                    position += 1;
                }
                if position == gap {
                    return None;
                }
            }

            for expected in word {
                match parser.char_at(position) {
                    Some(ch) if ch.to_ascii_uppercase() == *expected => position += 1,
                    _ => return None,
                }
            }
        }

        let length = position - start;
        let Some(next) = parser.char_at(position) else {
            return self.eof.then_some(length);
        };

        if !self.whitespace_postfix && self.delimiter.is_none() {
            return Some(length);
        }

        if self.whitespace_postfix && Self::is_block_delimiter(next) {
            return Some(length);
        }

        if self.delimiter == Some(next) {
            return Some(length);
        }

        None
    }

    pub fn matched_length(&self, parser: &QueryParser) -> Option<usize> {
        self.matched_length_at(parser, parser.position)
    }

    pub fn compare(&self, parser: &QueryParser) -> bool {
        self.matched_length(parser).is_some()
    }

    pub fn with_eof(mut self) -> Self { self.eof = true; self }
    pub fn with_whitespace_postfix(mut self) -> Self { self.whitespace_postfix = true; self }
    pub fn with_delimiter(mut self, delimiter: char) -> Self { self.delimiter = Some(delimiter); self }
}

#[cfg(test)]
mod tests {
    use crate::parser::{QueryParser, WordComparer};

    #[test]
    pub fn test_compare_case_insensitive() {
        let comparer = WordComparer::new("WHERE").with_whitespace_postfix();
        let parser = QueryParser::new("where a = 1");

        assert_eq!(comparer.matched_length(&parser), Some(5));
    }

    #[test]
    pub fn test_compare_requires_postfix() {
        let comparer = WordComparer::new("LIMIT").with_whitespace_postfix();
        let parser = QueryParser::new("limit_value = 1");

        assert!(!comparer.compare(&parser));
    }

    #[test]
    pub fn test_compare_multi_word_with_spaces() {
        let comparer = WordComparer::new("ORDER BY").with_whitespace_postfix();
        let parser = QueryParser::new("ORDER \t BY name");

        assert_eq!(comparer.matched_length(&parser), Some(10));
    }

    #[test]
    pub fn test_compare_multi_word_needs_gap() {
        let comparer = WordComparer::new("GROUP BY").with_whitespace_postfix();
        let parser = QueryParser::new("GROUPBY name");

        assert!(!comparer.compare(&parser));
    }

    #[test]
    pub fn test_compare_eof() {
        let with_eof = WordComparer::new("DESC").with_whitespace_postfix().with_eof();
        let without_eof = WordComparer::new("DESC").with_whitespace_postfix();
        let parser = QueryParser::new("desc");

        assert!(with_eof.compare(&parser));
        assert!(!without_eof.compare(&parser));
    }

    #[test]
    pub fn test_compare_delimiter() {
        let comparer = WordComparer::new("VALUES").with_whitespace_postfix().with_delimiter('(');
        let parser = QueryParser::new("VALUES(1)");

        assert!(comparer.compare(&parser));
    }

    #[test]
    pub fn test_matched_length_at() {
        let comparer = WordComparer::new("INSERT INTO").with_whitespace_postfix();
        let parser = QueryParser::new("  insert  into t");

        assert_eq!(comparer.matched_length_at(&parser, 2), Some(12));
        assert!(!comparer.compare(&parser));
    }
}
