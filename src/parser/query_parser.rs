use crate::parser::{ClauseText, ParseError, ParseErrorKind, QueryComparers, WordComparer};

/// Character cursor over one statement, or over one clause cut out of it.
///
/// Positions are character indexes; `byte_offset` maps them back to byte
/// offsets in the original statement so errors point at the right place even
/// when the parser only sees a clause.
#[derive(Debug, Default)]
pub struct QueryParser {
    pub position: usize,
    pub length: usize,
    pub text_v: Vec<char>,
    pub text: String,

    pub comparers: QueryComparers,

    offset: usize,
    byte_positions: Vec<usize>,
}

impl QueryParser {
    pub fn new(query: &str) -> Self {
        Self::with_offset(query, 0)
    }

    /// Parser over `query`, which starts `offset` bytes into the full statement.
    pub fn with_offset(query: &str, offset: usize) -> Self {
        let text_v: Vec<char> = query.chars().collect();
        let mut byte_positions: Vec<usize> = query.char_indices().map(|(index, _)| index).collect();
        byte_positions.push(query.len());

        Self {
            position: 0,
            length: text_v.len(),
            text_v,
            text: query.to_string(),
            comparers: QueryComparers::new(),
            offset,
            byte_positions,
        }
    }

    pub fn eof(&self) -> bool {
        self.position >= self.length
    }

    pub fn current(&self) -> char {
        self.char_at(self.position).unwrap_or('\0')
    }

    pub fn char_at(&self, position: usize) -> Option<char> {
        self.text_v.get(position).copied()
    }

    pub fn peek(&self, ahead: usize) -> char {
        self.char_at(self.position + ahead).unwrap_or('\0')
    }

    pub fn next(&mut self) {
        if self.position < self.length {
            self.position += 1;
        }
    }

    pub fn next_non_whitespace(&mut self) {
        while self.current().is_whitespace() {
            self.next();
        }
    }

    pub fn jump(&mut self, ahead: usize) {
        self.position = (self.position + ahead).min(self.length);
    }

    /// Moves past the keyword picked from the comparers when it matches at the
    /// cursor.
    pub fn consume(&mut self, keyword: fn(&QueryComparers) -> &WordComparer) -> bool {
        match keyword(&self.comparers).matched_length(self) {
            Some(length) => {
                self.jump(length);
                true
            },
            None => false,
        }
    }

    /// True when the character right before the cursor is whitespace.
    pub fn follows_whitespace(&self) -> bool {
        self.position > 0 && self.text_v[self.position - 1].is_whitespace()
    }

    pub fn is_quote(ch: char) -> bool {
        ch == '\'' || ch == '"'
    }

    /// Moves past the quoted literal starting at the cursor. A doubled quote
    /// inside the literal is an escaped quote.
    pub fn skip_quoted(&mut self) -> Result<(), ParseError> {
        let pivot = self.position;
        let quote = self.current();
        self.next();

        while !self.eof() {
            if self.current() == quote {
                if self.peek(1) == quote {
                    self.jump(2);
                    continue;
                }
                self.next();
                return Ok(());
            }
            self.next();
        }

        ParseError::new(ParseErrorKind::UnbalancedDelimiter, "Unterminated quoted literal", pivot, self).err()
    }

    pub fn byte_offset(&self, position: usize) -> usize {
        self.offset + self.byte_positions[position.min(self.length)]
    }

    pub fn text_from_range(&self, start: usize, end: usize) -> String {
        let end = end.min(self.length);
        let start = start.min(end);
        self.text_v[start..end].iter().collect()
    }

    pub fn text_from_pivot(&self, pivot: usize) -> String {
        self.text_from_range(pivot, self.position)
    }

    /// Cuts `start..end` out of the text, trimmed, keeping track of where it
    /// begins in the full statement.
    pub fn clause(&self, start: usize, end: usize) -> ClauseText {
        let mut end = end.min(self.length);
        let mut start = start.min(end);
        while start < end && self.text_v[start].is_whitespace() {
            start += 1;
        }
        while end > start && self.text_v[end - 1].is_whitespace() {
            end -= 1;
        }

        ClauseText::new(&self.text_from_range(start, end), self.byte_offset(start))
    }

    /// The text from `pivot` to the end, trimmed.
    pub fn rest(&self, pivot: usize) -> ClauseText {
        self.clause(pivot, self.length)
    }
}
