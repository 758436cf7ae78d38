use crate::parser::QueryParser;

/// A trimmed piece of a statement together with the byte offset where it
/// starts in the statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseText {
    pub text: String,
    pub start: usize,
}

impl ClauseText {
    pub fn new(text: &str, start: usize) -> Self {
        Self { text: text.to_string(), start }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// A fresh parser over this piece, reporting errors at statement offsets.
    pub fn parser(&self) -> QueryParser {
        QueryParser::with_offset(&self.text, self.start)
    }
}
