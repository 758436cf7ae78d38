use serde::Deserialize;

/// Parser configuration shared by every entry point.
///
/// - `max_input_length` caps the statement size in bytes; longer input is
///   rejected before it is scanned.
/// - `enforce_insert_arity` makes INSERT fail when the column and value
///   counts differ.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Largest accepted statement, in bytes
    pub max_input_length: usize,
    /// Reject INSERT statements whose column and value lists differ in length
    pub enforce_insert_arity: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_input_length: 64 * 1024, enforce_insert_arity: true }
    }
}

impl ParserConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_input_length(mut self, max_input_length: usize) -> Self {
        self.max_input_length = max_input_length;
        self
    }

    pub fn with_insert_arity(mut self, enforce: bool) -> Self {
        self.enforce_insert_arity = enforce;
        self
    }
}
