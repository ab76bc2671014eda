//! Text tokens as produced by a tokenizer.
use serde::{Deserialize, Serialize};

/// One whitespace-delimited token with the text that surrounded it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token text with punctuation removed. Empty for the sentinel token.
    pub name: String,
    /// Whitespace that preceded the token.
    pub whitespace: String,
    /// Punctuation stripped from the front of the token.
    pub prepunctuation: String,
    /// Punctuation stripped from the end of the token.
    pub punctuation: String,
    /// Byte offset of the token start (including prepunctuation) in the source.
    pub file_pos: u64,
    /// 1-based line number of the token in the source.
    pub line_number: u32,
}

impl Token {
    /// Create a bare token with no surrounding text.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The empty token, used by sources to force an utterance boundary.
    pub fn sentinel() -> Self {
        Self::default()
    }

    /// Whether this is the empty sentinel token.
    pub fn is_sentinel(&self) -> bool {
        self.name.is_empty()
    }

    pub fn with_whitespace(mut self, whitespace: impl Into<String>) -> Self {
        self.whitespace = whitespace.into();
        self
    }

    pub fn with_prepunctuation(mut self, prepunctuation: impl Into<String>) -> Self {
        self.prepunctuation = prepunctuation.into();
        self
    }

    pub fn with_punctuation(mut self, punctuation: impl Into<String>) -> Self {
        self.punctuation = punctuation.into();
        self
    }

    pub fn at(mut self, file_pos: u64, line_number: u32) -> Self {
        self.file_pos = file_pos;
        self.line_number = line_number;
        self
    }
}
