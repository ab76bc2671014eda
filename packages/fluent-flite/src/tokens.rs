//! Token sources for the streaming driver.
//!
//! Real text normalization happens upstream; [`TextTokenStream`] is the small
//! whitespace tokenizer flite ships with, enough to drive a voice from plain
//! text or a file.

use std::path::Path;

use fluent_flite_domain::Token;

use crate::error::{FliteError, Result};

/// Characters that separate tokens.
pub const WHITESPACE: &str = " \t\n\r";
/// Punctuation peeled off the front of a token.
pub const PREPUNCTUATION: &str = "\"'`({[";
/// Punctuation peeled off the end of a token.
pub const POSTPUNCTUATION: &str = "\"'`.,:;!?(){}[]";

/// A pull-based source of tokens.
///
/// `next_token` returns `None` once the source is exhausted. A source may
/// return [`Token::sentinel`] to force an utterance boundary.
pub trait TokenStream: Send {
    fn next_token(&mut self) -> Option<Token>;

    /// Whether no further token will be produced.
    fn is_eof(&self) -> bool;

    /// Current position of the cursor, in the source's own units.
    fn position(&self) -> u64;

    /// Move the cursor to `pos`, as returned by [`position`](Self::position).
    fn seek(&mut self, pos: u64) -> Result<()>;
}

/// Tokens from memory. Positions are token indices.
#[derive(Debug, Clone, Default)]
pub struct VecTokenStream {
    tokens: Vec<Token>,
    next: usize,
    pulled: usize,
}

impl VecTokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            next: 0,
            pulled: 0,
        }
    }

    /// One bare token per word.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(words.into_iter().map(Token::new).collect())
    }

    /// Number of tokens handed out so far, including repeats after a seek.
    pub fn pulled(&self) -> usize {
        self.pulled
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.next
    }
}

impl TokenStream for VecTokenStream {
    fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.next)?.clone();
        self.next += 1;
        self.pulled += 1;
        Some(token)
    }

    fn is_eof(&self) -> bool {
        self.next >= self.tokens.len()
    }

    fn position(&self) -> u64 {
        self.next as u64
    }

    fn seek(&mut self, pos: u64) -> Result<()> {
        match usize::try_from(pos) {
            Ok(pos) if pos <= self.tokens.len() => {
                self.next = pos;
                Ok(())
            }
            _ => Err(FliteError::TokenStream(format!(
                "seek to token {pos} past end ({} tokens)",
                self.tokens.len()
            ))),
        }
    }
}

/// Whitespace tokenizer over owned text. Positions are byte offsets.
#[derive(Debug, Clone)]
pub struct TextTokenStream {
    text: String,
    pos: usize,
    line: u32,
}

impl TextTokenStream {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: 0,
            line: 1,
        }
    }

    /// Read a whole UTF-8 text file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }

    /// 1-based line the cursor is on.
    pub fn line_number(&self) -> u32 {
        self.line
    }
}

impl TokenStream for TextTokenStream {
    fn next_token(&mut self) -> Option<Token> {
        let rest = &self.text[self.pos..];
        let ws_len = rest
            .find(|c: char| !WHITESPACE.contains(c))
            .unwrap_or(rest.len());
        let whitespace = &rest[..ws_len];
        self.line += whitespace.matches('\n').count() as u32;

        let start = self.pos + ws_len;
        let rest = &self.text[start..];
        if rest.is_empty() {
            self.pos = start;
            return None;
        }
        let raw_len = rest
            .find(|c: char| WHITESPACE.contains(c))
            .unwrap_or(rest.len());
        let raw = &rest[..raw_len];

        let (prepunctuation, name, punctuation) = split_punctuation(raw);
        let token = Token::new(name)
            .with_whitespace(whitespace)
            .with_prepunctuation(prepunctuation)
            .with_punctuation(punctuation)
            .at(start as u64, self.line);

        self.pos = start + raw_len;
        Some(token)
    }

    fn is_eof(&self) -> bool {
        self.text[self.pos..]
            .trim_start_matches(|c: char| WHITESPACE.contains(c))
            .is_empty()
    }

    fn position(&self) -> u64 {
        self.pos as u64
    }

    fn seek(&mut self, pos: u64) -> Result<()> {
        let pos = usize::try_from(pos)
            .ok()
            .filter(|&p| self.text.is_char_boundary(p))
            .ok_or_else(|| {
                FliteError::TokenStream(format!(
                    "seek to byte {pos} is outside the text or splits a character"
                ))
            })?;
        self.pos = pos;
        self.line = 1 + self.text[..pos].matches('\n').count() as u32;
        Ok(())
    }
}

/// Peel pre- and post-punctuation off a raw token. The name always keeps at
/// least one character, so a token made only of punctuation stays readable.
fn split_punctuation(raw: &str) -> (&str, &str, &str) {
    let pre_len = raw
        .char_indices()
        .find(|&(_, c)| !PREPUNCTUATION.contains(c))
        .map_or(raw.len(), |(i, _)| i);
    let pre_len = if pre_len == raw.len() {
        raw.char_indices().last().map_or(0, |(i, _)| i)
    } else {
        pre_len
    };
    let (pre, body) = raw.split_at(pre_len);

    let name_len = body
        .trim_end_matches(|c: char| POSTPUNCTUATION.contains(c))
        .len();
    let name_len = if name_len == 0 {
        body.chars().next().map_or(0, char::len_utf8)
    } else {
        name_len
    };
    let (name, post) = body.split_at(name_len);
    (pre, name, post)
}
