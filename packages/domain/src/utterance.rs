//! Utterance (chunk) assembled by the streaming driver.
//!
//! An utterance is an ordered, append-only run of [`Token`]s that is handed to
//! a synthesizer as one unit. It carries a small set of typed features so hooks
//! can annotate it without a dynamic value type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Token;

/// Value of an utterance feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureValue {
    Int(i64),
    Float(f32),
    Str(String),
}

impl From<i64> for FeatureValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for FeatureValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Ordered group of tokens synthesized together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    tokens: Vec<Token>,
    features: BTreeMap<String, FeatureValue>,
}

impl Utterance {
    /// Create an empty utterance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an utterance from already collected tokens.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            features: BTreeMap::new(),
        }
    }

    /// Append a token at the end.
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Last token appended, if any.
    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Set a feature, replacing any previous value.
    pub fn set_feature(&mut self, name: impl Into<String>, value: impl Into<FeatureValue>) {
        self.features.insert(name.into(), value.into());
    }

    pub fn feature(&self, name: &str) -> Option<&FeatureValue> {
        self.features.get(name)
    }

    /// Rebuild the source text of the utterance from token names and the
    /// whitespace and punctuation recorded with them.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, t) in self.tokens.iter().enumerate() {
            if i > 0 {
                if t.whitespace.is_empty() {
                    out.push(' ');
                } else {
                    out.push_str(&t.whitespace);
                }
            }
            out.push_str(&t.prepunctuation);
            out.push_str(&t.name);
            out.push_str(&t.punctuation);
        }
        out
    }
}
