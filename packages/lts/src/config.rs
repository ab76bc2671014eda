use serde::{Deserialize, Serialize};

use crate::error::{LtsError, LtsResult};

/// Shape of the context window the model was compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LtsConfig {
    /// Letters of context on each side of the predicted letter.
    pub context_window: usize,
    /// Trailing feature slots after the letter context (part of speech etc.).
    pub extra_features: usize,
}

impl Default for LtsConfig {
    fn default() -> Self {
        Self {
            context_window: 4,
            extra_features: 1,
        }
    }
}

impl LtsConfig {
    pub fn validate(&self) -> LtsResult<()> {
        if self.context_window == 0 {
            return Err(LtsError::Config {
                field: "context_window".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        // feat indices are bytes and 255 marks a leaf
        if self.width() > 255 {
            return Err(LtsError::Config {
                field: "context_window".to_string(),
                reason: format!("window width {} exceeds 255", self.width()),
            });
        }
        Ok(())
    }

    /// Total number of feature slots the model can test.
    pub fn width(&self) -> usize {
        self.context_window * 2 + self.extra_features
    }
}
