//! Names a voice can be selected by.
use serde::{Deserialize, Serialize};

/// Short name plus the optional longer names a voice is known under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceId {
    /// Short name, e.g. `kal`. Also the name written into voxdata files.
    pub name: String,
    /// Descriptive name, e.g. `cmu_us_kal`.
    pub long_name: Option<String>,
    /// Path or URL the voice was loaded from.
    pub pathname: Option<String>,
}

impl VoiceId {
    /// Create a new voice identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            long_name: None,
            pathname: None,
        }
    }

    pub fn with_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.long_name = Some(long_name.into());
        self
    }

    pub fn with_pathname(mut self, pathname: impl Into<String>) -> Self {
        self.pathname = Some(pathname.into());
        self
    }

    /// Get the short name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `query` names this voice by short name, long name or pathname.
    pub fn matches(&self, query: &str) -> bool {
        self.name == query
            || self.long_name.as_deref() == Some(query)
            || self.pathname.as_deref() == Some(query)
    }
}

impl From<&str> for VoiceId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for VoiceId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
