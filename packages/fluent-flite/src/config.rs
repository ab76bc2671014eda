//! Voice configuration.
//!
//! Every knob of a streaming run lives here so a voice can be described in a
//! TOML file:
//!
//! ```toml
//! token_cap = 500
//! failure_policy = "skip"
//! sample_rate = 16000
//! file_start_position = 0
//! voxdata_dir = "voices"
//! lts_model = "lang/cmu_lts_model.bin"
//!
//! [lts]
//! context_window = 4
//! extra_features = 1
//! ```

use std::path::{Path, PathBuf};

use fluent_flite_lts::LtsConfig;
use serde::{Deserialize, Serialize};

use crate::error::{FliteError, Result};

/// Chunk cap flite has always used.
pub const DEFAULT_TOKEN_CAP: usize = 500;

/// Sample rate of the empty WAV written before a file run.
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

/// What the driver does when the synthesizer fails on one chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the failure and continue with the next chunk.
    #[default]
    Skip,
    /// End the run after the failed chunk.
    Stop,
}

/// Per-voice settings for the streaming driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Tokens after which a chunk is closed regardless of the break strategy.
    pub token_cap: usize,
    pub failure_policy: FailurePolicy,
    /// Sample rate of the primed output file.
    pub sample_rate: u32,
    /// Offset the token stream is moved to before the first token is pulled.
    pub file_start_position: u64,
    /// Directory holding `<voice>.voxdata`, mapped when the voice is built.
    pub voxdata_dir: Option<PathBuf>,
    /// Compiled CMU letter-to-sound model, loaded when the voice is built.
    pub lts_model: Option<PathBuf>,
    pub lts: LtsConfig,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            token_cap: DEFAULT_TOKEN_CAP,
            failure_policy: FailurePolicy::default(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            file_start_position: 0,
            voxdata_dir: None,
            lts_model: None,
            lts: LtsConfig::default(),
        }
    }
}

impl VoiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token_cap(mut self, token_cap: usize) -> Self {
        self.token_cap = token_cap;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_file_start_position(mut self, pos: u64) -> Self {
        self.file_start_position = pos;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.token_cap == 0 {
            return Err(config_error("token_cap", "must be at least 1"));
        }
        if self.sample_rate == 0 {
            return Err(config_error("sample_rate", "must be greater than 0"));
        }
        self.lts.validate()?;
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: VoiceConfig =
            toml::from_str(content).map_err(|e| config_error("deserialization", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded voice config");
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| config_error("serialization", e))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn config_error(field: &str, reason: impl ToString) -> FliteError {
    FliteError::Config {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
