//! Result of synthesizing one utterance.
//!
//! Cancellation is a first-class variant rather than a flag hidden in the
//! utterance, so the driver can match on it directly.

use crate::{VoiceError, Wave};

/// What a synthesizer produced for one utterance.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthOutcome {
    /// Audio for the whole utterance.
    Completed(Wave),
    /// The synthesizer was asked to stop. Any partial audio is discarded and
    /// the streaming run ends.
    Interrupted,
    /// The utterance failed; the run may continue with the next one.
    Failed(VoiceError),
}

impl SynthOutcome {
    /// Create a completed outcome
    pub fn ok(wave: Wave) -> Self {
        Self::Completed(wave)
    }

    /// Create a failed outcome
    pub fn err(error: VoiceError) -> Self {
        Self::Failed(error)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted)
    }

    /// Get the wave if synthesis completed
    pub fn wave(&self) -> Option<&Wave> {
        match self {
            Self::Completed(w) => Some(w),
            _ => None,
        }
    }

    /// Get the error if synthesis failed
    pub fn error(&self) -> Option<&VoiceError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Wave> for SynthOutcome {
    fn from(wave: Wave) -> Self {
        Self::ok(wave)
    }
}

impl From<VoiceError> for SynthOutcome {
    fn from(error: VoiceError) -> Self {
        Self::err(error)
    }
}

impl From<Result<Wave, VoiceError>> for SynthOutcome {
    fn from(result: Result<Wave, VoiceError>) -> Self {
        match result {
            Ok(wave) => Self::ok(wave),
            Err(error) => Self::err(error),
        }
    }
}
