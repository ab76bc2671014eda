//! Error carried by a failed synthesis step.
use thiserror::Error;

/// Failure reported by a synthesizer or preprocessing hook for one utterance.
///
/// None of these end a streaming run on their own; the driver applies its
/// failure policy. Cooperative cancellation is not an error and is reported
/// through [`crate::SynthOutcome::Interrupted`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoiceError {
    /// The utterance could not be synthesized by the back end.
    #[error("synthesis: {0}")]
    Synthesis(String),
    /// The utterance holds nothing that can be spoken.
    #[error("not synthesizable: {0}")]
    NotSynthesizable(String),
    /// Letter-to-sound prediction failed for a word in the utterance.
    #[error("pronunciation: {0}")]
    Pronunciation(String),
    /// Voice data needed for synthesis is missing or unloaded.
    #[error("voice data: {0}")]
    VoiceData(String),
    /// Configuration-related failure reason.
    #[error("configuration: {0}")]
    Configuration(String),
}
