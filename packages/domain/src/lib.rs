//! # Fluent Flite Domain
//!
//! Shared domain objects for the fluent-flite synthesis core.
//!
//! These types sit between the streaming driver, the synthesizers it drives
//! and the output sinks, so none of those crates depend on each other.

pub mod output_mode;
pub mod synth_outcome;
pub mod token;
pub mod utterance;
pub mod voice_error;
pub mod voice_id;
pub mod wave;

// Re-export core types
pub use output_mode::OutputMode;
pub use synth_outcome::SynthOutcome;
pub use token::Token;
pub use utterance::{FeatureValue, Utterance};
pub use voice_error::VoiceError;
pub use voice_id::VoiceId;
pub use wave::Wave;

/// Prelude module containing commonly used types.
pub mod prelude {
    pub use crate::{
        FeatureValue, OutputMode, SynthOutcome, Token, Utterance, VoiceError, VoiceId, Wave,
    };
}
