//! Unified error for the synthesis core.
use fluent_flite_lts::LtsError;
use fluent_flite_voxdata::VoxDataError;
use thiserror::Error;

/// Everything that can end a call into this crate.
///
/// Per-utterance synthesis failures are not here: they come back from the
/// synthesizer as [`fluent_flite_domain::SynthOutcome::Failed`] and are handled
/// by the driver's failure policy.
#[derive(Debug, Error)]
pub enum FliteError {
    /// Letter-to-sound rules are corrupt or could not be loaded.
    #[error("lts: {0}")]
    Lts(#[from] LtsError),

    /// Voice data file was refused.
    #[error("voxdata: {0}")]
    VoxData(#[from] VoxDataError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Output WAV file could not be created or appended.
    #[error("wav: {0}")]
    Wav(#[from] hound::Error),

    /// Audio does not match the format of the output file.
    #[error("output format: {0}")]
    OutputFormat(String),

    #[error("playback: {0}")]
    Playback(String),

    #[error("token stream: {0}")]
    TokenStream(String),

    /// Configuration-related failure reason.
    #[error("configuration: {field}: {reason}")]
    Config { field: String, reason: String },
}

pub type Result<T> = std::result::Result<T, FliteError>;
