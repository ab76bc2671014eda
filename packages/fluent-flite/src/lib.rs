//! # Fluent Flite
//!
//! Runtime core of a flite-style synthesizer: a voice context, a streaming
//! driver that turns arbitrarily long token input into audio one utterance at
//! a time, and the entry points tying in letter-to-sound prediction and voice
//! data loading.
//!
//! ```no_run
//! use fluent_flite::{Voice, text_to_speech};
//! use fluent_flite_domain::{OutputMode, SynthOutcome, Utterance, Wave};
//!
//! # fn main() -> Result<(), fluent_flite::FliteError> {
//! let synth = |utt: &mut Utterance| SynthOutcome::ok(Wave::mono(16_000, vec![0; 1600 * utt.len()]));
//! let mut voice = Voice::builder("kal", synth).build()?;
//! let report = text_to_speech("Hello world. Goodbye.", &mut voice, &"hello.wav".parse().unwrap_or(OutputMode::None))?;
//! println!("{:.2}s of audio", report.total_duration);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use fluent_flite_domain::OutputMode;
use fluent_flite_lts::LtsRules;
use fluent_flite_voxdata::VoxData;

pub mod config;
pub mod driver;
pub mod error;
pub mod output;
#[cfg(feature = "playback")]
pub mod player;
pub mod registry;
pub mod strategy;
pub mod tokens;
pub mod voice;

pub use config::{FailurePolicy, VoiceConfig};
pub use driver::{StreamReport, synthesize_stream};
pub use error::{FliteError, Result};
pub use output::WavSink;
#[cfg(feature = "playback")]
pub use player::RodioPlayer;
pub use registry::{SharedVoice, SharedVoiceRegistry, VoiceRegistry};
pub use strategy::{AudioPlayer, DefaultUttBreak, Synthesizer, UttBreak, UttPreprocess};
pub use tokens::{TextTokenStream, TokenStream, VecTokenStream};
pub use voice::{SharedUnitDatabase, Voice, VoiceBuilder};

/// Phones predicted for `word` by `rules`, merged clusters split apart.
pub fn predict_pronunciation<'r>(rules: &'r LtsRules, word: &str) -> Result<Vec<&'r str>> {
    Ok(rules.apply(word)?)
}

/// Map the voxdata file at `path` and check it belongs to `voice_name`.
pub fn load_voice_data<P: AsRef<Path>>(path: P, voice_name: &str) -> Result<VoxData> {
    Ok(VoxData::open(path, voice_name)?)
}

/// Tokenize `text` and synthesize it.
pub fn text_to_speech(text: &str, voice: &mut Voice, output: &OutputMode) -> Result<StreamReport> {
    synthesize_stream(&mut TextTokenStream::new(text), voice, output)
}

/// Tokenize the text file at `path` and synthesize it.
pub fn file_to_speech<P: AsRef<Path>>(
    path: P,
    voice: &mut Voice,
    output: &OutputMode,
) -> Result<StreamReport> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading text file");
    synthesize_stream(&mut TextTokenStream::open(path)?, voice, output)
}
