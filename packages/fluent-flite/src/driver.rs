//! Streaming synthesis driver.
//!
//! A run pulls tokens one at a time, groups them into chunks, and hands each
//! closed chunk to the voice's synthesizer before the next token is read, so
//! memory stays bounded whatever the length of the input.
//!
//! ```text
//! Collecting ──close──▶ Synthesizing ──wave──▶ Emitting ──▶ Draining ──▶ Collecting
//!     │                      │ drop / skip ─────────────────▲
//!     ▼ exhausted            ▼ interrupted / stop
//!    Done ◀──────────────── Done
//! ```

use fluent_flite_domain::{OutputMode, SynthOutcome, Utterance, Wave};
use serde::{Deserialize, Serialize};

use crate::config::FailurePolicy;
use crate::error::{FliteError, Result};
use crate::output::WavSink;
use crate::tokens::TokenStream;
use crate::voice::Voice;

/// What a finished run did.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamReport {
    /// Seconds of audio produced, summed over synthesized chunks.
    pub total_duration: f32,
    pub chunks_synthesized: usize,
    /// Chunks the synthesizer failed on and the run went past.
    pub chunks_skipped: usize,
    /// Chunks the preprocess strategy rejected.
    pub chunks_dropped: usize,
    /// Whether the synthesizer asked for the run to stop.
    pub interrupted: bool,
    /// Set when [`FailurePolicy::Stop`] ended the run on a failed chunk.
    pub stopped_on_failure: bool,
}

#[derive(Debug)]
enum DriverState {
    Collecting,
    Synthesizing(Utterance),
    Emitting(Wave),
    Draining,
    Done,
}

/// Where emitted waves go for the length of one run.
enum Sink {
    Play,
    Discard,
    File(WavSink),
}

/// Synthesize everything `tokens` yields with `voice`, sending audio to
/// `output`.
///
/// Chunk-level synthesis failures follow the voice's
/// [`FailurePolicy`]. Failing to prime or append the output file, or to play
/// audio, ends the run with an error.
pub fn synthesize_stream(
    tokens: &mut dyn TokenStream,
    voice: &mut Voice,
    output: &OutputMode,
) -> Result<StreamReport> {
    let config = voice.config.clone();
    config.validate()?;

    let mut sink = match output {
        OutputMode::Play if voice.player.is_none() => {
            return Err(FliteError::Playback(format!(
                "voice {} has no audio player",
                voice.name()
            )));
        }
        OutputMode::Play => Sink::Play,
        OutputMode::Stream | OutputMode::None => Sink::Discard,
        // the file exists before the first token is pulled
        OutputMode::File(path) => Sink::File(WavSink::prime(path, config.sample_rate)?),
    };

    if config.file_start_position > 0 {
        tokens.seek(config.file_start_position)?;
    }

    tracing::info!(
        voice = voice.name(),
        output = %output,
        token_cap = config.token_cap,
        "streaming synthesis started"
    );

    let mut report = StreamReport::default();
    let mut chunk = Utterance::new();
    let mut state = DriverState::Collecting;

    loop {
        state = match state {
            DriverState::Collecting => {
                if chunk.len() >= config.token_cap {
                    DriverState::Synthesizing(std::mem::take(&mut chunk))
                } else if chunk.is_empty() && tokens.is_eof() {
                    DriverState::Done
                } else {
                    match tokens.next_token() {
                        None if chunk.is_empty() => DriverState::Done,
                        None => DriverState::Synthesizing(std::mem::take(&mut chunk)),
                        Some(token) if token.is_sentinel() => {
                            if chunk.is_empty() {
                                DriverState::Collecting
                            } else {
                                DriverState::Synthesizing(std::mem::take(&mut chunk))
                            }
                        }
                        Some(token) => {
                            let boundary = !chunk.is_empty()
                                && voice.utt_break.should_break(&*tokens, &token, &chunk);
                            if boundary {
                                let closed = std::mem::take(&mut chunk);
                                chunk.push(token);
                                DriverState::Synthesizing(closed)
                            } else {
                                chunk.push(token);
                                DriverState::Collecting
                            }
                        }
                    }
                }
            }

            DriverState::Synthesizing(utt) => {
                let tokens_in_chunk = utt.len();
                let utt = match voice.preprocess.as_mut() {
                    Some(preprocess) => preprocess.preprocess(utt),
                    None => Some(utt),
                };
                match utt {
                    None => {
                        tracing::debug!(tokens = tokens_in_chunk, "chunk dropped by preprocess");
                        report.chunks_dropped += 1;
                        DriverState::Draining
                    }
                    Some(mut utt) => match voice.synthesizer.synthesize(&mut utt) {
                        SynthOutcome::Completed(wave) => DriverState::Emitting(wave),
                        SynthOutcome::Interrupted => {
                            tracing::info!(tokens = tokens_in_chunk, "synthesis interrupted");
                            report.interrupted = true;
                            DriverState::Done
                        }
                        SynthOutcome::Failed(error) => {
                            tracing::warn!(
                                %error,
                                tokens = tokens_in_chunk,
                                policy = ?config.failure_policy,
                                "chunk synthesis failed"
                            );
                            match config.failure_policy {
                                FailurePolicy::Skip => {
                                    report.chunks_skipped += 1;
                                    DriverState::Draining
                                }
                                FailurePolicy::Stop => {
                                    report.stopped_on_failure = true;
                                    DriverState::Done
                                }
                            }
                        }
                    },
                }
            }

            DriverState::Emitting(wave) => {
                let duration = wave.duration_secs();
                emit(&mut sink, voice, &wave).inspect_err(|error| {
                    tracing::error!(%error, "failed to emit audio");
                })?;
                report.total_duration += duration;
                report.chunks_synthesized += 1;
                tracing::debug!(
                    frames = wave.num_frames(),
                    sample_rate = wave.sample_rate,
                    duration,
                    "chunk emitted"
                );
                DriverState::Draining
            }

            DriverState::Draining => DriverState::Collecting,

            DriverState::Done => break,
        };
    }

    tracing::info!(
        voice = voice.name(),
        duration = report.total_duration,
        chunks = report.chunks_synthesized,
        skipped = report.chunks_skipped,
        dropped = report.chunks_dropped,
        interrupted = report.interrupted,
        stopped_on_failure = report.stopped_on_failure,
        "streaming synthesis finished"
    );
    Ok(report)
}

fn emit(sink: &mut Sink, voice: &mut Voice, wave: &Wave) -> Result<()> {
    match sink {
        Sink::Discard => Ok(()),
        Sink::File(file) => file.append(wave),
        Sink::Play => match voice.player.as_mut() {
            Some(player) => player.play(wave),
            None => Err(FliteError::Playback("no audio player".into())),
        },
    }
}
