//! WAV file sink for [`OutputMode::File`](fluent_flite_domain::OutputMode::File).
//!
//! The file is created as a valid, empty RIFF/WAVE before the first token is
//! read, then every synthesized chunk is appended to it and the header
//! rewritten. A run that stops half way still leaves a playable file.

use std::path::{Path, PathBuf};

use fluent_flite_domain::Wave;
use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::{FliteError, Result};

/// Append-only WAV output.
#[derive(Debug)]
pub struct WavSink {
    path: PathBuf,
    spec: WavSpec,
    frames: u64,
}

fn pcm16(sample_rate: u32, channels: u16) -> WavSpec {
    WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

impl WavSink {
    /// Create (or truncate) `path` as an empty mono 16-bit WAV.
    pub fn prime<P: AsRef<Path>>(path: P, sample_rate: u32) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let spec = pcm16(sample_rate, 1);
        write_empty(&path, spec)?;
        tracing::debug!(path = %path.display(), sample_rate, "primed output file");
        Ok(Self {
            path,
            spec,
            frames: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    /// Frames appended so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Append the samples of `wave`.
    ///
    /// A wave in a different format is accepted only while the file is still
    /// empty, in which case the header is rewritten to match it.
    pub fn append(&mut self, wave: &Wave) -> Result<()> {
        if wave.is_empty() {
            return Ok(());
        }
        if wave.num_channels == 0 || wave.sample_rate == 0 {
            return Err(FliteError::OutputFormat(format!(
                "{} Hz {} channel audio cannot be written to {}",
                wave.sample_rate,
                wave.num_channels,
                self.path.display()
            )));
        }
        let spec = pcm16(wave.sample_rate, wave.num_channels);
        if spec != self.spec {
            if self.frames > 0 {
                return Err(FliteError::OutputFormat(format!(
                    "{} Hz {} channel audio cannot be appended to {} Hz {} channel file {}",
                    spec.sample_rate,
                    spec.channels,
                    self.spec.sample_rate,
                    self.spec.channels,
                    self.path.display()
                )));
            }
            write_empty(&self.path, spec)?;
            self.spec = spec;
        }

        let mut writer = WavWriter::append(&self.path)?;
        for &sample in &wave.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
        self.frames += wave.num_frames() as u64;
        Ok(())
    }
}

fn write_empty(path: &Path, spec: WavSpec) -> Result<()> {
    WavWriter::create(path, spec)?.finalize()?;
    Ok(())
}
