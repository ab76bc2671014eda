//! Synthesized waveform type.
//!
//! A [`Wave`] is what a synthesizer hands back for one utterance: interleaved
//! 16-bit PCM plus the rate and channel count needed to play or store it.

use serde::{Deserialize, Serialize};

/// Interleaved 16-bit PCM audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wave {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved channels
    pub num_channels: u16,
    /// Raw samples, `num_frames() * num_channels` long
    pub samples: Vec<i16>,
}

impl Wave {
    /// Create a mono wave.
    pub fn mono(sample_rate: u32, samples: Vec<i16>) -> Self {
        Self {
            sample_rate,
            num_channels: 1,
            samples,
        }
    }

    /// Create an empty mono wave at the given rate.
    pub fn empty(sample_rate: u32) -> Self {
        Self::mono(sample_rate, Vec::new())
    }

    /// Number of sample frames (samples per channel).
    pub fn num_frames(&self) -> usize {
        if self.num_channels == 0 {
            return 0;
        }
        self.samples.len() / self.num_channels as usize
    }

    /// Duration in seconds, `frames / sample_rate`. Zero for a zero rate.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_frames() as f32 / self.sample_rate as f32
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples converted to f32 in -1.0‥+1.0, for players that take floats.
    pub fn to_f32(&self) -> Vec<f32> {
        self.samples
            .iter()
            .map(|&s| s as f32 / i16::MAX as f32)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_counts_frames_not_samples() {
        let w = Wave {
            sample_rate: 8000,
            num_channels: 2,
            samples: vec![0; 8000],
        };
        assert_eq!(w.num_frames(), 4000);
        assert!((w.duration_secs() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_rate_has_zero_duration() {
        let w = Wave::mono(0, vec![1, 2, 3]);
        assert_eq!(w.duration_secs(), 0.0);
    }
}
