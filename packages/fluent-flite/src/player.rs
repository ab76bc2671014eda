//! Reference audio player on the default output device.

use fluent_flite_domain::Wave;

use crate::error::{FliteError, Result};
use crate::strategy::AudioPlayer;

/// Plays each wave through Rodio and blocks until it has finished.
#[derive(Debug, Clone, Copy, Default)]
pub struct RodioPlayer {
    volume: Option<f32>,
}

impl RodioPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = Some(volume);
        self
    }
}

impl AudioPlayer for RodioPlayer {
    fn play(&mut self, wave: &Wave) -> Result<()> {
        let stream_handle = rodio::OutputStreamBuilder::open_default_stream()
            .map_err(|e| FliteError::Playback(format!("audio device initialization failed: {e}")))?;
        let sink = rodio::Sink::connect_new(stream_handle.mixer());

        let source =
            rodio::buffer::SamplesBuffer::new(wave.num_channels, wave.sample_rate, wave.to_f32());
        sink.append(source);
        if let Some(volume) = self.volume {
            sink.set_volume(volume);
        }
        sink.sleep_until_end();
        Ok(())
    }
}
