//! The set of voices an application has loaded.

use std::sync::Arc;

use fluent_flite_domain::VoiceId;
use parking_lot::Mutex;

use crate::voice::Voice;

/// A registered voice, locked while a run uses it.
pub type SharedVoice = Arc<Mutex<Voice>>;

/// Registry shared between threads.
pub type SharedVoiceRegistry = Arc<Mutex<VoiceRegistry>>;

/// Ordered list of voices. The first voice added is the default; voices added
/// later go right behind it, so the most recently added non-default voice is
/// listed second.
#[derive(Debug, Default)]
pub struct VoiceRegistry {
    voices: Vec<(VoiceId, SharedVoice)>,
}

impl VoiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty registry behind a lock.
    pub fn shared() -> SharedVoiceRegistry {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Register `voice` and return its shared handle.
    pub fn add(&mut self, voice: Voice) -> SharedVoice {
        let id = voice.id().clone();
        let shared = Arc::new(Mutex::new(voice));
        let at = self.voices.len().min(1);
        tracing::debug!(voice = id.name(), position = at, "voice registered");
        self.voices.insert(at, (id, Arc::clone(&shared)));
        shared
    }

    /// Unregister the first voice matching `name`. Removing the default makes
    /// the next voice the default.
    pub fn remove(&mut self, name: &str) -> Option<SharedVoice> {
        let at = self.voices.iter().position(|(id, _)| id.matches(name))?;
        Some(self.voices.remove(at).1)
    }

    pub fn default_voice(&self) -> Option<SharedVoice> {
        self.voices.first().map(|(_, v)| Arc::clone(v))
    }

    /// Look up by short name, long name or pathname.
    pub fn find(&self, name: &str) -> Option<SharedVoice> {
        self.voices
            .iter()
            .find(|(id, _)| id.matches(name))
            .map(|(_, v)| Arc::clone(v))
    }

    /// `find` with the default voice as fallback. `None` picks the default.
    pub fn select(&self, name: Option<&str>) -> Option<SharedVoice> {
        match name {
            Some(name) => self.find(name).or_else(|| {
                tracing::debug!(requested = name, "voice not registered, using default");
                self.default_voice()
            }),
            None => self.default_voice(),
        }
    }

    /// Registered ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &VoiceId> {
        self.voices.iter().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}
