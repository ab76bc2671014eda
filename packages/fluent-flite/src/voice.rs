//! A voice: identity, configuration and the strategies a run uses.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use fluent_flite_domain::VoiceId;
use fluent_flite_lts::{DecisionModel, LetterIndex, LtsRules, PhoneTable};
use fluent_flite_voxdata::UnitDatabase;
use parking_lot::RwLock;

use crate::config::VoiceConfig;
use crate::error::Result;
use crate::strategy::{AudioPlayer, DefaultUttBreak, Synthesizer, UttBreak, UttPreprocess};

/// Unit database shared between a voice and the synthesizer reading it.
pub type SharedUnitDatabase = Arc<RwLock<UnitDatabase>>;

/// Everything a streaming run needs besides the tokens and the output mode.
pub struct Voice {
    id: VoiceId,
    pub(crate) config: VoiceConfig,
    pub(crate) synthesizer: Box<dyn Synthesizer>,
    pub(crate) utt_break: Box<dyn UttBreak>,
    pub(crate) preprocess: Option<Box<dyn UttPreprocess>>,
    pub(crate) player: Option<Box<dyn AudioPlayer>>,
    units: SharedUnitDatabase,
    lts: Option<Arc<LtsRules>>,
}

impl fmt::Debug for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Voice")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("preprocess", &self.preprocess.is_some())
            .field("player", &self.player.is_some())
            .field("voxdata_loaded", &self.units.read().is_loaded())
            .field("lts", &self.lts.as_ref().map(|r| r.name().to_string()))
            .finish_non_exhaustive()
    }
}

impl Voice {
    pub fn builder(id: impl Into<VoiceId>, synthesizer: impl Synthesizer + 'static) -> VoiceBuilder {
        VoiceBuilder {
            id: id.into(),
            config: VoiceConfig::default(),
            synthesizer: Box::new(synthesizer),
            utt_break: Box::new(DefaultUttBreak),
            preprocess: None,
            player: None,
            units: None,
            lts: None,
        }
    }

    pub fn id(&self) -> &VoiceId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.id.name()
    }

    pub fn config(&self) -> &VoiceConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut VoiceConfig {
        &mut self.config
    }

    /// Handle on the voice's unit database, for synthesizers that read it.
    pub fn units(&self) -> SharedUnitDatabase {
        Arc::clone(&self.units)
    }

    /// Letter-to-sound rules attached to the voice, if any.
    pub fn lts(&self) -> Option<&Arc<LtsRules>> {
        self.lts.as_ref()
    }

    /// Map `<dir>/<name>.voxdata` into the unit database.
    pub fn load_voxdata<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let voxdata = fluent_flite_voxdata::VoxData::open_in_dir(dir, self.name())?;
        self.units.write().bind(voxdata);
        Ok(())
    }

    /// Release the voice's unit data. Returns whether anything was loaded.
    pub fn unload_voxdata(&self) -> bool {
        self.units.write().unload()
    }

    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }
}

/// Builder for [`Voice`].
pub struct VoiceBuilder {
    id: VoiceId,
    config: VoiceConfig,
    synthesizer: Box<dyn Synthesizer>,
    utt_break: Box<dyn UttBreak>,
    preprocess: Option<Box<dyn UttPreprocess>>,
    player: Option<Box<dyn AudioPlayer>>,
    units: Option<SharedUnitDatabase>,
    lts: Option<Arc<LtsRules>>,
}

impl VoiceBuilder {
    pub fn config(mut self, config: VoiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn utt_break(mut self, utt_break: impl UttBreak + 'static) -> Self {
        self.utt_break = Box::new(utt_break);
        self
    }

    pub fn preprocess(mut self, preprocess: impl UttPreprocess + 'static) -> Self {
        self.preprocess = Some(Box::new(preprocess));
        self
    }

    pub fn player(mut self, player: impl AudioPlayer + 'static) -> Self {
        self.player = Some(Box::new(player));
        self
    }

    /// Share an existing unit database instead of starting with an empty one.
    pub fn units(mut self, units: SharedUnitDatabase) -> Self {
        self.units = Some(units);
        self
    }

    pub fn lts(mut self, rules: Arc<LtsRules>) -> Self {
        self.lts = Some(rules);
        self
    }

    /// Validate the config, then load whatever data it names.
    pub fn build(self) -> Result<Voice> {
        self.config.validate()?;

        let lts = match (self.lts, &self.config.lts_model) {
            (Some(rules), _) => Some(rules),
            (None, Some(path)) => {
                let rules = LtsRules::new(
                    "cmu",
                    LetterIndex::cmu(),
                    PhoneTable::cmu(),
                    DecisionModel::load(path)?,
                    self.config.lts,
                )?;
                Some(Arc::new(rules))
            }
            (None, None) => None,
        };

        let voice = Voice {
            id: self.id,
            config: self.config,
            synthesizer: self.synthesizer,
            utt_break: self.utt_break,
            preprocess: self.preprocess,
            player: self.player,
            units: self.units.unwrap_or_default(),
            lts,
        };
        if let Some(dir) = voice.config.voxdata_dir.clone() {
            voice.load_voxdata(dir)?;
        }

        tracing::debug!(
            voice = voice.name(),
            token_cap = voice.config.token_cap,
            lts = voice.lts.is_some(),
            "voice ready"
        );
        Ok(voice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluent_flite_domain::{SynthOutcome, Utterance, Wave};

    fn silent(utt: &mut Utterance) -> SynthOutcome {
        SynthOutcome::ok(Wave::mono(16_000, vec![0; utt.len()]))
    }

    #[test]
    fn builder_defaults() {
        let voice = Voice::builder(VoiceId::new("kal"), silent).build().expect("voice");
        assert_eq!(voice.name(), "kal");
        assert_eq!(voice.config().token_cap, 500);
        assert!(!voice.has_player());
        assert!(voice.lts().is_none());
        assert!(!voice.unload_voxdata());
    }

    #[test]
    fn invalid_config_fails_build() {
        let result = Voice::builder(VoiceId::new("kal"), silent)
            .config(VoiceConfig::new().with_token_cap(0))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_voxdata_dir_fails_build() {
        let config = VoiceConfig {
            voxdata_dir: Some("/nonexistent/voices".into()),
            ..VoiceConfig::default()
        };
        let result = Voice::builder(VoiceId::new("kal"), silent).config(config).build();
        assert!(matches!(result, Err(crate::FliteError::VoxData(_))));
    }
}
