//! Letter-to-sound prediction.
//!
//! For every letter of a word the rules build a window of surrounding letters,
//! pick the decision tree for that letter from the [`LetterIndex`], and walk it
//! to a phone. The word is padded on both sides with one boundary symbol
//! followed by digit-class fillers so edge letters see a full window:
//!
//! ```text
//! w = 4, word "cat":   0 0 0 # c a t # 0 0 0
//! window for 'a':      0 0 # c | t # 0 0 | <extra features>
//! ```

use std::iter;

use crate::config::LtsConfig;
use crate::error::LtsResult;
use crate::letter_index::LetterIndex;
use crate::model::DecisionModel;
use crate::symbols::{self, LetterSymbol, PhoneSymbol, PhoneTable};

/// A complete rule set: model, the index into it, and its phone table.
///
/// Prediction holds no state between calls, so a rule set can be shared
/// freely across threads.
#[derive(Debug, Clone)]
pub struct LtsRules {
    name: String,
    config: LtsConfig,
    letter_index: LetterIndex,
    phones: PhoneTable,
    model: DecisionModel,
}

impl LtsRules {
    /// Assemble a rule set, checking the config and every letter start address.
    pub fn new(
        name: impl Into<String>,
        letter_index: LetterIndex,
        phones: PhoneTable,
        model: DecisionModel,
        config: LtsConfig,
    ) -> LtsResult<Self> {
        config.validate()?;
        letter_index.validate(model.records())?;
        Ok(Self {
            name: name.into(),
            config,
            letter_index,
            phones,
            model,
        })
    }

    /// CMU US English tables around a compiled CMU model.
    pub fn cmu(model: DecisionModel) -> LtsResult<Self> {
        Self::new(
            "cmu",
            LetterIndex::cmu(),
            PhoneTable::cmu(),
            model,
            LtsConfig::default(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &LtsConfig {
        &self.config
    }

    pub fn phones(&self) -> &PhoneTable {
        &self.phones
    }

    /// Predict phones for a normalized word. Epsilons are dropped and merged
    /// clusters are kept as single symbols.
    pub fn predict(&self, word: &[LetterSymbol]) -> LtsResult<Vec<PhoneSymbol>> {
        self.predict_with_features(word, &[])
    }

    /// Like [`predict`](Self::predict), with values for the extra feature
    /// slots. Missing slots are filled with nothing, surplus values ignored.
    pub fn predict_with_features(
        &self,
        word: &[LetterSymbol],
        features: &[LetterSymbol],
    ) -> LtsResult<Vec<PhoneSymbol>> {
        let w = self.config.context_window;
        let padded: Vec<LetterSymbol> = iter::repeat_n(LetterSymbol::DIGIT, w - 1)
            .chain(iter::once(LetterSymbol::BOUNDARY))
            .chain(word.iter().copied())
            .chain(iter::once(LetterSymbol::BOUNDARY))
            .chain(iter::repeat_n(LetterSymbol::DIGIT, w - 1))
            .collect();

        let mut window = vec![LetterSymbol::NOTHING; self.config.width()];
        for (slot, f) in window[2 * w..].iter_mut().zip(features) {
            *slot = *f;
        }

        let mut phones = Vec::with_capacity(word.len());
        for (i, &letter) in word.iter().enumerate() {
            // digits, punctuation and uncovered letters only serve as context
            let Some(start) = self.letter_index.start(letter) else {
                continue;
            };
            let pos = w + i;
            window[..w].copy_from_slice(&padded[pos - w..pos]);
            window[w..2 * w].copy_from_slice(&padded[pos + 1..pos + 1 + w]);

            let code = self.model.evaluate(start, &window)?;
            let phone = self.phones.symbol(code)?;
            if !phone.is_epsilon() {
                phones.push(phone);
            }
        }
        Ok(phones)
    }

    /// Predict a word given as text and return primitive phone names, with
    /// clusters split. ASCII letters are folded to lowercase first.
    pub fn apply(&self, word: &str) -> LtsResult<Vec<&str>> {
        let letters = symbols::letters(&word.to_ascii_lowercase());
        let predicted = self.predict(&letters)?;
        let table = &self.phones;
        let phones: Vec<&str> = predicted
            .into_iter()
            .flat_map(move |p| table.split(p))
            .collect();
        tracing::trace!(rules = %self.name, word, phones = ?phones, "lts prediction");
        Ok(phones)
    }
}
