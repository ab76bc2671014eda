//! # Fluent Flite LTS
//!
//! Letter-to-sound prediction for words missing from the pronunciation
//! lexicon. A compiled decision model (produced offline) is walked once per
//! letter over a fixed window of neighbouring letters; the leaves name phones
//! from a closed phone table, some of them merged clusters such as `k-s`.
//!
//! ```no_run
//! use fluent_flite_lts::{DecisionModel, LtsRules};
//!
//! # fn main() -> Result<(), fluent_flite_lts::LtsError> {
//! let rules = LtsRules::cmu(DecisionModel::load("cmu_lts_model.bin")?)?;
//! let phones = rules.apply("flite")?;
//! println!("{}", phones.join(" "));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod ipa;
pub mod letter_index;
pub mod model;
pub mod rules;
pub mod symbols;

pub use config::LtsConfig;
pub use error::{LtsError, LtsResult};
pub use ipa::{phone_to_ipa, phones_to_ipa};
pub use letter_index::{CMU_LETTER_INDEX, LetterIndex};
pub use model::{DecisionModel, RECORD_SIZE, Rule};
pub use rules::LtsRules;
pub use symbols::{LetterSymbol, PhoneSymbol, PhoneTable, letters};
