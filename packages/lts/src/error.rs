//! Errors raised while assembling or evaluating letter-to-sound rules.
//!
//! Apart from `Io` and `Config`, every variant means the compiled model or its
//! tables are corrupt. A prediction that hits one of them is aborted; no
//! partial pronunciation is returned.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LtsError {
    /// A record address points outside the model blob.
    #[error("model address {addr} outside model of {records} records")]
    ModelAddress { addr: usize, records: usize },

    /// The walk revisited more records than the model holds.
    #[error("model walk from {start} exceeded {records} steps")]
    ModelCycle { start: usize, records: usize },

    /// Model blob length is not a whole number of records.
    #[error("model size {len} is not a multiple of the {record}-byte record")]
    ModelSize { len: usize, record: usize },

    /// A rule tests a context position the window does not have.
    #[error("feature index {feat} outside context window of width {width}")]
    FeatureIndex { feat: u8, width: usize },

    /// A leaf produced a phone code the phone table does not have.
    #[error("phone code {code} outside phone table of {len} entries")]
    PhoneIndex { code: u8, len: usize },

    /// The letter index table is malformed.
    #[error("letter index: {0}")]
    LetterIndex(String),

    /// Phone or letter table is unusable.
    #[error("symbol table: {0}")]
    SymbolTable(String),

    /// Model file could not be read.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value.
    #[error("configuration: {field}: {reason}")]
    Config { field: String, reason: String },
}

pub type LtsResult<T> = Result<T, LtsError>;
