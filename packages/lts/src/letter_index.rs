//! Per-letter start addresses into a decision model.

use crate::error::{LtsError, LtsResult};
use crate::symbols::LetterSymbol;

/// Start record of the CMU US English model for `a..=z`, followed by the
/// 0 sentinel.
pub const CMU_LETTER_INDEX: [u16; 27] = [
    0, 5371, 5414, 6048, 6256, 10649, 10666, 11293, 11522, 15403, 15514, 15533, 15900, 15942,
    16176, 19793, 19830, 19831, 21775, 22667, 22957, 24709, 24719, 24877, 24923, 25377, 0,
];

/// One optional start address per letter `a..=z`.
///
/// Address 0 is a real start (record 0 is where `a` begins in the CMU
/// model); letters the model has no tree for are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterIndex {
    starts: [Option<u16>; 26],
}

impl LetterIndex {
    /// Build from explicit per-letter addresses.
    pub fn new(starts: [Option<u16>; 26]) -> Self {
        Self { starts }
    }

    /// Parse a raw compiled table: 26 addresses, optionally followed by the
    /// trailing 0 sentinel.
    pub fn from_table(table: &[u16]) -> LtsResult<Self> {
        let addrs = match table.len() {
            26 => table,
            27 if table[26] == 0 => &table[..26],
            27 => {
                return Err(LtsError::LetterIndex(format!(
                    "sentinel is {} instead of 0",
                    table[26]
                )));
            }
            n => {
                return Err(LtsError::LetterIndex(format!(
                    "expected 26 or 27 entries, found {n}"
                )));
            }
        };
        let mut starts = [None; 26];
        for (slot, &addr) in starts.iter_mut().zip(addrs) {
            *slot = Some(addr);
        }
        Ok(Self { starts })
    }

    /// The CMU US English index.
    pub fn cmu() -> Self {
        let mut starts = [None; 26];
        for (slot, &addr) in starts.iter_mut().zip(&CMU_LETTER_INDEX[..26]) {
            *slot = Some(addr);
        }
        Self { starts }
    }

    /// Start address for a letter, `None` for non-letters and uncovered letters.
    pub fn start(&self, letter: LetterSymbol) -> Option<usize> {
        letter
            .letter_offset()
            .and_then(|i| self.starts[i])
            .map(usize::from)
    }

    /// Check every present address against a model of `records` records.
    pub fn validate(&self, records: usize) -> LtsResult<()> {
        for addr in self.starts.iter().flatten() {
            if *addr as usize >= records {
                return Err(LtsError::ModelAddress {
                    addr: *addr as usize,
                    records,
                });
            }
        }
        Ok(())
    }
}
