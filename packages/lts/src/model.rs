//! Compiled decision model.
//!
//! The model is a flat array of fixed-size rule records, byte compatible with
//! models compiled for flite:
//!
//! ```text
//! offset 0   feat    u8      context position tested, 255 = leaf
//! offset 1   val     u8      letter code compared, or phone code at a leaf
//! offset 2   qtrue   u16 LE  next record when window[feat] == val
//! offset 4   qfalse  u16 LE  next record otherwise
//! ```
//!
//! Addresses are record indices. The blob is treated as opaque data produced
//! offline; only bounds are checked here.

use std::path::Path;
use std::sync::Arc;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{LtsError, LtsResult};
use crate::symbols::LetterSymbol;

/// Bytes per rule record.
pub const RECORD_SIZE: usize = 6;

/// `feat` value marking a leaf record.
pub const LEAF: u8 = 255;

/// One decoded rule record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub feat: u8,
    pub val: u8,
    pub qtrue: u16,
    pub qfalse: u16,
}

impl Rule {
    /// A question: go to `qtrue` when `window[feat] == letter`, else `qfalse`.
    pub fn question(feat: u8, letter: LetterSymbol, qtrue: u16, qfalse: u16) -> Self {
        Self {
            feat,
            val: letter.code(),
            qtrue,
            qfalse,
        }
    }

    /// A leaf answering with a phone code.
    pub fn leaf(phone: u8) -> Self {
        Self {
            feat: LEAF,
            val: phone,
            qtrue: 0,
            qfalse: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.feat == LEAF
    }

    fn decode(rec: &[u8]) -> Self {
        Self {
            feat: rec[0],
            val: rec[1],
            qtrue: LittleEndian::read_u16(&rec[2..4]),
            qfalse: LittleEndian::read_u16(&rec[4..6]),
        }
    }

    /// Record bytes, as found in a compiled model.
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut rec = [0u8; RECORD_SIZE];
        rec[0] = self.feat;
        rec[1] = self.val;
        LittleEndian::write_u16(&mut rec[2..4], self.qtrue);
        LittleEndian::write_u16(&mut rec[4..6], self.qfalse);
        rec
    }
}

/// Shared, immutable compiled model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionModel {
    bytes: Arc<[u8]>,
}

impl DecisionModel {
    /// Wrap a compiled model. The length must be a whole number of records.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> LtsResult<Self> {
        let bytes = bytes.into();
        if bytes.len() % RECORD_SIZE != 0 {
            return Err(LtsError::ModelSize {
                len: bytes.len(),
                record: RECORD_SIZE,
            });
        }
        Ok(Self { bytes })
    }

    /// Encode rule records into a model.
    pub fn from_rules(rules: &[Rule]) -> Self {
        let bytes: Vec<u8> = rules.iter().flat_map(|r| r.to_bytes()).collect();
        Self {
            bytes: bytes.into(),
        }
    }

    /// Read a compiled model from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> LtsResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    /// Number of rule records.
    pub fn records(&self) -> usize {
        self.bytes.len() / RECORD_SIZE
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode the record at `addr`.
    pub fn rule(&self, addr: usize) -> LtsResult<Rule> {
        let start = addr
            .checked_mul(RECORD_SIZE)
            .filter(|_| addr < self.records())
            .ok_or(LtsError::ModelAddress {
                addr,
                records: self.records(),
            })?;
        Ok(Rule::decode(&self.bytes[start..start + RECORD_SIZE]))
    }

    /// Walk the tree from `start` over a context window and return the phone
    /// code of the leaf reached.
    ///
    /// A walk cannot visit more records than the model holds without looping,
    /// so longer walks are reported as corrupt.
    pub fn evaluate(&self, start: usize, window: &[LetterSymbol]) -> LtsResult<u8> {
        let records = self.records();
        let mut addr = start;
        for _ in 0..=records {
            let rule = self.rule(addr)?;
            if rule.is_leaf() {
                return Ok(rule.val);
            }
            let letter = window.get(rule.feat as usize).ok_or(LtsError::FeatureIndex {
                feat: rule.feat,
                width: window.len(),
            })?;
            addr = if letter.code() == rule.val {
                rule.qtrue as usize
            } else {
                rule.qfalse as usize
            };
        }
        Err(LtsError::ModelCycle { start, records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(c: char) -> LetterSymbol {
        LetterSymbol::from_char(c)
    }

    #[test]
    fn record_layout_is_little_endian() {
        let rule = Rule::question(3, l('a'), 0x0102, 0x0304);
        assert_eq!(rule.to_bytes(), [3, 3, 0x02, 0x01, 0x04, 0x03]);
        let model = DecisionModel::from_bytes(rule.to_bytes().to_vec()).expect("one record");
        assert_eq!(model.rule(0).expect("record 0"), rule);
    }

    #[test]
    fn walks_to_leaf() {
        // 0: window[0] == 'x' ? 1 : 2
        let model = DecisionModel::from_rules(&[
            Rule::question(0, l('x'), 1, 2),
            Rule::leaf(7),
            Rule::leaf(9),
        ]);
        assert_eq!(model.evaluate(0, &[l('x')]).expect("walk"), 7);
        assert_eq!(model.evaluate(0, &[l('y')]).expect("walk"), 9);
        assert_eq!(model.evaluate(2, &[l('x')]).expect("walk"), 9);
    }

    #[test]
    fn rejects_out_of_range_addresses() {
        let model = DecisionModel::from_rules(&[Rule::question(0, l('x'), 5, 0)]);
        let err = model.evaluate(0, &[l('x')]).expect_err("qtrue out of range");
        assert!(matches!(err, LtsError::ModelAddress { addr: 5, records: 1 }));
        assert!(matches!(
            model.evaluate(1, &[l('x')]),
            Err(LtsError::ModelAddress { addr: 1, .. })
        ));
    }

    #[test]
    fn rejects_cycles_and_wide_features() {
        let model = DecisionModel::from_rules(&[Rule::question(0, l('x'), 0, 0)]);
        assert!(matches!(
            model.evaluate(0, &[l('x')]),
            Err(LtsError::ModelCycle { start: 0, records: 1 })
        ));

        let model = DecisionModel::from_rules(&[Rule::question(4, l('x'), 0, 0)]);
        assert!(matches!(
            model.evaluate(0, &[l('x')]),
            Err(LtsError::FeatureIndex { feat: 4, width: 1 })
        ));
    }

    #[test]
    fn rejects_partial_records() {
        assert!(matches!(
            DecisionModel::from_bytes(vec![0u8; 7]),
            Err(LtsError::ModelSize { len: 7, .. })
        ));
    }
}
