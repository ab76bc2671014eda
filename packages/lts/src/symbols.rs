//! Letter and phone vocabularies used to read decision model input and output.
//!
//! Both are closed, order-significant tables: a symbol *is* its index. The
//! phone table travels with the model it was compiled against.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{LtsError, LtsResult};

/// Separator joining the primitive phones of a merged cluster.
pub const CLUSTER_SEPARATOR: char = '-';

/// Letter alphabet, index = code.
pub const LETTER_NAMES: [&str; 29] = [
    "nothing", "#", "0", "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n",
    "o", "p", "q", "r", "s", "t", "u", "v", "w", "x", "y", "z",
];

/// Phone inventory of the CMU US English letter-to-sound model.
pub const CMU_PHONES: [&str; 75] = [
    "epsilon", "eh1", "aa1", "ey1", "aw1", "ax0", "ao1", "ay0", "aa0", "ey0", "ae1", "ih1",
    "aw0", "ow0", "ao0", "ow1", "eh0", "ih0", "w-ey1", "w-ax0", "y-ax0", "ae0", "ay1", "ah0",
    "ah1", "b", "ch", "k", "s", "t-s", "sh", "d", "t", "jh", "iy1", "iy0", "uw1", "y-uw1",
    "oy1", "y-uw0", "uw0", "oy0", "f", "g", "zh", "hh", "y", "l", "ax0-l", "m", "ax0-m",
    "m-ae1", "m-ax0", "ng", "n", "n-y", "uh1", "uh0", "w", "w-ah1", "er1", "p", "r", "er0",
    "z", "th", "dh", "y-er0", "y-uh1", "y-er1", "v", "k-s", "g-zh", "k-sh", "g-z",
];

/// One symbol of the letter alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(transparent)]
pub struct LetterSymbol(u8);

impl LetterSymbol {
    /// Nothing / epsilon. Also fills unused extra feature slots.
    pub const NOTHING: Self = Self(0);
    /// Word boundary `#`.
    pub const BOUNDARY: Self = Self(1);
    /// Digit class `0`. Also pads the window beyond the word boundary.
    pub const DIGIT: Self = Self(2);

    const FIRST_LETTER: u8 = 3;

    /// Map a character onto the alphabet. Only lowercase ASCII letters map to
    /// letters; digits map to the digit class and everything else to nothing.
    pub fn from_char(c: char) -> Self {
        match c {
            'a'..='z' => Self(Self::FIRST_LETTER + (c as u8 - b'a')),
            '#' => Self::BOUNDARY,
            '0'..='9' => Self::DIGIT,
            _ => Self::NOTHING,
        }
    }

    /// Symbol for a raw code, if the alphabet has it.
    pub fn from_code(code: u8) -> Option<Self> {
        ((code as usize) < LETTER_NAMES.len()).then_some(Self(code))
    }

    pub fn code(self) -> u8 {
        self.0
    }

    /// Position in `a..=z`, for letters only.
    pub fn letter_offset(self) -> Option<usize> {
        (Self::FIRST_LETTER..Self::FIRST_LETTER + 26)
            .contains(&self.0)
            .then(|| (self.0 - Self::FIRST_LETTER) as usize)
    }

    pub fn is_letter(self) -> bool {
        self.letter_offset().is_some()
    }

    pub fn name(self) -> &'static str {
        LETTER_NAMES.get(self.0 as usize).copied().unwrap_or(LETTER_NAMES[0])
    }
}

impl TryFrom<u8> for LetterSymbol {
    type Error = LtsError;

    fn try_from(code: u8) -> LtsResult<Self> {
        Self::from_code(code).ok_or_else(|| {
            LtsError::SymbolTable(format!(
                "letter code {code} outside an alphabet of {}",
                LETTER_NAMES.len()
            ))
        })
    }
}

impl From<LetterSymbol> for u8 {
    fn from(letter: LetterSymbol) -> u8 {
        letter.0
    }
}

impl fmt::Display for LetterSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalize a word onto the letter alphabet.
pub fn letters(word: &str) -> Vec<LetterSymbol> {
    word.chars().map(LetterSymbol::from_char).collect()
}

/// Index into a [`PhoneTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct PhoneSymbol(u8);

impl PhoneSymbol {
    /// The "no phone" sentinel, always code 0.
    pub const EPSILON: Self = Self(0);

    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    pub fn code(self) -> u8 {
        self.0
    }

    pub fn is_epsilon(self) -> bool {
        self == Self::EPSILON
    }
}

/// Closed phone inventory. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneTable {
    names: Arc<[Cow<'static, str>]>,
}

impl PhoneTable {
    /// Build a table from phone names. Entry 0 is the epsilon sentinel and
    /// codes are bytes, so at most 256 entries are allowed.
    pub fn new<I, S>(names: I) -> LtsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        let names: Vec<Cow<'static, str>> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(LtsError::SymbolTable("phone table is empty".into()));
        }
        if names.len() > 256 {
            return Err(LtsError::SymbolTable(format!(
                "phone table has {} entries, codes are single bytes",
                names.len()
            )));
        }
        if let Some(i) = names.iter().skip(1).position(|n| n.is_empty()) {
            return Err(LtsError::SymbolTable(format!("phone {} has an empty name", i + 1)));
        }
        Ok(Self {
            names: names.into(),
        })
    }

    /// The CMU US English phone table.
    pub fn cmu() -> Self {
        Self {
            names: CMU_PHONES.iter().map(|&p| Cow::Borrowed(p)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Symbol for a raw code, if the table has it.
    pub fn symbol(&self, code: u8) -> LtsResult<PhoneSymbol> {
        if (code as usize) < self.names.len() {
            Ok(PhoneSymbol(code))
        } else {
            Err(LtsError::PhoneIndex {
                code,
                len: self.names.len(),
            })
        }
    }

    /// Name of a symbol produced by this table.
    pub fn name(&self, phone: PhoneSymbol) -> &str {
        self.names
            .get(phone.0 as usize)
            .map(|n| n.as_ref())
            .unwrap_or("")
    }

    /// Look a phone up by name.
    pub fn find(&self, name: &str) -> Option<PhoneSymbol> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| PhoneSymbol(i as u8))
    }

    /// Whether the symbol is a merged multi-phone cluster.
    pub fn is_cluster(&self, phone: PhoneSymbol) -> bool {
        self.name(phone).contains(CLUSTER_SEPARATOR)
    }

    /// Primitive phones of a symbol: one for a plain phone, two or more for a
    /// cluster.
    pub fn split(&self, phone: PhoneSymbol) -> impl Iterator<Item = &str> {
        self.name(phone)
            .split(CLUSTER_SEPARATOR)
            .filter(|p| !p.is_empty())
    }
}
