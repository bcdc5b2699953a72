// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a compiled dictionary.
//!
//! A character catalog feeds four reading classes. Each class maps a reading
//! (a kana string) to the characters or words that produce it, and every
//! (reading, contributor) pair carries one or more variants: how the reading
//! attaches (free, prefix, suffix) and which okurigana trails it.
//!
//! | Rust Type          | Purpose                                            |
//! |--------------------|----------------------------------------------------|
//! | `RawCharacter`     | One catalog row as handed over by the parser       |
//! | `CharacterEntry`   | A usable, ranked character                         |
//! | `ReadingClass`     | Onyomi, kunyomi, nanori or compiled words          |
//! | `AffixTag`         | Free / prefix / suffix / irregular word + meaning  |
//! | `Variants<T>`      | One value or several, never a bare "maybe a list"  |
//! | `ReadingAttribute` | All variants of one contributor for one reading    |
//! | `ReadingRecord`    | A reading, its key, and its rank-ordered contributors |
//!
//! # Invariants
//!
//! - **CharacterEntry**: at least one reading across the three kanji classes.
//! - **ReadingRecord**: attributes sorted by rank (stable), one attribute per
//!   contributor. `verify::verify_record` checks both.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// RAW INPUT ROWS
// =============================================================================

/// One character catalog row, already parsed out of the source format.
///
/// `code_point` is the hex spelling used by the catalog (`"4e00"`), and
/// `frequency` is kept as text so a garbled value is reported, not guessed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCharacter {
    pub code_point: String,
    pub literal: String,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub meanings: Vec<String>,
    #[serde(default)]
    pub onyomi: Vec<String>,
    #[serde(default)]
    pub kunyomi: Vec<String>,
    #[serde(default)]
    pub nanori: Vec<String>,
}

/// A row of the secondary (corpus) frequency ranking, keyed by glyph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryRank {
    pub literal: String,
    pub rank: u32,
}

/// A row of a word-frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRow {
    pub reading: String,
    pub word: String,
    pub meaning: String,
    #[serde(default)]
    pub rank: Option<String>,
}

// =============================================================================
// CATALOG ENTRIES
// =============================================================================

/// A usable character: it has readings and a canonical rank.
///
/// `primary_rank` is what the catalog itself said (after the override
/// fallback); `rank` is the reconciled value used for ordering and exclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterEntry {
    pub code_point: u32,
    pub literal: char,
    pub primary_rank: u32,
    pub rank: u32,
    pub meaning: String,
    pub onyomi: Vec<String>,
    pub kunyomi: Vec<String>,
    pub nanori: Vec<String>,
}

impl CharacterEntry {
    /// Readings of this character in one class. Characters have no
    /// compiled-word readings.
    pub fn readings(&self, class: ReadingClass) -> &[String] {
        match class {
            ReadingClass::Onyomi => &self.onyomi,
            ReadingClass::Kunyomi => &self.kunyomi,
            ReadingClass::Nanori => &self.nanori,
            ReadingClass::Dictionary => &[],
        }
    }

    /// Total readings across the three kanji classes.
    pub fn reading_count(&self) -> usize {
        self.onyomi.len() + self.kunyomi.len() + self.nanori.len()
    }
}

// =============================================================================
// READING CLASSES
// =============================================================================

/// The four independently indexed catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingClass {
    Onyomi,
    Kunyomi,
    Nanori,
    Dictionary,
}

impl ReadingClass {
    /// Every class, in the fixed order used for output and diagnostics.
    pub const ALL: [ReadingClass; 4] = [
        ReadingClass::Onyomi,
        ReadingClass::Kunyomi,
        ReadingClass::Nanori,
        ReadingClass::Dictionary,
    ];

    /// Classes fed directly by the character catalog.
    pub const KANJI: [ReadingClass; 3] = [
        ReadingClass::Onyomi,
        ReadingClass::Kunyomi,
        ReadingClass::Nanori,
    ];

    /// Long name, used for artifact and record naming.
    pub fn name(self) -> &'static str {
        match self {
            ReadingClass::Onyomi => "onyomi",
            ReadingClass::Kunyomi => "kunyomi",
            ReadingClass::Nanori => "nanori",
            ReadingClass::Dictionary => "dictionary",
        }
    }

    /// Short prefix for the helper arrays of a record.
    pub fn short_name(self) -> &'static str {
        match self {
            ReadingClass::Onyomi => "on",
            ReadingClass::Kunyomi => "kun",
            ReadingClass::Nanori => "na",
            ReadingClass::Dictionary => "dict",
        }
    }

    /// Onyomi only ever mark suffixes; a trailing `-` is stray.
    pub fn allows_prefix_marker(self) -> bool {
        !matches!(self, ReadingClass::Onyomi)
    }

    /// Onyomi are written in katakana, so hiragana input is folded before keying.
    pub fn folds_to_katakana(self) -> bool {
        matches!(self, ReadingClass::Onyomi)
    }
}

impl fmt::Display for ReadingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReadingClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "onyomi" | "on" => Ok(ReadingClass::Onyomi),
            "kunyomi" | "kun" => Ok(ReadingClass::Kunyomi),
            "nanori" | "na" => Ok(ReadingClass::Nanori),
            "dictionary" | "dict" | "word" => Ok(ReadingClass::Dictionary),
            other => Err(format!(
                "unknown reading class '{}' (expected onyomi, kunyomi, nanori or dictionary)",
                other
            )),
        }
    }
}

// =============================================================================
// AFFIXES AND VARIANTS
// =============================================================================

/// How a reading attaches, or which half of an irregular word pair a string is.
///
/// The discriminants are the values of the runtime's `affix_enum`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum AffixTag {
    #[default]
    None = 0,
    Prefix = 1,
    Suffix = 2,
    IrregularWord = 3,
    IrregularMeaning = 4,
}

impl AffixTag {
    /// Enumerator name in the emitted constant data.
    pub fn c_name(self) -> &'static str {
        match self {
            AffixTag::None => "none",
            AffixTag::Prefix => "prefix",
            AffixTag::Suffix => "suffix",
            AffixTag::IrregularWord => "jword",
            AffixTag::IrregularMeaning => "meaning",
        }
    }
}

/// One way a contributor realizes a reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    pub affix: AffixTag,
    pub spelling: String,
}

impl Variant {
    pub fn new(affix: AffixTag, spelling: impl Into<String>) -> Self {
        Self {
            affix,
            spelling: spelling.into(),
        }
    }

    /// Free reading with no okurigana.
    pub fn plain() -> Self {
        Self::new(AffixTag::None, "")
    }

    pub fn is_plain(&self) -> bool {
        self.affix == AffixTag::None && self.spelling.is_empty()
    }
}

/// A single value or a list of them.
///
/// Most contributors realize a reading one way, so `Single` is the common case.
/// `push` promotes to `Multiple` on the second value; nothing ever demotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Variants<T> {
    Single(T),
    Multiple(Vec<T>),
}

impl<T> Variants<T> {
    /// Append a value, promoting `Single` to `Multiple`.
    pub fn push(&mut self, value: T) {
        let previous = std::mem::replace(self, Variants::Multiple(Vec::new()));
        *self = match previous {
            Variants::Single(first) => Variants::Multiple(vec![first, value]),
            Variants::Multiple(mut all) => {
                all.push(value);
                Variants::Multiple(all)
            }
        };
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            Variants::Single(value) => std::slice::from_ref(value),
            Variants::Multiple(values) => values,
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            Variants::Single(value) => std::slice::from_mut(value),
            Variants::Multiple(values) => values,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Never true for a value built through `Single` + `push`.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, Variants::Multiple(_))
    }

    /// Normalize to a list; a single value becomes a length-1 list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Variants::Single(value) => vec![value],
            Variants::Multiple(values) => values,
        }
    }
}

impl<T> From<T> for Variants<T> {
    fn from(value: T) -> Self {
        Variants::Single(value)
    }
}

// =============================================================================
// READING RECORDS
// =============================================================================

/// Identity of whatever produces a reading: a character or a whole word form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Contributor {
    Character(u32),
    Word(String),
}

impl fmt::Display for Contributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contributor::Character(code_point) => match char::from_u32(*code_point) {
                Some(c) => write!(f, "{} (U+{:04X})", c, code_point),
                None => write!(f, "U+{:04X}", code_point),
            },
            Contributor::Word(form) => f.write_str(form),
        }
    }
}

/// Everything one contributor says about one reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingAttribute {
    pub contributor: Contributor,
    pub rank: u32,
    pub variants: Variants<Variant>,
}

/// A reading with its derived key and rank-ordered contributors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingRecord {
    pub reading: String,
    pub key: u32,
    pub attributes: Vec<ReadingAttribute>,
}

impl ReadingRecord {
    /// Stable external name, derived from the key alone.
    pub fn name(&self) -> String {
        crate::hash::record_name(self.key)
    }

    pub fn contributors(&self) -> impl Iterator<Item = &Contributor> {
        self.attributes.iter().map(|a| &a.contributor)
    }
}
