// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading keys: kana string → bytes → 32-bit MurmurHash3.
//!
//! Every kana unit maps to one byte through a lookup table. The built-in
//! table takes the low byte of the code point, which is what the runtime
//! does with the keystrokes it receives: hiragana land in 0x41..=0x96,
//! katakana in 0xA1..=0xFE, so the two scripts never share a byte.
//!
//! The hash of those bytes is the key. It orders the search tree and, in
//! hex, names the record (`record_name`). Keys are not allowed to collide
//! within a class: two readings sharing a key would make one of them
//! unreachable, so `assign_keys` fails instead of picking a winner.

mod murmur;

pub use murmur::murmur3_32;

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::error::CompileError;
use crate::types::{ReadingClass, ReadingRecord};
use crate::xref::ReadingTable;

/// Seed used for every reading key.
pub const KEY_SEED: u32 = 0;

/// Offset between a hiragana code point and its katakana counterpart.
const KATAKANA_OFFSET: u32 = 0x60;

/// Stable external name for a record: lowercase hex with a `0x` prefix.
pub fn record_name(key: u32) -> String {
    format!("{:#x}", key)
}

/// Fold hiragana to katakana, leaving everything else alone.
pub fn to_katakana(c: char) -> char {
    match c {
        '\u{3041}'..='\u{3096}' | '\u{309D}'..='\u{309E}' => {
            char::from_u32(c as u32 + KATAKANA_OFFSET).unwrap_or(c)
        }
        _ => c,
    }
}

// =============================================================================
// KANA TABLE
// =============================================================================

/// Kana unit → key byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KanaTable {
    bytes: HashMap<char, u8>,
}

impl KanaTable {
    /// The runtime's own encoding: low byte of every hiragana and katakana
    /// code point, plus the prolonged sound mark and iteration marks.
    pub fn unicode_low_byte() -> Self {
        let ranges = [
            ('\u{3041}', '\u{3096}'),
            ('\u{309D}', '\u{309E}'),
            ('\u{30A1}', '\u{30FA}'),
            ('\u{30FC}', '\u{30FE}'),
        ];
        let bytes = ranges
            .iter()
            .flat_map(|&(start, end)| start..=end)
            .map(|c| (c, (c as u32 & 0xFF) as u8))
            .collect();
        Self { bytes }
    }

    /// Load `(kana, "hh")` pairs, where `hh` is two hex digits.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, CompileError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut bytes = HashMap::new();
        for (kana, value) in pairs {
            let (kana, value) = (kana.as_ref(), value.as_ref().trim());
            let invalid = || CompileError::InvalidKanaEntry {
                kana: kana.to_string(),
                value: value.to_string(),
            };

            let mut chars = kana.chars();
            let (Some(unit), None) = (chars.next(), chars.next()) else {
                return Err(invalid());
            };
            let digits = value.trim_start_matches("0x");
            if digits.len() != 2 {
                return Err(invalid());
            }
            let byte = u8::from_str_radix(digits, 16).map_err(|_| invalid())?;
            bytes.insert(unit, byte);
        }
        Ok(Self { bytes })
    }

    pub fn byte(&self, unit: char) -> Option<u8> {
        self.bytes.get(&unit).copied()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// =============================================================================
// KEYER
// =============================================================================

/// Derives keys for readings of any class.
#[derive(Debug, Clone)]
pub struct ReadingKeyer {
    table: KanaTable,
    seed: u32,
}

impl ReadingKeyer {
    pub fn new(table: KanaTable) -> Self {
        Self {
            table,
            seed: KEY_SEED,
        }
    }

    pub fn table(&self) -> &KanaTable {
        &self.table
    }

    /// Byte string for a reading. Every unit must be in the table.
    pub fn encode(&self, class: ReadingClass, reading: &str) -> Result<Vec<u8>, CompileError> {
        reading
            .chars()
            .map(|unit| {
                self.table
                    .byte(unit)
                    .ok_or_else(|| CompileError::UnknownSyllable {
                        class,
                        reading: reading.to_string(),
                        syllable: unit,
                    })
            })
            .collect()
    }

    /// Key for a reading exactly as stored in the class.
    pub fn key(&self, class: ReadingClass, reading: &str) -> Result<u32, CompileError> {
        Ok(murmur3_32(&self.encode(class, reading)?, self.seed))
    }

    /// Key for user input, the way the runtime computes it: onyomi are
    /// stored in katakana, so hiragana input is folded first.
    pub fn lookup_key(&self, class: ReadingClass, kana: &str) -> Result<u32, CompileError> {
        if class.folds_to_katakana() {
            let folded: String = kana.chars().map(to_katakana).collect();
            self.key(class, &folded)
        } else {
            self.key(class, kana)
        }
    }

    /// Key every reading of a table and return the records sorted by key.
    ///
    /// Two different readings with the same key are a `KeyCollision`.
    pub fn assign_keys(&self, table: ReadingTable) -> Result<Vec<ReadingRecord>, CompileError> {
        let class = table.class();
        let mut by_key: BTreeMap<u32, ReadingRecord> = BTreeMap::new();

        for group in table.into_groups() {
            let key = self.key(class, &group.reading)?;
            match by_key.entry(key) {
                Entry::Occupied(existing) => {
                    return Err(CompileError::KeyCollision {
                        class,
                        key,
                        first: existing.get().reading.clone(),
                        second: group.reading,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(ReadingRecord {
                        reading: group.reading,
                        key,
                        attributes: group.attributes,
                    });
                }
            }
        }

        Ok(by_key.into_values().collect())
    }
}
