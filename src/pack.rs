// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Record packing: one uniform shape per reading.
//!
//! The runtime reads every record through the same struct, so the nested
//! `Variants` of each contributor are flattened here into parallel lists:
//!
//! ```text
//! ReadingRecord "おこな"                       PackedRecord::Full
//!   行 [Single(none, "う")]            ──►    [ { affixes: [none],         spellings: ["う"] },
//!   航 [Multiple(none, ""), (suffix,"")]       { affixes: [none, suffix], spellings: ["", ""] } ]
//! ```
//!
//! When every variant of every contributor is plain (free reading, no
//! okurigana) the record packs to `Plain` and carries no variant arrays at
//! all. That is the common case for onyomi.

use serde::Serialize;

use crate::types::{AffixTag, ReadingRecord, Variant};

/// Variant lists of one contributor, as two parallel arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OkuriGroup {
    pub affixes: Vec<AffixTag>,
    pub spellings: Vec<String>,
}

impl OkuriGroup {
    fn from_variants(variants: &[Variant]) -> Self {
        let (affixes, spellings) = variants
            .iter()
            .map(|v| (v.affix, v.spelling.clone()))
            .unzip();
        Self { affixes, spellings }
    }

    pub fn len(&self) -> usize {
        self.affixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.affixes.is_empty()
    }

    fn to_variants(&self) -> Vec<Variant> {
        self.affixes
            .iter()
            .zip(&self.spellings)
            .map(|(&affix, spelling)| Variant::new(affix, spelling.as_str()))
            .collect()
    }
}

/// The packed form of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", content = "groups", rename_all = "snake_case")]
pub enum PackedRecord {
    /// Every variant is a free reading without okurigana.
    Plain,
    /// One group per contributor, in record order.
    Full(Vec<OkuriGroup>),
}

impl PackedRecord {
    pub fn is_plain(&self) -> bool {
        matches!(self, PackedRecord::Plain)
    }

    pub fn groups(&self) -> &[OkuriGroup] {
        match self {
            PackedRecord::Plain => &[],
            PackedRecord::Full(groups) => groups,
        }
    }

    /// Recover per-contributor variant lists. `contributors` is only needed
    /// for `Plain`, where each contributor had exactly one plain variant.
    pub fn unpack(&self, contributors: usize) -> Vec<Vec<Variant>> {
        match self {
            PackedRecord::Plain => vec![vec![Variant::plain()]; contributors],
            PackedRecord::Full(groups) => groups.iter().map(OkuriGroup::to_variants).collect(),
        }
    }
}

/// Pack a record's variants.
pub fn pack(record: &ReadingRecord) -> PackedRecord {
    let plain = record
        .attributes
        .iter()
        .all(|a| a.variants.iter().all(Variant::is_plain));
    if plain {
        return PackedRecord::Plain;
    }
    PackedRecord::Full(
        record
            .attributes
            .iter()
            .map(|a| OkuriGroup::from_variants(a.variants.as_slice()))
            .collect(),
    )
}
