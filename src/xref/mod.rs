// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading → contributor cross-reference tables.
//!
//! One `Accumulator` per reading class collects every (reading, contributor,
//! variant) triple, then `freeze` turns it into an immutable `ReadingTable`.
//! Nothing touches the table after that; the keyer consumes it by value.
//!
//! ```text
//! 日  kun: ひ, -び, -か          ひ  → [日 {none}]
//! 火  kun: ひ, -び               び  → [日 {suffix}, 火 {suffix}]
//!                          ──►   か  → [日 {suffix}]
//! ```
//!
//! # Grouping rules
//!
//! - A reading seen for the first time opens a group.
//! - A contributor seen for the first time in a group appends an attribute.
//! - A contributor already in the group appends a variant to its attribute,
//!   unless the identical variant is already there.
//! - On freeze, attributes are stably sorted by rank. Ties keep the order in
//!   which the contributors were first seen.

pub mod parse;
pub mod words;

pub use parse::{parse_reading, ParsedReading, AFFIX_MARKER, OKURIGANA_SEPARATOR};
pub use words::{
    apply_lemma_ranking, assemble_words, build_word_table, merge_sources, select_words,
    MergePolicy, WordEntry, WordSource,
};

use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::error::{CompileError, DiagnosticKind, Diagnostics};
use crate::types::{AffixTag, Contributor, ReadingAttribute, ReadingClass, Variant, Variants};

/// Every contributor of one reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingGroup {
    pub reading: String,
    pub attributes: Vec<ReadingAttribute>,
}

/// Frozen cross-reference table of one class, in first-seen reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingTable {
    class: ReadingClass,
    groups: Vec<ReadingGroup>,
}

impl ReadingTable {
    pub fn class(&self) -> ReadingClass {
        self.class
    }

    pub fn groups(&self) -> &[ReadingGroup] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<ReadingGroup> {
        self.groups
    }

    pub fn get(&self, reading: &str) -> Option<&ReadingGroup> {
        self.groups.iter().find(|g| g.reading == reading)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Mutable builder for a `ReadingTable`.
#[derive(Debug, Clone)]
pub struct Accumulator {
    class: ReadingClass,
    groups: Vec<ReadingGroup>,
    by_reading: HashMap<String, usize>,
}

impl Accumulator {
    pub fn new(class: ReadingClass) -> Self {
        Self {
            class,
            groups: Vec::new(),
            by_reading: HashMap::new(),
        }
    }

    fn group_mut(&mut self, reading: &str) -> &mut ReadingGroup {
        let index = match self.by_reading.get(reading) {
            Some(&index) => index,
            None => {
                self.groups.push(ReadingGroup {
                    reading: reading.to_string(),
                    attributes: Vec::new(),
                });
                self.by_reading
                    .insert(reading.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    /// Associate `contributor` with `reading` through `variant`.
    pub fn add(&mut self, reading: &str, contributor: Contributor, rank: u32, variant: Variant) {
        let group = self.group_mut(reading);
        match group
            .attributes
            .iter_mut()
            .find(|a| a.contributor == contributor)
        {
            Some(existing) => {
                if !existing.variants.iter().any(|v| *v == variant) {
                    existing.variants.push(variant);
                }
            }
            None => group.attributes.push(ReadingAttribute {
                contributor,
                rank,
                variants: Variants::Single(variant),
            }),
        }
    }

    /// Associate a whole word form with `reading`.
    ///
    /// A word seen again under the same reading keeps one attribute; the new
    /// meaning is appended to the old one with `", "` unless one of the
    /// meanings already joined there is the same text.
    pub fn add_word(&mut self, reading: &str, word: &str, rank: u32, meaning: &str) {
        let contributor = Contributor::Word(word.to_string());
        let group = self.group_mut(reading);
        if let Some(existing) = group
            .attributes
            .iter_mut()
            .find(|a| a.contributor == contributor)
        {
            for variant in existing.variants.as_mut_slice() {
                if variant.affix == AffixTag::IrregularMeaning
                    && !has_meaning(&variant.spelling, meaning)
                {
                    variant.spelling.push_str(words::MEANING_JOIN);
                    variant.spelling.push_str(meaning);
                }
            }
            return;
        }
        group.attributes.push(ReadingAttribute {
            contributor,
            rank,
            variants: Variants::Multiple(vec![
                Variant::new(AffixTag::IrregularWord, word),
                Variant::new(AffixTag::IrregularMeaning, meaning),
            ]),
        });
    }

    /// Sort attributes by rank and hand over the finished table.
    pub fn freeze(mut self) -> ReadingTable {
        for group in &mut self.groups {
            group.attributes.sort_by_key(|a| a.rank);
        }
        ReadingTable {
            class: self.class,
            groups: self.groups,
        }
    }
}

fn has_meaning(joined: &str, meaning: &str) -> bool {
    joined == meaning || joined.split(words::MEANING_JOIN).any(|m| m == meaning)
}

/// Cross-reference one kanji class from the ranked catalog.
///
/// Unranked characters never reach the table.
pub fn build_character_table(
    catalog: &Catalog,
    class: ReadingClass,
    diagnostics: &mut Diagnostics,
) -> Result<ReadingTable, CompileError> {
    let mut acc = Accumulator::new(class);

    for entry in catalog.ranked() {
        for raw in entry.readings(class) {
            let label = Contributor::Character(entry.code_point).to_string();
            let parsed = parse_reading(class, raw, &label)?;
            if parsed.stray_marker {
                diagnostics.push(
                    DiagnosticKind::StrayMarker,
                    format!(
                        "{} reading '{}' of {} has a trailing '{}'; stripped",
                        class, raw, label, AFFIX_MARKER
                    ),
                );
            }
            acc.add(
                &parsed.core,
                Contributor::Character(entry.code_point),
                entry.rank,
                parsed.variant,
            );
        }
    }

    let table = acc.freeze();
    tracing::debug!(%class, readings = table.len(), "built cross-reference table");
    Ok(table)
}
