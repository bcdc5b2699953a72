// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The character catalog: raw rows in, ranked usable characters out.
//!
//! ```text
//! RawCharacter rows ──► normalize ──► Catalog (primary ranks)
//!                                        │
//!        secondary ranking ──► rank::reconcile ──► Catalog (canonical ranks)
//! ```
//!
//! Normalization drops rows with no readings, keeps the first row for a
//! repeated code point, and joins the meaning list into one string. It never
//! looks at the secondary ranking, so running it twice on the same rows gives
//! the same catalog.
//!
//! The catalog is read-only from here on; every reading class borrows it.

pub mod rank;

use std::collections::HashMap;

pub use rank::{
    reconcile, RankPolicy, COMMON_THRESHOLD, MAX_WORD_RANK, MISSING_SECONDARY_RANK,
    OVERRIDE_LITERALS, OVERRIDE_RANK, UNRANKED_RANK, VERY_COMMON_THRESHOLD,
};

use crate::error::{CompileError, DiagnosticKind, Diagnostics};
use crate::types::{CharacterEntry, RawCharacter};
use crate::utils::code_point_runs;

/// Separator between the meanings of one character.
pub const MEANING_SEPARATOR: &str = ", ";

/// Usable characters, ordered by (rank, code point).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CharacterEntry>,
    by_code_point: HashMap<u32, usize>,
    by_literal: HashMap<char, usize>,
    unranked: u32,
}

impl Catalog {
    /// Turn raw catalog rows into a catalog with primary ranks.
    ///
    /// Malformed code points, literals and frequencies are fatal. Rows with
    /// no readings and repeated code points are dropped with a diagnostic.
    pub fn normalize(
        rows: &[RawCharacter],
        policy: &RankPolicy,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self, CompileError> {
        let mut entries: Vec<CharacterEntry> = Vec::with_capacity(rows.len());
        let mut seen: HashMap<u32, char> = HashMap::with_capacity(rows.len());

        for row in rows {
            let entry = parse_row(row, policy)?;

            if entry.reading_count() == 0 {
                diagnostics.push(
                    DiagnosticKind::NoReadings,
                    format!(
                        "{} (U+{:04X}) has no onyomi, kunyomi or nanori; dropped",
                        entry.literal, entry.code_point
                    ),
                );
                continue;
            }
            if let Some(first) = seen.get(&entry.code_point) {
                diagnostics.push(
                    DiagnosticKind::DuplicateCharacter,
                    format!(
                        "U+{:04X} appears again as '{}'; keeping the first row ('{}')",
                        entry.code_point, entry.literal, first
                    ),
                );
                continue;
            }

            seen.insert(entry.code_point, entry.literal);
            entries.push(entry);
        }

        tracing::debug!(rows = rows.len(), usable = entries.len(), "normalized catalog");
        Ok(Self::from_entries(entries, policy.unranked))
    }

    /// Index already-validated entries. Entries are re-sorted by (rank, code point).
    pub(crate) fn from_entries(mut entries: Vec<CharacterEntry>, unranked: u32) -> Self {
        entries.sort_by_key(|e| (e.rank, e.code_point));
        let by_code_point = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.code_point, i))
            .collect();
        let by_literal = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.literal, i))
            .collect();
        Self {
            entries,
            by_code_point,
            by_literal,
            unranked,
        }
    }

    pub(crate) fn into_entries(self) -> Vec<CharacterEntry> {
        self.entries
    }

    /// Every entry, ranked or not, in (rank, code point) order.
    pub fn entries(&self) -> &[CharacterEntry] {
        &self.entries
    }

    /// Entries that feed the reading classes: rank below the sentinel.
    pub fn ranked(&self) -> impl Iterator<Item = &CharacterEntry> + '_ {
        let unranked = self.unranked;
        self.entries.iter().filter(move |e| e.rank < unranked)
    }

    /// Ranked entries ordered by code point.
    pub fn by_code_point(&self) -> Vec<&CharacterEntry> {
        let mut ranked: Vec<&CharacterEntry> = self.ranked().collect();
        ranked.sort_by_key(|e| e.code_point);
        ranked
    }

    /// Ranked code points compacted into inclusive runs.
    pub fn code_point_ranges(&self) -> Vec<(u32, u32)> {
        let code_points: Vec<u32> = self.by_code_point().iter().map(|e| e.code_point).collect();
        code_point_runs(&code_points)
    }

    pub fn get(&self, code_point: u32) -> Option<&CharacterEntry> {
        self.by_code_point.get(&code_point).map(|&i| &self.entries[i])
    }

    pub fn find_literal(&self, literal: char) -> Option<&CharacterEntry> {
        self.by_literal.get(&literal).map(|&i| &self.entries[i])
    }

    /// Whether `literal` is in the catalog with a usable rank.
    pub fn is_ranked_literal(&self, literal: char) -> bool {
        self.find_literal(literal)
            .is_some_and(|e| e.rank < self.unranked)
    }

    pub fn unranked_sentinel(&self) -> u32 {
        self.unranked
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_row(row: &RawCharacter, policy: &RankPolicy) -> Result<CharacterEntry, CompileError> {
    let mut chars = row.literal.chars();
    let literal = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(CompileError::InvalidLiteral {
                literal: row.literal.clone(),
            })
        }
    };

    let hex = row.code_point.trim();
    let hex = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("U+"))
        .unwrap_or(hex);
    let code_point = u32::from_str_radix(hex, 16)
        .ok()
        .filter(|&cp| char::from_u32(cp).is_some())
        .ok_or_else(|| CompileError::InvalidCodePoint {
            literal: row.literal.clone(),
            value: row.code_point.clone(),
        })?;
    if u32::from(literal) != code_point {
        return Err(CompileError::LiteralMismatch {
            literal,
            code_point,
        });
    }

    let frequency = match row.frequency.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(value.parse::<u32>().map_err(|_| CompileError::InvalidRank {
            context: format!("catalog entry {} (U+{:04X})", literal, code_point),
            value: value.to_string(),
        })?),
    };

    let primary_rank = policy.primary_rank(literal, frequency);
    Ok(CharacterEntry {
        code_point,
        literal,
        primary_rank,
        rank: primary_rank,
        meaning: row.meanings.join(MEANING_SEPARATOR),
        onyomi: row.onyomi.clone(),
        kunyomi: row.kunyomi.clone(),
        nanori: row.nanori.clone(),
    })
}
