// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Compiled-word dictionary assembly.
//!
//! Several word-frequency tables are merged into one ranked word list, which
//! then becomes the fourth reading class. Sources are applied in order, each
//! with a policy:
//!
//! | Policy       | Row matches an earlier (reading, word) | Row is new          |
//! |--------------|----------------------------------------|---------------------|
//! | `base`       | appended anyway                        | appended            |
//! | `rerank`     | every match takes the row's rank       | appended            |
//! | `supplement` | skipped                                | appended            |
//!
//! "Earlier" means entries from previous sources only; rows of the source
//! being applied never match each other.
//!
//! An optional lemma list (most frequent first) then overrides ranks by word
//! form alone: every entry spelled like the lemma at position `i` gets rank
//! `i + 1`, and a later position overwrites an earlier one.
//!
//! Selection keeps ranked words that contain at least one kanji, all of them
//! in the ranked catalog, and rank no worse than the cut-off. Survivors are
//! ordered by rank (stable) before grouping.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Accumulator, ReadingTable};
use crate::catalog::Catalog;
use crate::error::{CompileError, DiagnosticKind, Diagnostics};
use crate::types::{ReadingClass, WordRow};
use crate::utils::{contains_kanji, is_kanji, normalize_reading};

/// Joins the meanings of a word listed twice under one reading.
pub const MEANING_JOIN: &str = ", ";

/// How a word source combines with the sources before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    #[default]
    Base,
    Rerank,
    Supplement,
}

/// One word table plus how to apply it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSource {
    pub name: String,
    pub policy: MergePolicy,
    pub rows: Vec<WordRow>,
}

/// A word after merging. `rank` is `None` until something ranks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordEntry {
    pub reading: String,
    pub word: String,
    pub meaning: String,
    pub rank: Option<u32>,
}

fn parse_rank(source: &str, row: &WordRow) -> Result<Option<u32>, CompileError> {
    match row.rank.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| CompileError::InvalidRank {
                context: format!("word '{}' ({}) in {}", row.word, row.reading, source),
                value: value.to_string(),
            }),
    }
}

/// Apply every source in order.
pub fn merge_sources(sources: &[WordSource]) -> Result<Vec<WordEntry>, CompileError> {
    let mut entries: Vec<WordEntry> = Vec::new();

    for source in sources {
        // Positions of entries from earlier sources, by (reading, word).
        let mut earlier: HashMap<(String, String), Vec<usize>> = HashMap::new();
        for (i, e) in entries.iter().enumerate() {
            earlier
                .entry((e.reading.clone(), e.word.clone()))
                .or_default()
                .push(i);
        }

        let mut appended = Vec::new();
        for row in &source.rows {
            let rank = parse_rank(&source.name, row)?;
            let entry = WordEntry {
                reading: normalize_reading(&row.reading),
                word: row.word.trim().to_string(),
                meaning: row.meaning.trim().to_string(),
                rank,
            };
            let matches = earlier.get(&(entry.reading.clone(), entry.word.clone()));

            match (source.policy, matches) {
                (MergePolicy::Rerank, Some(positions)) => {
                    for &i in positions {
                        entries[i].rank = rank;
                    }
                }
                (MergePolicy::Supplement, Some(_)) => {}
                _ => appended.push(entry),
            }
        }

        tracing::debug!(
            source = %source.name,
            policy = ?source.policy,
            rows = source.rows.len(),
            appended = appended.len(),
            "merged word source"
        );
        entries.extend(appended);
    }

    Ok(entries)
}

/// Rank entries by the position of their word form in `lemmas`.
pub fn apply_lemma_ranking(entries: &mut [WordEntry], lemmas: &[String]) {
    let mut by_word: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, e) in entries.iter().enumerate() {
        by_word.entry(e.word.as_str()).or_default().push(i);
    }

    let mut rank_of: Vec<Option<u32>> = vec![None; entries.len()];
    for (position, lemma) in lemmas.iter().enumerate() {
        if let Some(matches) = by_word.get(lemma.trim()) {
            for &i in matches {
                rank_of[i] = Some(position as u32 + 1);
            }
        }
    }

    for (entry, rank) in entries.iter_mut().zip(rank_of) {
        if rank.is_some() {
            entry.rank = rank;
        }
    }
}

/// Filter and order merged entries. Returns `(entry, rank)` pairs by rank.
pub fn select_words(
    entries: Vec<WordEntry>,
    catalog: &Catalog,
    max_rank: u32,
    diagnostics: &mut Diagnostics,
) -> Vec<(WordEntry, u32)> {
    let mut kept: Vec<(WordEntry, u32)> = Vec::with_capacity(entries.len());

    for entry in entries {
        let Some(rank) = entry.rank else {
            diagnostics.push(
                DiagnosticKind::UnrankedWord,
                format!("word '{}' ({}) has no rank; dropped", entry.word, entry.reading),
            );
            continue;
        };
        if !contains_kanji(&entry.word) {
            diagnostics.push(
                DiagnosticKind::KanaOnlyWord,
                format!("word '{}' has no kanji; dropped", entry.word),
            );
            continue;
        }
        if let Some(missing) = entry
            .word
            .chars()
            .find(|&c| is_kanji(c) && !catalog.is_ranked_literal(c))
        {
            diagnostics.push(
                DiagnosticKind::MissingCrossReference,
                format!(
                    "word '{}' ({}) uses '{}', which is not in the ranked catalog; dropped",
                    entry.word, entry.reading, missing
                ),
            );
            continue;
        }
        kept.push((entry, rank));
    }

    kept.sort_by_key(|(_, rank)| *rank);

    let before = kept.len();
    kept.retain(|(_, rank)| *rank <= max_rank);
    if kept.len() < before {
        diagnostics.push(
            DiagnosticKind::RareWord,
            format!(
                "{} words ranked past {} dropped",
                before - kept.len(),
                max_rank
            ),
        );
    }

    kept
}

/// Group selected words by reading.
pub fn build_word_table(words: &[(WordEntry, u32)]) -> ReadingTable {
    let mut acc = Accumulator::new(ReadingClass::Dictionary);
    for (entry, rank) in words {
        acc.add_word(&entry.reading, &entry.word, *rank, &entry.meaning);
    }
    let table = acc.freeze();
    tracing::debug!(words = words.len(), readings = table.len(), "built word table");
    table
}

/// Merge, rank, select and group in one go.
pub fn assemble_words(
    sources: &[WordSource],
    lemmas: Option<&[String]>,
    catalog: &Catalog,
    max_rank: u32,
    diagnostics: &mut Diagnostics,
) -> Result<ReadingTable, CompileError> {
    let mut entries = merge_sources(sources)?;
    if let Some(lemmas) = lemmas {
        apply_lemma_ranking(&mut entries, lemmas);
    }
    let selected = select_words(entries, catalog, max_rank, diagnostics);
    Ok(build_word_table(&selected))
}
