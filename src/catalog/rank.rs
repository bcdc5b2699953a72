// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Rank reconciliation between the catalog and a corpus frequency list.
//!
//! The catalog's own frequency field covers ~2500 characters and is dated.
//! A corpus ranking is fresher but misses characters that are plainly common.
//! So the corpus wins when it has an opinion, and the catalog rank is the
//! fallback:
//!
//! ```text
//! in secondary list              → secondary rank
//! primary < VERY_COMMON (8000)   → primary rank (trusted over the omission)
//! primary < COMMON (10000)       → MISSING_SECONDARY (9000), kept but last
//! otherwise                      → UNRANKED (10000), excluded
//! ```
//!
//! # Constants
//!
//! These were tuned against one specific pair of corpora. They are kept as
//! named, overridable values rather than rederived; changing them needs
//! sign-off from whoever owns the word lists.
//!
//! | Constant                 | Value  | Meaning                                 |
//! |--------------------------|--------|-----------------------------------------|
//! | `UNRANKED_RANK`          | 10000  | Sentinel; excluded from every class     |
//! | `OVERRIDE_RANK`          | 8000   | Catalog gave no rank, allowlist did     |
//! | `MISSING_SECONDARY_RANK` | 9000   | Ranked by catalog, absent from corpus   |
//! | `COMMON_THRESHOLD`       | 10000  | Below this, absence is not exclusion    |
//! | `VERY_COMMON_THRESHOLD`  | 8000   | Below this, keep the catalog rank       |

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Catalog;
use crate::error::{DiagnosticKind, Diagnostics};
use crate::types::SecondaryRank;

/// Sentinel rank for characters too rare to index.
pub const UNRANKED_RANK: u32 = 10_000;

/// Rank given to allowlisted characters the catalog did not rank.
pub const OVERRIDE_RANK: u32 = 8_000;

/// Rank for catalog-ranked characters missing from the secondary list.
pub const MISSING_SECONDARY_RANK: u32 = 9_000;

/// Primary ranks below this survive absence from the secondary list.
pub const COMMON_THRESHOLD: u32 = 10_000;

/// Primary ranks below this are kept as-is when the secondary list is silent.
pub const VERY_COMMON_THRESHOLD: u32 = 8_000;

/// Highest word rank admitted into the compiled-word dictionary.
pub const MAX_WORD_RANK: u32 = 15_294;

/// Characters more common in everyday text than the catalog suggests.
pub const OVERRIDE_LITERALS: &[char] = &[
    '昧', '碗', '潰', '柵', '璧', '賦', '頁', '覗', '廻', '箇', '彙', '窟', '旦', '拶', '云',
    '塞', '曖', '勿', '嘩', '茸', '萎', '紐', '繋', '籠', '痺', '餃', '飴', '戚', '隙', '且',
    '丙', '伎', '侶', '傲', '僅', '冶', '刹', '剝', '勃', '勾', '吏', '咽', '唾', '喩', '嘲',
    '塑', '塡', '墾', '妬', '宛', '巾', '弄', '弐', '慄', '憬', '拉', '捗', '捻', '斤', '朕',
    '桁', '梗', '楷', '毀', '氾', '汰', '沃', '淫', '溺', '濫', '爵', '璃', '璽', '痘', '痩',
    '瘍', '瞭', '箋', '綻', '緻', '羞', '羨', '耗', '肘', '腺', '臆', '舷', '苛', '蔽', '虞',
    '詣', '詮', '諧', '謁', '貌', '貪', '賂', '踪', '辣', '遜', '遡', '遵', '酎', '醒', '采',
    '錮', '頓', '頰', '顎', '骸', '鬱',
];

/// Tunable ranking thresholds. Every field defaults to the constant above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankPolicy {
    pub unranked: u32,
    pub override_rank: u32,
    pub missing_secondary_rank: u32,
    pub common_threshold: u32,
    pub very_common_threshold: u32,
    pub overrides: Vec<char>,
}

impl Default for RankPolicy {
    fn default() -> Self {
        Self {
            unranked: UNRANKED_RANK,
            override_rank: OVERRIDE_RANK,
            missing_secondary_rank: MISSING_SECONDARY_RANK,
            common_threshold: COMMON_THRESHOLD,
            very_common_threshold: VERY_COMMON_THRESHOLD,
            overrides: OVERRIDE_LITERALS.to_vec(),
        }
    }
}

impl RankPolicy {
    /// Catalog rank, falling back to the allowlist, then to unranked.
    pub fn primary_rank(&self, literal: char, frequency: Option<u32>) -> u32 {
        match frequency {
            Some(rank) => rank,
            None if self.overrides.contains(&literal) => self.override_rank,
            None => self.unranked,
        }
    }

    /// Canonical rank from a primary rank and an optional secondary rank.
    pub fn reconcile(&self, primary: u32, secondary: Option<u32>) -> u32 {
        match secondary {
            Some(rank) => rank,
            None if primary < self.very_common_threshold => primary,
            None if primary < self.common_threshold => self.missing_secondary_rank,
            None => self.unranked,
        }
    }

    /// Whether a canonical rank earns a place in the reading classes.
    pub fn is_ranked(&self, rank: u32) -> bool {
        rank < self.unranked
    }
}

/// Apply the secondary ranking to every catalog entry.
///
/// Characters left at the sentinel stay in the catalog (they can still be
/// looked up by identity) but `Catalog::ranked` skips them.
pub fn reconcile(
    catalog: Catalog,
    secondary: &[SecondaryRank],
    policy: &RankPolicy,
    diagnostics: &mut Diagnostics,
) -> Catalog {
    // First occurrence of a glyph wins.
    let mut by_literal: HashMap<&str, u32> = HashMap::with_capacity(secondary.len());
    for row in secondary {
        by_literal.entry(row.literal.as_str()).or_insert(row.rank);
    }

    let mut glyph = [0u8; 4];
    let entries = catalog
        .into_entries()
        .into_iter()
        .map(|mut entry| {
            let literal: &str = entry.literal.encode_utf8(&mut glyph);
            let secondary_rank = by_literal.get(literal).copied();
            entry.rank = policy.reconcile(entry.primary_rank, secondary_rank);

            if secondary_rank.is_none() && entry.primary_rank < policy.common_threshold {
                diagnostics.push(
                    DiagnosticKind::MissingFromSecondary,
                    format!(
                        "{} (U+{:04X}) ranked {} by the catalog but absent from the secondary list; using {}",
                        entry.literal, entry.code_point, entry.primary_rank, entry.rank
                    ),
                );
            }
            if !policy.is_ranked(entry.rank) {
                diagnostics.push(
                    DiagnosticKind::Unranked,
                    format!(
                        "{} (U+{:04X}) is unranked and excluded from the reading classes",
                        entry.literal, entry.code_point
                    ),
                );
            }
            entry
        })
        .collect();

    Catalog::from_entries(entries, policy.unranked)
}
