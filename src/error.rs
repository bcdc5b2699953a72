// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fatal errors and the non-fatal diagnostic log.
//!
//! Two severities. A `CompileError` stops the affected reading class before
//! anything is emitted: a half-built tree is worse than no tree. A
//! `Diagnostic` records something that was dropped or adjusted on the way
//! (a character with no readings, a word whose kanji are not in the catalog)
//! and the compile carries on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ReadingClass;
use crate::verify::InvariantError;

/// A condition that aborts compilation.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{class} reading '{reading}' of {contributor} has more than one '.' separator")]
    TooManySeparators {
        class: ReadingClass,
        reading: String,
        contributor: String,
    },

    #[error("{class} reading '{reading}' of {contributor} is empty once markers are removed")]
    EmptyReading {
        class: ReadingClass,
        reading: String,
        contributor: String,
    },

    #[error("unparseable rank '{value}' for {context}")]
    InvalidRank { context: String, value: String },

    #[error("invalid code point '{value}' for character '{literal}'")]
    InvalidCodePoint { literal: String, value: String },

    #[error("catalog literal '{literal}' is not a single character")]
    InvalidLiteral { literal: String },

    #[error("catalog literal '{literal}' is not the character at code point U+{code_point:04X}")]
    LiteralMismatch { literal: char, code_point: u32 },

    #[error("{class} reading '{reading}' contains '{syllable}', which is not in the kana table")]
    UnknownSyllable {
        class: ReadingClass,
        reading: String,
        syllable: char,
    },

    #[error("invalid kana table entry '{kana}' => '{value}' (expected one kana and two hex digits)")]
    InvalidKanaEntry { kana: String, value: String },

    #[error("{class} key collision on {key:#x}: '{first}' and '{second}' hash to the same key")]
    KeyCollision {
        class: ReadingClass,
        key: u32,
        first: String,
        second: String,
    },

    #[error("failed to emit {artifact}: {message}")]
    Emit { artifact: String, message: String },

    #[error("{class} index invariant violated: {source}")]
    Invariant {
        class: ReadingClass,
        #[source]
        source: InvariantError,
    },
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// What kind of non-fatal adjustment happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Catalog row with no onyomi, kunyomi or nanori.
    NoReadings,
    /// Second catalog row for an already-seen code point.
    DuplicateCharacter,
    /// Ranked by the catalog but absent from the secondary ranking.
    MissingFromSecondary,
    /// Still at the unranked sentinel after reconciliation.
    Unranked,
    /// A marker that the reading class does not allow (onyomi `xyz-`).
    StrayMarker,
    /// Compiled word without any frequency rank.
    UnrankedWord,
    /// Compiled word spelled entirely in kana.
    KanaOnlyWord,
    /// Compiled word past the rank cut-off.
    RareWord,
    /// Compiled word using a kanji that is not in the ranked catalog.
    MissingCrossReference,
}

impl DiagnosticKind {
    /// Kinds worth surfacing at `warn` level; the rest are routine filtering.
    pub fn is_notable(self) -> bool {
        matches!(
            self,
            DiagnosticKind::DuplicateCharacter
                | DiagnosticKind::StrayMarker
                | DiagnosticKind::MissingCrossReference
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Accumulated non-fatal diagnostics, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and forward it to the tracing subscriber.
    pub fn push(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        if kind.is_notable() {
            tracing::warn!(?kind, "{}", message);
        } else {
            tracing::debug!(?kind, "{}", message);
        }
        self.entries.push(Diagnostic { kind, message });
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Per-kind totals, sorted by kind.
    pub fn summary(&self) -> Vec<(DiagnosticKind, usize)> {
        let mut counts = std::collections::BTreeMap::new();
        for d in &self.entries {
            *counts.entry(d.kind).or_insert(0usize) += 1;
        }
        counts.into_iter().collect()
    }
}
