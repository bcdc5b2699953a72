//! Utility functions for kana and kanji strings.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// First CJK unified ideograph. Characters below it (kana, punctuation,
/// Latin) are never looked up in the catalog.
pub const FIRST_KANJI: char = '\u{4E00}';

/// Normalize a reading before it is grouped or keyed.
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFKC normalize: half-width katakana become full-width, and a kana
///    followed by a combining voiced mark composes into one unit
///    (`か` + U+3099 → `が`), so every unit has a table entry
/// 2. Trim surrounding whitespace
///
/// # Algorithm (without unicode-normalization)
///
/// 1. Trim surrounding whitespace (assumes input is pre-normalized)
#[cfg(feature = "unicode-normalization")]
pub fn normalize_reading(value: &str) -> String {
    value.trim().nfkc().collect()
}

/// Lightweight normalization without the unicode-normalization dependency.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize_reading(value: &str) -> String {
    value.trim().to_string()
}

/// Whether `c` is at or past the first CJK ideograph.
#[inline]
pub fn is_kanji(c: char) -> bool {
    c >= FIRST_KANJI
}

/// Whether a word form contains at least one kanji.
pub fn contains_kanji(word: &str) -> bool {
    word.chars().any(is_kanji)
}

/// Compress ascending code points into inclusive `(start, end)` runs.
///
/// `[0x4E00, 0x4E01, 0x4E03]` becomes `[(0x4E00, 0x4E01), (0x4E03, 0x4E03)]`.
/// Input must already be sorted and free of duplicates.
pub fn code_point_runs(sorted: &[u32]) -> Vec<(u32, u32)> {
    let mut runs: Vec<(u32, u32)> = Vec::new();
    for &cp in sorted {
        match runs.last_mut() {
            Some((_, end)) if *end + 1 == cp => *end = cp,
            _ => runs.push((cp, cp)),
        }
    }
    runs
}
