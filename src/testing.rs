//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures so every test builds on the same
//! small dictionary.

#![doc(hidden)]

use crate::build::SourceTables;
use crate::catalog::{self, Catalog, RankPolicy};
use crate::error::Diagnostics;
use crate::hash::KanaTable;
use crate::types::{RawCharacter, SecondaryRank, WordRow};
use crate::xref::{MergePolicy, WordSource};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Create a catalog row without meanings.
pub fn raw_character(
    code_point: &str,
    literal: &str,
    frequency: Option<&str>,
    onyomi: &[&str],
    kunyomi: &[&str],
    nanori: &[&str],
) -> RawCharacter {
    RawCharacter {
        code_point: code_point.to_string(),
        literal: literal.to_string(),
        frequency: frequency.map(str::to_string),
        meanings: vec![],
        onyomi: strings(onyomi),
        kunyomi: strings(kunyomi),
        nanori: strings(nanori),
    }
}

/// Create a word-frequency row.
pub fn word_row(reading: &str, word: &str, meaning: &str, rank: Option<&str>) -> WordRow {
    WordRow {
        reading: reading.to_string(),
        word: word.to_string(),
        meaning: meaning.to_string(),
        rank: rank.map(str::to_string),
    }
}

fn with_meanings(mut row: RawCharacter, meanings: &[&str]) -> RawCharacter {
    row.meanings = strings(meanings);
    row
}

/// Catalog rows of the sample dictionary. The first row is always ranked.
///
/// 龘 has no frequency and stays unranked; nothing else is excluded.
pub fn sample_rows() -> Vec<RawCharacter> {
    vec![
        with_meanings(
            raw_character("4e00", "一", Some("2"), &["イチ", "イツ"], &["ひと", "ひと.つ"], &["かず"]),
            &["one"],
        ),
        with_meanings(
            raw_character("65e5", "日", Some("1"), &["ニチ", "ジツ"], &["ひ", "-び", "-か"], &["あき", "か"]),
            &["day", "sun", "Japan"],
        ),
        with_meanings(
            raw_character("672c", "本", Some("10"), &["ホン"], &["もと"], &["はじめ"]),
            &["book", "origin"],
        ),
        with_meanings(
            raw_character(
                "884c",
                "行",
                Some("20"),
                &["コウ", "ギョウ"],
                &["い.く", "ゆ.く", "おこな.う", "-おこな.う"],
                &[],
            ),
            &["going", "journey"],
        ),
        with_meanings(
            raw_character("706b", "火", Some("50"), &["カ"], &["ひ", "-び"], &[]),
            &["fire"],
        ),
        with_meanings(
            raw_character("5fa1", "御", Some("8500"), &["ギョ", "ゴ"], &["お-", "おん-", "み-"], &[]),
            &["honorable"],
        ),
        raw_character("9f98", "龘", None, &["トウ"], &[], &[]),
    ]
}

/// Secondary ranking of the sample dictionary. 御 is left out on purpose.
pub fn sample_secondary() -> Vec<SecondaryRank> {
    [("日", 1), ("一", 2), ("本", 3), ("行", 4), ("火", 7)]
        .iter()
        .map(|&(literal, rank)| SecondaryRank {
            literal: literal.to_string(),
            rank,
        })
        .collect()
}

/// Word sources of the sample dictionary: a base list and a supplement.
pub fn sample_word_sources() -> Vec<WordSource> {
    vec![
        WordSource {
            name: "core".into(),
            policy: MergePolicy::Base,
            rows: vec![
                word_row("にほん", "日本", "Japan", Some("12")),
                word_row("ひとつ", "一つ", "one thing", Some("40")),
                word_row("ほんじつ", "本日", "today", Some("80")),
                word_row("きょう", "今日", "today", Some("5")),
                word_row("これ", "これ", "this", Some("1")),
            ],
        },
        WordSource {
            name: "juku".into(),
            policy: MergePolicy::Supplement,
            rows: vec![
                word_row("にほん", "日本", "Japan", None),
                word_row("にっぽん", "日本", "Japan (formal)", Some("300")),
            ],
        },
    ]
}

/// The sample catalog, normalized and reconciled.
///
/// Ranked: 日, 一, 本, 行, 火, 御. Unranked: 龘.
pub fn sample_catalog() -> Catalog {
    let policy = RankPolicy::default();
    let mut log = Diagnostics::new();
    let normalized = Catalog::normalize(&sample_rows(), &policy, &mut log)
        .unwrap_or_else(|e| panic!("sample rows must normalize: {}", e));
    catalog::reconcile(normalized, &sample_secondary(), &policy, &mut log)
}

/// Every input of the sample dictionary, with the built-in kana table.
pub fn sample_sources() -> SourceTables {
    SourceTables {
        catalog: sample_rows(),
        secondary: sample_secondary(),
        word_sources: sample_word_sources(),
        lemmas: None,
        kana_table: KanaTable::unicode_low_byte(),
    }
}
