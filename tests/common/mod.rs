//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use kandex::build::{CompiledClass, CompiledDictionary, SourceTables};
use kandex::{ReadingClass, WellFormedTree};
use serde_json::json;

// Re-export canonical fixtures from kandex::testing
pub use kandex::testing::{raw_character, sample_sources, word_row};

/// Directory containing checked-in build fixtures.
pub const BUILD_FIXTURES_DIR: &str = "data/build-fixtures";

// ============================================================================
// INPUT DIRECTORIES
// ============================================================================

fn write_json<T: serde::Serialize>(dir: &Path, file: &str, value: &T) {
    let bytes = serde_json::to_vec_pretty(value).expect("Failed to serialize fixture");
    fs::write(dir.join(file), bytes).expect("Failed to write fixture");
}

/// Write `sources` as an input directory with a manifest.
///
/// The kana table is left out of the manifest, so the built-in one is used.
pub fn write_input_dir(dir: &Path, sources: &SourceTables) {
    fs::create_dir_all(dir).expect("Failed to create input dir");
    write_json(dir, "kanjidic.json", &sources.catalog);
    write_json(dir, "novel.json", &sources.secondary);

    let mut word_sources = Vec::new();
    for (i, source) in sources.word_sources.iter().enumerate() {
        let file = format!("words_{}.json", i);
        write_json(dir, &file, &source.rows);
        word_sources.push(json!({ "path": file, "policy": source.policy }));
    }

    let mut manifest = json!({
        "version": 1,
        "catalog": "kanjidic.json",
        "secondary_ranking": "novel.json",
        "word_sources": word_sources,
    });
    if let Some(lemmas) = &sources.lemmas {
        write_json(dir, "lemmas.json", lemmas);
        manifest["lemma_ranking"] = json!("lemmas.json");
    }
    write_json(dir, "manifest.json", &manifest);
}

// ============================================================================
// ASSERTIONS
// ============================================================================

/// Every class has a sound tree, packed records, and lookups that round-trip.
pub fn assert_dictionary_well_formed(dict: &CompiledDictionary) {
    assert_eq!(dict.classes.len(), ReadingClass::ALL.len());
    for compiled in &dict.classes {
        assert_class_well_formed(compiled);
    }
}

pub fn assert_class_well_formed(compiled: &CompiledClass) {
    WellFormedTree::check(&compiled.tree, compiled.len())
        .unwrap_or_else(|e| panic!("{} tree is malformed: {}", compiled.class, e));
    assert_eq!(compiled.packed.len(), compiled.records.len());
    for record in &compiled.records {
        let found = compiled.find_key(record.key);
        assert_eq!(
            found.map(|r| r.reading.as_str()),
            Some(record.reading.as_str()),
            "{} record {} not reachable through the tree",
            compiled.class,
            record.name()
        );
    }
}
