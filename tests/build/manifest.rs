//! Tests for manifest parsing and source loading.

use std::path::Path;

use kandex::build::{load_sources, read_manifest, MANIFEST_VERSION};
use kandex::xref::MergePolicy;

use crate::common::BUILD_FIXTURES_DIR;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(BUILD_FIXTURES_DIR).join(name)
}

#[test]
fn test_read_valid_manifest() {
    let manifest = read_manifest(&fixture("valid")).unwrap();
    assert_eq!(manifest.version, MANIFEST_VERSION);
    assert_eq!(manifest.catalog, "kanjidic.json");
    assert_eq!(manifest.max_word_rank, 1000);

    let policies: Vec<MergePolicy> = manifest.word_sources.iter().map(|d| d.policy).collect();
    assert_eq!(
        policies,
        vec![MergePolicy::Base, MergePolicy::Rerank, MergePolicy::Supplement]
    );
}

#[test]
fn test_unsupported_version_is_rejected() {
    let err = read_manifest(&fixture("bad-version")).unwrap_err();
    assert!(err.to_string().contains("unsupported manifest version 99"), "{}", err);
}

#[test]
fn test_missing_manifest_names_the_path() {
    let err = read_manifest(&fixture("does-not-exist")).unwrap_err();
    assert!(format!("{:#}", err).contains("manifest.json"), "{:#}", err);
}

#[test]
fn test_load_sources() {
    let dir = fixture("valid");
    let manifest = read_manifest(&dir).unwrap();
    let sources = load_sources(&dir, &manifest).unwrap();

    assert_eq!(sources.catalog.len(), 10);
    assert_eq!(sources.secondary.len(), 6);
    assert_eq!(sources.word_sources.len(), 3);
    assert_eq!(sources.word_sources[0].name, "core.json");
    assert_eq!(sources.word_sources[1].rows.len(), 2);
    assert_eq!(sources.lemmas.as_deref().map(<[String]>::len), Some(3));
    // Hiragana, iteration marks, katakana, prolonged sound mark and katakana
    // iteration marks.
    assert_eq!(sources.kana_table.len(), 86 + 2 + 90 + 3);
    assert_eq!(sources.kana_table.byte('ひ'), Some(0x72));
}

#[test]
fn test_missing_source_file_is_an_error() {
    let temp = tempfile::TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("manifest.json"),
        r#"{"version": 1, "catalog": "missing.json", "secondary_ranking": "novel.json"}"#,
    )
    .unwrap();

    let manifest = read_manifest(temp.path()).unwrap();
    let err = load_sources(temp.path(), &manifest).unwrap_err();
    assert!(format!("{:#}", err).contains("missing.json"), "{:#}", err);
}
