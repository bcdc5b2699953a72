//! End-to-end tests for `run_build`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use kandex::build::{compute_crc32, load_and_compile, run_build, OutputFormat, OutputManifest};
use kandex::{DiagnosticKind, ReadingClass};
use tempfile::TempDir;

use crate::common::{assert_dictionary_well_formed, sample_sources, write_input_dir, BUILD_FIXTURES_DIR};

fn fixture(name: &str) -> PathBuf {
    Path::new(BUILD_FIXTURES_DIR).join(name)
}

fn read_output_manifest(dir: &Path) -> OutputManifest {
    let bytes = fs::read(dir.join("manifest.json")).expect("manifest.json should be written");
    serde_json::from_slice(&bytes).expect("manifest.json should parse")
}

// ============================================================================
// C HEADERS
// ============================================================================

#[test]
fn test_build_writes_every_header() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    run_build(&fixture("valid"), &out, OutputFormat::CHeaders, false).unwrap();

    for file in [
        "kanji_ms.h",
        "kanji_md.h",
        "onyomi.h",
        "kunyomi.h",
        "nanori.h",
        "dictionary.h",
        "kana_kanji_subset.txt",
        "manifest.json",
    ] {
        assert!(out.join(file).is_file(), "{} missing", file);
    }
}

#[test]
fn test_manifest_checksums_match_files() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    let report = run_build(&fixture("valid"), &out, OutputFormat::CHeaders, false).unwrap();

    let manifest = read_output_manifest(&out);
    assert_eq!(manifest, report.manifest);
    assert_eq!(manifest.artifacts.len(), 7);
    for entry in &manifest.artifacts {
        let bytes = fs::read(out.join(&entry.file)).unwrap();
        assert_eq!(entry.bytes, bytes.len(), "{}", entry.file);
        assert_eq!(entry.crc32, format!("{:08x}", compute_crc32(&bytes)), "{}", entry.file);
    }
}

#[test]
fn test_record_counts_per_class() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    let report = run_build(&fixture("valid"), &out, OutputFormat::CHeaders, false).unwrap();

    let records: HashMap<&str, usize> = report
        .manifest
        .artifacts
        .iter()
        .map(|a| (a.file.as_str(), a.records))
        .collect();
    assert_eq!(records["onyomi.h"], 12);
    assert_eq!(records["kunyomi.h"], 12);
    assert_eq!(records["nanori.h"], 4);
    assert_eq!(records["dictionary.h"], 5);

    for entry in &report.manifest.artifacts {
        if entry.file.ends_with(".h") && entry.file != "kanji_ms.h" && entry.file != "kanji_md.h" {
            assert_eq!(entry.nodes, entry.records, "{}", entry.file);
        }
    }
    assert_dictionary_well_formed(&report.dictionary);
}

#[test]
fn test_diagnostics_are_summarized() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    let report = run_build(&fixture("valid"), &out, OutputFormat::CHeaders, false).unwrap();

    let counts: HashMap<DiagnosticKind, usize> = report
        .manifest
        .diagnostics
        .iter()
        .map(|d| (d.kind, d.count))
        .collect();
    assert_eq!(counts.get(&DiagnosticKind::NoReadings), Some(&1));
    assert_eq!(counts.get(&DiagnosticKind::DuplicateCharacter), Some(&1));
    assert_eq!(counts.get(&DiagnosticKind::MissingFromSecondary), Some(&2));
    assert_eq!(counts.get(&DiagnosticKind::Unranked), Some(&1));
    assert_eq!(counts.get(&DiagnosticKind::UnrankedWord), Some(&1));
    assert_eq!(counts.get(&DiagnosticKind::KanaOnlyWord), Some(&1));
    assert_eq!(counts.get(&DiagnosticKind::MissingCrossReference), Some(&1));
    assert_eq!(counts.get(&DiagnosticKind::RareWord), Some(&1));
}

#[test]
fn test_catalog_order_and_subset() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    let report = run_build(&fixture("valid"), &out, OutputFormat::CHeaders, false).unwrap();

    let catalog = &report.dictionary.catalog;
    assert_eq!(catalog.len(), 8);
    let ranked: Vec<char> = catalog.ranked().map(|e| e.literal).collect();
    assert_eq!(ranked, vec!['日', '一', '行', '本', '今', '火', '鬱']);

    let metadata = fs::read_to_string(out.join("kanji_md.h")).unwrap();
    let first = metadata.find("kanji_md65E5").unwrap();
    let second = metadata.find("kanji_md4E00").unwrap();
    assert!(first < second);
    assert!(!metadata.contains("kanji_md9F98"));

    let subset = fs::read_to_string(out.join("kana_kanji_subset.txt")).unwrap();
    for cp in ["0x4e00", "0x4eca", "0x65e5", "0x672c", "0x706b", "0x884c", "0x9b31"] {
        assert!(subset.contains(cp), "{} missing from subset", cp);
    }
    assert!(!subset.contains("0x9f98"));
}

#[test]
fn test_dictionary_lookups_after_build() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    let report = run_build(&fixture("valid"), &out, OutputFormat::CHeaders, false).unwrap();
    let dict = &report.dictionary;

    for (reading, rank) in [("きょう", 1), ("にほん", 2), ("いま", 3), ("ひとつ", 15), ("ほんじつ", 80)] {
        let record = dict.lookup(ReadingClass::Dictionary, reading).unwrap().unwrap();
        assert_eq!(record.attributes[0].rank, rank, "{}", reading);
    }
    assert!(dict.lookup(ReadingClass::Dictionary, "ついたち").unwrap().is_none());
    assert!(dict.lookup(ReadingClass::Onyomi, "にち").unwrap().is_some());
}

#[test]
fn test_build_is_deterministic() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a");
    let b = temp.path().join("b");
    run_build(&fixture("valid"), &a, OutputFormat::CHeaders, false).unwrap();
    run_build(&fixture("valid"), &b, OutputFormat::CHeaders, false).unwrap();

    for entry in read_output_manifest(&a).artifacts {
        let left = fs::read(a.join(&entry.file)).unwrap();
        let right = fs::read(b.join(&entry.file)).unwrap();
        assert_eq!(left, right, "{} differs between builds", entry.file);
    }
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn test_json_build() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("json");
    run_build(&fixture("valid"), &out, OutputFormat::Json, false).unwrap();

    let catalog: serde_json::Value =
        serde_json::from_slice(&fs::read(out.join("catalog.json")).unwrap()).unwrap();
    let entries = catalog.as_array().unwrap();
    assert_eq!(entries.len(), 7);
    assert_eq!(entries[0]["literal"], "日");

    let nanori: serde_json::Value =
        serde_json::from_slice(&fs::read(out.join("nanori.json")).unwrap()).unwrap();
    assert_eq!(nanori["class"], "nanori");
    assert_eq!(nanori["records"].as_array().unwrap().len(), 4);
    assert!(out.join("manifest.json").is_file());
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_failed_build_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    let err = run_build(&fixture("bad-reading"), &out, OutputFormat::CHeaders, false).unwrap_err();

    assert!(format!("{:#}", err).contains("おこな.う.え"), "{:#}", err);
    assert!(!out.exists());
}

#[test]
fn test_bad_manifest_version_fails_before_loading() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    assert!(run_build(&fixture("bad-version"), &out, OutputFormat::Json, false).is_err());
    assert!(!out.exists());
}

// ============================================================================
// GENERATED INPUTS
// ============================================================================

#[test]
fn test_written_sources_compile_like_in_memory() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input");
    let sources = sample_sources();
    write_input_dir(&input, &sources);

    let from_disk = load_and_compile(&input, false).unwrap();
    let in_memory = kandex::compile(&sources, &kandex::CompileOptions::default()).unwrap();

    assert_eq!(from_disk.catalog, in_memory.catalog);
    for (a, b) in from_disk.classes.iter().zip(&in_memory.classes) {
        assert_eq!(a.class, b.class);
        assert_eq!(a.records, b.records);
    }
}
