// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The compile pipeline, from source tables to written artifacts.
//!
//! ```text
//! manifest.json ──► load_sources ──► SourceTables
//!                                        │
//!                      Catalog::normalize + rank::reconcile
//!                                        │
//!          ┌───────────────┬─────────────┴───┬──────────────────┐
//!       onyomi          kunyomi           nanori           dictionary    (parallel)
//!          │               │                 │                  │
//!     cross-ref ──► assign_keys ──► SortedKeys ──► IndexTree ──► pack
//!          └───────────────┴─────────────┬───┴──────────────────┘
//!                                        ▼
//!                              CompiledDictionary ──► Emitter ──► files
//! ```
//!
//! `compile` is pure: tables in, dictionary out. `run_build` wraps it with the
//! file layer and writes nothing until every class has compiled and every
//! artifact is rendered.

pub mod manifest;
pub mod parallel;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
#[cfg(feature = "parallel")]
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::catalog::{self, Catalog, RankPolicy, MAX_WORD_RANK};
use crate::emit::{Artifact, CHeaderEmitter, Emitter, JsonEmitter};
use crate::error::{CompileError, Diagnostics};
use crate::hash::{KanaTable, ReadingKeyer};
use crate::index::IndexTree;
use crate::pack::{pack, PackedRecord};
use crate::types::{RawCharacter, ReadingClass, ReadingRecord, SecondaryRank};
use crate::verify::{contracts, verify_record, InvariantError, SortedKeys, WellFormedTree};
use crate::xref::{assemble_words, build_character_table, ReadingTable, WordSource};

pub use manifest::*;
pub use parallel::*;

/// Everything the compiler reads, already parsed.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub catalog: Vec<RawCharacter>,
    pub secondary: Vec<SecondaryRank>,
    pub word_sources: Vec<WordSource>,
    /// Word forms, most frequent first.
    pub lemmas: Option<Vec<String>>,
    pub kana_table: KanaTable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub ranking: RankPolicy,
    pub max_word_rank: u32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            ranking: RankPolicy::default(),
            max_word_rank: MAX_WORD_RANK,
        }
    }
}

// =============================================================================
// COMPILED OUTPUT
// =============================================================================

/// One indexed reading class.
///
/// `records` and `packed` are parallel and sorted by key; tree nodes refer to
/// records by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledClass {
    pub class: ReadingClass,
    pub records: Vec<ReadingRecord>,
    pub packed: Vec<PackedRecord>,
    pub tree: IndexTree,
}

impl CompiledClass {
    /// Record with this key, found by walking the tree.
    pub fn find_key(&self, key: u32) -> Option<&ReadingRecord> {
        self.tree.find(key).and_then(|i| self.records.get(i))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The catalog plus all four compiled classes.
#[derive(Debug, Clone)]
pub struct CompiledDictionary {
    pub catalog: Catalog,
    pub classes: Vec<CompiledClass>,
    pub diagnostics: Diagnostics,
    keyer: ReadingKeyer,
}

impl CompiledDictionary {
    pub fn class(&self, class: ReadingClass) -> Option<&CompiledClass> {
        self.classes.iter().find(|c| c.class == class)
    }

    pub fn keyer(&self) -> &ReadingKeyer {
        &self.keyer
    }

    /// Look up kana the way the runtime does.
    pub fn lookup(
        &self,
        class: ReadingClass,
        kana: &str,
    ) -> Result<Option<&ReadingRecord>, CompileError> {
        let key = self.keyer.lookup_key(class, kana)?;
        Ok(self.class(class).and_then(|c| c.find_key(key)))
    }
}

// =============================================================================
// COMPILE
// =============================================================================

/// Key, validate, tree and pack a frozen cross-reference table.
pub fn index_table(keyer: &ReadingKeyer, table: ReadingTable) -> Result<CompiledClass, CompileError> {
    let class = table.class();
    let invariant = |source: InvariantError| CompileError::Invariant { class, source };

    let records = keyer.assign_keys(table)?;
    for record in &records {
        contracts::check_attributes_ranked(record);
        verify_record(record).map_err(invariant)?;
    }

    let keyed = SortedKeys::new(records.into_iter().map(|r| (r.key, r)).collect())
        .map_err(invariant)?;
    let tree = IndexTree::build(&keyed);
    let records = keyed.into_records();
    WellFormedTree::check(&tree, records.len()).map_err(invariant)?;

    let packed: Vec<PackedRecord> = records.iter().map(pack).collect();
    tracing::info!(
        %class,
        records = records.len(),
        height = tree.height(),
        plain = packed.iter().filter(|p| p.is_plain()).count(),
        "indexed class"
    );

    Ok(CompiledClass {
        class,
        records,
        packed,
        tree,
    })
}

/// Build the cross-reference table of one class and index it.
pub fn compile_class(
    class: ReadingClass,
    catalog: &Catalog,
    sources: &SourceTables,
    options: &CompileOptions,
    keyer: &ReadingKeyer,
    diagnostics: &mut Diagnostics,
) -> Result<CompiledClass, CompileError> {
    let table = match class {
        ReadingClass::Dictionary => assemble_words(
            &sources.word_sources,
            sources.lemmas.as_deref(),
            catalog,
            options.max_word_rank,
            diagnostics,
        )?,
        _ => build_character_table(catalog, class, diagnostics)?,
    };
    index_table(keyer, table)
}

fn prepare_catalog(
    sources: &SourceTables,
    options: &CompileOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Catalog, CompileError> {
    let catalog = Catalog::normalize(&sources.catalog, &options.ranking, diagnostics)?;
    let catalog = catalog::reconcile(catalog, &sources.secondary, &options.ranking, diagnostics);
    tracing::info!(
        characters = catalog.len(),
        ranked = catalog.ranked().count(),
        "catalog ready"
    );
    Ok(catalog)
}

/// Merge class outcomes in class order; the first failure wins.
fn collect_outcomes(
    catalog: Catalog,
    keyer: ReadingKeyer,
    outcomes: Vec<ClassOutcome>,
    mut diagnostics: Diagnostics,
) -> Result<CompiledDictionary, CompileError> {
    let mut classes = Vec::with_capacity(outcomes.len());
    let mut failure = None;
    for outcome in outcomes {
        diagnostics.extend(outcome.diagnostics);
        match outcome.result {
            Ok(compiled) => classes.push(compiled),
            Err(e) => {
                tracing::error!(class = %outcome.class, "{}", e);
                if failure.is_none() {
                    failure = Some(e);
                }
            }
        }
    }
    if let Some(e) = failure {
        return Err(e);
    }
    Ok(CompiledDictionary {
        catalog,
        classes,
        diagnostics,
        keyer,
    })
}

/// Compile every class from parsed tables.
pub fn compile(
    sources: &SourceTables,
    options: &CompileOptions,
) -> Result<CompiledDictionary, CompileError> {
    let mut diagnostics = Diagnostics::new();
    let catalog = prepare_catalog(sources, options, &mut diagnostics)?;
    let keyer = ReadingKeyer::new(sources.kana_table.clone());
    let outcomes = compile_classes(&catalog, sources, options, &keyer);
    collect_outcomes(catalog, keyer, outcomes, diagnostics)
}

// =============================================================================
// FILE LAYER
// =============================================================================

/// Output format of `run_build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// C constant data for the runtime.
    #[default]
    CHeaders,
    /// JSON dump of the compiled records and trees.
    Json,
}

/// What `run_build` wrote.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub dictionary: CompiledDictionary,
    pub manifest: OutputManifest,
}

/// Create a progress style for the main progress bars
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

/// Load the inputs named by `input_dir/manifest.json` and compile them.
pub fn load_and_compile(input_dir: &Path, show_progress: bool) -> Result<CompiledDictionary> {
    let manifest = read_manifest(input_dir)?;
    let sources = load_sources(input_dir, &manifest)?;
    let options = manifest.options();

    let mut diagnostics = Diagnostics::new();
    let catalog = prepare_catalog(&sources, &options, &mut diagnostics)?;
    let keyer = ReadingKeyer::new(sources.kana_table.clone());

    #[cfg(feature = "parallel")]
    let outcomes = if show_progress {
        let multi = MultiProgress::new();
        let pb = multi.add(ProgressBar::new(ReadingClass::ALL.len() as u64));
        pb.set_style(create_progress_style());
        pb.set_prefix("Compiling");
        pb.set_message("reading classes...");
        let outcomes = compile_classes_with_progress(&catalog, &sources, &options, &keyer, &pb);
        pb.finish_with_message("done");
        outcomes
    } else {
        compile_classes(&catalog, &sources, &options, &keyer)
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes = {
        let _ = show_progress;
        compile_classes_with_progress(&catalog, &sources, &options, &keyer)
    };

    Ok(collect_outcomes(catalog, keyer, outcomes, diagnostics)?)
}

/// Compile and write every artifact plus `manifest.json` into `output_dir`.
pub fn run_build(
    input_dir: &Path,
    output_dir: &Path,
    format: OutputFormat,
    show_progress: bool,
) -> Result<BuildReport> {
    let dictionary = load_and_compile(input_dir, show_progress)?;

    // Render everything before touching the output directory.
    let artifacts: Vec<Artifact> = match format {
        OutputFormat::CHeaders => CHeaderEmitter.emit(&dictionary)?,
        OutputFormat::Json => JsonEmitter.emit(&dictionary)?,
    };

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir {}", output_dir.display()))?;

    let mut entries = Vec::with_capacity(artifacts.len());
    for artifact in &artifacts {
        let path = output_dir.join(&artifact.file_name);
        fs::write(&path, &artifact.bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!(file = %artifact.file_name, bytes = artifact.bytes.len(), "wrote artifact");
        entries.push(ArtifactEntry {
            file: artifact.file_name.clone(),
            crc32: format!("{:08x}", compute_crc32(&artifact.bytes)),
            bytes: artifact.bytes.len(),
            records: artifact.records,
            nodes: artifact.nodes,
        });
    }

    let manifest = OutputManifest::new(entries, &dictionary.diagnostics);
    let manifest_path = output_dir.join("manifest.json");
    let json = serde_json::to_vec_pretty(&manifest).context("failed to serialize manifest")?;
    fs::write(&manifest_path, json)
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;

    Ok(BuildReport {
        dictionary,
        manifest,
    })
}
