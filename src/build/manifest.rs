use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::catalog::{RankPolicy, MAX_WORD_RANK};
use crate::error::{DiagnosticKind, Diagnostics};
use crate::hash::KanaTable;
use crate::types::{RawCharacter, SecondaryRank, WordRow};
use crate::xref::{MergePolicy, WordSource};

use super::{CompileOptions, SourceTables};

/// Manifest versions this build understands.
pub const MANIFEST_VERSION: u32 = 1;

fn default_max_word_rank() -> u32 {
    MAX_WORD_RANK
}

/// `manifest.json` in the input directory. Paths are relative to it.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct InputManifest {
    pub version: u32,
    pub catalog: String,
    pub secondary_ranking: String,
    #[serde(default)]
    pub word_sources: Vec<WordSourceDef>,
    #[serde(default)]
    pub lemma_ranking: Option<String>,
    /// Absent means the built-in low-byte table.
    #[serde(default)]
    pub kana_table: Option<String>,
    #[serde(default)]
    pub ranking: RankPolicy,
    #[serde(default = "default_max_word_rank")]
    pub max_word_rank: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WordSourceDef {
    pub path: String,
    #[serde(default)]
    pub policy: MergePolicy,
}

impl InputManifest {
    pub fn options(&self) -> CompileOptions {
        CompileOptions {
            ranking: self.ranking.clone(),
            max_word_rank: self.max_word_rank,
        }
    }
}

/// Read and parse `manifest.json` from `input_dir`.
pub fn read_manifest(input_dir: &Path) -> Result<InputManifest> {
    let path = input_dir.join("manifest.json");
    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let manifest: InputManifest = serde_json::from_str(&content)
        .with_context(|| format!("invalid manifest JSON in {}", path.display()))?;
    if manifest.version != MANIFEST_VERSION {
        bail!(
            "unsupported manifest version {} (expected {})",
            manifest.version,
            MANIFEST_VERSION
        );
    }
    Ok(manifest)
}

fn read_json<T: serde::de::DeserializeOwned>(input_dir: &Path, file: &str) -> Result<T> {
    let path = input_dir.join(file);
    let content =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Load every table the manifest names.
pub fn load_sources(input_dir: &Path, manifest: &InputManifest) -> Result<SourceTables> {
    let catalog: Vec<RawCharacter> = read_json(input_dir, &manifest.catalog)?;
    let secondary: Vec<SecondaryRank> = read_json(input_dir, &manifest.secondary_ranking)?;

    let word_sources = manifest
        .word_sources
        .iter()
        .map(|def| {
            let rows: Vec<WordRow> = read_json(input_dir, &def.path)?;
            Ok(WordSource {
                name: def.path.clone(),
                policy: def.policy,
                rows,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let lemmas: Option<Vec<String>> = manifest
        .lemma_ranking
        .as_deref()
        .map(|file| read_json(input_dir, file))
        .transpose()?;

    let kana_table = match manifest.kana_table.as_deref() {
        Some(file) => {
            let pairs: HashMap<String, String> = read_json(input_dir, file)?;
            KanaTable::from_pairs(pairs)
                .with_context(|| format!("invalid kana table {}", file))?
        }
        None => KanaTable::unicode_low_byte(),
    };

    tracing::info!(
        characters = catalog.len(),
        secondary = secondary.len(),
        word_sources = word_sources.len(),
        kana = kana_table.len(),
        "loaded sources"
    );

    Ok(SourceTables {
        catalog,
        secondary,
        word_sources,
        lemmas,
        kana_table,
    })
}

// =============================================================================
// OUTPUT MANIFEST
// =============================================================================

/// One written file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ArtifactEntry {
    pub file: String,
    /// CRC32 of the file contents, 8 lowercase hex digits.
    pub crc32: String,
    pub bytes: usize,
    pub records: usize,
    pub nodes: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticCount {
    pub kind: DiagnosticKind,
    pub count: usize,
}

/// `manifest.json` written next to the artifacts.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct OutputManifest {
    pub version: u32,
    pub generator: String,
    pub artifacts: Vec<ArtifactEntry>,
    pub diagnostics: Vec<DiagnosticCount>,
}

impl OutputManifest {
    pub fn new(artifacts: Vec<ArtifactEntry>, diagnostics: &Diagnostics) -> Self {
        Self {
            version: MANIFEST_VERSION,
            generator: format!("kandex {}", env!("CARGO_PKG_VERSION")),
            artifacts,
            diagnostics: diagnostics
                .summary()
                .into_iter()
                .map(|(kind, count)| DiagnosticCount { kind, count })
                .collect(),
        }
    }
}

pub fn compute_crc32(bytes: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(bytes);
    hasher.finalize()
}
