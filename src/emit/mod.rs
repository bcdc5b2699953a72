// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Serializing a compiled dictionary.
//!
//! Emitters see only finished data: the tree is built, records are keyed and
//! packed. Each emitter renders the whole dictionary into memory and returns
//! the artifacts; the caller decides whether to write them. So a rendering
//! failure can never leave half a directory behind.
//!
//! | Emitter          | Artifacts                                                 |
//! |------------------|-----------------------------------------------------------|
//! | `CHeaderEmitter` | `kanji_ms.h`, `kanji_md.h`, one `.h` per class, subset list |
//! | `JsonEmitter`    | `catalog.json`, one `.json` per class                     |

mod c_header;

pub use c_header::{c_string_literal, CHeaderEmitter, FIXED_SUBSET_PREFIX};

use serde::Serialize;

use crate::build::{CompiledClass, CompiledDictionary};
use crate::error::CompileError;
use crate::index::IndexTree;
use crate::pack::PackedRecord;
use crate::types::{CharacterEntry, ReadingClass, ReadingRecord};

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub records: usize,
    pub nodes: usize,
}

/// Renders a compiled dictionary into artifacts.
pub trait Emitter {
    fn emit(&self, dictionary: &CompiledDictionary) -> Result<Vec<Artifact>, CompileError>;
}

// =============================================================================
// JSON
// =============================================================================

/// Pretty-printed JSON, for inspection and for tooling that is not the runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter;

#[derive(Serialize)]
struct JsonRecord<'a> {
    name: String,
    #[serde(flatten)]
    record: &'a ReadingRecord,
    packed: &'a PackedRecord,
}

#[derive(Serialize)]
struct JsonClass<'a> {
    class: ReadingClass,
    records: Vec<JsonRecord<'a>>,
    tree: &'a IndexTree,
}

fn to_json<T: Serialize>(file_name: &str, value: &T) -> Result<Vec<u8>, CompileError> {
    serde_json::to_vec_pretty(value).map_err(|e| CompileError::Emit {
        artifact: file_name.to_string(),
        message: e.to_string(),
    })
}

fn class_json(compiled: &CompiledClass) -> JsonClass<'_> {
    JsonClass {
        class: compiled.class,
        records: compiled
            .records
            .iter()
            .zip(&compiled.packed)
            .map(|(record, packed)| JsonRecord {
                name: record.name(),
                record,
                packed,
            })
            .collect(),
        tree: &compiled.tree,
    }
}

impl Emitter for JsonEmitter {
    fn emit(&self, dictionary: &CompiledDictionary) -> Result<Vec<Artifact>, CompileError> {
        let ranked: Vec<&CharacterEntry> = dictionary.catalog.ranked().collect();
        let mut artifacts = vec![Artifact {
            file_name: "catalog.json".to_string(),
            bytes: to_json("catalog.json", &ranked)?,
            records: ranked.len(),
            nodes: 0,
        }];

        for compiled in &dictionary.classes {
            let file_name = format!("{}.json", compiled.class.name());
            artifacts.push(Artifact {
                bytes: to_json(&file_name, &class_json(compiled))?,
                file_name,
                records: compiled.records.len(),
                nodes: compiled.tree.len(),
            });
        }
        Ok(artifacts)
    }
}
