//! Kanji reading dictionaries compiled into static balanced search trees.
//!
//! The runtime this targets has no allocator to spare and no string hashing.
//! It receives kana keystrokes, hashes their bytes with MurmurHash3, and walks
//! a constant binary tree comparing 32-bit keys. Everything else happens here,
//! ahead of time: ranking the characters, grouping readings, keying them,
//! fixing the tree shape and rendering it as C constant data.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐     ┌────────────┐     ┌────────────┐     ┌────────────┐
//! │  catalog   │────▶│    xref    │────▶│    hash    │────▶│   index    │
//! │ (normalize,│     │ (parse,    │     │ (KanaTable,│     │ (IndexTree)│
//! │  reconcile)│     │  words)    │     │  keys)     │     │            │
//! └────────────┘     └────────────┘     └────────────┘     └────────────┘
//!                                              │                  │
//!                                              ▼                  ▼
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                     verify                       │
//!                    │  (SortedKeys, WellFormedTree, verify_record)     │
//!                    └──────────────────────────────────────────────────┘
//!                                              │
//!                                              ▼
//!                    ┌────────────┐     ┌────────────┐
//!                    │    pack    │────▶│    emit    │
//!                    │ (okurigana │     │ (C headers,│
//!                    │  groups)   │     │  JSON)     │
//!                    └────────────┘     └────────────┘
//! ```
//!
//! `build` strings the stages together, one reading class per rayon job.
//!
//! | Module    | Role                                                      |
//! |-----------|-----------------------------------------------------------|
//! | `catalog` | Usable characters and their canonical ranks               |
//! | `xref`    | Reading → contributor tables, including compiled words    |
//! | `hash`    | Kana → bytes → 32-bit key, collision detection            |
//! | `index`   | Canonical balanced BST over the keys                      |
//! | `verify`  | Type-level proof that keys are sorted and the tree sound  |
//! | `pack`    | Record layout: plain or okurigana groups                  |
//! | `emit`    | C headers and JSON                                        |
//! | `build`   | Pipeline, manifests, file layer                           |
//!
//! # Usage
//!
//! ```ignore
//! use kandex::build::{compile, CompileOptions};
//! use kandex::ReadingClass;
//!
//! let dictionary = compile(&sources, &CompileOptions::default())?;
//! let record = dictionary.lookup(ReadingClass::Onyomi, "にち")?;
//! ```

pub mod build;
pub mod catalog;
pub mod emit;
pub mod error;
pub mod hash;
pub mod index;
pub mod pack;
pub mod testing;
pub mod types;
mod utils;
pub mod verify;
pub mod xref;

pub use build::{compile, run_build, CompileOptions, CompiledDictionary, OutputFormat, SourceTables};
pub use catalog::{Catalog, RankPolicy};
pub use emit::{CHeaderEmitter, Emitter, JsonEmitter};
pub use error::{CompileError, DiagnosticKind, Diagnostics};
pub use hash::{murmur3_32, record_name, KanaTable, ReadingKeyer};
pub use index::IndexTree;
pub use pack::{pack, PackedRecord};
pub use types::{
    AffixTag, CharacterEntry, Contributor, RawCharacter, ReadingAttribute, ReadingClass,
    ReadingRecord, SecondaryRank, Variant, Variants, WordRow,
};
pub use utils::normalize_reading;
pub use verify::{InvariantError, SortedKeys, WellFormedTree};
