// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! C constant data for the runtime.
//!
//! Every record becomes a handful of `const` declarations named after its key
//! (`record_name`), and the tree becomes one `bbt_node` per record. Emission
//! is two-pass: all records first, then all nodes in post-order, so every
//! `&name` refers to something already declared above it.
//!
//! ```c
//! const affix_enum kun_affix0x1a2b_00[] = {none, suffix};
//! const char *kun_olist0x1a2b_00[] = {"\xe3\x81\x86", ""};
//! const okuri_md kun_okuri_md0x1a2b_00 = {2, kun_affix0x1a2b_00, kun_olist0x1a2b_00};
//! const okuri_md * const kun_okuri0x1a2b[] = {&kun_okuri_md0x1a2b_00};
//! const kanji_md * const kun_kanji0x1a2b[] = {&kanji_md884C};
//! const reading_md kunyomi_md0x1a2b = {1, kun_okuri0x1a2b, kun_kanji0x1a2b};
//! ...
//! const bbt_node kunyomi_node0x1a2b = {0x1a2b, &kunyomi_md0x1a2b, NULL, NULL};
//! const bbt_node *kunyomi_root_node = &kunyomi_node0x1a2b;
//! ```
//!
//! Plain records get `NULL` for the okurigana list. Compiled words have no
//! catalog characters and get `NULL` for the kanji list instead.

use std::fmt::{self, Write};

use super::{Artifact, Emitter};
use crate::build::{CompiledClass, CompiledDictionary};
use crate::catalog::Catalog;
use crate::error::CompileError;
use crate::pack::PackedRecord;
use crate::types::{Contributor, ReadingClass, ReadingRecord};

/// Kana and symbol ranges the runtime font always needs, ahead of the kanji.
pub const FIXED_SUBSET_PREFIX: &str =
    "0x2B06, 0x2B07, 0x3005, 0x3041-0x3096, 0x309D-0x309E, 0x30A1-0x30F7, 0x30FC-0x30FE";

const AFFIX_ENUM: &str = "\
#ifndef AFFIX_ENUM
#define AFFIX_ENUM
enum affix_enum {
  none,   // Free reading (xyz).
  prefix, // Prefix (wxyz-).
  suffix, // Suffix (-wxyz).
  jword,  // Word form with an irregular reading.
  meaning // Meaning of the word form above.
};
#endif
";

const OKURI_MD: &str = "\
#ifndef OKURI_METADATA_TYPE
#define OKURI_METADATA_TYPE
typedef struct okuri_md {
  const uint8_t len;
  const affix_enum * const alist;
  const char **clist;
} okuri_md;
#endif
";

const READING_MD: &str = "\
#ifndef READING_METADATA_TYPE
#define READING_METADATA_TYPE
typedef struct reading_md {
  const uint16_t len;
  const okuri_md * const * olist;
  const kanji_md * const * klist;
} reading_md;
#endif
";

const BBT_NODE: &str = "\
#ifndef BBT_NODE_TYPE
#define BBT_NODE_TYPE
typedef struct bbt_node {
  const uint32_t key;
  const reading_md* rmd;
  const bbt_node * const lnode;
  const bbt_node * const rnode;
} bbt_node;
#endif
";

const KANJI_MD: &str = "\
#ifndef KANJI_METADATA_TYPE
#define KANJI_METADATA_TYPE
typedef struct kanji_md {
  const uint16_t unicode;
  const uint16_t rank;
  const char* const meaning;
} kanji_md;
#endif
";

/// Quote `s` as a C string literal.
///
/// Printable ASCII passes through (with `"` and `\` escaped); every other
/// byte becomes `\xNN`. C hex escapes are greedy, so a hex digit right after
/// one gets a `""` break in between.
pub fn c_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2 + 2);
    out.push('"');
    let mut after_hex_escape = false;
    for &byte in s.as_bytes() {
        match byte {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7E => {
                if after_hex_escape && byte.is_ascii_hexdigit() {
                    out.push_str("\"\"");
                }
                out.push(byte as char);
            }
            _ => {
                out.push_str(&format!("\\x{:02x}", byte));
                after_hex_escape = true;
                continue;
            }
        }
        after_hex_escape = false;
    }
    out.push('"');
    out
}

fn emit_error(artifact: &str) -> impl Fn(fmt::Error) -> CompileError + '_ {
    move |e| CompileError::Emit {
        artifact: artifact.to_string(),
        message: e.to_string(),
    }
}

/// `kanji_md.unicode` is 16 bits wide; a ranked character past the BMP
/// cannot be stored in it.
fn check_metadata_fits(catalog: &Catalog) -> Result<(), CompileError> {
    match catalog.ranked().find(|e| e.code_point > u32::from(u16::MAX)) {
        Some(entry) => Err(CompileError::Emit {
            artifact: "kanji_md.h".to_string(),
            message: format!(
                "{} (U+{:04X}) does not fit the 16-bit unicode field",
                entry.literal, entry.code_point
            ),
        }),
        None => Ok(()),
    }
}

fn kanji_symbol(code_point: u32) -> String {
    format!("{:04X}", code_point)
}

/// Emits the runtime's C headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CHeaderEmitter;

impl CHeaderEmitter {
    /// `const char kanji_msXXXX[] = "...";` for every ranked character.
    pub fn meaning_strings(&self, catalog: &Catalog) -> Result<String, fmt::Error> {
        let mut out = String::new();
        writeln!(out, "/* kanji_ms.h */")?;
        for entry in catalog.ranked() {
            writeln!(
                out,
                "const char kanji_ms{}[] = {};",
                kanji_symbol(entry.code_point),
                c_string_literal(&entry.meaning)
            )?;
        }
        Ok(out)
    }

    /// `kanji_md` records for every ranked character, most frequent first.
    pub fn character_metadata(&self, catalog: &Catalog) -> Result<String, fmt::Error> {
        let mut out = String::new();
        writeln!(out, "/* kanji_md.h */")?;
        writeln!(out, "#include \"kanji_ms.h\"\n")?;
        writeln!(out, "{}", KANJI_MD)?;
        for entry in catalog.ranked() {
            let symbol = kanji_symbol(entry.code_point);
            writeln!(
                out,
                "const kanji_md kanji_md{0} = {{0x{0}, {1}, kanji_ms{0}}};",
                symbol, entry.rank
            )?;
        }
        Ok(out)
    }

    /// Code points the runtime font must cover.
    pub fn subset_list(&self, catalog: &Catalog) -> String {
        let mut out = String::from(FIXED_SUBSET_PREFIX);
        for (start, end) in catalog.code_point_ranges() {
            if start == end {
                out.push_str(&format!(", 0x{:04x}", start));
            } else {
                out.push_str(&format!(", 0x{:04x}-0x{:04x}", start, end));
            }
        }
        out
    }

    fn record(
        &self,
        out: &mut String,
        class: ReadingClass,
        record: &ReadingRecord,
        packed: &PackedRecord,
    ) -> fmt::Result {
        let p = class.short_name();
        let name = record.name();

        let olist = match packed {
            PackedRecord::Plain => "NULL".to_string(),
            PackedRecord::Full(groups) => {
                for (i, group) in groups.iter().enumerate() {
                    let affixes: Vec<&str> = group.affixes.iter().map(|a| a.c_name()).collect();
                    let spellings: Vec<String> =
                        group.spellings.iter().map(|s| c_string_literal(s)).collect();
                    writeln!(
                        out,
                        "const affix_enum {p}_affix{name}_{i:02}[] = {{{}}};",
                        affixes.join(", ")
                    )?;
                    writeln!(
                        out,
                        "const char *{p}_olist{name}_{i:02}[] = {{{}}};",
                        spellings.join(", ")
                    )?;
                    writeln!(
                        out,
                        "const okuri_md {p}_okuri_md{name}_{i:02} = {{{}, {p}_affix{name}_{i:02}, {p}_olist{name}_{i:02}}};",
                        group.len()
                    )?;
                }
                let refs: Vec<String> = (0..groups.len())
                    .map(|i| format!("&{p}_okuri_md{name}_{i:02}"))
                    .collect();
                writeln!(
                    out,
                    "const okuri_md * const {p}_okuri{name}[] = {{{}}};",
                    refs.join(", ")
                )?;
                format!("{p}_okuri{name}")
            }
        };

        let characters: Vec<String> = record
            .contributors()
            .filter_map(|c| match c {
                Contributor::Character(cp) => Some(format!("&kanji_md{}", kanji_symbol(*cp))),
                Contributor::Word(_) => None,
            })
            .collect();
        let klist = if characters.is_empty() {
            "NULL".to_string()
        } else {
            writeln!(
                out,
                "const kanji_md * const {p}_kanji{name}[] = {{{}}};",
                characters.join(", ")
            )?;
            format!("{p}_kanji{name}")
        };

        writeln!(
            out,
            "const reading_md {}_md{name} = {{{}, {olist}, {klist}}};",
            class.name(),
            record.attributes.len()
        )
    }

    /// Header for one reading class: records, then tree nodes, then the root.
    pub fn class_header(&self, compiled: &CompiledClass) -> Result<String, fmt::Error> {
        let class = compiled.class;
        let c = class.name();
        let mut out = String::new();

        writeln!(out, "/* {}.h */\n", c)?;
        writeln!(out, "{}", AFFIX_ENUM)?;
        writeln!(out, "{}", OKURI_MD)?;
        writeln!(out, "{}", READING_MD)?;

        for (record, packed) in compiled.records.iter().zip(&compiled.packed) {
            self.record(&mut out, class, record, packed)?;
        }

        writeln!(out, "\n{}", BBT_NODE)?;
        let node_name = |id: Option<usize>| -> String {
            id.and_then(|id| compiled.tree.node(id))
                .map(|n| format!("&{c}_node{}", crate::hash::record_name(n.key)))
                .unwrap_or_else(|| "NULL".to_string())
        };
        for node in compiled.tree.nodes() {
            let name = crate::hash::record_name(node.key);
            writeln!(
                out,
                "const bbt_node {c}_node{name} = {{{name}, &{c}_md{name}, {}, {}}};",
                node_name(node.left),
                node_name(node.right)
            )?;
        }
        writeln!(
            out,
            "const bbt_node *{c}_root_node = {};",
            node_name(compiled.tree.root())
        )?;
        Ok(out)
    }
}

impl Emitter for CHeaderEmitter {
    fn emit(&self, dictionary: &CompiledDictionary) -> Result<Vec<Artifact>, CompileError> {
        let catalog = &dictionary.catalog;
        check_metadata_fits(catalog)?;
        let ranked = catalog.ranked().count();

        let mut artifacts = vec![
            Artifact {
                file_name: "kanji_ms.h".to_string(),
                bytes: self
                    .meaning_strings(catalog)
                    .map_err(emit_error("kanji_ms.h"))?
                    .into_bytes(),
                records: ranked,
                nodes: 0,
            },
            Artifact {
                file_name: "kanji_md.h".to_string(),
                bytes: self
                    .character_metadata(catalog)
                    .map_err(emit_error("kanji_md.h"))?
                    .into_bytes(),
                records: ranked,
                nodes: 0,
            },
        ];

        for compiled in &dictionary.classes {
            let file_name = format!("{}.h", compiled.class.name());
            let bytes = self
                .class_header(compiled)
                .map_err(emit_error(&file_name))?
                .into_bytes();
            artifacts.push(Artifact {
                file_name,
                bytes,
                records: compiled.records.len(),
                nodes: compiled.tree.len(),
            });
        }

        artifacts.push(Artifact {
            file_name: "kana_kanji_subset.txt".to_string(),
            bytes: self.subset_list(catalog).into_bytes(),
            records: catalog.code_point_ranges().len(),
            nodes: 0,
        });
        Ok(artifacts)
    }
}
