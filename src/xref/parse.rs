// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading notation.
//!
//! Catalog readings carry two kinds of markup:
//!
//! | Notation   | Meaning                                   |
//! |------------|-------------------------------------------|
//! | `-かた`     | suffix: attaches after another word       |
//! | `かた-`     | prefix: attaches before another word      |
//! | `おこな.う` | core `おこな`, okurigana `う`               |
//!
//! A leading marker decides the affix even when a trailing one is also
//! present. Onyomi never carry prefixes, so a trailing marker there is
//! stripped and reported instead of honoured.

use crate::error::CompileError;
use crate::types::{AffixTag, ReadingClass, Variant};
use crate::utils::normalize_reading;

/// Marks a prefix (trailing) or suffix (leading).
pub const AFFIX_MARKER: char = '-';

/// Separates the core reading from its okurigana.
pub const OKURIGANA_SEPARATOR: char = '.';

/// A reading with its notation resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReading {
    /// Grouping key of the reading.
    pub core: String,
    pub variant: Variant,
    /// A trailing marker was dropped because the class forbids prefixes.
    pub stray_marker: bool,
}

/// Parse one raw reading of `class`. `contributor` only feeds error messages.
pub fn parse_reading(
    class: ReadingClass,
    raw: &str,
    contributor: &str,
) -> Result<ParsedReading, CompileError> {
    let normalized = normalize_reading(raw);

    let leading = normalized.starts_with(AFFIX_MARKER);
    let trailing = normalized.ends_with(AFFIX_MARKER);
    let mut stray_marker = false;
    let affix = if leading {
        AffixTag::Suffix
    } else if trailing && class.allows_prefix_marker() {
        AffixTag::Prefix
    } else {
        stray_marker = trailing;
        AffixTag::None
    };

    let unmarked = normalized.trim_matches(AFFIX_MARKER);
    let mut parts = unmarked.split(OKURIGANA_SEPARATOR);
    let core = parts.next().unwrap_or_default();
    let spelling = parts.next().unwrap_or_default();
    if parts.next().is_some() {
        return Err(CompileError::TooManySeparators {
            class,
            reading: raw.to_string(),
            contributor: contributor.to_string(),
        });
    }
    if core.is_empty() {
        return Err(CompileError::EmptyReading {
            class,
            reading: raw.to_string(),
            contributor: contributor.to_string(),
        });
    }

    Ok(ParsedReading {
        core: core.to_string(),
        variant: Variant::new(affix, spelling),
        stray_marker,
    })
}
