// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for reading notation parsing.
//!
//! Catalog readings come from hand-edited dictionaries. Any string must
//! either parse into a non-empty core or be rejected, never panic.

#![no_main]

use kandex::xref::parse_reading;
use kandex::{AffixTag, ReadingClass};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, &str)| {
    let (class_byte, raw) = input;
    let class = ReadingClass::KANJI[class_byte as usize % ReadingClass::KANJI.len()];

    if let Ok(parsed) = parse_reading(class, raw, "fuzz") {
        assert!(!parsed.core.is_empty(), "accepted empty core from {:?}", raw);
        assert!(!parsed.core.contains('.'), "separator left in core {:?}", parsed.core);

        // Onyomi never carry a prefix; the trailing marker is stray there.
        if class == ReadingClass::Onyomi {
            assert_ne!(parsed.variant.affix, AffixTag::Prefix);
        } else {
            assert!(!parsed.stray_marker);
        }
    }
});
