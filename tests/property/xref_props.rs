//! Reading notation and cross-reference properties.

use kandex::xref::{parse_reading, Accumulator};
use kandex::{verify::verify_record, AffixTag, Contributor, ReadingClass, ReadingRecord, Variant};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

fn kana_strategy(len: std::ops::Range<usize>) -> impl Strategy<Value = String> {
    prop::collection::vec(0x3041u32..=0x3093, len)
        .prop_map(|cps| cps.into_iter().filter_map(char::from_u32).collect())
}

/// (reading, code point, rank, affix, okurigana) tuples over a small reading
/// alphabet, so readings and contributors repeat.
fn additions_strategy() -> impl Strategy<Value = Vec<(String, u32, u32, AffixTag, String)>> {
    let reading = prop::sample::select(vec!["ひ", "か", "もと", "ひと"]).prop_map(String::from);
    let affix = prop::sample::select(vec![AffixTag::None, AffixTag::Prefix, AffixTag::Suffix]);
    let okuri = prop::sample::select(vec!["", "う", "つ"]).prop_map(String::from);
    prop::collection::vec((reading, 0x4E00u32..0x4E10, 1u32..20, affix, okuri), 0..60)
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    /// `core.okuri` splits on the separator.
    #[test]
    fn prop_separator_splits(core in kana_strategy(1..4), okuri in kana_strategy(0..3)) {
        let raw = format!("{}.{}", core, okuri);
        let parsed = parse_reading(ReadingClass::Kunyomi, &raw, "test").unwrap();
        prop_assert_eq!(parsed.core, core);
        prop_assert_eq!(parsed.variant.spelling, okuri);
        prop_assert_eq!(parsed.variant.affix, AffixTag::None);
    }

    /// A leading marker is a suffix in every class.
    #[test]
    fn prop_leading_marker_is_suffix(core in kana_strategy(1..5)) {
        for class in ReadingClass::KANJI {
            let parsed = parse_reading(class, &format!("-{}", core), "test").unwrap();
            prop_assert_eq!(parsed.variant.affix, AffixTag::Suffix);
            prop_assert_eq!(&parsed.core, &core);
        }
    }

    /// A trailing marker is a prefix except in onyomi, where it is stray.
    #[test]
    fn prop_trailing_marker(core in kana_strategy(1..5)) {
        let raw = format!("{}-", core);
        let kun = parse_reading(ReadingClass::Kunyomi, &raw, "test").unwrap();
        prop_assert_eq!(kun.variant.affix, AffixTag::Prefix);
        prop_assert!(!kun.stray_marker);

        let on = parse_reading(ReadingClass::Onyomi, &raw, "test").unwrap();
        prop_assert_eq!(on.variant.affix, AffixTag::None);
        prop_assert!(on.stray_marker);
        prop_assert_eq!(on.core, core);
    }

    /// Frozen groups are rank-sorted with one attribute per contributor.
    #[test]
    fn prop_frozen_groups_verify(additions in additions_strategy()) {
        let mut acc = Accumulator::new(ReadingClass::Kunyomi);
        for (reading, cp, rank, affix, okuri) in &additions {
            acc.add(reading, Contributor::Character(*cp), *rank, Variant::new(*affix, okuri.as_str()));
        }
        for group in acc.freeze().into_groups() {
            let record = ReadingRecord { reading: group.reading, key: 0, attributes: group.attributes };
            prop_assert!(verify_record(&record).is_ok());
        }
    }

    /// Equal ranks keep first-seen order; variants are never repeated.
    #[test]
    fn prop_ties_keep_encounter_order(additions in additions_strategy()) {
        let mut acc = Accumulator::new(ReadingClass::Kunyomi);
        let mut first_seen: Vec<(String, u32)> = Vec::new();
        for (reading, cp, _, affix, okuri) in &additions {
            acc.add(reading, Contributor::Character(*cp), 1, Variant::new(*affix, okuri.as_str()));
            if !first_seen.iter().any(|(r, c)| r == reading && c == cp) {
                first_seen.push((reading.clone(), *cp));
            }
        }
        for group in acc.freeze().groups() {
            let expected: Vec<Contributor> = first_seen
                .iter()
                .filter(|(r, _)| *r == group.reading)
                .map(|(_, cp)| Contributor::Character(*cp))
                .collect();
            let actual: Vec<Contributor> = group.attributes.iter().map(|a| a.contributor.clone()).collect();
            prop_assert_eq!(actual, expected);

            for attribute in &group.attributes {
                let variants = attribute.variants.as_slice();
                for (i, v) in variants.iter().enumerate() {
                    prop_assert!(!variants[..i].contains(v));
                }
            }
        }
    }
}

#[test]
fn test_suffix_with_okurigana() {
    let parsed = parse_reading(ReadingClass::Kunyomi, "-おこな.う", "行").unwrap();
    assert_eq!(parsed.core, "おこな");
    assert_eq!(parsed.variant, Variant::new(AffixTag::Suffix, "う"));
}

#[test]
fn test_marker_only_reading_is_empty() {
    assert!(parse_reading(ReadingClass::Kunyomi, "-", "x").is_err());
    assert!(parse_reading(ReadingClass::Kunyomi, ".う", "x").is_err());
}
