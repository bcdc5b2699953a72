//! Record packing properties.

use kandex::{pack, AffixTag, Contributor, ReadingAttribute, ReadingRecord, Variant, Variants};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

fn variant_strategy() -> impl Strategy<Value = Variant> {
    (
        prop::sample::select(vec![AffixTag::None, AffixTag::Prefix, AffixTag::Suffix]),
        prop::sample::select(vec!["", "", "う", "つ", "げる"]),
    )
        .prop_map(|(affix, spelling)| Variant::new(affix, spelling))
}

fn record_strategy() -> impl Strategy<Value = ReadingRecord> {
    prop::collection::vec(prop::collection::vec(variant_strategy(), 1..4), 1..6).prop_map(
        |lists| ReadingRecord {
            reading: "ひ".into(),
            key: 0,
            attributes: lists
                .into_iter()
                .enumerate()
                .map(|(i, mut variants)| {
                    // The accumulator never stores the same variant twice.
                    let mut seen = Vec::new();
                    variants.retain(|v| {
                        let fresh = !seen.contains(v);
                        seen.push(v.clone());
                        fresh
                    });
                    let mut iter = variants.into_iter();
                    let mut packed = Variants::Single(iter.next().unwrap());
                    for v in iter {
                        packed.push(v);
                    }
                    ReadingAttribute {
                        contributor: Contributor::Character(0x4E00 + i as u32),
                        rank: i as u32,
                        variants: packed,
                    }
                })
                .collect(),
        },
    )
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    /// Unpacking gives back every contributor's variants, in order.
    #[test]
    fn prop_unpack_restores_variants(record in record_strategy()) {
        let packed = pack(&record);
        let expected: Vec<Vec<Variant>> = record
            .attributes
            .iter()
            .map(|a| a.variants.as_slice().to_vec())
            .collect();
        prop_assert_eq!(packed.unpack(record.attributes.len()), expected);
    }

    /// `Plain` exactly when every variant is a free reading without okurigana.
    #[test]
    fn prop_plain_iff_all_plain(record in record_strategy()) {
        let all_plain = record.attributes.iter().all(|a| a.variants.iter().all(Variant::is_plain));
        prop_assert_eq!(pack(&record).is_plain(), all_plain);
    }

    /// Full records carry one group per contributor with parallel arrays.
    #[test]
    fn prop_groups_are_parallel(record in record_strategy()) {
        let packed = pack(&record);
        if !packed.is_plain() {
            prop_assert_eq!(packed.groups().len(), record.attributes.len());
            for (group, attribute) in packed.groups().iter().zip(&record.attributes) {
                prop_assert_eq!(group.affixes.len(), group.spellings.len());
                prop_assert_eq!(group.len(), attribute.variants.len());
            }
        }
    }
}
