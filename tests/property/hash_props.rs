//! Reading key properties.

use kandex::hash::to_katakana;
use kandex::{murmur3_32, record_name, KanaTable, ReadingClass, ReadingKeyer};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Hiragana strings of plain syllables (あ..ゖ).
fn hiragana_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(0x3041u32..=0x3096, 1..8)
        .prop_map(|cps| cps.into_iter().filter_map(char::from_u32).collect())
}

fn keyer() -> ReadingKeyer {
    ReadingKeyer::new(KanaTable::unicode_low_byte())
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    /// Same bytes and seed, same hash.
    #[test]
    fn prop_murmur_is_deterministic(data in prop::collection::vec(any::<u8>(), 0..64), seed in any::<u32>()) {
        prop_assert_eq!(murmur3_32(&data, seed), murmur3_32(&data, seed));
    }

    /// Every hiragana unit is one byte: the low byte of its code point.
    #[test]
    fn prop_encoding_is_one_low_byte_per_unit(reading in hiragana_strategy()) {
        let bytes = keyer().encode(ReadingClass::Kunyomi, &reading).unwrap();
        let expected: Vec<u8> = reading.chars().map(|c| (c as u32 & 0xFF) as u8).collect();
        prop_assert_eq!(bytes, expected);
    }

    /// Onyomi lookups fold hiragana to the stored katakana.
    #[test]
    fn prop_onyomi_lookup_folds(reading in hiragana_strategy()) {
        let keyer = keyer();
        let katakana: String = reading.chars().map(to_katakana).collect();
        prop_assert_eq!(
            keyer.lookup_key(ReadingClass::Onyomi, &reading).unwrap(),
            keyer.key(ReadingClass::Onyomi, &katakana).unwrap()
        );
    }

    /// Other classes key the input as typed.
    #[test]
    fn prop_kunyomi_lookup_does_not_fold(reading in hiragana_strategy()) {
        let keyer = keyer();
        prop_assert_eq!(
            keyer.lookup_key(ReadingClass::Kunyomi, &reading).unwrap(),
            keyer.key(ReadingClass::Kunyomi, &reading).unwrap()
        );
    }

    /// Record names are `0x` plus lowercase hex and parse back to the key.
    #[test]
    fn prop_record_name_round_trips(key in any::<u32>()) {
        let name = record_name(key);
        prop_assert!(name.starts_with("0x"));
        prop_assert_eq!(name.to_lowercase(), name.clone());
        prop_assert_eq!(u32::from_str_radix(&name[2..], 16).unwrap(), key);
    }
}

#[test]
fn test_key_is_murmur_of_low_bytes() {
    let key = keyer().key(ReadingClass::Kunyomi, "ひと").unwrap();
    assert_eq!(key, murmur3_32(&[0x72, 0x68], 0));
}

#[test]
fn test_hiragana_and_katakana_keys_differ() {
    let keyer = keyer();
    assert_ne!(
        keyer.key(ReadingClass::Kunyomi, "か").unwrap(),
        keyer.key(ReadingClass::Kunyomi, "カ").unwrap()
    );
}

#[test]
fn test_unknown_syllable_is_reported() {
    let err = keyer().key(ReadingClass::Kunyomi, "ひa").unwrap_err();
    assert!(err.to_string().contains("'a'"), "{}", err);
}
