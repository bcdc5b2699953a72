//! Rank reconciliation and catalog normalization properties.

use std::collections::HashSet;

use kandex::catalog::{self, COMMON_THRESHOLD, MISSING_SECONDARY_RANK, UNRANKED_RANK, VERY_COMMON_THRESHOLD};
use kandex::{Catalog, Diagnostics, RankPolicy, RawCharacter, SecondaryRank};
use proptest::prelude::*;

use crate::common::raw_character;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Catalog rows over a small code point range, so duplicates happen.
fn rows_strategy() -> impl Strategy<Value = Vec<RawCharacter>> {
    let row = (0x4E00u32..0x4E40, prop::option::of(1u32..12_000), any::<bool>()).prop_map(
        |(cp, freq, has_reading)| {
            let literal = char::from_u32(cp).unwrap().to_string();
            let freq = freq.map(|f| f.to_string());
            let onyomi: &[&str] = if has_reading { &["イチ"] } else { &[] };
            raw_character(&format!("{:x}", cp), &literal, freq.as_deref(), onyomi, &[], &[])
        },
    );
    prop::collection::vec(row, 0..40)
}

fn secondary_strategy() -> impl Strategy<Value = Vec<SecondaryRank>> {
    prop::collection::vec((0x4E00u32..0x4E40, 1u32..3000), 0..30).prop_map(|rows| {
        rows.into_iter()
            .map(|(cp, rank)| SecondaryRank {
                literal: char::from_u32(cp).unwrap().to_string(),
                rank,
            })
            .collect()
    })
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    /// A secondary rank always wins.
    #[test]
    fn prop_secondary_wins(primary in any::<u32>(), secondary in any::<u32>()) {
        prop_assert_eq!(RankPolicy::default().reconcile(primary, Some(secondary)), secondary);
    }

    /// Without a secondary rank the bands apply.
    #[test]
    fn prop_bands_without_secondary(primary in 0u32..20_000) {
        let rank = RankPolicy::default().reconcile(primary, None);
        let expected = if primary < VERY_COMMON_THRESHOLD {
            primary
        } else if primary < COMMON_THRESHOLD {
            MISSING_SECONDARY_RANK
        } else {
            UNRANKED_RANK
        };
        prop_assert_eq!(rank, expected);
    }

    /// Without a secondary rank, a better primary never reconciles worse.
    #[test]
    fn prop_reconcile_is_monotone(a in 0u32..20_000, b in 0u32..20_000) {
        let policy = RankPolicy::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(policy.reconcile(lo, None) <= policy.reconcile(hi, None));
    }

    /// Normalized catalogs are ordered by (rank, code point), have no
    /// repeated code points, and every entry has a reading.
    #[test]
    fn prop_catalog_is_ordered_and_unique(rows in rows_strategy()) {
        let catalog = Catalog::normalize(&rows, &RankPolicy::default(), &mut Diagnostics::new()).unwrap();
        let order: Vec<(u32, u32)> = catalog.entries().iter().map(|e| (e.rank, e.code_point)).collect();
        prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
        let unique: HashSet<u32> = order.iter().map(|&(_, cp)| cp).collect();
        prop_assert_eq!(unique.len(), order.len());
        prop_assert!(catalog.entries().iter().all(|e| e.reading_count() > 0));
    }

    /// Normalization ignores the secondary ranking and is repeatable.
    #[test]
    fn prop_normalize_is_repeatable(rows in rows_strategy()) {
        let policy = RankPolicy::default();
        let a = Catalog::normalize(&rows, &policy, &mut Diagnostics::new()).unwrap();
        let b = Catalog::normalize(&rows, &policy, &mut Diagnostics::new()).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Reconciled ranks follow the policy, entry by entry.
    #[test]
    fn prop_reconcile_matches_policy(rows in rows_strategy(), secondary in secondary_strategy()) {
        let policy = RankPolicy::default();
        let mut log = Diagnostics::new();
        let normalized = Catalog::normalize(&rows, &policy, &mut log).unwrap();
        let primaries: Vec<(u32, u32)> =
            normalized.entries().iter().map(|e| (e.code_point, e.primary_rank)).collect();
        let reconciled = catalog::reconcile(normalized, &secondary, &policy, &mut log);

        for (cp, primary) in primaries {
            let literal = char::from_u32(cp).unwrap().to_string();
            let first = secondary.iter().find(|s| s.literal == literal).map(|s| s.rank);
            prop_assert_eq!(reconciled.get(cp).unwrap().rank, policy.reconcile(primary, first));
        }
        prop_assert!(reconciled.ranked().all(|e| e.rank < UNRANKED_RANK));
    }
}
