// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the index builders.
//!
//! Debug-mode assertions on the properties the emitted data relies on:
//!
//! 1. Are **zero-cost in release builds** (use `debug_assert!`)
//! 2. Fire at the builder that broke the property, not three stages later
//!
//! The `verify` wrappers check the same things and return errors; these
//! exist so a bug in the builders themselves panics in tests.
//!
//! | Contract Function            | Property                                 |
//! |------------------------------|------------------------------------------|
//! | `check_keys_ascending`       | Tree input strictly ascending            |
//! | `check_tree_balanced`        | Height = ⌈log2(n+1)⌉                     |
//! | `check_attributes_ranked`    | Contributors listed most frequent first  |

use crate::index::{canonical_height, IndexTree};
use crate::types::ReadingRecord;

/// Check that keys are strictly ascending.
///
/// # Panics (debug builds only)
/// Panics on the first key that does not exceed its predecessor.
#[inline]
pub fn check_keys_ascending(keys: &[u32]) {
    for i in 1..keys.len() {
        debug_assert!(
            keys[i - 1] < keys[i],
            "Contract violation: keys[{}] = {:#x} does not exceed keys[{}] = {:#x}",
            i,
            keys[i],
            i - 1,
            keys[i - 1]
        );
    }
}

/// Check that a tree has the canonical balanced height.
#[inline]
pub fn check_tree_balanced(tree: &IndexTree) {
    debug_assert_eq!(
        tree.height(),
        canonical_height(tree.len()),
        "Contract violation: tree of {} nodes is not balanced",
        tree.len()
    );
}

/// Check that a record lists its contributors in ascending rank order.
#[inline]
pub fn check_attributes_ranked(record: &ReadingRecord) {
    for i in 1..record.attributes.len() {
        debug_assert!(
            record.attributes[i - 1].rank <= record.attributes[i].rank,
            "Contract violation: '{}' attribute {} (rank {}) precedes rank {}",
            record.reading,
            i - 1,
            record.attributes[i - 1].rank,
            record.attributes[i].rank
        );
    }
}
