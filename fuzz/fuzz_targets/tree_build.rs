// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for balanced tree construction.
//!
//! Builds a tree from arbitrary key sets and checks the shape invariants
//! the runtime search relies on.

#![no_main]

use kandex::{IndexTree, SortedKeys, WellFormedTree};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|keys: Vec<u32>| {
    let entries: Vec<(u32, usize)> = keys.iter().enumerate().map(|(i, &k)| (k, i)).collect();

    // Duplicate keys must be rejected, everything else must build.
    let sorted = match SortedKeys::from_unsorted(entries) {
        Ok(sorted) => sorted,
        Err(_) => {
            let mut unique = keys.clone();
            unique.sort_unstable();
            unique.dedup();
            assert_ne!(unique.len(), keys.len(), "distinct keys rejected");
            return;
        }
    };

    let tree = IndexTree::build(&sorted);
    WellFormedTree::check(&tree, sorted.len()).expect("tree invariants violated");

    for (i, key) in sorted.keys().enumerate() {
        assert_eq!(tree.find(key), Some(i));
    }
});
