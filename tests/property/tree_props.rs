//! Balanced tree properties.

use std::collections::BTreeSet;

use kandex::index::canonical_height;
use kandex::{IndexTree, InvariantError, SortedKeys, WellFormedTree};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Distinct keys, ascending.
fn keys_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::btree_set(any::<u32>(), 0..300).prop_map(|set| set.into_iter().collect())
}

fn build(keys: &[u32]) -> IndexTree {
    let entries: Vec<(u32, usize)> = keys.iter().enumerate().map(|(i, &k)| (k, i)).collect();
    let keyed = SortedKeys::new(entries).expect("keys are sorted and distinct");
    IndexTree::build(&keyed)
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The built tree passes the well-formedness check.
    #[test]
    fn prop_tree_is_well_formed(keys in keys_strategy()) {
        let tree = build(&keys);
        prop_assert!(WellFormedTree::check(&tree, keys.len()).is_ok());
    }

    /// In-order traversal gives back the input keys.
    #[test]
    fn prop_in_order_matches_input(keys in keys_strategy()) {
        let tree = build(&keys);
        prop_assert_eq!(tree.in_order_keys(), keys);
    }

    /// Height is exactly ⌈log2(n+1)⌉.
    #[test]
    fn prop_height_is_canonical(keys in keys_strategy()) {
        let tree = build(&keys);
        prop_assert_eq!(tree.height(), canonical_height(keys.len()));
        prop_assert_eq!(tree.root().is_none(), keys.is_empty());
    }

    /// Every key is found at its own position, within `height` comparisons.
    #[test]
    fn prop_every_key_is_found(keys in keys_strategy()) {
        let tree = build(&keys);
        for (i, &key) in keys.iter().enumerate() {
            prop_assert_eq!(tree.find(key), Some(i));
            prop_assert!(tree.probe_depth(key) <= tree.height());
        }
    }

    /// Keys that were never inserted are not found.
    #[test]
    fn prop_absent_keys_miss(keys in keys_strategy(), probe in any::<u32>()) {
        let tree = build(&keys);
        let present: BTreeSet<u32> = keys.iter().copied().collect();
        prop_assert_eq!(tree.find(probe).is_some(), present.contains(&probe));
    }

    /// Children are always declared before their parent.
    #[test]
    fn prop_nodes_are_post_order(keys in keys_strategy()) {
        let tree = build(&keys);
        for (id, node) in tree.nodes().iter().enumerate() {
            for child in [node.left, node.right].into_iter().flatten() {
                prop_assert!(child < id);
            }
        }
    }

    /// Same keys, same tree.
    #[test]
    fn prop_build_is_deterministic(keys in keys_strategy()) {
        prop_assert_eq!(build(&keys), build(&keys));
    }

    /// A repeated key never reaches the builder.
    #[test]
    fn prop_duplicates_rejected(mut keys in keys_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!keys.is_empty());
        let dup = keys[pick.index(keys.len())];
        keys.push(dup);
        keys.sort_unstable();
        let entries: Vec<(u32, ())> = keys.into_iter().map(|k| (k, ())).collect();
        let is_duplicate_error = matches!(
            SortedKeys::new(entries),
            Err(InvariantError::DuplicateKey { .. })
        );
        prop_assert!(is_duplicate_error);
    }
}

#[test]
fn test_unsorted_keys_rejected() {
    let err = SortedKeys::new(vec![(5, ()), (3, ())]).unwrap_err();
    assert!(matches!(err, InvariantError::UnsortedKeys { position: 1, .. }));
}

#[test]
fn test_six_key_shape() {
    let tree = build(&[10, 20, 30, 40, 50, 60]);
    let root = tree.root_node().unwrap();
    assert_eq!(root.key, 40);
    assert_eq!(tree.node(root.left.unwrap()).unwrap().key, 20);
    assert_eq!(tree.node(root.right.unwrap()).unwrap().key, 60);
    assert_eq!(tree.height(), 3);
}
