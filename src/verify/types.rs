// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Type wrappers that make invalid states unrepresentable.
//!
//! The tree builder never sees a raw `Vec<(u32, R)>`. It takes a `SortedKeys`,
//! and the only way to get one is to pass the strict-ascending check. Pay the
//! linear scan once at construction, and the builder can trust its input.
//!
//! | Type / check        | What's guaranteed                                  |
//! |---------------------|----------------------------------------------------|
//! | `SortedKeys<R>`     | Keys strictly ascending, hence unique              |
//! | `WellFormedTree`    | In-order keys ascending, height = ⌈log2(n+1)⌉      |
//! | `verify_record`     | Attributes rank-sorted, one per contributor        |
//!
//! # Example
//!
//! ```ignore
//! let keyed = SortedKeys::new(records)?;       // rejects duplicates
//! let tree = IndexTree::build(&keyed);
//! WellFormedTree::check(&tree, keyed.len())?;  // proves the shape
//! ```

use std::collections::HashSet;
use std::fmt;

use crate::index::{canonical_height, IndexTree};
use crate::types::ReadingRecord;

/// Error type for invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// Key at `position` is lower than its predecessor.
    UnsortedKeys {
        position: usize,
        previous: u32,
        key: u32,
    },
    /// Key at `position` repeats its predecessor.
    DuplicateKey { position: usize, key: u32 },
    /// In-order traversal is not strictly ascending at `position`.
    TreeOutOfOrder { position: usize },
    /// Tree height differs from the canonical balanced height.
    UnbalancedTree {
        nodes: usize,
        height: u32,
        expected: u32,
    },
    /// Node count differs from the number of records it indexes.
    NodeCountMismatch { nodes: usize, records: usize },
    /// A node points at a record that does not exist.
    DanglingRecord { record: usize, records: usize },
    /// Attributes of `reading` are not in ascending rank order.
    UnsortedAttributes { reading: String, position: usize },
    /// A contributor appears twice under the same reading.
    DuplicateContributor {
        reading: String,
        contributor: String,
    },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::UnsortedKeys {
                position,
                previous,
                key,
            } => {
                write!(
                    f,
                    "keys not ascending at position {}: {:#x} after {:#x}",
                    position, key, previous
                )
            }
            InvariantError::DuplicateKey { position, key } => {
                write!(f, "duplicate key {:#x} at position {}", key, position)
            }
            InvariantError::TreeOutOfOrder { position } => {
                write!(f, "in-order traversal not ascending at position {}", position)
            }
            InvariantError::UnbalancedTree {
                nodes,
                height,
                expected,
            } => {
                write!(
                    f,
                    "tree of {} nodes has height {}, expected {}",
                    nodes, height, expected
                )
            }
            InvariantError::NodeCountMismatch { nodes, records } => {
                write!(f, "tree has {} nodes for {} records", nodes, records)
            }
            InvariantError::DanglingRecord { record, records } => {
                write!(f, "node references record {} of {}", record, records)
            }
            InvariantError::UnsortedAttributes { reading, position } => {
                write!(
                    f,
                    "attributes of '{}' not rank-sorted at position {}",
                    reading, position
                )
            }
            InvariantError::DuplicateContributor {
                reading,
                contributor,
            } => {
                write!(f, "'{}' lists {} more than once", reading, contributor)
            }
        }
    }
}

impl std::error::Error for InvariantError {}

// =============================================================================
// SORTED KEYS
// =============================================================================

/// `(key, record)` pairs whose keys are strictly ascending.
///
/// # Invariants (enforced at construction)
/// - For all `i < j`: `entries[i].0 < entries[j].0`
#[derive(Debug, Clone)]
pub struct SortedKeys<R> {
    entries: Vec<(u32, R)>,
}

impl<R> SortedKeys<R> {
    /// Validate an already-sorted list.
    pub fn new(entries: Vec<(u32, R)>) -> Result<Self, InvariantError> {
        for position in 1..entries.len() {
            let previous = entries[position - 1].0;
            let key = entries[position].0;
            if key == previous {
                return Err(InvariantError::DuplicateKey { position, key });
            }
            if key < previous {
                return Err(InvariantError::UnsortedKeys {
                    position,
                    previous,
                    key,
                });
            }
        }
        Ok(Self { entries })
    }

    /// Sort by key, then validate. Duplicates are still rejected.
    pub fn from_unsorted(mut entries: Vec<(u32, R)>) -> Result<Self, InvariantError> {
        entries.sort_by_key(|(key, _)| *key);
        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = u32> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn get(&self, position: usize) -> Option<&(u32, R)> {
        self.entries.get(position)
    }

    pub fn as_slice(&self) -> &[(u32, R)] {
        &self.entries
    }

    /// Drop the keys, keeping records in key order.
    pub fn into_records(self) -> Vec<R> {
        self.entries.into_iter().map(|(_, record)| record).collect()
    }
}

// =============================================================================
// WELL-FORMED TREE
// =============================================================================

/// A tree that passed the ordering, balance, and record-reference checks.
#[derive(Debug, Clone, Copy)]
pub struct WellFormedTree<'a> {
    tree: &'a IndexTree,
}

impl<'a> WellFormedTree<'a> {
    /// Check every structural property of a built tree against the number
    /// of records it is meant to index.
    pub fn check(tree: &'a IndexTree, records: usize) -> Result<Self, InvariantError> {
        if tree.len() != records {
            return Err(InvariantError::NodeCountMismatch {
                nodes: tree.len(),
                records,
            });
        }

        let keys = tree.in_order_keys();
        for position in 1..keys.len() {
            if keys[position] <= keys[position - 1] {
                return Err(InvariantError::TreeOutOfOrder { position });
            }
        }

        for node in tree.nodes() {
            if node.record >= records {
                return Err(InvariantError::DanglingRecord {
                    record: node.record,
                    records,
                });
            }
        }

        let height = tree.height();
        let expected = canonical_height(tree.len());
        if height != expected {
            return Err(InvariantError::UnbalancedTree {
                nodes: tree.len(),
                height,
                expected,
            });
        }

        Ok(Self { tree })
    }

    pub fn tree(&self) -> &'a IndexTree {
        self.tree
    }
}

// =============================================================================
// RECORD CHECKS
// =============================================================================

/// Attributes ascend by rank and name each contributor once.
pub fn verify_record(record: &ReadingRecord) -> Result<(), InvariantError> {
    for position in 1..record.attributes.len() {
        if record.attributes[position].rank < record.attributes[position - 1].rank {
            return Err(InvariantError::UnsortedAttributes {
                reading: record.reading.clone(),
                position,
            });
        }
    }

    let mut seen = HashSet::with_capacity(record.attributes.len());
    for attribute in &record.attributes {
        if !seen.insert(&attribute.contributor) {
            return Err(InvariantError::DuplicateContributor {
                reading: record.reading.clone(),
                contributor: attribute.contributor.to_string(),
            });
        }
    }

    Ok(())
}
