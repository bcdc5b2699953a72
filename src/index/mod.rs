// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Balanced binary search tree over reading keys.
//!
//! The target runtime can't hash strings or rebalance anything. It walks a
//! fixed node graph comparing 32-bit keys. So we fix the shape here, once:
//! take the middle element of the sorted key list as the root, recurse left
//! and right. Height comes out at ⌈log2(n+1)⌉, which is the best any binary
//! tree can do.
//!
//! Nodes live in an arena (`Vec<TreeNode>`) and link by index. They are pushed
//! in post-order, children before parents, so an emitter walking `nodes()` in
//! order never refers to a node it hasn't declared yet.
//!
//! ```text
//!   keys:  [10, 20, 30, 40, 50, 60]      mid = 6 / 2 = 3
//!
//!                 40
//!               /    \
//!             20      60
//!            /  \    /
//!          10   30  50
//! ```
//!
//! Building and serializing are separate passes. The tree is complete and
//! immutable before anything looks at it.

use serde::Serialize;

use crate::verify::{contracts, SortedKeys};

/// Index of a node in `IndexTree::nodes()`.
pub type NodeId = usize;

/// One node of the tree.
///
/// `record` is the position of the indexed record in the key-sorted record
/// list the tree was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub key: u32,
    pub record: usize,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

/// Immutable balanced search tree. An empty tree has no root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexTree {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
}

/// ⌈log2(n+1)⌉: the height of the canonical balanced tree over `n` keys.
pub fn canonical_height(n: usize) -> u32 {
    usize::BITS - n.leading_zeros()
}

impl IndexTree {
    /// Build the canonical balanced tree over validated keys.
    pub fn build<R>(keyed: &SortedKeys<R>) -> Self {
        let keys: Vec<u32> = keyed.keys().collect();
        let tree = Self::build_from_keys(&keys);
        contracts::check_tree_balanced(&tree);
        tree
    }

    fn build_from_keys(keys: &[u32]) -> Self {
        contracts::check_keys_ascending(keys);
        let mut nodes = Vec::with_capacity(keys.len());
        let root = build_range(keys, 0, &mut nodes);
        Self { nodes, root }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root_node(&self) -> Option<&TreeNode> {
        self.root.map(|id| &self.nodes[id])
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    /// All nodes in post-order (children before parents).
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Descend from the root comparing keys, like the runtime does.
    ///
    /// Returns the record position for `key`, or `None`.
    pub fn find(&self, key: u32) -> Option<usize> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match key.cmp(&node.key) {
                std::cmp::Ordering::Equal => return Some(node.record),
                std::cmp::Ordering::Less => node.left,
                std::cmp::Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Number of comparisons `find` makes before it answers.
    pub fn probe_depth(&self, key: u32) -> u32 {
        let mut depth = 0;
        let mut current = self.root;
        while let Some(id) = current {
            depth += 1;
            let node = &self.nodes[id];
            current = match key.cmp(&node.key) {
                std::cmp::Ordering::Equal => break,
                std::cmp::Ordering::Less => node.left,
                std::cmp::Ordering::Greater => node.right,
            };
        }
        depth
    }

    /// Keys in in-order (left, node, right) sequence.
    pub fn in_order_keys(&self) -> Vec<u32> {
        let mut keys = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut current = self.root;
        while current.is_some() || !stack.is_empty() {
            while let Some(id) = current {
                stack.push(id);
                current = self.nodes[id].left;
            }
            if let Some(id) = stack.pop() {
                keys.push(self.nodes[id].key);
                current = self.nodes[id].right;
            }
        }
        keys
    }

    /// Number of nodes on the longest root-to-leaf path. Zero when empty.
    pub fn height(&self) -> u32 {
        let Some(root) = self.root else {
            return 0;
        };
        let mut max = 0;
        let mut stack = vec![(root, 1u32)];
        while let Some((id, depth)) = stack.pop() {
            max = max.max(depth);
            let node = &self.nodes[id];
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
        }
        max
    }
}

/// Build the subtree for `keys`, whose first element sits at `offset` in the
/// full key list. Returns the subtree root.
fn build_range(keys: &[u32], offset: usize, nodes: &mut Vec<TreeNode>) -> Option<NodeId> {
    if keys.is_empty() {
        return None;
    }

    let mid = keys.len() / 2;
    let left = build_range(&keys[..mid], offset, nodes);
    let right = build_range(&keys[mid + 1..], offset + mid + 1, nodes);

    nodes.push(TreeNode {
        key: keys[mid],
        record: offset + mid,
        left,
        right,
    });
    Some(nodes.len() - 1)
}
