//! Bulk construction.
//!
//! Building a tree from n pairs costs O(n log n) for the sort and O(n)
//! for the assembly — leaves are packed left to right, branch levels
//! bottom-up — instead of n sequential root-to-leaf inserts. Every
//! level distributes its load evenly so no trailing node underflows.

use std::mem;
use std::sync::Arc;

use crate::node::{Branch, Leaf, Node, NodeRef};
use crate::trace_shim::debug_log;
use crate::tree::Tree;

impl<K, V, const N: usize> Tree<K, V, N>
where
    K: Ord + Clone,
    V: Clone,
{
    /// Build a tree from unsorted pairs.
    ///
    /// The sort is stable and duplicate keys resolve last-wins, so of
    /// several pairs sharing a key the one latest in `pairs` survives;
    /// the earlier values are dropped here.
    ///
    /// # Examples
    ///
    /// ```
    /// use grove::Tree;
    ///
    /// let tree: Tree<u32, &str> = Tree::load(vec![(2, "b"), (1, "a"), (2, "B")]);
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.get(&2), Some(&"B"));
    /// ```
    #[must_use]
    pub fn load(mut pairs: Vec<(K, V)>) -> Self {
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs.dedup_by(|later, kept| {
            if later.0 == kept.0 {
                // Keep the later pair: swap it into the survivor slot
                // before `dedup_by` discards `later`.
                mem::swap(later, kept);
                true
            } else {
                false
            }
        });
        Self::build_sorted(pairs)
    }

    /// Build a tree from pairs already sorted by strictly increasing
    /// key. Skips the sort; the precondition is debug-asserted.
    #[must_use]
    pub fn from_sorted_pairs(pairs: Vec<(K, V)>) -> Self {
        debug_assert!(
            pairs.windows(2).all(|w| w[0].0 < w[1].0),
            "from_sorted_pairs requires strictly increasing keys"
        );
        Self::build_sorted(pairs)
    }

    /// Assemble a tree from strictly sorted pairs. The element count is
    /// taken from the input, never from incremental arithmetic.
    pub(crate) fn build_sorted(pairs: Vec<(K, V)>) -> Self {
        let len = pairs.len();
        if len == 0 {
            return Self::new();
        }

        // Leaf level: spread n entries over ⌈n/N⌉ leaves. Even spread
        // keeps every leaf at ⌊n/leaves⌋ or one more, which cannot
        // underflow whenever more than one leaf exists.
        let leaves = len.div_ceil(N);
        let base = len / leaves;
        let extra = len % leaves;
        let mut level: Vec<(K, NodeRef<K, V, N>)> = Vec::with_capacity(leaves);
        let mut pairs = pairs.into_iter();
        for i in 0..leaves {
            let take = base + usize::from(i < extra);
            let mut keys = Vec::with_capacity(take);
            let mut vals = Vec::with_capacity(take);
            for _ in 0..take {
                let (k, v) = pairs.next().unwrap();
                keys.push(k);
                vals.push(v);
            }
            let min = keys[0].clone();
            level.push((min, Arc::new(Node::Leaf(Leaf { keys, vals }))));
        }

        // Branch levels, bottom-up. Each group's first child donates its
        // subtree minimum as the group's own minimum; the rest become
        // the separators.
        while level.len() > 1 {
            let groups = level.len().div_ceil(N);
            let base = level.len() / groups;
            let extra = level.len() % groups;
            let mut above: Vec<(K, NodeRef<K, V, N>)> = Vec::with_capacity(groups);
            let mut nodes = level.into_iter();
            for g in 0..groups {
                let take = base + usize::from(g < extra);
                let mut keys = Vec::with_capacity(take - 1);
                let mut kids = Vec::with_capacity(take);
                let mut min = None;
                for j in 0..take {
                    let (kid_min, kid) = nodes.next().unwrap();
                    if j == 0 {
                        min = Some(kid_min);
                    } else {
                        keys.push(kid_min);
                    }
                    kids.push(kid);
                }
                above.push((
                    min.unwrap(),
                    Arc::new(Node::Branch(Branch { keys, kids })),
                ));
            }
            level = above;
        }

        debug_log!(entries = len, "bulk build complete");
        let (_, root) = level.pop().unwrap();
        Self::from_parts(Some(root), len)
    }
}

// ============================================================================
//  Tests
// ============================================================================
