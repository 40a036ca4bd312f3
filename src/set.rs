//! Set algebra over tree snapshots.
//!
//! Every operation takes its inputs read-only and produces a brand-new
//! tree through the sorted bulk-build path: one merge-walk over the
//! ordered iterators, O(|A| + |B|), never a chain of single inserts.
//! Inputs keep their entries; outputs hold clones. Because both inputs
//! are keyed by the same `Ord` type, the walks always agree on order.

use std::cmp::Ordering::{Equal, Greater, Less};
use std::iter::Peekable;

use crate::tree::{Iter, Tree};

/// What a merge-walk emits for keys present on one or both sides.
#[derive(Clone, Copy)]
struct MergePlan {
    /// Emit keys found only in the left tree.
    left_only: bool,
    /// Emit keys found only in the right tree.
    right_only: bool,
    /// Emit keys found in both (the left value wins).
    both: bool,
}

impl<K, V, const N: usize> Tree<K, V, N>
where
    K: Ord + Clone,
    V: Clone,
{
    /// Keys present in either tree. On a key collision the value from
    /// `self` wins; `other`'s entry is simply not carried into the
    /// result (both inputs are left untouched).
    ///
    /// # Examples
    ///
    /// ```
    /// use grove::Tree;
    ///
    /// let a: Tree<u32, &str> = Tree::load(vec![(1, "a"), (2, "a")]);
    /// let b: Tree<u32, &str> = Tree::load(vec![(2, "b"), (3, "b")]);
    /// let u = a.union(&b);
    /// assert_eq!(u.get(&2), Some(&"a"));
    /// assert_eq!(u.len(), 3);
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.merge(
            other,
            MergePlan {
                left_only: true,
                right_only: true,
                both: true,
            },
        )
    }

    /// Keys present in both trees, with `self`'s values.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        self.merge(
            other,
            MergePlan {
                left_only: false,
                right_only: false,
                both: true,
            },
        )
    }

    /// Keys present in `self` but not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        self.merge(
            other,
            MergePlan {
                left_only: true,
                right_only: false,
                both: false,
            },
        )
    }

    /// Keys present in exactly one of the two trees.
    ///
    /// `a.difference(&b)` and `b.difference(&a)` partition this set.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        self.merge(
            other,
            MergePlan {
                left_only: true,
                right_only: true,
                both: false,
            },
        )
    }

    /// Entries for which `keep` returns `true`, as a new tree. `self`
    /// is not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use grove::Tree;
    ///
    /// let tree: Tree<u32, u32> = (1..=10).map(|k| (k, k)).collect();
    /// let even = tree.filter(|k, _| k % 2 == 0);
    /// assert_eq!(even.len(), 5);
    /// assert!(!even.contains_key(&7));
    /// ```
    #[must_use]
    pub fn filter<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&K, &V) -> bool,
    {
        let kept: Vec<(K, V)> = self
            .iter()
            .filter(|(k, v)| keep(k, v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self::build_sorted(kept)
    }

    fn merge(&self, other: &Self, plan: MergePlan) -> Self {
        let mut out: Vec<(K, V)> = Vec::new();
        let mut left = self.iter().peekable();
        let mut right = other.iter().peekable();

        loop {
            let side = match (left.peek(), right.peek()) {
                (Some((lk, _)), Some((rk, _))) => lk.cmp(rk),
                (Some(_), None) => Less,
                (None, Some(_)) => Greater,
                (None, None) => break,
            };
            match side {
                Less => take(&mut left, plan.left_only, &mut out),
                Greater => take(&mut right, plan.right_only, &mut out),
                Equal => {
                    take(&mut left, plan.both, &mut out);
                    right.next();
                }
            }
        }
        Self::build_sorted(out)
    }
}

/// Pop the iterator's head, cloning it into `out` when `emit` is set.
fn take<K, V, const N: usize>(
    iter: &mut Peekable<Iter<'_, K, V, N>>,
    emit: bool,
    out: &mut Vec<(K, V)>,
) where
    K: Clone,
    V: Clone,
{
    let (k, v) = iter.next().unwrap();
    if emit {
        out.push((k.clone(), v.clone()));
    }
}

// ============================================================================
//  Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::tree::Tree;

    fn keyed(keys: &[u32]) -> Tree<u32, u32, 4> {
        keys.iter().map(|&k| (k, k * 100)).collect()
    }

    fn keys_of(tree: &Tree<u32, u32, 4>) -> Vec<u32> {
        tree.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn union_is_sorted_dedup() {
        let a = keyed(&[1, 3, 5]);
        let b = keyed(&[2, 3, 4]);
        let u = a.union(&b);
        assert_eq!(keys_of(&u), vec![1, 2, 3, 4, 5]);
        u.verify().unwrap();
        // inputs untouched
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn intersection_keeps_left_values() {
        let a: Tree<u32, &str, 4> = Tree::load(vec![(1, "a1"), (2, "a2")]);
        let b: Tree<u32, &str, 4> = Tree::load(vec![(2, "b2"), (3, "b3")]);
        let i = a.intersection(&b);
        assert_eq!(i.len(), 1);
        assert_eq!(i.get(&2), Some(&"a2"));
    }

    #[test]
    fn difference_and_symmetric_difference_partition() {
        let a = keyed(&[1, 2, 3, 6, 7, 8, 9]);
        let b = keyed(&[1, 3, 4, 5, 6, 10, 11, 12, 13]);

        let a_minus_b = a.difference(&b);
        let b_minus_a = b.difference(&a);
        let sym = a.symmetric_difference(&b);

        assert_eq!(keys_of(&a_minus_b), vec![2, 7, 8, 9]);
        assert_eq!(keys_of(&b_minus_a), vec![4, 5, 10, 11, 12, 13]);
        assert_eq!(keys_of(&sym), vec![2, 4, 5, 7, 8, 9, 10, 11, 12, 13]);
        assert_eq!(keys_of(&a_minus_b.union(&b_minus_a)), keys_of(&sym));
        sym.verify().unwrap();
    }

    #[test]
    fn empty_operands() {
        let a = keyed(&[1, 2]);
        let none = keyed(&[]);
        assert_eq!(keys_of(&a.union(&none)), vec![1, 2]);
        assert_eq!(keys_of(&none.union(&a)), vec![1, 2]);
        assert!(a.intersection(&none).is_empty());
        assert_eq!(keys_of(&a.difference(&none)), vec![1, 2]);
        assert!(none.difference(&a).is_empty());
        assert_eq!(keys_of(&a.symmetric_difference(&none)), vec![1, 2]);
    }

    #[test]
    fn filter_retains_matches_only() {
        let tree = keyed(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let big = tree.filter(|&k, _| k > 5);
        assert_eq!(keys_of(&big), vec![6, 7, 8]);
        assert_eq!(tree.len(), 8);
        big.verify().unwrap();
    }
}
