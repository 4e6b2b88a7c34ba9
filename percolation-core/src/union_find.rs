//! Weighted quick-union (disjoint set union) over a fixed universe.
//!
//! Components are merged by size: the root of the smaller tree is attached
//! below the root of the larger one, which keeps every tree at most
//! `log2(len)` deep. Paths are not compressed, so lookups never mutate the
//! structure and can be answered through a shared reference.

use crate::error::{PercolationError, Result};

/// Disjoint-set structure over the elements `0..len`, weighted by component
/// size.
///
/// # Examples
/// ```
/// use percolation_core::WeightedUnionFind;
///
/// let mut sets = WeightedUnionFind::new(4).expect("universe is non-empty");
/// assert!(sets.union(0, 1).expect("indices are in range"));
/// assert!(sets.connected(1, 0).expect("indices are in range"));
/// assert!(!sets.connected(1, 2).expect("indices are in range"));
/// assert_eq!(sets.count(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct WeightedUnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl WeightedUnionFind {
    /// Creates `len` singleton components labelled `0..len`.
    ///
    /// # Errors
    /// Returns [`PercolationError::EmptyUniverse`] when `len == 0` and
    /// [`PercolationError::UniverseTooLarge`] when the backing buffers cannot
    /// be allocated.
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(PercolationError::EmptyUniverse);
        }
        let mut parent = Vec::new();
        let mut size = Vec::new();
        parent
            .try_reserve_exact(len)
            .and_then(|()| size.try_reserve_exact(len))
            .map_err(|_| PercolationError::UniverseTooLarge { len })?;
        parent.extend(0..len);
        size.resize(len, 1);

        Ok(Self {
            parent,
            size,
            count: len,
        })
    }

    /// Returns the number of elements in the universe.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Always `false`; construction rejects empty universes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the number of disjoint components.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the root label of the component containing `element`.
    ///
    /// # Errors
    /// Returns [`PercolationError::ElementOutOfBounds`] when `element` is not
    /// in `0..len`.
    pub fn find(&self, element: usize) -> Result<usize> {
        self.validate(element)?;
        Ok(self.root(element))
    }

    /// Reports whether `left` and `right` belong to the same component.
    ///
    /// # Errors
    /// Returns [`PercolationError::ElementOutOfBounds`] when either index is
    /// not in `0..len`.
    pub fn connected(&self, left: usize, right: usize) -> Result<bool> {
        self.validate(left)?;
        self.validate(right)?;
        Ok(self.root(left) == self.root(right))
    }

    /// Merges the components containing `left` and `right`.
    ///
    /// Returns `true` when two distinct components were merged and `false`
    /// when both elements were already connected. On equal sizes the root of
    /// `right` is attached below the root of `left`.
    ///
    /// # Errors
    /// Returns [`PercolationError::ElementOutOfBounds`] when either index is
    /// not in `0..len`. The structure is left untouched in that case.
    pub fn union(&mut self, left: usize, right: usize) -> Result<bool> {
        self.validate(left)?;
        self.validate(right)?;

        let left_root = self.root(left);
        let right_root = self.root(right);
        if left_root == right_root {
            return Ok(false);
        }

        let (parent, child) = if self.size[left_root] < self.size[right_root] {
            (right_root, left_root)
        } else {
            (left_root, right_root)
        };
        self.parent[child] = parent;
        self.size[parent] += self.size[child];
        self.count -= 1;
        Ok(true)
    }

    fn validate(&self, element: usize) -> Result<()> {
        if element < self.parent.len() {
            Ok(())
        } else {
            Err(PercolationError::ElementOutOfBounds {
                index: element,
                len: self.parent.len(),
            })
        }
    }

    fn root(&self, mut node: usize) -> usize {
        while self.parent[node] != node {
            node = self.parent[node];
        }
        node
    }

    #[cfg(test)]
    fn depth(&self, mut node: usize) -> usize {
        let mut depth = 0;
        while self.parent[node] != node {
            node = self.parent[node];
            depth += 1;
        }
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rstest::rstest;

    use crate::{error::ErrorKind, test_utils::suite_proptest_config};

    #[test]
    fn rejects_empty_universe() {
        let err = WeightedUnionFind::new(0).expect_err("empty universe must fail");
        assert_eq!(err, PercolationError::EmptyUniverse);
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn rejects_universes_that_cannot_be_allocated() {
        let err = WeightedUnionFind::new(usize::MAX).expect_err("allocation must fail");
        assert_eq!(err, PercolationError::UniverseTooLarge { len: usize::MAX });
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn starts_with_singletons() {
        let sets = WeightedUnionFind::new(5).expect("non-empty");
        assert_eq!(sets.len(), 5);
        assert_eq!(sets.count(), 5);
        for element in 0..5 {
            assert_eq!(sets.find(element).expect("in range"), element);
        }
        assert!(!sets.connected(0, 4).expect("in range"));
        assert!(sets.connected(3, 3).expect("in range"));
    }

    #[test]
    fn union_is_transitive_and_idempotent() {
        let mut sets = WeightedUnionFind::new(6).expect("non-empty");
        assert!(sets.union(0, 1).expect("in range"));
        assert!(sets.union(1, 2).expect("in range"));
        assert!(!sets.union(2, 0).expect("in range"));
        assert!(!sets.union(0, 2).expect("in range"));
        assert!(sets.connected(0, 2).expect("in range"));
        assert!(!sets.connected(0, 3).expect("in range"));
        assert_eq!(sets.count(), 4);
    }

    #[test]
    fn smaller_tree_is_attached_below_larger() {
        let mut sets = WeightedUnionFind::new(5).expect("non-empty");
        sets.union(0, 1).expect("in range");
        sets.union(0, 2).expect("in range");
        let big_root = sets.find(0).expect("in range");

        // Joining from the singleton side must still keep the larger root.
        sets.union(3, 0).expect("in range");
        assert_eq!(sets.find(3).expect("in range"), big_root);
    }

    #[test]
    fn ties_attach_right_root_below_left_root() {
        let mut sets = WeightedUnionFind::new(2).expect("non-empty");
        sets.union(1, 0).expect("in range");
        assert_eq!(sets.find(0).expect("in range"), 1);
    }

    #[rstest]
    #[case(4, 4, 0)]
    #[case(4, 0, 9)]
    #[case(1, 1, 0)]
    fn rejects_out_of_range_elements(
        #[case] len: usize,
        #[case] left: usize,
        #[case] right: usize,
    ) {
        let mut sets = WeightedUnionFind::new(len).expect("non-empty");
        let bad = left.max(right);
        let expected = PercolationError::ElementOutOfBounds { index: bad, len };

        assert_eq!(sets.union(left, right), Err(expected.clone()));
        assert_eq!(sets.connected(left, right), Err(expected.clone()));
        assert_eq!(sets.find(bad), Err(expected));
        assert_eq!(sets.count(), len);
    }

    #[test]
    fn failed_union_leaves_structure_untouched() {
        let mut sets = WeightedUnionFind::new(3).expect("non-empty");
        let err = sets.union(0, 3).expect_err("3 is out of range");
        assert_eq!(err.kind(), ErrorKind::IndexOutOfBounds);
        assert_eq!(sets.count(), 3);
        assert!(!sets.connected(0, 1).expect("in range"));
    }

    fn naive_labels(len: usize, unions: &[(usize, usize)]) -> Vec<usize> {
        let mut labels: Vec<usize> = (0..len).collect();
        for &(left, right) in unions {
            let from = labels[right];
            let to = labels[left];
            for label in &mut labels {
                if *label == from {
                    *label = to;
                }
            }
        }
        labels
    }

    fn unions_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1_usize..40).prop_flat_map(|len| {
            (
                Just(len),
                prop::collection::vec((0..len, 0..len), 0..80),
            )
        })
    }

    proptest! {
        #![proptest_config(suite_proptest_config(128))]

        #[test]
        fn agrees_with_naive_labelling((len, unions) in unions_strategy()) {
            let mut sets = WeightedUnionFind::new(len).expect("non-empty");
            for &(left, right) in &unions {
                sets.union(left, right).expect("in range");
            }
            let labels = naive_labels(len, &unions);

            for left in 0..len {
                for right in 0..len {
                    prop_assert_eq!(
                        sets.connected(left, right).expect("in range"),
                        labels[left] == labels[right],
                    );
                }
            }

            let mut distinct = labels.clone();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(sets.count(), distinct.len());
        }

        #[test]
        fn tree_depth_is_logarithmic((len, unions) in unions_strategy()) {
            let mut sets = WeightedUnionFind::new(len).expect("non-empty");
            for &(left, right) in &unions {
                sets.union(left, right).expect("in range");
            }
            let bound = usize::BITS - len.leading_zeros();
            for element in 0..len {
                prop_assert!(sets.depth(element) <= bound as usize);
            }
        }
    }
}
