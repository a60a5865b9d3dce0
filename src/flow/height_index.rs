//! HeightIndex - O(log n) vertical offsets of cached lines via Fenwick tree
//!
//! Tracks the height of every cached line so hosts can map between line
//! indices and vertical offsets without rescanning the line list. The index
//! is truncated and extended in lockstep with the cached lines.
//!
//! # Complexity
//!
//! - `push`: O(log n) amortized (growing rebuilds the tree)
//! - `truncate`: O(k log n) for k dropped lines
//! - `prefix_sum`, `offset_of`, `total`: O(log n)
//! - `lower_bound`: O(log² n)
//! - `clear`: O(capacity)

/// Fenwick tree over line heights, exposed with a 0-indexed API.
#[derive(Debug, Clone, Default)]
pub struct HeightIndex {
    /// Fenwick tree backing storage.
    tree: Vec<i64>,
    /// Number of valid entries (len <= tree.len()).
    len: usize,
}

impl HeightIndex {
    /// Creates an empty index with pre-allocated capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowcache::flow::height_index::HeightIndex;
    /// let index = HeightIndex::new(16);
    /// assert!(index.is_empty());
    /// assert_eq!(index.total(), 0);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            tree: vec![0; capacity],
            len: 0,
        }
    }

    /// Returns the cumulative height of entries `0..=index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn prefix_sum(&self, index: usize) -> u64 {
        assert!(
            index < self.len,
            "index {} out of bounds (len: {})",
            index,
            self.len
        );
        fenwick::array::prefix_sum(&self.tree, index).max(0) as u64
    }

    /// Returns the cumulative height of entries strictly before `index`.
    ///
    /// `offset_of(len())` equals `total()`. Returns `None` past that.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowcache::flow::height_index::HeightIndex;
    /// let mut index = HeightIndex::new(4);
    /// index.push(10);
    /// index.push(20);
    /// assert_eq!(index.offset_of(0), Some(0));
    /// assert_eq!(index.offset_of(1), Some(10));
    /// assert_eq!(index.offset_of(2), Some(30));
    /// assert_eq!(index.offset_of(3), None);
    /// ```
    pub fn offset_of(&self, index: usize) -> Option<u64> {
        match index {
            0 => Some(0),
            i if i <= self.len => Some(self.prefix_sum(i - 1)),
            _ => None,
        }
    }

    /// Binary search for the first index where `prefix_sum(index) > value`.
    ///
    /// That is the entry covering vertical offset `value`. Returns `None`
    /// when `value >= total()` or the index is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowcache::flow::height_index::HeightIndex;
    /// let mut index = HeightIndex::new(4);
    /// index.push(10); // [0..10)
    /// index.push(20); // [10..30)
    /// assert_eq!(index.lower_bound(9), Some(0));
    /// assert_eq!(index.lower_bound(10), Some(1));
    /// assert_eq!(index.lower_bound(30), None);
    /// ```
    pub fn lower_bound(&self, value: u64) -> Option<usize> {
        let mut left = 0;
        let mut right = self.len;

        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_sum(mid) > value {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        (left < self.len).then_some(left)
    }

    /// Total height of all entries.
    pub fn total(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.prefix_sum(self.len - 1)
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends an entry, growing the backing storage if necessary.
    pub fn push(&mut self, height: u32) {
        if self.len >= self.tree.len() {
            self.grow();
        }

        let idx = self.len;
        self.len += 1;
        fenwick::array::update(&mut self.tree, idx, i64::from(height));
    }

    /// Drops every entry at or after `len`.
    ///
    /// Each dropped height is subtracted back out so later pushes start from
    /// clean tree nodes.
    pub fn truncate(&mut self, len: usize) {
        while self.len > len {
            let idx = self.len - 1;
            let height = self.height_at(idx);
            fenwick::array::update(&mut self.tree, idx, -height);
            self.len -= 1;
        }
    }

    /// Clears all entries, retaining capacity.
    pub fn clear(&mut self) {
        self.tree.iter_mut().for_each(|node| *node = 0);
        self.len = 0;
    }

    fn height_at(&self, index: usize) -> i64 {
        let upto = fenwick::array::prefix_sum(&self.tree, index);
        if index == 0 {
            upto
        } else {
            upto - fenwick::array::prefix_sum(&self.tree, index - 1)
        }
    }

    /// Doubles capacity. Fenwick nodes depend on the tree length, so the
    /// live entries are re-inserted into a fresh tree.
    fn grow(&mut self) {
        let heights: Vec<i64> = (0..self.len).map(|i| self.height_at(i)).collect();
        self.tree = vec![0; self.tree.len().max(1) * 2];
        for (i, h) in heights.into_iter().enumerate() {
            fenwick::array::update(&mut self.tree, i, h);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_index() {
        let index = HeightIndex::new(10);
        assert_eq!(index.len(), 0);
        assert_eq!(index.total(), 0);
        assert_eq!(index.lower_bound(0), None);
    }

    #[test]
    fn test_multiple_entries() {
        let mut index = HeightIndex::new(10);
        index.push(3);
        index.push(4);
        index.push(5);

        assert_eq!(index.prefix_sum(0), 3);
        assert_eq!(index.prefix_sum(1), 7);
        assert_eq!(index.prefix_sum(2), 12);
        assert_eq!(index.total(), 12);
    }

    #[test]
    fn test_truncate_then_push_reuses_slots() {
        let mut index = HeightIndex::new(8);
        for h in [5, 6, 7, 8] {
            index.push(h);
        }

        index.truncate(1);
        assert_eq!(index.len(), 1);
        assert_eq!(index.total(), 5);

        index.push(2);
        index.push(3);
        assert_eq!(index.prefix_sum(1), 7);
        assert_eq!(index.prefix_sum(2), 10);
    }

    #[test]
    fn test_clear_and_reuse() {
        let mut index = HeightIndex::new(8);
        index.push(5);
        index.push(9);
        index.clear();

        index.push(10);
        index.push(1);
        assert_eq!(index.len(), 2);
        assert_eq!(index.prefix_sum(1), 11);
    }

    #[test]
    fn test_grows_from_zero_capacity() {
        let mut index = HeightIndex::new(0);
        for h in 1..=9 {
            index.push(h);
        }
        assert_eq!(index.total(), 45);
        assert_eq!(index.prefix_sum(3), 10);
    }

    #[test]
    fn test_lower_bound_boundaries() {
        let mut index = HeightIndex::new(4);
        index.push(5);
        index.push(5);
        index.push(5);

        assert_eq!(index.lower_bound(0), Some(0));
        assert_eq!(index.lower_bound(5), Some(1));
        assert_eq!(index.lower_bound(14), Some(2));
        assert_eq!(index.lower_bound(15), None);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(u32),
        Truncate(usize),
        Clear,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0u32..=50).prop_map(Op::Push),
            2 => (0usize..=20).prop_map(Op::Truncate),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        /// Any mix of push/truncate/clear matches a plain Vec of heights.
        #[test]
        fn prop_matches_naive_prefix_sums(ops in prop::collection::vec(arb_op(), 0..80)) {
            let mut index = HeightIndex::new(2);
            let mut naive: Vec<u64> = Vec::new();

            for op in ops {
                match op {
                    Op::Push(h) => {
                        index.push(h);
                        naive.push(u64::from(h));
                    }
                    Op::Truncate(n) => {
                        index.truncate(n);
                        naive.truncate(n);
                    }
                    Op::Clear => {
                        index.clear();
                        naive.clear();
                    }
                }
            }

            prop_assert_eq!(index.len(), naive.len());
            let mut sum = 0;
            for (i, h) in naive.iter().enumerate() {
                sum += h;
                prop_assert_eq!(index.prefix_sum(i), sum);
            }
            prop_assert_eq!(index.total(), sum);
        }
    }
}
