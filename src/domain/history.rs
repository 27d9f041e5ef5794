//! Fixed-capacity FIFO history used for the price series and the trade log.

use std::collections::VecDeque;
use std::ops::Index;

#[derive(Debug, Clone, PartialEq)]
pub struct History<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> History<T> {
    /// A capacity of zero is bumped to one so the newest item is always kept.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        History {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an item, evicting the oldest one when full. Returns the evicted item.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.push(item);
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.front()
    }

    /// The two most recent items as `(previous, latest)`.
    pub fn last_pair(&self) -> Option<(&T, &T)> {
        let n = self.items.len();
        if n < 2 {
            return None;
        }
        Some((&self.items[n - 2], &self.items[n - 1]))
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.iter().cloned().collect()
    }
}

impl<T> Index<usize> for History<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a History<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_within_capacity_keeps_everything() {
        let mut h = History::with_capacity(3);
        assert_eq!(h.push(1), None);
        assert_eq!(h.push(2), None);
        assert_eq!(h.len(), 2);
        assert_eq!(h.to_vec(), vec![1, 2]);
    }

    #[test]
    fn push_over_capacity_evicts_oldest() {
        let mut h = History::with_capacity(3);
        h.extend([1, 2, 3]);
        assert_eq!(h.push(4), Some(1));
        assert_eq!(h.to_vec(), vec![2, 3, 4]);
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn zero_capacity_keeps_newest() {
        let mut h = History::with_capacity(0);
        h.extend([1, 2]);
        assert_eq!(h.capacity(), 1);
        assert_eq!(h.to_vec(), vec![2]);
    }

    #[test]
    fn last_pair_requires_two_items() {
        let mut h = History::with_capacity(5);
        assert!(h.last_pair().is_none());
        h.push(10);
        assert!(h.last_pair().is_none());
        h.push(20);
        assert_eq!(h.last_pair(), Some((&10, &20)));
    }

    #[test]
    fn first_last_and_index() {
        let mut h = History::with_capacity(2);
        h.extend(["a", "b", "c"]);
        assert_eq!(h.first(), Some(&"b"));
        assert_eq!(h.last(), Some(&"c"));
        assert_eq!(h[0], "b");
        assert_eq!((&h).into_iter().count(), 2);
    }
}
