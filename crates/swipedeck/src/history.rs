//! Bounded rewind history.

use std::collections::VecDeque;

/// Recently swiped cards, oldest first. Pushing past capacity evicts the
/// oldest entry; rewinding pops the newest.
#[derive(Clone, Debug)]
pub struct History<C> {
    items: VecDeque<C>,
    capacity: usize,
}

impl<C: PartialEq> History<C> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity, evicting the oldest entries that no longer fit.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.items.len() > capacity {
            self.items.pop_front();
        }
    }

    /// Records `card` as the newest entry. Returns the evicted oldest entry,
    /// if any.
    pub fn push(&mut self, card: C) -> Option<C> {
        self.items.push_back(card);
        if self.items.len() > self.capacity {
            self.items.pop_front()
        } else {
            None
        }
    }

    pub fn pop(&mut self) -> Option<C> {
        self.items.pop_back()
    }

    pub fn newest(&self) -> Option<&C> {
        self.items.back()
    }

    pub fn contains(&self, card: &C) -> bool {
        self.items.contains(card)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_evicts_oldest_first() {
        let mut history = History::with_capacity(3);
        for card in 1..=3 {
            assert_eq!(history.push(card), None);
        }
        assert_eq!(history.push(4), Some(1));
        assert_eq!(history.push(5), Some(2));

        assert_eq!(history.len(), 3);
        assert!(!history.contains(&1));
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
    }

    #[test]
    fn pop_returns_newest() {
        let mut history = History::with_capacity(10);
        history.push("a");
        history.push("b");
        assert_eq!(history.pop(), Some("b"));
        assert_eq!(history.pop(), Some("a"));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn shrinking_capacity_drops_oldest() {
        let mut history = History::with_capacity(5);
        for card in 0..5 {
            history.push(card);
        }
        history.set_capacity(2);
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut history = History::with_capacity(0);
        assert_eq!(history.push('x'), Some('x'));
        assert!(history.is_empty());
    }
}
