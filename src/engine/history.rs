//! Bounded chronological log of direction changes

use std::collections::VecDeque;

use super::Direction;

/// Default number of direction changes kept
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// "The stick sat at `direction` for `held` seconds before it moved"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryEntry {
    pub direction: Direction,
    pub held: f32,
}

impl HistoryEntry {
    pub fn new(direction: Direction, held: f32) -> Self {
        Self { direction, held }
    }
}

/// Fixed-capacity history, newest entry at the back
///
/// Pushing past capacity silently drops the oldest entry. The buffer never
/// measures time itself; durations come from the caller.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create an empty buffer; a capacity of 0 is raised to 1
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Most recently pushed entry, `None` when empty
    pub fn peek_newest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Entries from newest to oldest; re-iterating does not change the buffer
    pub fn iter_newest_first(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + '_ {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change capacity, evicting the oldest entries that no longer fit
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(dir: Direction, held: f32) -> HistoryEntry {
        HistoryEntry::new(dir, held)
    }

    #[test]
    fn test_peek_empty() {
        let buffer = HistoryBuffer::default();
        assert!(buffer.is_empty());
        assert!(buffer.peek_newest().is_none());
        assert_eq!(buffer.capacity(), DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn test_newest_first_order() {
        let mut buffer = HistoryBuffer::new(10);
        buffer.push(entry(Direction::Neutral, 1.0));
        buffer.push(entry(Direction::Down, 0.1));
        buffer.push(entry(Direction::DownRight, 0.05));

        assert_eq!(buffer.peek_newest().unwrap().direction, Direction::DownRight);

        let dirs: Vec<_> = buffer.iter_newest_first().map(|e| e.direction).collect();
        assert_eq!(
            dirs,
            vec![Direction::DownRight, Direction::Down, Direction::Neutral]
        );

        // Restartable
        assert_eq!(buffer.iter_newest_first().count(), 3);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut buffer = HistoryBuffer::new(3);
        for i in 0..4 {
            buffer.push(entry(Direction::ALL[i], i as f32));
        }

        assert_eq!(buffer.len(), 3);
        let held: Vec<_> = buffer.iter_newest_first().map(|e| e.held).collect();
        assert_eq!(held, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let mut buffer = HistoryBuffer::new(0);
        buffer.push(entry(Direction::Up, 0.1));
        buffer.push(entry(Direction::Down, 0.2));
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.peek_newest().unwrap().direction, Direction::Down);
    }

    #[test]
    fn test_shrinking_capacity_keeps_newest() {
        let mut buffer = HistoryBuffer::new(5);
        for i in 0..5 {
            buffer.push(entry(Direction::Neutral, i as f32));
        }

        buffer.set_capacity(2);
        let held: Vec<_> = buffer.iter_newest_first().map(|e| e.held).collect();
        assert_eq!(held, vec![4.0, 3.0]);

        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 2);
    }
}
