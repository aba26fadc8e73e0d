//! Time-ordered queue of pending animation steps.
//!
//! Entries are stored in a min-heap keyed by `(due, insertion_order)`.
//! Earlier due times are popped first; ties are broken by insertion order
//! (FIFO).

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

/// An entry in the timeline.
#[derive(Debug)]
struct Entry<E> {
    event: E,
    due: Duration,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Wrapped in Reverse for the BinaryHeap; this is the natural order.
        self.due.cmp(&other.due).then(self.seq.cmp(&other.seq))
    }
}

/// A queue of events, each due at a point on a session clock.
pub struct Timeline<E> {
    heap: BinaryHeap<Reverse<Entry<E>>>,
    seq: u64,
}

impl<E> Timeline<E> {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Schedule `event` at clock time `due`.
    pub fn push(&mut self, event: E, due: Duration) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { event, due, seq }));
    }

    /// Due time of the earliest entry.
    pub fn peek_due(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(entry)| entry.due)
    }

    /// Pop the earliest entry if it is due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(E, Duration)> {
        if self.peek_due()? > now {
            return None;
        }
        self.pop()
    }

    /// Pop the earliest entry regardless of its due time.
    pub fn pop(&mut self) -> Option<(E, Duration)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.event, entry.due))
    }

    /// Whether the timeline is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Remove all entries that do **not** satisfy the predicate.
    pub fn retain(&mut self, predicate: impl Fn(&E) -> bool) {
        let old_heap = std::mem::take(&mut self.heap);
        self.heap = old_heap
            .into_iter()
            .filter(|Reverse(entry)| predicate(&entry.event))
            .collect();
    }
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self::new()
    }
}
