use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};

/// Min-priority queue keyed by `f64` cost.
///
/// The same payload may be inserted any number of times with different keys;
/// nothing is deduplicated or updated in place. Entries with equal keys come
/// out in no particular order.
#[derive(Debug, Clone)]
pub struct MinPriorityQueue<T> {
    heap: BinaryHeap<HeapEntry<T>>,
}

impl<T> MinPriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Add `payload` with priority `key`.
    pub fn insert(&mut self, payload: T, key: f64) {
        debug_assert!(!key.is_nan(), "queue keys must not be NaN");
        self.heap.push(HeapEntry {
            key: FloatOrd(key),
            payload,
        });
    }

    /// Remove and return the entry with the smallest key.
    pub fn pop_min(&mut self) -> Result<(T, f64)> {
        self.heap
            .pop()
            .map(|entry| (entry.payload, entry.key.0))
            .ok_or(Error::EmptyQueue)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for MinPriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug)]
struct HeapEntry<T> {
    key: FloatOrd,
    payload: T,
}

impl<T> PartialEq for HeapEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for HeapEntry<T> {}

impl<T> Ord for HeapEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by key.
        other.key.cmp(&self.key)
    }
}

impl<T> PartialOrd for HeapEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
