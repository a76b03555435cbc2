//! Priority queue implementations.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::Distance;
use crate::key_value::HexKeyValuePair;
use crate::traits::PriorityQueue;

// ---------------------------------------------------------------------------
// HeapPriorityQueue
// ---------------------------------------------------------------------------

/// Binary-heap priority queue for any ordered key.
#[derive(Debug, Clone)]
pub struct HeapPriorityQueue<K, V> {
    heap: BinaryHeap<Reverse<HexKeyValuePair<K, V>>>,
}

impl<K: Ord, V> Default for HeapPriorityQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> HeapPriorityQueue<K, V> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Create an empty queue with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }
}

impl<K: Ord + Copy, V> PriorityQueue<K, V> for HeapPriorityQueue<K, V> {
    #[inline]
    fn enqueue(&mut self, key: K, value: V) {
        // Reverse so BinaryHeap (max-heap) pops the smallest key first.
        self.heap.push(Reverse(HexKeyValuePair::new(key, value)));
    }

    #[inline]
    fn try_dequeue(&mut self) -> Option<HexKeyValuePair<K, V>> {
        self.heap.pop().map(|Reverse(pair)| pair)
    }

    #[inline]
    fn peek_key(&self) -> Option<K> {
        self.heap.peek().map(|Reverse(pair)| *pair.key())
    }

    #[inline]
    fn len(&self) -> usize {
        self.heap.len()
    }
}

// ---------------------------------------------------------------------------
// BucketPriorityQueue
// ---------------------------------------------------------------------------

/// Bucket (Dial) queue keyed by [`Distance`].
///
/// One bucket per key value, scanned upwards from the smallest non-empty
/// one. With small step costs the scan moves a few buckets per dequeue, so
/// both operations are close to O(1). Entries sharing a key come out in
/// last-in, first-out order.
#[derive(Debug, Clone)]
pub struct BucketPriorityQueue<V> {
    buckets: Vec<Vec<V>>,
    cursor: usize,
    len: usize,
}

impl<V> Default for BucketPriorityQueue<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> BucketPriorityQueue<V> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            cursor: 0,
            len: 0,
        }
    }
}

impl<V> PriorityQueue<Distance, V> for BucketPriorityQueue<V> {
    fn enqueue(&mut self, key: Distance, value: V) {
        let k = usize::from(key);
        if k >= self.buckets.len() {
            self.buckets.resize_with(k + 1, Vec::new);
        }
        self.buckets[k].push(value);
        self.cursor = self.cursor.min(k);
        self.len += 1;
    }

    fn try_dequeue(&mut self) -> Option<HexKeyValuePair<Distance, V>> {
        if self.len == 0 {
            return None;
        }
        while self.buckets[self.cursor].is_empty() {
            self.cursor += 1;
        }
        let value = self.buckets[self.cursor].pop()?;
        self.len -= 1;
        // Bucket indices never exceed `Distance::MAX`.
        let key = Distance::try_from(self.cursor).ok()?;
        Some(HexKeyValuePair::new(key, value))
    }

    fn peek_key(&self) -> Option<Distance> {
        let offset = self.buckets.get(self.cursor..)?.iter().position(|b| !b.is_empty())?;
        Distance::try_from(self.cursor + offset).ok()
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    use super::*;

    fn drain<Q: PriorityQueue<Distance, u32>>(q: &mut Q) -> Vec<Distance> {
        let mut keys = Vec::new();
        while let Some(item) = q.try_dequeue() {
            keys.push(*item.key());
        }
        keys
    }

    #[test]
    fn heap_pops_smallest_first() {
        let mut q = HeapPriorityQueue::with_capacity(8);
        for (k, v) in [(5u16, 0u32), (1, 1), (3, 2), (1, 3), (9, 4)] {
            q.enqueue(k, v);
        }
        assert_eq!(q.len(), 5);
        assert_eq!(drain(&mut q), [1, 1, 3, 5, 9]);
        assert!(q.is_empty());
        assert!(q.try_dequeue().is_none());
    }

    #[test]
    fn bucket_pops_smallest_first() {
        let mut q = BucketPriorityQueue::new();
        for (k, v) in [(5u16, 0u32), (1, 1), (3, 2), (1, 3), (9, 4)] {
            q.enqueue(k, v);
        }
        assert_eq!(q.len(), 5);
        assert_eq!(drain(&mut q), [1, 1, 3, 5, 9]);
        assert!(q.is_empty());
        assert!(q.try_dequeue().is_none());
    }

    #[test]
    fn peek_leaves_the_queue_intact() {
        let mut heap = HeapPriorityQueue::new();
        let mut bucket = BucketPriorityQueue::new();
        assert_eq!(heap.peek_key(), None);
        assert_eq!(bucket.peek_key(), None);
        for (k, v) in [(8u16, 'x'), (2, 'y'), (6, 'z')] {
            heap.enqueue(k, v);
            bucket.enqueue(k, v);
        }
        assert_eq!(heap.peek_key(), Some(2));
        assert_eq!(bucket.peek_key(), Some(2));
        assert_eq!(heap.len(), 3);
        assert_eq!(*bucket.try_dequeue().unwrap().key(), 2);
        // The cursor now rests on an empty bucket.
        assert_eq!(bucket.peek_key(), Some(6));
    }

    #[test]
    fn bucket_accepts_keys_below_the_cursor() {
        let mut q = BucketPriorityQueue::new();
        q.enqueue(10, 'a');
        q.enqueue(12, 'b');
        let first = q.try_dequeue().unwrap();
        assert_eq!(first.into_parts(), (10, 'a'));
        q.enqueue(4, 'c');
        assert_eq!(q.try_dequeue().unwrap().into_parts(), (4, 'c'));
        assert_eq!(q.try_dequeue().unwrap().into_parts(), (12, 'b'));
    }

    #[test]
    fn bucket_handles_the_largest_key() {
        let mut q = BucketPriorityQueue::new();
        q.enqueue(Distance::MAX, ());
        q.enqueue(0, ());
        assert_eq!(*q.try_dequeue().unwrap().key(), 0);
        assert_eq!(*q.try_dequeue().unwrap().key(), Distance::MAX);
    }

    #[test]
    fn interleaved_operations_match_between_queues() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut heap = HeapPriorityQueue::new();
        let mut bucket = BucketPriorityQueue::new();
        let mut floor = 0u16;
        for i in 0..2000u32 {
            if rng.random_range(0..3) > 0 {
                // Dijkstra never enqueues below the last dequeued key.
                let key = floor + rng.random_range(0..20u16);
                heap.enqueue(key, i);
                bucket.enqueue(key, i);
            } else {
                let a = heap.try_dequeue().map(|p| *p.key());
                let b = bucket.try_dequeue().map(|p| *p.key());
                assert_eq!(a, b);
                if let Some(k) = a {
                    floor = k;
                }
            }
            assert_eq!(heap.len(), bucket.len());
        }
        assert_eq!(drain(&mut heap), drain(&mut bucket));
    }
}
