use hexmark_core::{HexCoords, Hexside};

use crate::StepCost;
use crate::key_value::HexKeyValuePair;

/// Directed step cost over a hex map.
///
/// Implemented for any `Fn(HexCoords, Hexside) -> Option<StepCost>`.
pub trait DirectedCost {
    /// Cost of leaving `from` across `side`, or `None` when that move is
    /// blocked. Need not equal the cost of the reverse move.
    fn step_cost(&self, from: HexCoords, side: Hexside) -> Option<StepCost>;
}

impl<F> DirectedCost for F
where
    F: Fn(HexCoords, Hexside) -> Option<StepCost>,
{
    #[inline]
    fn step_cost(&self, from: HexCoords, side: Hexside) -> Option<StepCost> {
        self(from, side)
    }
}

/// Min-priority queue of keyed values.
pub trait PriorityQueue<K, V> {
    /// Insert `value` with priority `key`.
    fn enqueue(&mut self, key: K, value: V);

    /// Remove and return an entry with the smallest key, if any.
    fn try_dequeue(&mut self) -> Option<HexKeyValuePair<K, V>>;

    /// Smallest queued key without removing its entry.
    fn peek_key(&self) -> Option<K>;

    /// Number of queued entries.
    fn len(&self) -> usize;

    /// Whether the queue is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
