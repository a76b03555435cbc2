//! Single-landmark distance fill.

use hexmark_core::{
    BlockedBoardStorage, BoardSize, BoardStorage, FlatBoardStorage, HexCoords, Hexside,
};

use crate::Distance;
use crate::config::StorageKind;
use crate::error::{Error, Result};
use crate::traits::{DirectedCost, PriorityQueue};

/// Counters collected during one fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillStats {
    /// Cells committed to the field. Each cell is committed at most once.
    pub settled: usize,
    /// Entries pushed onto the queue, including the landmark itself.
    pub enqueued: usize,
    /// Entries popped for a cell that was already committed.
    pub stale: usize,
}

// ---------------------------------------------------------------------------
// DistanceField
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum DistanceStore {
    Flat(FlatBoardStorage<Option<Distance>>),
    Blocked(BlockedBoardStorage<Option<Distance>>),
}

/// Shortest directed cost from one landmark to every cell of a board.
///
/// Produced by [`LandmarkPopulator::fill`] and read-only afterwards. A cell
/// holding `None` cannot be reached from the landmark.
#[derive(Debug, Clone)]
pub struct DistanceField {
    landmark: HexCoords,
    store: DistanceStore,
    stats: FillStats,
}

impl DistanceField {
    /// The cell this field was filled from.
    #[inline]
    pub fn landmark(&self) -> HexCoords {
        self.landmark
    }

    /// Board extent.
    pub fn size(&self) -> BoardSize {
        match &self.store {
            DistanceStore::Flat(s) => s.size(),
            DistanceStore::Blocked(s) => s.size(),
        }
    }

    /// Layout of the underlying storage.
    pub fn storage_kind(&self) -> StorageKind {
        match &self.store {
            DistanceStore::Flat(_) => StorageKind::Flat,
            DistanceStore::Blocked(_) => StorageKind::Blocked,
        }
    }

    /// Counters from the fill that produced this field.
    #[inline]
    pub fn stats(&self) -> FillStats {
        self.stats
    }

    /// Distance from the landmark to `coords`, or `None` when unreachable.
    ///
    /// Fails only when `coords` is off the board.
    #[inline]
    pub fn get(&self, coords: HexCoords) -> Result<Option<Distance>> {
        let d = match &self.store {
            DistanceStore::Flat(s) => s.get(coords).copied(),
            DistanceStore::Blocked(s) => s.get(coords).copied(),
        };
        Ok(d?)
    }

    /// Whether `coords` is reachable from the landmark.
    pub fn is_reachable(&self, coords: HexCoords) -> Result<bool> {
        Ok(self.get(coords)?.is_some())
    }

    /// Number of reachable cells, the landmark included.
    pub fn reachable_count(&self) -> usize {
        let mut n = 0;
        self.for_each_serial(|_, d| {
            if d.is_some() {
                n += 1;
            }
        });
        n
    }

    /// Visit every cell in parallel, in no particular order.
    pub fn for_each<F>(&self, f: F)
    where
        F: Fn(HexCoords, Option<Distance>) + Sync + Send,
    {
        match &self.store {
            DistanceStore::Flat(s) => s.for_each(|c, d| f(c, *d)),
            DistanceStore::Blocked(s) => s.for_each(|c, d| f(c, *d)),
        }
    }

    /// Visit every cell in row-major order.
    pub fn for_each_serial<F>(&self, mut f: F)
    where
        F: FnMut(HexCoords, Option<Distance>),
    {
        match &self.store {
            DistanceStore::Flat(s) => s.for_each_serial(|c, d| f(c, *d)),
            DistanceStore::Blocked(s) => s.for_each_serial(|c, d| f(c, *d)),
        }
    }
}

// ---------------------------------------------------------------------------
// LandmarkPopulator
// ---------------------------------------------------------------------------

/// Dijkstra flood-fill from a single landmark.
///
/// The populator owns its queue and, during [`fill`](Self::fill), its
/// distance field. A cell is committed when it is dequeued for the first
/// time; with non-negative step costs that first commit is final, so later
/// entries for the same cell are discarded as stale.
pub struct LandmarkPopulator<Q, C> {
    landmark: HexCoords,
    size: BoardSize,
    queue: Q,
    cost: C,
    storage: StorageKind,
    parallel_init: bool,
}

impl<Q, C> LandmarkPopulator<Q, C>
where
    Q: PriorityQueue<Distance, HexCoords>,
    C: DirectedCost,
{
    /// Prepare a fill from `landmark` over a board of `size`.
    ///
    /// The queue is created right away and seeded with `(0, landmark)`.
    pub fn new(
        landmark: HexCoords,
        size: BoardSize,
        queue_factory: impl FnOnce() -> Q,
        cost: C,
    ) -> Result<Self> {
        let size = size.validate()?;
        if !size.contains(landmark) {
            return Err(Error::LandmarkOffBoard { landmark, size });
        }
        log::debug!("find distances from {landmark} on {size} board");

        let mut queue = queue_factory();
        queue.enqueue(0, landmark);
        Ok(Self {
            landmark,
            size,
            queue,
            cost,
            storage: StorageKind::default(),
            parallel_init: false,
        })
    }

    /// Choose the layout of the resulting [`DistanceField`].
    pub fn with_storage(mut self, storage: StorageKind) -> Self {
        self.storage = storage;
        self
    }

    /// Allocate every cell of the field up front, on the rayon pool.
    pub fn with_parallel_init(mut self, parallel_init: bool) -> Self {
        self.parallel_init = parallel_init;
        self
    }

    /// The source cell.
    #[inline]
    pub fn landmark(&self) -> HexCoords {
        self.landmark
    }

    /// Entries waiting in the queue.
    #[inline]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Run the fill to completion and hand over the distance field.
    pub fn fill(mut self) -> Result<DistanceField> {
        let (store, stats) = match self.storage.resolve(self.size) {
            StorageKind::Flat => {
                let empty: FlatBoardStorage<Option<Distance>> = self.empty_store()?;
                let (s, stats) = self.run(empty)?;
                (DistanceStore::Flat(s), stats)
            }
            StorageKind::Blocked | StorageKind::Auto => {
                let empty: BlockedBoardStorage<Option<Distance>> = self.empty_store()?;
                let (s, stats) = self.run(empty)?;
                (DistanceStore::Blocked(s), stats)
            }
        };
        log::debug!(
            "distances from {} done: {} settled, {} enqueued, {} stale",
            self.landmark,
            stats.settled,
            stats.enqueued,
            stats.stale
        );
        Ok(DistanceField {
            landmark: self.landmark,
            store,
            stats,
        })
    }

    fn empty_store<S: BoardStorage<Option<Distance>>>(&self) -> Result<S> {
        let store = if self.parallel_init {
            S::from_fn(self.size, |_| None, true)?
        } else {
            S::filled(self.size, None)?
        };
        Ok(store)
    }

    fn run<S>(&mut self, mut store: S) -> Result<(S, FillStats)>
    where
        S: BoardStorage<Option<Distance>>,
    {
        let mut stats = FillStats {
            enqueued: self.queue.len(),
            ..FillStats::default()
        };
        // Tentative distances past the cap; fatal only if no cheaper path
        // commits the cell.
        let mut overflows: Vec<(HexCoords, u32)> = Vec::new();

        while let Some(item) = self.queue.try_dequeue() {
            let (key, here) = item.into_parts();
            if store.get(here)?.is_some() {
                stats.stale += 1;
                continue;
            }
            log::trace!("dequeue {here} w/ cost={key:>4}");
            store.set(here, Some(key))?;
            stats.settled += 1;

            for side in Hexside::ALL {
                let neighbor = here.neighbor(side);
                if !self.size.contains(neighbor) || store.get(neighbor)?.is_some() {
                    continue;
                }
                let Some(step) = self.cost.step_cost(here, side) else {
                    continue;
                };
                let total = u32::from(key) + u32::from(step);
                let Ok(distance) = Distance::try_from(total) else {
                    log::trace!("   overflow {neighbor}: {total}");
                    overflows.push((neighbor, total));
                    continue;
                };
                log::trace!("   enqueue {neighbor}: {distance:>4}");
                self.queue.enqueue(distance, neighbor);
                stats.enqueued += 1;
            }
        }

        for (at, distance) in overflows {
            if store.get(at)?.is_none() {
                return Err(Error::DistanceOverflow { at, distance });
            }
        }
        Ok((store, stats))
    }
}
