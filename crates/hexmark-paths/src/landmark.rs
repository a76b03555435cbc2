//! Landmarks and the triangle-inequality heuristic built from them.

use hexmark_core::{BoardSize, HexCoords, Hexside};
use rayon::prelude::*;

use crate::config::{PopulatorConfig, QueueKind};
use crate::error::{Error, Result};
use crate::populator::{DistanceField, LandmarkPopulator};
use crate::queue::{BucketPriorityQueue, HeapPriorityQueue};
use crate::traits::DirectedCost;
use crate::{Distance, StepCost};

/// Fill one distance field from `landmark` with the queue named in `config`.
fn populate<C: DirectedCost>(
    landmark: HexCoords,
    size: BoardSize,
    cost: C,
    config: &PopulatorConfig,
) -> Result<DistanceField> {
    match config.queue {
        QueueKind::Heap => LandmarkPopulator::new(landmark, size, HeapPriorityQueue::new, cost)?
            .with_storage(config.storage)
            .with_parallel_init(config.parallel_init)
            .fill(),
        QueueKind::Bucket => {
            LandmarkPopulator::new(landmark, size, BucketPriorityQueue::new, cost)?
                .with_storage(config.storage)
                .with_parallel_init(config.parallel_init)
                .fill()
        }
    }
}

/// A landmark cell with its distances in both directions.
///
/// `from` holds the cost of travelling landmark → cell; `to` holds the cost
/// of travelling cell → landmark. The two differ whenever step costs are
/// asymmetric.
#[derive(Debug, Clone)]
pub struct Landmark {
    coords: HexCoords,
    from: DistanceField,
    to: DistanceField,
}

impl Landmark {
    /// Fill both distance fields for `coords`.
    ///
    /// The reverse field is a fill over the reversed graph: stepping from
    /// `h` across `side` costs what the original map charges for moving
    /// from `h.neighbor(side)` back across `side.reversed()`.
    pub fn build<C: DirectedCost>(
        coords: HexCoords,
        size: BoardSize,
        cost: &C,
        config: &PopulatorConfig,
    ) -> Result<Self> {
        let forward = |h: HexCoords, side: Hexside| -> Option<StepCost> { cost.step_cost(h, side) };
        let reverse = |h: HexCoords, side: Hexside| -> Option<StepCost> {
            cost.step_cost(h.neighbor(side), side.reversed())
        };
        Ok(Self {
            coords,
            from: populate(coords, size, forward, config)?,
            to: populate(coords, size, reverse, config)?,
        })
    }

    /// The landmark cell.
    #[inline]
    pub fn coords(&self) -> HexCoords {
        self.coords
    }

    /// Cost of travelling from the landmark to `target`.
    pub fn distance_from(&self, target: HexCoords) -> Result<Option<Distance>> {
        self.from.get(target)
    }

    /// Cost of travelling from `source` to the landmark.
    pub fn distance_to(&self, source: HexCoords) -> Result<Option<Distance>> {
        self.to.get(source)
    }

    /// Landmark → cell field.
    pub fn field_from(&self) -> &DistanceField {
        &self.from
    }

    /// Cell → landmark field.
    pub fn field_to(&self) -> &DistanceField {
        &self.to
    }
}

/// A set of landmarks over one board, usable as an A* heuristic.
#[derive(Debug, Clone)]
pub struct LandmarkCollection {
    size: BoardSize,
    landmarks: Vec<Landmark>,
}

impl LandmarkCollection {
    /// Build a landmark at each of `coords`.
    ///
    /// Landmarks are independent of one another, so they are filled in
    /// parallel on the rayon pool. Fails if any landmark is off the board.
    pub fn build<C: DirectedCost + Sync>(
        size: BoardSize,
        coords: &[HexCoords],
        cost: &C,
        config: &PopulatorConfig,
    ) -> Result<Self> {
        let size = size.validate()?;
        if let Some(&landmark) = coords.iter().find(|&&c| !size.contains(c)) {
            return Err(Error::LandmarkOffBoard { landmark, size });
        }
        log::debug!("building {} landmarks on {size} board", coords.len());

        let landmarks = coords
            .par_iter()
            .map(|&c| Landmark::build(c, size, cost, config))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { size, landmarks })
    }

    /// Board extent.
    #[inline]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Number of landmarks.
    #[inline]
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    /// Whether the collection holds no landmarks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Landmark at `index`, in build order.
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }

    /// Iterate over the landmarks in build order.
    pub fn iter(&self) -> std::slice::Iter<'_, Landmark> {
        self.landmarks.iter()
    }

    /// Lower bound on the directed cost from `from` to `to`.
    ///
    /// For every landmark `L` the triangle inequality gives
    /// `d(from, to) >= d(L, to) - d(L, from)` and
    /// `d(from, to) >= d(from, L) - d(to, L)`. The estimate is the largest
    /// such bound over all landmarks, using only terms whose distances are
    /// both known, and never less than 0. It never overestimates, so it is
    /// admissible for A*.
    pub fn estimate(&self, from: HexCoords, to: HexCoords) -> Result<Distance> {
        let mut best: Distance = 0;
        for landmark in &self.landmarks {
            if let (Some(lt), Some(lf)) = (landmark.distance_from(to)?, landmark.distance_from(from)?)
            {
                best = best.max(lt.saturating_sub(lf));
            }
            if let (Some(fl), Some(tl)) = (landmark.distance_to(from)?, landmark.distance_to(to)?) {
                best = best.max(fl.saturating_sub(tl));
            }
        }
        Ok(best)
    }
}

impl<'a> IntoIterator for &'a LandmarkCollection {
    type Item = &'a Landmark;
    type IntoIter = std::slice::Iter<'a, Landmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.landmarks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageKind;
    use crate::test_support::{RandomCosts, bellman_ford};

    #[test]
    fn reverse_field_measures_travel_to_the_landmark() {
        let size = BoardSize::new(2, 1).unwrap();
        let a = HexCoords::new(0, 0);
        let b = HexCoords::new(1, 0);
        let cost = move |from: HexCoords, _: Hexside| -> Option<StepCost> {
            Some(if from == a { 5 } else { 1 })
        };
        let lm = Landmark::build(a, size, &cost, &PopulatorConfig::default()).unwrap();
        assert_eq!(lm.coords(), a);
        assert_eq!(lm.distance_from(b).unwrap(), Some(5));
        assert_eq!(lm.distance_to(b).unwrap(), Some(1));
        assert_eq!(lm.distance_to(a).unwrap(), Some(0));
        assert_eq!(lm.field_to().landmark(), a);
        assert_eq!(lm.field_to().reachable_count(), 2);
    }

    #[test]
    fn reverse_field_matches_reference_fills() {
        let size = BoardSize::new(11, 9).unwrap();
        let costs = RandomCosts::new(size, 21);
        let landmark = HexCoords::new(5, 4);
        let lm = Landmark::build(landmark, size, &costs, &PopulatorConfig::default()).unwrap();
        let forward = bellman_ford(size, landmark, &costs);
        for c in size {
            let i = size.index_of(c).unwrap();
            assert_eq!(lm.distance_from(c).unwrap().map(u32::from), forward[i]);
            // Cell -> landmark, straight from a forward fill out of `c`.
            let back = bellman_ford(size, c, &costs);
            let li = size.index_of(landmark).unwrap();
            assert_eq!(lm.distance_to(c).unwrap().map(u32::from), back[li], "cell {c}");
        }
    }

    #[test]
    fn off_board_landmark_fails_the_collection() {
        let size = BoardSize::new(8, 8).unwrap();
        let cost = |_: HexCoords, _: Hexside| -> Option<StepCost> { Some(1) };
        let bad = HexCoords::new(8, 2);
        let err = LandmarkCollection::build(
            size,
            &[HexCoords::new(1, 1), bad],
            &cost,
            &PopulatorConfig::default(),
        )
        .err()
        .unwrap();
        assert_eq!(err, Error::LandmarkOffBoard { landmark: bad, size });
    }

    #[test]
    fn collection_keeps_build_order() {
        let size = BoardSize::new(40, 40).unwrap();
        let cost = |_: HexCoords, _: Hexside| -> Option<StepCost> { Some(2) };
        let coords = [
            HexCoords::new(0, 0),
            HexCoords::new(39, 0),
            HexCoords::new(0, 39),
            HexCoords::new(39, 39),
            HexCoords::new(20, 20),
        ];
        let config = PopulatorConfig {
            storage: StorageKind::Auto,
            queue: QueueKind::Bucket,
            parallel_init: true,
        };
        let lc = LandmarkCollection::build(size, &coords, &cost, &config).unwrap();
        assert_eq!(lc.len(), 5);
        assert!(!lc.is_empty());
        let built: Vec<_> = lc.iter().map(Landmark::coords).collect();
        assert_eq!(built, coords);
        assert_eq!(lc.size(), size);
        for landmark in &lc {
            assert_eq!(landmark.distance_from(landmark.coords()).unwrap(), Some(0));
        }
        assert_eq!(lc.get(4).unwrap().field_from().storage_kind(), StorageKind::Blocked);
    }

    #[test]
    fn uniform_estimate_is_exact_along_a_landmark_ray() {
        // With unit costs every landmark distance is the hex range, and
        // `to` lies directly between `from` and the landmark.
        let size = BoardSize::new(12, 12).unwrap();
        let cost = |_: HexCoords, _: Hexside| -> Option<StepCost> { Some(1) };
        let landmark = HexCoords::new(6, 0);
        let lc = LandmarkCollection::build(size, &[landmark], &cost, &PopulatorConfig::default())
            .unwrap();
        let from = HexCoords::new(6, 10);
        let to = HexCoords::new(6, 4);
        assert_eq!(lc.estimate(from, to).unwrap(), 6);
        assert_eq!(lc.estimate(to, from).unwrap(), 6);
        assert_eq!(lc.estimate(from, from).unwrap(), 0);
    }

    #[test]
    fn estimate_never_overestimates() {
        let size = BoardSize::new(24, 18).unwrap();
        let costs = RandomCosts::new(size, 42);
        let coords = [HexCoords::new(0, 0), HexCoords::new(23, 17), HexCoords::new(12, 9)];
        let lc = LandmarkCollection::build(size, &coords, &costs, &PopulatorConfig::default())
            .unwrap();

        let sources = [HexCoords::new(3, 4), HexCoords::new(20, 2), HexCoords::new(11, 15)];
        for from in sources {
            let truth = bellman_ford(size, from, &costs);
            for to in size {
                let Some(d) = truth[size.index_of(to).unwrap()] else {
                    continue;
                };
                let h = lc.estimate(from, to).unwrap();
                assert!(u32::from(h) <= d, "estimate {h} > {d} from {from} to {to}");
            }
        }
    }

    #[test]
    fn estimate_rejects_off_board_cells() {
        let size = BoardSize::new(4, 4).unwrap();
        let cost = |_: HexCoords, _: Hexside| -> Option<StepCost> { Some(1) };
        let lc = LandmarkCollection::build(
            size,
            &[HexCoords::ZERO],
            &cost,
            &PopulatorConfig::default(),
        )
        .unwrap();
        assert!(lc.estimate(HexCoords::new(5, 5), HexCoords::ZERO).is_err());
    }
}
