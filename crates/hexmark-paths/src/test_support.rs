//! Randomized cost maps and a brute-force reference for the unit tests.

use hexmark_core::{BoardSize, HexCoords, Hexside};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::StepCost;
use crate::traits::DirectedCost;

/// Per-hexside costs drawn from a seeded generator: roughly one side in
/// seven blocked, the rest costing 0 to 9.
pub(crate) struct RandomCosts {
    size: BoardSize,
    costs: Vec<[Option<StepCost>; 6]>,
}

impl RandomCosts {
    pub(crate) fn new(size: BoardSize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let costs = size
            .iter()
            .map(|_| {
                std::array::from_fn(|_| {
                    if rng.random_range(0..100) < 15 {
                        None
                    } else {
                        Some(rng.random_range(0..10))
                    }
                })
            })
            .collect();
        Self { size, costs }
    }
}

impl DirectedCost for RandomCosts {
    fn step_cost(&self, from: HexCoords, side: Hexside) -> Option<StepCost> {
        let i = self.size.index_of(from)?;
        self.costs[i][side.index()]
    }
}

impl DirectedCost for &RandomCosts {
    fn step_cost(&self, from: HexCoords, side: Hexside) -> Option<StepCost> {
        (**self).step_cost(from, side)
    }
}

/// Shortest distances by repeated edge relaxation, indexed row-major.
pub(crate) fn bellman_ford(
    size: BoardSize,
    source: HexCoords,
    cost: &impl DirectedCost,
) -> Vec<Option<u32>> {
    let mut dist = vec![None; size.cell_count()];
    if let Some(i) = size.index_of(source) {
        dist[i] = Some(0u32);
    }
    loop {
        let mut changed = false;
        for u in size {
            let Some(du) = size.index_of(u).and_then(|i| dist[i]) else {
                continue;
            };
            for side in Hexside::ALL {
                let Some(vi) = size.index_of(u.neighbor(side)) else {
                    continue;
                };
                let Some(c) = cost.step_cost(u, side) else {
                    continue;
                };
                let dv = du + u32::from(c);
                if dist[vi].is_none_or(|old| dv < old) {
                    dist[vi] = Some(dv);
                    changed = true;
                }
            }
        }
        if !changed {
            return dist;
        }
    }
}
