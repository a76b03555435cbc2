//! Landmark distance precomputation for hex grids.
//!
//! This crate fills *distance fields*: for one source cell (a landmark), the
//! minimum directed cost to reach every other cell on the board, given a
//! per-hexside step cost that may differ by direction. Fields from several
//! landmarks combine into an admissible A* heuristic through the triangle
//! inequality ([`LandmarkCollection::estimate`]).
//!
//! - **Dijkstra** single-landmark distance fields ([`LandmarkPopulator::fill`])
//! - **Landmarks** with forward and reverse fields, built in parallel
//!   ([`LandmarkCollection::build`])
//! - **Heuristic** lower bounds for A* ([`LandmarkCollection::estimate`])
//! - **Queues** behind [`PriorityQueue`]: a binary heap
//!   ([`HeapPriorityQueue`]) and a bucket queue ([`BucketPriorityQueue`])
//!
//! # Trait seams
//!
//! | Trait | Supplied by |
//! |---|---|
//! | [`DirectedCost`] | the map: step cost out of a cell across a hexside |
//! | [`PriorityQueue`] | any min-queue of [`HexKeyValuePair`]s |

mod config;
mod error;
mod key_value;
mod landmark;
mod populator;
mod queue;
mod traits;

#[cfg(test)]
mod test_support;

pub use config::{PopulatorConfig, QueueKind, StorageKind};
pub use error::{Error, Result};
pub use key_value::HexKeyValuePair;
pub use landmark::{Landmark, LandmarkCollection};
pub use populator::{DistanceField, FillStats, LandmarkPopulator};
pub use queue::{BucketPriorityQueue, HeapPriorityQueue};
pub use traits::{DirectedCost, PriorityQueue};

/// Accumulated cost from a landmark.
pub type Distance = u16;

/// Cost of a single step across one hexside.
pub type StepCost = u16;

/// Largest representable [`Distance`]. A fill that would exceed it fails
/// with [`Error::DistanceOverflow`].
pub const MAX_DISTANCE: Distance = Distance::MAX;
