//! Dense board storage: exactly one value per cell, behind one trait.
//!
//! Two physical layouts are provided:
//!
//! | Type | Layout | Suited for |
//! |---|---|---|
//! | [`FlatBoardStorage`] | one boxed slice per row | small boards |
//! | [`BlockedBoardStorage`] | 32×32 blocks, optionally lazy | large boards, distance fields |
//!
//! Both are generic over the cell value and share the [`BoardStorage`]
//! contract, so algorithms are written once against the trait.

mod blocked;
mod flat;

pub use blocked::{BLOCK_SIZE, BlockedBoardStorage};
pub use flat::FlatBoardStorage;

use crate::coords::{BoardSize, HexCoords};
use crate::error::{Error, Result};

/// Cell-value storage for a fixed-size board.
///
/// Writing requires `&mut self`, so a board handed out behind a shared
/// reference is read-only. Parallel writes go through
/// [`update_all`](BoardStorage::update_all), which gives each worker a
/// disjoint row or block.
pub trait BoardStorage<T: Send + Sync>: Sized {
    /// Build a board, calling `factory` exactly once per cell.
    ///
    /// With `parallel` set, rows or blocks are built on the rayon pool and
    /// then assembled in board order, so the result does not depend on
    /// completion order.
    fn from_fn<F>(size: BoardSize, factory: F, parallel: bool) -> Result<Self>
    where
        F: Fn(HexCoords) -> T + Sync + Send;

    /// Build a board where every cell holds a clone of `value`.
    fn filled(size: BoardSize, value: T) -> Result<Self>
    where
        T: Clone;

    /// Board extent.
    fn size(&self) -> BoardSize;

    /// Read the value at `coords`.
    fn get(&self, coords: HexCoords) -> Result<&T>;

    /// Replace the value at `coords`.
    ///
    /// Public so that other crates can fill a board they own. Code that
    /// hands a finished board to consumers should wrap it in a read-only
    /// view rather than expose the storage itself.
    fn set(&mut self, coords: HexCoords, value: T) -> Result<()>;

    /// Visit every cell exactly once, in parallel and in no particular order.
    fn for_each<F>(&self, f: F)
    where
        F: Fn(HexCoords, &T) + Sync + Send;

    /// Visit every cell exactly once, in row-major order.
    fn for_each_serial<F>(&self, f: F)
    where
        F: FnMut(HexCoords, &T);

    /// Update every cell in place, in parallel. Each worker owns a disjoint
    /// row or block.
    fn update_all<F>(&mut self, f: F)
    where
        F: Fn(HexCoords, &mut T) + Sync + Send;

    /// Whether `coords` lies on this board.
    #[inline]
    fn contains(&self, coords: HexCoords) -> bool {
        self.size().contains(coords)
    }
}

#[inline]
pub(crate) fn out_of_range(coords: HexCoords, size: BoardSize) -> Error {
    Error::OutOfRange { coords, size }
}
