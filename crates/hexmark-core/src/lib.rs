//! Hex-grid geometry and dense per-cell board storage.
//!
//! Cells are [`HexCoords`] on a rectangular [`BoardSize`], with six
//! [`Hexside`]s per cell in a fixed order. Per-cell values live in a
//! [`BoardStorage`]: [`FlatBoardStorage`] for small boards,
//! [`BlockedBoardStorage`] for large or sparsely written ones.

pub mod coords;
pub mod error;
pub mod storage;

pub use coords::{BoardIter, BoardSize, HexCoords, Hexside};
pub use error::{Error, Result};
pub use storage::{BLOCK_SIZE, BlockedBoardStorage, BoardStorage, FlatBoardStorage};
