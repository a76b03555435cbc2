//! Error types for landmark fills.

use hexmark_core::{BoardSize, HexCoords};
use thiserror::Error;

use crate::MAX_DISTANCE;

/// hexmark-paths error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Board(#[from] hexmark_core::Error),

    #[error("landmark {landmark} is outside the {size} board")]
    LandmarkOffBoard { landmark: HexCoords, size: BoardSize },

    #[error("distance {distance} to {at} exceeds the maximum of {max}", max = MAX_DISTANCE)]
    DistanceOverflow { at: HexCoords, distance: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
