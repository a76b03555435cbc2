//! Error type shared by the geometry and storage layers.

use thiserror::Error;

use crate::coords::{BoardSize, HexCoords};

/// hexmark-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid board size {width}x{height}: both dimensions must be positive")]
    InvalidSize { width: i32, height: i32 },

    #[error("{coords} is outside the {size} board")]
    OutOfRange { coords: HexCoords, size: BoardSize },
}

pub type Result<T> = std::result::Result<T, Error>;
