//! Hex-grid geometry primitives: [`HexCoords`], [`Hexside`] and [`BoardSize`].
//!
//! Cells are addressed in *user* coordinates: column `x` grows right, row `y`
//! grows down. Hexes are flat-topped and odd columns sit half a hex lower
//! than even ones. Neighbour arithmetic goes through *canonical* (axial)
//! coordinates, where each hexside is a constant offset.

use std::fmt;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Hexside
// ---------------------------------------------------------------------------

/// One of the six sides of a hex, i.e. a direction towards a neighbour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hexside {
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl Hexside {
    /// Every hexside, in canonical (clockwise from north) order.
    ///
    /// Iteration order is fixed so that anything driven by it is reproducible.
    pub const ALL: [Hexside; 6] = [
        Hexside::North,
        Hexside::NorthEast,
        Hexside::SouthEast,
        Hexside::South,
        Hexside::SouthWest,
        Hexside::NorthWest,
    ];

    /// Position of this side in [`Hexside::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The opposite side.
    #[inline]
    pub const fn reversed(self) -> Hexside {
        match self {
            Hexside::North => Hexside::South,
            Hexside::NorthEast => Hexside::SouthWest,
            Hexside::SouthEast => Hexside::NorthWest,
            Hexside::South => Hexside::North,
            Hexside::SouthWest => Hexside::NorthEast,
            Hexside::NorthWest => Hexside::SouthEast,
        }
    }

    /// Offset of the neighbour across this side, in canonical coordinates.
    #[inline]
    const fn canonical_offset(self) -> (i32, i32) {
        match self {
            Hexside::North => (0, -1),
            Hexside::NorthEast => (1, 0),
            Hexside::SouthEast => (1, 1),
            Hexside::South => (0, 1),
            Hexside::SouthWest => (-1, 0),
            Hexside::NorthWest => (-1, -1),
        }
    }
}

impl fmt::Display for Hexside {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Hexside::North => "N",
            Hexside::NorthEast => "NE",
            Hexside::SouthEast => "SE",
            Hexside::South => "S",
            Hexside::SouthWest => "SW",
            Hexside::NorthWest => "NW",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// HexCoords
// ---------------------------------------------------------------------------

/// Immutable address of a single hex cell, in user coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoords {
    x: i32,
    y: i32,
}

impl HexCoords {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create coordinates from a column and row.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Create coordinates from canonical (axial) components.
    #[inline]
    pub const fn from_canonical(cx: i32, cy: i32) -> Self {
        Self {
            x: cx,
            y: cy - (cx + 1).div_euclid(2),
        }
    }

    /// Column.
    #[inline]
    pub const fn x(self) -> i32 {
        self.x
    }

    /// Row.
    #[inline]
    pub const fn y(self) -> i32 {
        self.y
    }

    /// Canonical (axial) components of these coordinates.
    #[inline]
    pub const fn canonical(self) -> (i32, i32) {
        (self.x, self.y + (self.x + 1).div_euclid(2))
    }

    /// The cell across `side`. The result may lie off-board; callers
    /// bounds-check it against a [`BoardSize`] before use.
    #[inline]
    pub const fn neighbor(self, side: Hexside) -> Self {
        let (cx, cy) = self.canonical();
        let (dx, dy) = side.canonical_offset();
        Self::from_canonical(cx + dx, cy + dy)
    }

    /// All six neighbours, in [`Hexside::ALL`] order.
    #[inline]
    pub fn neighbors(self) -> [HexCoords; 6] {
        Hexside::ALL.map(|side| self.neighbor(side))
    }

    /// Number of single-hex steps between `self` and `other`.
    #[inline]
    pub fn range_to(self, other: HexCoords) -> i32 {
        let (ax, ay) = self.canonical();
        let (bx, by) = other.canonical();
        let dx = bx - ax;
        let dy = by - ay;
        dx.abs().max(dy.abs()).max((dx - dy).abs())
    }
}

impl PartialOrd for HexCoords {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Row-major order.
impl Ord for HexCoords {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for HexCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// BoardSize
// ---------------------------------------------------------------------------

/// Extent of a board in cells. Valid cells are `0..width` × `0..height`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSize {
    width: i32,
    height: i32,
}

impl BoardSize {
    /// Create a board size. Both dimensions must be positive.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self { width, height }.validate()
    }

    /// Re-check the dimensions. Sizes obtained through deserialization are
    /// not validated until they reach a storage constructor.
    pub fn validate(self) -> Result<Self> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    /// Width in cells.
    #[inline]
    pub const fn width(self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub const fn height(self) -> i32 {
        self.height
    }

    /// Whether `coords` lies on the board.
    #[inline]
    pub const fn contains(self, coords: HexCoords) -> bool {
        coords.x >= 0 && coords.x < self.width && coords.y >= 0 && coords.y < self.height
    }

    /// Total number of cells.
    #[inline]
    pub const fn cell_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Row-major index of `coords`, or `None` when off-board.
    #[inline]
    pub const fn index_of(self, coords: HexCoords) -> Option<usize> {
        if !self.contains(coords) {
            return None;
        }
        Some(coords.y as usize * self.width as usize + coords.x as usize)
    }

    /// Row-major iterator over every cell on the board.
    #[inline]
    pub fn iter(self) -> BoardIter {
        BoardIter {
            size: self,
            cur: HexCoords::ZERO,
        }
    }
}

impl IntoIterator for BoardSize {
    type Item = HexCoords;
    type IntoIter = BoardIter;
    #[inline]
    fn into_iter(self) -> BoardIter {
        self.iter()
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// BoardIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the cells of a [`BoardSize`].
#[derive(Clone, Debug)]
pub struct BoardIter {
    size: BoardSize,
    cur: HexCoords,
}

impl Iterator for BoardIter {
    type Item = HexCoords;

    #[inline]
    fn next(&mut self) -> Option<HexCoords> {
        if self.cur.y >= self.size.height || self.size.width <= 0 {
            return None;
        }
        let c = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.size.width {
            self.cur.x = 0;
            self.cur.y += 1;
        }
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.size.width <= 0 || self.cur.y >= self.size.height {
            return (0, Some(0));
        }
        let w = self.size.width as usize;
        let remaining_in_row = (self.size.width - self.cur.x) as usize;
        let remaining_rows = (self.size.height - self.cur.y - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for BoardIter {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn coords_round_trip() {
        let c = HexCoords::new(3, -7);
        let json = serde_json::to_string(&c).unwrap();
        let back: HexCoords = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }

    #[test]
    fn deserialized_size_is_validated_on_demand() {
        let s: BoardSize = serde_json::from_str(r#"{"width":0,"height":4}"#).unwrap();
        assert!(s.validate().is_err());
    }
}
