use rayon::prelude::*;

use super::{BoardStorage, out_of_range};
use crate::coords::{BoardSize, HexCoords};
use crate::error::Result;

/// Side length of a storage block, in cells.
pub const BLOCK_SIZE: i32 = 32;

/// Value shared by every cell of a block that has not been written yet.
#[derive(Debug, Clone)]
struct Vacant<T> {
    value: T,
    clone: fn(&T) -> T,
}

/// Board storage partitioned into [`BLOCK_SIZE`]² blocks.
///
/// Each block is its own allocation, laid out row-major, so a fill that
/// stays within one area of the map touches few cache lines. Blocks on the
/// right and bottom edges are trimmed to the board.
///
/// A board created with [`filled`](BoardStorage::filled) is *lazy*: no block
/// is allocated until its first write, and unwritten cells read as the fill
/// value. A board created with [`from_fn`](BoardStorage::from_fn) has every
/// block built up front.
#[derive(Debug, Clone)]
pub struct BlockedBoardStorage<T> {
    size: BoardSize,
    blocks_wide: usize,
    blocks: Vec<Option<Box<[T]>>>,
    vacant: Option<Vacant<T>>,
}

impl<T> BlockedBoardStorage<T> {
    fn empty(size: BoardSize) -> Result<(BoardSize, usize, usize)> {
        let size = size.validate()?;
        let blocks_wide = blocks_along(size.width());
        let blocks_high = blocks_along(size.height());
        Ok((size, blocks_wide, blocks_high))
    }

    /// Number of blocks currently backed by an allocation.
    pub fn allocated_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_some()).count()
    }

    /// Total number of blocks covering the board.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Top-left cell and extent of block `b`.
    #[inline]
    fn block_bounds(&self, b: usize) -> (HexCoords, i32, i32) {
        let bx = (b % self.blocks_wide) as i32 * BLOCK_SIZE;
        let by = (b / self.blocks_wide) as i32 * BLOCK_SIZE;
        let w = (self.size.width() - bx).min(BLOCK_SIZE);
        let h = (self.size.height() - by).min(BLOCK_SIZE);
        (HexCoords::new(bx, by), w, h)
    }

    /// Block index and offset within the block for an on-board cell.
    #[inline]
    fn locate(&self, coords: HexCoords) -> Result<(usize, usize)> {
        if !self.size.contains(coords) {
            return Err(out_of_range(coords, self.size));
        }
        let b = (coords.y() / BLOCK_SIZE) as usize * self.blocks_wide
            + (coords.x() / BLOCK_SIZE) as usize;
        let (origin, w, _) = self.block_bounds(b);
        let offset = (coords.y() - origin.y()) * w + (coords.x() - origin.x());
        Ok((b, offset as usize))
    }

    fn vacant_value(&self, b: usize) -> &T {
        match &self.vacant {
            Some(vacant) => &vacant.value,
            None => unreachable!("block {b} missing from an eagerly built board"),
        }
    }

    /// Allocate block `b` from the fill value if it is still vacant.
    fn materialize(&mut self, b: usize) -> &mut [T] {
        let (_, w, h) = self.block_bounds(b);
        let vacant = &self.vacant;
        self.blocks[b].get_or_insert_with(|| {
            let Some(vacant) = vacant else {
                unreachable!("block {b} missing from an eagerly built board");
            };
            (0..w * h).map(|_| (vacant.clone)(&vacant.value)).collect()
        })
    }
}

#[inline]
fn blocks_along(cells: i32) -> usize {
    (cells as usize).div_ceil(BLOCK_SIZE as usize)
}

/// Visit the cells of one block in row-major order.
#[inline]
fn visit_block<T>(origin: HexCoords, w: i32, cells: &[T], mut f: impl FnMut(HexCoords, &T)) {
    for (i, v) in cells.iter().enumerate() {
        let i = i as i32;
        f(HexCoords::new(origin.x() + i % w, origin.y() + i / w), v);
    }
}

impl<T: Send + Sync> BoardStorage<T> for BlockedBoardStorage<T> {
    fn from_fn<F>(size: BoardSize, factory: F, parallel: bool) -> Result<Self>
    where
        F: Fn(HexCoords) -> T + Sync + Send,
    {
        let (size, blocks_wide, blocks_high) = Self::empty(size)?;
        let mut board = Self {
            size,
            blocks_wide,
            blocks: Vec::new(),
            vacant: None,
        };
        let build_block = |b: usize| -> Option<Box<[T]>> {
            let (origin, w, h) = board.block_bounds(b);
            let cells = (0..w * h)
                .map(|i| factory(HexCoords::new(origin.x() + i % w, origin.y() + i / w)))
                .collect();
            Some(cells)
        };
        let count = blocks_wide * blocks_high;
        let blocks: Vec<Option<Box<[T]>>> = if parallel {
            (0..count).into_par_iter().map(build_block).collect()
        } else {
            (0..count).map(build_block).collect()
        };
        board.blocks = blocks;
        Ok(board)
    }

    fn filled(size: BoardSize, value: T) -> Result<Self>
    where
        T: Clone,
    {
        let (size, blocks_wide, blocks_high) = Self::empty(size)?;
        let mut blocks = Vec::new();
        blocks.resize_with(blocks_wide * blocks_high, || None);
        Ok(Self {
            size,
            blocks_wide,
            blocks,
            vacant: Some(Vacant {
                value,
                clone: T::clone,
            }),
        })
    }

    #[inline]
    fn size(&self) -> BoardSize {
        self.size
    }

    #[inline]
    fn get(&self, coords: HexCoords) -> Result<&T> {
        let (b, offset) = self.locate(coords)?;
        match &self.blocks[b] {
            Some(cells) => Ok(&cells[offset]),
            None => Ok(self.vacant_value(b)),
        }
    }

    #[inline]
    fn set(&mut self, coords: HexCoords, value: T) -> Result<()> {
        let (b, offset) = self.locate(coords)?;
        self.materialize(b)[offset] = value;
        Ok(())
    }

    fn for_each<F>(&self, f: F)
    where
        F: Fn(HexCoords, &T) + Sync + Send,
    {
        self.blocks.par_iter().enumerate().for_each(|(b, block)| {
            let (origin, w, h) = self.block_bounds(b);
            match block {
                Some(cells) => visit_block(origin, w, cells, &f),
                None => {
                    let value = self.vacant_value(b);
                    for i in 0..w * h {
                        f(HexCoords::new(origin.x() + i % w, origin.y() + i / w), value);
                    }
                }
            }
        });
    }

    fn for_each_serial<F>(&self, mut f: F)
    where
        F: FnMut(HexCoords, &T),
    {
        for y in 0..self.size.height() {
            let block_row = (y / BLOCK_SIZE) as usize * self.blocks_wide;
            for b in block_row..block_row + self.blocks_wide {
                let (origin, w, _) = self.block_bounds(b);
                match &self.blocks[b] {
                    Some(cells) => {
                        let start = ((y - origin.y()) * w) as usize;
                        for (i, v) in cells[start..start + w as usize].iter().enumerate() {
                            f(HexCoords::new(origin.x() + i as i32, y), v);
                        }
                    }
                    None => {
                        let value = self.vacant_value(b);
                        for x in origin.x()..origin.x() + w {
                            f(HexCoords::new(x, y), value);
                        }
                    }
                }
            }
        }
    }

    fn update_all<F>(&mut self, f: F)
    where
        F: Fn(HexCoords, &mut T) + Sync + Send,
    {
        for b in 0..self.blocks.len() {
            self.materialize(b);
        }
        let bounds: Vec<_> = (0..self.blocks.len()).map(|b| self.block_bounds(b)).collect();
        self.blocks
            .par_iter_mut()
            .zip(bounds.par_iter())
            .for_each(|(block, &(origin, w, _))| {
                if let Some(cells) = block {
                    for (i, v) in cells.iter_mut().enumerate() {
                        let i = i as i32;
                        f(HexCoords::new(origin.x() + i % w, origin.y() + i / w), v);
                    }
                }
            });
    }
}
