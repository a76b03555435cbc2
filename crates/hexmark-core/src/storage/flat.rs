use rayon::prelude::*;

use super::{BoardStorage, out_of_range};
use crate::coords::{BoardSize, HexCoords};
use crate::error::Result;

/// Row-major board storage: a `Vec` of rows, every cell materialized eagerly.
///
/// Cheap to build and index for small boards. Parallel construction builds
/// rows independently and keeps them in board order.
#[derive(Debug, Clone)]
pub struct FlatBoardStorage<T> {
    size: BoardSize,
    rows: Vec<Box<[T]>>,
}

impl<T> FlatBoardStorage<T> {
    #[inline]
    fn slot(&self, coords: HexCoords) -> Result<(usize, usize)> {
        if !self.size.contains(coords) {
            return Err(out_of_range(coords, self.size));
        }
        Ok((coords.y() as usize, coords.x() as usize))
    }
}

impl<T: Send + Sync> BoardStorage<T> for FlatBoardStorage<T> {
    fn from_fn<F>(size: BoardSize, factory: F, parallel: bool) -> Result<Self>
    where
        F: Fn(HexCoords) -> T + Sync + Send,
    {
        let size = size.validate()?;
        let build_row = |y: i32| -> Box<[T]> {
            (0..size.width())
                .map(|x| factory(HexCoords::new(x, y)))
                .collect()
        };
        let rows: Vec<Box<[T]>> = if parallel {
            (0..size.height()).into_par_iter().map(build_row).collect()
        } else {
            (0..size.height()).map(build_row).collect()
        };
        Ok(Self { size, rows })
    }

    fn filled(size: BoardSize, value: T) -> Result<Self>
    where
        T: Clone,
    {
        let size = size.validate()?;
        let row = vec![value; size.width() as usize].into_boxed_slice();
        Ok(Self {
            size,
            rows: vec![row; size.height() as usize],
        })
    }

    #[inline]
    fn size(&self) -> BoardSize {
        self.size
    }

    #[inline]
    fn get(&self, coords: HexCoords) -> Result<&T> {
        let (y, x) = self.slot(coords)?;
        Ok(&self.rows[y][x])
    }

    #[inline]
    fn set(&mut self, coords: HexCoords, value: T) -> Result<()> {
        let (y, x) = self.slot(coords)?;
        self.rows[y][x] = value;
        Ok(())
    }

    fn for_each<F>(&self, f: F)
    where
        F: Fn(HexCoords, &T) + Sync + Send,
    {
        self.rows.par_iter().enumerate().for_each(|(y, row)| {
            for (x, v) in row.iter().enumerate() {
                f(HexCoords::new(x as i32, y as i32), v);
            }
        });
    }

    fn for_each_serial<F>(&self, mut f: F)
    where
        F: FnMut(HexCoords, &T),
    {
        for (y, row) in self.rows.iter().enumerate() {
            for (x, v) in row.iter().enumerate() {
                f(HexCoords::new(x as i32, y as i32), v);
            }
        }
    }

    fn update_all<F>(&mut self, f: F)
    where
        F: Fn(HexCoords, &mut T) + Sync + Send,
    {
        self.rows.par_iter_mut().enumerate().for_each(|(y, row)| {
            for (x, v) in row.iter_mut().enumerate() {
                f(HexCoords::new(x as i32, y as i32), v);
            }
        });
    }
}
