//! Colour-index grids and the front/back double buffer.

use std::convert::Infallible;

use crate::types::{Cell, ColorIndex, Coordinate};

/// 2D row-major buffer of colour-index cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![None; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, pos: Coordinate) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width as i32 || pos.y >= self.height as i32 {
            return None;
        }
        Some((pos.y as usize) * (self.width as usize) + (pos.x as usize))
    }

    /// Cell at `pos`; `None` when out of bounds.
    pub fn get(&self, pos: Coordinate) -> Option<Cell> {
        self.idx(pos).map(|i| self.cells[i])
    }

    /// Write `index` at `pos`. Out-of-bounds writes are dropped.
    pub fn set(&mut self, index: ColorIndex, pos: Coordinate) {
        if let Some(i) = self.idx(pos) {
            self.cells[i] = Some(index);
        }
    }

    /// Reset every cell to background.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Number of non-background cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Every non-background cell with its position, row by row.
    pub fn filled(&self) -> impl Iterator<Item = (Coordinate, ColorIndex)> + '_ {
        let w = self.width as usize;
        self.cells.iter().enumerate().filter_map(move |(i, c)| {
            c.map(|index| (Coordinate::new((i % w) as i32, (i / w) as i32), index))
        })
    }

    #[inline(always)]
    fn at(&self, x: u16, y: u16) -> Cell {
        self.cells[(y as usize) * (self.width as usize) + (x as usize)]
    }
}

/// Front/back pair of grids.
///
/// Draw calls go to the back grid. The front grid holds the last emitted
/// frame and only changes by [`CellGrid::swap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    front: Grid,
    back: Grid,
}

impl CellGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            front: Grid::new(width, height),
            back: Grid::new(width, height),
        }
    }

    pub fn width(&self) -> u16 {
        self.back.width
    }

    pub fn height(&self) -> u16 {
        self.back.height
    }

    pub fn front(&self) -> &Grid {
        &self.front
    }

    pub fn back(&self) -> &Grid {
        &self.back
    }

    /// Reset the back grid. Runs at the start of every frame.
    pub fn clear(&mut self) {
        self.back.clear();
    }

    pub fn set_cell(&mut self, index: ColorIndex, pos: Coordinate) {
        self.back.set(index, pos);
    }

    /// Promote the back grid to front.
    ///
    /// The buffers are exchanged, not copied; the new back grid holds the
    /// frame before last until the next [`CellGrid::clear`].
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Visit each same-colour run of filled cells in the back grid.
    ///
    /// The callback gets `(x, y, len, colour)`.
    pub fn for_each_filled_run<E>(
        &self,
        f: impl FnMut(u16, u16, u16, ColorIndex) -> Result<(), E>,
    ) -> Result<(), E> {
        for_each_filled_run(&self.back, f)
    }

    /// Visit each run of back-grid cells that differ from the front grid.
    ///
    /// The callback gets `(x, y, len)`.
    pub fn for_each_changed_run<E>(
        &self,
        f: impl FnMut(u16, u16, u16) -> Result<(), E>,
    ) -> Result<(), E> {
        for_each_changed_run(&self.front, &self.back, f)
    }

    /// Number of back-grid cells that differ from the front grid.
    pub fn changed_count(&self) -> usize {
        let mut count = 0usize;
        let _ = self.for_each_changed_run(|_, _, len| {
            count += len as usize;
            Ok::<(), Infallible>(())
        });
        count
    }
}

pub fn for_each_filled_run<E>(
    grid: &Grid,
    mut f: impl FnMut(u16, u16, u16, ColorIndex) -> Result<(), E>,
) -> Result<(), E> {
    let w = grid.width;
    for y in 0..grid.height {
        let mut x = 0;
        while x < w {
            let Some(index) = grid.at(x, y) else {
                x += 1;
                continue;
            };

            let start = x;
            x += 1;
            while x < w && grid.at(x, y) == Some(index) {
                x += 1;
            }
            f(start, y, x - start, index)?;
        }
    }
    Ok(())
}

pub fn for_each_changed_run<E>(
    prev: &Grid,
    next: &Grid,
    mut f: impl FnMut(u16, u16, u16) -> Result<(), E>,
) -> Result<(), E> {
    if prev.width != next.width || prev.height != next.height {
        // Size changed: treat everything as dirty in a single pass (row runs).
        for y in 0..next.height {
            f(0, y, next.width)?;
        }
        return Ok(());
    }

    let w = next.width;
    for y in 0..next.height {
        let mut x = 0;
        while x < w {
            if prev.at(x, y) == next.at(x, y) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev.at(x, y) != next.at(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }
    Ok(())
}
