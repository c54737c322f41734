//! One vertical slice of the world.

use crate::entities::Cell;

/// A fixed-height stack of cells, row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    cells: Vec<Cell>,
}

impl Column {
    /// Column of `height` cells with an open gap over rows `low..=high`.
    ///
    /// Rows outside the gap are Wall. A degenerate gap (`low > high`) yields
    /// an all-Wall column, which is a legal obstacle.
    pub fn new(height: usize, low: i32, high: i32) -> Self {
        let cells = (0..height as i32)
            .map(|i| {
                if i < low || i > high {
                    Cell::Wall
                } else {
                    Cell::Empty
                }
            })
            .collect();
        Self { cells }
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Cell at row `i`; rows outside the column read as Empty.
    pub fn get(&self, i: i32) -> Cell {
        usize::try_from(i)
            .ok()
            .and_then(|i| self.cells.get(i).copied())
            .unwrap_or(Cell::Empty)
    }

    /// Overwrite row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is outside the column.
    pub fn set(&mut self, i: usize, cell: Cell) {
        assert!(
            i < self.cells.len(),
            "row {} out of range for column of height {}",
            i,
            self.cells.len()
        );
        self.cells[i] = cell;
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One step of gravity for loose Wall material.
    ///
    /// Only rows between the topmost and the bottommost Empty cell are
    /// considered, so the ceiling and floor stay put. Walking bottom-to-top,
    /// a Wall directly above an Empty cell swaps with it: every loose Wall
    /// drops exactly one row per call, never two.
    pub fn fall(&mut self) {
        let top = self.cells.iter().position(|&c| c == Cell::Empty);
        let bottom = self.cells.iter().rposition(|&c| c == Cell::Empty);
        let (Some(top), Some(bottom)) = (top, bottom) else {
            return;
        };

        for i in ((top + 1)..=bottom).rev() {
            if self.cells[i] == Cell::Empty && self.cells[i - 1] == Cell::Wall {
                self.cells.swap(i, i - 1);
            }
        }
    }
}
