//! Read-only obstacle grid.

use crate::{Position, PursuitError, Result};
use std::fmt;

/// Cell value for a walkable cell.
pub const FREE: u8 = 0;

/// Cell value for an obstacle.
pub const OBSTACLE: u8 = 1;

/// Immutable walkability mask, stored row-major.
///
/// A grid is built once per episode and shared by reference with every
/// planner and every simulated future; nothing mutates it afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create a grid from row-major cell values.
    ///
    /// # Errors
    /// Returns an error if `cells.len() != rows * cols` or a cell is not 0/1.
    pub fn new(rows: usize, cols: usize, cells: Vec<u8>) -> Result<Self> {
        if cells.len() != rows * cols {
            return Err(PursuitError::InvalidGrid(format!(
                "expected {} cells for {}x{}, got {}",
                rows * cols,
                rows,
                cols,
                cells.len()
            )));
        }
        if let Some(i) = cells.iter().position(|&c| c != FREE && c != OBSTACLE) {
            return Err(PursuitError::InvalidCell {
                row: i / cols,
                col: i % cols,
                value: cells[i],
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Create a grid with no obstacles.
    pub fn open(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![FREE; rows * cols],
        }
    }

    /// Create an otherwise open grid with obstacles at the given positions.
    ///
    /// # Errors
    /// Returns `InvalidPosition` if an obstacle lies outside the grid.
    pub fn with_obstacles(rows: usize, cols: usize, obstacles: &[Position]) -> Result<Self> {
        let mut grid = Self::open(rows, cols);
        for &pos in obstacles {
            let idx = grid
                .index(pos)
                .ok_or_else(|| PursuitError::InvalidPosition(format!("obstacle {} outside grid", pos)))?;
            grid.cells[idx] = OBSTACLE;
        }
        Ok(grid)
    }

    /// Create a grid from a vector of rows.
    ///
    /// # Errors
    /// Returns an error if there are no rows, rows differ in length, or a
    /// cell is not 0/1.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(PursuitError::InvalidGrid("grid has no rows".to_string()));
        };
        let cols = first.len();
        if cols == 0 {
            return Err(PursuitError::InvalidGrid("grid has no columns".to_string()));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(PursuitError::InvalidGrid(format!(
                "row {} has {} cells, expected {}",
                i,
                row.len(),
                cols
            )));
        }
        let n_rows = rows.len();
        Self::new(n_rows, cols, rows.into_iter().flatten().collect())
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `pos` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.col >= 0 && (pos.row as usize) < self.rows && (pos.col as usize) < self.cols
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.row as usize * self.cols + pos.col as usize)
        } else {
            None
        }
    }

    /// Cell value at `pos`, or None when out of bounds.
    #[inline]
    pub fn cell(&self, pos: Position) -> Option<u8> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Whether `pos` is an in-bounds obstacle cell.
    #[inline]
    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.cell(pos) == Some(OBSTACLE)
    }

    /// Whether `pos` is in bounds and free.
    #[inline]
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.cell(pos) == Some(FREE)
    }

    /// Iterate over all free cells in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == FREE)
            .map(|(i, _)| Position::new((i / self.cols) as i32, (i % self.cols) as i32))
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == OBSTACLE).count()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Grid({}x{}, {} obstacles)",
            self.rows,
            self.cols,
            self.obstacle_count()
        )
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            for &c in row {
                write!(f, "{}", if c == OBSTACLE { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
