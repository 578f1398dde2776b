use std::fmt;

use super::types::{CellState, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridError {
    OutOfBounds { row: i32, column: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { row, column } => {
                write!(f, "Cell ({}, {}) is outside the grid", row, column)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Fixed-size board of cell states, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<CellState>,
    rows: usize,
    columns: usize,
}

impl Grid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            cells: vec![CellState::Empty; rows * columns],
            rows,
            columns,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_outside(&self, point: Point) -> bool {
        point.row < 0
            || point.column < 0
            || point.row as usize >= self.rows
            || point.column as usize >= self.columns
    }

    pub fn at(&self, point: Point) -> Result<CellState, GridError> {
        self.index_of(point).map(|index| self.cells[index])
    }

    pub fn set(&mut self, point: Point, state: CellState) -> Result<(), GridError> {
        let index = self.index_of(point)?;
        self.cells[index] = state;
        Ok(())
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, state)| **state == CellState::Empty)
            .map(|(index, _)| self.point_of(index))
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    pub fn to_rows(&self) -> Vec<Vec<CellState>> {
        self.cells
            .chunks(self.columns.max(1))
            .map(|row| row.to_vec())
            .collect()
    }

    fn index_of(&self, point: Point) -> Result<usize, GridError> {
        if self.is_outside(point) {
            return Err(GridError::OutOfBounds {
                row: point.row,
                column: point.column,
            });
        }
        Ok(point.row as usize * self.columns + point.column as usize)
    }

    fn point_of(&self, index: usize) -> Point {
        Point::new((index / self.columns) as i32, (index % self.columns) as i32)
    }
}
