use super::types::{CellState, DeathReason, Direction, Point};

/// Owned copy of everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SnakeSnapshot {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Vec<CellState>>,
    pub head: Point,
    pub direction: Direction,
    pub score: u32,
    pub is_over: bool,
    pub death_reason: Option<DeathReason>,
    /// Head first.
    pub body: Vec<Point>,
    pub tick: u64,
}

impl SnakeSnapshot {
    pub fn cell(&self, point: Point) -> Option<CellState> {
        if point.row < 0 || point.column < 0 {
            return None;
        }
        self.cells
            .get(point.row as usize)
            .and_then(|row| row.get(point.column as usize))
            .copied()
    }

    pub fn food(&self) -> Option<Point> {
        self.cells.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|&cell| cell == CellState::Food)
                .map(|column| Point::new(row as i32, column as i32))
        })
    }

    pub fn length(&self) -> usize {
        self.body.len()
    }
}
