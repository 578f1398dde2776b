use crate::games::SessionRng;
use super::grid::Grid;
use super::types::Point;

/// Picks a uniformly random empty cell, or `None` when the board is full.
pub fn pick_food_cell(grid: &Grid, rng: &mut SessionRng) -> Option<Point> {
    let empty: Vec<Point> = grid.empty_cells().collect();
    rng.choose(&empty)
}
