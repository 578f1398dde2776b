use crate::config::Validate;
use crate::games::SessionRng;
use crate::log;
use super::direction_buffer::DirectionBuffer;
use super::food::pick_food_cell;
use super::grid::Grid;
use super::settings::{MIN_COLUMNS, MIN_ROWS, SnakeSettings};
use super::snake::Snake;
use super::snapshot::SnakeSnapshot;
use super::types::{CellState, DeathReason, Direction, Hit, Point, TickOutcome};

pub const INITIAL_LENGTH: i32 = 3;

#[derive(Clone, Debug)]
pub struct SnakeGame {
    grid: Grid,
    snake: Snake,
    turns: DirectionBuffer,
    direction: Direction,
    score: u32,
    death_reason: Option<DeathReason>,
    tick: u64,
    rng: SessionRng,
}

impl SnakeGame {
    /// Fresh session on a `rows` x `columns` board: a three-cell snake on row
    /// `rows / 2 - 1`, columns 1..=3, heading right, plus one food cell.
    pub fn new(rows: usize, columns: usize, rng: SessionRng) -> Result<Self, String> {
        if rows < MIN_ROWS || columns < MIN_COLUMNS {
            return Err(format!(
                "Board {}x{} is too small, need at least {}x{}",
                rows, columns, MIN_ROWS, MIN_COLUMNS
            ));
        }

        let start_row = (rows / 2) as i32 - 1;
        let segments = (1..=INITIAL_LENGTH)
            .rev()
            .map(|column| Point::new(start_row, column));

        Ok(Self::with_snake(
            Grid::new(rows, columns),
            Snake::from_segments(segments),
            Direction::Right,
            rng,
        ))
    }

    pub fn from_settings(settings: &SnakeSettings) -> Result<Self, String> {
        settings.validate()?;
        let rng = match settings.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };
        Self::new(settings.rows, settings.columns, rng)
    }

    fn with_snake(mut grid: Grid, snake: Snake, direction: Direction, rng: SessionRng) -> Self {
        for segment in snake.segments() {
            grid.set(*segment, CellState::Snake)
                .expect("Initial snake should fit on the board");
        }

        let mut game = Self {
            grid,
            snake,
            turns: DirectionBuffer::new(),
            direction,
            score: 0,
            death_reason: None,
            tick: 0,
            rng,
        };
        game.place_food();
        game
    }

    /// Queues a turn for a later tick. Returns `false` when the turn was
    /// ignored: the game is over, the buffer is full, or the turn would be a
    /// no-op or a reversal.
    pub fn request_turn(&mut self, direction: Direction) -> bool {
        if self.is_over() {
            return false;
        }
        self.turns.request(direction, self.direction)
    }

    pub fn tick(&mut self) -> TickOutcome {
        if let Some(reason) = self.death_reason {
            return TickOutcome::Died(reason);
        }

        if let Some(direction) = self.turns.pop() {
            self.direction = direction;
        }
        self.tick += 1;

        let candidate = self.snake.head().translate(self.direction);
        match self.resolve(candidate) {
            Hit::Outside => self.die(DeathReason::WallCollision, candidate),
            Hit::Cell(CellState::Snake) => self.die(DeathReason::SelfCollision, candidate),
            Hit::Cell(CellState::Empty) => {
                self.remove_tail();
                self.add_head(candidate);
                TickOutcome::Moved
            }
            Hit::Cell(CellState::Food) => {
                self.add_head(candidate);
                self.score += 1;
                self.place_food();
                TickOutcome::Ate
            }
        }
    }

    pub fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            rows: self.grid.rows(),
            columns: self.grid.columns(),
            cells: self.grid.to_rows(),
            head: self.snake.head(),
            direction: self.direction,
            score: self.score,
            is_over: self.is_over(),
            death_reason: self.death_reason,
            body: self.snake.segments().copied().collect(),
            tick: self.tick,
        }
    }

    pub fn is_over(&self) -> bool {
        self.death_reason.is_some()
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn head(&self) -> Point {
        self.snake.head()
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn pending_turns(&self) -> usize {
        self.turns.len()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    fn resolve(&self, candidate: Point) -> Hit {
        if self.grid.is_outside(candidate) {
            return Hit::Outside;
        }

        // The tail moves away during this same tick.
        if candidate == self.snake.tail() {
            return Hit::Cell(CellState::Empty);
        }

        let state = self
            .grid
            .at(candidate)
            .expect("Candidate should be inside the board after the bounds check");
        Hit::Cell(state)
    }

    fn die(&mut self, reason: DeathReason, at: Point) -> TickOutcome {
        self.death_reason = Some(reason);
        log!(
            "Snake died ({:?}) moving to ({}, {}). Score: {}, length: {}",
            reason,
            at.row,
            at.column,
            self.score,
            self.snake.len()
        );
        TickOutcome::Died(reason)
    }

    fn add_head(&mut self, point: Point) {
        self.grid
            .set(point, CellState::Snake)
            .expect("New head should be inside the board");
        self.snake.push_head(point);
    }

    fn remove_tail(&mut self) {
        if let Some(tail) = self.snake.pop_tail() {
            self.grid
                .set(tail, CellState::Empty)
                .expect("Snake tail should be inside the board");
        }
    }

    fn place_food(&mut self) {
        match pick_food_cell(&self.grid, &mut self.rng) {
            Some(point) => {
                self.grid
                    .set(point, CellState::Food)
                    .expect("Food cell should be inside the board");
            }
            None => log!("Board is full, no food placed"),
        }
    }
}

#[cfg(test)]
impl SnakeGame {
    /// Builds a game with an arbitrary body (head first) for scenario tests.
    fn with_body(
        rows: usize,
        columns: usize,
        body: &[Point],
        direction: Direction,
        seed: u64,
    ) -> Self {
        Self::with_snake(
            Grid::new(rows, columns),
            Snake::from_segments(body.iter().copied()),
            direction,
            SessionRng::new(seed),
        )
    }

    /// Moves the single food cell to `point`.
    fn put_food_at(&mut self, point: Point) {
        let food: Vec<Point> = (0..self.grid.rows() as i32)
            .flat_map(|row| {
                (0..self.grid.columns() as i32).map(move |column| Point::new(row, column))
            })
            .filter(|p| self.grid.at(*p) == Ok(CellState::Food))
            .collect();
        for old in food {
            self.grid.set(old, CellState::Empty).unwrap();
        }
        self.grid.set(point, CellState::Food).unwrap();
    }

    fn assert_consistent(&self) {
        let snake_cells = self.grid.count(CellState::Snake);
        assert_eq!(snake_cells, self.snake.len());
        for segment in self.snake.segments() {
            assert_eq!(self.grid.at(*segment), Ok(CellState::Snake));
        }
        let distinct: std::collections::HashSet<_> = self.snake.segments().collect();
        assert_eq!(distinct.len(), self.snake.len());
        assert!(self.grid.count(CellState::Food) <= 1);
    }
}
