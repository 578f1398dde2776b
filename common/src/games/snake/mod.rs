mod direction_buffer;
mod food;
mod game_state;
mod grid;
mod session;
mod settings;
mod snake;
mod snapshot;
mod types;

pub use direction_buffer::{DirectionBuffer, MAX_PENDING_TURNS};
pub use food::pick_food_cell;
pub use game_state::{INITIAL_LENGTH, SnakeGame};
pub use grid::{Grid, GridError};
pub use session::{GameOverSummary, SnakeSession, SnakeSessionState};
pub use settings::{MAX_SIDE, MIN_COLUMNS, MIN_ROWS, SnakeSettings};
pub use snake::Snake;
pub use snapshot::SnakeSnapshot;
pub use types::{CellState, DeathReason, Direction, Hit, Point, TickOutcome};
