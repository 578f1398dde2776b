use std::future::Future;

use super::snake::{GameOverSummary, SnakeSnapshot};

/// Receives what a running session produces: one snapshot per tick and a
/// summary once the snake dies.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, state: SnakeSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, summary: GameOverSummary) -> impl Future<Output = ()> + Send;
}
