use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, interval_at};

use crate::games::GameBroadcaster;
use crate::log;
use super::game_state::SnakeGame;
use super::settings::SnakeSettings;
use super::snapshot::SnakeSnapshot;
use super::types::{DeathReason, Direction, TickOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOverSummary {
    pub score: u32,
    pub length: usize,
    pub ticks: u64,
    pub reason: DeathReason,
}

/// Shared handle to one running game. The tick loop and input handlers both
/// go through the same lock.
#[derive(Clone)]
pub struct SnakeSessionState {
    pub session_id: String,
    pub game: Arc<Mutex<SnakeGame>>,
    pub tick_interval: Duration,
}

impl SnakeSessionState {
    pub fn create(session_id: &str, settings: &SnakeSettings) -> Result<Self, String> {
        let game = SnakeGame::from_settings(settings)?;
        Ok(Self::from_game(session_id, game, settings.tick_interval()))
    }

    pub fn from_game(session_id: &str, game: SnakeGame, tick_interval: Duration) -> Self {
        Self {
            session_id: session_id.to_string(),
            game: Arc::new(Mutex::new(game)),
            tick_interval,
        }
    }
}

pub struct SnakeSession;

impl SnakeSession {
    /// Ticks the game every `tick_interval` until the snake dies. The first
    /// move happens one interval after the call.
    pub async fn run(
        session_state: SnakeSessionState,
        broadcaster: impl GameBroadcaster,
    ) -> GameOverSummary {
        let period = session_state.tick_interval;
        let mut tick_interval_timer = interval_at(Instant::now() + period, period);

        {
            let game = session_state.game.lock().await;
            log!(
                "[session:{}] started on {}x{} board (seed {})",
                session_state.session_id,
                game.grid().rows(),
                game.grid().columns(),
                game.seed()
            );
        }

        loop {
            tick_interval_timer.tick().await;

            let mut game = session_state.game.lock().await;
            let outcome = game.tick();
            let snapshot = game.snapshot();
            drop(game);

            broadcaster.broadcast_state(snapshot.clone()).await;

            if let TickOutcome::Died(reason) = outcome {
                let summary = GameOverSummary {
                    score: snapshot.score,
                    length: snapshot.length(),
                    ticks: snapshot.tick,
                    reason,
                };
                log!(
                    "[session:{}] over after {} ticks: {:?}, score {}",
                    session_state.session_id,
                    summary.ticks,
                    summary.reason,
                    summary.score
                );
                broadcaster.broadcast_game_over(summary).await;
                return summary;
            }
        }
    }

    pub async fn handle_turn(session_state: &SnakeSessionState, direction: Direction) -> bool {
        let mut game = session_state.game.lock().await;
        game.request_turn(direction)
    }

    pub async fn snapshot(session_state: &SnakeSessionState) -> SnakeSnapshot {
        session_state.game.lock().await.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::SessionRng;

    #[derive(Clone, Default)]
    struct RecordingBroadcaster {
        states: Arc<Mutex<Vec<SnakeSnapshot>>>,
        summaries: Arc<Mutex<Vec<GameOverSummary>>>,
    }

    impl GameBroadcaster for RecordingBroadcaster {
        async fn broadcast_state(&self, state: SnakeSnapshot) {
            self.states.lock().await.push(state);
        }

        async fn broadcast_game_over(&self, summary: GameOverSummary) {
            self.summaries.lock().await.push(summary);
        }
    }

    fn create_state(rows: usize, columns: usize) -> SnakeSessionState {
        let game = SnakeGame::new(rows, columns, SessionRng::new(42)).unwrap();
        SnakeSessionState::from_game("test", game, Duration::from_millis(100))
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_wall() {
        let state = create_state(5, 5);
        assert!(SnakeSession::handle_turn(&state, Direction::Down).await);

        let broadcaster = RecordingBroadcaster::default();
        let started = Instant::now();
        let summary = SnakeSession::run(state.clone(), broadcaster.clone()).await;

        assert_eq!(summary.reason, DeathReason::WallCollision);
        assert_eq!(summary.ticks, 4);
        assert!(started.elapsed() >= Duration::from_millis(400));

        let states = broadcaster.states.lock().await;
        assert_eq!(states.len(), 4);
        assert!(states[..3].iter().all(|s| !s.is_over));
        assert!(states[3].is_over);
        assert_eq!(states[2].head, states[3].head);

        let summaries = broadcaster.summaries.lock().await;
        assert_eq!(summaries.as_slice(), &[summary]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_turns_from_another_task() {
        let state = create_state(10, 10);
        let broadcaster = RecordingBroadcaster::default();
        let runner = tokio::spawn(SnakeSession::run(state.clone(), broadcaster.clone()));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(SnakeSession::handle_turn(&state, Direction::Up).await);
        assert!(!SnakeSession::handle_turn(&state, Direction::Down).await);

        let summary = runner.await.unwrap();
        assert_eq!(summary.reason, DeathReason::WallCollision);

        let last = SnakeSession::snapshot(&state).await;
        assert!(last.is_over);
        assert_eq!(last.direction, Direction::Up);
        assert_eq!(last.head.column, 4);
    }

    #[test]
    fn test_create_validates_settings() {
        assert!(SnakeSessionState::create("bad", &SnakeSettings::with_size(1, 1)).is_err());
        assert!(SnakeSessionState::create("ok", &SnakeSettings::default()).is_ok());
    }
}
