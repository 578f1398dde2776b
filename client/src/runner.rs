use std::io::{self, Write, stdout};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{Event, EventStream};
use crossterm::execute;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use futures_util::{Stream, StreamExt};
use snake_common::games::GameBroadcaster;
use snake_common::log;
use snake_common::snake::{
    GameOverSummary, SnakeSession, SnakeSessionState, SnakeSettings, SnakeSnapshot,
};
use tokio::sync::mpsc;
use tokio::task::JoinError;

use crate::input::{KeyAction, map_key};
use crate::render::{build_frame, draw};

const START_PROMPT: &str = "Press ENTER to start";
const GAME_OVER_PAUSE: Duration = Duration::from_secs(1);
const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub enum SessionEvent {
    State(SnakeSnapshot),
    GameOver(GameOverSummary),
}

#[derive(Clone)]
pub struct LocalBroadcaster {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl LocalBroadcaster {
    pub fn new(tx: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self { tx }
    }
}

impl GameBroadcaster for LocalBroadcaster {
    async fn broadcast_state(&self, state: SnakeSnapshot) {
        let _ = self.tx.send(SessionEvent::State(state));
    }

    async fn broadcast_game_over(&self, summary: GameOverSummary) {
        let _ = self.tx.send(SessionEvent::GameOver(summary));
    }
}

#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

/// Raw mode plus the alternate screen, restored on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Owns the terminal for the lifetime of the game.
pub async fn run(settings: &SnakeSettings) -> io::Result<()> {
    let _guard = TerminalGuard::enter()?;
    Runner::new(settings.clone(), stdout(), EventStream::new())
        .run()
        .await
}

/// Overlay text for each second of the countdown, highest first, ending at 0.
fn countdown_labels(secs: u32) -> impl Iterator<Item = String> {
    (0..=secs).rev().map(|remaining| remaining.to_string())
}

/// One frame per body cell, each marking one more segment dead, head first.
fn death_frames(last: &SnakeSnapshot) -> Vec<Vec<String>> {
    (1..=last.body.len())
        .map(|dead| build_frame(last, dead, None))
        .collect()
}

/// Surfaces a panicked or cancelled session task as an I/O error.
fn check_session_exit(joined: Result<GameOverSummary, JoinError>) -> io::Result<GameOverSummary> {
    joined.map_err(io::Error::other)
}

struct Runner<W, S> {
    settings: SnakeSettings,
    out: W,
    events: S,
    sessions_played: u32,
}

impl<W, S> Runner<W, S>
where
    W: Write,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    fn new(settings: SnakeSettings, out: W, events: S) -> Self {
        Self {
            settings,
            out,
            events,
            sessions_played: 0,
        }
    }

    async fn run(&mut self) -> io::Result<()> {
        let mut previous: Option<(SnakeSnapshot, usize)> = None;

        loop {
            let session_id = format!("local-{}", self.sessions_played + 1);
            let session_state =
                SnakeSessionState::create(&session_id, &self.settings).map_err(io::Error::other)?;
            let fresh = SnakeSession::snapshot(&session_state).await;

            let (waiting, dead) = previous.take().unwrap_or((fresh.clone(), 0));
            self.render(&waiting, dead, Some(START_PROMPT))?;
            if let Flow::Quit = self.wait_for_start().await? {
                return Ok(());
            }

            if let Flow::Quit = self.countdown(&fresh).await? {
                return Ok(());
            }

            self.sessions_played += 1;
            let Some((last, summary)) = self.play(session_state).await? else {
                return Ok(());
            };
            log!(
                "Session {} ended: {:?}, score {}, length {}",
                session_id,
                summary.reason,
                summary.score,
                summary.length
            );

            let Some(dead) = self.game_over(&last).await? else {
                return Ok(());
            };
            previous = Some((last, dead));
        }
    }

    fn render(
        &mut self,
        snapshot: &SnakeSnapshot,
        dead_segments: usize,
        overlay: Option<&str>,
    ) -> io::Result<()> {
        let lines = build_frame(snapshot, dead_segments, overlay);
        draw(&mut self.out, &lines)
    }

    /// Draws `lines` and holds them for `duration`.
    async fn show(&mut self, lines: &[String], duration: Duration) -> io::Result<Flow> {
        draw(&mut self.out, lines)?;
        self.pause(duration).await
    }

    async fn next_action(&mut self) -> io::Result<KeyAction> {
        match self.events.next().await {
            Some(Ok(Event::Key(key))) => Ok(map_key(key)),
            Some(Ok(_)) => Ok(KeyAction::None),
            Some(Err(e)) => Err(e),
            None => Ok(KeyAction::Quit),
        }
    }

    async fn wait_for_start(&mut self) -> io::Result<Flow> {
        loop {
            match self.next_action().await? {
                KeyAction::Start => return Ok(Flow::Continue),
                KeyAction::Quit => return Ok(Flow::Quit),
                _ => {}
            }
        }
    }

    /// Sleeps for `duration`, swallowing any keys except quit.
    async fn pause(&mut self, duration: Duration) -> io::Result<Flow> {
        let sleep = tokio::time::sleep(duration);
        tokio::pin!(sleep);
        loop {
            tokio::select! {
                _ = &mut sleep => return Ok(Flow::Continue),
                action = self.next_action() => {
                    if let KeyAction::Quit = action? {
                        return Ok(Flow::Quit);
                    }
                }
            }
        }
    }

    async fn countdown(&mut self, snapshot: &SnakeSnapshot) -> io::Result<Flow> {
        for label in countdown_labels(self.settings.countdown_secs) {
            let lines = build_frame(snapshot, 0, Some(&label));
            if let Flow::Quit = self.show(&lines, COUNTDOWN_STEP).await? {
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Runs one session to completion. `None` means the player quit.
    async fn play(
        &mut self,
        session_state: SnakeSessionState,
    ) -> io::Result<Option<(SnakeSnapshot, GameOverSummary)>> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let runner = tokio::spawn(SnakeSession::run(
            session_state.clone(),
            LocalBroadcaster::new(tx),
        ));

        let mut last = SnakeSession::snapshot(&session_state).await;
        self.render(&last, 0, None)?;

        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Some(SessionEvent::State(snapshot)) => {
                        self.render(&snapshot, 0, None)?;
                        last = snapshot;
                    }
                    Some(SessionEvent::GameOver(summary)) => {
                        check_session_exit(runner.await)?;
                        return Ok(Some((last, summary)));
                    }
                    None => {
                        check_session_exit(runner.await)?;
                        return Err(io::Error::other("Session ended without a result"));
                    }
                },
                action = self.next_action() => match action? {
                    KeyAction::Turn(direction) => {
                        SnakeSession::handle_turn(&session_state, direction).await;
                    }
                    KeyAction::Quit => {
                        runner.abort();
                        return Ok(None);
                    }
                    _ => {}
                },
            }
        }
    }

    /// Marks body cells dead one at a time, head first, then holds the last
    /// frame for a second. Returns how many cells ended up dead, or `None` if
    /// the player quit.
    async fn game_over(&mut self, last: &SnakeSnapshot) -> io::Result<Option<usize>> {
        let step = self.settings.death_frame();
        for lines in death_frames(last) {
            if let Flow::Quit = self.show(&lines, step).await? {
                return Ok(None);
            }
        }
        if let Flow::Quit = self.pause(GAME_OVER_PAUSE).await? {
            return Ok(None);
        }
        Ok(Some(last.body.len()))
    }
}
