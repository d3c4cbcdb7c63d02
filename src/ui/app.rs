use std::{
    fmt::Display,
    io::Stdout,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::{
    game::GameState,
    history::{HistoryRecord, HistoryRecorder},
};

use super::{
    handlers::{GameHandler, InputHandler},
    types::{Background, LogBuffer, StatusMessage, View},
};

/// Poll interval while no deferred clear is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Main application state container.
pub struct App {
    pub(in crate::ui) game: GameState,
    pub(in crate::ui) recorder: HistoryRecorder,
    pub(in crate::ui) history: Vec<HistoryRecord>,
    pub(in crate::ui) background: Background,
    pub(in crate::ui) view: View,
    pub(in crate::ui) cursor: usize,
    pub(in crate::ui) history_page: usize,
    pub(in crate::ui) status: Option<StatusMessage>,
    pub(in crate::ui) logs: LogBuffer,
}

impl App {
    pub fn new(game: GameState, recorder: HistoryRecorder, logs: LogBuffer) -> Self {
        let history = recorder.load();

        Self {
            game,
            recorder,
            history,
            background: Background::default(),
            view: View::Board,
            cursor: 0,
            history_page: 0,
            status: None,
            logs,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        info!("UI started");
        self.log(format!(
            "Mode {} with {}; {} game(s) in history",
            self.game.mode(),
            self.game.face_set(),
            self.history.len()
        ));

        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(self.poll_timeout(Instant::now()))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && InputHandler::new(self).handle_key(key) {
                        return Ok(());
                    }
                }
            }

            GameHandler::new(self).tick(Instant::now());
        }
    }

    /// Time to wait for input before the next deferred clear is due.
    pub(in crate::ui) fn poll_timeout(&self, now: Instant) -> Duration {
        self.game
            .next_deadline()
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or(IDLE_POLL)
    }

    pub(in crate::ui) fn log(&self, msg: impl Into<String> + Display) {
        tracing::info!("{}", &msg);
        self.logs.push(msg.into());
    }
}
