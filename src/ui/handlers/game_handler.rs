//! Game event handling: clicks, mode changes, background and the deferred
//! clear.

use std::time::Instant;

use crate::{
    deck::GameMode,
    game::{ClickOutcome, GameCompleted},
    history::HistoryRecord,
};

use super::super::{
    app::App,
    types::{Background, StatusMessage, board_columns},
};

/// Helper struct for routing input events into the game state machine.
pub struct GameHandler<'a> {
    app: &'a mut App,
}

impl<'a> GameHandler<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn click_cursor(&mut self) {
        let id = self.app.cursor;
        self.click(id, Instant::now());
    }

    pub fn click(&mut self, id: usize, now: Instant) {
        match self.app.game.click_tile(id, now) {
            Ok(ClickOutcome::Ignored | ClickOutcome::Revealed) => {}
            Ok(ClickOutcome::Matched) => {
                self.app.log(format!(
                    "Pair found ({}/{})",
                    self.app.game.pairs_found(),
                    self.app.game.mode().pair_count()
                ));
            }
            Ok(ClickOutcome::Mismatched(_)) => {
                tracing::debug!("no match, hiding shortly");
            }
            Ok(ClickOutcome::Completed(event)) => self.record_completion(event),
            Err(err) => self.app.log(format!("Click rejected: {}", err)),
        }
    }

    /// Hide an unmatched pair once its delay has passed.
    pub fn tick(&mut self, now: Instant) {
        self.app.game.resolve_pending(now);
    }

    pub fn select_mode(&mut self, mode: GameMode) {
        match self.app.game.reset(mode) {
            Ok(()) => {
                self.app.cursor = 0;
                self.app.status = None;
                self.app.log(format!("New game: mode {}", mode));
            }
            Err(err) => self.app.log(format!("Failed to start mode {}: {}", mode, err)),
        }
    }

    pub fn restart(&mut self) {
        let mode = self.app.game.mode();
        self.select_mode(mode);
    }

    pub fn toggle_faces(&mut self) {
        let faces = self.app.game.face_set().toggle();
        match self.app.game.change_face_set(faces) {
            Ok(()) => {
                self.app.cursor = 0;
                self.app.status = None;
                self.app.log(format!("Playing with {}", faces));
            }
            Err(err) => self.app.log(format!("Failed to switch to {}: {}", faces, err)),
        }
    }

    pub fn set_background(&mut self, background: Background) {
        if self.app.background != background {
            self.app.background = background;
            tracing::debug!(?background, "background changed");
        }
    }

    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        let len = self.app.game.deck().len();
        if len == 0 {
            return;
        }

        let columns = board_columns(self.app.game.mode()) as isize;
        let rows = (len as isize + columns - 1) / columns;
        let col = (self.app.cursor as isize % columns + dx).clamp(0, columns - 1);
        let row = (self.app.cursor as isize / columns + dy).clamp(0, rows - 1);

        self.app.cursor = ((row * columns + col) as usize).min(len - 1);
    }

    fn record_completion(&mut self, event: GameCompleted) {
        self.app.log(format!("Game complete: mode {}", event.mode));
        self.app.status = Some(StatusMessage::Info(format!(
            "All {} pairs found! Press r to play again.",
            event.mode.pair_count()
        )));

        match self.app.recorder.append(HistoryRecord::from(event)) {
            Ok(history) => self.app.history = history,
            Err(err) => {
                self.app.log(format!("Failed to save history: {}", err));
                self.app.status = Some(StatusMessage::Error(format!(
                    "Game complete, but history was not saved: {}",
                    err
                )));
            }
        }
    }
}
