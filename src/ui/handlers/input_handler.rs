//! Keyboard dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::deck::GameMode;

use super::super::{
    app::App,
    types::{Background, HistoryViewMode, View},
};
use super::{GameHandler, HistoryHandler};

/// Helper struct for managing keyboard input.
pub struct InputHandler<'a> {
    app: &'a mut App,
}

impl<'a> InputHandler<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    /// Handle one key press. Returns true when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q' | 'Q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.app.log("Exit requested");
                return true;
            }

            (KeyCode::Char('b'), _) => GameHandler::new(self.app).set_background(Background::Blue),
            (KeyCode::Char('g'), _) => {
                GameHandler::new(self.app).set_background(Background::Green)
            }
            (KeyCode::Char('d'), _) => {
                GameHandler::new(self.app).set_background(Background::Default)
            }

            _ => match self.app.view {
                View::Board => self.handle_board_key(key),
                View::History(mode) => self.handle_history_key(key, mode),
            },
        }

        false
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => GameHandler::new(self.app).move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => GameHandler::new(self.app).move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => GameHandler::new(self.app).move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => GameHandler::new(self.app).move_cursor(0, 1),

            KeyCode::Enter | KeyCode::Char(' ') => GameHandler::new(self.app).click_cursor(),

            KeyCode::Char('1') => GameHandler::new(self.app).select_mode(GameMode::Four),
            KeyCode::Char('2') => GameHandler::new(self.app).select_mode(GameMode::Sixteen),
            KeyCode::Char('3') => GameHandler::new(self.app).select_mode(GameMode::ThirtyTwo),
            KeyCode::Char('m') => {
                let next = self.app.game.mode().next();
                GameHandler::new(self.app).select_mode(next);
            }
            KeyCode::Char('r') => GameHandler::new(self.app).restart(),
            KeyCode::Char('f') => GameHandler::new(self.app).toggle_faces(),

            KeyCode::Tab => HistoryHandler::new(self.app).enter_history(),

            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent, mode: HistoryViewMode) {
        match key.code {
            KeyCode::Tab => HistoryHandler::new(self.app).cycle_view_mode(),
            KeyCode::Esc => HistoryHandler::new(self.app).exit_history(),
            KeyCode::PageDown if mode == HistoryViewMode::List => {
                HistoryHandler::new(self.app).next_page()
            }
            KeyCode::PageUp if mode == HistoryViewMode::List => {
                HistoryHandler::new(self.app).prev_page()
            }
            _ => {}
        }
    }
}
