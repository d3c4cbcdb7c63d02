//! History screen navigation.

use crate::history::total_pages;

use super::super::{
    app::App,
    types::{HistoryViewMode, View},
};

/// Helper struct for managing history view state.
pub struct HistoryHandler<'a> {
    app: &'a mut App,
}

impl<'a> HistoryHandler<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    /// Show the history screen, reloading it from storage.
    pub fn enter_history(&mut self) {
        self.app.history = self.app.recorder.load();
        self.app.history_page = 0;
        self.app.view = View::History(HistoryViewMode::Stats);
        self.app.log(format!("Loaded {} game(s) from history", self.app.history.len()));
    }

    pub fn exit_history(&mut self) {
        self.app.view = View::Board;
    }

    /// Switch to the next view mode (Stats -> List -> Stats).
    pub fn cycle_view_mode(&mut self) {
        if let View::History(mode) = self.app.view {
            self.app.view = View::History(match mode {
                HistoryViewMode::Stats => HistoryViewMode::List,
                HistoryViewMode::List => HistoryViewMode::Stats,
            });
        }
    }

    pub fn next_page(&mut self) {
        if self.app.history_page + 1 < total_pages(self.app.history.len()) {
            self.app.history_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.app.history_page = self.app.history_page.saturating_sub(1);
    }
}
