//! History screen rendering coordinator.

mod list_view;
mod stats_view;

use ratatui::{Frame, layout::Rect};

use crate::ui::{App, types::HistoryViewMode};

impl App {
    pub(in crate::ui) fn draw_history_mode(
        &self,
        f: &mut Frame,
        area: Rect,
        mode: HistoryViewMode,
    ) {
        match mode {
            HistoryViewMode::Stats => self.draw_stats_view(f, area),
            HistoryViewMode::List => self.draw_list_view(f, area),
        }
    }
}
