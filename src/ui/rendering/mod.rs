mod board;
mod history;
mod logs;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Block,
};

use crate::ui::{app::App, types::View};

impl App {
    pub(in crate::ui) fn draw(&self, f: &mut Frame) {
        f.render_widget(
            Block::default().style(Style::default().bg(self.background.color()).fg(Color::Black)),
            f.area(),
        );

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(10),   // Board or history
                Constraint::Length(6), // Small log panel
            ])
            .split(f.area());

        self.draw_status(f, layout[0]);

        match self.view {
            View::Board => self.draw_board(f, layout[1]),
            View::History(mode) => self.draw_history_mode(f, layout[1], mode),
        }

        self.draw_logs(f, layout[2]);
    }
}
