//! Log panel rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::app::App;

impl App {
    pub(in crate::ui) fn draw_logs(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Log")
            .border_style(Style::default().fg(Color::DarkGray));

        let logs = self.logs.lines();
        let visible = block.inner(area).height as usize;
        let start = logs.len().saturating_sub(visible);

        let lines: Vec<Line> = logs[start..].iter().map(|l| Line::from(l.as_str())).collect();

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
