use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::{app::App, types::View};

const BOARD_HELP: &str = concat!(
    "arrows move | Enter flip | 1/2/3 mode | r restart | f faces | ",
    "b/g/d background | Tab history | q quit"
);

impl App {
    pub(in crate::ui) fn draw_status(&self, f: &mut Frame, area: Rect) {
        let game = &self.game;

        let summary = format!(
            "Mode {} | {} | Pairs {}/{}",
            game.mode(),
            game.face_set(),
            game.pairs_found(),
            game.mode().pair_count()
        );

        let help = match self.view {
            View::Board => BOARD_HELP,
            View::History(_) => "Tab switch view | PgUp/PgDn page | Esc board | q quit",
        };

        let mut spans = vec![Span::styled(
            summary,
            Style::default().add_modifier(Modifier::BOLD),
        )];

        if let Some(status) = &self.status {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                status.text().to_string(),
                Style::default().fg(status.color()),
            ));
        }

        f.render_widget(
            Paragraph::new(Line::from(spans)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Memory")
                    .title_bottom(help),
            ),
            area,
        );
    }
}
