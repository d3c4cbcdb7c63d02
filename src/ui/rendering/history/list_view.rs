//! Game list view rendering for the history screen.

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
};

use crate::{
    history::{PAGE_SIZE, page, total_pages},
    ui::App,
};

impl App {
    pub(in crate::ui) fn draw_list_view(&self, f: &mut Frame, area: Rect) {
        let games = page(&self.history, self.history_page);

        if games.is_empty() {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No games found",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
            ];

            let paragraph = Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL).title("Game History"));

            f.render_widget(paragraph, area);
            return;
        }

        let start_index = self.history_page * PAGE_SIZE;
        let rows: Vec<Row> = games
            .iter()
            .enumerate()
            .map(|(page_idx, record)| {
                let date = record
                    .completed_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string();

                Row::new(vec![
                    format!("{}.", start_index + page_idx + 1),
                    format!("Mode {}", record.game_mode),
                    date,
                ])
            })
            .collect();

        let title = format!(
            "Game History - Page {}/{} (Showing {}-{} of {})",
            self.history_page + 1,
            total_pages(self.history.len()),
            start_index + 1,
            start_index + games.len(),
            self.history.len()
        );

        let table = Table::new(
            rows,
            [
                Constraint::Length(5),  // Number
                Constraint::Length(9),  // Mode
                Constraint::Length(20), // Date
            ],
        )
        .header(
            Row::new(vec!["#", "Mode", "Date"])
                .style(Style::default().add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title(title));

        f.render_widget(table, area);
    }
}
