//! Per-mode totals for the history screen.

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Row, Table},
};

use crate::{
    deck::GameMode,
    history::HistorySummary,
    ui::App,
};

impl App {
    pub(in crate::ui) fn draw_stats_view(&self, f: &mut Frame, area: Rect) {
        let summary = HistorySummary::from_records(&self.history);

        let mut rows: Vec<Row> = GameMode::ALL
            .iter()
            .map(|&mode| {
                Row::new(vec![
                    format!("Mode {}", mode),
                    summary.games_in_mode(mode).to_string(),
                ])
            })
            .collect();

        rows.push(
            Row::new(vec!["Total".to_string(), summary.total_games.to_string()])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        );

        let last = summary
            .last_completed
            .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        let table = Table::new(rows, [Constraint::Length(10), Constraint::Length(8)])
            .header(
                Row::new(vec!["Mode", "Games"])
                    .style(Style::default().add_modifier(Modifier::BOLD))
                    .bottom_margin(1),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Completed Games (last: {})", last)),
            );

        f.render_widget(table, area);
    }
}
