//! Tile grid rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    deck::{Face, Tile},
    ui::{
        app::App,
        types::{board_columns, hex_color},
    },
};

const HIDDEN_COLOR: Color = Color::Rgb(0x8c, 0x8c, 0x8c);
const HIDDEN_LABEL: &str = "?";

impl App {
    pub(in crate::ui) fn draw_board(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Board");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let deck = self.game.deck();
        if deck.is_empty() {
            return;
        }

        let columns = board_columns(self.game.mode());
        let rows = deck.len().div_ceil(columns);

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
            .split(inner);

        for (row, chunk) in deck.chunks(columns).enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
                .split(row_areas[row]);

            for (col, tile) in chunk.iter().enumerate() {
                self.draw_tile(f, cells[col], tile);
            }
        }
    }

    fn draw_tile(&self, f: &mut Frame, area: Rect, tile: &Tile) {
        let face_up = self.game.is_face_up(tile.id);
        let matched = self.game.matched().contains(&tile.id);

        let (label, fill) = if face_up {
            match tile.face {
                Face::Color(hex) => (String::new(), hex_color(hex).unwrap_or(Color::Reset)),
                Face::Number(n) => (n.to_string(), Color::White),
            }
        } else {
            (HIDDEN_LABEL.to_string(), HIDDEN_COLOR)
        };

        let border_style = if tile.id == self.cursor {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if matched {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);

        f.render_widget(
            Paragraph::new(label)
                .alignment(Alignment::Center)
                .style(Style::default().bg(fill).fg(Color::Black))
                .block(block),
            area,
        );
    }
}
