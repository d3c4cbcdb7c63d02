use std::sync::{Arc, Mutex, MutexGuard};

use ratatui::style::Color;

use crate::deck::{GameMode, parse_hex};

pub const MAX_LOG_LINES: usize = 300;

/// Thread-safe circular log buffer with a maximum capacity.
#[derive(Clone)]
pub struct LogBuffer {
    inner: Arc<Mutex<Vec<String>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, msg: String) {
        let mut buf = self.lock();
        buf.push(msg);
        if buf.len() > MAX_LOG_LINES {
            buf.remove(0);
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lock().clone()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Board,
    History(HistoryViewMode),
}

/// Display mode for the history screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryViewMode {
    Stats, // Per-mode totals
    List,  // Paginated game list
}

/// One-line message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Info(text) | StatusMessage::Error(text) => text,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            StatusMessage::Info(_) => Color::Green,
            StatusMessage::Error(_) => Color::Red,
        }
    }
}

/// Screen background. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Default,
    Blue,
    Green,
}

impl Background {
    pub fn hex(self) -> &'static str {
        match self {
            Background::Default => "#f0f2f5",
            Background::Blue => "#e6f7ff",
            Background::Green => "#f6ffed",
        }
    }

    pub fn color(self) -> Color {
        hex_color(self.hex()).unwrap_or(Color::Reset)
    }
}

pub fn hex_color(hex: &str) -> Option<Color> {
    parse_hex(hex).map(|(r, g, b)| Color::Rgb(r, g, b))
}

/// Grid width used to lay out a deck.
pub fn board_columns(mode: GameMode) -> usize {
    match mode {
        GameMode::Four => 2,
        GameMode::Sixteen => 4,
        GameMode::ThirtyTwo => 8,
    }
}
