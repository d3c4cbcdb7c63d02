pub mod args;
pub mod config;
pub mod deck;
pub mod error;
pub mod game;
pub mod history;
pub mod logger;
pub mod ui;

pub use error::GameError;
