//! Handler modules for keyboard input, game events and the history screen.

mod game_handler;
mod history_handler;
mod input_handler;

pub use game_handler::GameHandler;
pub use history_handler::HistoryHandler;
pub use input_handler::InputHandler;
