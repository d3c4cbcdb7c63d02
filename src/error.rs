use std::io;

use crate::deck::GameMode;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("unsupported game mode {0} (expected 4, 16 or 32)")]
    InvalidMode(u32),
    #[error("no tile with id {id} (deck has {tiles} tiles)")]
    InvalidTileId { id: usize, tiles: usize },
    #[error("deck is not a valid set of pairs for mode {0}")]
    UnpairedDeck(GameMode),
    #[error("failed to read history: {0}")]
    StorageRead(#[source] io::Error),
    #[error("failed to write history: {0}")]
    StorageWrite(#[source] io::Error),
    #[error("failed to encode history: {0}")]
    Encode(#[from] serde_json::Error),
}
