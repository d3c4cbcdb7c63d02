use std::path::PathBuf;

use clap::Parser;

use crate::deck::{FaceSet, GameMode};

#[derive(Parser, Debug)]
#[command(name = "memory-match", version, about = "Terminal memory card game")]
pub struct Args {
    /// Starting game mode: total number of tiles (4, 16 or 32)
    #[arg(long, default_value_t = GameMode::Four, value_parser = parse_mode)]
    pub mode: GameMode,

    /// Tile faces to play with
    #[arg(long, value_enum, default_value_t = FaceSet::Colors)]
    pub faces: FaceSet,

    /// History file (defaults to the platform data directory)
    #[arg(long, value_name = "PATH")]
    pub history_file: Option<PathBuf>,

    /// Directory for log files (defaults to the platform data directory)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Print the game history and exit
    #[arg(long)]
    pub print_history: bool,
}

fn parse_mode(value: &str) -> Result<GameMode, String> {
    let count: u32 = value
        .parse()
        .map_err(|_| format!("`{}` is not a tile count", value))?;
    GameMode::try_from(count).map_err(|err| err.to_string())
}
