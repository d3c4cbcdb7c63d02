use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::{
    args::Args,
    deck::{FaceSet, GameMode},
};

const APP_DIR: &str = "memory-match";
const HISTORY_FILE: &str = "history.json";
const LOG_DIR: &str = "logs";

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: GameMode,
    pub faces: FaceSet,
    pub history_path: PathBuf,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self> {
        let (history_path, log_dir) = match (&args.history_file, &args.log_dir) {
            (Some(history), Some(logs)) => (history.clone(), logs.clone()),
            (history, logs) => {
                let base = data_dir()?;
                (
                    history.clone().unwrap_or_else(|| base.join(HISTORY_FILE)),
                    logs.clone().unwrap_or_else(|| base.join(LOG_DIR)),
                )
            }
        };

        Ok(Self::with_paths(args.mode, args.faces, history_path, log_dir))
    }

    pub fn with_paths(
        mode: GameMode,
        faces: FaceSet,
        history_path: impl AsRef<Path>,
        log_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            mode,
            faces,
            history_path: history_path.as_ref().to_path_buf(),
            log_dir: log_dir.as_ref().to_path_buf(),
        }
    }
}

/// Platform data directory for the game, created if missing.
pub fn data_dir() -> Result<PathBuf> {
    let mut path =
        dirs::data_dir().context("Unable to determine data directory for your platform")?;

    path.push(APP_DIR);

    std::fs::create_dir_all(&path).context("Failed to create memory-match data directory")?;

    Ok(path)
}
