use std::io;

use anyhow::Result;
use clap::Parser;

use memory_match::{
    args::Args,
    config::Config,
    history::{self, HistoryRecorder, JsonFileStore},
    logger, ui,
};

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_args(&args)?;

    if args.print_history {
        return print_history(&config);
    }

    let _guard = logger::init(&config.log_dir)?;
    tracing::info!(
        mode = %config.mode,
        faces = %config.faces,
        history = %config.history_path.display(),
        "starting"
    );

    ui::run_ui(&config)
}

fn print_history(config: &Config) -> Result<()> {
    let recorder = HistoryRecorder::new(JsonFileStore::new(&config.history_path));
    history::write_history(&mut io::stdout().lock(), &recorder.load())?;
    Ok(())
}
