// main.rs

mod dispatch;
mod executor;
mod history;
mod render;
mod session;
mod storage;
mod transcript;
mod ui;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::session::Session;
use crate::storage::Store;

/// Terminal client for a remote command-execution service.
#[derive(Parser)]
#[command(name = "webshell", version, about)]
struct Args {
    /// Command execution endpoint.
    #[arg(long, default_value = "http://127.0.0.1:5000/execute")]
    endpoint: String,

    /// State file holding the persisted command history.
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Directory transcript and HTML view exports are written to.
    #[arg(long, default_value = ".")]
    transcript_dir: PathBuf,

    /// Log file. The alternate screen owns the terminal, so logs go to disk.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("webshell")
}

fn init_logging(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("could not create log directory {}", dir.display()))?;
    }
    let log_file = File::create(path)
        .with_context(|| format!("could not open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Arc::new(log_file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let state_file = args
        .state_file
        .unwrap_or_else(|| data_dir().join("state.json"));
    let log_file = args.log_file.unwrap_or_else(|| data_dir().join("webshell.log"));
    init_logging(&log_file)?;
    tracing::info!(endpoint = %args.endpoint, state = %state_file.display(), "starting session");

    let store = Store::new(state_file);
    let mut session = Session::new(args.endpoint, store, args.transcript_dir);

    let mut terminal = ratatui::init();
    let _ = crossterm::execute!(std::io::stdout(), EnableMouseCapture);
    let result = ui::run(&mut terminal, &mut session);
    let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}
