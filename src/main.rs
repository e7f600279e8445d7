use anyhow::{Context, Result};
use std::path::Path;

use grantboard::config::Config;
use grantboard::data;
use grantboard::tui::{self, state::AppState};

fn main() -> Result<()> {
    let config = Config::load(Path::new("config.toml"))?;

    // The TUI owns the terminal, so diagnostics go to a file.
    let log_file = std::fs::File::create(&config.log.file)
        .with_context(|| format!("failed to create log file: {}", config.log.file))?;
    tracing_subscriber::fmt()
        .with_env_filter(config.log.filter.as_str())
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    // Load once; the dataset is the cached read-only state for the whole
    // session. A missing or malformed file aborts startup.
    let dataset = data::load_dataset(Path::new(&config.dataset.path))?;

    let state = AppState::from_dataset(&dataset, &config);
    tracing::info!(
        grants = state.metrics.total_grants,
        states = state.metrics.states_affected,
        "dashboard ready"
    );

    tui::run_tui(state)?;

    tracing::debug!("shutting down");
    Ok(())
}
