//! Log output setup.
//!
//! Logs never go to the terminal, which is busy drawing frames. Without
//! `--log-file` nothing is installed and every event is dropped.

use std::{fs::File, path::Path, sync::Mutex};

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing_subscriber::EnvFilter;

/// Install a file logger filtered by `RUST_LOG` (default `info`).
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!(err))?;
    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}
