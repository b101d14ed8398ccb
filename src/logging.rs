use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};

use tracing_subscriber::EnvFilter;

/// Filter directives, e.g. `POCKETBUDGET_LOG=pocketbudget=debug`.
pub(crate) const LOG_ENV: &str = "POCKETBUDGET_LOG";

static INIT_TRACING: Once = Once::new();

/// Send tracing output to `log_path`. The terminal belongs to the UI, so
/// nothing is written to stdout or stderr. Only the first call has effect.
pub(crate) fn init(log_path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    INIT_TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new("pocketbudget=info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
        tracing::info!("PocketBudget tracing initialized.");
    });
    Ok(())
}
