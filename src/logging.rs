use crate::errors::AppResult;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Initializes line-oriented file logging for one watcher binary.
///
/// The log file is opened in append mode so restarts keep the history. Levels
/// default to DEBUG and can be narrowed with `RUST_LOG`. ANSI styling is off
/// since the output only ever goes to a file.
pub fn init_file_logging(path: &Path) -> AppResult<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
