//! Diagnostic logging to stderr and an append-only log file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::{Level, Metadata};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Install the global subscriber. Filter from `TMUXJUMP_LOG`, then
/// `RUST_LOG`, default `info`. If the log file cannot be opened, log to
/// stderr only. `error` events go to the file only; `main` prints the fatal
/// line itself.
pub fn init(log_file: &Path) {
    let filter = std::env::var("TMUXJUMP_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_ansi(false)
        .with_target(false);

    match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => builder
            .with_writer(
                std::io::stderr
                    .with_filter(not_error)
                    .and(Mutex::new(file)),
            )
            .init(),
        Err(e) => {
            builder
                .with_writer(std::io::stderr.with_filter(not_error))
                .init();
            tracing::warn!("cannot open log file {}: {e}", log_file.display());
        }
    }
}

fn not_error(meta: &Metadata<'_>) -> bool {
    *meta.level() != Level::ERROR
}
