//! Tracing setup: journald when running under systemd, rolling log files
//! otherwise.

use anyhow::Result;
use std::path::Path;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Keeps the non-blocking writer alive for the lifetime of the process.
static WRITER_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Initialize logging. The level comes from `PICSHELF_LOG`, falling back to
/// `RUST_LOG`, then to `info`.
///
/// The UI owns the terminal, so nothing is ever written to stdout/stderr:
/// on Linux events go to journald when it is reachable, and to a daily
/// rolling file under `log_dir` everywhere else.
pub fn init(log_dir: &Path) -> Result<()> {
    let filter = EnvFilter::try_from_env("PICSHELF_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(target_os = "linux")]
    if let Ok(journald) = tracing_journald::layer() {
        tracing_subscriber::registry()
            .with(filter)
            .with(journald)
            .init();
        tracing::info!("logging to journald");
        return Ok(());
    }

    std::fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::daily(log_dir, "picshelf.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = WRITER_GUARD.set(guard);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    tracing::info!("logging to {}", log_dir.display());
    Ok(())
}
