//! MedTrack: local patient record manager, terminal edition.

use anyhow::Result;
use std::io::IsTerminal;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use medtrack::adapters::sanitize::ScrubbingMakeWriter;
use medtrack::tui::App;

/// Set up `tracing` output before the TUI takes over the terminal.
///
/// Log lines printed to the terminal would corrupt the alternate screen, so
/// an interactive run logs to a file inside the data directory instead.
/// Non-interactive runs (pipes, service managers) log to stdout.
/// `MEDTRACK_LOG_MODE=file|stdout` forces either choice.
fn init_logging() -> Result<WorkerGuard> {
    let mode = std::env::var("MEDTRACK_LOG_MODE").unwrap_or_else(|_| "auto".to_string());
    let to_file = match mode.as_str() {
        "file" => true,
        "stdout" => false,
        _ => std::io::stdout().is_terminal(),
    };

    let (writer, guard) = if to_file {
        let log_file = std::env::var("MEDTRACK_LOG_FILE").unwrap_or_else(|_| {
            let data_dir =
                std::env::var("MEDTRACK_DATA_DIR").unwrap_or_else(|_| "medtrack_data".to_string());
            format!("{data_dir}/medtrack.log")
        });

        if let Some(parent) = Path::new(&log_file).parent() {
            // Best effort; opening the file reports the real failure.
            let _ = std::fs::create_dir_all(parent);
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(ScrubbingMakeWriter::new(writer)))
        .init();

    Ok(guard)
}

fn main() -> Result<()> {
    let _guard = init_logging()?;
    tracing::info!("MedTrack starting");

    App::new()?.run()?;

    tracing::info!("MedTrack shut down cleanly");
    Ok(())
}
