use std::io::IsTerminal;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Keeps the background log writer alive; drop it last.
#[derive(Debug)]
pub struct TelemetryGuard {
    _guard: Option<WorkerGuard>,
}

impl TelemetryGuard {
    fn disabled() -> Self {
        Self { _guard: None }
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `default_level`. With `PONG_DISPLAY_LOG` set, logs go
/// to that file so they never land between frame bytes on the terminal.
pub fn init_tracing(default_level: &str) -> TelemetryGuard {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (writer, guard, ansi) = match log_file_path_from_env() {
        Some(path) => match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            Ok(file) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file);
                (BoxMakeWriter::new(non_blocking), Some(guard), false)
            }
            Err(err) => {
                eprintln!(
                    "Warning: failed to open log file {}: {}",
                    path.display(),
                    err
                );
                stderr_writer()
            }
        },
        None => stderr_writer(),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer);

    if subscriber.try_init().is_err() {
        return TelemetryGuard::disabled();
    }

    TelemetryGuard { _guard: guard }
}

fn stderr_writer() -> (BoxMakeWriter, Option<WorkerGuard>, bool) {
    (
        BoxMakeWriter::new(std::io::stderr),
        None,
        std::io::stderr().is_terminal(),
    )
}

fn log_file_path_from_env() -> Option<PathBuf> {
    std::env::var("PONG_DISPLAY_LOG").ok().map(PathBuf::from)
}
