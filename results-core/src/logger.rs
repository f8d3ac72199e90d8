//! Tracing initialization: one fmt layer (level, target, thread id, span close events, all fields).
//! The bot writes to stdout and, when a log file is configured, to that file as well; CLI
//! commands write to stderr.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::Subscriber;
use tracing_subscriber::{
    fmt::format::FmtSpan,
    fmt::writer::{BoxMakeWriter, MakeWriterExt},
    fmt::MakeWriter,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Default level for the bot when `RUST_LOG` is unset.
pub const DEFAULT_LEVEL: &str = "info";

/// Default level for one-shot CLI commands when `RUST_LOG` is unset.
pub const CLI_DEFAULT_LEVEL: &str = "warn";

/// Initializes the global tracing subscriber.
///
/// Level comes from `RUST_LOG` (e.g. `info`, `debug`, `results_client=trace`); defaults to `info`.
/// Load `.env` (dotenvy) before calling this, otherwise `RUST_LOG` from the file is ignored.
/// When `log_file_path` is set, its parent directory is created and the same output is appended
/// to the file.
pub fn init_tracing(log_file_path: Option<&str>) -> anyhow::Result<()> {
    let writer = match log_file_path {
        Some(path) => {
            let file = Arc::new(open_log_file(path)?);
            BoxMakeWriter::new(io::stdout.and(file))
        }
        None => BoxMakeWriter::new(io::stdout),
    };

    subscriber(env_filter(DEFAULT_LEVEL), writer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))
}

/// Initializes tracing for commands that print their result to stdout.
///
/// Logs go to stderr and default to `warn`, so they never interleave with the printed output.
/// `RUST_LOG` still overrides the level.
pub fn init_cli_tracing() -> anyhow::Result<()> {
    subscriber(env_filter(CLI_DEFAULT_LEVEL), io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// One fmt layer under `filter`, writing to `writer`.
fn subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    Registry::default().with(filter).with(fmt_layer)
}

/// Opens `path` for appending, creating it and its parent directories if needed.
pub fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
