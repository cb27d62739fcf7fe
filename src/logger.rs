use std::path::Path;

use anyhow::{Context, Result};
use channel_bridge::LogLevel;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// Rolling plain-text log inside the log directory.
pub const LOG_FILE: &str = "wiredash.log";
/// Rolling newline-delimited JSON with one line per dispatched call.
pub const EVENT_FILE: &str = "wiredash-events.json";

/// Keeps the non-blocking file writers alive; drop it last.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _guards: Vec<WorkerGuard>,
}

/// Install the global subscriber.
///
/// - human-readable logs always go to **stderr**. stdout belongs to the
///   JSON-RPC protocol and must stay clean.
/// - with `log_dir`, the same logs also go to a daily rolling `wiredash.log`,
///   and the `request` events emitted per call go to `wiredash-events.json`.
pub fn init_tracing(log_level: LogLevel, log_dir: Option<&Path>) -> Result<LogGuard> {
    let directive = log_level.as_directive();
    let mut guards = Vec::new();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::new(directive));

    let (file_layer, event_layer) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("could not create log directory {}", dir.display()))?;

            let (txt_writer, txt_guard) =
                tracing_appender::non_blocking(rolling::daily(dir, LOG_FILE));
            let (json_writer, json_guard) =
                tracing_appender::non_blocking(rolling::daily(dir, EVENT_FILE));
            guards.push(txt_guard);
            guards.push(json_guard);

            let txt_layer = fmt::layer()
                .with_ansi(false)
                .with_writer(txt_writer)
                .with_filter(EnvFilter::new(directive));

            // only events with target="request"
            let json_layer = fmt::layer()
                .json()
                .with_writer(json_writer)
                .with_target(true)
                .with_filter(EnvFilter::new("request=info"));

            (Some(txt_layer), Some(json_layer))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .with(event_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(LogGuard { _guards: guards })
}

#[cfg(test)]
mod tests {
    use super::*;

    // only one global subscriber per test binary, so everything lives in one test
    #[test]
    fn file_logging_creates_directory_and_refuses_second_install() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");

        let guard = init_tracing(LogLevel::Debug, Some(&log_dir)).unwrap();
        assert!(log_dir.is_dir());
        tracing::info!("hello from the logger test");

        assert!(init_tracing(LogLevel::Info, None).is_err());
        drop(guard);

        let names: Vec<String> = std::fs::read_dir(&log_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().any(|n| n.starts_with(LOG_FILE)), "{names:?}");
    }
}
