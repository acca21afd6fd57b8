use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::Config;

/// Installs the global tracing subscriber: a daily rolling log file, plus the
/// console when `log_to_stdout` is set. Keep the returned guard alive until exit or
/// buffered lines are lost.
pub fn init_logging(config: &Config) -> WorkerGuard {
    fs::create_dir_all(&config.log_dir).ok();

    let file_appender = rolling::daily(&config.log_dir, &config.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    // Console logs go to stderr; stdout carries the per-student summary lines.
    let console_layer = config.log_to_stdout.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(true)
    });

    let env_filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init: a second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_logging_creates_log_dir() {
        let tmp = tempdir().unwrap();
        let log_dir = tmp.path().join("nested").join("logs");
        let config = Config {
            log_dir: log_dir.to_string_lossy().into_owned(),
            ..Config::default()
        };

        let _guard = init_logging(&config);
        tracing::info!("logger online");

        assert!(log_dir.is_dir());
    }
}
