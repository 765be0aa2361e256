use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use crate::config::{LogConfig, LogFormat};

const LOG_FILE_PREFIX: &str = "comment-pages.log";

/// Install the global subscriber. `RUST_LOG` wins over the default
/// `comment_pages=info` filter.
///
/// Keep the returned guard alive for as long as file logging should flush.
/// If a subscriber is already installed this is a no-op and returns `None`.
pub fn init(config: &LogConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("comment_pages=info"));

    let (file_writer, guard) = match &config.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let file_layer = file_writer.map(|writer| fmt::layer().json().with_ansi(false).with_writer(writer));

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(fmt::layer().with_target(true))
            .try_init(),
    };

    match result {
        Ok(()) => guard,
        Err(e) => {
            // The installed subscriber stays; the file writer just built is unused.
            tracing::debug!("tracing subscriber already set: {}", e);
            None
        }
    }
}
