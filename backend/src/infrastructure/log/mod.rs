use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::{LogConfig, LogFormat, LogRolling};

/// Initialize tracing log.
///
/// Caller should hold the guard.
pub fn init(config: &LogConfig) -> WorkerGuard {
    let (writer, guard) = if config.stdout {
        tracing_appender::non_blocking(std::io::stdout())
    } else {
        let file_appender = match config.rolling {
            LogRolling::Minutely => rolling::minutely(&config.directory, &config.file_name),
            LogRolling::Hourly => rolling::hourly(&config.directory, &config.file_name),
            LogRolling::Daily => rolling::daily(&config.directory, &config.file_name),
            LogRolling::Never => rolling::never(&config.directory, &config.file_name),
        };
        tracing_appender::non_blocking(file_appender)
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.filter_level)),
        )
        .with_ansi(config.with_ansi && config.stdout)
        .with_writer(writer)
        .with_level(config.with_level)
        .with_target(config.with_target)
        .with_thread_ids(config.with_thread_ids)
        .with_thread_names(config.with_thread_names)
        .with_file(config.with_source_location)
        .with_line_number(config.with_source_location);

    match config.format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
        LogFormat::Full => builder.init(),
    }

    guard
}
