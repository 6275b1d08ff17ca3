use std::sync::Arc;
use std::time::Duration;

use spdlog::sink::{RotatingFileSink, RotationPolicy, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger};

use crate::config::{Config, Log, LogLevel};

const KEPT_LOG_FILES: usize = 60;

impl Log {
    /// Records at `level` or more severe pass.
    pub fn level_filter(&self) -> LevelFilter {
        let level = match self.level {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        };
        LevelFilter::MoreSevereEqual(level)
    }

    // A logger with no file has to write somewhere
    fn wants_console(&self) -> bool {
        self.log_to_console || self.location.is_none()
    }
}

fn console_sink(stream: StdStream, filter: LevelFilter) -> spdlog::Result<Arc<StdStreamSink>> {
    Ok(Arc::new(StdStreamSink::builder()
        .std_stream(stream)
        .level_filter(filter)
        .build()?))
}

/// Builds a logger for the `[log]` section without installing it.
/// Warnings and errors go to stderr, everything below to stdout, and a
/// configured `location` gets a file rotated every midnight.
pub fn build_logger(log: &Log) -> spdlog::Result<Arc<Logger>> {
    let mut builder = Logger::builder();

    if let Some(ref location) = log.location {
        builder.sink(Arc::new(RotatingFileSink::builder()
            .base_path(location)
            .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
            .max_files(KEPT_LOG_FILES)
            .rotate_on_open(false)
            .build()?));
    }

    if log.wants_console() {
        builder
            .sink(console_sink(StdStream::Stdout, LevelFilter::MoreVerbose(Level::Warn))?)
            .sink(console_sink(StdStream::Stderr, LevelFilter::MoreSevereEqual(Level::Warn))?);
    }

    let logger = Arc::new(builder.build()?);
    logger.set_level_filter(log.level_filter());
    logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
    logger.set_flush_period(Some(Duration::from_secs(2)));

    Ok(logger)
}

/// Replaces the default logger according to the `[log]` section. Without
/// that section spdlog's default console logger stays in place.
pub fn configure_logger(config: &Config) -> spdlog::Result<()> {
    if let Some(ref log) = config.log {
        spdlog::set_default_logger(build_logger(log)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use spdlog::{debug, info, warn};
    use tempfile::TempDir;

    use super::*;

    fn log_section(level: LogLevel, log_to_console: bool, location: Option<PathBuf>) -> Log {
        Log { level, log_to_console, location }
    }

    #[test]
    fn test_level_filter() {
        let log = log_section(LogLevel::Warn, false, None);
        assert_eq!(log.level_filter(), LevelFilter::MoreSevereEqual(Level::Warn));
        let log = log_section(LogLevel::Trace, false, None);
        assert_eq!(log.level_filter(), LevelFilter::MoreSevereEqual(Level::Trace));
    }

    #[test]
    fn test_console_only_logger() {
        let log = log_section(LogLevel::Info, false, None);
        let logger = build_logger(&log).unwrap();
        assert_eq!(logger.sinks().len(), 2);
        assert!(logger.should_log(Level::Info));
        assert!(!logger.should_log(Level::Debug));
    }

    #[test]
    fn test_file_logger_sinks() {
        let dir = TempDir::new().unwrap();
        let location = dir.path().join("quill.log");

        let file_only = build_logger(&log_section(LogLevel::Info, false, Some(location.clone()))).unwrap();
        assert_eq!(file_only.sinks().len(), 1);

        let with_console = build_logger(&log_section(LogLevel::Info, true, Some(location))).unwrap();
        assert_eq!(with_console.sinks().len(), 3);
    }

    #[test]
    fn test_file_logger_writes_messages() {
        let dir = TempDir::new().unwrap();
        let log = log_section(LogLevel::Info, false, Some(dir.path().join("quill.log")));
        let logger = build_logger(&log).unwrap();

        info!(logger: logger, "Loaded post {}", "hello-world");
        warn!(logger: logger, "Ignoring unknown front matter field {}", "unlisted");
        debug!(logger: logger, "Parsing front matter of {}", "hello-world");
        logger.flush();

        // Daily rotation puts the date in the file name
        let contents: String = fs::read_dir(dir.path()).unwrap()
            .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
            .collect();
        assert!(contents.contains("Loaded post hello-world"));
        assert!(contents.contains("Ignoring unknown front matter field unlisted"));
        assert!(!contents.contains("Parsing front matter"));
    }

    #[test]
    fn test_no_log_section_keeps_default_logger() {
        let config = Config::default();
        assert!(configure_logger(&config).is_ok());
    }

    #[test]
    fn test_log_section_installs_logger() {
        let config = Config::from_toml_str("[log]\nlevel = \"Warn\"\n").unwrap();
        configure_logger(&config).unwrap();

        let logger = spdlog::default_logger();
        assert!(logger.should_log(Level::Error));
        assert!(!logger.should_log(Level::Info));
    }
}
