use slog::{Drain, Level};
use slog_async::AsyncGuard;
use slog_scope::GlobalLoggerGuard;
use slog_term::ThreadSafeTimestampFn;
use thiserror::Error;

/// Env var holding the minimum log level, e.g. `debug`
pub const LEVEL_VAR: &str = "GRID_LOG";

pub struct LoggerBuilder {
    level: Level,
}

/// Keeps the global logger installed until dropped, flushing anything still queued
pub struct Logger {
    level: Level,
    _global: GlobalLoggerGuard,
    _flush: AsyncGuard,
}

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Invalid level {0:?}")]
    BadLevel(String),
}

impl LoggerBuilder {
    pub fn with_env() -> Result<Self, LogError> {
        let mut builder = Self::default();

        if let Ok(env) = std::env::var(LEVEL_VAR) {
            builder = builder.level(parse_level(&env)?);
        }

        Ok(builder)
    }

    pub fn level(mut self, s: Level) -> Self {
        self.level = s;
        self
    }

    pub fn init(self, timestamp_fn: impl ThreadSafeTimestampFn) -> Result<Logger, LogError> {
        let decorator = slog_term::TermDecorator::new().stderr().build();
        let drain = slog_term::CompactFormat::new(decorator)
            .use_custom_timestamp(timestamp_fn)
            .build()
            .fuse();
        let drain = drain.filter_level(self.level).fuse();
        let (drain, flush) = slog_async::Async::new(drain)
            .thread_name("logging".to_owned())
            .chan_size(1024)
            .build_with_guard();
        let logger = slog::Logger::root(drain.fuse(), slog::o!());

        let global = slog_scope::set_global_logger(logger);
        Ok(Logger {
            level: self.level,
            _global: global,
            _flush: flush,
        })
    }
}

fn parse_level(s: &str) -> Result<Level, LogError> {
    s.parse().map_err(|_| LogError::BadLevel(s.to_owned()))
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self { level: Level::Info }
    }
}

impl Logger {
    pub fn level(&self) -> Level {
        self.level
    }
}
