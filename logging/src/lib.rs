#[cfg(feature = "binary")]
mod init;

#[cfg(feature = "binary")]
pub use init::{LogError, Logger, LoggerBuilder};

#[cfg(feature = "binary")]
pub use tests::for_tests;

pub mod prelude {
    pub use slog_scope::crit;
    pub use slog_scope::debug;
    pub use slog_scope::error;
    pub use slog_scope::info;
    pub use slog_scope::trace;
    pub use slog_scope::warn;

    // the slog-scope macros expand to these, so they need to be in scope at the call site
    #[allow(deprecated)]
    pub use slog::{slog_crit, slog_debug, slog_error, slog_info, slog_trace, slog_warn};

    pub use slog::{self, o, Drain as SlogDrain, Level as MyLevel};

    pub use slog_scope::{self, logger};
}
