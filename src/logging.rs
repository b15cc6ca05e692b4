//! Logging initialization for the `dashlayout` binary.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `DASHLAYOUT_LOG` environment variable. Falls back to the configured
//! `[logging] level` when the variable is unset or invalid.
//!
//! ```bash
//! DASHLAYOUT_LOG=debug dashlayout layout sync
//! DASHLAYOUT_LOG=dashboard_layout::store=trace,warn dashlayout layout sync
//! ```

use crate::config::LogLevel;
use tracing_subscriber::{fmt, EnvFilter};

/// Env var holding filter directives.
pub const LOG_ENV: &str = "DASHLAYOUT_LOG";

/// Builds the filter: `DASHLAYOUT_LOG` if it parses, else `fallback`.
pub fn filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback.as_directive()))
}

/// Installs the global subscriber, writing to stderr so stdout stays
/// machine-readable.
///
/// A second call is ignored.
pub fn init(fallback: LogLevel) {
    let _ = fmt()
        .with_env_filter(filter(fallback))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::xdg::tests::with_env;
    use serial_test::serial;

    #[test]
    fn every_log_level_is_a_valid_directive() {
        for level in [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            assert!(EnvFilter::try_new(level.as_directive()).is_ok());
        }
    }

    #[test]
    #[serial]
    fn env_var_overrides_fallback() {
        with_env(&[(LOG_ENV, Some("debug"))], || {
            assert_eq!(filter(LogLevel::Error).to_string(), "debug");
        });
    }

    #[test]
    #[serial]
    fn fallback_used_without_env_var() {
        with_env(&[(LOG_ENV, None)], || {
            assert_eq!(filter(LogLevel::Info).to_string(), "info");
        });
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(LogLevel::Warn);
        init(LogLevel::Debug);
    }
}
