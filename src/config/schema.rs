//! TOML configuration schema types for dashboard-layout.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so a partial or empty file is valid.
//!
//! Duration fields use human-readable strings (e.g. `"800ms"`, `"2s"`)
//! parsed by the `humantime` crate at the call site.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::error::ConfigError;
use crate::layout::{Breakpoint, BreakpointTable};

/// Env var consulted for the bearer token when `sync.token_env` is unset.
pub const DEFAULT_TOKEN_ENV: &str = "DASHLAYOUT_TOKEN";

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration.
///
/// ```toml
/// [sync]
/// [logging]
/// [[breakpoints]]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Remote layout synchronization.
    pub sync: SyncConfig,
    /// Log verbosity.
    pub logging: LoggingConfig,
    /// Viewport-width thresholds mapped to column counts.
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync: SyncConfig::default(),
            logging: LoggingConfig::default(),
            breakpoints: BreakpointTable::default().iter().cloned().collect(),
        }
    }
}

impl Config {
    /// Builds the validated breakpoint table.
    pub fn breakpoint_table(&self) -> Result<BreakpointTable, ConfigError> {
        BreakpointTable::new(self.breakpoints.clone()).map_err(|e| ConfigError::InvalidValue {
            field: "breakpoints".to_string(),
            message: e.to_string(),
        })
    }

    /// Checks every field that parses but may still be unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sync.debounce()?;
        self.breakpoint_table()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sync
// ---------------------------------------------------------------------------

/// Remote layout endpoint settings from the `[sync]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SyncConfig {
    /// Base URL of the layout service. Empty means offline: layouts live
    /// only in the local cache.
    pub endpoint: String,
    /// User whose layout is synced. Empty means `$USER`.
    pub user: String,
    /// Env var holding the bearer token.
    pub token_env: String,
    /// Delay between the last edit and the remote write (e.g. `"800ms"`).
    pub debounce: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            user: String::new(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            debounce: "800ms".to_string(),
        }
    }
}

impl SyncConfig {
    /// Returns `true` when no endpoint is configured.
    pub fn is_offline(&self) -> bool {
        self.endpoint.trim().is_empty()
    }

    /// Parsed debounce interval.
    pub fn debounce(&self) -> Result<Duration, ConfigError> {
        humantime::parse_duration(self.debounce.trim()).map_err(|e| ConfigError::InvalidValue {
            field: "sync.debounce".to_string(),
            message: format!("'{}': {e}", self.debounce),
        })
    }

    /// The configured user, then `$USER`, then `"default"`.
    pub fn resolved_user(&self) -> String {
        let user = self.user.trim();
        if !user.is_empty() {
            return user.to_string();
        }
        std::env::var("USER")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| "default".to_string())
    }

    /// Bearer token read from `token_env`, if set and non-empty.
    pub fn token(&self) -> Option<String> {
        if self.token_env.is_empty() {
            return None;
        }
        std::env::var(&self.token_env).ok().filter(|t| !t.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback verbosity when `DASHLAYOUT_LOG` is not set.
    pub level: LogLevel,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings (default).
    #[default]
    Warn,
    /// Informational messages.
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// The `EnvFilter` directive for this level.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::xdg::tests::with_env;
    use serial_test::serial;

    #[test]
    fn parse_valid_config_all_fields() {
        let toml_str = r#"
[sync]
endpoint = "https://layouts.example.com/api"
user = "alice"
token_env = "LAYOUT_TOKEN"
debounce = "2s"

[logging]
level = "debug"

[[breakpoints]]
name = "wide"
min_width = 1000
columns = 8

[[breakpoints]]
name = "narrow"
min_width = 0
columns = 3
"#;
        let config: Config = toml::from_str(toml_str).expect("valid TOML should parse");
        assert_eq!(config.sync.endpoint, "https://layouts.example.com/api");
        assert_eq!(config.sync.user, "alice");
        assert_eq!(config.sync.token_env, "LAYOUT_TOKEN");
        assert_eq!(
            config.sync.debounce().expect("valid duration"),
            Duration::from_secs(2)
        );
        assert_eq!(config.logging.level, LogLevel::Debug);
        let table = config.breakpoint_table().expect("valid breakpoints");
        assert_eq!(table.select(1200).columns, 8);
        assert_eq!(table.select(10).columns, 3);
    }

    #[test]
    fn parse_empty_string_uses_all_defaults() {
        let config: Config = toml::from_str("").expect("empty string should parse");
        assert_eq!(config, Config::default());
        assert!(config.sync.is_offline());
        assert_eq!(
            config.sync.debounce().expect("default debounce"),
            Duration::from_millis(800)
        );
        assert_eq!(
            config.breakpoint_table().expect("default table"),
            BreakpointTable::default()
        );
    }

    #[test]
    fn parse_unknown_fields_are_ignored() {
        let toml_str = r#"
unknown_key = "hello"

[sync]
future_field = 42
"#;
        let config: Config = toml::from_str(toml_str).expect("unknown fields should be ignored");
        assert_eq!(config.sync, SyncConfig::default());
    }

    #[test]
    fn invalid_debounce_is_reported_by_field() {
        let config = Config {
            sync: SyncConfig {
                debounce: "soon".to_string(),
                ..SyncConfig::default()
            },
            ..Config::default()
        };
        let err = config.validate().expect_err("bad duration");
        assert!(err.to_string().contains("sync.debounce"));
    }

    #[test]
    fn empty_breakpoint_list_fails_validation() {
        let config: Config = toml::from_str("breakpoints = []").expect("parses");
        let err = config.validate().expect_err("no breakpoints");
        assert!(err.to_string().contains("breakpoints"));
    }

    #[test]
    fn zero_column_breakpoint_fails_validation() {
        let config = Config {
            breakpoints: vec![Breakpoint::new("flat", 0, 0)],
            ..Config::default()
        };
        assert!(config.breakpoint_table().is_err());
    }

    #[test]
    fn log_level_rejects_unknown_names() {
        let result: Result<Config, _> = toml::from_str("[logging]\nlevel = \"verbose\"");
        assert!(result.is_err());
    }

    #[test]
    fn default_round_trips_through_toml() {
        let text = toml::to_string(&Config::default()).expect("serializes");
        let back: Config = toml::from_str(&text).expect("parses");
        assert_eq!(back, Config::default());
    }

    #[test]
    fn offline_when_endpoint_blank() {
        let sync = SyncConfig {
            endpoint: "   ".to_string(),
            ..SyncConfig::default()
        };
        assert!(sync.is_offline());
    }

    #[test]
    #[serial]
    fn resolved_user_falls_back_to_env() {
        with_env(&[("USER", Some("carol"))], || {
            assert_eq!(SyncConfig::default().resolved_user(), "carol");
            let explicit = SyncConfig {
                user: "dave".to_string(),
                ..SyncConfig::default()
            };
            assert_eq!(explicit.resolved_user(), "dave");
        });
        with_env(&[("USER", None)], || {
            assert_eq!(SyncConfig::default().resolved_user(), "default");
        });
    }

    #[test]
    #[serial]
    fn token_read_from_configured_env_var() {
        with_env(&[("DASHLAYOUT_TEST_TOKEN", Some("s3cret"))], || {
            let sync = SyncConfig {
                token_env: "DASHLAYOUT_TEST_TOKEN".to_string(),
                ..SyncConfig::default()
            };
            assert_eq!(sync.token().as_deref(), Some("s3cret"));
        });
        with_env(&[("DASHLAYOUT_TEST_TOKEN", Some(""))], || {
            let sync = SyncConfig {
                token_env: "DASHLAYOUT_TEST_TOKEN".to_string(),
                ..SyncConfig::default()
            };
            assert_eq!(sync.token(), None);
        });
    }
}
