//! Configuration file loader with position-aware error reporting.
//!
//! Loads TOML configuration from a specific path or the default XDG location.
//! When the default location has no file, returns `Config::default()`.

use std::fs;
use std::path::Path;

use crate::config::error::ConfigError;
use crate::config::schema::Config;
use crate::config::xdg;

/// Stateless configuration loader.
///
/// Every successful load is validated: a file that parses but carries an
/// unusable debounce or breakpoint table is rejected here, before any
/// command builds a store from it.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the configuration at `path`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotFound`] if the file does not exist.
    /// - [`ConfigError::ReadError`] for other I/O failures.
    /// - [`ConfigError::ParseError`] with the line and column of bad TOML.
    /// - [`ConfigError::InvalidValue`] if a setting is unusable.
    pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::ReadError {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let config = Self::parse_toml(&content, path)?;
        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            offline = config.sync.is_offline(),
            breakpoints = config.breakpoints.len(),
            "Loaded layout config"
        );
        Ok(config)
    }

    /// Loads the file at the XDG location, or the built-in defaults when
    /// there is none.
    pub fn load_default() -> Result<Config, ConfigError> {
        let path = xdg::config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }
        Self::load_from_path(&path)
    }

    /// Loads `path` if given (the `--config` flag), otherwise the default
    /// location.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        path.map_or_else(Self::load_default, Self::load_from_path)
    }

    fn parse_toml(content: &str, path: &Path) -> Result<Config, ConfigError> {
        toml::from_str(content).map_err(|e: toml::de::Error| {
            let (line, column) = e
                .span()
                .map_or((0, 0), |span| line_column(content, span.start));
            ConfigError::ParseError {
                path: path.to_path_buf(),
                line,
                column,
                message: e.message().to_string(),
            }
        })
    }
}

/// One-based line and column (in characters) of byte `offset` in `content`.
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = content.get(..offset).unwrap_or(content);
    let mut lines = before.split('\n');
    let current = lines.next_back().unwrap_or_default();
    (lines.count() + 1, current.chars().count() + 1)
}
