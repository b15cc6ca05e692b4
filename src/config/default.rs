//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! functions to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Dashboard Layout Configuration
#
# This file was auto-generated with default values.
# All values shown below are the built-in defaults.
#
# Location: $XDG_CONFIG_HOME/dashboard-layout/config.toml

# ==============================================================================
# Sync
# ==============================================================================

[sync]

# Base URL of the layout service. Layouts are stored at
#   {endpoint}/users/{user}/dashboard-layout
# Leave empty to keep layouts in the local cache only.
endpoint = ""

# Whose layout to load and save. Empty means $USER.
user = ""

# Environment variable holding the bearer token for the layout service.
token_env = "DASHLAYOUT_TOKEN"

# How long to wait after the last edit before writing to the service.
# Edits inside this window are coalesced into a single write.
# Examples: "800ms", "2s"
debounce = "800ms"

# ==============================================================================
# Logging
# ==============================================================================

[logging]

# Verbosity when DASHLAYOUT_LOG is not set.
# Options: "error", "warn", "info", "debug", "trace"
level = "warn"

# ==============================================================================
# Breakpoints
# ==============================================================================
#
# A viewport at least `min_width` pixels wide uses `columns` grid columns.
# The narrowest entry also covers anything below its own threshold.

[[breakpoints]]
name = "lg"
min_width = 1200
columns = 12

[[breakpoints]]
name = "md"
min_width = 996
columns = 10

[[breakpoints]]
name = "sm"
min_width = 768
columns = 6

[[breakpoints]]
name = "xs"
min_width = 480
columns = 4

[[breakpoints]]
name = "xxs"
min_width = 0
columns = 2
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Writes the default config to the XDG config path.
///
/// See [`create_default_config_at`].
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    create_default_config_at(&xdg::config_path(), force)
}

/// Creates (or force-overwrites) the default config file at `path`.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
pub fn create_default_config_at(path: &Path, force: bool) -> Result<PathBuf, ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(path)?;
    tracing::info!("Created default configuration at {}", path.display());
    Ok(path.to_path_buf())
}

/// Writes the template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_err = |source: std::io::Error| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        xdg::ensure_dir(parent).map_err(write_err)?;
    }

    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_err)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
