//! File-backed local layout cache, one slot per user.

use super::StoreError;
use crate::layout::LayoutModel;
use chrono::Local;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A single user's cached layout on disk.
///
/// The slot holds the raw stored payload; callers normalize what they read.
#[derive(Debug, Clone)]
pub struct LayoutCache {
    path: PathBuf,
}

impl LayoutCache {
    /// Cache slot at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache slot for `user` inside `dir`, as `<dir>/<user>.json`.
    ///
    /// Characters outside `[A-Za-z0-9._-]` are replaced with `_` so a user
    /// name can never escape `dir`.
    pub fn for_user(dir: &Path, user: &str) -> Self {
        let mut name: String = user
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if name.is_empty() || name.chars().all(|c| c == '.') {
            name = "_".repeat(name.len().max(1));
        }
        Self::new(dir.join(format!("{name}.json")))
    }

    /// Path of the slot.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the slot.
    ///
    /// A missing slot and a slot holding invalid JSON both read as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the file exists but cannot be read.
    pub fn read(&self) -> Result<Option<Value>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), "ignoring corrupt layout cache: {e}");
                Ok(None)
            }
        }
    }

    /// Replaces the slot with `model`.
    ///
    /// Writes a timestamped temp file next to the slot, syncs it, then
    /// renames it into place, so readers see either the old or the new
    /// layout and never a partial one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the directory cannot be created or any step
    /// of the write fails.
    pub fn write(&self, model: &LayoutModel) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(model)?;
        let timestamp = Local::now().format("%Y%m%d-%H%M%S%f");
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "layout.json".to_string());
        let temp_path = self
            .path
            .with_file_name(format!("{file_name}.tmp.{timestamp}"));

        fs::write(&temp_path, json).map_err(io_err)?;
        let file = fs::File::open(&temp_path).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        fs::rename(&temp_path, &self.path).map_err(|_| StoreError::WriteAtomic {
            path: self.path.clone(),
            temp_path: temp_path.clone(),
        })?;
        Ok(())
    }

    /// Removes the slot. Removing an absent slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
