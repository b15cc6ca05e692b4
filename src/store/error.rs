//! Error types for layout persistence.

use layout_client::ApiError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the local layout cache.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or removing the cache slot failed.
    #[error("Cache I/O failed for {path}: {source}")]
    Io {
        /// Cache slot path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The layout could not be serialized for the cache.
    #[error("Failed to serialize layout: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The temp file could not be renamed over the cache slot.
    #[error("Failed to replace {path} with {temp_path}")]
    WriteAtomic {
        /// Cache slot path.
        path: PathBuf,
        /// Temp file left behind.
        temp_path: PathBuf,
    },
}

/// Errors raised by a remote layout backend.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The HTTP endpoint failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// An in-process backend refused the call.
    #[error("Remote unavailable: {0}")]
    Unavailable(String),
}
